//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, RoomConfig};
use super::validator::ConfigValidator;
use crate::reservation::RoomType;
use proptest::prelude::*;

fn room_type_strategy() -> impl Strategy<Value = RoomType> {
    prop_oneof![
        Just(RoomType::Single),
        Just(RoomType::Double),
        Just(RoomType::Twin),
        Just(RoomType::Suite),
    ]
}

fn room_strategy() -> impl Strategy<Value = RoomConfig> {
    (
        prop::option::of(1i64..1000),
        prop::option::of(1u32..8),
        prop::option::of(room_type_strategy()),
    )
        .prop_map(|(id, number_of_beds, room_type)| RoomConfig {
            id,
            number_of_beds,
            room_type,
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u32..60),
        prop::option::of(0u32..400),
        prop::option::of(room_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(1u64..120),
    )
        .prop_map(
            |(max_stay_days, max_advance_booking_days, room, disable_autoinit, lock)| Config {
                max_stay_days,
                max_advance_booking_days,
                room,
                disable_autoinit,
                maximum_lock_wait_seconds: lock,
                output_format: None,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Any field set in the higher layer ends up in the result.
    #[test]
    fn merge_higher_layer_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.max_stay_days, high.max_stay_days.or(low.max_stay_days));
        prop_assert_eq!(
            merged.max_advance_booking_days,
            high.max_advance_booking_days.or(low.max_advance_booking_days)
        );
        prop_assert_eq!(
            merged.disable_autoinit,
            high.disable_autoinit.or(low.disable_autoinit)
        );
        prop_assert_eq!(merged.room.is_some(), high.room.is_some() || low.room.is_some());
    }

    // Merging a config into itself changes nothing.
    #[test]
    fn merge_is_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Layers built from valid values always validate after merging.
    #[test]
    fn merged_valid_configs_stay_valid(a in config_strategy(), b in config_strategy()) {
        let mut merged = a;
        ConfigMerger::merge_into(&mut merged, &b);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }
}
