//! Show command implementation.

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_engine, GlobalOptions};
use clap::Args;
use innkeep::ReservationId;

/// Show one reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Id of the reservation
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global, &load_configuration(global)?)?;

        let res = engine.get_reservation(ReservationId::new(self.id))?;

        println!("Reservation: {}", self.id);
        println!("Guest: {}", res.guest_name());
        println!("Room: {}", res.room_id());
        println!("Check-in: {}", res.check_in());
        println!("Check-out: {}", res.check_out());
        println!(
            "Status: {}",
            if res.is_cancelled() {
                "cancelled"
            } else {
                "active"
            }
        );
        println!("Created: {}", format_timestamp(res.created_at()));
        println!("Modified: {}", format_timestamp(res.modified_at()));

        Ok(())
    }
}
