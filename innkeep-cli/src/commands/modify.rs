//! Modify command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_engine, parse_date, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::ReservationId;

/// Change the guest or dates of a reservation.
#[derive(Args)]
pub struct ModifyCommand {
    /// Id of the reservation to change
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Name of the guest
    #[arg(long, value_name = "NAME")]
    pub guest: String,

    /// New first night of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub check_in: NaiveDate,

    /// New departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub check_out: NaiveDate,
}

impl ModifyCommand {
    /// Execute the modify command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut engine = open_engine(global, &load_configuration(global)?)?;

        let reservation = engine.modify_reservation(
            ReservationId::new(self.id),
            &self.guest,
            self.check_in,
            self.check_out,
        )?;

        if !global.quiet {
            println!(
                "Reservation {} now {} for {}",
                self.id,
                reservation.stay(),
                reservation.guest_name()
            );
        }

        Ok(())
    }
}
