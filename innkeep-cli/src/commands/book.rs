//! Book command implementation.
//!
//! This module implements the `book` command, which places a new
//! reservation and prints its id.

use crate::error::CliError;
use crate::utils::{load_configuration, open_engine, parse_date, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;

/// Book the room for a guest.
#[derive(Args)]
pub struct BookCommand {
    /// Name of the guest
    #[arg(long, value_name = "NAME")]
    pub guest: String,

    /// First night of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub check_in: NaiveDate,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub check_out: NaiveDate,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut engine = open_engine(global, &load_configuration(global)?)?;

        let reservation = engine.place_reservation(&self.guest, self.check_in, self.check_out)?;

        let id = reservation
            .id()
            .ok_or_else(|| CliError::SemanticFailure("Reservation was not assigned an id".into()))?;

        // Output the id (the only thing on stdout)
        println!("{id}");

        if global.verbose {
            eprintln!(
                "Booked {} for {}",
                reservation.stay(),
                reservation.guest_name()
            );
        }

        Ok(())
    }
}
