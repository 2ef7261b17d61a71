//! Availability command implementation.
//!
//! Exits 0 when the range could be booked and 1 when it overlaps an
//! active reservation, so that scripts can branch on the status alone.

use crate::error::CliError;
use crate::utils::{load_configuration, open_engine, parse_date, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;

/// Check whether the room is free for a date range.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// First night of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub check_in: NaiveDate,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub check_out: NaiveDate,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = open_engine(global, &load_configuration(global)?)?;

        let report = engine.check_availability(self.check_in, self.check_out)?;

        if !report.available {
            return Err(CliError::SemanticFailure(report.message));
        }

        if !global.quiet {
            println!("{}", report.message);
        }

        Ok(())
    }
}
