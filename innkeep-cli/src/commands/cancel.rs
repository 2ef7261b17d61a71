//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_engine, GlobalOptions};
use clap::Args;
use innkeep::ReservationId;

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Id of the reservation to cancel
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut engine = open_engine(global, &load_configuration(global)?)?;

        let cancellation = engine.cancel_reservation(ReservationId::new(self.id))?;

        if !global.quiet {
            println!("{}", cancellation.message);
        }

        Ok(())
    }
}
