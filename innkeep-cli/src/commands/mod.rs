//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `book`: Book the room for a guest
//! - `modify`: Change the guest or dates of a reservation
//! - `cancel`: Cancel a reservation
//! - `availability`: Check whether the room is free
//! - `list`: List reservations
//! - `show`: Show one reservation
//! - `show_data_dir`: Show resolved data directory path
//! - `completions`: Generate shell completion scripts

pub mod availability;
pub mod book;
pub mod cancel;
pub mod completions;
pub mod init;
pub mod list;
pub mod modify;
pub mod show;
pub mod show_data_dir;

pub use availability::AvailabilityCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use modify::ModifyCommand;
pub use show::ShowCommand;
pub use show_data_dir::ShowDataDirCommand;
