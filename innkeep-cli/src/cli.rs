//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AvailabilityCommand, BookCommand, CancelCommand, CompletionsCommand, InitCommand,
    ListCommand, ModifyCommand, ShowCommand, ShowDataDirCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for booking a single room over date ranges.
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about = "Book a single room over date ranges", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "INNKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(
        long,
        value_name = "SECONDS",
        global = true,
        env = "INNKEEP_BUSY_TIMEOUT",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "INNKEEP_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Book the room for a guest
    Book(BookCommand),

    /// Change the guest or dates of a reservation
    Modify(ModifyCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Check whether the room is free for a date range
    Availability(AvailabilityCommand),

    /// List reservations
    List(ListCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
