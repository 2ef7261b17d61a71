//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the innkeep data directory and database.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_data_dir, GlobalOptions};
use clap::Parser;
use innkeep::config::loader::USER_CONFIG_FILE;
use innkeep::database::DATABASE_FILE;
use innkeep::init::{init_database, InitOptions};
use std::path::PathBuf;

/// Initialize innkeep data directory and database.
#[derive(Parser)]
#[command(about = "Initialize innkeep data directory and database")]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Overwrite existing database
    #[arg(long)]
    overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// The `--data-dir` flag here names where to create the data directory,
    /// and takes priority over the global flag.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Priority: command flag > global flag > default
        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => resolve_data_dir(global)?,
        };

        if self.dry_run {
            print_plan(&data_dir, self.overwrite, self.with_config);
            return Ok(());
        }

        // The configured room is recorded in the new database
        let scoped = GlobalOptions {
            data_dir: Some(data_dir.clone()),
            ..global.clone()
        };
        let config = load_configuration(&scoped)?;

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config)
            .with_room(config.room());

        let result = init_database(&options)?;

        println!("Initialized innkeep in: {}", result.data_dir.display());

        if result.data_dir_created {
            println!("  - Created data directory");
        }

        if result.database_replaced {
            println!("  - Recreated database");
        } else {
            println!("  - Created database");
        }

        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}

fn print_plan(data_dir: &std::path::Path, overwrite: bool, with_config: bool) {
    println!("Dry-run mode: no changes will be made");
    println!();
    println!("Would initialize innkeep in: {}", data_dir.display());

    if data_dir.exists() {
        println!("  - Data directory already exists: {}", data_dir.display());
    } else {
        println!("  - Create data directory: {}", data_dir.display());
    }

    let db_path = data_dir.join(DATABASE_FILE);
    if !db_path.exists() {
        println!("  - Create database: {}", db_path.display());
    } else if overwrite {
        println!("  - Remove existing database: {}", db_path.display());
        println!("  - Create new database: {}", db_path.display());
    } else {
        println!(
            "  - ERROR: Database already exists (use --overwrite to replace): {}",
            db_path.display()
        );
    }

    if with_config {
        let config_path = data_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            println!(
                "  - Configuration file already exists (will not overwrite): {}",
                config_path.display()
            );
        } else {
            println!("  - Create configuration file: {}", config_path.display());
        }
    }
}
