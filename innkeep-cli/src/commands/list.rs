//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_engine, GlobalOptions};
use clap::Args;
use innkeep::config::OutputFormat;
use innkeep::Reservation;
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 8] = [
    "id",
    "guest",
    "room",
    "check_in",
    "check_out",
    "status",
    "created_at",
    "modified_at",
];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (defaults to the configured `output_format`, then table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Hide cancelled reservations
    #[arg(long)]
    pub active_only: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Open database
        let engine = open_engine(global, &config)?;

        // 3. Query reservations
        let mut reservations = engine.list_reservations()?;

        // 4. Apply filters
        if self.active_only {
            reservations.retain(|r| !r.is_cancelled());
        }

        // 5. Format and output to stdout
        let format = self
            .format
            .or(config.output_format)
            .unwrap_or(OutputFormat::Table);
        match format {
            OutputFormat::Table => format_as_table(&reservations)?,
            OutputFormat::Json => format_as_json(&reservations)?,
            OutputFormat::Csv => format_as_csv(&reservations)?,
            OutputFormat::Tsv => format_as_tsv(&reservations)?,
        }

        Ok(())
    }
}

fn status(res: &Reservation) -> &'static str {
    if res.is_cancelled() {
        "cancelled"
    } else {
        "active"
    }
}

fn id_string(res: &Reservation) -> String {
    res.id().map(|id| id.to_string()).unwrap_or_default()
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    // Print header (uppercase for table display)
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            id_string(res),
            res.guest_name(),
            res.room_id(),
            res.check_in(),
            res.check_out(),
            status(res),
            format_timestamp(res.created_at()),
            format_timestamp(res.modified_at()),
        )?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = reservations
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id().map(|id| id.value()),
                "guest": r.guest_name(),
                "room": r.room_id().value(),
                "check_in": r.check_in().to_string(),
                "check_out": r.check_out().to_string(),
                "cancelled": r.is_cancelled(),
                "created_at": format_timestamp(r.created_at()),
                "modified_at": format_timestamp(r.modified_at()),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited(reservations: &[Reservation], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for res in reservations {
        writer
            .write_record(&[
                id_string(res),
                res.guest_name().to_string(),
                res.room_id().to_string(),
                res.check_in().to_string(),
                res.check_out().to_string(),
                status(res).to_string(),
                format_timestamp(res.created_at()),
                format_timestamp(res.modified_at()),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}

/// Format reservations as CSV.
fn format_as_csv(reservations: &[Reservation]) -> Result<(), CliError> {
    format_as_delimited(reservations, b',')
}

/// Format reservations as TSV (tab-separated values).
fn format_as_tsv(reservations: &[Reservation]) -> Result<(), CliError> {
    format_as_delimited(reservations, b'\t')
}
