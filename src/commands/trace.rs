//! Trace command: replay the log in original order as a CSV table.

use super::models::ExportArgs;
use super::utils::{enforce_strict, output_file, validate_log_path};
use crate::output::{trace_csv, trace_rows, write_text};
use crate::parser::read_log;
use crate::utils::config::RAW_TRACE_SUFFIX;
use anyhow::{Context, Result};
use log::info;

/// Execute the trace command
pub fn execute_trace(args: ExportArgs) -> Result<()> {
    validate_log_path(&args.log_path)?;

    let outcome = read_log(&args.log_path).context("Failed to parse timing log")?;
    let rows = trace_rows(&outcome.log);
    info!("Replaying {} timer events", rows.len());

    let path = output_file(&args.log_path, args.output_dir.as_deref(), RAW_TRACE_SUFFIX);
    write_text(&trace_csv(&rows), &path).context("Failed to write raw trace CSV")?;

    enforce_strict(&outcome.diagnostics, args.strict)
}
