//! Output writers for analysis results.
//!
//! This module handles writing data to disk in various formats:
//! - CSV tables (per instance, per fronctocol type, raw trace)
//! - Graphviz hierarchies (one per party)
//! - JSON reports
//! - Terminal summaries

pub mod csv;
pub mod dot;
pub mod json;
pub mod report;
pub mod summary;

// Re-export main functions
pub use csv::{by_name_csv, individual_csv, trace_csv, trace_rows, TraceRow};
pub use dot::{dot_file_name, party_graph};
pub use json::{read_report, write_report};
pub use report::AnalysisReport;
pub use summary::text_summary;

use crate::utils::error::OutputError;
use log::{debug, info};
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Validate `path` and create its parent directories
fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    validate_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Write a rendered text table or graph to disk
pub fn write_text(content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    prepare_output_path(output_path)?;

    std::fs::write(output_path, content).map_err(OutputError::WriteFailed)?;

    info!(
        "✓ Written {} ({} bytes)",
        output_path.display(),
        content.len()
    );
    Ok(())
}
