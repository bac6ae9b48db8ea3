//! JSON report writer.
//!
//! Writes AnalysisReport structs to JSON files with proper formatting.

use super::report::AnalysisReport;
use super::{prepare_output_path, validate_path};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - used by the analyze command for `--json`
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, a directory, or parents cannot be created
/// * `OutputError::WriteFailed` - the file cannot be created
/// * `OutputError::SerializationFailed` - the report cannot be encoded
pub fn write_report(
    report: &AnalysisReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());
    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report written ({} fronctocol types, {} violations)",
        report.fronctocols.len(),
        report.violations.len()
    );
    Ok(())
}

/// Read a report from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - the file cannot be opened
/// * `OutputError::SerializationFailed` - not a report of this schema
pub fn read_report(input_path: impl AsRef<Path>) -> Result<AnalysisReport, OutputError> {
    let input_path = input_path.as_ref();
    validate_path(input_path)?;

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: AnalysisReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, source {}",
        report.version, report.source
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::Violation;
    use tempfile::NamedTempFile;

    fn create_test_report() -> AnalysisReport {
        let mut report = AnalysisReport::new("run.log");
        report.party_count = 2;
        report.measure_count = 7;
        report.violations.push(Violation::UnknownMeasure {
            party: "alice".to_string(),
            identity: "9".to_string(),
            line: 4,
        });
        report
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded, report);
        assert!(!loaded.is_clean());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
