//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads and parses the timing log
//! 2. Validates each timer and derives its metrics
//! 3. Aggregates metrics per fronctocol type
//! 4. Writes the per-instance and per-type CSV tables
//! 5. Writes the JSON report and terminal summary (if requested)

use super::models::AnalyzeArgs;
use super::utils::{enforce_strict, output_file, validate_log_path};
use crate::aggregator::{aggregate, derive_all, summarize_all, DerivedMeasure, FronctocolSummary};
use crate::output::{
    by_name_csv, individual_csv, text_summary, write_report, write_text, AnalysisReport,
};
use crate::parser::{read_log, ParsedLog};
use crate::utils::config::{BY_NAME_SUFFIX, INDIVIDUAL_SUFFIX};
use crate::utils::diagnostics::Diagnostics;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Derived and aggregated view of a parsed log
#[derive(Debug, Clone)]
pub struct Analysis<'a> {
    /// Every measure that was complete enough to derive
    pub derived: Vec<DerivedMeasure<'a>>,

    /// Per-type statistics, in name order
    pub summaries: Vec<FronctocolSummary>,

    /// Lifecycle violations found while deriving
    pub diagnostics: Diagnostics,
}

/// Run derivation and aggregation over a parsed log
///
/// **Public** - the analysis pipeline without any file I/O
pub fn analyze_log(log: &ParsedLog) -> Analysis<'_> {
    let (derived, diagnostics) = derive_all(log);
    let fronctocols = aggregate(&derived);
    let summaries = summarize_all(&fronctocols);

    Analysis {
        derived,
        summaries,
        diagnostics,
    }
}

/// Assemble the JSON report for an analysis
pub fn build_report(
    source: &str,
    log: &ParsedLog,
    analysis: &Analysis<'_>,
    diagnostics: &Diagnostics,
) -> AnalysisReport {
    let mut report = AnalysisReport::new(source);
    report.party_count = log.parties.len();
    report.measure_count = log.measure_count();
    report.analyzed_count = analysis.derived.len();
    report.fronctocols = analysis.summaries.clone();
    report.violations = diagnostics.violations().to_vec();
    report
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Log file cannot be read
/// * Output files cannot be written
/// * Violations were found and `strict` is set
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();
    validate_args(&args)?;

    info!("Starting analysis of: {}", args.log_path.display());

    // Step 1: Parse log
    info!("Step 1/4: Parsing timing log...");
    let outcome = read_log(&args.log_path).context("Failed to parse timing log")?;
    let mut diagnostics = outcome.diagnostics;
    let log = outcome.log;

    // Step 2: Derive and aggregate
    info!("Step 2/4: Deriving per-timer metrics...");
    let analysis = analyze_log(&log);
    diagnostics.merge(analysis.diagnostics.clone());

    debug!(
        "{} of {} measures analyzed into {} fronctocol types",
        analysis.derived.len(),
        log.measure_count(),
        analysis.summaries.len()
    );

    // Step 3: Write CSV tables
    info!("Step 3/4: Writing CSV tables...");
    let output_dir = args.output_dir.as_deref();
    write_text(
        &individual_csv(&analysis.derived),
        output_file(&args.log_path, output_dir, INDIVIDUAL_SUFFIX),
    )
    .context("Failed to write per-instance CSV")?;
    write_text(
        &by_name_csv(&analysis.summaries),
        output_file(&args.log_path, output_dir, BY_NAME_SUFFIX),
    )
    .context("Failed to write per-type CSV")?;

    // Step 4: Report and summary
    if let Some(json_path) = &args.output_json {
        info!("Step 4/4: Writing JSON report...");
        let report = build_report(
            &args.log_path.display().to_string(),
            &log,
            &analysis,
            &diagnostics,
        );
        write_report(&report, json_path).context("Failed to write JSON report")?;
    } else {
        info!("Step 4/4: Skipping JSON report (not requested)");
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("TIMING SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Log:         {}", args.log_path.display());
        println!("Parties:     {}", log.parties.len());
        println!(
            "Measures:    {} ({} analyzed)",
            log.measure_count(),
            analysis.derived.len()
        );
        println!("Violations:  {}", diagnostics.len());
        println!("\n{}", text_summary(&analysis.summaries, args.summary_rows));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    enforce_strict(&diagnostics, args.strict)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    validate_log_path(&args.log_path)?;

    if args.summary_rows == 0 {
        anyhow::bail!("summary_rows must be greater than 0");
    }

    if args.summary_rows > 1000 {
        anyhow::bail!("summary_rows is too large (max 1000)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args_for(path: PathBuf) -> AnalyzeArgs {
        AnalyzeArgs {
            log_path: path,
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_missing_log() {
        let args = args_for(PathBuf::from("/no/such/run.log"));
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_summary_rows() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut args = args_for(file.path().to_path_buf());
        assert!(validate_args(&args).is_ok());

        args.summary_rows = 0;
        assert!(validate_args(&args).is_err());

        args.summary_rows = 2000;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_analyze_empty_log() {
        let log = ParsedLog::default();
        let analysis = analyze_log(&log);
        assert!(analysis.derived.is_empty());
        assert!(analysis.summaries.is_empty());
        assert!(analysis.diagnostics.is_empty());
    }
}
