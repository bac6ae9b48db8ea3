use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Timing log to analyze
    pub log_path: PathBuf,

    /// Directory for CSV outputs (None = next to the log)
    pub output_dir: Option<PathBuf>,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Number of fronctocol types shown in the summary
    pub summary_rows: usize,

    /// Fail the run when any violation is found
    pub strict: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            log_path: PathBuf::new(),
            output_dir: None,
            output_json: None,
            print_summary: false,
            summary_rows: 20,
            strict: false,
        }
    }
}

/// Arguments shared by the trace and graph exports
#[derive(Debug, Clone, Default)]
pub struct ExportArgs {
    /// Timing log to export
    pub log_path: PathBuf,

    /// Output directory (None = next to the log)
    pub output_dir: Option<PathBuf>,

    /// Fail the run when any violation is found
    pub strict: bool,
}
