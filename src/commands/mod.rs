//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod graph;
pub mod models;
pub mod trace;
pub mod utils;

// Re-export main command functions
pub use analyze::{analyze_log, build_report, execute_analyze, validate_args, Analysis};
pub use graph::execute_graph;
pub use models::{AnalyzeArgs, ExportArgs};
pub use trace::execute_trace;
pub use utils::display_version;
