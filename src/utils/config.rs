//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Identity of the root ("main") timer within each party
pub const MAIN_IDENTITY: &str = "0";

/// A completed timer carries init-start, init-end, complete and freed notes
pub const MIN_COMPLETE_NOTES: usize = 4;

// Batch-encoded fronctocol names: "Batch size: <N> of <rest>"
pub const BATCH_PREFIX: &str = "Batch size: ";
pub const BATCH_SEPARATOR: &str = " of ";

// Output file suffixes, appended to the log file stem
pub const INDIVIDUAL_SUFFIX: &str = "_individual.csv";
pub const BY_NAME_SUFFIX: &str = "_by_name.csv";
pub const RAW_TRACE_SUFFIX: &str = "_raw.csv";
pub const DOT_EXTENSION: &str = "dot";
