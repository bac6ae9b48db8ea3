//! Timing log parsing and the reconstructed data model.
//!
//! This module handles:
//! - Matching timing header lines and extracting party labels
//! - Building per-party measure/note hierarchies
//! - Recording the global event order
//! - Decoding batch-encoded fronctocol names

pub mod batch_name;
pub mod schema;
pub mod timing_log;

// Re-export main types
pub use batch_name::{batch_depth, batch_total, batch_type, BatchName};
pub use schema::{Measure, Note, OrderEvent, ParsedLog, Parties, Party};
pub use timing_log::{parse_log, read_log, ParseOutcome, TimingLogParser};
