//! Machine-readable analysis report.

use crate::aggregator::fronctocol::FronctocolSummary;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::Violation;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Log file the report was computed from
    pub source: String,

    /// Number of parties seen in the log
    pub party_count: usize,

    /// Number of timer instances parsed
    pub measure_count: usize,

    /// Number of instances that passed into aggregation
    pub analyzed_count: usize,

    /// Per-type statistics, in name order
    pub fronctocols: Vec<FronctocolSummary>,

    /// Data-integrity problems found while parsing and deriving
    pub violations: Vec<Violation>,

    /// Timestamp when report was generated
    pub generated_at: String,
}

impl AnalysisReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source: source.into(),
            party_count: 0,
            measure_count: 0,
            analyzed_count: 0,
            fronctocols: Vec::new(),
            violations: Vec::new(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// True when no violation was found
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
