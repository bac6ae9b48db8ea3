//! Derivation and aggregation of timer metrics.
//!
//! This module transforms parsed timing logs into:
//! - Validated per-instance metrics (init, running, free, active, waiting)
//! - Per-type duration pools keyed by fronctocol name
//! - Descriptive statistics over those pools

pub mod derive;
pub mod fronctocol;
pub mod statistics;

// Re-export main types and functions
pub use derive::{derive_all, derive_metrics, DerivedMeasure, HandlerCategory, MeasureMetrics};
pub use fronctocol::{aggregate, summarize_all, FronctocolStats, FronctocolSummary, PoolSummary};
pub use statistics::Summary;
