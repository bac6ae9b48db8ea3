//! Fronctocol Timing
//!
//! Timing analysis for logs emitted by the fronctocol runtime. Each party's
//! timers are rebuilt into a measure/note hierarchy, validated, reduced to
//! per-instance metrics and rolled up into per-type statistics.
//!
//! This crate provides the core implementation for the
//! `ff-timing` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! ff-timing analyze --log run.log --summary
//! ff-timing trace --log run.log
//! ff-timing graph --log run.log --output-dir graphs
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
