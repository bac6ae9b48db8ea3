//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Problems found in the log data itself are not errors: they are
//! [`Violation`]s, collected by [`crate::utils::diagnostics::Diagnostics`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading a timing log
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read log file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid line pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Structural problem with a timer's note sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum LifecycleIssue {
    /// Fewer notes than a completed timer must carry
    TooFewNotes { count: usize },
    /// Last note is not "freed ..."
    MissingFreed { message: String },
    /// Second-to-last note is not "complete ..."
    MissingComplete { message: String },
    /// First note is not "init ..." (or "main init ..." for the main timer)
    BadInitStart { message: String },
    /// Second note does not end with "end"
    BadInitEnd { message: String },
    /// A "start" note not immediately followed by an "end" note
    UnpairedStart { start: String, next: String },
    /// A note where a "start" note was expected
    UnexpectedNote { message: String },
    /// A start/end pair whose start is not receive, complete or promise
    UnknownCategory { message: String },
}

impl std::fmt::Display for LifecycleIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewNotes { count } => write!(f, "only {} notes recorded", count),
            Self::MissingFreed { message } => write!(f, "expected freed message: {}", message),
            Self::MissingComplete { message } => {
                write!(f, "expected complete message: {}", message)
            }
            Self::BadInitStart { message } => write!(f, "init message is wrong: {}", message),
            Self::BadInitEnd { message } => write!(f, "init end message is wrong: {}", message),
            Self::UnpairedStart { start, next } => {
                write!(f, "next line does not end: {} -> {}", start, next)
            }
            Self::UnexpectedNote { message } => write!(f, "unexpected line: {}", message),
            Self::UnknownCategory { message } => write!(f, "unknown handler category: {}", message),
        }
    }
}

/// A data-integrity problem found in the log (reported, never fatal)
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("duplicated measure: party {party}, ID {identity} (line {line})")]
    DuplicateMeasure {
        party: String,
        identity: String,
        line: usize,
    },

    #[error("measure not found: party {party}, ID {identity} (line {line})")]
    UnknownMeasure {
        party: String,
        identity: String,
        line: usize,
    },

    #[error("malformed timer line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("malformed lifecycle: party {party}, ID {identity}: {issue}")]
    MalformedLifecycle {
        party: String,
        identity: String,
        issue: LifecycleIssue,
    },
}
