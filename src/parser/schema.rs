//! Hierarchical timing model reconstructed from a log.
//!
//! Each party owns a map from timer identity to [`Measure`]; each measure
//! owns its [`Note`]s in log order. [`OrderEvent`]s replay the whole log.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded sub-event inside a timer's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Elapsed time since the timer started, with its unit marker (e.g. "150us")
    pub time: String,

    /// Free-text description ("init start", "handle receive end", ...)
    pub message: String,

    /// Position among all header-matching log lines
    pub index: usize,
}

impl Note {
    pub fn new(time: impl Into<String>, message: impl Into<String>, index: usize) -> Self {
        Self {
            time: time.into(),
            message: message.into(),
            index,
        }
    }

    /// Timestamp in microseconds (unit marker stripped)
    ///
    /// Malformed times read as 0. The parser rejects timestamps that do
    /// not fit in an `i64`, so parsed notes always convert exactly.
    pub fn micros(&self) -> i64 {
        let digits = self
            .time
            .get(..self.time.len().saturating_sub(2))
            .unwrap_or_default();
        digits.parse().unwrap_or(0)
    }
}

/// One timer instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    /// Unique within a party
    pub identity: String,

    /// Declared name, possibly batch-encoded
    pub name: String,

    /// Identity of the enclosing timer, or "none" for main
    pub parent: String,

    /// Notes in log order
    pub notes: Vec<Note>,

    /// Position of the "Starting Timer" line
    pub index: usize,
}

impl Measure {
    pub fn new(
        identity: impl Into<String>,
        name: impl Into<String>,
        parent: impl Into<String>,
        index: usize,
    ) -> Self {
        Self {
            identity: identity.into(),
            name: name.into(),
            parent: parent.into(),
            notes: Vec::new(),
            index,
        }
    }

    /// Append a note, returning its place within this measure
    pub fn add_note(&mut self, note: Note) -> usize {
        self.notes.push(note);
        self.notes.len() - 1
    }
}

/// Timers of a single party, keyed by identity
pub type Party = BTreeMap<String, Measure>;

/// All parties seen in a log, keyed by party label
pub type Parties = BTreeMap<String, Party>;

/// One replayable entry per parsed timer line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrderEvent {
    /// A "Starting Timer" line created a measure
    Measure { party: String, identity: String },

    /// A "Timer" update appended the note at `place`
    Note {
        party: String,
        identity: String,
        place: usize,
    },
}

impl OrderEvent {
    pub fn party(&self) -> &str {
        match self {
            Self::Measure { party, .. } | Self::Note { party, .. } => party,
        }
    }

    pub fn identity(&self) -> &str {
        match self {
            Self::Measure { identity, .. } | Self::Note { identity, .. } => identity,
        }
    }
}

/// Parser output: the per-party model plus the global trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLog {
    pub parties: Parties,
    pub order: Vec<OrderEvent>,
}

impl ParsedLog {
    /// Look up a measure by party label and identity
    pub fn measure(&self, party: &str, identity: &str) -> Option<&Measure> {
        self.parties.get(party).and_then(|p| p.get(identity))
    }

    pub fn measure_count(&self) -> usize {
        self.parties.values().map(|p| p.len()).sum()
    }
}
