//! Parser for runtime timing logs.
//!
//! Scans raw log lines of the form
//!
//! ```text
//! 2021-03-04 10:11:12  TIME (alice): Starting Timer "FF: Compare; ID: 3", parent: 1
//! 2021-03-04 10:11:12  TIME (alice): Timer "FF: Compare; ID: 3": 150us, handle receive start
//! ```
//!
//! and rebuilds the per-party [`Measure`]/[`Note`] hierarchy plus the
//! global [`OrderEvent`] trace. Lines without the timing header are noise
//! and are skipped silently; integrity problems become [`Violation`]s.

use super::schema::{Measure, Note, OrderEvent, ParsedLog};
use crate::utils::diagnostics::Diagnostics;
use crate::utils::error::{ParseError, Violation};
use log::{debug, info};
use regex::Regex;
use std::path::Path;

const HEADER_PATTERN: &str =
    r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2} +TIME \(([a-zA-Z0-9 ,{}.\-]+)\): ";
const ANSI_PATTERN: &str = r"\x1b\[[0-9;]*m";
const START_PATTERN: &str = r#"Starting Timer "FF: (.*?); ID: ([0-9]+)""#;
const PARENT_PATTERN: &str = r"parent: ([0-9]+|none)$";
const UPDATE_PATTERN: &str = r#"Timer "FF: .*?; ID: ([0-9]+)": ([0-9]+[a-z]{2})(?:, (.*))?$"#;

const START_MARKER: &str = "Starting Timer \"FF: ";
const UPDATE_MARKER: &str = "Timer \"FF: ";

/// Parser output: the reconstructed model and what went wrong building it
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub log: ParsedLog,
    pub diagnostics: Diagnostics,
}

/// Compiled line patterns
#[derive(Debug, Clone)]
pub struct TimingLogParser {
    header: Regex,
    ansi: Regex,
    start: Regex,
    parent: Regex,
    update: Regex,
}

/// Mutable state of one parse pass
#[derive(Default)]
struct ParseState {
    log: ParsedLog,
    diagnostics: Diagnostics,
    index: usize,
}

impl TimingLogParser {
    /// Compile the line patterns
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            header: Regex::new(HEADER_PATTERN)?,
            ansi: Regex::new(ANSI_PATTERN)?,
            start: Regex::new(START_PATTERN)?,
            parent: Regex::new(PARENT_PATTERN)?,
            update: Regex::new(UPDATE_PATTERN)?,
        })
    }

    /// Parse a whole log held in memory
    pub fn parse_str(&self, text: &str) -> ParseOutcome {
        self.parse_lines(text.lines())
    }

    /// Parse a sequence of log lines in order
    pub fn parse_lines<'a, I>(&self, lines: I) -> ParseOutcome
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = ParseState::default();

        for (line_no, raw) in lines.into_iter().enumerate() {
            self.parse_line(&mut state, raw, line_no + 1);
        }

        debug!(
            "Parsed {} timer lines across {} parties",
            state.index,
            state.log.parties.len()
        );

        ParseOutcome {
            log: state.log,
            diagnostics: state.diagnostics,
        }
    }

    fn parse_line(&self, state: &mut ParseState, raw: &str, line_no: usize) {
        let cleaned = self.ansi.replace_all(raw, "");
        let Some(header) = self.header.captures(&cleaned) else {
            return;
        };
        let (Some(whole), Some(party)) = (header.get(0), header.get(1)) else {
            return;
        };
        let party = party.as_str().to_string();
        let rest = cleaned[whole.end()..].trim_end();

        state.log.parties.entry(party.clone()).or_default();

        if rest.contains(START_MARKER) {
            self.parse_start(state, party, rest, line_no);
        } else if rest.contains(UPDATE_MARKER) {
            self.parse_update(state, party, rest, line_no);
        }

        state.index += 1;
    }

    /// Handle a "Starting Timer" body
    fn parse_start(&self, state: &mut ParseState, party: String, rest: &str, line_no: usize) {
        let Some(caps) = self.start.captures(rest) else {
            state.diagnostics.report(Violation::MalformedLine {
                line: line_no,
                reason: "start line without a numeric ID".to_string(),
            });
            return;
        };
        let Some(parent) = self.parent.captures(rest).and_then(|c| c.get(1)) else {
            state.diagnostics.report(Violation::MalformedLine {
                line: line_no,
                reason: "start line without a parent".to_string(),
            });
            return;
        };
        let name = caps.get(1).map_or("", |m| m.as_str());
        let identity = caps.get(2).map_or("", |m| m.as_str()).to_string();

        let measures = state.log.parties.entry(party.clone()).or_default();
        if measures.contains_key(&identity) {
            state.diagnostics.report(Violation::DuplicateMeasure {
                party,
                identity,
                line: line_no,
            });
            return;
        }

        measures.insert(
            identity.clone(),
            Measure::new(identity.clone(), name, parent.as_str(), state.index),
        );
        state.log.order.push(OrderEvent::Measure { party, identity });
    }

    /// Handle a "Timer" update body
    fn parse_update(&self, state: &mut ParseState, party: String, rest: &str, line_no: usize) {
        let Some(caps) = self.update.captures(rest) else {
            state.diagnostics.report(Violation::MalformedLine {
                line: line_no,
                reason: "update line without an ID and time".to_string(),
            });
            return;
        };
        let identity = caps.get(1).map_or("", |m| m.as_str()).to_string();
        let time = caps.get(2).map_or("", |m| m.as_str());
        let message = caps.get(3).map_or("", |m| m.as_str());

        let digits = time.get(..time.len().saturating_sub(2)).unwrap_or_default();
        if digits.parse::<i64>().is_err() {
            state.diagnostics.report(Violation::MalformedLine {
                line: line_no,
                reason: "timestamp out of range".to_string(),
            });
            return;
        }

        let Some(measure) = state
            .log
            .parties
            .get_mut(&party)
            .and_then(|measures| measures.get_mut(&identity))
        else {
            state.diagnostics.report(Violation::UnknownMeasure {
                party,
                identity,
                line: line_no,
            });
            return;
        };

        let place = measure.add_note(Note::new(time, message, state.index));
        state.log.order.push(OrderEvent::Note {
            party,
            identity,
            place,
        });
    }
}

/// Parse a log held in memory with a freshly compiled parser
pub fn parse_log(text: &str) -> Result<ParseOutcome, ParseError> {
    Ok(TimingLogParser::new()?.parse_str(text))
}

/// Read a log file completely, then parse it
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::ReadFailed` - the file cannot be read
pub fn read_log(path: impl AsRef<Path>) -> Result<ParseOutcome, ParseError> {
    let path = path.as_ref();
    info!("Reading timing log: {}", path.display());

    let bytes = std::fs::read(path).map_err(|source| ParseError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let outcome = parse_log(&text)?;
    info!(
        "Parsed {} measures across {} parties ({} violations)",
        outcome.log.measure_count(),
        outcome.log.parties.len(),
        outcome.diagnostics.len()
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "2021-03-04 10:11:12  TIME (alice): ";

    fn line(body: &str) -> String {
        format!("{}{}", PREFIX, body)
    }

    #[test]
    fn test_start_line_creates_measure() {
        let text = line(r#"Starting Timer "FF: Batch size: 2 of Compare; ID: 3", parent: 1"#);
        let outcome = parse_log(&text).unwrap();

        let measure = outcome.log.measure("alice", "3").unwrap();
        assert_eq!(measure.name, "Batch size: 2 of Compare");
        assert_eq!(measure.parent, "1");
        assert!(measure.notes.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_main_parent_none() {
        let text = line(r#"Starting Timer "FF: Main; ID: 0", parent: none"#);
        let outcome = parse_log(&text).unwrap();
        assert_eq!(outcome.log.measure("alice", "0").unwrap().parent, "none");
    }

    #[test]
    fn test_update_line_appends_note() {
        let text = [
            line(r#"Starting Timer "FF: Compare; ID: 3", parent: 1"#),
            line(r#"Timer "FF: Compare; ID: 3": 150us, handle receive start"#),
        ]
        .join("\n");
        let outcome = parse_log(&text).unwrap();

        let measure = outcome.log.measure("alice", "3").unwrap();
        assert_eq!(measure.notes.len(), 1);
        assert_eq!(measure.notes[0].time, "150us");
        assert_eq!(measure.notes[0].micros(), 150);
        assert_eq!(measure.notes[0].message, "handle receive start");
        assert_eq!(measure.notes[0].index, 1);
    }

    #[test]
    fn test_message_may_contain_commas() {
        let text = [
            line(r#"Starting Timer "FF: Compare; ID: 3", parent: 1"#),
            line(r#"Timer "FF: Compare; ID: 3": 20us, child: 4, invoke"#),
        ]
        .join("\n");
        let outcome = parse_log(&text).unwrap();
        let measure = outcome.log.measure("alice", "3").unwrap();
        assert_eq!(measure.notes[0].message, "child: 4, invoke");
    }

    #[test]
    fn test_noise_lines_ignored() {
        let text = [
            "".to_string(),
            "random output".to_string(),
            "2021-03-04 10:11:12  INFO (alice): hello".to_string(),
            line(r#"Starting Timer "FF: Main; ID: 0", parent: none"#),
        ]
        .join("\n");
        let outcome = parse_log(&text).unwrap();

        assert_eq!(outcome.log.order.len(), 1);
        assert_eq!(outcome.log.measure("alice", "0").unwrap().index, 0);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_ansi_colour_stripped() {
        let text = format!(
            "\x1b[32m{}\x1b[0m{}",
            PREFIX, r#"Starting Timer "FF: Main; ID: 0", parent: none"#
        );
        let outcome = parse_log(&text).unwrap();
        assert!(outcome.log.measure("alice", "0").is_some());
    }

    #[test]
    fn test_duplicate_measure_reported() {
        let text = [
            line(r#"Starting Timer "FF: Compare; ID: 3", parent: 1"#),
            line(r#"Starting Timer "FF: Other; ID: 3", parent: 2"#),
        ]
        .join("\n");
        let outcome = parse_log(&text).unwrap();

        assert_eq!(outcome.log.measure("alice", "3").unwrap().name, "Compare");
        assert_eq!(
            outcome.diagnostics.violations(),
            &[Violation::DuplicateMeasure {
                party: "alice".to_string(),
                identity: "3".to_string(),
                line: 2,
            }]
        );
        assert_eq!(outcome.log.order.len(), 1);
    }

    #[test]
    fn test_unknown_measure_reported() {
        let text = line(r#"Timer "FF: Compare; ID: 9": 10us, init start"#);
        let outcome = parse_log(&text).unwrap();

        assert!(outcome.log.measure("alice", "9").is_none());
        assert!(outcome.log.order.is_empty());
        assert!(matches!(
            outcome.diagnostics.violations(),
            [Violation::UnknownMeasure { .. }]
        ));
    }

    #[test]
    fn test_identity_is_per_party() {
        let text = [
            line(r#"Starting Timer "FF: Main; ID: 0", parent: none"#),
            r#"2021-03-04 10:11:12  TIME (bob): Starting Timer "FF: Main; ID: 0", parent: none"#
                .to_string(),
        ]
        .join("\n");
        let outcome = parse_log(&text).unwrap();

        assert_eq!(outcome.log.parties.len(), 2);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_start_reported() {
        let text = line(r#"Starting Timer "FF: Compare; ID: 3""#);
        let outcome = parse_log(&text).unwrap();
        assert!(outcome.log.measure("alice", "3").is_none());
        assert!(matches!(
            outcome.diagnostics.violations(),
            [Violation::MalformedLine { line: 1, .. }]
        ));
    }

    #[test]
    fn test_oversized_timestamp_reported() {
        let text = [
            line(r#"Starting Timer "FF: Compare; ID: 3", parent: 1"#),
            line(r#"Timer "FF: Compare; ID: 3": 0us, init start"#),
            line(r#"Timer "FF: Compare; ID: 3": 99999999999999999999us, completed"#),
        ]
        .join("\n");
        let outcome = parse_log(&text).unwrap();

        let measure = outcome.log.measure("alice", "3").unwrap();
        assert_eq!(measure.notes.len(), 1);
        assert_eq!(outcome.log.order.len(), 2);
        assert_eq!(
            outcome.diagnostics.violations(),
            &[Violation::MalformedLine {
                line: 3,
                reason: "timestamp out of range".to_string(),
            }]
        );
    }

    #[test]
    fn test_order_trace_places() {
        let text = [
            line(r#"Starting Timer "FF: Compare; ID: 3", parent: 1"#),
            line(r#"Timer "FF: Compare; ID: 3": 0us, init start"#),
            line(r#"Timer "FF: Compare; ID: 3": 5us, init end"#),
        ]
        .join("\n");
        let outcome = parse_log(&text).unwrap();

        assert_eq!(
            outcome.log.order[2],
            OrderEvent::Note {
                party: "alice".to_string(),
                identity: "3".to_string(),
                place: 1,
            }
        );
    }
}
