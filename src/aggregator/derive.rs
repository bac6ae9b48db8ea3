//! Lifecycle validation and per-instance metric derivation.
//!
//! A completed timer's notes read:
//!
//! ```text
//! init ... start, init ... end, (handle X start, handle X end)*, complete ..., freed <place>
//! ```
//!
//! Deviations are reported as [`LifecycleIssue`]s and the walk carries on
//! with best-effort values.

use crate::parser::schema::{Measure, Note, ParsedLog};
use crate::utils::config::{MAIN_IDENTITY, MIN_COMPLETE_NOTES};
use crate::utils::diagnostics::Diagnostics;
use crate::utils::error::{LifecycleIssue, Violation};
use log::debug;
use serde::{Deserialize, Serialize};

/// Handler kind of an active start/end pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerCategory {
    Receive,
    Complete,
    Promise,
}

impl HandlerCategory {
    /// Classify a start message by its prefix
    pub fn classify(message: &str) -> Option<Self> {
        if message.starts_with("handle receive") {
            Some(Self::Receive)
        } else if message.starts_with("handle complete") {
            Some(Self::Complete)
        } else if message.starts_with("handle promise") {
            Some(Self::Promise)
        } else {
            None
        }
    }
}

/// Metrics derived from one timer's notes (all times in microseconds)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureMetrics {
    /// Complete note time minus init start time
    pub running_time: i64,
    /// Time of the init start note
    pub init_delay: i64,
    /// Init end minus init start
    pub init_time: i64,
    /// Freed note time minus complete note time
    pub free_delay: i64,
    /// Where init ran ("immediately", "after sync", ...)
    pub init_place: String,
    /// Where the timer was freed
    pub free_place: String,
    /// Init time followed by every handler duration
    pub actives: Vec<i64>,
    /// Idle gap before each handler
    pub waitings: Vec<i64>,
    pub receives: Vec<i64>,
    pub completes: Vec<i64>,
    pub promises: Vec<i64>,
}

/// A measure together with its party and derived metrics
#[derive(Debug, Clone)]
pub struct DerivedMeasure<'a> {
    pub party: &'a str,
    pub measure: &'a Measure,
    pub metrics: MeasureMetrics,
}

/// Derive metrics for every measure of every party
///
/// Measures with too few notes to be complete are reported and left out.
pub fn derive_all(log: &ParsedLog) -> (Vec<DerivedMeasure<'_>>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let mut derived = Vec::with_capacity(log.measure_count());

    for (party, measures) in &log.parties {
        for measure in measures.values() {
            if let Some(metrics) = derive_metrics(party, measure, &mut diagnostics) {
                derived.push(DerivedMeasure {
                    party,
                    measure,
                    metrics,
                });
            }
        }
    }

    debug!(
        "Derived metrics for {} of {} measures",
        derived.len(),
        log.measure_count()
    );
    (derived, diagnostics)
}

/// Validate one measure's notes and compute its metrics
///
/// Returns `None` when the measure has fewer than four notes.
pub fn derive_metrics(
    party: &str,
    measure: &Measure,
    diagnostics: &mut Diagnostics,
) -> Option<MeasureMetrics> {
    let mut report = |issue: LifecycleIssue| {
        diagnostics.report(Violation::MalformedLifecycle {
            party: party.to_string(),
            identity: measure.identity.clone(),
            issue,
        })
    };

    let notes = &measure.notes;
    if notes.len() < MIN_COMPLETE_NOTES {
        report(LifecycleIssue::TooFewNotes { count: notes.len() });
        return None;
    }

    let init_start = &notes[0];
    let init_end = &notes[1];
    let complete = &notes[notes.len() - 2];
    let freed = &notes[notes.len() - 1];

    if !freed.message.starts_with("freed") {
        report(LifecycleIssue::MissingFreed {
            message: freed.message.clone(),
        });
    }
    if !complete.message.starts_with("complete") {
        report(LifecycleIssue::MissingComplete {
            message: complete.message.clone(),
        });
    }

    let init_prefix = if measure.identity == MAIN_IDENTITY {
        "main init"
    } else {
        "init"
    };
    if !init_start.message.starts_with(init_prefix) {
        report(LifecycleIssue::BadInitStart {
            message: init_start.message.clone(),
        });
    }
    if !init_end.message.ends_with("end") {
        report(LifecycleIssue::BadInitEnd {
            message: init_end.message.clone(),
        });
    }

    let init_delay = init_start.micros();
    let init_time = init_end.micros() - init_delay;
    let mut metrics = MeasureMetrics {
        running_time: complete.micros() - init_delay,
        init_delay,
        init_time,
        free_delay: freed.micros() - complete.micros(),
        init_place: init_place(&init_start.message),
        free_place: freed
            .message
            .strip_prefix("freed ")
            .unwrap_or_default()
            .to_string(),
        actives: vec![init_time],
        ..Default::default()
    };

    walk_handlers(&notes[2..notes.len() - 2], init_end, &mut metrics, &mut report);
    Some(metrics)
}

/// Text between "init" and "start" in the init start message
fn init_place(message: &str) -> String {
    let rest = message.strip_prefix("main ").unwrap_or(message);
    let rest = rest.strip_prefix("init").unwrap_or(rest);
    rest.strip_suffix("start").unwrap_or(rest).trim().to_string()
}

/// Walk the handler notes two at a time, filling the duration pools
fn walk_handlers(
    handlers: &[Note],
    init_end: &Note,
    metrics: &mut MeasureMetrics,
    report: &mut impl FnMut(LifecycleIssue),
) {
    let mut prev_end = init_end.micros();
    let mut i = 0;

    while i < handlers.len() {
        let start = &handlers[i];
        if !start.message.ends_with("start") {
            report(LifecycleIssue::UnexpectedNote {
                message: start.message.clone(),
            });
            i += 1;
            continue;
        }

        let Some(end) = handlers.get(i + 1).filter(|n| n.message.ends_with("end")) else {
            report(LifecycleIssue::UnpairedStart {
                start: start.message.clone(),
                next: handlers
                    .get(i + 1)
                    .map(|n| n.message.clone())
                    .unwrap_or_default(),
            });
            i += 2;
            continue;
        };

        let duration = end.micros() - start.micros();
        metrics.waitings.push(start.micros() - prev_end);
        metrics.actives.push(duration);
        prev_end = end.micros();

        match HandlerCategory::classify(&start.message) {
            Some(HandlerCategory::Receive) => metrics.receives.push(duration),
            Some(HandlerCategory::Complete) => metrics.completes.push(duration),
            Some(HandlerCategory::Promise) => metrics.promises.push(duration),
            None => report(LifecycleIssue::UnknownCategory {
                message: start.message.clone(),
            }),
        }
        i += 2;
    }
}
