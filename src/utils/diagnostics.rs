//! Collector for non-fatal data-integrity violations.

use super::error::Violation;
use log::warn;
use serde::{Deserialize, Serialize};

/// Violations in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    violations: Vec<Violation>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation and echo it to the log
    pub fn report(&mut self, violation: Violation) {
        warn!("oops: {}", violation);
        self.violations.push(violation);
    }

    /// Append everything another collector found
    pub fn merge(&mut self, other: Diagnostics) {
        self.violations.extend(other.violations);
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::LifecycleIssue;

    #[test]
    fn test_report_keeps_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(Violation::UnknownMeasure {
            party: "alice".to_string(),
            identity: "7".to_string(),
            line: 3,
        });
        diagnostics.report(Violation::MalformedLifecycle {
            party: "alice".to_string(),
            identity: "1".to_string(),
            issue: LifecycleIssue::TooFewNotes { count: 2 },
        });

        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(
            diagnostics.violations()[0],
            Violation::UnknownMeasure { .. }
        ));
    }

    #[test]
    fn test_merge() {
        let mut first = Diagnostics::new();
        let mut second = Diagnostics::new();
        second.report(Violation::MalformedLine {
            line: 0,
            reason: "missing ID".to_string(),
        });

        first.merge(second);
        assert_eq!(first.len(), 1);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::DuplicateMeasure {
            party: "bob".to_string(),
            identity: "4".to_string(),
            line: 12,
        };
        assert_eq!(
            violation.to_string(),
            "duplicated measure: party bob, ID 4 (line 12)"
        );
    }
}
