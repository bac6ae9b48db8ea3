//! Terminal summary of per-type statistics.

use crate::aggregator::fronctocol::FronctocolSummary;

const NAME_WIDTH: usize = 42;

/// Render a table of the fronctocol types with the largest total running time
pub fn text_summary(summaries: &[FronctocolSummary], max_lines: usize) -> String {
    let mut ranked: Vec<&FronctocolSummary> = summaries.iter().collect();
    ranked.sort_by(|a, b| {
        b.running
            .total
            .cmp(&a.running.total)
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut lines = Vec::new();
    lines.push("  FRONCTOCOL TIMING (slowest first)".to_string());
    lines.push(format!(
        "  {:<width$} | {:>7} | {:>12} | {:>12} | {:>12} | {:>8}",
        "Fronctocol",
        "COUNT",
        "TOTAL (us)",
        "MEAN (us)",
        "MEDIAN (us)",
        "ACTIVES",
        width = NAME_WIDTH
    ));
    lines.push(format!("  {}", "-".repeat(NAME_WIDTH + 68)));

    for summary in ranked.iter().take(max_lines) {
        let display_name = if summary.name.chars().count() > NAME_WIDTH {
            let tail: String = summary
                .name
                .chars()
                .rev()
                .take(NAME_WIDTH - 3)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{}", tail)
        } else {
            summary.name.clone()
        };

        lines.push(format!(
            "  {:<width$} | {:>7} | {:>12} | {:>12.1} | {:>12.1} | {:>8}",
            display_name,
            summary.count,
            summary.running.total,
            summary.running.mean,
            summary.running.median,
            summary.active.count_per_median,
            width = NAME_WIDTH
        ));
    }

    if ranked.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} fronctocol types)",
            max_lines,
            ranked.len()
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::derive::MeasureMetrics;
    use crate::aggregator::fronctocol::FronctocolStats;

    fn summary(name: &str, running: i64) -> FronctocolSummary {
        let mut stats = FronctocolStats::new();
        stats.add(&MeasureMetrics {
            running_time: running,
            actives: vec![1],
            ..Default::default()
        });
        stats.summarize(name)
    }

    #[test]
    fn test_slowest_first() {
        let text = text_summary(&[summary("Fast", 10), summary("Slow", 900)], 10);
        let slow = text.find("Slow").unwrap();
        let fast = text.find("Fast").unwrap();
        assert!(slow < fast);
    }

    #[test]
    fn test_truncates_rows() {
        let text = text_summary(&[summary("A", 1), summary("B", 2), summary("C", 3)], 2);
        assert!(text.contains("Showing top 2 of 3"));
        assert!(!text.lines().any(|l| l.starts_with("  A ")));
        assert!(text.lines().any(|l| l.starts_with("  C ")));
    }
}
