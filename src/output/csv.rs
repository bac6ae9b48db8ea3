//! CSV exporters for per-instance, per-type and raw trace tables.
//!
//! Fields are separated by `", "`. Party, name, batch type and trace
//! action are double-quoted; init and free places are written bare.

use crate::aggregator::derive::DerivedMeasure;
use crate::aggregator::fronctocol::{FronctocolSummary, PoolSummary};
use crate::aggregator::statistics::Summary;
use crate::parser::batch_name::BatchName;
use crate::parser::schema::{OrderEvent, ParsedLog};

const SEPARATOR: &str = ", ";

/// Column prefixes of the pools exported per instance, in column order
const INSTANCE_POOLS: [&str; 5] = ["active", "waiting", "receive", "complete", "promise"];

const STAT_COLUMNS: [&str; 7] = ["count", "total", "min", "max", "mean", "variance", "median"];

/// Quote a text field, doubling embedded quotes
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Floats always carry a fractional part (`1.0`, not `1`)
fn float_field(value: f64) -> String {
    format!("{:?}", value)
}

fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn stat_headers(prefix: &str, with_count: bool) -> Vec<String> {
    STAT_COLUMNS
        .iter()
        .filter(|col| with_count || **col != "count")
        .map(|col| format!("{}_{}", prefix, col))
        .collect()
}

fn stat_fields(summary: &Summary, with_count: bool) -> Vec<String> {
    let mut fields = Vec::with_capacity(STAT_COLUMNS.len());
    if with_count {
        fields.push(summary.count.to_string());
    }
    fields.extend([
        summary.total.to_string(),
        summary.min.to_string(),
        summary.max.to_string(),
        float_field(summary.mean),
        float_field(summary.variance),
        float_field(summary.median),
    ]);
    fields
}

fn pool_headers(prefix: &str) -> Vec<String> {
    let mut headers = vec![
        format!("{}_count_per_median", prefix),
        format!("{}_count_per_has_differences", prefix),
    ];
    headers.extend(stat_headers(prefix, true));
    headers
}

fn pool_fields(pool: &PoolSummary) -> Vec<String> {
    let mut fields = vec![
        float_field(pool.count_per_median),
        python_bool(pool.count_per_has_differences).to_string(),
    ];
    fields.extend(stat_fields(&pool.stats, true));
    fields
}

fn push_row(out: &mut String, fields: &[String]) {
    out.push_str(&fields.join(SEPARATOR));
    out.push('\n');
}

/// One row per derived timer instance
pub fn individual_csv(measures: &[DerivedMeasure<'_>]) -> String {
    let mut header: Vec<String> = [
        "Party",
        "fronctocol",
        "ID",
        "batch_depth",
        "batch_total",
        "batch_type",
        "total_time",
        "init_place",
        "init_delay",
        "free_place",
        "free_delay",
        "init_time",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    for prefix in INSTANCE_POOLS {
        header.extend(stat_headers(prefix, true));
    }

    let mut out = String::new();
    push_row(&mut out, &header);

    for derived in measures {
        let measure = derived.measure;
        let metrics = &derived.metrics;
        let batch = BatchName::decode(&measure.name);

        let mut fields = vec![
            quote(derived.party),
            quote(&measure.name),
            measure.identity.clone(),
            batch.depth.to_string(),
            batch.total.to_string(),
            quote(&batch.leaf),
            metrics.running_time.to_string(),
            metrics.init_place.clone(),
            metrics.init_delay.to_string(),
            metrics.free_place.clone(),
            metrics.free_delay.to_string(),
            metrics.init_time.to_string(),
        ];
        for pool in [
            &metrics.actives,
            &metrics.waitings,
            &metrics.receives,
            &metrics.completes,
            &metrics.promises,
        ] {
            fields.extend(stat_fields(&Summary::of(pool), true));
        }
        push_row(&mut out, &fields);
    }

    out
}

/// One row per fronctocol type
pub fn by_name_csv(summaries: &[FronctocolSummary]) -> String {
    let mut header: Vec<String> = ["name", "batch_depth", "batch_total", "batch_type", "count"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend(stat_headers("running", false));
    header.extend(pool_headers("active"));
    header.extend(pool_headers("waiting"));
    header.extend(stat_headers("init", false));
    header.extend(pool_headers("receive"));
    header.extend(pool_headers("complete"));
    header.extend(pool_headers("promise"));

    let mut out = String::new();
    push_row(&mut out, &header);

    for summary in summaries {
        let mut fields = vec![
            quote(&summary.name),
            summary.batch.depth.to_string(),
            summary.batch.total.to_string(),
            quote(&summary.batch.leaf),
            summary.count.to_string(),
        ];
        fields.extend(stat_fields(&summary.running, false));
        fields.extend(pool_fields(&summary.active));
        fields.extend(pool_fields(&summary.waiting));
        fields.extend(stat_fields(&summary.init, false));
        fields.extend(pool_fields(&summary.receive));
        fields.extend(pool_fields(&summary.complete));
        fields.extend(pool_fields(&summary.promise));
        push_row(&mut out, &fields);
    }

    out
}

/// One replayed log event with its delta to the previous note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    pub party: String,
    pub identity: String,
    pub name: String,
    pub time: i64,
    pub diff: i64,
    pub activity: String,
    pub action: String,
}

/// Activity that just finished, for notes ending with "end"
fn classify_activity(message: &str) -> String {
    let Some(msg) = message.strip_suffix("end") else {
        return "waiting".to_string();
    };
    let msg = msg.strip_prefix("handle ").unwrap_or(msg);
    ["init", "receive", "complete", "promise"]
        .into_iter()
        .find(|kind| msg.starts_with(kind))
        .unwrap_or(msg)
        .to_string()
}

/// Replay the order trace against the parsed model
pub fn trace_rows(log: &ParsedLog) -> Vec<TraceRow> {
    log.order
        .iter()
        .filter_map(|event| {
            let measure = log.measure(event.party(), event.identity())?;
            let (time, diff, activity, action) = match event {
                OrderEvent::Measure { .. } => {
                    (0, 0, "waiting".to_string(), "start timer".to_string())
                }
                OrderEvent::Note { place, .. } => {
                    let note = measure.notes.get(*place)?;
                    let prev = place
                        .checked_sub(1)
                        .and_then(|p| measure.notes.get(p))
                        .map_or(0, |n| n.micros());
                    (
                        note.micros(),
                        note.micros() - prev,
                        classify_activity(&note.message),
                        note.message.clone(),
                    )
                }
            };
            Some(TraceRow {
                party: event.party().to_string(),
                identity: event.identity().to_string(),
                name: measure.name.clone(),
                time,
                diff,
                activity,
                action,
            })
        })
        .collect()
}

/// Raw trace table in original log order
pub fn trace_csv(rows: &[TraceRow]) -> String {
    let mut out = String::from("party, ID, name, time, diff, activity, action\n");
    for row in rows {
        push_row(
            &mut out,
            &[
                quote(&row.party),
                row.identity.clone(),
                quote(&row.name),
                row.time.to_string(),
                row.diff.to_string(),
                row.activity.clone(),
                quote(&row.action),
            ],
        );
    }
    out
}
