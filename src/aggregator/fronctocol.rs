//! Per-type aggregation of derived timer metrics.
//!
//! Instances are bucketed by their exact name, batch prefixes included, so
//! `Batch size: 4 of Compare` and `Compare` are different fronctocol types.

use super::derive::{DerivedMeasure, MeasureMetrics};
use super::statistics::{counts_as_values, has_differences, median, Summary};
use crate::parser::batch_name::BatchName;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pooled durations of every instance of one fronctocol type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FronctocolStats {
    pub count: usize,
    pub totals: Vec<i64>,
    pub inits: Vec<i64>,
    pub actives: Vec<i64>,
    pub waitings: Vec<i64>,
    pub receives: Vec<i64>,
    pub completes: Vec<i64>,
    pub promises: Vec<i64>,
    /// Per-instance pool lengths, one entry per added instance
    pub meta_actives: Vec<usize>,
    pub meta_waitings: Vec<usize>,
    pub meta_receives: Vec<usize>,
    pub meta_completes: Vec<usize>,
    pub meta_promises: Vec<usize>,
}

impl FronctocolStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one instance into the pools
    pub fn add(&mut self, metrics: &MeasureMetrics) {
        self.totals.push(metrics.running_time);
        self.inits.push(metrics.init_time);

        extend_pool(&mut self.actives, &mut self.meta_actives, &metrics.actives);
        extend_pool(&mut self.waitings, &mut self.meta_waitings, &metrics.waitings);
        extend_pool(&mut self.receives, &mut self.meta_receives, &metrics.receives);
        extend_pool(&mut self.completes, &mut self.meta_completes, &metrics.completes);
        extend_pool(&mut self.promises, &mut self.meta_promises, &metrics.promises);

        self.count += 1;
    }

    /// Compute every exposed statistic for this bucket
    pub fn summarize(&self, name: &str) -> FronctocolSummary {
        FronctocolSummary {
            name: name.to_string(),
            batch: BatchName::decode(name),
            count: self.count,
            running: Summary::of(&self.totals),
            init: Summary::of(&self.inits),
            active: PoolSummary::of(&self.actives, &self.meta_actives),
            waiting: PoolSummary::of(&self.waitings, &self.meta_waitings),
            receive: PoolSummary::of(&self.receives, &self.meta_receives),
            complete: PoolSummary::of(&self.completes, &self.meta_completes),
            promise: PoolSummary::of(&self.promises, &self.meta_promises),
        }
    }
}

fn extend_pool(pool: &mut Vec<i64>, meta: &mut Vec<usize>, values: &[i64]) {
    pool.extend_from_slice(values);
    meta.push(values.len());
}

/// Statistics of a pool plus how its per-instance size varies
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolSummary {
    #[serde(flatten)]
    pub stats: Summary,
    /// Median number of entries contributed per instance
    pub count_per_median: f64,
    /// Instances contributed different numbers of entries
    pub count_per_has_differences: bool,
}

impl PoolSummary {
    pub fn of(values: &[i64], meta: &[usize]) -> Self {
        Self {
            stats: Summary::of(values),
            count_per_median: median(&counts_as_values(meta)),
            count_per_has_differences: has_differences(meta),
        }
    }
}

/// Everything reported about one fronctocol type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FronctocolSummary {
    pub name: String,
    pub batch: BatchName,
    pub count: usize,
    pub running: Summary,
    pub init: Summary,
    pub active: PoolSummary,
    pub waiting: PoolSummary,
    pub receive: PoolSummary,
    pub complete: PoolSummary,
    pub promise: PoolSummary,
}

/// Bucket derived measures by name
///
/// **Public** - main entry point for aggregation
pub fn aggregate(measures: &[DerivedMeasure<'_>]) -> BTreeMap<String, FronctocolStats> {
    let mut fronctocols: BTreeMap<String, FronctocolStats> = BTreeMap::new();

    for derived in measures {
        fronctocols
            .entry(derived.measure.name.clone())
            .or_default()
            .add(&derived.metrics);
    }

    debug!(
        "Aggregated {} measures into {} fronctocol types",
        measures.len(),
        fronctocols.len()
    );
    fronctocols
}

/// Summaries of every bucket, in name order
pub fn summarize_all(fronctocols: &BTreeMap<String, FronctocolStats>) -> Vec<FronctocolSummary> {
    fronctocols
        .iter()
        .map(|(name, stats)| stats.summarize(name))
        .collect()
}
