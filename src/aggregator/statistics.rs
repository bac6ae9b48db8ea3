//! Descriptive statistics over integer durations.
//!
//! Every function returns 0 for an empty input. Order statistics work on a
//! sorted copy; the caller's slice is never reordered.

use serde::{Deserialize, Serialize};

/// Smallest value
pub fn minimum(values: &[i64]) -> i64 {
    values.iter().copied().min().unwrap_or(0)
}

/// Largest value
pub fn maximum(values: &[i64]) -> i64 {
    values.iter().copied().max().unwrap_or(0)
}

/// Exact sum, widened so pools of large durations cannot overflow
fn wide_sum(values: &[i64]) -> i128 {
    values.iter().map(|&x| i128::from(x)).sum()
}

/// Sum of all values, saturating at the `i64` range
pub fn total(values: &[i64]) -> i64 {
    let sum = wide_sum(values);
    i64::try_from(sum).unwrap_or(if sum < 0 { i64::MIN } else { i64::MAX })
}

/// Arithmetic mean
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    wide_sum(values) as f64 / values.len() as f64
}

/// Population variance
pub fn variance(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let u = mean(values);
    let sum_sq: f64 = values
        .iter()
        .map(|&x| {
            let d = x as f64 - u;
            d * d
        })
        .sum();
    sum_sq / values.len() as f64
}

/// Median as computed by the established timing reports.
///
/// With `idx = (n - 1) / 2` on the sorted values, the result averages
/// `sorted[idx]` and `sorted[idx + 1]` only when `idx` is even and greater
/// than 1; otherwise it is `sorted[idx]`. Kept for output compatibility.
pub fn median(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let idx = (sorted.len() - 1) / 2;
    if idx % 2 == 0 && idx > 1 {
        (sorted[idx] as f64 + sorted[idx + 1] as f64) / 2.0
    } else {
        sorted[idx] as f64
    }
}

/// True iff not every element equals the first
pub fn has_differences<T: PartialEq>(values: &[T]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().any(|x| x != first),
        None => false,
    }
}

/// Widen per-instance entry counts for use with the functions above
pub fn counts_as_values(counts: &[usize]) -> Vec<i64> {
    counts
        .iter()
        .map(|&c| i64::try_from(c).unwrap_or(i64::MAX))
        .collect()
}

/// All descriptive statistics of one duration pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub total: i64,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub variance: f64,
    pub median: f64,
}

impl Summary {
    pub fn of(values: &[i64]) -> Self {
        Self {
            count: values.len(),
            total: total(values),
            min: minimum(values),
            max: maximum(values),
            mean: mean(values),
            variance: variance(values),
            median: median(values),
        }
    }
}
