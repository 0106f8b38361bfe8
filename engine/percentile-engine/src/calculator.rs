//! Percentile and rank calculations over one metric's values

/// One metric's cohort values, sorted ascending once and reused for every entry
#[derive(Debug, Clone)]
pub struct SortedMetric {
    ascending: Vec<f64>,
}

impl SortedMetric {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let mut ascending: Vec<f64> = values.into_iter().collect();
        ascending.sort_by(|a, b| a.total_cmp(b));
        Self { ascending }
    }

    /// Percentile of `value`, taken from the first element at or above it.
    ///
    /// Tied values all report the percentile of the lowest member of the tie
    /// group. Lower-is-better metrics are inverted after rounding.
    pub fn percentile(&self, value: f64, higher_is_better: bool) -> u32 {
        let len = self.ascending.len();
        let index = self.ascending.partition_point(|v| *v < value);

        if index >= len {
            return if higher_is_better { 100 } else { 0 };
        }

        let base = ((index as f64 / len as f64) * 100.0).round() as u32;
        if higher_is_better {
            base
        } else {
            100 - base
        }
    }

    /// 1-based rank of `value`: one plus the number of strictly better values.
    ///
    /// Equal values share the rank of their first occurrence in best-first
    /// order. A value outside the cohort is clamped into `1..=len`.
    pub fn rank(&self, value: f64, higher_is_better: bool) -> usize {
        let len = self.ascending.len();
        let better = if higher_is_better {
            len - self.ascending.partition_point(|v| *v <= value)
        } else {
            self.ascending.partition_point(|v| *v < value)
        };

        (better + 1).min(len.max(1))
    }
}

/// Percentile of `value` within `all_values` (unsorted).
pub fn percentile(value: f64, all_values: &[f64], higher_is_better: bool) -> u32 {
    SortedMetric::new(all_values.iter().copied()).percentile(value, higher_is_better)
}

/// Rank of `value` within `all_values` (unsorted).
pub fn rank(value: f64, all_values: &[f64], higher_is_better: bool) -> usize {
    SortedMetric::new(all_values.iter().copied()).rank(value, higher_is_better)
}
