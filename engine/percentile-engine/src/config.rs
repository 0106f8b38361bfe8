//! Scoring configuration

use crate::error::{Result, ScoringError};
use crate::metrics::{find_descriptor, PRIMARY_METRIC};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the primary metric
pub const PRIMARY_METRIC_ENV: &str = "PERCENTILE_PRIMARY_METRIC";

/// Configuration for cohort scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Metric the scored cohort is sorted by (descending)
    pub primary_metric: String,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self { primary_metric: PRIMARY_METRIC.to_string() }
    }
}

impl ScorerConfig {
    /// Override fields from environment variables
    pub fn apply_env(&mut self) {
        if let Ok(metric) = std::env::var(PRIMARY_METRIC_ENV) {
            self.primary_metric = metric;
        }
    }

    /// The primary metric must be one of the scored metrics
    pub fn validate(&self) -> Result<()> {
        if find_descriptor(&self.primary_metric).is_none() {
            return Err(ScoringError::config(format!(
                "primary metric '{}' is not a scored metric",
                self.primary_metric
            )));
        }
        Ok(())
    }
}
