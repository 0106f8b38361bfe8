//! Batch percentile/rank scoring of a cohort

use crate::calculator::SortedMetric;
use crate::config::ScorerConfig;
use crate::error::{Result, ScoringError};
use crate::metrics::{MetricDescriptor, METRIC_DESCRIPTORS, PRIMARY_METRIC};
use crate::models::{CohortEntry, ScoredEntry};
use serde::Serialize;
use tracing::debug;

/// Message reported when there is nothing to score
pub const EMPTY_COHORT_MESSAGE: &str = "No players found for this cohort";

/// Result of scoring one cohort
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCohort {
    pub players: Vec<ScoredEntry>,
    pub total_players: usize,

    /// Set when the cohort was empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScoredCohort {
    pub fn empty(message: impl Into<String>) -> Self {
        Self { players: Vec::new(), total_players: 0, message: Some(message.into()) }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Scores cohorts against a fixed descriptor list
#[derive(Debug, Clone)]
pub struct PercentileScorer {
    descriptors: Vec<MetricDescriptor>,
    primary_metric: String,
}

impl Default for PercentileScorer {
    fn default() -> Self {
        Self { descriptors: METRIC_DESCRIPTORS.to_vec(), primary_metric: PRIMARY_METRIC.to_string() }
    }
}

impl PercentileScorer {
    /// Create a scorer; the primary metric must be one of `descriptors`
    pub fn new(descriptors: Vec<MetricDescriptor>, primary_metric: impl Into<String>) -> Result<Self> {
        let primary_metric = primary_metric.into();
        if !descriptors.iter().any(|d| d.key == primary_metric) {
            return Err(ScoringError::UnknownMetric(primary_metric));
        }
        Ok(Self { descriptors, primary_metric })
    }

    pub fn from_config(config: &ScorerConfig) -> Result<Self> {
        Self::new(METRIC_DESCRIPTORS.to_vec(), config.primary_metric.clone())
    }

    pub fn descriptors(&self) -> &[MetricDescriptor] {
        &self.descriptors
    }

    pub fn primary_metric(&self) -> &str {
        &self.primary_metric
    }

    /// Score every entry against the whole cohort, then order by the primary
    /// metric (descending, stable).
    pub fn score(&self, cohort: Vec<CohortEntry>) -> ScoredCohort {
        if cohort.is_empty() {
            return ScoredCohort::empty(EMPTY_COHORT_MESSAGE);
        }

        let total_players = cohort.len();

        // Sort each metric once for the whole cohort
        let sorted: Vec<SortedMetric> = self
            .descriptors
            .iter()
            .map(|descriptor| SortedMetric::new(cohort.iter().map(|entry| entry.stat(descriptor.key))))
            .collect();

        let mut players: Vec<ScoredEntry> = cohort
            .into_iter()
            .map(|entry| {
                let mut scored = ScoredEntry::from_cohort_entry(entry, total_players);
                for (descriptor, metric) in self.descriptors.iter().zip(&sorted) {
                    let value = scored.stat(descriptor.key);
                    let higher = descriptor.higher_is_better();
                    scored.percentiles.insert(descriptor.key.to_string(), metric.percentile(value, higher));
                    scored.ranks.insert(descriptor.key.to_string(), metric.rank(value, higher));
                }
                scored
            })
            .collect();

        let primary = self.primary_metric.as_str();
        players.sort_by(|a, b| b.stat(primary).total_cmp(&a.stat(primary)));

        debug!(
            "Scored {} players on {} metrics (primary: {})",
            total_players,
            self.descriptors.len(),
            primary
        );

        ScoredCohort { players, total_players, message: None }
    }
}
