//! Percentile Engine
//!
//! Scores a cohort of players (same league, same position) against each other.
//! Each player's most recent season is pulled out of the nested season record,
//! flattened into a fixed stat set, and then ranked per metric with
//! direction-aware percentiles.

pub mod calculator;
pub mod config;
pub mod error;
pub mod extractor;
pub mod league;
pub mod metrics;
pub mod models;
pub mod scorer;

pub use calculator::{percentile, rank, SortedMetric};
pub use config::{ScorerConfig, PRIMARY_METRIC_ENV};
pub use error::{Result, ScoringError};
pub use extractor::{build_cohort, build_cohort_entry, extract_current_season_stats};
pub use league::League;
pub use metrics::{MetricDescriptor, MetricDirection, METRIC_DESCRIPTORS, PRIMARY_METRIC, STAT_KEYS};
pub use models::*;
pub use scorer::{PercentileScorer, ScoredCohort};
