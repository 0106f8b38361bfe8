//! Stat keys and metric descriptors

use serde::{Deserialize, Serialize};

/// Whether a larger raw value is a better standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricDirection {
    HigherIsBetter,
    LowerIsBetter,
}

impl MetricDirection {
    pub fn higher_is_better(self) -> bool {
        matches!(self, MetricDirection::HigherIsBetter)
    }
}

/// A scored metric and how to read it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub key: &'static str,
    pub direction: MetricDirection,
}

impl MetricDescriptor {
    pub const fn higher(key: &'static str) -> Self {
        Self { key, direction: MetricDirection::HigherIsBetter }
    }

    pub const fn lower(key: &'static str) -> Self {
        Self { key, direction: MetricDirection::LowerIsBetter }
    }

    pub fn higher_is_better(&self) -> bool {
        self.direction.higher_is_better()
    }
}

/// Metric the scored cohort is ordered by
pub const PRIMARY_METRIC: &str = "rating";

/// Stats copied from the current season into every cohort entry
pub const STAT_KEYS: [&str; 21] = [
    "rating",
    "appearances",
    "minutesPlayed",
    "goals",
    "assists",
    "expectedGoals",
    "expectedAssists",
    "totalShots",
    "shotsOnTarget",
    "bigChancesCreated",
    "keyPasses",
    "accuratePassesPercentage",
    "successfulDribbles",
    "tackles",
    "interceptions",
    "clearances",
    "aerialDuelsWon",
    "totalDuelsWonPercentage",
    "possessionLost",
    "fouls",
    "yellowCards",
];

/// Metrics every cohort entry is scored on
pub const METRIC_DESCRIPTORS: [MetricDescriptor; 18] = [
    MetricDescriptor::higher("rating"),
    MetricDescriptor::higher("goals"),
    MetricDescriptor::higher("assists"),
    MetricDescriptor::higher("expectedGoals"),
    MetricDescriptor::higher("expectedAssists"),
    MetricDescriptor::higher("totalShots"),
    MetricDescriptor::higher("shotsOnTarget"),
    MetricDescriptor::higher("bigChancesCreated"),
    MetricDescriptor::higher("keyPasses"),
    MetricDescriptor::higher("accuratePassesPercentage"),
    MetricDescriptor::higher("successfulDribbles"),
    MetricDescriptor::higher("tackles"),
    MetricDescriptor::higher("interceptions"),
    MetricDescriptor::higher("clearances"),
    MetricDescriptor::higher("aerialDuelsWon"),
    MetricDescriptor::higher("totalDuelsWonPercentage"),
    MetricDescriptor::lower("possessionLost"),
    MetricDescriptor::lower("yellowCards"),
];

pub fn find_descriptor(key: &str) -> Option<&'static MetricDescriptor> {
    METRIC_DESCRIPTORS.iter().find(|descriptor| descriptor.key == key)
}
