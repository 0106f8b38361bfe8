//! Error types for the percentile engine

use thiserror::Error;

/// Result type alias for scoring operations
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Errors that can occur while resolving or scoring a cohort
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// League name, slug or id with no catalogue entry
    #[error("Unknown league: {0}")]
    UnknownLeague(String),

    /// League could not be determined from the request or the player profile
    #[error("League is required")]
    MissingLeague,

    /// Position could not be determined from the request or the player profile
    #[error("Position is required")]
    MissingPosition,

    /// Metric key with no descriptor
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScoringError {
    /// Create a new unknown league error
    pub fn unknown_league(league: impl Into<String>) -> Self {
        Self::UnknownLeague(league.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
