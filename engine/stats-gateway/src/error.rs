//! Error types for the stats gateway

use thiserror::Error;

/// Errors that can occur while serving a percentile request
#[derive(Error, Debug)]
pub enum GatewayError {
    /// League or position missing, unknown or malformed
    #[error("{message}")]
    Input {
        message: String,
        league: Option<String>,
        position: Option<String>,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other failure reading the data store
    #[error("Store error: {0}")]
    Store(String),
}

impl GatewayError {
    /// Create a new input error carrying the request's league and position
    pub fn input(
        message: impl Into<String>,
        league: Option<String>,
        position: Option<String>,
    ) -> Self {
        Self::Input { message: message.into(), league, position }
    }

    /// Create a new store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Input { .. })
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
