//! Stats Gateway - REST API for cohort percentiles
//!
//! Serves per-metric percentiles and ranks for a league/position cohort,
//! reading player statistics from the hosted Postgres database.

pub mod config;
pub mod error;
pub mod logging;
pub mod rest_api;
pub mod service;
pub mod store;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use logging::initialize_logging_with_config;
pub use service::{PercentileQuery, PercentileService, PercentilesResponse};
pub use store::{InMemoryPlayerStatsStore, PgPlayerStatsStore, PlayerStatsStore, StoredPlayer};

/// Version of the Stats Gateway API
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
