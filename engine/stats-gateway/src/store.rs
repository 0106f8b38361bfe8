//! Player statistics data store
//!
//! The hosted Postgres database owns the `players` table; this module only
//! reads from it. An in-memory store backs tests and offline scoring.

use crate::config::DatabaseConfig;
use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use percentile_engine::{parse_season_record, League, PlayerProfile, PlayerRow};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

/// Read access to player statistics
#[async_trait]
pub trait PlayerStatsStore: Send + Sync {
    /// Players of one league and position, in a stable fetch order
    async fn fetch_cohort(&self, league: League, position: &str) -> GatewayResult<Vec<PlayerRow>>;

    /// Stored league/position of a player, if the player exists
    async fn fetch_profile(&self, player_id: Uuid) -> GatewayResult<Option<PlayerProfile>>;
}

#[derive(Debug, sqlx::FromRow)]
struct PlayerRecord {
    id: Uuid,
    name: String,
    club_name: Option<String>,
    position: String,
    season_stats: Option<Json<serde_json::Value>>,
}

impl From<PlayerRecord> for PlayerRow {
    fn from(record: PlayerRecord) -> Self {
        PlayerRow {
            id: record.id,
            name: record.name,
            club: record.club_name,
            position: record.position,
            season_stats: record.season_stats.and_then(|json| parse_season_record(json.0)),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRecord {
    league_id: Option<i32>,
    position: Option<String>,
}

/// Postgres-backed store
pub struct PgPlayerStatsStore {
    pool: PgPool,
}

impl PgPlayerStatsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool using the database configuration
    pub async fn connect(config: &DatabaseConfig) -> GatewayResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await?;

        info!("Connected to database (max {} connections)", config.max_connections);
        Ok(Self { pool })
    }
}

#[async_trait]
impl PlayerStatsStore for PgPlayerStatsStore {
    async fn fetch_cohort(&self, league: League, position: &str) -> GatewayResult<Vec<PlayerRow>> {
        let records = sqlx::query_as::<_, PlayerRecord>(
            r#"
            SELECT id, name, club_name, position, season_stats
            FROM players
            WHERE league_id = $1 AND position = $2
            ORDER BY name, id
            "#,
        )
        .bind(league.tournament_id() as i32)
        .bind(position)
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} {} rows for {}", records.len(), position, league);
        Ok(records.into_iter().map(PlayerRow::from).collect())
    }

    async fn fetch_profile(&self, player_id: Uuid) -> GatewayResult<Option<PlayerProfile>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            "SELECT league_id, position FROM players WHERE id = $1",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(|r| PlayerProfile {
            league_id: r.league_id.and_then(|id| u32::try_from(id).ok()),
            position: r.position,
        }))
    }
}

/// A player together with the league it is filed under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPlayer {
    pub league_id: u32,

    #[serde(flatten)]
    pub row: PlayerRow,
}

/// In-memory store; rows are returned in insertion order
#[derive(Debug, Default)]
pub struct InMemoryPlayerStatsStore {
    players: Vec<StoredPlayer>,
    failure: Option<String>,
}

impl InMemoryPlayerStatsStore {
    pub fn new(players: Vec<StoredPlayer>) -> Self {
        Self { players, failure: None }
    }

    /// A store whose every read fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self { players: Vec::new(), failure: Some(message.into()) }
    }

    fn check(&self) -> GatewayResult<()> {
        match &self.failure {
            Some(message) => Err(GatewayError::store(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PlayerStatsStore for InMemoryPlayerStatsStore {
    async fn fetch_cohort(&self, league: League, position: &str) -> GatewayResult<Vec<PlayerRow>> {
        self.check()?;
        Ok(self
            .players
            .iter()
            .filter(|p| p.league_id == league.tournament_id() && p.row.position == position)
            .map(|p| p.row.clone())
            .collect())
    }

    async fn fetch_profile(&self, player_id: Uuid) -> GatewayResult<Option<PlayerProfile>> {
        self.check()?;
        Ok(self.players.iter().find(|p| p.row.id == player_id).map(|p| PlayerProfile {
            league_id: Some(p.league_id),
            position: Some(p.row.position.clone()),
        }))
    }
}
