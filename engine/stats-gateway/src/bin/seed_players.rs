//! Seed the `players` table from a JSON export (local development only)
//!
//! Usage: seed-players <players.json>

use anyhow::{Context, Result};
use sqlx::types::Json;
use sqlx::PgPool;
use stats_gateway::{GatewayConfig, StoredPlayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let path = std::env::args().nth(1).context("Usage: seed-players <players.json>")?;
    let config = GatewayConfig::load()?;

    let content = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
    let players: Vec<StoredPlayer> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {path}"))?;
    info!("Loaded {} players from {}", players.len(), path);

    let pool = PgPool::connect(&config.database.url).await.context("Failed to connect to database")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS players (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            club_name TEXT,
            position TEXT NOT NULL,
            league_id INTEGER,
            season_stats JSONB
        )
        "#,
    )
    .execute(&pool)
    .await
    .context("Failed to create players table")?;

    let mut seeded = 0;
    for player in &players {
        let league_id = match i32::try_from(player.league_id) {
            Ok(id) => id,
            Err(_) => {
                warn!("Skipping {}: league id {} out of range", player.row.name, player.league_id);
                continue;
            }
        };

        sqlx::query(
            r#"
            INSERT INTO players (id, name, club_name, position, league_id, season_stats)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                club_name = EXCLUDED.club_name,
                position = EXCLUDED.position,
                league_id = EXCLUDED.league_id,
                season_stats = EXCLUDED.season_stats
            "#,
        )
        .bind(player.row.id)
        .bind(&player.row.name)
        .bind(&player.row.club)
        .bind(&player.row.position)
        .bind(league_id)
        .bind(player.row.season_stats.as_ref().map(Json))
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to seed player {}", player.row.id))?;

        seeded += 1;
    }

    info!("Seeded {} players", seeded);
    Ok(())
}
