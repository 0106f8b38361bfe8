//! Percentile CLI
//!
//! Scores a cohort from a JSON player export without a database:
//! - score: rank one league/position cohort and print a table or JSON
//! - leagues: list supported leagues
//! - metrics: list scored metrics and their direction

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use percentile_engine::{League, MetricDirection, PercentileScorer, ScorerConfig, METRIC_DESCRIPTORS};
use stats_gateway::{InMemoryPlayerStatsStore, PercentileQuery, PercentileService, PercentilesResponse, StoredPlayer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "percentile-cli")]
#[command(about = "Score league/position cohorts from a player stats export")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one cohort from a JSON export
    Score {
        /// JSON array of players (league_id, id, name, club, position, season_stats)
        #[arg(short, long)]
        input: PathBuf,

        /// League name, slug or tournament id
        #[arg(short, long)]
        league: Option<String>,

        /// Position (e.g., Forward)
        #[arg(short, long)]
        position: Option<String>,

        /// Player whose league/position is used when either is omitted
        #[arg(long)]
        player_id: Option<String>,

        /// Metric the cohort is ordered by
        #[arg(long, default_value = "rating")]
        primary_metric: String,

        /// Show only the first N players
        #[arg(long)]
        top: Option<usize>,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported leagues
    Leagues,

    /// List scored metrics
    Metrics,
}

fn load_players(path: &Path) -> Result<Vec<StoredPlayer>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let players: Vec<StoredPlayer> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse players from {}", path.display()))?;
    Ok(players)
}

async fn score(
    input: &Path,
    query: PercentileQuery,
    primary_metric: String,
) -> Result<PercentilesResponse> {
    let players = load_players(input)?;
    info!("Loaded {} players from {}", players.len(), input.display());

    let scorer = PercentileScorer::from_config(&ScorerConfig { primary_metric })?;
    let service = PercentileService::new(Arc::new(InMemoryPlayerStatsStore::new(players)), scorer);

    let response = service.percentiles(&query).await?;
    Ok(response)
}

fn render_table(response: &PercentilesResponse, primary_metric: &str, top: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} - {} ({} players)\n",
        "Cohort:".bold(),
        response.league,
        response.position,
        response.total_players
    ));

    if let Some(message) = &response.message {
        out.push_str(&format!("{}\n", message.yellow()));
        return out;
    }

    out.push_str(&format!(
        "{:<5} {:<28} {:<22} {:>8} {:>6}\n",
        "#", "Player", "Club", primary_metric, "pct"
    ));
    out.push_str(&format!("{}\n", "-".repeat(73)));

    let limit = top.unwrap_or(response.players.len());
    for player in response.players.iter().take(limit) {
        let line = format!(
            "{:<5} {:<28} {:<22} {:>8.2} {:>6}",
            player.ranks.get(primary_metric).copied().unwrap_or_default(),
            player.name,
            player.club.as_deref().unwrap_or("-"),
            player.stat(primary_metric),
            player.percentiles.get(primary_metric).copied().unwrap_or_default(),
        );
        if response.current_player_id == Some(player.id) {
            out.push_str(&format!("{}\n", line.green().bold()));
        } else {
            out.push_str(&format!("{line}\n"));
        }
    }

    out
}

fn show_leagues() {
    println!("{}", "Supported leagues".bold());
    for league in League::ALL {
        println!(
            "  {:<16} {:<16} tournament {:>3} ({})",
            league.name(),
            league.slug(),
            league.tournament_id(),
            league.tournament_name()
        );
    }
}

fn show_metrics() {
    println!("{}", "Scored metrics".bold());
    for descriptor in METRIC_DESCRIPTORS.iter() {
        let direction = match descriptor.direction {
            MetricDirection::HigherIsBetter => "higher is better".green(),
            MetricDirection::LowerIsBetter => "lower is better".red(),
        };
        println!("  {:<28} {}", descriptor.key, direction);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { input, league, position, player_id, primary_metric, top, json } => {
            let query = PercentileQuery { league, position, player_id };
            let response = score(&input, query, primary_metric.clone()).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", render_table(&response, &primary_metric, top));
            }
        }
        Commands::Leagues => show_leagues(),
        Commands::Metrics => show_metrics(),
    }

    Ok(())
}
