//! Percentile request orchestration: resolve, fetch, extract, score

use crate::error::{GatewayError, GatewayResult};
use crate::store::PlayerStatsStore;
use percentile_engine::{build_cohort, League, PercentileScorer, ScoredEntry, ScoringError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Query parameters of a percentile request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PercentileQuery {
    pub league: Option<String>,
    pub position: Option<String>,

    /// Player whose stored profile fills in a missing league or position
    #[serde(rename = "playerId")]
    pub player_id: Option<String>,
}

impl PercentileQuery {
    pub fn new(league: impl Into<String>, position: impl Into<String>) -> Self {
        Self { league: Some(league.into()), position: Some(position.into()), player_id: None }
    }
}

/// Successful percentile response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentilesResponse {
    pub players: Vec<ScoredEntry>,
    pub league: String,
    pub position: String,
    pub total_players: usize,
    pub current_player_id: Option<Uuid>,

    /// Present when no player matched the cohort
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// League and position a request resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCohort {
    pub league: League,
    pub position: String,
    pub player_id: Option<Uuid>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Serves percentile requests against a player stats store
#[derive(Clone)]
pub struct PercentileService {
    store: Arc<dyn PlayerStatsStore>,
    scorer: PercentileScorer,
}

impl PercentileService {
    pub fn new(store: Arc<dyn PlayerStatsStore>, scorer: PercentileScorer) -> Self {
        Self { store, scorer }
    }

    /// Work out league and position, consulting the player's stored profile
    /// only when one of them is missing from the query
    pub async fn resolve(&self, query: &PercentileQuery) -> GatewayResult<ResolvedCohort> {
        let mut league = non_empty(query.league.as_deref());
        let mut position = non_empty(query.position.as_deref());

        let player_id = match non_empty(query.player_id.as_deref()) {
            Some(raw) => Some(Uuid::parse_str(&raw).map_err(|_| {
                GatewayError::input(format!("Invalid playerId: {raw}"), league.clone(), position.clone())
            })?),
            None => None,
        };

        if let (Some(id), true) = (player_id, league.is_none() || position.is_none()) {
            match self.store.fetch_profile(id).await? {
                Some(profile) => {
                    if league.is_none() {
                        league = profile.league_id.map(|id| id.to_string());
                    }
                    if position.is_none() {
                        position = non_empty(profile.position.as_deref());
                    }
                }
                None => warn!("No stored profile for player {}", id),
            }
        }

        let to_input = |err: ScoringError, league: &Option<String>, position: &Option<String>| {
            GatewayError::input(err.to_string(), league.clone(), position.clone())
        };

        let league_name = league
            .clone()
            .ok_or_else(|| to_input(ScoringError::MissingLeague, &league, &position))?;
        let parsed = league_name.parse::<League>().map_err(|e| to_input(e, &league, &position))?;
        let position = position
            .clone()
            .ok_or_else(|| to_input(ScoringError::MissingPosition, &Some(parsed.name().to_string()), &position))?;

        Ok(ResolvedCohort { league: parsed, position, player_id })
    }

    /// Resolve the cohort, fetch it, and score it
    pub async fn percentiles(&self, query: &PercentileQuery) -> GatewayResult<PercentilesResponse> {
        let resolved = self.resolve(query).await?;
        let league = resolved.league;

        let rows = self.store.fetch_cohort(league, &resolved.position).await?;
        let cohort = build_cohort(&rows, league.tournament_name());
        let scored = self.scorer.score(cohort);

        let message = scored
            .message
            .as_ref()
            .map(|_| format!("No players found for position {} in {}", resolved.position, league.name()));

        info!(
            "Scored {} {} players in {} ({} rows fetched)",
            scored.total_players,
            resolved.position,
            league,
            rows.len()
        );

        Ok(PercentilesResponse {
            total_players: scored.total_players,
            players: scored.players,
            league: league.name().to_string(),
            position: resolved.position,
            current_player_id: resolved.player_id,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryPlayerStatsStore, StoredPlayer};
    use percentile_engine::PlayerRow;
    use serde_json::json;

    fn player(league_id: u32, name: &str, position: &str, tournament: &str, rating: f64) -> StoredPlayer {
        let season_stats = serde_json::from_value(json!({
            "src": {
                "tournament_name": tournament,
                "seasons": {
                    "52186": { "statistics": { "rating": rating - 1.0 } },
                    "61627": { "statistics": { "rating": rating, "goals": 4 } }
                }
            }
        }))
        .unwrap();

        StoredPlayer {
            league_id,
            row: PlayerRow {
                id: Uuid::new_v4(),
                name: name.to_string(),
                club: Some("Club".to_string()),
                position: position.to_string(),
                season_stats: Some(season_stats),
            },
        }
    }

    fn service(players: Vec<StoredPlayer>) -> PercentileService {
        PercentileService::new(Arc::new(InMemoryPlayerStatsStore::new(players)), PercentileScorer::default())
    }

    #[tokio::test]
    async fn test_scores_cohort_end_to_end() {
        let svc = service(vec![
            player(17, "Low", "Forward", "Premier League", 7.0),
            player(17, "HighA", "Forward", "Premier League", 8.5),
            player(17, "HighB", "Forward", "Premier League", 8.5),
            player(17, "Keeper", "Goalkeeper", "Premier League", 9.0),
        ]);

        let response = svc.percentiles(&PercentileQuery::new("premier-league", "Forward")).await.unwrap();

        assert_eq!(response.league, "Premier League");
        assert_eq!(response.position, "Forward");
        assert_eq!(response.total_players, 3);
        assert!(response.message.is_none());
        assert!(response.current_player_id.is_none());

        let names: Vec<&str> = response.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["HighA", "HighB", "Low"]);
        let ranks: Vec<usize> = response.players.iter().map(|p| p.ranks["rating"]).collect();
        assert_eq!(ranks, vec![1, 1, 3]);
        assert_eq!(response.players[0].stats["goals"], 4.0);
    }

    #[tokio::test]
    async fn test_players_without_current_league_stats_are_dropped() {
        let svc = service(vec![
            player(8, "Pedri", "Midfielder", "LaLiga", 7.6),
            player(8, "Transfer", "Midfielder", "Premier League", 7.1),
        ]);

        let response = svc.percentiles(&PercentileQuery::new("La Liga", "Midfielder")).await.unwrap();
        assert_eq!(response.total_players, 1);
        assert_eq!(response.players[0].name, "Pedri");
    }

    #[tokio::test]
    async fn test_empty_cohort_reports_message() {
        let svc = service(Vec::new());

        let response = svc.percentiles(&PercentileQuery::new("Serie A", "Defender")).await.unwrap();
        assert!(response.players.is_empty());
        assert_eq!(response.total_players, 0);
        assert_eq!(response.message.as_deref(), Some("No players found for position Defender in Serie A"));
    }

    #[tokio::test]
    async fn test_profile_fills_missing_league_and_position() {
        let me = player(35, "Musiala", "Midfielder", "Bundesliga", 7.8);
        let id = me.row.id;
        let svc = service(vec![me, player(35, "Wirtz", "Midfielder", "Bundesliga", 8.0)]);

        let query = PercentileQuery { player_id: Some(id.to_string()), ..Default::default() };
        let response = svc.percentiles(&query).await.unwrap();

        assert_eq!(response.league, "Bundesliga");
        assert_eq!(response.position, "Midfielder");
        assert_eq!(response.current_player_id, Some(id));
        assert_eq!(response.total_players, 2);
    }

    #[tokio::test]
    async fn test_explicit_query_wins_over_profile() {
        let me = player(35, "Musiala", "Midfielder", "Bundesliga", 7.8);
        let id = me.row.id;
        let svc = service(vec![me]);

        let query = PercentileQuery {
            league: Some("Ligue 1".to_string()),
            position: Some("Forward".to_string()),
            player_id: Some(id.to_string()),
        };
        let resolved = svc.resolve(&query).await.unwrap();
        assert_eq!(resolved.league, League::Ligue1);
        assert_eq!(resolved.position, "Forward");
    }

    #[tokio::test]
    async fn test_input_errors() {
        let svc = service(Vec::new());

        let missing = svc.percentiles(&PercentileQuery::default()).await.unwrap_err();
        assert!(missing.is_input_error());

        let unknown = svc.percentiles(&PercentileQuery::new("Eredivisie", "Forward")).await.unwrap_err();
        match unknown {
            GatewayError::Input { message, league, position } => {
                assert_eq!(message, "Unknown league: Eredivisie");
                assert_eq!(league.as_deref(), Some("Eredivisie"));
                assert_eq!(position.as_deref(), Some("Forward"));
            }
            other => panic!("Expected input error, got {other:?}"),
        }

        let no_position = PercentileQuery { league: Some("Serie A".to_string()), ..Default::default() };
        let err = svc.percentiles(&no_position).await.unwrap_err();
        assert!(matches!(err, GatewayError::Input { ref message, .. } if message == "Position is required"));

        let bad_id = PercentileQuery { player_id: Some("not-a-uuid".to_string()), ..Default::default() };
        assert!(svc.percentiles(&bad_id).await.unwrap_err().is_input_error());

        let unknown_player = PercentileQuery { player_id: Some(Uuid::new_v4().to_string()), ..Default::default() };
        assert!(svc.percentiles(&unknown_player).await.unwrap_err().is_input_error());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let svc = PercentileService::new(
            Arc::new(InMemoryPlayerStatsStore::failing("timeout")),
            PercentileScorer::default(),
        );

        let err = svc.percentiles(&PercentileQuery::new("Bundesliga", "Forward")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Store(_)));
    }
}
