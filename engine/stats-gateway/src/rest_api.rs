//! REST API endpoints for the stats gateway
//!
//! Exposes cohort percentiles, the supported league list and a health check.

use crate::error::GatewayError;
use crate::service::{PercentileQuery, PercentileService};
use percentile_engine::League;
use serde::Serialize;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::Filter;

/// Wraps a gateway error so it can travel as a warp rejection
#[derive(Debug)]
struct ApiRejection(GatewayError);

impl warp::reject::Reject for ApiRejection {}

/// 400 response body
#[derive(Debug, Serialize)]
pub struct InputErrorResponse {
    pub error: String,
    pub league: Option<String>,
    pub position: Option<String>,
}

/// 500 response body
#[derive(Debug, Serialize)]
pub struct ServerErrorResponse {
    pub error: String,
    pub details: String,
}

/// Supported league entry
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResponse {
    pub name: &'static str,
    pub slug: &'static str,
    pub tournament_name: &'static str,
    pub tournament_id: u32,
}

impl From<League> for LeagueResponse {
    fn from(league: League) -> Self {
        Self {
            name: league.name(),
            slug: league.slug(),
            tournament_name: league.tournament_name(),
            tournament_id: league.tournament_id(),
        }
    }
}

/// Get cohort percentiles for a league and position
pub async fn get_percentiles(
    query: PercentileQuery,
    service: PercentileService,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.percentiles(&query).await {
        Ok(response) => Ok(warp::reply::json(&response)),
        Err(e) => {
            if e.is_input_error() {
                tracing::debug!("Rejected percentile request {:?}: {}", query, e);
            } else {
                tracing::error!("Percentile request {:?} failed: {}", query, e);
            }
            Err(warp::reject::custom(ApiRejection(e)))
        }
    }
}

/// List supported leagues
pub async fn get_leagues() -> Result<impl warp::Reply, warp::Rejection> {
    let leagues: Vec<LeagueResponse> = League::ALL.into_iter().map(LeagueResponse::from).collect();
    Ok(warp::reply::json(&leagues))
}

fn error_reply<T: Serialize>(body: &T, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(body), status)
}

/// Render rejections as JSON error bodies
pub async fn handle_rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(ApiRejection(error)) = err.find::<ApiRejection>() {
        let reply = match error {
            GatewayError::Input { message, league, position } => error_reply(
                &InputErrorResponse {
                    error: message.clone(),
                    league: league.clone(),
                    position: position.clone(),
                },
                StatusCode::BAD_REQUEST,
            ),
            other => error_reply(
                &ServerErrorResponse {
                    error: "Failed to load player statistics".to_string(),
                    details: other.to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        };
        return Ok(reply);
    }

    if err.is_not_found() {
        return Ok(error_reply(
            &serde_json::json!({ "error": "Not found" }),
            StatusCode::NOT_FOUND,
        ));
    }

    if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        return Ok(error_reply(
            &InputErrorResponse { error: e.to_string(), league: None, position: None },
            StatusCode::BAD_REQUEST,
        ));
    }

    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(error_reply(
            &serde_json::json!({ "error": "Method not allowed" }),
            StatusCode::METHOD_NOT_ALLOWED,
        ));
    }

    tracing::warn!("Unhandled rejection: {:?}", err);
    Ok(error_reply(
        &ServerErrorResponse { error: "Internal server error".to_string(), details: format!("{err:?}") },
        StatusCode::INTERNAL_SERVER_ERROR,
    ))
}

/// Build all routes
pub fn create_routes(
    service: PercentileService,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let service_filter = warp::any().map(move || service.clone());

    // Cohort percentiles endpoint
    let percentiles = warp::path("api")
        .and(warp::path("player-stats"))
        .and(warp::path("percentiles"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<PercentileQuery>())
        .and(service_filter)
        .and_then(get_percentiles);

    // Supported leagues endpoint
    let leagues = warp::path("api")
        .and(warp::path("leagues"))
        .and(warp::path::end())
        .and(warp::get())
        .and_then(get_leagues);

    // Health check endpoint
    let health = warp::path("health").and(warp::path::end()).and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    });

    percentiles
        .or(leagues)
        .or(health)
        .with(
            warp::cors()
                .allow_any_origin()
                .allow_headers(vec!["content-type"])
                .allow_methods(vec!["GET", "OPTIONS"]),
        )
        .recover(handle_rejection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryPlayerStatsStore, StoredPlayer};
    use percentile_engine::{PercentileScorer, PlayerRow};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use uuid::Uuid;

    fn forward(name: &str, rating: f64) -> StoredPlayer {
        StoredPlayer {
            league_id: 17,
            row: PlayerRow {
                id: Uuid::new_v4(),
                name: name.to_string(),
                club: None,
                position: "Forward".to_string(),
                season_stats: Some(
                    serde_json::from_value(json!({
                        "p": {
                            "tournament_name": "Premier League",
                            "seasons": { "61627": { "statistics": { "rating": rating } } }
                        }
                    }))
                    .unwrap(),
                ),
            },
        }
    }

    fn service_with(store: InMemoryPlayerStatsStore) -> PercentileService {
        PercentileService::new(Arc::new(store), PercentileScorer::default())
    }

    fn body(response: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[tokio::test]
    async fn test_percentiles_ok() {
        let routes = create_routes(service_with(InMemoryPlayerStatsStore::new(vec![
            forward("Low", 7.0),
            forward("HighA", 8.5),
            forward("HighB", 8.5),
        ])));

        let response = warp::test::request()
            .method("GET")
            .path("/api/player-stats/percentiles?league=premier-league&position=Forward")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body(&response);
        assert_eq!(json["totalPlayers"], 3);
        assert_eq!(json["league"], "Premier League");
        assert_eq!(json["position"], "Forward");
        assert_eq!(json["currentPlayerId"], Value::Null);
        assert_eq!(json["players"][0]["name"], "HighA");
        assert_eq!(json["players"][1]["name"], "HighB");
        assert_eq!(json["players"][2]["ranks"]["rating"], 3);
        assert!(json.get("message").is_none());
    }

    #[tokio::test]
    async fn test_percentiles_empty_cohort() {
        let routes = create_routes(service_with(InMemoryPlayerStatsStore::default()));

        let response = warp::test::request()
            .path("/api/player-stats/percentiles?league=Ligue%201&position=Goalkeeper")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body(&response);
        assert_eq!(json["players"], json!([]));
        assert_eq!(json["totalPlayers"], 0);
        assert!(!json["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_percentiles_unknown_league_is_bad_request() {
        let routes = create_routes(service_with(InMemoryPlayerStatsStore::default()));

        let response = warp::test::request()
            .path("/api/player-stats/percentiles?league=MLS&position=Forward")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body(&response);
        assert_eq!(json["error"], "Unknown league: MLS");
        assert_eq!(json["league"], "MLS");
        assert_eq!(json["position"], "Forward");
    }

    #[tokio::test]
    async fn test_percentiles_missing_params_is_bad_request() {
        let routes = create_routes(service_with(InMemoryPlayerStatsStore::default()));

        let response = warp::test::request().path("/api/player-stats/percentiles").reply(&routes).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body(&response);
        assert_eq!(json["error"], "League is required");
        assert_eq!(json["league"], Value::Null);
    }

    #[tokio::test]
    async fn test_percentiles_store_failure_is_server_error() {
        let routes = create_routes(service_with(InMemoryPlayerStatsStore::failing("pool timed out")));

        let response = warp::test::request()
            .path("/api/player-stats/percentiles?league=bundesliga&position=Defender")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body(&response);
        assert_eq!(json["error"], "Failed to load player statistics");
        assert_eq!(json["details"], "Store error: pool timed out");
    }

    #[tokio::test]
    async fn test_percentiles_player_id_lookup() {
        let me = forward("Saka", 7.9);
        let id = me.row.id;
        let routes = create_routes(service_with(InMemoryPlayerStatsStore::new(vec![me, forward("Palmer", 8.1)])));

        let response = warp::test::request()
            .path(&format!("/api/player-stats/percentiles?playerId={id}"))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body(&response);
        assert_eq!(json["currentPlayerId"], id.to_string());
        assert_eq!(json["totalPlayers"], 2);
        assert_eq!(json["players"][0]["name"], "Palmer");
    }

    #[tokio::test]
    async fn test_leagues_and_health() {
        let routes = create_routes(service_with(InMemoryPlayerStatsStore::default()));

        let leagues = warp::test::request().path("/api/leagues").reply(&routes).await;
        assert_eq!(leagues.status(), StatusCode::OK);
        let json = body(&leagues);
        assert_eq!(json.as_array().unwrap().len(), League::ALL.len());
        assert_eq!(json[0]["slug"], "premier-league");
        assert_eq!(json[0]["tournamentId"], 17);

        let health = warp::test::request().path("/health").reply(&routes).await;
        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(body(&health)["status"], "healthy");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let routes = create_routes(service_with(InMemoryPlayerStatsStore::default()));

        let response = warp::test::request().path("/api/unknown").reply(&routes).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
