use serde::Deserialize;
use std::sync::Arc;
use warp::Filter;

use crate::session_registry::SessionRegistry;
use hangman_persistence::ScoreLedger;
use hangman_types::PlayerId;

#[derive(Deserialize)]
struct LeaderboardQuery {
    limit: Option<u64>,
}

pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod replies;
pub mod session_registry;
pub mod transport;

const MAX_LEADERBOARD_LIMIT: u64 = 100;

pub fn create_routes(
    registry: Arc<SessionRegistry>,
    ledger: Option<Arc<dyn ScoreLedger>>,
    leaderboard_size: u64,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let registry_filter = warp::any().map({
        let registry = registry.clone();
        move || registry.clone()
    });

    let ledger_filter = warp::any().map({
        let ledger = ledger.clone();
        move || ledger.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    let sessions = warp::path("sessions")
        .and(warp::path::end())
        .and(warp::get())
        .and(registry_filter)
        .and_then(handle_sessions_request);

    let leaderboard = warp::path("leaderboard")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<LeaderboardQuery>())
        .and(ledger_filter.clone())
        .and_then(
            move |query: LeaderboardQuery, ledger: Option<Arc<dyn ScoreLedger>>| {
                handle_leaderboard_request(query, ledger, leaderboard_size)
            },
        );

    let player_stats = warp::path!("player" / PlayerId / "stats")
        .and(warp::get())
        .and(ledger_filter)
        .and_then(handle_player_stats_request);

    health
        .or(sessions)
        .or(leaderboard)
        .or(player_stats)
        .with(warp::log("hangman_bot"))
}

fn disabled_reply() -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": "Score tracking is disabled"
        })),
        warp::http::StatusCode::SERVICE_UNAVAILABLE,
    )
}

async fn handle_sessions_request(
    registry: Arc<SessionRegistry>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let active = registry.active_session_count().await;
    Ok(warp::reply::json(&serde_json::json!({
        "active_sessions": active
    })))
}

async fn handle_leaderboard_request(
    query: LeaderboardQuery,
    ledger: Option<Arc<dyn ScoreLedger>>,
    default_limit: u64,
) -> Result<impl warp::Reply, warp::Rejection> {
    let Some(ledger) = ledger else {
        return Ok(disabled_reply());
    };
    let limit = query
        .limit
        .unwrap_or(default_limit)
        .min(MAX_LEADERBOARD_LIMIT);

    match ledger.get_top_players(limit).await {
        Ok(leaderboard) => Ok(warp::reply::with_status(
            warp::reply::json(&leaderboard),
            warp::http::StatusCode::OK,
        )),
        Err(err) => {
            tracing::error!("Failed to fetch leaderboard: {}", err);
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "error": "Failed to fetch leaderboard"
                })),
                warp::http::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_player_stats_request(
    player_id: PlayerId,
    ledger: Option<Arc<dyn ScoreLedger>>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let Some(ledger) = ledger else {
        return Ok(disabled_reply());
    };

    match ledger.get_stats(player_id).await {
        Ok(Some(record)) => Ok(warp::reply::with_status(
            warp::reply::json(&record),
            warp::http::StatusCode::OK,
        )),
        Ok(None) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "error": "Player not found"
            })),
            warp::http::StatusCode::NOT_FOUND,
        )),
        Err(err) => {
            tracing::error!("Failed to fetch stats for player {}: {}", player_id, err);
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "error": "Failed to fetch player stats"
                })),
                warp::http::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use hangman_persistence::{InMemoryLedger, PlayerRepository};
    use hangman_types::{LeaderboardEntry, PlayerRecord};

    async fn create_test_app(
        ledger: Option<Arc<dyn ScoreLedger>>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let registry = Arc::new(SessionRegistry::with_builtin_words());
        create_routes(registry, ledger, 10)
    }

    async fn sqlite_ledger() -> Arc<dyn ScoreLedger> {
        let db = hangman_persistence::connection::connect_and_migrate("sqlite::memory:")
            .await
            .unwrap();
        Arc::new(PlayerRepository::new(db))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(None).await;

        let response = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "OK");
    }

    #[tokio::test]
    async fn test_sessions_endpoint_counts_active_games() {
        let registry = Arc::new(SessionRegistry::with_builtin_words());
        registry.start_session(1, 10, "Ada").await;
        registry.start_session(2, 20, "Bo").await;
        registry.start_session(3, 30, "Cy").await;
        registry.end_session(3).await;
        let app = create_routes(registry, None, 10);

        let response = warp::test::request()
            .method("GET")
            .path("/sessions")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["active_sessions"], 2);
    }

    #[tokio::test]
    async fn test_leaderboard_endpoint() {
        let ledger = sqlite_ledger().await;
        ledger.record_result(1, "Ada", true, 70).await.unwrap();
        ledger.record_result(2, "Bo", true, 90).await.unwrap();
        ledger.record_result(3, "Cy", false, 0).await.unwrap();
        let app = create_test_app(Some(ledger)).await;

        let response = warp::test::request()
            .method("GET")
            .path("/leaderboard?limit=2")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        let entries: Vec<LeaderboardEntry> = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].player.display_name, "Bo");
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].player.display_name, "Ada");
    }

    #[tokio::test]
    async fn test_player_stats_endpoint() {
        let ledger: Arc<dyn ScoreLedger> = Arc::new(InMemoryLedger::new());
        ledger.record_result(42, "Ada", true, 70).await.unwrap();
        let app = create_test_app(Some(ledger)).await;

        let response = warp::test::request()
            .method("GET")
            .path("/player/42/stats")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
        let record: PlayerRecord = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(record.games_played, 1);
        assert_eq!(record.total_score, 70);

        let response = warp::test::request()
            .method("GET")
            .path("/player/7/stats")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_score_routes_unavailable_without_ledger() {
        let app = create_test_app(None).await;

        for path in ["/leaderboard", "/player/42/stats"] {
            let response = warp::test::request()
                .method("GET")
                .path(path)
                .reply(&app)
                .await;
            assert_eq!(response.status(), 503, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_test_app(None).await;

        let response = warp::test::request()
            .method("GET")
            .path("/game/1/state")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 404);
    }
}
