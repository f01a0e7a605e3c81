//! HTTP handlers

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use mfea_market::RecommendationReport;
use mfea_market::bot::commands::{COMMAND_CATALOG, COMMANDS_TITLE};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CommandsResponse {
    pub title: &'static str,
    pub commands: Vec<CommandEntry>,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub label: &'static str,
    pub url: String,
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/healthz", get(healthz))
        .route("/check", get(check))
        .route("/commands", get(commands))
        .route("/links", get(links))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn home() -> &'static str {
    "The bot is running!"
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn check(
    State(state): State<AppState>,
) -> Result<Json<RecommendationReport>, (StatusCode, Json<ErrorResponse>)> {
    match state.evaluator.evaluate().await {
        Ok(evaluation) => Ok(Json(RecommendationReport::from(&evaluation))),
        Err(e) => {
            let status = if e.is_data_unavailable() {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            tracing::warn!(error = %e, %status, "market check failed");
            Err((
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

pub async fn commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        title: COMMANDS_TITLE,
        commands: COMMAND_CATALOG
            .iter()
            .map(|&(name, description)| CommandEntry { name, description })
            .collect(),
    })
}

pub async fn links(State(state): State<AppState>) -> Json<LinkResponse> {
    Json(LinkResponse {
        label: "Links",
        url: state.link_url.to_string(),
    })
}
