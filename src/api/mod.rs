//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let widget = Router::new()
        .route("/mode", post(mode_handler))
        .route("/timer", post(timer_duration_handler))
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/resume", post(resume_handler))
        .route("/reset", post(reset_handler))
        .route("/alarm/enable", post(alarm_enable_handler))
        .route("/alarm/arm", post(alarm_arm_handler))
        .route("/alarm/disarm", post(alarm_disarm_handler))
        .route("/match/start", post(widget_match_start_handler))
        .route("/match/end", post(widget_match_end_handler))
        .route("/match/goal", post(widget_goal_handler))
        .route("/match/log", post(widget_log_handler));

    let tournament = Router::new()
        .route("/match/start", post(tournament_start_handler))
        .route("/match/end", post(tournament_end_handler))
        .route("/match/goal", post(tournament_goal_handler))
        .route("/match/log", post(tournament_log_handler))
        .route("/results", get(results_handler));

    Router::new()
        .nest("/widget", widget)
        .nest("/tournament", tournament)
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
