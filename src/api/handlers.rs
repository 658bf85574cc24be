//! HTTP endpoint handlers

use std::{sync::Arc, time::Duration};
use axum::{extract::State, response::Json};
use tracing::info;

use crate::{
    error::AppError,
    events::Notification,
    state::{AppState, MatchSnapshot, WidgetSnapshot},
};
use super::responses::{
    ArmRequest, GoalRequest, HealthResponse, MatchResponse, MatchStartRequest, ModeRequest,
    NoteRequest, ResultsResponse, StatusResponse, TimerRequest, WidgetResponse,
};

type WidgetResult = Result<Json<WidgetResponse>, AppError>;
type MatchReply = Result<Json<MatchResponse>, AppError>;

fn match_duration(state: &AppState, minutes: Option<u64>) -> Duration {
    minutes
        .map(|m| Duration::from_secs(m.saturating_mul(60)))
        .unwrap_or_else(|| state.config.match_duration())
}

/// Publish a host-triggered notification and wrap the widget snapshot
fn widget_reply(state: &AppState, notification: Option<Notification>, widget: WidgetSnapshot) -> Json<WidgetResponse> {
    if let Some(n) = &notification {
        state.publish(n.clone());
    }
    Json(WidgetResponse::ok(widget, notification))
}

fn match_reply(state: &AppState, notification: Option<Notification>, snapshot: MatchSnapshot) -> Json<MatchResponse> {
    if let Some(n) = &notification {
        state.publish(n.clone());
    }
    Json(MatchResponse::ok(snapshot, notification))
}

/// Handle POST /widget/mode - Switch the widget to another mode
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ModeRequest>,
) -> WidgetResult {
    let (_, widget) = state.with_widget(|w| w.select_mode(req.mode))?;
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /widget/timer - Set the countdown length
pub async fn timer_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TimerRequest>,
) -> WidgetResult {
    let duration = Duration::from_secs(req.seconds);
    let (_, widget) = state.with_widget(|w| w.set_timer_duration(duration))?;
    info!("Timer duration set to {}s", req.seconds);
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /widget/start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> WidgetResult {
    let (_, widget) = state.with_widget(|w| w.start())?;
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /widget/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> WidgetResult {
    let (_, widget) = state.with_widget(|w| w.pause())?;
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /widget/resume
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> WidgetResult {
    let (_, widget) = state.with_widget(|w| w.resume())?;
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /widget/reset
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> WidgetResult {
    let (_, widget) = state.with_widget(|w| {
        w.reset();
        Ok(())
    })?;
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /widget/alarm/enable
pub async fn alarm_enable_handler(State(state): State<Arc<AppState>>) -> WidgetResult {
    let (_, widget) = state.with_widget(|w| {
        w.alarm_mut().enable();
        Ok(())
    })?;
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /widget/alarm/arm - Set target time and message
pub async fn alarm_arm_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArmRequest>,
) -> WidgetResult {
    let message = match req.message.trim() {
        "" => state.config.alarm_message.clone(),
        text => text.to_string(),
    };
    let now = state.now();
    let (_, widget) = state.with_widget(|w| w.alarm_mut().arm(req.time, message, now))?;
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /widget/alarm/disarm
pub async fn alarm_disarm_handler(State(state): State<Arc<AppState>>) -> WidgetResult {
    let (_, widget) = state.with_widget(|w| {
        w.alarm_mut().disarm();
        Ok(())
    })?;
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /widget/match/start - Kick off a match in football mode
pub async fn widget_match_start_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MatchStartRequest>,
) -> WidgetResult {
    let duration = match_duration(&state, req.minutes);
    let now = state.now();
    let (_, widget) = state.with_widget(|w| w.start_match(&req.team1, &req.team2, duration, now))?;
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /widget/match/end
pub async fn widget_match_end_handler(State(state): State<Arc<AppState>>) -> WidgetResult {
    let now = state.now();
    let (notification, widget) = state.with_widget(|w| w.end_match(now))?;
    Ok(widget_reply(&state, Some(notification), widget))
}

/// Handle POST /widget/match/goal
pub async fn widget_goal_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoalRequest>,
) -> WidgetResult {
    let now = state.now();
    let (notification, widget) = state.with_widget(|w| w.score_goal(req.side, now))?;
    Ok(widget_reply(&state, Some(notification), widget))
}

/// Handle POST /widget/match/log
pub async fn widget_log_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NoteRequest>,
) -> WidgetResult {
    let now = state.now();
    let (_, widget) = state.with_widget(|w| w.log_match_event(&req.text, now))?;
    Ok(widget_reply(&state, None, widget))
}

/// Handle POST /tournament/match/start
pub async fn tournament_start_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MatchStartRequest>,
) -> MatchReply {
    let duration = match_duration(&state, req.minutes);
    let now = state.now();
    let (_, snapshot) =
        state.with_tournament(|t| t.start_match(&req.team1, &req.team2, duration, now))?;
    Ok(match_reply(&state, None, snapshot))
}

/// Handle POST /tournament/match/end
pub async fn tournament_end_handler(State(state): State<Arc<AppState>>) -> MatchReply {
    let now = state.now();
    let (notification, snapshot) = state.with_tournament(|t| t.end_match(now))?;
    Ok(match_reply(&state, Some(notification), snapshot))
}

/// Handle POST /tournament/match/goal
pub async fn tournament_goal_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoalRequest>,
) -> MatchReply {
    let now = state.now();
    let (notification, snapshot) = state.with_tournament(|t| t.score_goal(req.side, now))?;
    Ok(match_reply(&state, Some(notification), snapshot))
}

/// Handle POST /tournament/match/log
pub async fn tournament_log_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NoteRequest>,
) -> MatchReply {
    let now = state.now();
    let (_, snapshot) = state.with_tournament(|t| t.log_event(&req.text, now))?;
    Ok(match_reply(&state, None, snapshot))
}

/// Handle GET /tournament/results - Results of finished matches
pub async fn results_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResultsResponse>, AppError> {
    Ok(Json(ResultsResponse {
        results: state.results()?,
    }))
}

/// Handle GET /status - Return both windows
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(StatusResponse {
        widget: state.widget_snapshot()?,
        tournament: state.match_snapshot()?,
        uptime: state.get_uptime(),
        port: state.config.port,
        host: state.config.host.clone(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
