//! API request and response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, SessionError},
    events::Notification,
    state::{MatchResult, MatchSnapshot, Mode, Side, WidgetSnapshot},
};

#[derive(Debug, Clone, Deserialize)]
pub struct ModeRequest {
    pub mode: Mode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimerRequest {
    pub seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArmRequest {
    pub time: NaiveTime,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchStartRequest {
    pub team1: String,
    pub team2: String,
    /// Falls back to the configured match length
    pub minutes: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalRequest {
    pub side: Side,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteRequest {
    pub text: String,
}

/// Response for widget operations
#[derive(Debug, Clone, Serialize)]
pub struct WidgetResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    pub widget: WidgetSnapshot,
}

impl WidgetResponse {
    pub fn ok(widget: WidgetSnapshot, notification: Option<Notification>) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            notification,
            widget,
        }
    }
}

/// Response for tournament match operations
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(rename = "match")]
    pub match_state: MatchSnapshot,
}

impl MatchResponse {
    pub fn ok(match_state: MatchSnapshot, notification: Option<Notification>) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            notification,
            match_state,
        }
    }
}

/// Full status of both windows
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub widget: WidgetSnapshot,
    pub tournament: MatchSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<MatchResult>,
}

/// Error body; `kind` is the stable key for localizing the message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub kind: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match &self {
            AppError::Session(SessionError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            AppError::Session(
                SessionError::InvalidConfiguration { .. } | SessionError::Validation { .. },
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::LockPoisoned { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            status: "error".to_string(),
            kind: self.kind().to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };
        (code, Json(body)).into_response()
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
