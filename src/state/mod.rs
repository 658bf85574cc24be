//! State management module
//!
//! This module contains the session state machines and the windows that own them.

pub mod alarm;
pub mod app_state;
pub mod match_session;
pub mod time_session;
pub mod tournament;
pub mod widget;

// Re-export main types
pub use alarm::{AlarmScheduler, AlarmSnapshot, PastTargetPolicy};
pub use app_state::AppState;
pub use match_session::{
    EndReason, LogEntry, LogKind, MatchResult, MatchSession, MatchSnapshot, MatchState, Side,
};
pub use time_session::{SessionState, TimeMode, TimeSession};
pub use tournament::Tournament;
pub use widget::{ActiveSession, ClockWidget, Mode, WidgetSnapshot};
