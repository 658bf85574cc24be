//! Football match session: clock, score and event log

use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{error::SessionError, events::Notification, tick::Tick};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    #[default]
    NotStarted,
    InProgress,
    Ended,
}

impl MatchState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Ended => "ended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Manual,
    FullTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogKind {
    Kickoff,
    Goal { side: Side, home: u32, away: u32 },
    Note { text: String },
    FullTime,
    ManualEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: NaiveDateTime,
    /// Whole match minutes elapsed when the entry was written
    pub minute: u64,
    #[serde(flatten)]
    pub kind: LogKind,
}

/// Final line of an ended match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub team1: String,
    pub team2: String,
    pub home: u32,
    pub away: u32,
    pub end_reason: EndReason,
    pub ended_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub state: MatchState,
    pub team1: String,
    pub team2: String,
    pub duration_secs: u64,
    pub elapsed_secs: u64,
    pub remaining_secs: u64,
    pub minute: u64,
    pub home: u32,
    pub away: u32,
    pub started_at: Option<NaiveDateTime>,
    pub ended_at: Option<NaiveDateTime>,
    pub end_reason: Option<EndReason>,
    pub events: Vec<LogEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct MatchSession {
    state: MatchState,
    team1: String,
    team2: String,
    duration: Duration,
    elapsed: Duration,
    home: u32,
    away: u32,
    started_at: Option<NaiveDateTime>,
    ended_at: Option<NaiveDateTime>,
    end_reason: Option<EndReason>,
    events: Vec<LogEntry>,
}

impl MatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn score(&self) -> (u32, u32) {
        (self.home, self.away)
    }

    pub fn events(&self) -> &[LogEntry] {
        &self.events
    }

    pub fn minute(&self) -> u64 {
        self.elapsed.as_secs() / 60
    }

    /// Kick off. Everything is validated before any field changes.
    pub fn start(
        &mut self,
        team1: &str,
        team2: &str,
        duration: Duration,
        now: NaiveDateTime,
    ) -> Result<(), SessionError> {
        if self.state != MatchState::NotStarted {
            return Err(SessionError::transition("start match", self.state.as_str()));
        }

        let team1 = team1.trim();
        let team2 = team2.trim();
        if team1.is_empty() {
            return Err(SessionError::Validation { field: "team1" });
        }
        if team2.is_empty() {
            return Err(SessionError::Validation { field: "team2" });
        }
        if duration.is_zero() {
            return Err(SessionError::configuration(
                "match duration must be positive",
            ));
        }

        *self = Self {
            state: MatchState::InProgress,
            team1: team1.to_string(),
            team2: team2.to_string(),
            duration,
            started_at: Some(now),
            ..Self::default()
        };
        self.push(now, LogKind::Kickoff);
        info!(
            "Match started: {} vs {} ({} min)",
            self.team1,
            self.team2,
            duration.as_secs() / 60
        );
        Ok(())
    }

    /// Advance the match clock; emits `FullTime` once when the duration is reached
    pub fn tick(&mut self, tick: &Tick) -> Option<Notification> {
        if self.state != MatchState::InProgress {
            return None;
        }

        self.elapsed = self.elapsed.saturating_add(tick.delta);
        if self.elapsed < self.duration {
            return None;
        }

        self.elapsed = self.duration;
        self.finish(EndReason::FullTime, tick.wall);
        self.push(tick.wall, LogKind::FullTime);
        info!(
            "Full time: {} {} - {} {}",
            self.team1, self.home, self.away, self.team2
        );
        Some(Notification::FullTime)
    }

    /// End the match by hand. Rejected once full time has already ended it.
    pub fn end(&mut self, now: NaiveDateTime) -> Result<Notification, SessionError> {
        if self.state != MatchState::InProgress {
            return Err(SessionError::transition("end match", self.state.as_str()));
        }

        self.finish(EndReason::Manual, now);
        self.push(now, LogKind::ManualEnd);
        info!("Match ended manually at minute {}", self.minute());
        Ok(Notification::MatchEnded {
            reason: EndReason::Manual,
        })
    }

    pub fn score_goal(&mut self, side: Side, now: NaiveDateTime) -> Result<Notification, SessionError> {
        if self.state != MatchState::InProgress {
            return Err(SessionError::transition("score goal", self.state.as_str()));
        }

        match side {
            Side::Home => self.home += 1,
            Side::Away => self.away += 1,
        }
        let (home, away) = (self.home, self.away);
        self.push(now, LogKind::Goal { side, home, away });
        info!("Goal {:?}: {} - {}", side, home, away);
        Ok(Notification::GoalScored { side, home, away })
    }

    /// Append a free-form note. Allowed in any state; has no effect on the match.
    pub fn log_event(&mut self, text: &str, now: NaiveDateTime) -> Result<(), SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::Validation {
                field: "description",
            });
        }
        self.push(
            now,
            LogKind::Note {
                text: text.to_string(),
            },
        );
        Ok(())
    }

    pub fn result(&self) -> Option<MatchResult> {
        Some(MatchResult {
            team1: self.team1.clone(),
            team2: self.team2.clone(),
            home: self.home,
            away: self.away,
            end_reason: self.end_reason?,
            ended_at: self.ended_at?,
        })
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            state: self.state,
            team1: self.team1.clone(),
            team2: self.team2.clone(),
            duration_secs: self.duration.as_secs(),
            elapsed_secs: self.elapsed.as_secs(),
            remaining_secs: self.duration.saturating_sub(self.elapsed).as_secs(),
            minute: self.minute(),
            home: self.home,
            away: self.away,
            started_at: self.started_at,
            ended_at: self.ended_at,
            end_reason: self.end_reason,
            events: self.events.clone(),
        }
    }

    fn finish(&mut self, reason: EndReason, at: NaiveDateTime) {
        self.state = MatchState::Ended;
        self.end_reason = Some(reason);
        self.ended_at = Some(at);
    }

    fn push(&mut self, at: NaiveDateTime, kind: LogKind) {
        debug!("Match log: {:?}", kind);
        let minute = self.minute();
        self.events.push(LogEntry { at, minute, kind });
    }
}
