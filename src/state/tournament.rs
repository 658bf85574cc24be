//! Tournament window: one match at a time and the results of finished ones

use std::time::Duration;

use chrono::NaiveDateTime;
use tracing::info;

use crate::{error::SessionError, events::Notification, tick::Tick};

use super::{MatchResult, MatchSession, MatchState, Side};

#[derive(Debug, Clone, Default)]
pub struct Tournament {
    current: MatchSession,
    results: Vec<MatchResult>,
}

impl Tournament {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &MatchSession {
        &self.current
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    /// Start a new match, replacing an ended one. Rejected while a match is live.
    pub fn start_match(
        &mut self,
        team1: &str,
        team2: &str,
        duration: Duration,
        now: NaiveDateTime,
    ) -> Result<(), SessionError> {
        if self.current.state() == MatchState::InProgress {
            return Err(SessionError::transition(
                "start match",
                MatchState::InProgress.as_str(),
            ));
        }

        let mut next = MatchSession::new();
        next.start(team1, team2, duration, now)?;

        let previous = std::mem::replace(&mut self.current, next);
        if let Some(result) = previous.result() {
            info!(
                "Archiving result: {} {} - {} {}",
                result.team1, result.home, result.away, result.team2
            );
            self.results.push(result);
        }
        Ok(())
    }

    pub fn end_match(&mut self, now: NaiveDateTime) -> Result<Notification, SessionError> {
        self.current.end(now)
    }

    pub fn score_goal(&mut self, side: Side, now: NaiveDateTime) -> Result<Notification, SessionError> {
        self.current.score_goal(side, now)
    }

    pub fn log_event(&mut self, text: &str, now: NaiveDateTime) -> Result<(), SessionError> {
        self.current.log_event(text, now)
    }

    pub fn tick(&mut self, tick: &Tick) -> Option<Notification> {
        self.current.tick(tick)
    }
}
