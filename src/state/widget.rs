//! The clock widget: one active session chosen by mode, plus its alarm

use std::time::Duration;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::SessionError,
    events::Notification,
    format::{self, ClockFormat},
    tick::Tick,
};

use super::{
    AlarmScheduler, AlarmSnapshot, MatchSession, MatchSnapshot, MatchState, PastTargetPolicy,
    Side, TimeMode, TimeSession,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Clock,
    Timer,
    Football,
    Stopwatch,
}

/// The session backing the widget. Each variant carries only what its mode needs.
#[derive(Debug, Clone)]
pub enum ActiveSession {
    Clock(TimeSession),
    Timer(TimeSession),
    Stopwatch(TimeSession),
    Football(MatchSession),
}

impl ActiveSession {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Clock(_) => Mode::Clock,
            Self::Timer(_) => Mode::Timer,
            Self::Stopwatch(_) => Mode::Stopwatch,
            Self::Football(_) => Mode::Football,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WidgetSnapshot {
    pub mode: Mode,
    /// Session state, `not_started`/`in_progress`/`ended` in football mode
    pub state: String,
    pub elapsed_secs: u64,
    pub remaining_secs: Option<u64>,
    pub timer_secs: u64,
    pub display: String,
    pub alarm: AlarmSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub football: Option<MatchSnapshot>,
}

#[derive(Debug, Clone)]
pub struct ClockWidget {
    session: ActiveSession,
    alarm: AlarmScheduler,
    timer_duration: Duration,
    format: ClockFormat,
    /// Last wall time seen, shown before the first clock tick
    last_wall: Option<NaiveDateTime>,
}

impl ClockWidget {
    pub fn new(
        mode: Mode,
        timer_duration: Duration,
        format: ClockFormat,
        policy: PastTargetPolicy,
    ) -> Result<Self, SessionError> {
        Ok(Self {
            session: Self::fresh_session(mode, timer_duration)?,
            alarm: AlarmScheduler::new(policy),
            timer_duration,
            format,
            last_wall: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn alarm_mut(&mut self) -> &mut AlarmScheduler {
        &mut self.alarm
    }

    /// Replace the active session with a fresh one for `mode`
    pub fn select_mode(&mut self, mode: Mode) -> Result<(), SessionError> {
        self.session = Self::fresh_session(mode, self.timer_duration)?;
        info!("Widget mode set to {:?}", mode);
        Ok(())
    }

    /// Change the countdown length; reconfigures a Ready timer in place
    pub fn set_timer_duration(&mut self, duration: Duration) -> Result<(), SessionError> {
        if duration.is_zero() {
            return Err(SessionError::configuration(
                "timer duration must be positive",
            ));
        }
        if let ActiveSession::Timer(session) = &mut self.session {
            session.configure(TimeMode::Timer, Some(duration))?;
        }
        self.timer_duration = duration;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.time_session_mut("start")?.start()
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        self.time_session_mut("pause")?.pause()
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.time_session_mut("resume")?.resume()
    }

    /// Reset the time session, or replace a football session with a new one
    pub fn reset(&mut self) {
        match &mut self.session {
            ActiveSession::Clock(session)
            | ActiveSession::Timer(session)
            | ActiveSession::Stopwatch(session) => session.reset(),
            ActiveSession::Football(session) => *session = MatchSession::new(),
        }
    }

    /// Kick off in football mode. An ended match is replaced by the new one.
    pub fn start_match(
        &mut self,
        team1: &str,
        team2: &str,
        duration: Duration,
        now: NaiveDateTime,
    ) -> Result<(), SessionError> {
        let current = self.match_mut("start match")?;
        if current.state() == MatchState::InProgress {
            return Err(SessionError::transition(
                "start match",
                MatchState::InProgress.as_str(),
            ));
        }

        let mut next = MatchSession::new();
        next.start(team1, team2, duration, now)?;
        *current = next;
        Ok(())
    }

    pub fn end_match(&mut self, now: NaiveDateTime) -> Result<Notification, SessionError> {
        self.match_mut("end match")?.end(now)
    }

    pub fn score_goal(&mut self, side: Side, now: NaiveDateTime) -> Result<Notification, SessionError> {
        self.match_mut("score goal")?.score_goal(side, now)
    }

    pub fn log_match_event(&mut self, text: &str, now: NaiveDateTime) -> Result<(), SessionError> {
        self.match_mut("log match event")?.log_event(text, now)
    }

    /// Deliver one tick. The alarm only runs alongside the clock display.
    pub fn tick(&mut self, tick: &Tick) -> Option<Notification> {
        self.last_wall = Some(tick.wall);
        match &mut self.session {
            ActiveSession::Clock(session) => {
                session.tick(tick);
                self.alarm.tick(tick.wall)
            }
            ActiveSession::Timer(session) | ActiveSession::Stopwatch(session) => {
                session.tick(tick)
            }
            ActiveSession::Football(session) => session.tick(tick),
        }
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        let alarm = self.alarm.snapshot();
        let timer_secs = self.timer_duration.as_secs();
        match &self.session {
            ActiveSession::Football(session) => {
                let football = session.snapshot();
                WidgetSnapshot {
                    mode: Mode::Football,
                    state: football.state.as_str().replace(' ', "_"),
                    elapsed_secs: football.elapsed_secs,
                    remaining_secs: Some(football.remaining_secs),
                    timer_secs,
                    display: format::hms(session.elapsed()),
                    alarm,
                    football: Some(football),
                }
            }
            ActiveSession::Clock(session)
            | ActiveSession::Timer(session)
            | ActiveSession::Stopwatch(session) => WidgetSnapshot {
                mode: self.mode(),
                state: session.state().as_str().to_string(),
                elapsed_secs: session.elapsed().as_secs(),
                remaining_secs: session.remaining().map(|r| r.as_secs()),
                timer_secs,
                display: self.display(session),
                alarm,
                football: None,
            },
        }
    }

    fn display(&self, session: &TimeSession) -> String {
        match session.mode() {
            TimeMode::Clock => session
                .wall_time()
                .or_else(|| self.last_wall.map(|w| w.time()))
                .map(|t| format::wall_time(t, self.format))
                .unwrap_or_else(|| format::hms(Duration::ZERO)),
            TimeMode::Timer => format::hms(session.remaining().unwrap_or_default()),
            TimeMode::Stopwatch => format::hms(session.elapsed()),
        }
    }

    fn fresh_session(mode: Mode, timer_duration: Duration) -> Result<ActiveSession, SessionError> {
        Ok(match mode {
            Mode::Clock => {
                let mut clock = TimeSession::clock();
                clock.start()?;
                ActiveSession::Clock(clock)
            }
            Mode::Timer => ActiveSession::Timer(TimeSession::timer(timer_duration)?),
            Mode::Stopwatch => ActiveSession::Stopwatch(TimeSession::stopwatch()),
            Mode::Football => ActiveSession::Football(MatchSession::new()),
        })
    }

    fn time_session_mut(&mut self, action: &'static str) -> Result<&mut TimeSession, SessionError> {
        match &mut self.session {
            ActiveSession::Clock(session)
            | ActiveSession::Timer(session)
            | ActiveSession::Stopwatch(session) => Ok(session),
            ActiveSession::Football(_) => {
                warn!("{} is not applicable in football mode", action);
                Err(SessionError::transition(action, "in football mode"))
            }
        }
    }

    fn match_mut(&mut self, action: &'static str) -> Result<&mut MatchSession, SessionError> {
        match &mut self.session {
            ActiveSession::Football(session) => Ok(session),
            other => {
                warn!("{} is not applicable in {:?} mode", action, other.mode());
                Err(SessionError::transition(action, "not in football mode"))
            }
        }
    }
}
