//! Clock, timer and stopwatch session state machine

use std::time::Duration;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{error::SessionError, events::Notification, tick::Tick};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Ready,
    Running,
    Paused,
    Finished,
}

impl SessionState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }
}

/// Which flavour of time keeping a `TimeSession` performs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMode {
    /// Shows the current wall time while started, never finishes
    #[default]
    Clock,
    /// Counts toward a target duration and finishes there
    Timer,
    /// Counts up without bound
    Stopwatch,
}

impl TimeMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::Timer => "timer",
            Self::Stopwatch => "stopwatch",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimeSession {
    state: SessionState,
    mode: TimeMode,
    elapsed: Duration,
    target_duration: Option<Duration>,
    /// Last wall time shown in Clock mode
    wall: Option<NaiveTime>,
}

impl TimeSession {
    /// A Ready session in the given mode; a Timer still needs a target via `configure`
    pub fn new(mode: TimeMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn clock() -> Self {
        Self::new(TimeMode::Clock)
    }

    pub fn stopwatch() -> Self {
        Self::new(TimeMode::Stopwatch)
    }

    pub fn timer(target: Duration) -> Result<Self, SessionError> {
        let mut session = Self::new(TimeMode::Timer);
        session.configure(TimeMode::Timer, Some(target))?;
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn target_duration(&self) -> Option<Duration> {
        self.target_duration
    }

    /// Time left on a countdown; `None` outside Timer mode
    pub fn remaining(&self) -> Option<Duration> {
        match self.mode {
            TimeMode::Timer => self
                .target_duration
                .map(|target| target.saturating_sub(self.elapsed)),
            TimeMode::Clock | TimeMode::Stopwatch => None,
        }
    }

    pub fn wall_time(&self) -> Option<NaiveTime> {
        self.wall
    }

    /// Set mode and, for Timer, the target duration. Only valid while Ready.
    pub fn configure(
        &mut self,
        mode: TimeMode,
        target_duration: Option<Duration>,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::Ready {
            return Err(SessionError::configuration(
                "session must be ready to be configured",
            ));
        }

        let target_duration = match mode {
            TimeMode::Timer => match target_duration {
                Some(target) if !target.is_zero() => Some(target),
                _ => {
                    return Err(SessionError::configuration(
                        "timer duration must be positive",
                    ))
                }
            },
            TimeMode::Clock | TimeMode::Stopwatch => None,
        };

        self.mode = mode;
        self.target_duration = target_duration;
        debug!(
            "Session configured: mode={}, target={:?}",
            mode.as_str(),
            target_duration
        );
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Ready {
            return Err(SessionError::transition("start", self.state.as_str()));
        }
        if self.mode == TimeMode::Timer && self.target_duration.is_none() {
            return Err(SessionError::configuration("timer duration not configured"));
        }

        self.state = SessionState::Running;
        info!("{} session started", self.mode.as_str());
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.mode == TimeMode::Clock {
            return Err(SessionError::transition("pause", "in clock mode"));
        }
        if self.state != SessionState::Running {
            return Err(SessionError::transition("pause", self.state.as_str()));
        }

        self.state = SessionState::Paused;
        info!(
            "{} session paused at {:?}",
            self.mode.as_str(),
            self.elapsed
        );
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Paused {
            return Err(SessionError::transition("resume", self.state.as_str()));
        }

        self.state = SessionState::Running;
        info!("{} session resumed", self.mode.as_str());
        Ok(())
    }

    /// Back to Ready from any state. Mode and target are kept.
    pub fn reset(&mut self) {
        self.state = SessionState::Ready;
        self.elapsed = Duration::ZERO;
        self.wall = None;
        debug!("{} session reset", self.mode.as_str());
    }

    /// Advance by one tick. Only a running Timer can produce a notification.
    pub fn tick(&mut self, tick: &Tick) -> Option<Notification> {
        if self.state != SessionState::Running {
            return None;
        }

        match self.mode {
            TimeMode::Clock => {
                self.wall = Some(tick.wall.time());
                None
            }
            TimeMode::Stopwatch => {
                self.elapsed = self.elapsed.saturating_add(tick.delta);
                None
            }
            TimeMode::Timer => {
                // configure() guarantees a target for every started Timer
                let target = self.target_duration?;
                self.elapsed = self.elapsed.saturating_add(tick.delta);
                if self.elapsed < target {
                    return None;
                }

                self.elapsed = target;
                self.state = SessionState::Finished;
                info!("Timer finished after {:?}", target);
                Some(Notification::Finished {
                    mode: TimeMode::Timer,
                })
            }
        }
    }
}
