//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::NaiveDateTime;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::{AppError, SessionError},
    events::Notification,
    format,
    tick::{SystemClock, Tick, WallClock},
};

use super::{ClockWidget, Tournament, WidgetSnapshot, MatchSnapshot, MatchResult};

/// Main application state: one clock widget and one tournament window.
///
/// Each window sits behind its own mutex so a session is only ever mutated by
/// one caller at a time.
#[derive(Debug)]
pub struct AppState {
    pub widget: Arc<Mutex<ClockWidget>>,
    pub tournament: Arc<Mutex<Tournament>>,
    pub config: Config,
    pub start_time: Instant,
    /// Wall clock shared by the tick driver and host-stamped operations
    pub clock: Arc<dyn WallClock>,
    /// Channel every produced notification is published on
    pub notification_tx: broadcast::Sender<Notification>,
}

impl AppState {
    /// Create the application state from configuration, on the system clock
    pub fn new(config: Config) -> Result<Self, SessionError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Arc<dyn WallClock>) -> Result<Self, SessionError> {
        let (notification_tx, _) = broadcast::channel(100);
        let widget = ClockWidget::new(
            config.mode,
            config.timer_duration(),
            config.clock_format,
            config.alarm_past_target,
        )?;

        Ok(Self {
            widget: Arc::new(Mutex::new(widget)),
            tournament: Arc::new(Mutex::new(Tournament::new())),
            config,
            start_time: Instant::now(),
            clock,
            notification_tx,
        })
    }

    /// Current local wall time, used to stamp host-initiated operations
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn lock_widget(&self) -> Result<MutexGuard<'_, ClockWidget>, AppError> {
        self.widget
            .lock()
            .map_err(|_| AppError::LockPoisoned { what: "clock widget" })
    }

    pub fn lock_tournament(&self) -> Result<MutexGuard<'_, Tournament>, AppError> {
        self.tournament
            .lock()
            .map_err(|_| AppError::LockPoisoned { what: "tournament" })
    }

    /// Run an operation against the widget and snapshot the outcome
    pub fn with_widget<T, F>(&self, op: F) -> Result<(T, WidgetSnapshot), AppError>
    where
        F: FnOnce(&mut ClockWidget) -> Result<T, SessionError>,
    {
        let mut widget = self.lock_widget()?;
        let out = op(&mut *widget).inspect_err(|e| warn!("Widget operation rejected: {}", e))?;
        Ok((out, widget.snapshot()))
    }

    /// Run an operation against the tournament window
    pub fn with_tournament<T, F>(&self, op: F) -> Result<(T, MatchSnapshot), AppError>
    where
        F: FnOnce(&mut Tournament) -> Result<T, SessionError>,
    {
        let mut tournament = self.lock_tournament()?;
        let out = op(&mut *tournament)
            .inspect_err(|e| warn!("Tournament operation rejected: {}", e))?;
        Ok((out, tournament.current().snapshot()))
    }

    /// Deliver one tick to both windows and publish the notifications produced
    pub fn deliver_tick(&self, tick: &Tick) -> Result<Vec<Notification>, AppError> {
        let mut produced = Vec::new();
        produced.extend(self.lock_widget()?.tick(tick));
        produced.extend(self.lock_tournament()?.tick(tick));

        debug!("Tick delta={:?} wall={} produced={}", tick.delta, tick.wall, produced.len());
        for notification in &produced {
            self.publish(notification.clone());
        }
        Ok(produced)
    }

    /// Send a notification to subscribers; having none is not an error
    pub fn publish(&self, notification: Notification) {
        if let Err(e) = self.notification_tx.send(notification) {
            debug!("No notification subscribers: {}", e);
        }
    }

    pub fn widget_snapshot(&self) -> Result<WidgetSnapshot, AppError> {
        Ok(self.lock_widget()?.snapshot())
    }

    pub fn match_snapshot(&self) -> Result<MatchSnapshot, AppError> {
        Ok(self.lock_tournament()?.current().snapshot())
    }

    pub fn results(&self) -> Result<Vec<MatchResult>, AppError> {
        Ok(self.lock_tournament()?.results().to_vec())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format::uptime(self.start_time.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn state(args: &[&str]) -> AppState {
        let mut argv = vec!["matchclock"];
        argv.extend_from_slice(args);
        AppState::new(Config::parse_from(argv)).unwrap()
    }

    fn tick(secs: u64) -> Tick {
        let wall = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Tick::new(Duration::from_secs(secs), wall)
    }

    #[test]
    fn tick_reaches_both_windows_and_publishes() {
        let state = state(&["--mode", "timer", "--timer-seconds", "2"]);
        let mut rx = state.notification_tx.subscribe();

        state.with_widget(|w| w.start()).unwrap();
        state
            .with_tournament(|t| t.start_match("A", "B", Duration::from_secs(2), state.now()))
            .unwrap();

        assert!(state.deliver_tick(&tick(1)).unwrap().is_empty());
        let produced = state.deliver_tick(&tick(1)).unwrap();
        assert_eq!(produced.len(), 2);

        assert_eq!(rx.try_recv().unwrap().name(), "finished");
        assert_eq!(rx.try_recv().unwrap(), Notification::FullTime);
    }

    #[test]
    fn rejected_operation_leaves_widget_untouched() {
        let state = state(&["--mode", "stopwatch"]);
        state.with_widget(|w| w.start()).unwrap();
        let err = state.with_widget(|w| w.start()).unwrap_err();
        assert_eq!(err.kind(), "invalid_transition");
        assert_eq!(state.widget_snapshot().unwrap().state, "running");
    }

    #[derive(Debug)]
    struct FixedClock(NaiveDateTime);

    impl WallClock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    #[test]
    fn host_operations_are_stamped_by_the_injected_clock() {
        let kickoff = tick(0).wall;
        let config = Config::parse_from(["matchclock", "--mode", "football"]);
        let state = AppState::with_clock(config, Arc::new(FixedClock(kickoff))).unwrap();

        assert_eq!(state.now(), kickoff);
        state
            .with_tournament(|t| t.start_match("A", "B", Duration::from_secs(60), state.now()))
            .unwrap();
        let snapshot = state.match_snapshot().unwrap();
        assert_eq!(snapshot.started_at, Some(kickoff));
        assert_eq!(snapshot.events[0].at, kickoff);
    }
}
