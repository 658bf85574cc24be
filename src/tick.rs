//! Tick delivery: the periodic signal that drives every session

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{Local, NaiveDateTime};

/// One time-advance signal.
///
/// `delta` is the real time elapsed since the previous tick, never an assumed
/// constant. `wall` is the host's local wall-clock time at delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub delta: Duration,
    pub wall: NaiveDateTime,
}

impl Tick {
    pub fn new(delta: Duration, wall: NaiveDateTime) -> Self {
        Self { delta, wall }
    }
}

/// Source of local wall-clock time
pub trait WallClock: fmt::Debug + Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

impl<T: WallClock + ?Sized> WallClock for Arc<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Wall clock backed by the operating system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Produces ticks from a monotonic instant and a wall clock
#[derive(Debug)]
pub struct TickSource<C: WallClock> {
    clock: C,
    last: Instant,
}

impl<C: WallClock> TickSource<C> {
    pub fn new(clock: C, now: Instant) -> Self {
        Self { clock, last: now }
    }

    /// Build the tick for `now`, measuring the delta since the previous call
    pub fn next(&mut self, now: Instant) -> Tick {
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        Tick::new(delta, self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug)]
    struct FixedClock(NaiveDateTime);

    impl WallClock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn delta_uses_actual_elapsed_time() {
        let start = Instant::now();
        let mut source = TickSource::new(FixedClock(noon()), start);

        let first = source.next(start + Duration::from_millis(1000));
        assert_eq!(first.delta, Duration::from_millis(1000));

        // Irregular gap, e.g. after the host resumed from suspend
        let second = source.next(start + Duration::from_millis(4500));
        assert_eq!(second.delta, Duration::from_millis(3500));
        assert_eq!(second.wall, noon());
    }

    #[test]
    fn instant_going_backwards_yields_zero_delta() {
        let start = Instant::now() + Duration::from_secs(10);
        let mut source = TickSource::new(FixedClock(noon()), start);
        let tick = source.next(start - Duration::from_secs(1));
        assert_eq!(tick.delta, Duration::ZERO);
    }

    #[test]
    fn shared_clock_stamps_ticks() {
        let clock: Arc<dyn WallClock> = Arc::new(FixedClock(noon()));
        let start = Instant::now();
        let mut source = TickSource::new(Arc::clone(&clock), start);
        assert_eq!(source.next(start).wall, clock.now());
    }
}
