//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::{format::ClockFormat, state::{Mode, PastTargetPolicy}};

/// CLI argument parsing structure
#[derive(Debug, Clone, Parser)]
#[command(name = "matchclock")]
#[command(about = "Clock, timer, stopwatch and football match engine with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, env = "MATCHCLOCK_PORT", default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, env = "MATCHCLOCK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Tick cadence in milliseconds
    #[arg(long, env = "MATCHCLOCK_TICK_MS", default_value = "1000",
          value_parser = clap::value_parser!(u64).range(10..))]
    pub tick_ms: u64,

    /// Widget mode at startup
    #[arg(short, long, env = "MATCHCLOCK_MODE", value_enum, default_value_t = Mode::Clock)]
    pub mode: Mode,

    /// Initial countdown length in seconds
    #[arg(long, env = "MATCHCLOCK_TIMER_SECONDS", default_value = "5400",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timer_seconds: u64,

    /// Match length in minutes used when a start request omits it
    #[arg(long, env = "MATCHCLOCK_MATCH_MINUTES", default_value = "90",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub match_minutes: u64,

    /// Wall-clock display format
    #[arg(long, env = "MATCHCLOCK_CLOCK_FORMAT", value_enum, default_value_t = ClockFormat::H24)]
    pub clock_format: ClockFormat,

    /// What to do when an alarm is armed for a time already passed today
    #[arg(long, env = "MATCHCLOCK_ALARM_PAST_TARGET", value_enum,
          default_value_t = PastTargetPolicy::Reject)]
    pub alarm_past_target: PastTargetPolicy,

    /// Alarm message used when none is supplied
    #[arg(long, env = "MATCHCLOCK_ALARM_MESSAGE", default_value = "Alarm!")]
    pub alarm_message: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn timer_duration(&self) -> Duration {
        Duration::from_secs(self.timer_seconds)
    }

    pub fn match_duration(&self) -> Duration {
        Duration::from_secs(self.match_minutes.saturating_mul(60))
    }
}
