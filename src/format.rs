//! Numeric display formatting for the widget readout

use std::time::Duration;

use chrono::NaiveTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Wall-clock display format, only used in Clock mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ClockFormat {
    #[default]
    #[value(name = "24h")]
    #[serde(rename = "24h")]
    H24,
    #[value(name = "12h")]
    #[serde(rename = "12h")]
    H12,
}

/// Format a duration as `HH:MM:SS`, truncating sub-second precision
pub fn hms(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format a time of day in the requested clock format
pub fn wall_time(time: NaiveTime, format: ClockFormat) -> String {
    match format {
        ClockFormat::H24 => time.format("%H:%M:%S").to_string(),
        ClockFormat::H12 => time.format("%I:%M:%S %p").to_string(),
    }
}

/// Format an uptime as a compact string
pub fn uptime(duration: Duration) -> String {
    let hours = duration.as_secs() / 3600;
    let minutes = (duration.as_secs() % 3600) / 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_pads_and_truncates() {
        assert_eq!(hms(Duration::ZERO), "00:00:00");
        assert_eq!(hms(Duration::from_millis(5_999)), "00:00:05");
        assert_eq!(hms(Duration::from_secs(90 * 60)), "01:30:00");
        assert_eq!(hms(Duration::from_secs(100 * 3600 + 61)), "100:01:01");
    }

    #[test]
    fn wall_time_formats() {
        let t = NaiveTime::from_hms_opt(15, 4, 5).unwrap();
        assert_eq!(wall_time(t, ClockFormat::H24), "15:04:05");
        assert_eq!(wall_time(t, ClockFormat::H12), "03:04:05 PM");
    }

    #[test]
    fn uptime_picks_largest_unit() {
        assert_eq!(uptime(Duration::from_secs(42)), "42s");
        assert_eq!(uptime(Duration::from_secs(125)), "2m 5s");
        assert_eq!(uptime(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
