//! One-shot notifications raised by sessions
//!
//! Events carry typed data only. Mapping them to localized text, sounds or
//! toasts is left to whoever subscribes.

use serde::{Deserialize, Serialize};

use crate::state::{EndReason, Side, TimeMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// A countdown reached its target duration
    Finished { mode: TimeMode },
    /// An armed alarm crossed its target time
    Alarm { message: String },
    /// A match ran its configured duration
    FullTime,
    /// A match was ended by the host before full time
    MatchEnded { reason: EndReason },
    GoalScored { side: Side, home: u32, away: u32 },
}

impl Notification {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Finished { .. } => "finished",
            Self::Alarm { .. } => "alarm",
            Self::FullTime => "full_time",
            Self::MatchEnded { .. } => "match_ended",
            Self::GoalScored { .. } => "goal_scored",
        }
    }
}
