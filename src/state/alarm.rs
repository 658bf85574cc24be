//! Time-of-day alarm attached to the clock display

use chrono::{NaiveDateTime, NaiveTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{error::SessionError, events::Notification};

/// What `arm` does with a target time that already passed today
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PastTargetPolicy {
    /// Refuse to arm
    #[default]
    Reject,
    /// Arm and fire on the next tick
    FireNow,
    /// Arm for the same time tomorrow
    NextDay,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlarmSnapshot {
    pub enabled: bool,
    pub target_time: Option<NaiveTime>,
    pub message: String,
    pub fired_today: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AlarmScheduler {
    enabled: bool,
    target_time: Option<NaiveTime>,
    message: String,
    fired_today: bool,
    policy: PastTargetPolicy,
    /// Wall time of the last tick or arm, used to detect day rollover
    last_seen: Option<NaiveDateTime>,
}

impl AlarmScheduler {
    pub fn new(policy: PastTargetPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn fired_today(&self) -> bool {
        self.fired_today
    }

    pub fn target_time(&self) -> Option<NaiveTime> {
        self.target_time
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        debug!("Alarm enabled");
    }

    /// Make the alarm ineligible to fire. `fired_today` is left as is.
    pub fn disarm(&mut self) {
        self.enabled = false;
        info!("Alarm disarmed");
    }

    /// Set the target time and message. Requires the alarm to be enabled.
    pub fn arm(
        &mut self,
        target_time: NaiveTime,
        message: String,
        now: NaiveDateTime,
    ) -> Result<(), SessionError> {
        if !self.enabled {
            return Err(SessionError::transition("arm alarm", "disabled"));
        }

        let fired_today = if target_time < now.time() {
            match self.policy {
                PastTargetPolicy::Reject => {
                    return Err(SessionError::configuration(
                        "alarm target time already passed today",
                    ))
                }
                PastTargetPolicy::FireNow => false,
                PastTargetPolicy::NextDay => true,
            }
        } else {
            false
        };

        self.target_time = Some(target_time);
        self.message = message;
        self.fired_today = fired_today;
        self.last_seen = Some(now);
        info!(
            "Alarm armed for {} (policy={:?}, deferred={})",
            target_time, self.policy, fired_today
        );
        Ok(())
    }

    /// Fire at most once per armed crossing of the target time.
    ///
    /// A tick gap spanning midnight still fires for the crossing it skipped
    /// when the target lay between the previous tick and the end of that day.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<Notification> {
        let previous = self.last_seen.replace(now);
        let target = self.target_time;

        if let Some(prev) = previous.filter(|prev| now.date() > prev.date()) {
            debug!("Day rollover to {}, clearing alarm guard", now.date());
            let skipped = !self.fired_today && target.is_some_and(|t| prev.time() < t);
            self.fired_today = false;

            if skipped && self.enabled {
                // Today's crossing is still ahead unless this tick is past it too
                self.fired_today = target.is_some_and(|t| now.time() >= t);
                info!("Alarm crossing skipped by tick gap since {}, firing late", prev);
                return Some(self.notification());
            }
        }

        let target = target?;
        if !self.enabled || self.fired_today || now.time() < target {
            return None;
        }

        self.fired_today = true;
        info!("Alarm fired at {}", now);
        Some(self.notification())
    }

    fn notification(&self) -> Notification {
        Notification::Alarm {
            message: self.message.clone(),
        }
    }

    pub fn snapshot(&self) -> AlarmSnapshot {
        AlarmSnapshot {
            enabled: self.enabled,
            target_time: self.target_time,
            message: self.message.clone(),
            fired_today: self.fired_today,
        }
    }
}
