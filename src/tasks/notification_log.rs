//! Notification log background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{events::Notification, state::AppState};

/// Subscriber that records every notification in the log.
///
/// Stands in for the presentation layer, which renders the same events.
pub async fn notification_log_task(state: Arc<AppState>) {
    info!("Starting notification log task");

    let mut rx = state.notification_tx.subscribe();

    loop {
        match rx.recv().await {
            Ok(notification) => log_notification(&notification),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notification log lagged, {} events skipped", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Notification channel closed, stopping log task");
                break;
            }
        }
    }
}

fn log_notification(notification: &Notification) {
    match notification {
        Notification::Finished { mode } => info!("Notification: {} finished", mode.as_str()),
        Notification::Alarm { message } => info!("Notification: alarm \"{}\"", message),
        Notification::FullTime => info!("Notification: full time"),
        Notification::MatchEnded { reason } => {
            info!("Notification: match ended ({:?})", reason)
        }
        Notification::GoalScored { side, home, away } => {
            info!("Notification: goal {:?}, {} - {}", side, home, away)
        }
    }
}
