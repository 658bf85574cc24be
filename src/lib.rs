//! Matchclock - a tick-driven time keeping and notification engine
//!
//! Four interchangeable modes share one tick-driven interface: a wall clock
//! with an alarm, a countdown timer, a stopwatch and a football match clock.
//! Sessions emit typed notifications; rendering them is left to subscribers.

pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod tick;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, SessionError};
pub use events::Notification;
pub use state::AppState;
pub use tick::{SystemClock, Tick, TickSource, WallClock};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
