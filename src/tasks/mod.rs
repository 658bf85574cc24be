//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod notification_log;
pub mod tick_driver;

// Re-export main functions
pub use notification_log::notification_log_task;
pub use tick_driver::tick_driver_task;
