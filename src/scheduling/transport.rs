//! Delivery of user-facing break alerts.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::info;

/// A short message for the employee, such as "Meal Break Required".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Alert heading.
    pub title: String,
    /// Alert body.
    pub description: String,
    /// How long the alert should stay visible.
    pub display_for: Duration,
}

/// Where alerts go.
///
/// Delivery is fire-and-forget. Implementations run on the runtime's worker
/// threads with no scheduler lock held, so they may call back into the
/// scheduler but should return promptly.
pub trait NotificationTransport: Send + Sync {
    /// Delivers one alert.
    fn notify(&self, alert: Alert);
}

/// Writes alerts to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTransport;

impl NotificationTransport for TracingTransport {
    fn notify(&self, alert: Alert) {
        info!(
            title = %alert.title,
            description = %alert.description,
            display_ms = alert.display_for.as_millis() as u64,
            "Break alert"
        );
    }
}

/// Keeps every alert in memory, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingTransport {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the alerts delivered so far.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the alerts whose title matches `title`.
    pub fn with_title(&self, title: &str) -> Vec<Alert> {
        self.alerts()
            .into_iter()
            .filter(|a| a.title == title)
            .collect()
    }
}

impl NotificationTransport for RecordingTransport {
    fn notify(&self, alert: Alert) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert);
    }
}
