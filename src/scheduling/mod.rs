//! Live break scheduling for clocked-in employees.
//!
//! On clock-in the [`ShiftStatusStore`] evaluates a planned shift in
//! advisory mode, turns the required breaks into [`BreakEvent`]s, and has
//! the [`NotificationScheduler`] arm a reminder for each one. Alerts leave
//! through a [`NotificationTransport`]; time is read from a [`Clock`].
//!
//! [`BreakEvent`]: crate::models::BreakEvent

mod break_events;
mod clock;
mod notifications;
mod store;
mod transport;

pub use break_events::{
    FALLBACK_MEAL_DURATION_MINUTES, FALLBACK_REST_DURATION_MINUTES,
    break_events_from_recommendations, break_events_from_requirements,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use notifications::{ArmOutcome, NotificationScheduler};
pub use store::{ShiftStatusStore, Snapshot, Subscription};
pub use transport::{Alert, NotificationTransport, RecordingTransport, TracingTransport};
