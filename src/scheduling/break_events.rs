//! Turning compliance output into scheduled break events.
//!
//! Breaks are spread evenly from the start of the shift: the first one is
//! due one `spacing` after start, the next one two `spacing`s after, and so
//! on.

use chrono::{DateTime, Duration, Utc};

use crate::models::{BreakEvent, BreakType, RequiredBreak};

/// Meal break length assumed when only recommendation text is available.
pub const FALLBACK_MEAL_DURATION_MINUTES: u32 = 30;

/// Rest break length assumed when only recommendation text is available.
pub const FALLBACK_REST_DURATION_MINUTES: u32 = 10;

/// Schedules one event per structured requirement.
///
/// Durations and pay flags come from the requirement, so each region's own
/// values carry through to the schedule. Returns `None` if a due time falls
/// outside the representable range.
///
/// # Example
///
/// ```
/// use break_compliance::models::{BreakType, RequiredBreak};
/// use break_compliance::scheduling::break_events_from_requirements;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap();
/// let required = [
///     RequiredBreak { kind: BreakType::Meal, duration: 30, is_paid: false },
///     RequiredBreak { kind: BreakType::Rest, duration: 15, is_paid: true },
/// ];
///
/// let events =
///     break_events_from_requirements("emp1", start, &required, Duration::hours(2)).unwrap();
/// assert_eq!(events[0].scheduled_time, start + Duration::hours(2));
/// assert_eq!(events[1].scheduled_time, start + Duration::hours(4));
/// assert_eq!(events[1].duration, 15);
/// ```
pub fn break_events_from_requirements(
    employee_id: &str,
    start: DateTime<Utc>,
    required: &[RequiredBreak],
    spacing: Duration,
) -> Option<Vec<BreakEvent>> {
    let mut due = start;
    required
        .iter()
        .map(|req| {
            due = due.checked_add_signed(spacing)?;
            Some(BreakEvent {
                employee_id: employee_id.to_string(),
                kind: req.kind,
                scheduled_time: due,
                duration: req.duration,
                is_paid: req.is_paid,
            })
        })
        .collect()
}

/// Schedules one event per recommendation line, guessing the break kind
/// from the text.
///
/// A line mentioning "meal" (in any case) becomes an unpaid 30 minute meal
/// break; anything else becomes a paid 10 minute rest break. Prefer
/// [`break_events_from_requirements`] whenever structured requirements are
/// available. Returns `None` if a due time falls outside the representable
/// range.
pub fn break_events_from_recommendations(
    employee_id: &str,
    start: DateTime<Utc>,
    recommendations: &[String],
    spacing: Duration,
) -> Option<Vec<BreakEvent>> {
    let mut due = start;
    recommendations
        .iter()
        .map(|text| {
            due = due.checked_add_signed(spacing)?;
            let is_meal = text.to_lowercase().contains("meal");
            Some(BreakEvent {
                employee_id: employee_id.to_string(),
                kind: if is_meal { BreakType::Meal } else { BreakType::Rest },
                scheduled_time: due,
                duration: if is_meal {
                    FALLBACK_MEAL_DURATION_MINUTES
                } else {
                    FALLBACK_REST_DURATION_MINUTES
                },
                is_paid: !is_meal,
            })
        })
        .collect()
}
