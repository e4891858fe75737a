//! Request types for schedule input.
//!
//! This module defines the JSON shape callers submit for a batch compliance
//! check and converts it into validated domain types. Anything that does
//! not parse, or a shift whose end is not after its start, is reported as
//! [`EngineError::MalformedInput`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Break, ScheduleInput, Shift, TimeRange};

/// Request body for a batch compliance check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Region code or full name.
    #[serde(alias = "state")]
    pub region: String,
    /// The shifts to check.
    #[serde(default)]
    pub shifts: Vec<ShiftRequest>,
}

/// Shift information in a schedule request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRequest {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The shift date as `YYYY-MM-DD`.
    pub date: String,
    /// When the shift starts and ends.
    pub time_range: TimeRangeRequest,
    /// Breaks taken during the shift.
    #[serde(default)]
    pub breaks: Vec<Break>,
}

/// Start and end timestamps as ISO-8601 strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRangeRequest {
    /// Shift start.
    pub start: String,
    /// Shift end.
    pub end: String,
}

/// Parses and validates a JSON schedule request.
///
/// # Example
///
/// ```
/// use break_compliance::input::parse_schedule_input;
///
/// let input = parse_schedule_input(r#"{
///     "state": "CA",
///     "shifts": [{
///         "id": "shift1",
///         "employeeId": "emp1",
///         "date": "2024-03-20",
///         "timeRange": { "start": "2024-03-20T09:00:00Z", "end": "2024-03-20T17:00:00Z" },
///         "breaks": [{ "type": "meal", "duration": 30, "isPaid": false }]
///     }]
/// }"#).unwrap();
///
/// assert_eq!(input.region, "CA");
/// assert_eq!(input.shifts[0].duration_hours(), 8);
/// ```
pub fn parse_schedule_input(json: &str) -> EngineResult<ScheduleInput> {
    let request: ScheduleRequest =
        serde_json::from_str(json).map_err(|e| EngineError::MalformedInput {
            message: e.to_string(),
        })?;
    request.into_input()
}

impl ScheduleRequest {
    /// Validates the request and converts it into a [`ScheduleInput`].
    pub fn into_input(self) -> EngineResult<ScheduleInput> {
        let shifts = self
            .shifts
            .into_iter()
            .enumerate()
            .map(|(index, shift)| shift.into_shift(index))
            .collect::<EngineResult<Vec<Shift>>>()?;

        Ok(ScheduleInput {
            region: self.region,
            shifts,
        })
    }
}

impl ShiftRequest {
    fn into_shift(self, index: usize) -> EngineResult<Shift> {
        let field = |name: &str| format!("shifts[{}].{}", index, name);

        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            EngineError::MalformedInput {
                message: format!("{}: expected YYYY-MM-DD, got '{}'", field("date"), self.date),
            }
        })?;
        let start = parse_timestamp(&self.time_range.start, &field("timeRange.start"))?;
        let end = parse_timestamp(&self.time_range.end, &field("timeRange.end"))?;
        let time_range = TimeRange::new(start, end).map_err(|e| EngineError::MalformedInput {
            message: format!("{}: {}", field("timeRange"), e),
        })?;

        Ok(Shift {
            id: self.id,
            employee_id: self.employee_id,
            date,
            time_range,
            breaks: self.breaks,
        })
    }
}

/// Parses an RFC 3339 timestamp, or a timestamp without offset taken as UTC.
fn parse_timestamp(value: &str, field: &str) -> EngineResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| EngineError::MalformedInput {
            message: format!("{}: invalid ISO-8601 timestamp '{}'", field, value),
        })
}
