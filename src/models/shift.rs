//! Shift model and related types.
//!
//! This module defines the [`Shift`], [`TimeRange`] and [`Break`] types used
//! to describe a work shift and the breaks actually taken during it.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of break a regulation requires or an employee took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    /// An unpaid meal break.
    Meal,
    /// A short, usually paid, rest break.
    Rest,
}

impl BreakType {
    /// Returns the lowercase name used in messages ("meal" or "rest").
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakType::Meal => "meal",
            BreakType::Rest => "rest",
        }
    }

    /// Returns the capitalized name used in titles ("Meal" or "Rest").
    pub fn title(&self) -> &'static str {
        match self {
            BreakType::Meal => "Meal",
            BreakType::Rest => "Rest",
        }
    }
}

impl std::fmt::Display for BreakType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-open span of time between two UTC instants.
///
/// # Example
///
/// ```
/// use break_compliance::models::TimeRange;
/// use chrono::{TimeZone, Utc};
///
/// let range = TimeRange::new(
///     Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 3, 20, 13, 59, 0).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(range.whole_hours(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// The start of the range.
    pub start: DateTime<Utc>,
    /// The end of the range.
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a range, rejecting ranges whose end is not after their start.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> EngineResult<Self> {
        if end <= start {
            return Err(EngineError::MalformedInput {
                message: format!("time range end {} is not after start {}", end, start),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns the length of the range.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the length of the range in whole hours, truncating any
    /// fractional hour.
    pub fn whole_hours(&self) -> i64 {
        self.duration().num_hours()
    }
}

/// A break recorded as taken during a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Break {
    /// Whether this was a meal or rest break.
    #[serde(rename = "type")]
    pub kind: BreakType,
    /// Length of the break in minutes.
    pub duration: u32,
    /// Whether the break is paid (true) or unpaid (false).
    pub is_paid: bool,
    /// Whether the employee waived this break.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waived: Option<bool>,
}

impl Break {
    /// Returns true if the employee waived this break.
    pub fn is_waived(&self) -> bool {
        self.waived.unwrap_or(false)
    }
}

/// A work shift with its time range and the breaks actually taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// When the shift starts and ends.
    pub time_range: TimeRange,
    /// Breaks taken during the shift.
    #[serde(default)]
    pub breaks: Vec<Break>,
}

impl Shift {
    /// Builds a shift with no recorded breaks that spans `hours` from `start`.
    ///
    /// The shift date is the UTC calendar date of `start`.
    pub fn planned(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        start: DateTime<Utc>,
        hours: u32,
    ) -> EngineResult<Self> {
        let id = id.into();
        let end = start
            .checked_add_signed(Duration::hours(i64::from(hours)))
            .ok_or_else(|| EngineError::InvalidShift {
                shift_id: id.clone(),
                message: format!("a {} hour shift starting at {} ends out of range", hours, start),
            })?;
        let time_range = TimeRange::new(start, end).map_err(|_| EngineError::InvalidShift {
            shift_id: id.clone(),
            message: format!("a planned shift must span at least one hour, got {}", hours),
        })?;

        Ok(Self {
            id,
            employee_id: employee_id.into(),
            date: start.date_naive(),
            time_range,
            breaks: Vec::new(),
        })
    }

    /// Returns the shift length in whole hours, truncated.
    pub fn duration_hours(&self) -> i64 {
        self.time_range.whole_hours()
    }

    /// Returns the breaks of the given kind that were taken.
    pub fn breaks_of(&self, kind: BreakType) -> impl Iterator<Item = &Break> {
        self.breaks.iter().filter(move |b| b.kind == kind)
    }
}
