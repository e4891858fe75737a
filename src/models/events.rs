//! Live scheduling models.
//!
//! These types describe the clock-in lifecycle: the [`ClockInEvent`] that
//! starts it, the [`BreakEvent`]s scheduled for the shift and the
//! [`EmployeeShiftStatus`] kept while the employee is clocked in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BreakType;

/// A concrete, time-anchored break for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakEvent {
    /// The employee the break belongs to.
    pub employee_id: String,
    /// Meal or rest.
    #[serde(rename = "type")]
    pub kind: BreakType,
    /// When the break is due.
    pub scheduled_time: DateTime<Utc>,
    /// Length of the break in minutes.
    pub duration: u32,
    /// Whether the break is paid time.
    pub is_paid: bool,
}

/// An employee clocking in within a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInEvent {
    /// The employee clocking in.
    pub employee_id: String,
    /// When the employee clocked in.
    pub timestamp: DateTime<Utc>,
    /// Region code or full name whose rules apply.
    #[serde(alias = "state")]
    pub region: String,
}

impl ClockInEvent {
    /// Creates a clock-in event.
    pub fn new(
        employee_id: impl Into<String>,
        region: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            timestamp,
            region: region.into(),
        }
    }
}

/// The active shift record for a clocked-in employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeShiftStatus {
    /// The clocked-in employee.
    pub employee_id: String,
    /// Identifier of the planned shift created at clock-in.
    pub shift_id: String,
    /// When the employee clocked in.
    pub clock_in_time: DateTime<Utc>,
    /// Breaks scheduled for this shift.
    pub required_breaks: Vec<BreakEvent>,
    /// Breaks already taken.
    pub completed_breaks: Vec<BreakEvent>,
    /// The region supplied at clock-in.
    pub region: String,
}
