//! Core data models for the break compliance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod compliance;
mod events;
mod shift;

pub use compliance::{
    ComplianceIssue, ComplianceResult, EvaluationMode, IssueSeverity, RequiredBreak,
    ScheduleInput,
};
pub use events::{BreakEvent, ClockInEvent, EmployeeShiftStatus};
pub use shift::{Break, BreakType, Shift, TimeRange};
