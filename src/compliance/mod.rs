//! Compliance evaluation over batches of shifts.
//!
//! [`ComplianceService`] resolves a region through the
//! [`RuleRegistry`](crate::rules::RuleRegistry) and evaluates each shift in a
//! [`ScheduleInput`](crate::models::ScheduleInput); [`summarize`] rolls the
//! results up per employee.

mod service;
mod summary;

pub use service::ComplianceService;
pub use summary::{ComplianceSummary, summarize};
