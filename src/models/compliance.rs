//! Compliance evaluation models.
//!
//! This module contains the [`ComplianceResult`] produced for every evaluated
//! shift, the issues and structured break requirements it carries, and the
//! [`ScheduleInput`] batch request.

use serde::{Deserialize, Serialize};

use super::{BreakType, Shift};

/// How a rule set judges a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// Compare the breaks actually taken against the requirements.
    /// Shortfalls are errors and `is_compliant` reflects the outcome.
    #[default]
    Audit,
    /// Ignore breaks taken and only report what must be scheduled.
    /// Requirements are warnings and `is_compliant` is always true.
    Advisory,
}

/// Severity of a compliance issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// A requirement was not met.
    Error,
    /// A requirement exists and must be planned for.
    Warning,
}

/// A single finding against a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceIssue {
    /// How serious the finding is.
    #[serde(rename = "type")]
    pub severity: IssueSeverity,
    /// Human-readable description of the finding.
    pub message: String,
    /// The regulation the finding relates to (e.g. "CA Meal Break Requirement").
    pub regulation: String,
    /// The shift the finding was raised against.
    pub shift_id: String,
}

/// One break a regulation requires for a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredBreak {
    /// Meal or rest.
    #[serde(rename = "type")]
    pub kind: BreakType,
    /// Minimum length of the break in minutes.
    pub duration: u32,
    /// Whether the break is paid time.
    pub is_paid: bool,
}

/// The outcome of evaluating one shift under one rule set.
///
/// # Example
///
/// ```
/// use break_compliance::models::ComplianceResult;
///
/// let result = ComplianceResult::new("shift1", "emp1");
/// assert!(result.is_compliant);
/// assert!(result.issues.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    /// The evaluated shift.
    pub shift_id: String,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// Whether the shift satisfies every requirement.
    pub is_compliant: bool,
    /// Findings raised against the shift.
    pub issues: Vec<ComplianceIssue>,
    /// Human-readable scheduling instructions.
    pub recommendations: Vec<String>,
    /// Every required break, meals first, in scheduling order.
    #[serde(default)]
    pub required_breaks: Vec<RequiredBreak>,
}

impl ComplianceResult {
    /// Creates an empty, compliant result for a shift.
    pub fn new(shift_id: impl Into<String>, employee_id: impl Into<String>) -> Self {
        Self {
            shift_id: shift_id.into(),
            employee_id: employee_id.into(),
            is_compliant: true,
            issues: Vec::new(),
            recommendations: Vec::new(),
            required_breaks: Vec::new(),
        }
    }

    /// Returns the number of issues with the given severity.
    pub fn count_of(&self, severity: IssueSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Returns how many required breaks are of the given kind.
    pub fn required_count(&self, kind: BreakType) -> usize {
        self.required_breaks.iter().filter(|b| b.kind == kind).count()
    }
}

/// A batch evaluation request: one region and the shifts to check against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    /// Region code or full name (e.g. "CA" or "california").
    #[serde(alias = "state")]
    pub region: String,
    /// The shifts to evaluate, in the order results are returned.
    pub shifts: Vec<Shift>,
}
