//! Jurisdiction rule sets for meal and rest break compliance.
//!
//! Each region implements [`RuleSet`] by reporting how many meal and rest
//! breaks a shift of a given length needs. Judging a shift against those
//! requirements is shared by every region and controlled by
//! [`EvaluationMode`], so adding a region means adding one new type and
//! registering it with the [`RuleRegistry`].

mod california;
mod evaluation;
mod new_york;
mod registry;

use std::fmt::Debug;

use crate::models::{BreakType, ComplianceResult, EvaluationMode, RequiredBreak, Shift};

pub use california::CaliforniaRules;
pub use new_york::NewYorkRules;
pub use registry::RuleRegistry;

/// What one category of break requires for a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRequirement {
    /// Number of breaks owed.
    pub count: u32,
    /// Minimum length of each break in minutes.
    pub duration: u32,
    /// Whether these breaks are paid time.
    pub is_paid: bool,
}

/// Meal and rest requirements for a shift of a particular length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakRequirements {
    /// Meal break requirement.
    pub meal: CategoryRequirement,
    /// Rest break requirement.
    pub rest: CategoryRequirement,
}

impl BreakRequirements {
    /// Returns the requirement for one kind of break.
    pub fn for_kind(&self, kind: BreakType) -> &CategoryRequirement {
        match kind {
            BreakType::Meal => &self.meal,
            BreakType::Rest => &self.rest,
        }
    }

    /// Lists every required break individually, meals first.
    pub fn expand(&self) -> Vec<RequiredBreak> {
        [BreakType::Meal, BreakType::Rest]
            .into_iter()
            .flat_map(|kind| {
                let req = *self.for_kind(kind);
                (0..req.count).map(move |_| RequiredBreak {
                    kind,
                    duration: req.duration,
                    is_paid: req.is_paid,
                })
            })
            .collect()
    }
}

/// Number of rest breaks owed: one per full `interval_hours` worked.
pub(crate) fn rest_breaks_for(shift_hours: i64, interval_hours: u32) -> u32 {
    if shift_hours <= 0 || interval_hours == 0 {
        return 0;
    }
    u32::try_from(shift_hours / i64::from(interval_hours)).unwrap_or(u32::MAX)
}

/// A region's break regulations.
pub trait RuleSet: Debug + Send + Sync {
    /// Short region code, also used as the regulation label prefix (e.g. "CA").
    fn code(&self) -> &'static str;

    /// Full region name (e.g. "California").
    fn name(&self) -> &'static str;

    /// Break requirements for a shift lasting `shift_hours` whole hours.
    fn requirements(&self, shift_hours: i64) -> BreakRequirements;

    /// Evaluates a shift under this region's rules.
    ///
    /// # Example
    ///
    /// ```
    /// use break_compliance::models::{EvaluationMode, Shift};
    /// use break_compliance::rules::{CaliforniaRules, RuleSet};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap();
    /// let shift = Shift::planned("shift1", "emp1", start, 8).unwrap();
    ///
    /// let result = CaliforniaRules::default().check_compliance(&shift, EvaluationMode::Audit);
    /// assert!(!result.is_compliant);
    /// assert_eq!(result.issues.len(), 2);
    /// ```
    fn check_compliance(&self, shift: &Shift, mode: EvaluationMode) -> ComplianceResult {
        let requirements = self.requirements(shift.duration_hours());
        evaluation::evaluate(self.code(), shift, &requirements, mode)
    }
}
