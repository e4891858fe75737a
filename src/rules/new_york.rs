//! New York meal and rest break rules.
//!
//! A single unpaid meal break is owed once a shift runs longer than 6 hours.
//! Rest breaks follow the same every-4-hours pattern as California but are
//! 15 minutes long.

use crate::config::NewYorkConfig;

use super::{BreakRequirements, CategoryRequirement, RuleSet, rest_breaks_for};

/// New York break rules.
#[derive(Debug, Clone, Default)]
pub struct NewYorkRules {
    config: NewYorkConfig,
}

impl NewYorkRules {
    /// Creates New York rules with the given parameters.
    pub fn new(config: NewYorkConfig) -> Self {
        Self { config }
    }
}

impl RuleSet for NewYorkRules {
    fn code(&self) -> &'static str {
        "NY"
    }

    fn name(&self) -> &'static str {
        "New York"
    }

    fn requirements(&self, shift_hours: i64) -> BreakRequirements {
        let meals = u32::from(shift_hours > i64::from(self.config.meal_break_threshold_hours));

        BreakRequirements {
            meal: CategoryRequirement {
                count: meals,
                duration: self.config.meal_break_duration_minutes,
                is_paid: false,
            },
            rest: CategoryRequirement {
                count: rest_breaks_for(shift_hours, self.config.rest_break_interval_hours),
                duration: self.config.rest_break_duration_minutes,
                is_paid: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Break, BreakType, EvaluationMode, IssueSeverity, Shift};
    use chrono::{TimeZone, Utc};

    fn shift_of(hours: u32) -> Shift {
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap();
        Shift::planned("shift1", "emp1", start, hours).unwrap()
    }

    #[test]
    fn test_three_hour_shift_needs_nothing() {
        let result =
            NewYorkRules::default().check_compliance(&shift_of(3), EvaluationMode::Advisory);

        assert!(result.is_compliant);
        assert!(result.issues.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_meal_break_only_after_six_hours() {
        let rules = NewYorkRules::default();
        assert_eq!(rules.requirements(6).meal.count, 0);
        assert_eq!(rules.requirements(7).meal.count, 1);
        assert_eq!(rules.requirements(14).meal.count, 1);
    }

    #[test]
    fn test_rest_breaks_are_fifteen_minutes() {
        let requirements = NewYorkRules::default().requirements(8);
        assert_eq!(requirements.rest.count, 2);
        assert_eq!(requirements.rest.duration, 15);
    }

    #[test]
    fn test_eight_hour_shift_advisory_warnings() {
        let result =
            NewYorkRules::default().check_compliance(&shift_of(8), EvaluationMode::Advisory);

        assert!(result.is_compliant);
        assert_eq!(result.count_of(IssueSeverity::Warning), 2);
        assert_eq!(result.issues[0].regulation, "NY Meal Break Requirement");
        assert_eq!(result.issues[1].message, "Shift requires 2 rest break(s)");
        assert_eq!(
            result.recommendations,
            vec![
                "Schedule 1 meal break(s) of 30 minutes each".to_string(),
                "Schedule 2 rest break(s) of 15 minutes each".to_string(),
            ]
        );
    }

    #[test]
    fn test_ten_minute_rest_break_fails_audit() {
        let mut shift = shift_of(4);
        shift.breaks = vec![Break {
            kind: BreakType::Rest,
            duration: 10,
            is_paid: true,
            waived: None,
        }];

        let result = NewYorkRules::default().check_compliance(&shift, EvaluationMode::Audit);

        assert!(!result.is_compliant);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].regulation, "NY Rest Break Duration");
    }
}
