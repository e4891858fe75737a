//! California meal and rest break rules.
//!
//! A shift needs one meal break once it runs longer than 5 hours and a
//! second once it runs longer than 10. One paid rest break is owed for every
//! full 4 hours worked.

use crate::config::CaliforniaConfig;

use super::{BreakRequirements, CategoryRequirement, RuleSet, rest_breaks_for};

/// California break rules.
#[derive(Debug, Clone, Default)]
pub struct CaliforniaRules {
    config: CaliforniaConfig,
}

impl CaliforniaRules {
    /// Creates California rules with the given parameters.
    pub fn new(config: CaliforniaConfig) -> Self {
        Self { config }
    }

    /// Number of meal breaks owed for a shift of `shift_hours`.
    ///
    /// # Examples
    ///
    /// ```
    /// use break_compliance::rules::CaliforniaRules;
    ///
    /// let rules = CaliforniaRules::default();
    /// assert_eq!(rules.required_meal_breaks(5), 0);
    /// assert_eq!(rules.required_meal_breaks(6), 1);
    /// assert_eq!(rules.required_meal_breaks(10), 1);
    /// assert_eq!(rules.required_meal_breaks(11), 2);
    /// ```
    pub fn required_meal_breaks(&self, shift_hours: i64) -> u32 {
        if shift_hours <= i64::from(self.config.meal_break_threshold_hours) {
            0
        } else if shift_hours <= i64::from(self.config.second_meal_break_threshold_hours) {
            1
        } else {
            2
        }
    }
}

impl RuleSet for CaliforniaRules {
    fn code(&self) -> &'static str {
        "CA"
    }

    fn name(&self) -> &'static str {
        "California"
    }

    fn requirements(&self, shift_hours: i64) -> BreakRequirements {
        BreakRequirements {
            meal: CategoryRequirement {
                count: self.required_meal_breaks(shift_hours),
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
