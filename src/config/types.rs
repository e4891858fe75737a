//! Configuration types for break compliance.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every structure defaults
//! to the reference values so a partial file only overrides what it names.

use serde::{Deserialize, Serialize};

/// Settings for the live clock-in scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Length of the planned shift created at clock-in, in hours.
    pub shift_window_hours: u32,
    /// Gap between consecutive scheduled breaks, in hours.
    pub break_spacing_hours: u32,
    /// How long alerts ask to stay on screen, in seconds.
    pub alert_display_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            shift_window_hours: 8,
            break_spacing_hours: 2,
            alert_display_seconds: 10,
        }
    }
}

/// California meal and rest break parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaliforniaConfig {
    /// Shifts longer than this many hours need one meal break.
    pub meal_break_threshold_hours: u32,
    /// Shifts longer than this many hours need a second meal break.
    pub second_meal_break_threshold_hours: u32,
    /// One rest break is owed per this many hours worked.
    pub rest_break_interval_hours: u32,
    /// Minimum meal break length in minutes.
    pub meal_break_duration_minutes: u32,
    /// Minimum rest break length in minutes.
    pub rest_break_duration_minutes: u32,
}

impl Default for CaliforniaConfig {
    fn default() -> Self {
        Self {
            meal_break_threshold_hours: 5,
            second_meal_break_threshold_hours: 10,
            rest_break_interval_hours: 4,
            meal_break_duration_minutes: 30,
            rest_break_duration_minutes: 10,
        }
    }
}

/// New York meal and rest break parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewYorkConfig {
    /// Shifts longer than this many hours need a meal break.
    pub meal_break_threshold_hours: u32,
    /// One rest break is owed per this many hours worked.
    pub rest_break_interval_hours: u32,
    /// Minimum meal break length in minutes.
    pub meal_break_duration_minutes: u32,
    /// Minimum rest break length in minutes.
    pub rest_break_duration_minutes: u32,
}

impl Default for NewYorkConfig {
    fn default() -> Self {
        Self {
            meal_break_threshold_hours: 6,
            rest_break_interval_hours: 4,
            meal_break_duration_minutes: 30,
            rest_break_duration_minutes: 15,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    scheduler: SchedulerConfig,
    california: CaliforniaConfig,
    new_york: NewYorkConfig,
}

impl EngineConfig {
    /// Creates a new configuration from its parts.
    pub fn new(
        scheduler: SchedulerConfig,
        california: CaliforniaConfig,
        new_york: NewYorkConfig,
    ) -> Self {
        Self {
            scheduler,
            california,
            new_york,
        }
    }

    /// Returns the clock-in scheduler settings.
    pub fn scheduler(&self) -> &SchedulerConfig {
        &self.scheduler
    }

    /// Returns the California rule parameters.
    pub fn california(&self) -> &CaliforniaConfig {
        &self.california
    }

    /// Returns the New York rule parameters.
    pub fn new_york(&self) -> &NewYorkConfig {
        &self.new_york
    }
}
