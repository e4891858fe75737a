//! Configuration loading and management for the break compliance engine.
//!
//! This module provides functionality to load per-region break rules and
//! clock-in scheduler settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use break_compliance::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/breaks").unwrap();
//! println!("Break spacing: {}h", config.scheduler().break_spacing_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CaliforniaConfig, EngineConfig, NewYorkConfig, SchedulerConfig};
