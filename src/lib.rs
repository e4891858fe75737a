//! Labor break compliance engine.
//!
//! This crate evaluates work shifts against jurisdiction-specific meal and
//! rest break regulations and drives a per-employee break scheduling
//! lifecycle: clock-in, timed break reminders, live status for observers,
//! and clock-out.

#![warn(missing_docs)]

pub mod compliance;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod rules;
pub mod scheduling;
