//! Batch compliance evaluation.

use std::sync::Arc;

use tracing::info;

use crate::error::EngineResult;
use crate::models::{ComplianceResult, EvaluationMode, ScheduleInput};
use crate::rules::RuleRegistry;

/// Evaluates batches of shifts against a region's rules.
///
/// The service is a pure function of its input and the registry it was
/// built with: it keeps no state between calls.
///
/// # Example
///
/// ```
/// use break_compliance::compliance::ComplianceService;
/// use break_compliance::models::{ScheduleInput, Shift};
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap();
/// let input = ScheduleInput {
///     region: "CA".to_string(),
///     shifts: vec![Shift::planned("shift1", "emp1", start, 8).unwrap()],
/// };
///
/// let results = ComplianceService::default().check_compliance(&input).unwrap();
/// assert_eq!(results.len(), 1);
/// assert!(!results[0].is_compliant);
/// ```
#[derive(Debug, Clone)]
pub struct ComplianceService {
    registry: Arc<RuleRegistry>,
}

impl Default for ComplianceService {
    fn default() -> Self {
        Self::new(Arc::new(RuleRegistry::standard()))
    }
}

impl ComplianceService {
    /// Creates a service backed by the given registry.
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the registry used to resolve regions.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Audits every shift in `input` against the breaks actually taken.
    ///
    /// Fails with `UnsupportedRegion` before evaluating any shift when the
    /// region is unknown. Results are returned in input order.
    pub fn check_compliance(&self, input: &ScheduleInput) -> EngineResult<Vec<ComplianceResult>> {
        self.check_compliance_with_mode(input, EvaluationMode::Audit)
    }

    /// Evaluates every shift in `input` using the given mode.
    pub fn check_compliance_with_mode(
        &self,
        input: &ScheduleInput,
        mode: EvaluationMode,
    ) -> EngineResult<Vec<ComplianceResult>> {
        let rules = self.registry.resolve(&input.region)?;

        let results: Vec<ComplianceResult> = input
            .shifts
            .iter()
            .map(|shift| rules.check_compliance(shift, mode))
            .collect();

        info!(
            region = rules.code(),
            mode = ?mode,
            shifts_count = results.len(),
            non_compliant = results.iter().filter(|r| !r.is_compliant).count(),
            "Compliance check completed"
        );

        Ok(results)
    }
}
