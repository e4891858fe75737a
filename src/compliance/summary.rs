//! Roll-up of a batch of compliance results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ComplianceResult, IssueSeverity};

/// Aggregate view over a batch of results, grouped by employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    /// True when every result in the batch is compliant.
    pub all_compliant: bool,
    /// Total error issues across the batch.
    pub error_count: usize,
    /// Total warning issues across the batch.
    pub warning_count: usize,
    /// Results keyed by employee id, each list in batch order.
    pub by_employee: BTreeMap<String, Vec<ComplianceResult>>,
}

/// Summarizes a batch of results.
///
/// An empty batch is reported as compliant.
pub fn summarize(results: &[ComplianceResult]) -> ComplianceSummary {
    let mut by_employee: BTreeMap<String, Vec<ComplianceResult>> = BTreeMap::new();
    for result in results {
        by_employee
            .entry(result.employee_id.clone())
            .or_default()
            .push(result.clone());
    }

    ComplianceSummary {
        all_compliant: results.iter().all(|r| r.is_compliant),
        error_count: results.iter().map(|r| r.count_of(IssueSeverity::Error)).sum(),
        warning_count: results.iter().map(|r| r.count_of(IssueSeverity::Warning)).sum(),
        by_employee,
    }
}
