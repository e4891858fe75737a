//! Mode-aware evaluation shared by every rule set.

use crate::models::{
    BreakType, ComplianceIssue, ComplianceResult, EvaluationMode, IssueSeverity, Shift,
};

use super::BreakRequirements;

const KINDS: [BreakType; 2] = [BreakType::Meal, BreakType::Rest];

/// Judges `shift` against `requirements`, labelling regulations with `prefix`.
pub(crate) fn evaluate(
    prefix: &str,
    shift: &Shift,
    requirements: &BreakRequirements,
    mode: EvaluationMode,
) -> ComplianceResult {
    let mut result = ComplianceResult::new(&shift.id, &shift.employee_id);
    result.required_breaks = requirements.expand();

    match mode {
        EvaluationMode::Audit => audit(prefix, shift, requirements, &mut result),
        EvaluationMode::Advisory => advise(prefix, shift, requirements, &mut result),
    }

    result
}

fn audit(
    prefix: &str,
    shift: &Shift,
    requirements: &BreakRequirements,
    result: &mut ComplianceResult,
) {
    for kind in KINDS {
        let required = requirements.for_kind(kind).count;
        let taken = shift.breaks_of(kind).count();
        if taken < required as usize {
            result.issues.push(issue(
                IssueSeverity::Error,
                format!(
                    "Missing required {} break(s). Need {}, found {}",
                    kind, required, taken
                ),
                format!("{} {} Break Requirement", prefix, kind.title()),
                shift,
            ));
        }
    }

    // Waived breaks still count toward the requirement above.
    for kind in KINDS {
        let minimum = requirements.for_kind(kind).duration;
        let short_breaks = shift
            .breaks_of(kind)
            .filter(|b| !b.is_waived() && b.duration < minimum);
        for _ in short_breaks {
            result.issues.push(issue(
                IssueSeverity::Error,
                format!(
                    "{} break duration less than required {} minutes",
                    kind.title(),
                    minimum
                ),
                format!("{} {} Break Duration", prefix, kind.title()),
                shift,
            ));
        }
    }

    if !result.issues.is_empty() {
        push_recommendations(requirements, result);
    }
    result.is_compliant = result.issues.is_empty();
}

fn advise(
    prefix: &str,
    shift: &Shift,
    requirements: &BreakRequirements,
    result: &mut ComplianceResult,
) {
    for kind in KINDS {
        let required = requirements.for_kind(kind).count;
        if required > 0 {
            result.issues.push(issue(
                IssueSeverity::Warning,
                format!("Shift requires {} {} break(s)", required, kind),
                format!("{} {} Break Requirement", prefix, kind.title()),
                shift,
            ));
        }
    }

    push_recommendations(requirements, result);
    result.is_compliant = true;
}

fn push_recommendations(requirements: &BreakRequirements, result: &mut ComplianceResult) {
    for kind in KINDS {
        let req = requirements.for_kind(kind);
        if req.count > 0 {
            result.recommendations.push(format!(
                "Schedule {} {} break(s) of {} minutes each",
                req.count, kind, req.duration
            ));
        }
    }
}

fn issue(
    severity: IssueSeverity,
    message: String,
    regulation: String,
    shift: &Shift,
) -> ComplianceIssue {
    ComplianceIssue {
        severity,
        message,
        regulation,
        shift_id: shift.id.clone(),
    }
}
