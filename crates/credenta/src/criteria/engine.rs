//! Criteria evaluation — the pure gate in front of certificate issuance.
//!
//! Evaluation has no side effects and is deterministic for identical
//! inputs, so the orchestrator can re-run it freely on retries.

use super::types::{CompletionRecord, Criterion, CriterionDefinition};

/// Per-criterion diagnostic result.
#[derive(Debug, Clone)]
pub struct CriteriaReport {
    /// `true` when no required criterion failed.
    pub satisfied: bool,
    /// Human-readable description of each failed required criterion.
    pub failures: Vec<String>,
}

/// Evaluate one criterion against a completion snapshot.
fn criterion_met(criterion: &Criterion, data: &CompletionRecord) -> std::result::Result<(), String> {
    match criterion {
        Criterion::CompletionPercentage { min_percentage } => {
            if data.completion_percentage < *min_percentage {
                return Err(format!(
                    "completion {:.1}% below required {:.1}%",
                    data.completion_percentage, min_percentage
                ));
            }
        }
        Criterion::QuizScore { quiz_id, min_score } => match data.quiz_score(quiz_id) {
            None => return Err(format!("quiz {} not attempted", quiz_id)),
            Some(score) if score < *min_score => {
                return Err(format!(
                    "quiz {} scored {:.1}, required {:.1}",
                    quiz_id, score, min_score
                ));
            }
            Some(_) => {}
        },
        Criterion::AllLessons => {
            if data.lessons_completed < data.total_lessons {
                return Err(format!(
                    "{} of {} lessons completed",
                    data.lessons_completed, data.total_lessons
                ));
            }
        }
    }
    Ok(())
}

/// Check every criterion and collect failures for required ones.
///
/// Optional criteria are evaluated for the debug log but never contribute
/// to `failures` or flip `satisfied`.
pub fn check(criteria: &[CriterionDefinition], data: &CompletionRecord) -> CriteriaReport {
    let mut failures = Vec::new();

    for def in criteria {
        match criterion_met(&def.criterion, data) {
            Ok(()) => {}
            Err(reason) if def.required => failures.push(reason),
            Err(reason) => {
                log::debug!(
                    "optional criterion {} not met for learner {}: {}",
                    def.criterion.as_str(),
                    data.learner_id,
                    reason
                );
            }
        }
    }

    CriteriaReport {
        satisfied: failures.is_empty(),
        failures,
    }
}

/// Return `true` only if no required criterion failed.
pub fn evaluate(criteria: &[CriterionDefinition], data: &CompletionRecord) -> bool {
    check(criteria, data).satisfied
}
