//! Data structures for issuance criteria.

use serde::{Deserialize, Serialize};

use crate::entity::{CourseId, LearnerId};

// ---------------------------------------------------------------------------
// Quiz scores
// ---------------------------------------------------------------------------

/// Identifies a quiz within a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuizId(pub String);

impl QuizId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for QuizId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single quiz result inside a completion snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizScore {
    pub quiz_id: QuizId,
    /// Score as a percentage, 0.0–100.0.
    pub score: f32,
}

// ---------------------------------------------------------------------------
// Completion record
// ---------------------------------------------------------------------------

/// Snapshot of a learner's progress in one course.
///
/// Supplied by the progress-tracking collaborator, which owns how the
/// percentage and scores are computed. Never persisted by this subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub learner_id: LearnerId,
    pub course_id: CourseId,
    /// Overall completion as a percentage, 0.0–100.0.
    pub completion_percentage: f32,
    pub quiz_scores: Vec<QuizScore>,
    pub lessons_completed: u32,
    pub total_lessons: u32,
}

impl CompletionRecord {
    /// Look up the score for one quiz, if the learner attempted it.
    pub fn quiz_score(&self, quiz_id: &QuizId) -> Option<f32> {
        self.quiz_scores
            .iter()
            .find(|q| &q.quiz_id == quiz_id)
            .map(|q| q.score)
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// A typed issuance rule.
///
/// The enum is closed: configuration that does not map onto one of these
/// variants is rejected when the catalog loads, so evaluation never sees a
/// rule it does not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Criterion {
    /// Overall completion must reach `min_percentage`.
    CompletionPercentage { min_percentage: f32 },
    /// The named quiz must have been attempted and scored `min_score` or more.
    QuizScore { quiz_id: QuizId, min_score: f32 },
    /// Every lesson in the course must be completed.
    AllLessons,
}

impl Criterion {
    /// Return a stable string representation of the rule kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompletionPercentage { .. } => "completion_percentage",
            Self::QuizScore { .. } => "quiz_score",
            Self::AllLessons => "all_lessons",
        }
    }
}

/// One entry in a certificate definition's ordered criteria list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionDefinition {
    pub criterion: Criterion,
    /// Only required criteria gate issuance; optional ones are advisory.
    pub required: bool,
}

impl CriterionDefinition {
    /// A required criterion.
    pub fn required(criterion: Criterion) -> Self {
        Self {
            criterion,
            required: true,
        }
    }

    /// An advisory criterion that never blocks issuance.
    pub fn optional(criterion: Criterion) -> Self {
        Self {
            criterion,
            required: false,
        }
    }
}
