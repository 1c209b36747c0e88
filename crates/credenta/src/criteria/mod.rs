//! Issuance criteria — typed rules gating certificate issuance.
//!
//! - [`types`] — the closed [`Criterion`] enum, [`CriterionDefinition`],
//!   and the [`CompletionRecord`] input snapshot.
//! - [`engine`] — pure evaluation: [`evaluate`] for the boolean gate,
//!   [`check`] for a per-criterion diagnostic report.

pub mod engine;
pub mod types;

pub use engine::{check, evaluate, CriteriaReport};
pub use types::{CompletionRecord, Criterion, CriterionDefinition, QuizId, QuizScore};
