//! Orchestrator — the single entry point for one completion event.
//!
//! - [`types`] — per-stage outcome types ([`CertificateStage`],
//!   [`BadgeStage`], [`CompletionOutcome`]).
//! - [`engine`] — the issuance pipeline: course criteria → course
//!   certificate → course badge → career evaluation.

pub mod engine;
pub mod types;

pub use engine::Orchestrator;
pub use types::{BadgeStage, CertificateStage, CompletionOutcome};
