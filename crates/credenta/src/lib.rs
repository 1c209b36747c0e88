//! Credenta — credentialing engine for learning platforms.
//!
//! Decides, from a learner's course-completion data, whether to award a
//! certificate and badge, and cascades that decision into multi-course
//! career-path credentials. Provides idempotent issuance, a public
//! verification registry with non-cascading revocation, and injected
//! repositories so every engine runs without a live database.
//!
//! Completion data comes from a progress-tracking collaborator;
//! configuration is authored externally and loaded read-only through
//! [`CredentialCatalog`].

pub mod badge;
pub mod career;
pub mod catalog;
pub mod certificate;
pub mod criteria;
pub mod entity;
pub mod error;
pub mod index;
pub mod orchestrator;
pub mod storage;
pub mod time;
pub mod verification;

// Re-export primary types
pub use error::{CredentialError, Result};

pub use entity::{
    CareerPathId, CourseId, CredentialStatus, DefinitionId, EntityId, EntityKind, LearnerId,
};

pub use badge::{Badge, BadgeDefinition, BadgeId, BadgeIssuer};
pub use certificate::{
    Certificate, CertificateDefinition, CertificateId, CertificateIssuer, VerificationCode,
};
pub use criteria::{CompletionRecord, Criterion, CriterionDefinition, QuizId, QuizScore};

pub use career::{CareerAward, CareerPath, CareerPathEngine, CourseMembership, Requirement};
pub use catalog::CredentialCatalog;
pub use index::CareerPathIndex;

pub use orchestrator::{BadgeStage, CertificateStage, CompletionOutcome, Orchestrator};
pub use storage::{
    BadgeRepository, CertificateRepository, InsertOutcome, JsonStore, MemoryStore,
    VerificationRepository,
};
pub use verification::{RevocationReason, VerificationRecord, VerificationRegistry};
