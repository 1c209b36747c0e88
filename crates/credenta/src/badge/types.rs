//! Data structures for badges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::certificate::types::random_token;
use crate::certificate::{CertificateId, VerificationCode};
use crate::entity::{CredentialStatus, DefinitionId, EntityId, LearnerId};

/// Unique identifier for a badge.
///
/// Format: `badge_` + base58 of 16 random bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BadgeId(pub String);

impl BadgeId {
    /// Generate a fresh random badge ID.
    pub fn generate() -> Self {
        Self(random_token("badge"))
    }
}

impl std::fmt::Display for BadgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configured template for badges of one course or career path.
///
/// Not every certified entity has one; absence means no badge is awarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: DefinitionId,
    /// Owning course or career path.
    pub entity: EntityId,
    /// Display label, e.g. "Rust Fundamentals".
    pub label: String,
    pub active: bool,
}

/// An issued badge.
///
/// A badge never exists without its certificate: `certificate_id` is
/// mandatory and issuance is ordered strictly after certificate issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub learner_id: LearnerId,
    pub entity: EntityId,
    pub definition_id: DefinitionId,
    pub certificate_id: CertificateId,
    /// Public code in the same namespace as certificate codes.
    pub verification_code: VerificationCode,
    pub issued_at: DateTime<Utc>,
    pub status: CredentialStatus,
}
