//! Data structures for certificates.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::badge::BadgeId;
use crate::criteria::CriterionDefinition;
use crate::entity::{CredentialStatus, DefinitionId, EntityId, LearnerId};

/// Generate a prefixed identifier from 16 bytes of OS entropy.
///
/// 128 bits keeps the collision probability negligible across the combined
/// certificate and badge code space.
pub(crate) fn random_token(prefix: &str) -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{prefix}_{}", bs58::encode(&bytes).into_string())
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Unique identifier for a certificate.
///
/// Format: `cert_` + base58 of 16 random bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateId(pub String);

impl CertificateId {
    /// Generate a fresh random certificate ID.
    pub fn generate() -> Self {
        Self(random_token("cert"))
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public verification code, the primary key of the verification registry.
///
/// Format: `vrf_` + base58 of 16 random bytes. Globally unique across the
/// course and career namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationCode(pub String);

impl VerificationCode {
    /// Generate a fresh random verification code.
    pub fn generate() -> Self {
        Self(random_token("vrf"))
    }
}

impl std::fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Certificate definition
// ---------------------------------------------------------------------------

/// Configured template for certificates of one course or career path.
///
/// Authored by an external admin surface and consumed here read-only via
/// the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateDefinition {
    pub id: DefinitionId,
    /// Owning course or career path.
    pub entity: EntityId,
    /// Ordered issuance criteria.
    pub criteria: Vec<CriterionDefinition>,
    pub issuer_name: String,
    pub issuer_title: String,
    /// Calendar months until expiry, or `None` for a non-expiring credential.
    pub expiry_months: Option<u32>,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Certificate
// ---------------------------------------------------------------------------

/// An issued certificate.
///
/// Created once, mutated only by revocation, never deleted. `expires_at`
/// is computed at issuance and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,
    pub learner_id: LearnerId,
    pub entity: EntityId,
    pub definition_id: DefinitionId,
    pub verification_code: VerificationCode,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: CredentialStatus,
    /// For career certificates: the course badges that satisfied the path's
    /// requirements at issuance time. Immutable audit snapshot; empty for
    /// course certificates.
    pub evidence: Vec<BadgeId>,
}

impl Certificate {
    /// `true` when `at` is past the stored expiry timestamp.
    ///
    /// Never expires when `expires_at` is `None`. Expiry is a read-time
    /// predicate, not a status transition.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expiry) if at > expiry)
    }
}
