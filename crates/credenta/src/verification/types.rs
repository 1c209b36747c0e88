//! Data structures for public verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::certificate::VerificationCode;
use crate::entity::{CredentialStatus, EntityId, EntityKind};

/// Read-optimized mirror of an issued credential, keyed by its public
/// verification code.
///
/// Written by the issuers at issuance time and updated only when the
/// underlying credential's status changes; never re-derived lazily. The
/// public lookup exposes `entity_kind` but not which underlying table the
/// record came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Primary key, globally unique across course and career namespaces.
    pub code: VerificationCode,
    pub entity_kind: EntityKind,
    pub entity: EntityId,
    /// Display name of the learner the credential was issued to.
    pub recipient_name: String,
    pub issuer_name: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: CredentialStatus,
}

impl VerificationRecord {
    /// `true` when `at` is past the stored expiry timestamp.
    ///
    /// A record without an expiry date never expires, regardless of
    /// elapsed time.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expiry) if at > expiry)
    }
}

/// Reason attached to an administrative revocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevocationReason {
    /// Credential awarded against policy (e.g. misconfigured criteria).
    IssuedInError,
    /// Academic-integrity finding against the learner.
    IntegrityViolation,
    /// Manual revocation by an administrator.
    ManualRevocation,
    /// Custom reason.
    Custom(String),
}

impl RevocationReason {
    /// Return a stable string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::IssuedInError => "issued_in_error",
            Self::IntegrityViolation => "integrity_violation",
            Self::ManualRevocation => "manual_revocation",
            Self::Custom(s) => s.as_str(),
        }
    }
}
