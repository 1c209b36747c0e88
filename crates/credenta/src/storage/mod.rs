//! Storage layer — injected repositories for credentials and verification
//! records.
//!
//! The engines never touch a concrete store; they receive one repository
//! trait object per entity so they stay unit-testable without a live
//! backing store. The per-(learner, entity) uniqueness constraint lives in
//! the repository: [`insert_if_absent`](CertificateRepository::insert_if_absent)
//! is the sole concurrency-control mechanism, so idempotency holds across
//! process boundaries without application-level locks.
//!
//! # Implementations
//!
//! - [`MemoryStore`] — shared-lock in-memory maps; the default for tests
//!   and single-process embedding.
//! - [`JsonStore`] — versioned JSON documents under a directory tree, with
//!   `create_new` pair files as the cross-process uniqueness constraint.
//!
//! Revocation writes a credential row and its verification record as a
//! pair; both bundled stores back all three repositories with one store so
//! the pair of writes cannot interleave with another writer.

pub mod json_store;
pub mod memory;

pub use json_store::JsonStore;
pub use memory::MemoryStore;

use crate::badge::{Badge, BadgeId};
use crate::certificate::{Certificate, CertificateId, VerificationCode};
use crate::entity::{CredentialStatus, EntityId, LearnerId};
use crate::error::Result;
use crate::verification::VerificationRecord;

/// Result of an atomic insert-if-absent.
///
/// Concurrent double-invocation for the same key resolves here: the losing
/// writer receives `Existing` with the winner's row instead of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome<T> {
    /// The row was written by this call.
    Inserted(T),
    /// A row for the same key already existed; it is returned unchanged.
    Existing(T),
}

impl<T> InsertOutcome<T> {
    /// Unwrap to the stored row, whichever writer produced it.
    pub fn into_inner(self) -> T {
        match self {
            Self::Inserted(v) | Self::Existing(v) => v,
        }
    }

    /// Borrow the stored row.
    pub fn inner(&self) -> &T {
        match self {
            Self::Inserted(v) | Self::Existing(v) => v,
        }
    }

    /// `true` when this call performed the write.
    pub fn was_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Persistence seam for [`Certificate`] rows.
pub trait CertificateRepository {
    /// Insert `certificate` unless a row for the same (learner, entity)
    /// pair already exists; the existing row wins and is returned unchanged.
    fn insert_if_absent(&self, certificate: Certificate) -> Result<InsertOutcome<Certificate>>;

    /// Look up the certificate for a (learner, entity) pair, any status.
    fn find_for(&self, learner: &LearnerId, entity: &EntityId) -> Result<Option<Certificate>>;

    /// Look up a certificate by ID.
    fn get(&self, id: &CertificateId) -> Result<Option<Certificate>>;

    /// All certificates held by a learner, any status, unspecified order.
    fn list_for_learner(&self, learner: &LearnerId) -> Result<Vec<Certificate>>;

    /// Overwrite the status of an existing certificate.
    ///
    /// # Errors
    ///
    /// `CredentialError::NotFound` when no such certificate exists.
    fn set_status(&self, id: &CertificateId, status: CredentialStatus) -> Result<()>;
}

/// Persistence seam for [`Badge`] rows.
pub trait BadgeRepository {
    /// Insert `badge` unless a row for the same (learner, entity) pair
    /// already exists; the existing row wins and is returned unchanged.
    fn insert_if_absent(&self, badge: Badge) -> Result<InsertOutcome<Badge>>;

    /// Look up the badge for a (learner, entity) pair, any status.
    fn find_for(&self, learner: &LearnerId, entity: &EntityId) -> Result<Option<Badge>>;

    /// Look up a badge by ID.
    fn get(&self, id: &BadgeId) -> Result<Option<Badge>>;

    /// All badges held by a learner, any status, unspecified order.
    fn list_for_learner(&self, learner: &LearnerId) -> Result<Vec<Badge>>;

    /// Overwrite the status of an existing badge.
    ///
    /// # Errors
    ///
    /// `CredentialError::NotFound` when no such badge exists.
    fn set_status(&self, id: &BadgeId, status: CredentialStatus) -> Result<()>;
}

/// Persistence seam for [`VerificationRecord`] rows.
pub trait VerificationRepository {
    /// Write a record. Write-once per code.
    ///
    /// # Errors
    ///
    /// `CredentialError::DuplicateCode` when the code is already registered.
    fn create(&self, record: VerificationRecord) -> Result<()>;

    /// Public lookup by verification code.
    fn get(&self, code: &VerificationCode) -> Result<Option<VerificationRecord>>;

    /// Mirror a credential status change into the record for `code`.
    ///
    /// # Errors
    ///
    /// `CredentialError::NotFound` when no record exists for `code`.
    fn set_status(&self, code: &VerificationCode, status: CredentialStatus) -> Result<()>;
}
