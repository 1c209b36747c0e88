//! Verification registry — public lookup and administrative revocation.
//!
//! Revocation is one-directional and does not cascade: revoking a course
//! certificate leaves its badge and any career certificate built on top of
//! it untouched. That is documented policy, not an omission.

use crate::badge::BadgeId;
use crate::certificate::{CertificateId, VerificationCode};
use crate::entity::CredentialStatus;
use crate::error::{CredentialError, Result};
use crate::storage::{BadgeRepository, CertificateRepository, VerificationRepository};

use super::types::{RevocationReason, VerificationRecord};

/// Fronts the verification repository for public reads and coordinates the
/// credential + record status writes on revocation.
pub struct VerificationRegistry<'a> {
    certificates: &'a dyn CertificateRepository,
    badges: &'a dyn BadgeRepository,
    verifications: &'a dyn VerificationRepository,
}

impl<'a> VerificationRegistry<'a> {
    pub fn new(
        certificates: &'a dyn CertificateRepository,
        badges: &'a dyn BadgeRepository,
        verifications: &'a dyn VerificationRepository,
    ) -> Self {
        Self {
            certificates,
            badges,
            verifications,
        }
    }

    /// Write a verification record. Write-once per code.
    ///
    /// # Errors
    ///
    /// `CredentialError::DuplicateCode` when the code is taken.
    pub fn create_record(&self, record: VerificationRecord) -> Result<()> {
        self.verifications.create(record)
    }

    /// Public lookup by verification code.
    ///
    /// The record exposes the entity kind but nothing about which
    /// underlying table it mirrors. `Ok(None)` for unknown codes.
    pub fn verify_by_code(&self, code: &VerificationCode) -> Result<Option<VerificationRecord>> {
        self.verifications.get(code)
    }

    /// Revoke a certificate and mirror the status into its verification
    /// record.
    ///
    /// Terminal and idempotent: revoking an already revoked certificate is
    /// a no-op. Does not cascade to badges or career certificates.
    ///
    /// # Errors
    ///
    /// `CredentialError::NotFound` when the certificate does not exist;
    /// persistence failures propagate (the caller may retry, the writes
    /// converge).
    pub fn revoke_certificate(&self, id: &CertificateId, reason: RevocationReason) -> Result<()> {
        let certificate = self
            .certificates
            .get(id)?
            .ok_or_else(|| CredentialError::NotFound(format!("certificate {id}")))?;

        if certificate.status == CredentialStatus::Revoked {
            log::debug!("certificate {id} already revoked");
            return Ok(());
        }

        self.certificates.set_status(id, CredentialStatus::Revoked)?;
        self.verifications
            .set_status(&certificate.verification_code, CredentialStatus::Revoked)?;

        log::info!(
            "revoked certificate {id} ({}), reason: {}",
            certificate.entity,
            reason.as_str()
        );
        Ok(())
    }

    /// Revoke a badge and mirror the status into its verification record.
    ///
    /// Same contract as [`revoke_certificate`](Self::revoke_certificate);
    /// the badge's underlying certificate is not touched.
    pub fn revoke_badge(&self, id: &BadgeId, reason: RevocationReason) -> Result<()> {
        let badge = self
            .badges
            .get(id)?
            .ok_or_else(|| CredentialError::NotFound(format!("badge {id}")))?;

        if badge.status == CredentialStatus::Revoked {
            log::debug!("badge {id} already revoked");
            return Ok(());
        }

        self.badges.set_status(id, CredentialStatus::Revoked)?;
        self.verifications
            .set_status(&badge.verification_code, CredentialStatus::Revoked)?;

        log::info!(
            "revoked badge {id} ({}), reason: {}",
            badge.entity,
            reason.as_str()
        );
        Ok(())
    }
}
