//! Idempotent certificate issuance.
//!
//! Issuance never re-runs criteria: gating belongs to the orchestrator.
//! This module owns the (learner, entity) idempotency contract, the
//! verification-code generation, and the expiry computation.

use crate::entity::{CredentialStatus, LearnerId};
use crate::error::Result;
use crate::storage::{CertificateRepository, InsertOutcome, VerificationRepository};
use crate::verification::VerificationRecord;

use super::types::{Certificate, CertificateDefinition, CertificateId, VerificationCode};
use crate::badge::BadgeId;

/// Issues certificates and their verification records through injected
/// repositories.
pub struct CertificateIssuer<'a> {
    certificates: &'a dyn CertificateRepository,
    verifications: &'a dyn VerificationRepository,
}

impl<'a> CertificateIssuer<'a> {
    pub fn new(
        certificates: &'a dyn CertificateRepository,
        verifications: &'a dyn VerificationRepository,
    ) -> Self {
        Self {
            certificates,
            verifications,
        }
    }

    /// Issue a certificate for `learner` against `definition`, or return
    /// the one already held.
    ///
    /// The fast path is a (learner, entity) lookup: an existing row is
    /// returned unchanged. Otherwise a fresh certificate is written via the
    /// repository's atomic insert-if-absent; a lost race yields the
    /// winner's row. Every path confirms the verification record exists
    /// before returning and re-creates it when missing, so a certificate
    /// that failed between its two writes is healed by the retry instead
    /// of staying unverifiable.
    ///
    /// `evidence` is the immutable audit snapshot stored on career
    /// certificates; pass an empty vec for course certificates.
    ///
    /// # Errors
    ///
    /// Persistence failures propagate. A certificate is never reported
    /// issued or held unless its verification record exists.
    pub fn issue(
        &self,
        learner: &LearnerId,
        recipient_name: &str,
        definition: &CertificateDefinition,
        evidence: Vec<BadgeId>,
    ) -> Result<InsertOutcome<Certificate>> {
        if let Some(existing) = self.certificates.find_for(learner, &definition.entity)? {
            log::debug!(
                "certificate for ({learner}, {}) already held: {}",
                definition.entity,
                existing.id
            );
            self.ensure_record(&existing, recipient_name, &definition.issuer_name)?;
            return Ok(InsertOutcome::Existing(existing));
        }

        let issued_at = crate::time::now();
        let certificate = Certificate {
            id: CertificateId::generate(),
            learner_id: learner.clone(),
            entity: definition.entity.clone(),
            definition_id: definition.id.clone(),
            verification_code: VerificationCode::generate(),
            issued_at,
            expires_at: crate::time::expiry_from(issued_at, definition.expiry_months),
            status: CredentialStatus::Active,
            evidence,
        };

        match self.certificates.insert_if_absent(certificate)? {
            InsertOutcome::Inserted(certificate) => {
                self.ensure_record(&certificate, recipient_name, &definition.issuer_name)?;
                log::info!(
                    "issued certificate {} to {learner} for {}",
                    certificate.id,
                    certificate.entity
                );
                Ok(InsertOutcome::Inserted(certificate))
            }
            InsertOutcome::Existing(existing) => {
                // Lost the insert race; the winner may not have written the
                // record yet.
                self.ensure_record(&existing, recipient_name, &definition.issuer_name)?;
                Ok(InsertOutcome::Existing(existing))
            }
        }
    }

    /// Make sure the certificate's verification record exists.
    ///
    /// A prior invocation can fail between the certificate write and the
    /// record write; re-creating the record here makes the pair converge
    /// under retry. A concurrent writer landing the record first is fine.
    fn ensure_record(
        &self,
        certificate: &Certificate,
        recipient_name: &str,
        issuer_name: &str,
    ) -> Result<()> {
        if self
            .verifications
            .get(&certificate.verification_code)?
            .is_some()
        {
            return Ok(());
        }

        log::debug!(
            "verification record for certificate {} missing, creating",
            certificate.id
        );
        match self.verifications.create(VerificationRecord {
            code: certificate.verification_code.clone(),
            entity_kind: certificate.entity.kind(),
            entity: certificate.entity.clone(),
            recipient_name: recipient_name.to_string(),
            issuer_name: issuer_name.to_string(),
            issued_at: certificate.issued_at,
            expires_at: certificate.expires_at,
            status: CredentialStatus::Active,
        }) {
            Ok(()) => Ok(()),
            // Another writer created it between our check and the write.
            Err(crate::error::CredentialError::DuplicateCode(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
