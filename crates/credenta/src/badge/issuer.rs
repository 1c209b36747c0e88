//! Badge issuance — strictly after the certificate.
//!
//! The caller guarantees `certificate_id` refers to an existing
//! certificate; ordering is enforced by the orchestrator, not re-verified
//! here. No badge configured for an entity is a normal outcome, not an
//! error.

use crate::certificate::{CertificateId, VerificationCode};
use crate::entity::{CredentialStatus, EntityId, LearnerId};
use crate::error::Result;
use crate::storage::{BadgeRepository, InsertOutcome, VerificationRepository};
use crate::verification::VerificationRecord;

use super::types::{Badge, BadgeDefinition, BadgeId};

/// Issues badges and their verification records through injected
/// repositories.
pub struct BadgeIssuer<'a> {
    badges: &'a dyn BadgeRepository,
    verifications: &'a dyn VerificationRepository,
}

impl<'a> BadgeIssuer<'a> {
    pub fn new(
        badges: &'a dyn BadgeRepository,
        verifications: &'a dyn VerificationRepository,
    ) -> Self {
        Self {
            badges,
            verifications,
        }
    }

    /// Issue a badge for `learner` on `entity`, referencing the already
    /// issued certificate.
    ///
    /// Returns `Ok(None)` when no active badge definition is configured.
    /// Carries its own (learner, entity) idempotency check so a repeated
    /// call returns the existing badge instead of duplicating it, even if
    /// the certificate-level short-circuit was bypassed. Every returned
    /// badge has its verification record confirmed, re-created when a
    /// prior invocation failed between the badge and record writes.
    pub fn issue(
        &self,
        learner: &LearnerId,
        entity: &EntityId,
        certificate_id: &CertificateId,
        recipient_name: &str,
        issuer_name: &str,
        definition: Option<&BadgeDefinition>,
    ) -> Result<Option<InsertOutcome<Badge>>> {
        let definition = match definition.filter(|d| d.active) {
            Some(d) => d,
            None => {
                log::debug!("no active badge definition for {entity}, nothing to issue");
                return Ok(None);
            }
        };

        if let Some(existing) = self.badges.find_for(learner, entity)? {
            log::debug!(
                "badge for ({learner}, {entity}) already held: {}",
                existing.id
            );
            self.ensure_record(&existing, recipient_name, issuer_name)?;
            return Ok(Some(InsertOutcome::Existing(existing)));
        }

        let badge = Badge {
            id: BadgeId::generate(),
            learner_id: learner.clone(),
            entity: entity.clone(),
            definition_id: definition.id.clone(),
            certificate_id: certificate_id.clone(),
            verification_code: VerificationCode::generate(),
            issued_at: crate::time::now(),
            status: CredentialStatus::Active,
        };

        match self.badges.insert_if_absent(badge)? {
            InsertOutcome::Inserted(badge) => {
                self.ensure_record(&badge, recipient_name, issuer_name)?;
                log::info!("issued badge {} to {learner} for {}", badge.id, badge.entity);
                Ok(Some(InsertOutcome::Inserted(badge)))
            }
            InsertOutcome::Existing(existing) => {
                // Lost the insert race; the winner may not have written the
                // record yet.
                self.ensure_record(&existing, recipient_name, issuer_name)?;
                Ok(Some(InsertOutcome::Existing(existing)))
            }
        }
    }

    /// Make sure the badge's verification record exists, re-creating it
    /// when a prior invocation failed between the badge and record writes.
    fn ensure_record(
        &self,
        badge: &Badge,
        recipient_name: &str,
        issuer_name: &str,
    ) -> Result<()> {
        if self.verifications.get(&badge.verification_code)?.is_some() {
            return Ok(());
        }

        log::debug!(
            "verification record for badge {} missing, creating",
            badge.id
        );
        match self.verifications.create(VerificationRecord {
            code: badge.verification_code.clone(),
            entity_kind: badge.entity.kind(),
            entity: badge.entity.clone(),
            recipient_name: recipient_name.to_string(),
            issuer_name: issuer_name.to_string(),
            issued_at: badge.issued_at,
            expires_at: None,
            status: CredentialStatus::Active,
        }) {
            Ok(()) => Ok(()),
            // Another writer created it between our check and the write.
            Err(crate::error::CredentialError::DuplicateCode(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
