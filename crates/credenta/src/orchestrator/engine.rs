//! The issuance pipeline for one completion event.
//!
//! Runs synchronously in the caller's thread: course criteria gate the
//! course certificate, the badge follows the certificate, and career paths
//! are re-evaluated last. Every stage is idempotent, so the caller may
//! retry the whole invocation after any failure; ordering within one
//! invocation is strict even under retries.

use crate::badge::BadgeIssuer;
use crate::career::CareerPathEngine;
use crate::catalog::CredentialCatalog;
use crate::certificate::CertificateIssuer;
use crate::criteria::{self, CompletionRecord};
use crate::entity::EntityId;
use crate::error::Result;
use crate::storage::{
    BadgeRepository, CertificateRepository, InsertOutcome, VerificationRepository,
};

use super::types::{BadgeStage, CertificateStage, CompletionOutcome};

/// Sequences criteria evaluation and issuance for completion events.
pub struct Orchestrator<'a> {
    catalog: &'a CredentialCatalog,
    certificates: &'a dyn CertificateRepository,
    badges: &'a dyn BadgeRepository,
    verifications: &'a dyn VerificationRepository,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        catalog: &'a CredentialCatalog,
        certificates: &'a dyn CertificateRepository,
        badges: &'a dyn BadgeRepository,
        verifications: &'a dyn VerificationRepository,
    ) -> Self {
        Self {
            catalog,
            certificates,
            badges,
            verifications,
        }
    }

    /// Process one completion event end to end.
    ///
    /// `recipient_name` is the learner's display name as it should appear
    /// on verification records; the calling collaborator owns it.
    ///
    /// Stage order is fixed: existing-certificate short-circuit, criteria
    /// gate, certificate, badge, career evaluation. When the learner
    /// already holds the course certificate the remaining stages are
    /// skipped — re-entry is prevented at the certificate level and again
    /// inside the badge issuer.
    pub fn process(
        &self,
        data: &CompletionRecord,
        recipient_name: &str,
    ) -> Result<CompletionOutcome> {
        let entity = EntityId::Course(data.course_id.clone());

        // Idempotency short-circuit before any evaluation work.
        if let Some(existing) = self.certificates.find_for(&data.learner_id, &entity)? {
            log::debug!(
                "learner {} already certified for {}, short-circuiting",
                data.learner_id,
                data.course_id
            );
            return Ok(CompletionOutcome {
                certificate: CertificateStage::AlreadyHeld(existing),
                badge: BadgeStage::Skipped,
                career_awards: Vec::new(),
            });
        }

        let definition = match self.catalog.active_certificate_definition(&entity) {
            Some(d) => d,
            None => {
                log::debug!("no active certificate definition for {}", data.course_id);
                return Ok(CompletionOutcome {
                    certificate: CertificateStage::NotConfigured,
                    badge: BadgeStage::Skipped,
                    career_awards: Vec::new(),
                });
            }
        };

        let report = criteria::check(&definition.criteria, data);
        if !report.satisfied {
            log::debug!(
                "criteria not met for learner {} on {}: {:?}",
                data.learner_id,
                data.course_id,
                report.failures
            );
            return Ok(CompletionOutcome {
                certificate: CertificateStage::CriteriaNotMet(report.failures),
                badge: BadgeStage::Skipped,
                career_awards: Vec::new(),
            });
        }

        // Certificate strictly before badge.
        let certificate_outcome = CertificateIssuer::new(self.certificates, self.verifications)
            .issue(&data.learner_id, recipient_name, definition, Vec::new())?;

        let badge_stage = match BadgeIssuer::new(self.badges, self.verifications).issue(
            &data.learner_id,
            &entity,
            &certificate_outcome.inner().id,
            recipient_name,
            &definition.issuer_name,
            self.catalog.active_badge_definition(&entity),
        )? {
            None => BadgeStage::NotConfigured,
            Some(InsertOutcome::Inserted(badge)) => BadgeStage::Issued(badge),
            Some(InsertOutcome::Existing(badge)) => BadgeStage::AlreadyHeld(badge),
        };

        // Career evaluation last, only for paths containing this course.
        let career_awards = CareerPathEngine::new(
            self.catalog,
            self.certificates,
            self.badges,
            self.verifications,
        )
        .evaluate_for_course(&data.learner_id, &data.course_id, recipient_name)?;

        let certificate_stage = match certificate_outcome {
            InsertOutcome::Inserted(c) => CertificateStage::Issued(c),
            InsertOutcome::Existing(c) => CertificateStage::AlreadyHeld(c),
        };

        Ok(CompletionOutcome {
            certificate: certificate_stage,
            badge: badge_stage,
            career_awards,
        })
    }
}
