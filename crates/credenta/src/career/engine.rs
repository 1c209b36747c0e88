//! Career path evaluation after a course award.
//!
//! Only the paths containing the completed course are visited (via the
//! catalog's index). Issuance ordering matches the course level: career
//! certificate strictly before career badge.

use std::collections::BTreeSet;

use crate::badge::{Badge, BadgeIssuer};
use crate::catalog::CredentialCatalog;
use crate::certificate::{Certificate, CertificateIssuer};
use crate::entity::{CareerPathId, CourseId, EntityId, LearnerId};
use crate::error::Result;
use crate::storage::{BadgeRepository, CertificateRepository, VerificationRepository};

use super::types::qualifies;

/// One career credential awarded during an evaluation pass.
#[derive(Debug, Clone)]
pub struct CareerAward {
    pub path_id: CareerPathId,
    pub certificate: Certificate,
    pub badge: Option<Badge>,
}

/// Evaluates career paths against a learner's certified courses and issues
/// career credentials for newly qualifying paths.
pub struct CareerPathEngine<'a> {
    catalog: &'a CredentialCatalog,
    certificates: &'a dyn CertificateRepository,
    badges: &'a dyn BadgeRepository,
    verifications: &'a dyn VerificationRepository,
}

impl<'a> CareerPathEngine<'a> {
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

    /// Re-evaluate every career path affected by a completion of `course`.
    ///
    /// A path is skipped when it is inactive, when the learner already
    /// holds its career certificate, or when its requirements are not yet
    /// met. Each qualifying path is awarded a certificate (with the
    /// course-badge evidence snapshot) and then its badge, in that order.
    pub fn evaluate_for_course(
        &self,
        learner: &LearnerId,
        course: &CourseId,
        recipient_name: &str,
    ) -> Result<Vec<CareerAward>> {
        let mut awards = Vec::new();

        for path_id in self.catalog.index().paths_for_course(course) {
            let path = match self.catalog.career_path(path_id) {
                Some(p) if p.active => p,
                _ => continue,
            };
            let career_entity = EntityId::Career(path.id.clone());

            // Idempotency: the learner can earn a path at most once.
            if self.certificates.find_for(learner, &career_entity)?.is_some() {
                log::debug!("learner {learner} already holds career path {path_id}, skipping");
                continue;
            }

            let certified = self.certified_courses(learner)?;
            if !qualifies(path, &certified) {
                log::debug!(
                    "learner {learner} does not yet qualify for career path {path_id} \
                     ({} of {} required courses certified)",
                    path.required_courses().filter(|c| certified.contains(*c)).count(),
                    path.required_courses().count()
                );
                continue;
            }

            let definition = match self.catalog.active_certificate_definition(&career_entity) {
                Some(d) => d,
                None => {
                    // The catalog validates this at load; tolerate it anyway.
                    log::warn!(
                        "career path {path_id} qualifies but has no active certificate definition"
                    );
                    continue;
                }
            };

            let evidence = self.course_badge_evidence(learner, path_id)?;

            let certificate = CertificateIssuer::new(self.certificates, self.verifications)
                .issue(learner, recipient_name, definition, evidence)?
                .into_inner();

            let badge = BadgeIssuer::new(self.badges, self.verifications)
                .issue(
                    learner,
                    &career_entity,
                    &certificate.id,
                    recipient_name,
                    &definition.issuer_name,
                    self.catalog.active_badge_definition(&career_entity),
                )?
                .map(|outcome| outcome.into_inner());

            log::info!("awarded career path {path_id} to {learner}");
            awards.push(CareerAward {
                path_id: path.id.clone(),
                certificate,
                badge,
            });
        }

        Ok(awards)
    }

    /// Courses the learner holds an ACTIVE certificate for.
    fn certified_courses(&self, learner: &LearnerId) -> Result<BTreeSet<CourseId>> {
        Ok(self
            .certificates
            .list_for_learner(learner)?
            .into_iter()
            .filter(|c| c.status.is_active())
            .filter_map(|c| match c.entity {
                EntityId::Course(course_id) => Some(course_id),
                EntityId::Career(_) => None,
            })
            .collect())
    }

    /// Active course badges the learner holds for the path's member
    /// courses, snapshotted as issuance evidence.
    fn course_badge_evidence(
        &self,
        learner: &LearnerId,
        path_id: &CareerPathId,
    ) -> Result<Vec<crate::badge::BadgeId>> {
        let path = match self.catalog.career_path(path_id) {
            Some(p) => p,
            None => return Ok(Vec::new()),
        };
        Ok(self
            .badges
            .list_for_learner(learner)?
            .into_iter()
            .filter(|b| b.status.is_active())
            .filter(|b| match &b.entity {
                EntityId::Course(course_id) => path.contains_course(course_id),
                EntityId::Career(_) => false,
            })
            .map(|b| b.id)
            .collect())
    }
}
