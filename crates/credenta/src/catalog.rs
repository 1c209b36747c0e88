//! Credential catalog — validated, read-only configuration snapshot.
//!
//! Configuration is authored by an external admin surface; this subsystem
//! consumes it as data. Everything is validated here, at load time, so the
//! engines never meet a malformed rule: thresholds out of range, duplicate
//! active definitions, or career paths referencing unknown definitions are
//! rejected as [`CredentialError::InvalidConfiguration`] before any
//! completion event is processed.

use std::collections::{HashMap, HashSet};

use crate::career::{CareerPath, Requirement};
use crate::certificate::CertificateDefinition;
use crate::badge::BadgeDefinition;
use crate::criteria::Criterion;
use crate::entity::{CareerPathId, EntityId};
use crate::error::{CredentialError, Result};
use crate::index::CareerPathIndex;

/// Validated configuration snapshot plus the course → path index.
pub struct CredentialCatalog {
    active_certificates: HashMap<EntityId, CertificateDefinition>,
    active_badges: HashMap<EntityId, BadgeDefinition>,
    paths: HashMap<CareerPathId, CareerPath>,
    index: CareerPathIndex,
}

impl CredentialCatalog {
    /// Validate the configuration and build the catalog.
    ///
    /// # Errors
    ///
    /// `CredentialError::InvalidConfiguration` describing the first
    /// violation found.
    pub fn new(
        certificate_definitions: Vec<CertificateDefinition>,
        badge_definitions: Vec<BadgeDefinition>,
        career_paths: Vec<CareerPath>,
    ) -> Result<Self> {
        let mut active_certificates = HashMap::new();
        for def in &certificate_definitions {
            validate_criteria(def)?;
            if def.active
                && active_certificates
                    .insert(def.entity.clone(), def.clone())
                    .is_some()
            {
                return Err(CredentialError::InvalidConfiguration(format!(
                    "multiple active certificate definitions for {}",
                    def.entity
                )));
            }
        }

        let mut active_badges = HashMap::new();
        for def in &badge_definitions {
            if def.active
                && active_badges
                    .insert(def.entity.clone(), def.clone())
                    .is_some()
            {
                return Err(CredentialError::InvalidConfiguration(format!(
                    "multiple active badge definitions for {}",
                    def.entity
                )));
            }
        }

        let mut paths = HashMap::new();
        for path in &career_paths {
            validate_path(path, &active_certificates, &active_badges)?;
            if paths.insert(path.id.clone(), path.clone()).is_some() {
                return Err(CredentialError::InvalidConfiguration(format!(
                    "duplicate career path id {}",
                    path.id
                )));
            }
        }

        let index = CareerPathIndex::build(&career_paths);
        log::debug!(
            "catalog loaded: {} certificate definitions, {} badge definitions, {} career paths",
            active_certificates.len(),
            active_badges.len(),
            paths.len()
        );

        Ok(Self {
            active_certificates,
            active_badges,
            paths,
            index,
        })
    }

    /// The active certificate definition for an entity, if one exists.
    pub fn active_certificate_definition(
        &self,
        entity: &EntityId,
    ) -> Option<&CertificateDefinition> {
        self.active_certificates.get(entity)
    }

    /// The active badge definition for an entity, if one exists.
    pub fn active_badge_definition(&self, entity: &EntityId) -> Option<&BadgeDefinition> {
        self.active_badges.get(entity)
    }

    /// Look up a career path by ID.
    pub fn career_path(&self, id: &CareerPathId) -> Option<&CareerPath> {
        self.paths.get(id)
    }

    /// The course → career path index.
    pub fn index(&self) -> &CareerPathIndex {
        &self.index
    }
}

/// Reject thresholds outside the percentage range.
fn validate_criteria(def: &CertificateDefinition) -> Result<()> {
    for entry in &def.criteria {
        let (label, value) = match &entry.criterion {
            Criterion::CompletionPercentage { min_percentage } => {
                ("completion percentage", *min_percentage)
            }
            Criterion::QuizScore { min_score, .. } => ("quiz score", *min_score),
            Criterion::AllLessons => continue,
        };
        if !(0.0..=100.0).contains(&value) {
            return Err(CredentialError::InvalidConfiguration(format!(
                "definition {}: {label} threshold {value} outside 0-100",
                def.id
            )));
        }
    }
    Ok(())
}

fn validate_path(
    path: &CareerPath,
    active_certificates: &HashMap<EntityId, CertificateDefinition>,
    active_badges: &HashMap<EntityId, BadgeDefinition>,
) -> Result<()> {
    let mut members = HashSet::new();
    for membership in &path.courses {
        if !members.insert(&membership.course_id) {
            return Err(CredentialError::InvalidConfiguration(format!(
                "career path {}: duplicate member course {}",
                path.id, membership.course_id
            )));
        }
    }

    let required_count = path.required_courses().count();
    for requirement in &path.requirements {
        match requirement {
            Requirement::AllCourses => {}
            Requirement::MinCourses { count } => {
                if *count == 0 || *count as usize > required_count {
                    return Err(CredentialError::InvalidConfiguration(format!(
                        "career path {}: min_courses count {count} outside 1-{required_count}",
                        path.id
                    )));
                }
            }
            Requirement::SpecificCourses { course_ids } => {
                for course in course_ids {
                    if !members.contains(course) {
                        return Err(CredentialError::InvalidConfiguration(format!(
                            "career path {}: specific_courses names non-member {course}",
                            path.id
                        )));
                    }
                }
            }
        }
    }

    let career_entity = EntityId::Career(path.id.clone());
    match active_certificates.get(&career_entity) {
        Some(def) if def.id == path.certificate_definition => {}
        Some(def) => {
            return Err(CredentialError::InvalidConfiguration(format!(
                "career path {}: references certificate definition {} but {} is active",
                path.id, path.certificate_definition, def.id
            )));
        }
        None => {
            return Err(CredentialError::InvalidConfiguration(format!(
                "career path {}: no active certificate definition for it",
                path.id
            )));
        }
    }

    if let Some(badge_def_id) = &path.badge_definition {
        match active_badges.get(&career_entity) {
            Some(def) if &def.id == badge_def_id => {}
            _ => {
                return Err(CredentialError::InvalidConfiguration(format!(
                    "career path {}: badge definition {badge_def_id} is not the active one",
                    path.id
                )));
            }
        }
    }

    Ok(())
}
