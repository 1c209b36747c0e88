//! In-memory store backing all three repository traits.
//!
//! One mutex guards every map, so a revocation's credential write and
//! verification-record write cannot interleave with another writer. Handles
//! are cheap clones sharing the same maps.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::badge::{Badge, BadgeId};
use crate::certificate::{Certificate, CertificateId, VerificationCode};
use crate::entity::{CredentialStatus, EntityId, LearnerId};
use crate::error::{CredentialError, Result};
use crate::storage::{
    BadgeRepository, CertificateRepository, InsertOutcome, VerificationRepository,
};
use crate::verification::VerificationRecord;

#[derive(Default)]
struct StoreInner {
    certificates: HashMap<CertificateId, Certificate>,
    /// Uniqueness constraint: (learner, entity) → certificate.
    certificate_pairs: HashMap<(LearnerId, EntityId), CertificateId>,
    badges: HashMap<BadgeId, Badge>,
    /// Uniqueness constraint: (learner, entity) → badge.
    badge_pairs: HashMap<(LearnerId, EntityId), BadgeId>,
    verifications: HashMap<VerificationCode, VerificationRecord>,
}

/// Thread-safe in-memory credential store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| CredentialError::Persistence("store lock poisoned".into()))
    }
}

impl CertificateRepository for MemoryStore {
    fn insert_if_absent(&self, certificate: Certificate) -> Result<InsertOutcome<Certificate>> {
        let mut inner = self.lock()?;
        let pair = (certificate.learner_id.clone(), certificate.entity.clone());

        if let Some(existing_id) = inner.certificate_pairs.get(&pair) {
            let existing = inner.certificates.get(existing_id).cloned().ok_or_else(|| {
                CredentialError::Persistence(format!(
                    "certificate pair index points at missing row {existing_id}"
                ))
            })?;
            return Ok(InsertOutcome::Existing(existing));
        }

        inner.certificate_pairs.insert(pair, certificate.id.clone());
        inner
            .certificates
            .insert(certificate.id.clone(), certificate.clone());
        Ok(InsertOutcome::Inserted(certificate))
    }

    fn find_for(&self, learner: &LearnerId, entity: &EntityId) -> Result<Option<Certificate>> {
        let inner = self.lock()?;
        let pair = (learner.clone(), entity.clone());
        Ok(inner
            .certificate_pairs
            .get(&pair)
            .and_then(|id| inner.certificates.get(id))
            .cloned())
    }

    fn get(&self, id: &CertificateId) -> Result<Option<Certificate>> {
        Ok(self.lock()?.certificates.get(id).cloned())
    }

    fn list_for_learner(&self, learner: &LearnerId) -> Result<Vec<Certificate>> {
        Ok(self
            .lock()?
            .certificates
            .values()
            .filter(|c| &c.learner_id == learner)
            .cloned()
            .collect())
    }

    fn set_status(&self, id: &CertificateId, status: CredentialStatus) -> Result<()> {
        let mut inner = self.lock()?;
        let cert = inner
            .certificates
            .get_mut(id)
            .ok_or_else(|| CredentialError::NotFound(format!("certificate {id}")))?;
        cert.status = status;
        Ok(())
    }
}

impl BadgeRepository for MemoryStore {
    fn insert_if_absent(&self, badge: Badge) -> Result<InsertOutcome<Badge>> {
        let mut inner = self.lock()?;
        let pair = (badge.learner_id.clone(), badge.entity.clone());

        if let Some(existing_id) = inner.badge_pairs.get(&pair) {
            let existing = inner.badges.get(existing_id).cloned().ok_or_else(|| {
                CredentialError::Persistence(format!(
                    "badge pair index points at missing row {existing_id}"
                ))
            })?;
            return Ok(InsertOutcome::Existing(existing));
        }

        inner.badge_pairs.insert(pair, badge.id.clone());
        inner.badges.insert(badge.id.clone(), badge.clone());
        Ok(InsertOutcome::Inserted(badge))
    }

    fn find_for(&self, learner: &LearnerId, entity: &EntityId) -> Result<Option<Badge>> {
        let inner = self.lock()?;
        let pair = (learner.clone(), entity.clone());
        Ok(inner
            .badge_pairs
            .get(&pair)
            .and_then(|id| inner.badges.get(id))
            .cloned())
    }

    fn get(&self, id: &BadgeId) -> Result<Option<Badge>> {
        Ok(self.lock()?.badges.get(id).cloned())
    }

    fn list_for_learner(&self, learner: &LearnerId) -> Result<Vec<Badge>> {
        Ok(self
            .lock()?
            .badges
            .values()
            .filter(|b| &b.learner_id == learner)
            .cloned()
            .collect())
    }

    fn set_status(&self, id: &BadgeId, status: CredentialStatus) -> Result<()> {
        let mut inner = self.lock()?;
        let badge = inner
            .badges
            .get_mut(id)
            .ok_or_else(|| CredentialError::NotFound(format!("badge {id}")))?;
        badge.status = status;
        Ok(())
    }
}

impl VerificationRepository for MemoryStore {
    fn create(&self, record: VerificationRecord) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.verifications.contains_key(&record.code) {
            return Err(CredentialError::DuplicateCode(record.code.0.clone()));
        }
        inner.verifications.insert(record.code.clone(), record);
        Ok(())
    }

    fn get(&self, code: &VerificationCode) -> Result<Option<VerificationRecord>> {
        Ok(self.lock()?.verifications.get(code).cloned())
    }

    fn set_status(&self, code: &VerificationCode, status: CredentialStatus) -> Result<()> {
        let mut inner = self.lock()?;
        let record = inner
            .verifications
            .get_mut(code)
            .ok_or_else(|| CredentialError::NotFound(format!("verification record {code}")))?;
        record.status = status;
        Ok(())
    }
}
