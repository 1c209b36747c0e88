//! JSON-file credential store.
//!
//! Stores credentials and verification records as versioned JSON documents
//! under a directory tree:
//!
//! ```text
//! {base_dir}/
//! ├── certificates/          — one file per certificate
//! │   └── {certificate_id}.json
//! ├── certificate_pairs/     — (learner, entity) uniqueness constraint
//! │   └── {pair_key}.json
//! ├── badges/
//! │   └── {badge_id}.json
//! ├── badge_pairs/
//! │   └── {pair_key}.json
//! └── verifications/         — write-once, keyed by verification code
//!     └── {code}.json
//! ```
//!
//! Pair files are published by hard-linking a fully written temp file into
//! place, which the filesystem makes atomic: the first writer for a
//! (learner, entity) pair wins, every later writer reads the winner's
//! complete row, and no reader ever sees a partial file. This is the
//! storage-level uniqueness constraint that keeps issuance idempotent
//! across processes. Listings walk the pair directories, so a row written
//! by a writer that then loses its pair claim is never observed.
//!
//! File format:
//! ```json
//! { "version": 1, "certificate": { ... } }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::badge::{Badge, BadgeId};
use crate::certificate::types::random_token;
use crate::certificate::{Certificate, CertificateId, VerificationCode};
use crate::entity::{CredentialStatus, EntityId, LearnerId};
use crate::error::{CredentialError, Result};
use crate::storage::{
    BadgeRepository, CertificateRepository, InsertOutcome, VerificationRepository,
};
use crate::verification::VerificationRecord;

// ── File format constants ─────────────────────────────────────────────────────

const STORE_FILE_VERSION: u32 = 1;

const CERTIFICATES_DIR: &str = "certificates";
const CERTIFICATE_PAIRS_DIR: &str = "certificate_pairs";
const BADGES_DIR: &str = "badges";
const BADGE_PAIRS_DIR: &str = "badge_pairs";
const VERIFICATIONS_DIR: &str = "verifications";

// ── On-disk structures ────────────────────────────────────────────────────────

/// Wrapper written to disk for each certificate.
#[derive(Debug, Serialize, Deserialize)]
struct CertificateFile {
    version: u32,
    certificate: Certificate,
}

/// Wrapper written to disk for each badge.
#[derive(Debug, Serialize, Deserialize)]
struct BadgeFile {
    version: u32,
    badge: Badge,
}

/// Wrapper written to disk for each verification record.
#[derive(Debug, Serialize, Deserialize)]
struct VerificationFile {
    version: u32,
    record: VerificationRecord,
}

/// Wrapper written to disk for each uniqueness-pair marker.
#[derive(Debug, Serialize, Deserialize)]
struct PairFile {
    version: u32,
    /// ID of the row owning this (learner, entity) pair.
    id: String,
}

// ── JsonStore ─────────────────────────────────────────────────────────────────

/// Filesystem-backed store implementing all three repository traits.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at `base_dir`, creating sub-directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Io` if any directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        for sub in [
            CERTIFICATES_DIR,
            CERTIFICATE_PAIRS_DIR,
            BADGES_DIR,
            BADGE_PAIRS_DIR,
            VERIFICATIONS_DIR,
        ] {
            std::fs::create_dir_all(base_dir.join(sub))?;
        }
        Ok(Self { base_dir })
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Filesystem-safe key for a (learner, entity) pair.
    fn pair_key(learner: &LearnerId, entity: &EntityId) -> String {
        let raw = format!("{learner}|{entity}");
        bs58::encode(raw.as_bytes()).into_string()
    }

    fn file_path(&self, sub_dir: &str, name: &str) -> PathBuf {
        self.base_dir.join(sub_dir).join(format!("{name}.json"))
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| CredentialError::SerializationError(e.to_string()))?;
        std::fs::write(path, json.as_bytes())?;
        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            CredentialError::InvalidFileFormat(format!(
                "failed to parse {}: {e}",
                path.display()
            ))
        })
    }

    /// Atomically publish a complete JSON document at `path`.
    ///
    /// The content is written to a temp file under the base directory and
    /// hard-linked into place, so a reader that finds the file always
    /// reads all of it. Returns `false` when `path` already exists.
    fn publish_new(&self, path: &Path, json: &str) -> Result<bool> {
        let tmp = self.base_dir.join(random_token("tmp"));
        std::fs::write(&tmp, json.as_bytes())?;
        let linked = match std::fs::hard_link(&tmp, path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        };
        let _ = std::fs::remove_file(&tmp);
        linked
    }

    /// Atomically claim a pair file for `id`.
    ///
    /// Returns `Ok(None)` when this writer won, `Ok(Some(existing_id))`
    /// when another writer holds the pair. A loser always reads a complete
    /// winner file; partially written pairs are never visible.
    fn claim_pair(&self, sub_dir: &str, key: &str, id: &str) -> Result<Option<String>> {
        let path = self.file_path(sub_dir, key);
        let pair = PairFile {
            version: STORE_FILE_VERSION,
            id: id.to_string(),
        };
        let json = serde_json::to_string_pretty(&pair)
            .map_err(|e| CredentialError::SerializationError(e.to_string()))?;

        if self.publish_new(&path, &json)? {
            Ok(None)
        } else {
            let existing: PairFile = self.read_json(&path)?;
            Ok(Some(existing.id))
        }
    }

    fn load_certificate(&self, id: &str) -> Result<Certificate> {
        let path = self.file_path(CERTIFICATES_DIR, id);
        let file: CertificateFile = self.read_json(&path)?;
        Ok(file.certificate)
    }

    fn load_badge(&self, id: &str) -> Result<Badge> {
        let path = self.file_path(BADGES_DIR, id);
        let file: BadgeFile = self.read_json(&path)?;
        Ok(file.badge)
    }
}

impl CertificateRepository for JsonStore {
    fn insert_if_absent(&self, certificate: Certificate) -> Result<InsertOutcome<Certificate>> {
        let key = Self::pair_key(&certificate.learner_id, &certificate.entity);

        // Write the row first so a claimed pair never points at a missing
        // file; the loser's orphan row is removed below.
        let row_path = self.file_path(CERTIFICATES_DIR, &certificate.id.0);
        self.write_json(
            &row_path,
            &CertificateFile {
                version: STORE_FILE_VERSION,
                certificate: certificate.clone(),
            },
        )?;

        match self.claim_pair(CERTIFICATE_PAIRS_DIR, &key, &certificate.id.0)? {
            None => Ok(InsertOutcome::Inserted(certificate)),
            Some(winner_id) => {
                let _ = std::fs::remove_file(&row_path);
                Ok(InsertOutcome::Existing(self.load_certificate(&winner_id)?))
            }
        }
    }

    fn find_for(&self, learner: &LearnerId, entity: &EntityId) -> Result<Option<Certificate>> {
        let key = Self::pair_key(learner, entity);
        let path = self.file_path(CERTIFICATE_PAIRS_DIR, &key);
        if !path.exists() {
            return Ok(None);
        }
        let pair: PairFile = self.read_json(&path)?;
        Ok(Some(self.load_certificate(&pair.id)?))
    }

    fn get(&self, id: &CertificateId) -> Result<Option<Certificate>> {
        let path = self.file_path(CERTIFICATES_DIR, &id.0);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(self.load_certificate(&id.0)?))
    }

    fn list_for_learner(&self, learner: &LearnerId) -> Result<Vec<Certificate>> {
        // Walk claimed pairs, not row files: a losing writer's row exists
        // briefly before it is removed and must not be listed.
        let dir = self.base_dir.join(CERTIFICATE_PAIRS_DIR);
        let mut certificates = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let pair: PairFile = self.read_json(&entry?.path())?;
            let certificate = self.load_certificate(&pair.id)?;
            if &certificate.learner_id == learner {
                certificates.push(certificate);
            }
        }
        Ok(certificates)
    }

    fn set_status(&self, id: &CertificateId, status: CredentialStatus) -> Result<()> {
        let path = self.file_path(CERTIFICATES_DIR, &id.0);
        if !path.exists() {
            return Err(CredentialError::NotFound(format!("certificate {id}")));
        }
        let mut file: CertificateFile = self.read_json(&path)?;
        file.certificate.status = status;
        self.write_json(&path, &file)
    }
}

impl BadgeRepository for JsonStore {
    fn insert_if_absent(&self, badge: Badge) -> Result<InsertOutcome<Badge>> {
        let key = Self::pair_key(&badge.learner_id, &badge.entity);

        let row_path = self.file_path(BADGES_DIR, &badge.id.0);
        self.write_json(
            &row_path,
            &BadgeFile {
                version: STORE_FILE_VERSION,
                badge: badge.clone(),
            },
        )?;

        match self.claim_pair(BADGE_PAIRS_DIR, &key, &badge.id.0)? {
            None => Ok(InsertOutcome::Inserted(badge)),
            Some(winner_id) => {
                let _ = std::fs::remove_file(&row_path);
                Ok(InsertOutcome::Existing(self.load_badge(&winner_id)?))
            }
        }
    }

    fn find_for(&self, learner: &LearnerId, entity: &EntityId) -> Result<Option<Badge>> {
        let key = Self::pair_key(learner, entity);
        let path = self.file_path(BADGE_PAIRS_DIR, &key);
        if !path.exists() {
            return Ok(None);
        }
        let pair: PairFile = self.read_json(&path)?;
        Ok(Some(self.load_badge(&pair.id)?))
    }

    fn get(&self, id: &BadgeId) -> Result<Option<Badge>> {
        let path = self.file_path(BADGES_DIR, &id.0);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(self.load_badge(&id.0)?))
    }

    fn list_for_learner(&self, learner: &LearnerId) -> Result<Vec<Badge>> {
        // Walk claimed pairs, not row files, as for certificates.
        let dir = self.base_dir.join(BADGE_PAIRS_DIR);
        let mut badges = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let pair: PairFile = self.read_json(&entry?.path())?;
            let badge = self.load_badge(&pair.id)?;
            if &badge.learner_id == learner {
                badges.push(badge);
            }
        }
        Ok(badges)
    }

    fn set_status(&self, id: &BadgeId, status: CredentialStatus) -> Result<()> {
        let path = self.file_path(BADGES_DIR, &id.0);
        if !path.exists() {
            return Err(CredentialError::NotFound(format!("badge {id}")));
        }
        let mut file: BadgeFile = self.read_json(&path)?;
        file.badge.status = status;
        self.write_json(&path, &file)
    }
}

impl VerificationRepository for JsonStore {
    fn create(&self, record: VerificationRecord) -> Result<()> {
        let path = self.file_path(VERIFICATIONS_DIR, &record.code.0);
        let file = VerificationFile {
            version: STORE_FILE_VERSION,
            record,
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| CredentialError::SerializationError(e.to_string()))?;

        if self.publish_new(&path, &json)? {
            Ok(())
        } else {
            Err(CredentialError::DuplicateCode(file.record.code.0.clone()))
        }
    }

    fn get(&self, code: &VerificationCode) -> Result<Option<VerificationRecord>> {
        let path = self.file_path(VERIFICATIONS_DIR, &code.0);
        if !path.exists() {
            return Ok(None);
        }
        let file: VerificationFile = self.read_json(&path)?;
        Ok(Some(file.record))
    }

    fn set_status(&self, code: &VerificationCode, status: CredentialStatus) -> Result<()> {
        let path = self.file_path(VERIFICATIONS_DIR, &code.0);
        if !path.exists() {
            return Err(CredentialError::NotFound(format!(
                "verification record {code}"
            )));
        }
        let mut file: VerificationFile = self.read_json(&path)?;
        file.record.status = status;
        self.write_json(&path, &file)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
