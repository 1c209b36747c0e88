//! Outcome types for the issuance pipeline.
//!
//! Each stage reports what it did instead of collapsing everything into a
//! nullable return, so callers can distinguish "nothing configured" from
//! "criteria not met" from "already held".

use crate::badge::Badge;
use crate::career::CareerAward;
use crate::certificate::Certificate;

/// Outcome of the course-certificate stage.
#[derive(Debug, Clone)]
pub enum CertificateStage {
    /// A new certificate was written by this invocation.
    Issued(Certificate),
    /// The learner already held the certificate; returned unchanged.
    AlreadyHeld(Certificate),
    /// No active certificate definition for the course — nothing to issue.
    NotConfigured,
    /// Required criteria failed; descriptions of each failure.
    CriteriaNotMet(Vec<String>),
}

impl CertificateStage {
    /// The certificate, when one was issued or already held.
    pub fn certificate(&self) -> Option<&Certificate> {
        match self {
            Self::Issued(c) | Self::AlreadyHeld(c) => Some(c),
            Self::NotConfigured | Self::CriteriaNotMet(_) => None,
        }
    }
}

/// Outcome of the course-badge stage.
#[derive(Debug, Clone)]
pub enum BadgeStage {
    /// A new badge was written by this invocation.
    Issued(Badge),
    /// The learner already held the badge; returned unchanged.
    AlreadyHeld(Badge),
    /// No active badge definition for the course — a normal outcome.
    NotConfigured,
    /// Stage not reached because no certificate was issued.
    Skipped,
}

impl BadgeStage {
    /// The badge, when one was issued or already held.
    pub fn badge(&self) -> Option<&Badge> {
        match self {
            Self::Issued(b) | Self::AlreadyHeld(b) => Some(b),
            Self::NotConfigured | Self::Skipped => None,
        }
    }
}

/// Everything one completion event produced.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub certificate: CertificateStage,
    pub badge: BadgeStage,
    /// Career paths newly awarded by this invocation.
    pub career_awards: Vec<CareerAward>,
}

impl CompletionOutcome {
    /// The course certificate, issued now or previously — the classic
    /// "certificate or nothing" view of the pipeline.
    pub fn certificate(&self) -> Option<&Certificate> {
        self.certificate.certificate()
    }
}
