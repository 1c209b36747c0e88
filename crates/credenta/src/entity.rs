//! Core identifiers shared by every module.
//!
//! All IDs are string newtypes. Certificates and badges are owned by an
//! [`EntityId`] — either a single course or a career path — which is also
//! the namespace key for idempotent issuance.

use serde::{Deserialize, Serialize};

/// Identifies a learner (supplied by the progress-tracking collaborator).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LearnerId(pub String);

impl LearnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for LearnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(pub String);

impl CourseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a career path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CareerPathId(pub String);

impl CareerPathId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CareerPathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a certificate or badge definition in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefinitionId(pub String);

impl DefinitionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The entity a credential is awarded for.
///
/// Course and career credentials share one verification-code namespace, so
/// the entity carries its own kind tag rather than relying on table origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    Course(CourseId),
    Career(CareerPathId),
}

impl EntityId {
    /// Stable tag used in verification records and file names.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Course(_) => EntityKind::Course,
            Self::Career(_) => EntityKind::Career,
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Course(id) => write!(f, "course:{}", id.0),
            Self::Career(id) => write!(f, "career:{}", id.0),
        }
    }
}

/// Which kind of entity a credential belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Course,
    Career,
}

impl EntityKind {
    /// Return a stable string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Career => "career",
        }
    }
}

/// Lifecycle status of a certificate, badge, or verification record.
///
/// `Revoked` is terminal: no transition back to `Active` exists. Expiry is
/// never a status — readers derive it from the stored expiry timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStatus {
    Active,
    Revoked,
}

impl CredentialStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}
