//! Certificates — the primary credential record.
//!
//! - [`types`] — [`Certificate`], [`CertificateDefinition`], and the
//!   prefixed random identifiers ([`CertificateId`], [`VerificationCode`]).
//! - [`issuer`] — idempotent issuance through an injected repository.

pub mod issuer;
pub mod types;

pub use issuer::CertificateIssuer;
pub use types::{Certificate, CertificateDefinition, CertificateId, VerificationCode};
