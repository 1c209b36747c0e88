//! Badges — secondary credentials that always reference a certificate.
//!
//! - [`types`] — [`Badge`] and [`BadgeDefinition`].
//! - [`issuer`] — issuance strictly after the certificate, `None` when no
//!   badge is configured for the entity.

pub mod issuer;
pub mod types;

pub use issuer::BadgeIssuer;
pub use types::{Badge, BadgeDefinition, BadgeId};
