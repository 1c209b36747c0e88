//! Public verification — code-keyed lookup records and revocation.
//!
//! - [`types`] — [`VerificationRecord`] and [`RevocationReason`].
//! - [`registry`] — write-once record creation, public lookup by code, and
//!   non-cascading revocation.

pub mod registry;
pub mod types;

pub use registry::VerificationRegistry;
pub use types::{RevocationReason, VerificationRecord};
