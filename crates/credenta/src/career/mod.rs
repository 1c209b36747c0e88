//! Career paths — multi-course aggregate credentials.
//!
//! - [`types`] — [`CareerPath`], the closed [`Requirement`] enum, and the
//!   pure [`qualifies`] check.
//! - [`engine`] — evaluation of affected paths after a course award, with
//!   certificate-then-badge issuance for newly qualifying paths.

pub mod engine;
pub mod types;

pub use engine::{CareerAward, CareerPathEngine};
pub use types::{qualifies, CareerPath, CourseMembership, Requirement};
