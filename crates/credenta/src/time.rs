//! Time utilities for Credenta.
//!
//! All timestamps are UTC. Expiry is calendar-month arithmetic computed
//! once at issuance; "expired" is always derived by readers.

use chrono::{DateTime, Months, Utc};

/// Return the current UTC time.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Compute an expiry timestamp `months` calendar months after `issued_at`.
///
/// Returns `None` when the definition carries no expiry. Month arithmetic
/// clamps to the last day of shorter months (Jan 31 + 1 month = Feb 28/29).
pub fn expiry_from(issued_at: DateTime<Utc>, months: Option<u32>) -> Option<DateTime<Utc>> {
    months.and_then(|m| issued_at.checked_add_months(Months::new(m)))
}
