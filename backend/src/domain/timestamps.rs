//! Timestamp rules for stored records.
//!
//! Stored timestamps carry microsecond precision, which is what PostgreSQL
//! `timestamptz` keeps. The in-memory adapters apply the same truncation so
//! both backends return identical values.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

/// Truncate `instant` to whole microseconds.
#[must_use]
pub fn to_storage_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(6)
}

/// Compute the `updated_at` value for a mutation.
///
/// The result is never earlier than `now` and always strictly later than
/// `previous`, so repeated updates within one clock tick still advance.
///
/// # Examples
/// ```
/// use ballot_backend::domain::timestamps::next_updated_at;
/// use chrono::{TimeZone, Utc};
///
/// let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid");
/// assert!(next_updated_at(stamp, stamp) > stamp);
/// ```
#[must_use]
pub fn next_updated_at(now: DateTime<Utc>, previous: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + TimeDelta::microseconds(1);
    to_storage_precision(now).max(floor)
}
