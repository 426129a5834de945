//! Wall-clock helpers
//!
//! Planet state advances against real timestamps rather than ticks. All
//! persisted instants use microsecond precision, so every timestamp that
//! enters the model is truncated to whole microseconds first. This keeps a
//! value read back from storage equal to the one that was written.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

/// Instant in time used throughout the engine
pub type Timestamp = DateTime<Utc>;

/// Microseconds in one minute
const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Truncate a timestamp to the precision used by storage
pub fn truncate(at: Timestamp) -> Timestamp {
    at.trunc_subsecs(6)
}

/// Convert a timestamp to microseconds since the Unix epoch
pub fn to_micros(at: Timestamp) -> i64 {
    at.timestamp_micros()
}

/// Convert microseconds since the Unix epoch back to a timestamp
///
/// Values outside chrono's representable range collapse to the epoch.
pub fn from_micros(micros: i64) -> Timestamp {
    DateTime::<Utc>::from_timestamp_micros(micros).unwrap_or_default()
}

/// Elapsed minutes between two instants, never negative
pub fn minutes_between(from: Timestamp, to: Timestamp) -> f64 {
    if to <= from {
        return 0.0;
    }
    let delta = to - from;
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / MICROS_PER_MINUTE,
        // Overflow of i64 microseconds is ~292k years; fall back to seconds.
        None => delta.num_seconds() as f64 / 60.0,
    }
}

/// Duration covering a fractional number of hours, rounded up to the microsecond
pub fn hours_ceil(hours: f64) -> TimeDelta {
    if hours <= 0.0 || !hours.is_finite() {
        return TimeDelta::zero();
    }
    let micros = (hours * 3_600.0 * 1_000_000.0).ceil();
    TimeDelta::microseconds(micros as i64)
}
