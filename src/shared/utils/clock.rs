use chrono::{DateTime, Duration, Utc};

/// Current time truncated to microseconds, the precision PostgreSQL keeps.
///
/// Truncating up front means a value read back from the database compares
/// equal to the one that was written.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

/// A timestamp strictly later than `previous`, normally just `now()`.
pub fn advance(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
