//! Audit timestamp codec.
//!
//! Timestamps are UTC with second precision and travel as naive
//! `YYYY-MM-DD HH:MM:SS` strings (no zone suffix, no fraction).

use chrono::{DateTime, Datelike, NaiveDateTime, SubsecRound, Timelike, Utc};

use crate::error::{ModelError, ModelResult};

/// `strftime` pattern used for every stored timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Years representable with a four-digit `%Y`.
const YEAR_RANGE: core::ops::RangeInclusive<i32> = 0..=9999;

/// Current UTC time truncated to whole seconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Whether `text` has exactly the `YYYY-MM-DD HH:MM:SS` shape.
///
/// chrono alone accepts signs, padding and leap seconds; this does not.
pub fn is_well_formed(text: &str) -> bool {
    let b = text.as_bytes();
    b.len() == 19
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            10 => *c == b' ',
            13 | 16 => *c == b':',
            _ => c.is_ascii_digit(),
        })
}

/// Parse a stored timestamp for `field`, interpreting it as UTC.
pub fn parse(field: &'static str, text: &str) -> ModelResult<DateTime<Utc>> {
    if !is_well_formed(text) {
        return Err(reject(field, text, "does not match YYYY-MM-DD HH:MM:SS"));
    }
    let ts = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|err| reject(field, text, &err.to_string()))?
        .and_utc();
    // `:60` parses as a leap second
    if ts.nanosecond() >= 1_000_000_000 {
        return Err(reject(field, text, "leap second"));
    }
    Ok(ts)
}

/// Normalize a timestamp assigned in memory: sub-seconds are dropped, leap
/// seconds and years outside `0..=9999` are rejected so [`format`] always
/// yields the stored shape.
pub fn normalize(field: &'static str, ts: DateTime<Utc>) -> ModelResult<DateTime<Utc>> {
    let ts = ts.trunc_subsecs(0);
    if ts.nanosecond() >= 1_000_000_000 || !YEAR_RANGE.contains(&ts.year()) {
        return Err(reject(field, &ts.to_rfc3339(), "not representable"));
    }
    Ok(ts)
}

/// Render a timestamp in the stored format. Sub-second precision is dropped.
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn reject(field: &'static str, text: &str, reason: &str) -> ModelError {
    tracing::warn!(field, value = text, reason, "rejected timestamp");
    ModelError::format(field, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_fixed_pattern_as_utc() {
        let ts = parse("created_at", "2024-01-02 03:04:05").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
    }

    #[test]
    fn rejects_other_shapes() {
        for bad in [
            "not-a-date",
            "",
            "2024-01-02",
            "2024-01-02T03:04:05",
            "2024-01-02 03:04:05Z",
            "2024-01-02 03:04:05.123",
            "2024-13-01 00:00:00",
            "2024-02-30 00:00:00",
            " 2024-01-01 00:00:00",
            "+2024-01-01 00:00:00",
            "2024-1-01 00:00:00",
            "2024-01-01 23:59:60",
        ] {
            assert_eq!(
                parse("updated_at", bad),
                Err(ModelError::format("updated_at", bad)),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_the_full_year_range() {
        let ts = parse("created_at", "0000-01-01 00:00:00").unwrap();
        assert_eq!(format(&ts), "0000-01-01 00:00:00");
        let ts = parse("created_at", "9999-12-31 23:59:59").unwrap();
        assert_eq!(format(&ts), "9999-12-31 23:59:59");
    }

    #[test]
    fn format_drops_subseconds() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::milliseconds(750);
        assert_eq!(format(&ts), "2024-01-01 00:00:00");
    }

    #[test]
    fn normalize_truncates_and_bounds_years() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            normalize("created_at", ts + chrono::Duration::milliseconds(999)),
            Ok(ts)
        );

        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            normalize("created_at", far),
            Err(ModelError::Format { field: "created_at", .. })
        ));
        let early = Utc.with_ymd_and_hms(-1, 1, 1, 0, 0, 0).unwrap();
        assert!(normalize("updated_at", early).is_err());
    }

    #[test]
    fn now_has_no_subsecond_component() {
        assert_eq!(now().nanosecond(), 0);
        assert!(is_well_formed(&format(&now())));
    }
}
