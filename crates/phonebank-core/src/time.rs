use crate::error::CoreError;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Formats a second count as `MM:SS`, switching to `HH:MM:SS` once the hour
/// count is non-zero. Negative inputs render as zero.
pub fn format_duration(seconds: i64) -> String {
    let total = seconds.max(0);
    let minutes = total / 60;
    let seconds = total % 60;
    let hours = minutes / 60;
    let minutes = minutes % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an ISO-8601 instant as reported by clients. Values with an offset
/// (including the `Z` suffix) are converted to UTC; naive values are taken
/// as already being UTC.
pub fn parse_utc_instant(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidTimestamp(raw.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }

    Err(CoreError::InvalidTimestamp(raw.to_string()))
}

/// Renders a UTC instant as the (date, time) pair written into a contact's
/// call-history columns, shifted into the fixed display offset.
pub fn call_stamp(instant: DateTime<Utc>, offset: FixedOffset) -> (String, String) {
    let local = instant.with_timezone(&offset);
    (
        local.format("%d/%m/%Y").to_string(),
        local.format("%H:%M:%S").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::{call_stamp, format_duration, parse_utc_instant};
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn format_duration_uses_two_fields_under_an_hour() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(125), "02:05");
        assert_eq!(format_duration(3599), "59:59");
    }

    #[test]
    fn format_duration_switches_to_three_fields_at_an_hour() {
        assert_eq!(format_duration(3600), "01:00:00");
        assert_eq!(format_duration(3661), "01:01:01");
    }

    #[test]
    fn format_duration_clamps_negative_values() {
        assert_eq!(format_duration(-30), "00:00");
    }

    #[test]
    fn parse_utc_instant_accepts_zulu_and_offset_forms() {
        let zulu = parse_utc_instant("2026-03-01T10:30:00Z").unwrap();
        let offset = parse_utc_instant("2026-03-01T12:30:00+02:00").unwrap();
        assert_eq!(zulu, offset);
        assert_eq!(zulu, Utc.with_ymd_and_hms(2026, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn parse_utc_instant_treats_naive_values_as_utc() {
        let parsed = parse_utc_instant("2026-03-01T10:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn parse_utc_instant_rejects_garbage() {
        assert!(parse_utc_instant("").is_err());
        assert!(parse_utc_instant("not-a-timestamp").is_err());
    }

    #[test]
    fn call_stamp_shifts_into_the_display_offset() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 5).unwrap();
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let (date, time) = call_stamp(instant, offset);
        assert_eq!(date, "02/03/2026");
        assert_eq!(time, "01:30:05");
    }
}
