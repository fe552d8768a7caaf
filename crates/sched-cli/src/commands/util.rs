//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+(ago|from now)$").unwrap()
});

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Parse a datetime string as either ISO 8601 or relative time.
///
/// Supports:
/// - ISO 8601: "2025-11-11T10:30:00Z"
/// - Relative: "2 hours ago", "30 minutes from now", "1 day ago"
pub fn parse_datetime(s: &str, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s.trim()) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use ISO 8601 (e.g., 2025-11-11T10:30:00Z) or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    let duration = Duration::minutes(n * minutes_per_unit);
    if &caps[3] == "ago" {
        Ok(now - duration)
    } else {
        Ok(now + duration)
    }
}

/// Resolves an optional `--at` argument, defaulting to now.
pub fn resolve_at(at: Option<&str>, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    at.map_or(Ok(now), |s| parse_datetime(s, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-11-11T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn parses_rfc3339() {
        let dt = parse_datetime("2025-11-10T18:35:00+01:00", now()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-11-10T17:35:00+00:00");
    }

    #[test]
    fn parses_relative_past_and_future() {
        assert_eq!(
            parse_datetime("2 hours ago", now()).unwrap(),
            now() - Duration::hours(2)
        );
        assert_eq!(
            parse_datetime("30 minutes from now", now()).unwrap(),
            now() + Duration::minutes(30)
        );
        assert_eq!(
            parse_datetime("1 day ago", now()).unwrap(),
            now() - Duration::days(1)
        );
    }

    #[test]
    fn rejects_garbage_and_huge_values() {
        assert!(parse_datetime("yesterday", now()).is_err());
        assert!(parse_datetime("99999999 weeks ago", now()).is_err());
    }

    #[test]
    fn resolve_at_defaults_to_now() {
        assert_eq!(resolve_at(None, now()).unwrap(), now());
    }
}
