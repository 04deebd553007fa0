//! Parsing and formatting for manifest field values.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};

/// Parses a manifest mode string (octal text such as `100644`) into
/// permission bits.
///
/// The manifest keeps the mode as literal text to preserve its exact
/// octal form; this is the single place it is reinterpreted numerically.
///
/// # Errors
/// Returns an error if the string is not valid octal.
pub fn parse_mode_string(mode_string: &str) -> Result<u32> {
    u32::from_str_radix(mode_string, 8)
        .with_context(|| format!("Invalid octal mode string: {mode_string}"))
}

/// Formats permission bits as the octal text used in manifest lines.
#[must_use]
pub fn format_mode(mode: u32) -> String {
    format!("{mode:o}")
}

/// Parses a manifest timestamp (ISO-8601 with UTC offset, e.g.
/// `2014-04-30T10:11:12+01:00`).
///
/// # Errors
/// Returns an error if the string is not a valid RFC 3339 datetime.
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(timestamp)
        .with_context(|| format!("Invalid manifest timestamp: {timestamp}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_string() {
        assert_eq!(parse_mode_string("100644").unwrap(), 0o100644);
        assert_eq!(parse_mode_string("755").unwrap(), 0o755);
    }

    #[test]
    fn test_parse_mode_string_rejects_non_octal() {
        assert!(parse_mode_string("100648").is_err());
        assert!(parse_mode_string("rw-r--r--").is_err());
        assert!(parse_mode_string("").is_err());
    }

    #[test]
    fn test_mode_round_trip_preserves_text() {
        let text = "100644";
        assert_eq!(format_mode(parse_mode_string(text).unwrap()), text);
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2014-04-30T10:11:12+01:00").unwrap();
        assert_eq!(ts.timestamp(), 1_398_849_072);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
