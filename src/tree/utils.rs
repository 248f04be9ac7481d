//! Shared formatting helpers

use chrono::{DateTime, Utc};

/// Timestamp layout used for the last-modified annotation.
pub const MOD_TIME_FORMAT: &str = "%b %d %H:%M";

/// Format a size in bytes with a 1024-based unit suffix.
///
/// One decimal below 10 units, none above; plain bytes carry no suffix.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["K", "M", "G", "T", "P", "E"];

    let mut value = bytes as f64;
    let mut unit = None;
    for u in UNITS {
        if value <= 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = Some(u);
    }

    match unit {
        None => format!("{}", bytes),
        Some(u) if value >= 10.0 => format!("{:.0}{}", value, u),
        Some(u) => format!("{:.1}{}", value, u),
    }
}

/// Format a modification time, or blanks of the same width when missing.
pub fn format_mod_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(t) => t.format(MOD_TIME_FORMAT).to_string(),
        None => " ".repeat(12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::base_time;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0");
        assert_eq!(format_size(1000), "1000");
        assert_eq!(format_size(1024), "1024");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(20 * 1024), "20K");
        assert_eq!(format_size(1_500_000), "1.4M");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0G");
    }

    #[test]
    fn test_format_mod_time() {
        assert_eq!(format_mod_time(Some(base_time())), "Jan 02 15:04");
        assert_eq!(format_mod_time(None).len(), "Jan 02 15:04".len());
    }
}
