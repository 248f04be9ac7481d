//! Listing fixtures for tests and benchmarks.
//!
//! This module is only compiled for tests and with the `test-utils` feature.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::tree::ObjectRecord;

/// Timestamp every fixture is offset from: 2024-01-02 15:04:05 UTC.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 15, 4, 5)
        .single()
        .unwrap_or_default()
}

/// A record stamped with `base_time()`.
pub fn record(key: &str, size: u64) -> ObjectRecord {
    ObjectRecord::new(key, size, Some(base_time()))
}

/// A record stamped `minutes` after `base_time()`.
pub fn record_at(key: &str, size: u64, minutes: i64) -> ObjectRecord {
    ObjectRecord::new(key, size, Some(base_time() + Duration::minutes(minutes)))
}

/// A small listing: 3 directories (docs, logs, logs/2024) and 5 files,
/// plus a hidden file and a directory marker.
pub fn sample_records() -> Vec<ObjectRecord> {
    vec![
        record_at("readme.md", 120, 5),
        record("docs/", 0),
        record_at("docs/guide.md", 2048, 1),
        record_at("docs/api.md", 4096, 3),
        record_at("logs/2024/app.log", 1_500_000, 2),
        record_at("logs/secret.log", 10, 4),
        record(".env", 64),
    ]
}

/// `count` objects spread over `fanout` directories per level.
pub fn generated_records(count: usize, fanout: usize) -> Vec<ObjectRecord> {
    let fanout = fanout.max(1);
    (0..count)
        .map(|i| {
            let key = format!(
                "d{}/d{}/d{}/file{}.dat",
                i % fanout,
                (i / fanout) % fanout,
                (i / (fanout * fanout)) % fanout,
                i
            );
            record_at(&key, (i as u64 * 37) % 100_000, (i % 600) as i64)
        })
        .collect()
}
