//! Reading bucket listings produced by the storage tooling
//!
//! Two shapes are understood:
//! - JSON from `aws s3api list-objects[-v2]` (`{"Contents": [...]}`) or a bare
//!   array of `{"Key", "Size", "LastModified"}` objects
//! - text from `aws s3 ls --recursive`, one `date time size key` per line

use std::io::{self, Read};
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use log::debug;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::tree::ObjectRecord;

/// `2024-01-02 15:04:05       1234 path/to/key`
static LS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\s+(\d+) (.+)$")
        .expect("LS_LINE regex is invalid")
});

static LS_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*PRE (.+)$").expect("LS_PREFIX regex is invalid"));

const LS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("cannot read listing: {0}")]
    Io(#[from] io::Error),

    #[error("invalid JSON listing: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: unrecognised listing entry {content:?}")]
    Line { line: usize, content: String },
}

/// Listing input format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingFormat {
    /// JSON when the input starts with `{` or `[`, text otherwise
    #[default]
    Auto,
    Json,
    Ls,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonListing {
    Bare(Vec<ObjectRecord>),
    Page {
        #[serde(rename = "Contents", default)]
        contents: Vec<ObjectRecord>,
    },
}

/// Read a complete listing into memory.
pub fn read_listing<R: Read>(
    mut reader: R,
    format: ListingFormat,
) -> Result<Vec<ObjectRecord>, ListingError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    let format = match format {
        ListingFormat::Auto => detect_format(&input),
        other => other,
    };
    let records = match format {
        ListingFormat::Json => parse_json(&input)?,
        _ => parse_ls(&input)?,
    };

    debug!("read {} records ({:?} listing)", records.len(), format);
    Ok(records)
}

fn detect_format(input: &str) -> ListingFormat {
    match input.trim_start().chars().next() {
        Some('{') | Some('[') => ListingFormat::Json,
        _ => ListingFormat::Ls,
    }
}

pub fn parse_json(input: &str) -> Result<Vec<ObjectRecord>, ListingError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(match serde_json::from_str(input)? {
        JsonListing::Bare(records) => records,
        JsonListing::Page { contents } => contents,
    })
}

/// Parse `aws s3 ls` output. `PRE name/` lines from non-recursive listings
/// become directory markers.
///
/// The CLI prints timestamps in the local timezone of the machine that ran it
/// and they carry no offset. They are taken as UTC here, so dates shown with
/// `-D` are shifted by that machine's offset.
pub fn parse_ls(input: &str) -> Result<Vec<ObjectRecord>, ListingError> {
    let mut records = Vec::new();

    for (i, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let invalid = || ListingError::Line {
            line: i + 1,
            content: line.to_string(),
        };

        if let Some(caps) = LS_LINE.captures(line) {
            let time = NaiveDateTime::parse_from_str(&caps[1], LS_TIME_FORMAT)
                .map_err(|_| invalid())?
                .and_utc();
            let size = caps[2].parse().map_err(|_| invalid())?;
            records.push(ObjectRecord::new(&caps[3], size, Some(time)));
        } else if let Some(caps) = LS_PREFIX.captures(line) {
            records.push(ObjectRecord::new(&caps[1], 0, None));
        } else {
            return Err(invalid());
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::base_time;

    #[test]
    fn test_s3api_document() {
        let input = r#"{
            "Contents": [
                {"Key": "a/b.txt", "Size": 12, "LastModified": "2024-01-02T15:04:05.000Z", "ETag": "\"x\""},
                {"Key": "c/", "Size": 0, "LastModified": "2024-01-02T15:04:05+00:00"}
            ]
        }"#;
        let records = read_listing(input.as_bytes(), ListingFormat::Auto).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], ObjectRecord::new("a/b.txt", 12, Some(base_time())));
        assert_eq!(records[1].key, "c/");
    }

    #[test]
    fn test_bare_array_and_missing_fields() {
        let input = r#"[{"Key": "x"}]"#;
        let records = parse_json(input).unwrap();
        assert_eq!(records, vec![ObjectRecord::new("x", 0, None)]);
    }

    #[test]
    fn test_empty_bucket_document() {
        assert!(parse_json("{}").unwrap().is_empty());
        assert!(read_listing("".as_bytes(), ListingFormat::Json).unwrap().is_empty());
    }

    #[test]
    fn test_ls_lines() {
        let input = "2024-01-02 15:04:05       1234 photos/2020/a b.jpg\n\
                     \n\
                     2024-01-02 15:04:05          0 photos/\n";
        let records = read_listing(input.as_bytes(), ListingFormat::Auto).unwrap();
        assert_eq!(
            records,
            vec![
                ObjectRecord::new("photos/2020/a b.jpg", 1234, Some(base_time())),
                ObjectRecord::new("photos/", 0, Some(base_time())),
            ]
        );
    }

    #[test]
    fn test_ls_prefix_lines() {
        let records = parse_ls("                           PRE logs/\n").unwrap();
        assert_eq!(records, vec![ObjectRecord::new("logs/", 0, None)]);
    }

    #[test]
    fn test_ls_garbage_reports_line() {
        let err = parse_ls("2024-01-02 15:04:05 12 ok\nnot a listing\n").unwrap_err();
        assert!(matches!(err, ListingError::Line { line: 2, .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = read_listing("{\"Contents\": 3}".as_bytes(), ListingFormat::Auto).unwrap_err();
        assert!(matches!(err, ListingError::Json(_)));
    }
}
