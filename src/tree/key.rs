//! Splitting object keys into path segments

use crate::error::{Result, TreeError};

/// An object key split into segments below the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    /// Label of the synthetic root (bucket or prefix)
    pub root: String,
    /// Non-empty segments below the root
    pub segments: Vec<String>,
    /// Key ended in `/`: all segments are directories, no leaf
    pub dir_marker: bool,
}

impl ParsedKey {
    /// Segments including the root label as the first element.
    pub fn full_path(&self) -> Vec<&str> {
        std::iter::once(self.root.as_str())
            .chain(self.segments.iter().map(String::as_str))
            .collect()
    }

    /// True when the key names the root itself (e.g. the prefix marker).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Turns raw keys into `ParsedKey`s relative to a fixed root.
#[derive(Debug, Clone)]
pub struct KeyParser {
    root: String,
    /// Prefix as a directory path, without trailing `/`
    base: String,
    /// Directory part of a partial prefix, up to and including its last `/`
    strip: String,
}

impl KeyParser {
    /// Root is the bucket when no prefix is given, the prefix otherwise.
    ///
    /// Keys inside the directory the prefix names (`photos` for `-p photos`
    /// or `-p photos/`) lose the whole prefix. Keys that only share a partial
    /// prefix (`photos/2020` for `-p photos/20`) lose its directory part, up
    /// to the last `/`.
    pub fn new(bucket: &str, prefix: Option<&str>) -> Self {
        match prefix.filter(|p| !p.is_empty()) {
            Some(prefix) => {
                let strip = match prefix.rfind('/') {
                    Some(i) => prefix[..=i].to_string(),
                    None => String::new(),
                };
                Self {
                    root: prefix.to_string(),
                    base: prefix.trim_end_matches('/').to_string(),
                    strip,
                }
            }
            None => Self {
                root: bucket.to_string(),
                base: String::new(),
                strip: String::new(),
            },
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root
    }

    pub fn parse(&self, key: &str) -> Result<ParsedKey> {
        if key.is_empty() {
            return Err(TreeError::MalformedKey {
                key: key.to_string(),
                reason: "empty key",
            });
        }

        let relative = self.relative(key);
        let segments = relative
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(ParsedKey {
            root: self.root.clone(),
            segments,
            dir_marker: key.ends_with('/'),
        })
    }

    fn relative<'a>(&self, key: &'a str) -> &'a str {
        if !self.base.is_empty() {
            if let Some(rest) = key.strip_prefix(self.base.as_str()) {
                if rest.is_empty() {
                    return rest;
                }
                if let Some(inside) = rest.strip_prefix('/') {
                    return inside;
                }
            }
        }
        key.strip_prefix(self.strip.as_str()).unwrap_or(key)
    }
}
