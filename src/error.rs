//! Error types for tree construction and rendering

use std::io;

use thiserror::Error;

/// Errors surfaced by the tree engine.
///
/// Only `InvalidPattern` and `SinkWrite` abort a run. `MalformedKey` and
/// `StructuralConflict` are collected as diagnostics while building.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("malformed key {key:?}: {reason}")]
    MalformedKey { key: String, reason: &'static str },

    #[error("structural conflict at '{path}': directory replaces file")]
    StructuralConflict { path: String },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("error writing output: {0}")]
    SinkWrite(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;
