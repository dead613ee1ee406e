//! Error types for the depth engine.
//!
//! Only container-level failures surface as errors. Malformed entries
//! inside a well-formed manifest degrade to "no known parents", and a
//! lookup miss is an ordinary `None`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading input for a refresh.
#[derive(Debug, Error)]
pub enum Error {
    /// The manifest is not a well-formed node/edge description.
    #[error("failed to parse manifest: {0}")]
    Manifest(#[source] serde_json::Error),

    /// The manifest file could not be read.
    #[error("failed to read manifest at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine configuration could not be parsed.
    #[error("invalid engine config: {0}")]
    Config(#[source] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
