//! Error types for the configuration store.

use std::io;
use thiserror::Error;

/// Configuration operation result type.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or reading site mover configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The source file could not be read (missing, permissions).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The source text is not a flat sequence of `NAME = "value"` lines.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required option is absent from the source. Carries the key name.
    #[error("Missing required option: {0}")]
    MissingValue(&'static str),

    /// A caller asked for a name outside the recognized option set.
    #[error("Unknown configuration option: {0}")]
    UnknownKey(String),
}
