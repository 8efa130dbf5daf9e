//! Error types for parsing identifiers and permission names.

use std::num::ParseIntError;

/// Result type alias using the crate error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid snowflake '{input}': {source}")]
    InvalidSnowflake {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Unknown permission: {0}")]
    UnknownPermission(String),
}
