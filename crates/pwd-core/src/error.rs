//! Error types for pwd core operations.
//!
//! Every failure in hashing, decoding or verification surfaces as a distinct
//! variant so callers can tell a malformed stored hash apart from an
//! incompatible one. A wrong password is not an error: verification returns
//! `Ok(false)`.

use thiserror::Error;

/// Result type alias for pwd operations.
pub type Result<T> = std::result::Result<T, PwdError>;

/// Core error type for pwd operations.
#[derive(Debug, Error)]
pub enum PwdError {
    /// The secure random source failed while generating a salt
    #[error("Random source error: {0}")]
    RandomSource(String),

    /// The encoded hash is structurally malformed
    #[error("argon2id hash is not in the correct format: {0}")]
    Format(String),

    /// The encoded hash was produced by an unsupported Argon2 revision
    #[error("incorrect argon2 version: expected {expected}, got {found}")]
    Version { expected: u32, found: i64 },

    /// The salt or key segment is not valid unpadded base64
    #[error("Decode error in {field}: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    /// The Argon2 primitive rejected its inputs
    #[error("Key derivation error: {0}")]
    Derivation(String),

    /// Parameter file could not be parsed or serialized
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl From<toml::de::Error> for PwdError {
    fn from(err: toml::de::Error) -> Self {
        PwdError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PwdError {
    fn from(err: toml::ser::Error) -> Self {
        PwdError::Config(err.to_string())
    }
}
