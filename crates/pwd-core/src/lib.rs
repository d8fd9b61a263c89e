//! # pwd core
//!
//! Argon2id password hashing with a self-describing encoded hash and
//! constant-time verification.
//!
//! ## Architecture
//!
//! - **config**: the five tuning parameters, normalization and a shared store
//! - **global**: process-wide parameter set for singleton-style callers
//! - **codec**: the `$argon2id$v=19$m=..,t=..,p=..$salt$key` string
//! - **hasher**: hash and verify
//! - **crypto**: Argon2id derivation, salt generation, constant-time compare
//!
//! ## Example
//!
//! ```
//! use pwd_core::{hash_password, verify_password, Argon2Parameters};
//!
//! let params = Argon2Parameters {
//!     memory_kib: 1024,
//!     ..Argon2Parameters::default()
//! };
//! let encoded = hash_password(b"hunter2", &params).unwrap();
//!
//! assert!(verify_password(b"hunter2", &encoded).unwrap());
//! assert!(!verify_password(b"hunter3", &encoded).unwrap());
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod global;
pub mod hasher;

pub use codec::{decode_hash, CostParameters, EncodedHash};
pub use config::{normalize, Argon2Parameters, ParameterStore};
pub use crypto::ARGON2_VERSION;
pub use error::{PwdError, Result};
pub use hasher::{
    hash_password, hash_password_with_source, verify_password, verify_password_with_limit,
};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
