//! Key derivation using Argon2id.
//!
//! This is the only place that talks to the `argon2` crate. Everything above
//! it works with plain cost parameters and byte slices.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

use crate::crypto::ct::constant_time_eq;
use crate::error::{PwdError, Result};

/// Argon2 revision implemented by the primitive (0x13).
pub const ARGON2_VERSION: u32 = 19;

/// A key derived from a password.
///
/// The key bytes are zeroized from memory when dropped.
#[derive(Clone)]
pub struct DerivedKey {
    key: Zeroizing<Vec<u8>>,
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value outside the encoded hash.
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Length of the key in bytes.
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// Whether the key holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Compare against `expected` in constant time.
    pub fn ct_eq(&self, expected: &[u8]) -> bool {
        constant_time_eq(&self.key, expected)
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("len", &self.key.len())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive `output_len` bytes from `password` and `salt` using Argon2id.
///
/// Deterministic for fixed inputs. The call is memory-hard and blocks for the
/// whole derivation; it cannot be interrupted once started.
///
/// # Errors
///
/// Returns `PwdError::Derivation` when the primitive rejects the inputs, for
/// example memory below 8 KiB per lane, a salt shorter than 8 bytes, or an
/// output shorter than 4 bytes.
///
/// # Examples
///
/// ```
/// use pwd_core::crypto::derive_key;
///
/// let key = derive_key(b"password", b"unique-salt-1234", 1, 64, 1, 32).unwrap();
/// assert_eq!(key.len(), 32);
/// ```
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    memory_kib: u32,
    parallelism: u8,
    output_len: usize,
) -> Result<DerivedKey> {
    let params = Params::new(
        memory_kib,
        iterations,
        u32::from(parallelism),
        Some(output_len),
    )
    .map_err(|e| PwdError::Derivation(format!("Invalid Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new(vec![0u8; output_len]);
    argon2
        .hash_password_into(password, salt, &mut key)
        .map_err(|e| PwdError::Derivation(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKey { key })
}
