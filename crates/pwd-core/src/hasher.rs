//! Password hashing and verification.
//!
//! Parameters are passed explicitly. See [`crate::global`] for the
//! process-wide convenience layer.

use crate::codec::{CostParameters, EncodedHash};
use crate::config::Argon2Parameters;
use crate::crypto::{derive_key, generate_salt, OsRandom, RandomSource};
use crate::error::{PwdError, Result};

/// Hash a password with a fresh random salt.
///
/// Zero fields in `params` take their defaults. The result is the encoded
/// hash string, which embeds everything needed for verification.
///
/// Derivation is memory-hard and blocking: callers serving concurrent
/// requests should run it off latency-critical paths.
///
/// # Errors
///
/// Returns `PwdError::RandomSource` if the OS random source fails, and
/// `PwdError::Derivation` if the primitive rejects the parameters.
///
/// # Examples
///
/// ```
/// use pwd_core::{hash_password, verify_password, Argon2Parameters};
///
/// let params = Argon2Parameters {
///     memory_kib: 1024,
///     ..Argon2Parameters::DEFAULT
/// };
/// let encoded = hash_password(b"password", &params).unwrap();
/// assert!(encoded.starts_with("$argon2id$v=19$m=1024,t=1,p=2$"));
/// assert!(verify_password(b"password", &encoded).unwrap());
/// ```
pub fn hash_password(password: &[u8], params: &Argon2Parameters) -> Result<String> {
    hash_password_with_source(password, params, &OsRandom)
}

/// Hash a password, drawing the salt from `source`.
pub fn hash_password_with_source(
    password: &[u8],
    params: &Argon2Parameters,
    source: &dyn RandomSource,
) -> Result<String> {
    let params = params.normalize();
    tracing::debug!(
        memory_kib = params.memory_kib,
        iterations = params.iterations,
        parallelism = params.parallelism,
        "hashing password"
    );

    let salt = generate_salt(source, params.salt_length as usize)?;
    let key = derive_key(
        password,
        &salt,
        params.iterations,
        params.memory_kib,
        params.parallelism,
        params.key_length as usize,
    )?;

    Ok(EncodedHash::new(CostParameters::from(&params), &salt, &key).to_string())
}

/// Verify a password against an encoded hash.
///
/// Returns `Ok(false)` for a wrong password. The cost parameters come from
/// the encoded hash alone; no shared configuration is read or written.
///
/// # Errors
///
/// Returns `PwdError::Format`, `PwdError::Version` or `PwdError::Decode` for
/// a malformed or incompatible hash, and `PwdError::Derivation` if the
/// embedded parameters are outside what the primitive accepts.
///
/// # Aborts
///
/// The memory cost is taken from the stored string as-is, up to `u32::MAX`
/// KiB. A hash claiming more memory than the host can allocate aborts the
/// process on allocation failure. Use [`verify_password_with_limit`] when
/// stored hashes are not fully trusted.
pub fn verify_password(password: &[u8], encoded: &str) -> Result<bool> {
    let parsed: EncodedHash = encoded.parse()?;
    verify_parsed(password, &parsed)
}

/// Verify a password, refusing hashes whose memory cost exceeds
/// `max_memory_kib`.
///
/// The limit is checked before any memory is allocated.
///
/// # Errors
///
/// As [`verify_password`], plus `PwdError::Derivation` when the embedded
/// memory cost is above the limit.
pub fn verify_password_with_limit(
    password: &[u8],
    encoded: &str,
    max_memory_kib: u32,
) -> Result<bool> {
    let parsed: EncodedHash = encoded.parse()?;
    let memory_kib = parsed.costs().memory_kib;
    if memory_kib > max_memory_kib {
        tracing::warn!(
            memory_kib,
            max_memory_kib,
            "rejecting hash above memory limit"
        );
        return Err(PwdError::Derivation(format!(
            "memory cost {} KiB exceeds limit of {} KiB",
            memory_kib, max_memory_kib
        )));
    }
    verify_parsed(password, &parsed)
}

fn verify_parsed(password: &[u8], parsed: &EncodedHash) -> Result<bool> {
    let costs = parsed.costs();
    tracing::debug!(
        memory_kib = costs.memory_kib,
        iterations = costs.iterations,
        parallelism = costs.parallelism,
        "verifying password"
    );

    let candidate = derive_key(
        password,
        parsed.salt(),
        costs.iterations,
        costs.memory_kib,
        costs.parallelism,
        parsed.key().len(),
    )?;

    Ok(candidate.ct_eq(parsed.key()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> Argon2Parameters {
        Argon2Parameters {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
            salt_length: 16,
            key_length: 32,
        }
    }

    struct FixedSource(u8);

    impl RandomSource for FixedSource {
        fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
            dest.fill(self.0);
            Ok(())
        }
    }

    struct FailingSource;

    impl RandomSource for FailingSource {
        fn fill_bytes(&self, _dest: &mut [u8]) -> Result<()> {
            Err(PwdError::RandomSource("entropy exhausted".to_string()))
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let encoded = hash_password(b"password", &fast_params()).unwrap();
        assert!(encoded.starts_with("$argon2id$v=19$m=256,t=1,p=1$"));
        assert!(verify_password(b"password", &encoded).unwrap());
        assert!(!verify_password(b"wrong", &encoded).unwrap());
    }

    #[test]
    fn test_hash_unique_salts() {
        let hash1 = hash_password(b"same-password", &fast_params()).unwrap();
        let hash2 = hash_password(b"same-password", &fast_params()).unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_fixed_source_is_deterministic() {
        let hash1 = hash_password_with_source(b"password", &fast_params(), &FixedSource(7)).unwrap();
        let hash2 = hash_password_with_source(b"password", &fast_params(), &FixedSource(7)).unwrap();
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_random_source_failure_propagates() {
        let result = hash_password_with_source(b"password", &fast_params(), &FailingSource);
        assert!(matches!(result, Err(PwdError::RandomSource(_))));
    }

    #[test]
    fn test_hash_normalizes_zero_fields() {
        let params = Argon2Parameters {
            memory_kib: 256,
            iterations: 0,
            parallelism: 1,
            salt_length: 0,
            key_length: 0,
        };
        let encoded = hash_password(b"password", &params).unwrap();
        let parsed: EncodedHash = encoded.parse().unwrap();
        assert_eq!(parsed.costs().iterations, 1);
        assert_eq!(parsed.salt().len(), 16);
        assert_eq!(parsed.key().len(), 32);
    }

    #[test]
    fn test_custom_lengths_round_trip() {
        let params = Argon2Parameters {
            salt_length: 24,
            key_length: 64,
            ..fast_params()
        };
        let encoded = hash_password(b"password", &params).unwrap();
        let parsed: EncodedHash = encoded.parse().unwrap();
        assert_eq!(parsed.salt().len(), 24);
        assert_eq!(parsed.key().len(), 64);
        assert!(verify_password(b"password", &encoded).unwrap());
    }

    #[test]
    fn test_rejected_parameters_surface_as_derivation_error() {
        let params = Argon2Parameters {
            salt_length: 4,
            ..fast_params()
        };
        let result = hash_password(b"password", &params);
        assert!(matches!(result, Err(PwdError::Derivation(_))));
    }

    #[test]
    fn test_empty_password() {
        let encoded = hash_password(b"", &fast_params()).unwrap();
        assert!(verify_password(b"", &encoded).unwrap());
        assert!(!verify_password(b"not-empty", &encoded).unwrap());
    }

    #[test]
    fn test_unicode_password() {
        let password = "パスワード🔐";
        let encoded = hash_password(password.as_bytes(), &fast_params()).unwrap();
        assert!(verify_password(password.as_bytes(), &encoded).unwrap());
        assert!(!verify_password(b"password", &encoded).unwrap());
    }

    #[test]
    fn test_verify_uses_embedded_parameters() {
        let encoded = hash_password(
            b"password",
            &Argon2Parameters {
                memory_kib: 512,
                iterations: 2,
                ..fast_params()
            },
        )
        .unwrap();
        assert!(encoded.contains("$m=512,t=2,p=1$"));
        assert!(verify_password(b"password", &encoded).unwrap());
    }

    #[test]
    fn test_memory_limit_rejects_before_deriving() {
        let encoded = "$argon2id$v=19$m=4294967295,t=1,p=1$c29tZXNhbHQxMjM0NTY3OA$AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE";
        let result = verify_password_with_limit(b"password", encoded, 64 * 1024);
        assert!(matches!(result, Err(PwdError::Derivation(_))));
    }

    #[test]
    fn test_memory_limit_allows_hashes_within_it() {
        let encoded = hash_password(b"password", &fast_params()).unwrap();
        assert!(verify_password_with_limit(b"password", &encoded, 256).unwrap());
        assert!(!verify_password_with_limit(b"wrong", &encoded, 256).unwrap());
        assert!(matches!(
            verify_password_with_limit(b"password", &encoded, 255),
            Err(PwdError::Derivation(_))
        ));
    }

    #[test]
    fn test_verify_malformed_hash() {
        let result = verify_password(b"password", "not-a-valid-hash");
        assert!(matches!(result, Err(PwdError::Format(_))));
    }
}
