//! Salt generation from a cryptographically secure random source.

use zeroize::Zeroizing;

use crate::error::{PwdError, Result};

/// A source of cryptographically secure random bytes.
///
/// Implementations must fill the whole buffer or fail; they must never fall
/// back to a weaker generator.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;
}

/// The operating system CSPRNG, via `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        getrandom::getrandom(dest)
            .map_err(|e| PwdError::RandomSource(format!("Failed to generate salt: {}", e)))
    }
}

/// Generate `length` fresh salt bytes from `source`.
pub fn generate_salt(source: &dyn RandomSource, length: usize) -> Result<Zeroizing<Vec<u8>>> {
    let mut salt = Zeroizing::new(vec![0u8; length]);
    source.fill_bytes(&mut salt)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    impl RandomSource for FailingSource {
        fn fill_bytes(&self, _dest: &mut [u8]) -> Result<()> {
            Err(PwdError::RandomSource("entropy exhausted".to_string()))
        }
    }

    #[test]
    fn test_generate_salt_length() {
        let salt = generate_salt(&OsRandom, 16).unwrap();
        assert_eq!(salt.len(), 16);
    }

    #[test]
    fn test_generate_salt_unique() {
        let salt1 = generate_salt(&OsRandom, 16).unwrap();
        let salt2 = generate_salt(&OsRandom, 16).unwrap();
        assert_ne!(salt1.as_slice(), salt2.as_slice());
    }

    #[test]
    fn test_generate_salt_propagates_failure() {
        let result = generate_salt(&FailingSource, 16);
        assert!(matches!(result, Err(PwdError::RandomSource(_))));
    }
}
