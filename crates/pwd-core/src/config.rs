//! Argon2id tuning parameters and their shared store.
//!
//! A parameter set is a plain `Copy` value. Zero in any field means "use the
//! default", and [`normalize`] resolves every field in one step so a set is
//! never partially updated. [`ParameterStore`] holds an active set behind a
//! reader/writer lock for callers that want a mutable shared configuration.
//!
//! Parameter sets can also be stored in TOML under an `[argon2]` table:
//!
//! ```toml
//! [argon2]
//! memory_kib = 65536
//! iterations = 1
//! parallelism = 2
//! salt_length = 16
//! key_length = 32
//! ```

use std::path::Path;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fs::write_atomic;

/// Default memory cost in KiB (64 MiB).
pub const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;

/// Default number of passes over memory.
pub const DEFAULT_ITERATIONS: u32 = 1;

/// Default number of lanes.
pub const DEFAULT_PARALLELISM: u8 = 2;

/// Default salt length in bytes.
pub const DEFAULT_SALT_LENGTH: u32 = 16;

/// Default derived key length in bytes.
pub const DEFAULT_KEY_LENGTH: u32 = 32;

/// The five Argon2id tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Argon2Parameters {
    /// Memory to use for the derivation, in KiB
    pub memory_kib: u32,
    /// Number of passes over memory (time cost)
    pub iterations: u32,
    /// Number of lanes computed in parallel
    pub parallelism: u8,
    /// Length of the random salt in bytes
    pub salt_length: u32,
    /// Length of the derived key in bytes
    pub key_length: u32,
}

impl Argon2Parameters {
    /// The fixed default parameter set.
    pub const DEFAULT: Self = Self {
        memory_kib: DEFAULT_MEMORY_KIB,
        iterations: DEFAULT_ITERATIONS,
        parallelism: DEFAULT_PARALLELISM,
        salt_length: DEFAULT_SALT_LENGTH,
        key_length: DEFAULT_KEY_LENGTH,
    };

    /// Replace every zero field with its default, keeping positive values.
    pub const fn normalize(self) -> Self {
        Self {
            memory_kib: if self.memory_kib == 0 {
                DEFAULT_MEMORY_KIB
            } else {
                self.memory_kib
            },
            iterations: if self.iterations == 0 {
                DEFAULT_ITERATIONS
            } else {
                self.iterations
            },
            parallelism: if self.parallelism == 0 {
                DEFAULT_PARALLELISM
            } else {
                self.parallelism
            },
            salt_length: if self.salt_length == 0 {
                DEFAULT_SALT_LENGTH
            } else {
                self.salt_length
            },
            key_length: if self.key_length == 0 {
                DEFAULT_KEY_LENGTH
            } else {
                self.key_length
            },
        }
    }
}

impl Default for Argon2Parameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Normalize a caller-supplied parameter set. Never fails.
pub fn normalize(candidate: Argon2Parameters) -> Argon2Parameters {
    candidate.normalize()
}

/// A shared, atomically replaceable parameter set.
///
/// Readers receive a copy, so a hash call holds one consistent snapshot even
/// if the store is reconfigured while it runs.
#[derive(Debug)]
pub struct ParameterStore {
    active: RwLock<Argon2Parameters>,
}

impl ParameterStore {
    /// Create a store holding `initial` after normalization.
    pub const fn new(initial: Argon2Parameters) -> Self {
        Self {
            active: RwLock::new(initial.normalize()),
        }
    }

    /// Replace the active set with the normalized candidate.
    ///
    /// Returns the set that is now active.
    pub fn set(&self, candidate: Argon2Parameters) -> Argon2Parameters {
        let normalized = candidate.normalize();
        // A poisoned lock still holds a whole value: writes are single assignments.
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = normalized;
        tracing::debug!(
            memory_kib = normalized.memory_kib,
            iterations = normalized.iterations,
            parallelism = normalized.parallelism,
            salt_length = normalized.salt_length,
            key_length = normalized.key_length,
            "argon2 parameters updated"
        );
        normalized
    }

    /// Snapshot of the active set.
    pub fn current(&self) -> Argon2Parameters {
        *self.active.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(Argon2Parameters::DEFAULT)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ParametersFile {
    #[serde(default)]
    argon2: Argon2Parameters,
}

/// Parse a TOML document with an `[argon2]` table into a normalized set.
///
/// A missing table or missing keys fall back to the defaults.
pub fn parse_parameters(contents: &str) -> Result<Argon2Parameters> {
    let file: ParametersFile = toml::from_str(contents)?;
    Ok(file.argon2.normalize())
}

/// Read a normalized parameter set from a TOML file.
pub fn read_parameters(path: &Path) -> Result<Argon2Parameters> {
    let contents = std::fs::read_to_string(path)?;
    parse_parameters(&contents)
}

/// Write a parameter set to a TOML file, creating parent directories.
///
/// The set is normalized before writing so the file never holds zeros.
pub fn write_parameters(path: &Path, params: &Argon2Parameters) -> Result<()> {
    let file = ParametersFile {
        argon2: params.normalize(),
    };
    let contents = toml::to_string_pretty(&file)?;
    write_atomic(path, contents.as_bytes())?;
    Ok(())
}
