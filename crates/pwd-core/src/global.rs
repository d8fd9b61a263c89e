//! Process-wide parameter set.
//!
//! A thin layer over [`ParameterStore`] for callers that configure hashing
//! once at startup. It starts at the default parameters. Prefer passing an
//! [`Argon2Parameters`] value explicitly where possible.

use crate::config::{Argon2Parameters, ParameterStore};
use crate::error::Result;

pub use crate::hasher::verify_password;

static ACTIVE: ParameterStore = ParameterStore::new(Argon2Parameters::DEFAULT);

/// Replace the process-wide parameter set with the normalized candidate.
pub fn set_configuration(candidate: Argon2Parameters) -> Argon2Parameters {
    ACTIVE.set(candidate)
}

/// Snapshot of the process-wide parameter set.
pub fn current_configuration() -> Argon2Parameters {
    ACTIVE.current()
}

/// Hash a password with the process-wide parameter set.
///
/// The set is read once, so a concurrent [`set_configuration`] yields either
/// the old or the new parameters, never a mix.
pub fn hash_password(password: &[u8]) -> Result<String> {
    crate::hasher::hash_password(password, &current_configuration())
}
