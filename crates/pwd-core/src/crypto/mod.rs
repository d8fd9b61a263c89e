//! Cryptographic building blocks for pwd.
//!
//! - **key**: Argon2id key derivation (delegated to the `argon2` crate)
//! - **salt**: salt generation from a secure random source
//! - **ct**: constant-time byte comparison
//!
//! Derived keys and salts are held in zeroize-on-drop buffers.

pub mod ct;
pub mod key;
pub mod salt;

pub use ct::constant_time_eq;
pub use key::{derive_key, DerivedKey, ARGON2_VERSION};
pub use salt::{generate_salt, OsRandom, RandomSource};
