//! The encoded hash string.
//!
//! Format (PHC string layout, shared with other Argon2id implementations):
//!
//! ```text
//! $argon2id$v=19$m=<memory KiB>,t=<iterations>,p=<parallelism>$<salt>$<key>
//! ```
//!
//! Salt and key use the standard base64 alphabet without padding. Decoding is
//! strict: padding and non-canonical trailing bits are rejected.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use zeroize::Zeroizing;

use crate::config::Argon2Parameters;
use crate::crypto::{DerivedKey, ARGON2_VERSION};
use crate::error::{PwdError, Result};

/// Algorithm identifier in the second field.
pub const ALGORITHM_ID: &str = "argon2id";

const DELIMITER: char = '$';
const FIELD_COUNT: usize = 6;

/// The cost parameters carried inside an encoded hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostParameters {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u8,
}

impl From<&Argon2Parameters> for CostParameters {
    fn from(params: &Argon2Parameters) -> Self {
        Self {
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
        }
    }
}

/// A parsed encoded hash.
///
/// Values are call-scoped: decoding never touches any shared configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedHash {
    costs: CostParameters,
    salt: Vec<u8>,
    key: Zeroizing<Vec<u8>>,
}

impl EncodedHash {
    /// Assemble an encoded hash from its parts.
    pub fn new(costs: CostParameters, salt: &[u8], key: &DerivedKey) -> Self {
        Self {
            costs,
            salt: salt.to_vec(),
            key: Zeroizing::new(key.as_bytes().to_vec()),
        }
    }

    /// Argon2 revision of the hash. Always the supported one once parsed.
    pub fn version(&self) -> u32 {
        ARGON2_VERSION
    }

    /// Memory, iterations and parallelism embedded in the hash.
    pub fn costs(&self) -> CostParameters {
        self.costs
    }

    /// Decoded salt bytes.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Decoded key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Whether this hash was produced with parameters other than `params`.
    ///
    /// Compares the cost parameters and the salt and key lengths against the
    /// normalized form of `params`.
    pub fn needs_rehash(&self, params: &Argon2Parameters) -> bool {
        let params = params.normalize();
        self.costs != CostParameters::from(&params)
            || self.salt.len() != params.salt_length as usize
            || self.key.len() != params.key_length as usize
    }
}

impl fmt::Debug for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedHash")
            .field("costs", &self.costs)
            .field("salt_len", &self.salt.len())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            ALGORITHM_ID,
            ARGON2_VERSION,
            self.costs.memory_kib,
            self.costs.iterations,
            self.costs.parallelism,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(self.key.as_slice()),
        )
    }
}

impl FromStr for EncodedHash {
    type Err = PwdError;

    fn from_str(encoded: &str) -> Result<Self> {
        let fields: Vec<&str> = encoded.split(DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            return Err(PwdError::Format(format!(
                "expected {} fields, got {}",
                FIELD_COUNT,
                fields.len()
            )));
        }
        if !fields[0].is_empty() {
            return Err(PwdError::Format(
                "hash must start with the delimiter".to_string(),
            ));
        }
        if fields[1] != ALGORITHM_ID {
            return Err(PwdError::Format(format!(
                "unsupported algorithm '{}'",
                fields[1]
            )));
        }

        let version = parse_version(fields[2])?;
        if version != i64::from(ARGON2_VERSION) {
            tracing::warn!(
                expected = ARGON2_VERSION,
                found = version,
                "rejecting hash with unsupported argon2 version"
            );
            return Err(PwdError::Version {
                expected: ARGON2_VERSION,
                found: version,
            });
        }

        let costs = parse_costs(fields[3])?;

        let salt = STANDARD_NO_PAD
            .decode(fields[4])
            .map_err(|source| PwdError::Decode {
                field: "salt",
                source,
            })?;
        let key = STANDARD_NO_PAD
            .decode(fields[5])
            .map_err(|source| PwdError::Decode { field: "key", source })?;

        Ok(Self {
            costs,
            salt,
            key: Zeroizing::new(key),
        })
    }
}

fn parse_version(field: &str) -> Result<i64> {
    field
        .strip_prefix("v=")
        .and_then(|value| value.parse::<i64>().ok())
        .ok_or_else(|| PwdError::Format(format!("invalid version segment '{}'", field)))
}

fn parse_costs(segment: &str) -> Result<CostParameters> {
    let mut pairs = segment.split(',');
    let memory_kib = parse_cost(pairs.next(), "m", segment)?;
    let iterations = parse_cost(pairs.next(), "t", segment)?;
    let parallelism = parse_cost(pairs.next(), "p", segment)?;
    if pairs.next().is_some() {
        return Err(invalid_costs(segment));
    }
    Ok(CostParameters {
        memory_kib,
        iterations,
        parallelism,
    })
}

fn parse_cost<T: FromStr>(pair: Option<&str>, name: &str, segment: &str) -> Result<T> {
    pair.and_then(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == name)
        .filter(|(_, value)| value.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|(_, value)| value.parse::<T>().ok())
        .ok_or_else(|| invalid_costs(segment))
}

fn invalid_costs(segment: &str) -> PwdError {
    PwdError::Format(format!("invalid parameter segment '{}'", segment))
}

/// Parse an encoded hash without verifying anything against it.
///
/// # Examples
///
/// ```
/// use pwd_core::decode_hash;
///
/// let parsed = decode_hash(
///     "$argon2id$v=19$m=65536,t=1,p=2$c29tZXNhbHQxMjM0NTY3OA$/tvMlkUmc2y9zdS4bf2WLy9ZxDIDBmbuN30ilzy6FsY",
/// )
/// .unwrap();
/// assert_eq!(parsed.costs().memory_kib, 65536);
/// assert_eq!(parsed.salt(), b"somesalt12345678");
/// ```
pub fn decode_hash(encoded: &str) -> Result<EncodedHash> {
    encoded.parse()
}
