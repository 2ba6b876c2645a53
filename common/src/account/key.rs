use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use thiserror::Error;

use crate::{
    config::{PUBLIC_KEY_BODY_LENGTH, PUBLIC_KEY_PREFIX},
    error::{ErrorKind, FioError},
};

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublicKeyError {
    #[error("Public key must start with {PUBLIC_KEY_PREFIX}")]
    MissingPrefix,
    #[error("Invalid public key length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("Invalid base58 character: {0}")]
    InvalidCharacter(char),
}

impl From<PublicKeyError> for FioError {
    fn from(_: PublicKeyError) -> Self {
        FioError::new(ErrorKind::InvalidKey)
    }
}

/// FIO public key in its text form (`FIO` followed by a base58 body).
/// Only the format is checked; no curve point is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey(String);

impl PublicKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a public key and map format errors to `InvalidKey` with the offending value
    pub fn parse(value: &str) -> Result<Self, FioError> {
        value
            .parse()
            .map_err(|_: PublicKeyError| FioError::with_value(ErrorKind::InvalidKey, value))
    }
}

impl FromStr for PublicKey {
    type Err = PublicKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix(PUBLIC_KEY_PREFIX)
            .ok_or(PublicKeyError::MissingPrefix)?;

        if body.len() != PUBLIC_KEY_BODY_LENGTH {
            return Err(PublicKeyError::InvalidLength {
                expected: PUBLIC_KEY_BODY_LENGTH,
                got: body.len(),
            });
        }

        if let Some(c) = body.chars().find(|c| !BASE58_ALPHABET.contains(*c)) {
            return Err(PublicKeyError::InvalidCharacter(c));
        }

        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for PublicKey {
    type Error = PublicKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PublicKey> for String {
    fn from(key: PublicKey) -> Self {
        key.0
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "FIO6cDpi7vPnvRwMEdXtLnAmFwygaQ8CzD7vqKLBJ2GfgtHBQ9PPK";

    #[test]
    fn test_parse_valid_key() {
        let key: PublicKey = KEY.parse().unwrap();
        assert_eq!(key.as_str(), KEY);
        assert_eq!(key.to_string(), KEY);
    }

    #[test]
    fn test_reject_bad_keys() {
        assert_eq!(
            "EOS6cDpi7vPnvRwMEdXtLnAmFwygaQ8CzD7vqKLBJ2GfgtHBQ9PPK".parse::<PublicKey>(),
            Err(PublicKeyError::MissingPrefix)
        );
        assert!(matches!(
            "FIO6cDpi7".parse::<PublicKey>(),
            Err(PublicKeyError::InvalidLength { .. })
        ));
        assert_eq!(
            "FIO0cDpi7vPnvRwMEdXtLnAmFwygaQ8CzD7vqKLBJ2GfgtHBQ9PPK".parse::<PublicKey>(),
            Err(PublicKeyError::InvalidCharacter('0'))
        );
    }

    #[test]
    fn test_parse_maps_to_invalid_key() {
        let err = PublicKey::parse("FIOxyz").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
        assert_eq!(err.value(), Some("FIOxyz"));
    }

    #[test]
    fn test_serde_roundtrip_checks_format() {
        let json = format!("\"{}\"", KEY);
        let key: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key.as_str(), KEY);
        assert!(serde_json::from_str::<PublicKey>("\"FIO123\"").is_err());
    }
}
