use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Broad class of an error, deciding whether a caller may retry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed input, detected before any state mutation
    Validation,
    /// The actor is not allowed to act on the target
    Authorization,
    /// The target does not exist or is in the wrong state
    StateConsistency,
    /// Fee or balance constraints; retryable with a higher max fee or more funds
    Economic,
    Internal,
}

impl ErrorCategory {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Economic)
    }
}

/// Every error kind surfaced to API callers.
/// The display string is the canonical message of the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("Invalid FIO Address")]
    InvalidFioAddress,
    #[error("TPID must be empty or valid FIO address")]
    InvalidTpid,
    #[error("Invalid fee value")]
    InvalidFeeValue,
    #[error("Invalid FIO domain")]
    InvalidDomain,
    #[error("Invalid amount value")]
    InvalidAmount,
    #[error("Invalid FIO Public Key")]
    InvalidKey,
    #[error("Invalid content field")]
    InvalidContent,
    #[error("Invalid limit")]
    InvalidLimit,
    #[error("Invalid table")]
    InvalidTable,
    #[error("Parse Error")]
    ParseError,
    #[error("Request signature not valid or not allowed.")]
    SignatureError,
    #[error("Invalid Actor")]
    InvalidActor,
    #[error("The signer does not own the domain")]
    InvalidDomainOwner,
    #[error("FIO Address not registered")]
    FioAddressNotRegistered,
    #[error("FIO address already registered")]
    FioAddressRegistered,
    #[error("FIO Domain not registered")]
    FioDomainNotRegistered,
    #[error("FIO domain already registered")]
    DomainRegistered,
    #[error("FIO Domain is not public. Only owner can create FIO Addresses.")]
    DomainNotPublic,
    #[error("No FIO names")]
    NoFioNames,
    #[error("Public key not found")]
    KeyNotFound,
    #[error("Fee exceeds supplied maximum.")]
    FeeExceedsMax,
    #[error("Insufficient funds to cover fee")]
    InsufficientFunds,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Action invalid or not found")]
    UnknownAction,
    #[error("Invalid Contract")]
    InvalidContract,
    #[error("Arithmetic overflow")]
    Overflow,
    #[error("Internal error")]
    InternalError,
}

impl ErrorKind {
    /// Find the kind whose canonical message is `message`
    pub fn from_message(message: &str) -> Option<Self> {
        Self::iter().find(|kind| kind.to_string() == message)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFioAddress
            | Self::InvalidTpid
            | Self::InvalidFeeValue
            | Self::InvalidDomain
            | Self::InvalidAmount
            | Self::InvalidKey
            | Self::InvalidContent
            | Self::InvalidLimit
            | Self::InvalidTable
            | Self::ParseError => ErrorCategory::Validation,
            Self::SignatureError | Self::InvalidActor | Self::InvalidDomainOwner => {
                ErrorCategory::Authorization
            }
            Self::FioAddressNotRegistered
            | Self::FioAddressRegistered
            | Self::FioDomainNotRegistered
            | Self::DomainRegistered
            | Self::DomainNotPublic
            | Self::NoFioNames
            | Self::KeyNotFound => ErrorCategory::StateConsistency,
            Self::FeeExceedsMax | Self::InsufficientFunds | Self::InsufficientBalance => {
                ErrorCategory::Economic
            }
            Self::UnknownAction | Self::InvalidContract | Self::Overflow | Self::InternalError => {
                ErrorCategory::Internal
            }
        }
    }

    /// HTTP status code reported for this kind
    pub fn status_code(&self) -> u16 {
        match self {
            Self::SignatureError | Self::InvalidActor | Self::InvalidDomainOwner => 403,
            Self::NoFioNames | Self::KeyNotFound => 404,
            Self::UnknownAction | Self::InvalidContract | Self::Overflow | Self::InternalError => {
                500
            }
            _ => 400,
        }
    }

    /// Name of the request field the error is attached to
    pub fn field(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidFioAddress
            | Self::FioAddressNotRegistered
            | Self::FioAddressRegistered
            | Self::DomainNotPublic => "fio_address",
            Self::InvalidDomain
            | Self::FioDomainNotRegistered
            | Self::DomainRegistered
            | Self::InvalidDomainOwner => "fio_domain",
            Self::InvalidTpid => "tpid",
            Self::InvalidFeeValue | Self::FeeExceedsMax | Self::InsufficientFunds => "max_fee",
            Self::InvalidAmount | Self::InsufficientBalance => "amount",
            Self::InvalidKey | Self::KeyNotFound => "fio_public_key",
            Self::InvalidContent => "content",
            Self::InvalidLimit => "limit",
            Self::InvalidTable => "table",
            Self::InvalidActor => "actor",
            Self::UnknownAction => "action",
            Self::InvalidContract => "account",
            Self::ParseError
            | Self::SignatureError
            | Self::NoFioNames
            | Self::Overflow
            | Self::InternalError => return None,
        })
    }
}

/// Error returned by every fallible operation of the accounting model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FioError {
    kind: ErrorKind,
    // Offending input, echoed back in the error envelope
    value: Option<String>,
}

impl FioError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, value: None }
    }

    pub fn with_value(kind: ErrorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl From<ErrorKind> for FioError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl Display for FioError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for FioError {}
