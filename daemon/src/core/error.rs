use fio_common::error::{ErrorKind, FioError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlockchainError {
    #[error(transparent)]
    Fio(#[from] FioError),
    #[error("Domain {0} not found in storage")]
    DomainNotFound(String),
    #[error("Address {0} not found in storage")]
    AddressNotFound(String),
    #[error("Name {0} is already stored")]
    AlreadyStored(String),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl From<ErrorKind> for BlockchainError {
    fn from(kind: ErrorKind) -> Self {
        Self::Fio(FioError::new(kind))
    }
}

impl BlockchainError {
    /// API error reported to callers
    pub fn into_fio_error(self) -> FioError {
        match self {
            Self::Fio(e) => e,
            Self::DomainNotFound(domain) => {
                FioError::with_value(ErrorKind::FioDomainNotRegistered, domain)
            }
            Self::AddressNotFound(address) => {
                FioError::with_value(ErrorKind::FioAddressNotRegistered, address)
            }
            Self::AlreadyStored(name) => {
                FioError::with_value(ErrorKind::FioAddressRegistered, name)
            }
            Self::Serde(_) | Self::Any(_) => FioError::new(ErrorKind::InternalError),
        }
    }

    /// Error kind of the API error this converts into
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Fio(e) => Some(e.kind()),
            Self::DomainNotFound(_) => Some(ErrorKind::FioDomainNotRegistered),
            Self::AddressNotFound(_) => Some(ErrorKind::FioAddressNotRegistered),
            Self::AlreadyStored(_) => Some(ErrorKind::FioAddressRegistered),
            Self::Serde(_) | Self::Any(_) => None,
        }
    }
}

impl From<BlockchainError> for FioError {
    fn from(err: BlockchainError) -> Self {
        err.into_fio_error()
    }
}
