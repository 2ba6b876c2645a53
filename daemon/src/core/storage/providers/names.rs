// Name registry storage provider trait

use crate::core::error::BlockchainError;
use async_trait::async_trait;
use fio_common::account::PublicKey;
use serde::{Deserialize, Serialize};

/// Registered FIO domain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Row id, assigned on registration
    pub id: u64,
    /// Lowercase domain name
    pub name: String,
    pub owner: PublicKey,
    /// Anyone may register addresses on a public domain
    pub is_public: bool,
}

/// Registered FIO address
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub id: u64,
    /// Lowercase `name@domain`
    pub name: String,
    pub domain: String,
    pub owner: PublicKey,
}

/// Storage provider for the name registry
#[async_trait]
pub trait NameProvider: Send + Sync {
    // ===== Domains =====

    async fn is_domain_registered(&self, domain: &str) -> Result<bool, BlockchainError>;

    /// Get a domain record, None if not registered
    async fn get_domain(&self, domain: &str) -> Result<Option<DomainRecord>, BlockchainError>;

    /// Register a domain and return its row id
    ///
    /// # Errors
    /// * Returns error if the domain is already registered
    async fn register_domain(
        &mut self,
        domain: String,
        owner: PublicKey,
    ) -> Result<u64, BlockchainError>;

    async fn set_domain_public(
        &mut self,
        domain: &str,
        is_public: bool,
    ) -> Result<(), BlockchainError>;

    async fn get_domains_by_owner(
        &self,
        owner: &PublicKey,
    ) -> Result<Vec<DomainRecord>, BlockchainError>;

    /// List domains with a row id >= `from_id`, in id order
    async fn list_domains(
        &self,
        from_id: u64,
        limit: usize,
    ) -> Result<Vec<DomainRecord>, BlockchainError>;

    // ===== Addresses =====

    async fn is_address_registered(&self, address: &str) -> Result<bool, BlockchainError>;

    async fn get_address(&self, address: &str) -> Result<Option<AddressRecord>, BlockchainError>;

    /// Register an address and return its row id
    ///
    /// # Errors
    /// * Returns error if the address is already registered
    async fn register_address(
        &mut self,
        address: String,
        domain: String,
        owner: PublicKey,
    ) -> Result<u64, BlockchainError>;

    /// Remove an address from the registry, making the name free again
    async fn delete_address(&mut self, address: &str) -> Result<AddressRecord, BlockchainError>;

    async fn get_addresses_by_owner(
        &self,
        owner: &PublicKey,
    ) -> Result<Vec<AddressRecord>, BlockchainError>;

    /// List addresses with a row id >= `from_id`, in id order
    async fn list_addresses(
        &self,
        from_id: u64,
        limit: usize,
    ) -> Result<Vec<AddressRecord>, BlockchainError>;
}
