use async_trait::async_trait;
use fio_common::account::PublicKey;
use indexmap::IndexMap;
use log::trace;

use super::{AddressRecord, DomainRecord, NameProvider, ObtProvider, ObtRecord, Storage};
use crate::core::error::BlockchainError;

/// In-memory storage
///
/// Records are kept in registration order, so row ids grow with the
/// iteration order and range listing is a filter over the map.
#[derive(Default)]
pub struct MemoryStorage {
    domains: IndexMap<String, DomainRecord>,
    addresses: IndexMap<String, AddressRecord>,
    obt_records: Vec<ObtRecord>,
    next_domain_id: u64,
    next_address_id: u64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Builder Methods for Initial State =====

    /// Register a domain owned by `owner`
    pub fn with_domain(mut self, domain: &str, owner: &PublicKey, is_public: bool) -> Self {
        let id = self.next_domain_id;
        self.next_domain_id += 1;
        self.domains.insert(
            domain.to_string(),
            DomainRecord {
                id,
                name: domain.to_string(),
                owner: owner.clone(),
                is_public,
            },
        );
        self
    }

    /// Register an address owned by `owner`, its domain is not checked
    pub fn with_address(mut self, address: &str, owner: &PublicKey) -> Self {
        let id = self.next_address_id;
        self.next_address_id += 1;
        let domain = fio_common::names::domain_of(address).unwrap_or_default();
        self.addresses.insert(
            address.to_string(),
            AddressRecord {
                id,
                name: address.to_string(),
                domain,
                owner: owner.clone(),
            },
        );
        self
    }
}

#[async_trait]
impl NameProvider for MemoryStorage {
    async fn is_domain_registered(&self, domain: &str) -> Result<bool, BlockchainError> {
        Ok(self.domains.contains_key(domain))
    }

    async fn get_domain(&self, domain: &str) -> Result<Option<DomainRecord>, BlockchainError> {
        Ok(self.domains.get(domain).cloned())
    }

    async fn register_domain(
        &mut self,
        domain: String,
        owner: PublicKey,
    ) -> Result<u64, BlockchainError> {
        if self.domains.contains_key(&domain) {
            return Err(BlockchainError::AlreadyStored(domain));
        }

        let id = self.next_domain_id;
        self.next_domain_id += 1;
        trace!("storing domain {} with id {}", domain, id);
        self.domains.insert(
            domain.clone(),
            DomainRecord {
                id,
                name: domain,
                owner,
                is_public: false,
            },
        );
        Ok(id)
    }

    async fn set_domain_public(
        &mut self,
        domain: &str,
        is_public: bool,
    ) -> Result<(), BlockchainError> {
        let record = self
            .domains
            .get_mut(domain)
            .ok_or_else(|| BlockchainError::DomainNotFound(domain.to_string()))?;
        record.is_public = is_public;
        Ok(())
    }

    async fn get_domains_by_owner(
        &self,
        owner: &PublicKey,
    ) -> Result<Vec<DomainRecord>, BlockchainError> {
        Ok(self
            .domains
            .values()
            .filter(|record| &record.owner == owner)
            .cloned()
            .collect())
    }

    async fn list_domains(
        &self,
        from_id: u64,
        limit: usize,
    ) -> Result<Vec<DomainRecord>, BlockchainError> {
        Ok(self
            .domains
            .values()
            .filter(|record| record.id >= from_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn is_address_registered(&self, address: &str) -> Result<bool, BlockchainError> {
        Ok(self.addresses.contains_key(address))
    }

    async fn get_address(&self, address: &str) -> Result<Option<AddressRecord>, BlockchainError> {
        Ok(self.addresses.get(address).cloned())
    }

    async fn register_address(
        &mut self,
        address: String,
        domain: String,
        owner: PublicKey,
    ) -> Result<u64, BlockchainError> {
        if self.addresses.contains_key(&address) {
            return Err(BlockchainError::AlreadyStored(address));
        }

        let id = self.next_address_id;
        self.next_address_id += 1;
        trace!("storing address {} with id {}", address, id);
        self.addresses.insert(
            address.clone(),
            AddressRecord {
                id,
                name: address,
                domain,
                owner,
            },
        );
        Ok(id)
    }

    async fn delete_address(&mut self, address: &str) -> Result<AddressRecord, BlockchainError> {
        // shift_remove keeps the remaining rows in id order
        self.addresses
            .shift_remove(address)
            .ok_or_else(|| BlockchainError::AddressNotFound(address.to_string()))
    }

    async fn get_addresses_by_owner(
        &self,
        owner: &PublicKey,
    ) -> Result<Vec<AddressRecord>, BlockchainError> {
        Ok(self
            .addresses
            .values()
            .filter(|record| &record.owner == owner)
            .cloned()
            .collect())
    }

    async fn list_addresses(
        &self,
        from_id: u64,
        limit: usize,
    ) -> Result<Vec<AddressRecord>, BlockchainError> {
        Ok(self
            .addresses
            .values()
            .filter(|record| record.id >= from_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ObtProvider for MemoryStorage {
    async fn store_obt_record(&mut self, mut record: ObtRecord) -> Result<u64, BlockchainError> {
        let id = self.obt_records.len() as u64;
        record.id = id;
        self.obt_records.push(record);
        Ok(id)
    }

    async fn list_obt_records(
        &self,
        from_id: u64,
        limit: usize,
    ) -> Result<Vec<ObtRecord>, BlockchainError> {
        // Ids are positions in the vector
        Ok(self
            .obt_records
            .iter()
            .skip(usize::try_from(from_id).unwrap_or(usize::MAX))
            .take(limit)
            .cloned()
            .collect())
    }
}

impl Storage for MemoryStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
