use crate::core::error::BlockchainError;
use async_trait::async_trait;
use fio_common::account::PublicKey;
use serde::{Deserialize, Serialize};

/// Other blockchain transaction metadata recorded between two addresses
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObtRecord {
    pub id: u64,
    pub payer_fio_address: String,
    pub payee_fio_address: String,
    pub payer_key: PublicKey,
    // Opaque content as sent by the payer
    pub content: String,
    pub status: String,
}

#[async_trait]
pub trait ObtProvider: Send + Sync {
    /// Store a record and return its id.
    /// The `id` field of the given record is ignored.
    async fn store_obt_record(&mut self, record: ObtRecord) -> Result<u64, BlockchainError>;

    /// List records with an id >= `from_id`, in id order
    async fn list_obt_records(
        &self,
        from_id: u64,
        limit: usize,
    ) -> Result<Vec<ObtRecord>, BlockchainError>;
}
