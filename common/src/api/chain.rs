use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fees::ActionName;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFeeParams {
    pub end_point: String,
    // Address whose owner would pay; empty for actions not tied to an address
    #[serde(default)]
    pub fio_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFeeResult {
    pub fee: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyParams {
    pub fio_public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FioDomainEntry {
    pub fio_domain: String,
    pub is_public: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FioAddressEntry {
    pub fio_address: String,
    pub remaining_bundled_tx: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FioNamesResult {
    pub fio_domains: Vec<FioDomainEntry>,
    pub fio_addresses: Vec<FioAddressEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResult {
    pub balance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResult {
    pub fio_public_key: String,
    pub balance: u64,
    pub remaining_bundled_tx: u64,
    pub ram_quota: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTableRowsParams {
    pub code: String,
    #[serde(default)]
    pub scope: String,
    pub table: String,
    #[serde(default)]
    pub limit: Option<u32>,
    // Row id to start from
    #[serde(default)]
    pub lower_bound: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRowsResult {
    pub rows: Vec<Value>,
    pub more: bool,
}

/// Row of the `fionames` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FioNameRow {
    pub id: u64,
    pub name: String,
    pub domain: String,
    pub owner_key: String,
    pub bundleeligiblecountdown: u64,
}

/// Row of the `domains` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRow {
    pub id: u64,
    pub name: String,
    pub owner_key: String,
    pub is_public: u8,
}

/// Row of the `recordobts` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObtRow {
    pub id: u64,
    pub payer_fio_address: String,
    pub payee_fio_address: String,
    pub payer_key: String,
    pub content: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeScheduleEntry {
    pub end_point: ActionName,
    pub fee: u64,
    pub bundle_eligible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailCheckParams {
    pub fio_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailCheckResult {
    pub is_registered: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaucetParams {
    pub fio_public_key: String,
    // Falls back to the configured faucet amount
    #[serde(default)]
    pub amount: Option<u64>,
}
