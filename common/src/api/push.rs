use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::{ErrorKind, FioError};

/// Contract actions accepted by `push_transaction`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PushActionName {
    RegDomain,
    RegAddress,
    SetDomainPub,
    BurnAddress,
    TrnsFioPubKy,
    RecordObt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegDomainData {
    pub fio_domain: String,
    // Empty means the actor
    #[serde(default)]
    pub owner_fio_public_key: String,
    pub max_fee: i64,
    #[serde(default)]
    pub tpid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegAddressData {
    pub fio_address: String,
    #[serde(default)]
    pub owner_fio_public_key: String,
    pub max_fee: i64,
    #[serde(default)]
    pub tpid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDomainPubData {
    pub fio_domain: String,
    pub is_public: u8,
    pub max_fee: i64,
    #[serde(default)]
    pub tpid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnAddressData {
    pub fio_address: String,
    pub max_fee: i64,
    #[serde(default)]
    pub tpid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferTokensData {
    pub payee_public_key: String,
    pub amount: i64,
    pub max_fee: i64,
    #[serde(default)]
    pub tpid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordObtDataPayload {
    pub payer_fio_address: String,
    pub payee_fio_address: String,
    pub content: String,
    pub max_fee: i64,
    #[serde(default)]
    pub tpid: String,
}

/// Typed form of a pushed action
#[derive(Debug, Clone)]
pub enum PushAction {
    RegDomain(RegDomainData),
    RegAddress(RegAddressData),
    SetDomainPub(SetDomainPubData),
    BurnAddress(BurnAddressData),
    TrnsFioPubKy(TransferTokensData),
    RecordObt(RecordObtDataPayload),
}

/// Body of `push_transaction`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushTransactionRequest {
    pub action: String,
    pub actor: String,
    pub data: Value,
}

impl PushTransactionRequest {
    pub fn new<T: Serialize>(
        action: PushActionName,
        actor: impl Into<String>,
        data: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            action: action.to_string(),
            actor: actor.into(),
            data: serde_json::to_value(data)?,
        })
    }

    /// Decode the action payload.
    /// An unknown action name fails with `UnknownAction`, a malformed payload with `ParseError`.
    pub fn parse_action(&self) -> Result<PushAction, FioError> {
        let name = PushActionName::from_str(&self.action)
            .map_err(|_| FioError::with_value(ErrorKind::UnknownAction, self.action.as_str()))?;

        fn decode<T: for<'de> Deserialize<'de>>(data: &Value) -> Result<T, FioError> {
            serde_json::from_value(data.clone())
                .map_err(|e| FioError::with_value(ErrorKind::ParseError, e.to_string()))
        }

        Ok(match name {
            PushActionName::RegDomain => PushAction::RegDomain(decode(&self.data)?),
            PushActionName::RegAddress => PushAction::RegAddress(decode(&self.data)?),
            PushActionName::SetDomainPub => PushAction::SetDomainPub(decode(&self.data)?),
            PushActionName::BurnAddress => PushAction::BurnAddress(decode(&self.data)?),
            PushActionName::TrnsFioPubKy => PushAction::TrnsFioPubKy(decode(&self.data)?),
            PushActionName::RecordObt => PushAction::RecordObt(decode(&self.data)?),
        })
    }
}

/// Contract response carried in the action receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub status: String,
    pub fee_collected: u64,
}

impl ActionResponse {
    pub fn ok(fee_collected: u64) -> Self {
        Self {
            status: "OK".to_string(),
            fee_collected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionReceipt {
    // JSON encoded `ActionResponse`
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionTrace {
    pub receipt: ActionReceipt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedTransaction {
    pub action_traces: Vec<ActionTrace>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub transaction_id: String,
    pub processed: ProcessedTransaction,
}

impl TransactionResponse {
    pub fn new(transaction_id: String, response: &ActionResponse) -> Result<Self, serde_json::Error> {
        Ok(Self {
            transaction_id,
            processed: ProcessedTransaction {
                action_traces: vec![ActionTrace {
                    receipt: ActionReceipt {
                        response: serde_json::to_string(response)?,
                    },
                }],
            },
        })
    }

    /// Decode the response of the first action trace
    pub fn action_response(&self) -> Result<ActionResponse, FioError> {
        let trace = self
            .processed
            .action_traces
            .first()
            .ok_or_else(|| FioError::new(ErrorKind::ParseError))?;
        serde_json::from_str(&trace.receipt.response)
            .map_err(|e| FioError::with_value(ErrorKind::ParseError, e.to_string()))
    }
}
