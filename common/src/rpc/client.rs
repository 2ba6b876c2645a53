use log::{debug, trace};
use reqwest::Client as HttpClient;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::{ErrorResponse, CHAIN_API_PREFIX};
use crate::{
    api::*,
    error::{ErrorKind, FioError},
    fees::{quote_fee, ActionName, FeeQuote},
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {}", .response.error_message())]
    Api { status: u16, response: ErrorResponse },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Fio(#[from] FioError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error kind reported by the node, if any
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Api { response, .. } => response.kind(),
            Self::Fio(err) => Some(err.kind()),
            _ => None,
        }
    }
}

/// Typed client for the `/v1/chain` API
#[derive(Debug, Clone)]
pub struct FioApiClient {
    base_url: String,
    http: HttpClient,
}

impl FioApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: HttpClient::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<P: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &P,
    ) -> Result<R, ClientError> {
        let url = format!("{}{}/{}", self.base_url, CHAIN_API_PREFIX, endpoint);
        if log::log_enabled!(log::Level::Trace) {
            trace!("POST {} {}", url, serde_json::to_string(params)?);
        }

        let response = self.http.post(&url).json(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let response: ErrorResponse = response.json().await?;
            debug!("{} failed with {}: {}", endpoint, status, response.error_message());
            return Err(ClientError::Api {
                status: status.as_u16(),
                response,
            });
        }

        Ok(response.json().await?)
    }

    pub async fn get_fee(
        &self,
        action: ActionName,
        fio_address: &str,
    ) -> Result<u64, ClientError> {
        let params = GetFeeParams {
            end_point: action.to_string(),
            fio_address: fio_address.to_string(),
        };
        let result: GetFeeResult = self.post("get_fee", &params).await?;
        Ok(result.fee)
    }

    /// Compute a fee locally from a known credit count, the same way the node does
    pub fn quote_fee(&self, action: ActionName, credits: u64) -> Result<FeeQuote, ClientError> {
        Ok(quote_fee(credits, action)?)
    }

    pub async fn get_fio_names(&self, fio_public_key: &str) -> Result<FioNamesResult, ClientError> {
        self.post("get_fio_names", &public_key_params(fio_public_key))
            .await
    }

    pub async fn get_fio_balance(&self, fio_public_key: &str) -> Result<u64, ClientError> {
        let result: BalanceResult = self
            .post("get_fio_balance", &public_key_params(fio_public_key))
            .await?;
        Ok(result.balance)
    }

    pub async fn get_account(&self, fio_public_key: &str) -> Result<AccountResult, ClientError> {
        self.post("get_account", &public_key_params(fio_public_key))
            .await
    }

    pub async fn get_table_rows(
        &self,
        table: &str,
        limit: Option<u32>,
        lower_bound: Option<u64>,
    ) -> Result<TableRowsResult, ClientError> {
        // OBT records live under their own contract
        let code = if table == "recordobts" {
            "fio.reqobt"
        } else {
            "fio.address"
        };
        let params = GetTableRowsParams {
            code: code.to_string(),
            scope: code.to_string(),
            table: table.to_string(),
            limit,
            lower_bound,
        };
        self.post("get_table_rows", &params).await
    }

    pub async fn get_fee_schedule(&self) -> Result<Vec<FeeScheduleEntry>, ClientError> {
        self.post("get_fee_schedule", &serde_json::Map::new()).await
    }

    pub async fn avail_check(&self, fio_name: &str) -> Result<bool, ClientError> {
        let params = AvailCheckParams {
            fio_name: fio_name.to_string(),
        };
        let result: AvailCheckResult = self.post("avail_check", &params).await?;
        Ok(result.is_registered == 1)
    }

    pub async fn faucet(
        &self,
        fio_public_key: &str,
        amount: Option<u64>,
    ) -> Result<u64, ClientError> {
        let params = FaucetParams {
            fio_public_key: fio_public_key.to_string(),
            amount,
        };
        let result: BalanceResult = self.post("faucet", &params).await?;
        Ok(result.balance)
    }

    pub async fn push_transaction<T: Serialize>(
        &self,
        action: PushActionName,
        actor: &str,
        data: &T,
    ) -> Result<ActionResponse, ClientError> {
        let request = PushTransactionRequest::new(action, actor, data)?;
        let response: TransactionResponse = self.post("push_transaction", &request).await?;
        Ok(response.action_response()?)
    }

    pub async fn register_domain(
        &self,
        actor: &str,
        fio_domain: &str,
        max_fee: i64,
    ) -> Result<ActionResponse, ClientError> {
        let data = RegDomainData {
            fio_domain: fio_domain.to_string(),
            owner_fio_public_key: actor.to_string(),
            max_fee,
            tpid: String::new(),
        };
        self.push_transaction(PushActionName::RegDomain, actor, &data)
            .await
    }

    pub async fn register_address(
        &self,
        actor: &str,
        fio_address: &str,
        max_fee: i64,
    ) -> Result<ActionResponse, ClientError> {
        let data = RegAddressData {
            fio_address: fio_address.to_string(),
            owner_fio_public_key: actor.to_string(),
            max_fee,
            tpid: String::new(),
        };
        self.push_transaction(PushActionName::RegAddress, actor, &data)
            .await
    }

    pub async fn set_domain_public(
        &self,
        actor: &str,
        fio_domain: &str,
        is_public: bool,
        max_fee: i64,
    ) -> Result<ActionResponse, ClientError> {
        let data = SetDomainPubData {
            fio_domain: fio_domain.to_string(),
            is_public: is_public as u8,
            max_fee,
            tpid: String::new(),
        };
        self.push_transaction(PushActionName::SetDomainPub, actor, &data)
            .await
    }

    pub async fn burn_address(
        &self,
        actor: &str,
        fio_address: &str,
        max_fee: i64,
        tpid: &str,
    ) -> Result<ActionResponse, ClientError> {
        let data = BurnAddressData {
            fio_address: fio_address.to_string(),
            max_fee,
            tpid: tpid.to_string(),
        };
        self.push_transaction(PushActionName::BurnAddress, actor, &data)
            .await
    }

    pub async fn transfer_tokens(
        &self,
        actor: &str,
        payee_public_key: &str,
        amount: i64,
        max_fee: i64,
    ) -> Result<ActionResponse, ClientError> {
        let data = TransferTokensData {
            payee_public_key: payee_public_key.to_string(),
            amount,
            max_fee,
            tpid: String::new(),
        };
        self.push_transaction(PushActionName::TrnsFioPubKy, actor, &data)
            .await
    }

    pub async fn record_obt_data(
        &self,
        actor: &str,
        payer_fio_address: &str,
        payee_fio_address: &str,
        content: &str,
        max_fee: i64,
    ) -> Result<ActionResponse, ClientError> {
        let data = RecordObtDataPayload {
            payer_fio_address: payer_fio_address.to_string(),
            payee_fio_address: payee_fio_address.to_string(),
            content: content.to_string(),
            max_fee,
            tpid: String::new(),
        };
        self.push_transaction(PushActionName::RecordObt, actor, &data)
            .await
    }
}

fn public_key_params(fio_public_key: &str) -> PublicKeyParams {
    PublicKeyParams {
        fio_public_key: fio_public_key.to_string(),
    }
}
