// Chain executor: validates actions, settles their fee and applies them
// to the name registry.

use fio_common::{
    account::PublicKey,
    api::*,
    config::{MAX_RECORD_OBT_DATA_CONTENT, MAX_TABLE_ROWS_LIMIT},
    error::{ErrorKind, FioError},
    fees::{parse_action, scheduled_fee, ActionName, FEE_SCHEDULE},
    names::{self, normalize_name, validate_fio_address, validate_fio_domain, validate_tpid},
    transaction::compute_transaction_id,
};
use log::{debug, info};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::RwLock;

use super::{
    error::BlockchainError,
    ledger::Ledger,
    storage::{ObtRecord, Storage},
};
use crate::config::{
    DEFAULT_TABLE_ROWS_LIMIT, DOMAINS_TABLE, FIONAMES_TABLE, FIO_ADDRESS_CONTRACT,
    FIO_REQOBT_CONTRACT, OBT_STATUS_SENT, RECORDOBTS_TABLE,
};

/// Max fee as declared by a caller: negative values are rejected
fn validate_max_fee(max_fee: i64) -> Result<u64, FioError> {
    u64::try_from(max_fee)
        .map_err(|_| FioError::with_value(ErrorKind::InvalidFeeValue, max_fee.to_string()))
}

/// Owner given in an action, the actor when empty
fn resolve_owner(actor: &PublicKey, owner: &str) -> Result<PublicKey, FioError> {
    if owner.is_empty() {
        Ok(actor.clone())
    } else {
        PublicKey::parse(owner)
    }
}

pub struct Chain<S: Storage> {
    // Registry mutations are serialized by this lock
    storage: Arc<RwLock<S>>,
    ledger: Ledger,
    // Sequence mixed into transaction ids
    sequence: AtomicU64,
}

impl<S: Storage> Chain<S> {
    pub fn new(storage: S, initial_bundle_count: u64) -> Self {
        if log::log_enabled!(log::Level::Info) {
            info!(
                "Initializing chain with {} storage, {} bundled transactions per identity",
                storage.backend_name(),
                initial_bundle_count
            );
        }
        Self {
            storage: Arc::new(RwLock::new(storage)),
            ledger: Ledger::new(initial_bundle_count),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ===== Actions =====

    /// Register a domain for `owner` (the actor by default), paid by the actor
    pub async fn register_domain(
        &self,
        actor: &PublicKey,
        owner: &str,
        domain: &str,
        max_fee: i64,
        tpid: &str,
    ) -> Result<ActionResponse, BlockchainError> {
        let domain = validate_fio_domain(domain)?;
        let owner = resolve_owner(actor, owner)?;
        validate_tpid(tpid)?;
        let max_fee = validate_max_fee(max_fee)?;

        let mut storage = self.storage.write().await;
        if storage.is_domain_registered(&domain).await? {
            return Err(FioError::with_value(ErrorKind::DomainRegistered, domain).into());
        }

        let settlement = self
            .ledger
            .settle(actor, ActionName::RegisterFioDomain, max_fee)?;
        storage.register_domain(domain.clone(), owner.clone()).await?;

        if log::log_enabled!(log::Level::Info) {
            info!("domain {} registered to {}", domain, owner);
        }
        Ok(ActionResponse::ok(settlement.fee_charged))
    }

    /// Register an address for `owner` (the actor by default), paid by the actor.
    /// The owner's first address grants the initial bundle allowance.
    pub async fn register_address(
        &self,
        actor: &PublicKey,
        owner: &str,
        address: &str,
        max_fee: i64,
        tpid: &str,
    ) -> Result<ActionResponse, BlockchainError> {
        let address = validate_fio_address(address)?;
        let owner = resolve_owner(actor, owner)?;
        validate_tpid(tpid)?;
        let max_fee = validate_max_fee(max_fee)?;
        let domain = names::domain_of(&address)
            .ok_or_else(|| FioError::with_value(ErrorKind::InvalidFioAddress, address.as_str()))?;

        let mut storage = self.storage.write().await;
        let domain_record = storage
            .get_domain(&domain)
            .await?
            .ok_or_else(|| FioError::with_value(ErrorKind::FioDomainNotRegistered, domain.as_str()))?;
        if !domain_record.is_public && &domain_record.owner != actor {
            return Err(FioError::with_value(ErrorKind::DomainNotPublic, address).into());
        }
        if storage.is_address_registered(&address).await? {
            return Err(FioError::with_value(ErrorKind::FioAddressRegistered, address).into());
        }

        let settlement = self
            .ledger
            .settle(actor, ActionName::RegisterFioAddress, max_fee)?;
        storage
            .register_address(address.clone(), domain, owner.clone())
            .await?;
        self.ledger.grant_bundle(&owner);

        if log::log_enabled!(log::Level::Info) {
            info!("address {} registered to {}", address, owner);
        }
        Ok(ActionResponse::ok(settlement.fee_charged))
    }

    /// Make a domain public or private, owner only
    pub async fn set_domain_public(
        &self,
        actor: &PublicKey,
        domain: &str,
        is_public: bool,
        max_fee: i64,
        tpid: &str,
    ) -> Result<ActionResponse, BlockchainError> {
        let domain = validate_fio_domain(domain)?;
        validate_tpid(tpid)?;
        let max_fee = validate_max_fee(max_fee)?;

        let mut storage = self.storage.write().await;
        let record = storage
            .get_domain(&domain)
            .await?
            .ok_or_else(|| FioError::with_value(ErrorKind::FioDomainNotRegistered, domain.as_str()))?;
        if &record.owner != actor {
            return Err(FioError::with_value(ErrorKind::InvalidDomainOwner, domain).into());
        }

        let settlement = self
            .ledger
            .settle(actor, ActionName::SetFioDomainPublic, max_fee)?;
        storage.set_domain_public(&domain, is_public).await?;

        if log::log_enabled!(log::Level::Debug) {
            debug!("domain {} is_public set to {}", domain, is_public);
        }
        Ok(ActionResponse::ok(settlement.fee_charged))
    }

    /// Burn an address: the name is removed from the registry and free again.
    /// Checks run in order and the first failure wins.
    pub async fn burn_address(
        &self,
        actor: &PublicKey,
        address: &str,
        max_fee: i64,
        tpid: &str,
    ) -> Result<ActionResponse, BlockchainError> {
        let address = validate_fio_address(address)?;
        validate_tpid(tpid)?;
        let max_fee = validate_max_fee(max_fee)?;

        let mut storage = self.storage.write().await;
        let record = storage.get_address(&address).await?.ok_or_else(|| {
            FioError::with_value(ErrorKind::FioAddressNotRegistered, address.as_str())
        })?;
        if &record.owner != actor {
            return Err(FioError::new(ErrorKind::SignatureError).into());
        }

        let settlement = self
            .ledger
            .settle(actor, ActionName::BurnFioAddress, max_fee)?;
        storage.delete_address(&address).await?;

        if log::log_enabled!(log::Level::Info) {
            info!(
                "address {} burned by {}, fee collected {}",
                address, actor, settlement.fee_charged
            );
        }
        Ok(ActionResponse::ok(settlement.fee_charged))
    }

    /// Transfer tokens to a public key, creating the payee account on demand.
    /// If the balance left after the fee cannot cover the amount, or the payee
    /// cannot be credited, the fee is not charged.
    pub async fn transfer_tokens(
        &self,
        actor: &PublicKey,
        payee: &str,
        amount: i64,
        max_fee: i64,
        tpid: &str,
    ) -> Result<ActionResponse, BlockchainError> {
        let payee = PublicKey::parse(payee)?;
        let amount = u64::try_from(amount)
            .ok()
            .filter(|amount| *amount > 0)
            .ok_or_else(|| FioError::with_value(ErrorKind::InvalidAmount, amount.to_string()))?;
        validate_tpid(tpid)?;
        let max_fee = validate_max_fee(max_fee)?;

        let settlement = self.ledger.transfer(
            actor,
            &payee,
            ActionName::TransferTokensPubKey,
            max_fee,
            amount,
        )?;

        if log::log_enabled!(log::Level::Debug) {
            debug!("{} transferred {} to {}", actor, amount, payee);
        }
        Ok(ActionResponse::ok(settlement.fee_charged))
    }

    /// Record OBT metadata from one of the actor's addresses to another address
    pub async fn record_obt_data(
        &self,
        actor: &PublicKey,
        payer_address: &str,
        payee_address: &str,
        content: &str,
        max_fee: i64,
        tpid: &str,
    ) -> Result<ActionResponse, BlockchainError> {
        let payer_address = validate_fio_address(payer_address)?;
        let payee_address = validate_fio_address(payee_address)?;
        if content.is_empty() || content.len() > MAX_RECORD_OBT_DATA_CONTENT {
            return Err(FioError::with_value(ErrorKind::InvalidContent, content.len().to_string()).into());
        }
        validate_tpid(tpid)?;
        let max_fee = validate_max_fee(max_fee)?;

        let mut storage = self.storage.write().await;
        let payer = storage.get_address(&payer_address).await?.ok_or_else(|| {
            FioError::with_value(ErrorKind::FioAddressNotRegistered, payer_address.as_str())
        })?;
        if &payer.owner != actor {
            return Err(FioError::new(ErrorKind::SignatureError).into());
        }
        if !storage.is_address_registered(&payee_address).await? {
            return Err(FioError::with_value(ErrorKind::FioAddressNotRegistered, payee_address).into());
        }

        let settlement = self
            .ledger
            .settle(actor, ActionName::RecordObtData, max_fee)?;
        let id = storage
            .store_obt_record(ObtRecord {
                id: 0,
                payer_fio_address: payer_address,
                payee_fio_address: payee_address,
                payer_key: actor.clone(),
                content: content.to_string(),
                status: OBT_STATUS_SENT.to_string(),
            })
            .await?;

        if log::log_enabled!(log::Level::Debug) {
            debug!("obt record {} stored, fee {}", id, settlement.fee_charged);
        }
        Ok(ActionResponse::ok(settlement.fee_charged))
    }

    /// Execute a pushed transaction
    pub async fn push_transaction(
        &self,
        request: &PushTransactionRequest,
    ) -> Result<TransactionResponse, BlockchainError> {
        let actor = PublicKey::parse(&request.actor)
            .map_err(|_| FioError::with_value(ErrorKind::InvalidActor, request.actor.as_str()))?;
        let action = request.parse_action()?;

        let response = match action {
            PushAction::RegDomain(data) => {
                self.register_domain(
                    &actor,
                    &data.owner_fio_public_key,
                    &data.fio_domain,
                    data.max_fee,
                    &data.tpid,
                )
                .await?
            }
            PushAction::RegAddress(data) => {
                self.register_address(
                    &actor,
                    &data.owner_fio_public_key,
                    &data.fio_address,
                    data.max_fee,
                    &data.tpid,
                )
                .await?
            }
            PushAction::SetDomainPub(data) => {
                self.set_domain_public(
                    &actor,
                    &data.fio_domain,
                    data.is_public != 0,
                    data.max_fee,
                    &data.tpid,
                )
                .await?
            }
            PushAction::BurnAddress(data) => {
                self.burn_address(&actor, &data.fio_address, data.max_fee, &data.tpid)
                    .await?
            }
            PushAction::TrnsFioPubKy(data) => {
                self.transfer_tokens(
                    &actor,
                    &data.payee_public_key,
                    data.amount,
                    data.max_fee,
                    &data.tpid,
                )
                .await?
            }
            PushAction::RecordObt(data) => {
                self.record_obt_data(
                    &actor,
                    &data.payer_fio_address,
                    &data.payee_fio_address,
                    &data.content,
                    data.max_fee,
                    &data.tpid,
                )
                .await?
            }
        };

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let transaction_id =
            compute_transaction_id(&request.actor, &request.action, &request.data, sequence)?;
        Ok(TransactionResponse::new(transaction_id, &response)?)
    }

    // ===== Queries =====

    /// Fee the owner of `fio_address` would pay now for `end_point`.
    /// Never consumes a credit.
    pub async fn get_fee(&self, end_point: &str, fio_address: &str) -> Result<u64, BlockchainError> {
        let action = parse_action(end_point)?;
        if fio_address.is_empty() {
            return Ok(scheduled_fee(action)?.fee);
        }

        let address = validate_fio_address(fio_address)?;
        let record = self
            .storage
            .read()
            .await
            .get_address(&address)
            .await?
            .ok_or_else(|| FioError::with_value(ErrorKind::FioAddressNotRegistered, address.as_str()))?;
        Ok(self.ledger.quote(&record.owner, action)?.fee)
    }

    pub fn fee_schedule(&self) -> Vec<FeeScheduleEntry> {
        FEE_SCHEDULE
            .iter()
            .map(|(action, descriptor)| FeeScheduleEntry {
                end_point: *action,
                fee: descriptor.fee,
                bundle_eligible: descriptor.bundle_eligible,
            })
            .collect()
    }

    pub async fn get_fio_names(&self, fio_public_key: &str) -> Result<FioNamesResult, BlockchainError> {
        let key = PublicKey::parse(fio_public_key)?;
        let storage = self.storage.read().await;
        let domains = storage.get_domains_by_owner(&key).await?;
        let addresses = storage.get_addresses_by_owner(&key).await?;
        if domains.is_empty() && addresses.is_empty() {
            return Err(FioError::new(ErrorKind::NoFioNames).into());
        }

        let remaining = self.ledger.remaining_credits(&key);
        Ok(FioNamesResult {
            fio_domains: domains
                .into_iter()
                .map(|record| FioDomainEntry {
                    fio_domain: record.name,
                    is_public: record.is_public as u8,
                })
                .collect(),
            fio_addresses: addresses
                .into_iter()
                .map(|record| FioAddressEntry {
                    fio_address: record.name,
                    remaining_bundled_tx: remaining,
                })
                .collect(),
        })
    }

    pub fn get_balance(&self, fio_public_key: &str) -> Result<u64, BlockchainError> {
        let key = PublicKey::parse(fio_public_key)?;
        self.ledger
            .balance(&key)
            .ok_or_else(|| FioError::with_value(ErrorKind::KeyNotFound, fio_public_key).into())
    }

    pub fn get_account(&self, fio_public_key: &str) -> Result<AccountResult, BlockchainError> {
        let key = PublicKey::parse(fio_public_key)?;
        let state = self
            .ledger
            .account(&key)
            .ok_or_else(|| FioError::with_value(ErrorKind::KeyNotFound, fio_public_key))?;
        Ok(AccountResult {
            fio_public_key: key.to_string(),
            balance: state.balance,
            remaining_bundled_tx: state.remaining_credits(),
            ram_quota: state.ram_quota,
        })
    }

    /// Whether an address (`name@domain`) or a domain is registered
    pub async fn avail_check(&self, fio_name: &str) -> Result<bool, BlockchainError> {
        let storage = self.storage.read().await;
        if fio_name.contains('@') {
            let address = validate_fio_address(fio_name)?;
            storage.is_address_registered(&address).await
        } else {
            let domain = validate_fio_domain(fio_name)?;
            storage.is_domain_registered(&domain).await
        }
    }

    pub async fn get_table_rows(
        &self,
        params: &GetTableRowsParams,
    ) -> Result<TableRowsResult, BlockchainError> {
        let table = normalize_name(&params.table);
        let contract = match table.as_str() {
            FIONAMES_TABLE | DOMAINS_TABLE => FIO_ADDRESS_CONTRACT,
            RECORDOBTS_TABLE => FIO_REQOBT_CONTRACT,
            _ => {
                return Err(FioError::with_value(ErrorKind::InvalidTable, params.table.as_str()).into())
            }
        };
        if params.code != contract {
            return Err(FioError::with_value(ErrorKind::InvalidContract, params.code.as_str()).into());
        }
        let limit = params.limit.unwrap_or(DEFAULT_TABLE_ROWS_LIMIT);
        if limit == 0 || limit > MAX_TABLE_ROWS_LIMIT {
            return Err(FioError::with_value(ErrorKind::InvalidLimit, limit.to_string()).into());
        }
        let limit = limit as usize;
        let from_id = params.lower_bound.unwrap_or(0);

        let storage = self.storage.read().await;
        // One extra row tells whether more rows are left
        let mut rows = match table.as_str() {
            FIONAMES_TABLE => storage
                .list_addresses(from_id, limit + 1)
                .await?
                .into_iter()
                .map(|record| {
                    serde_json::to_value(FioNameRow {
                        id: record.id,
                        bundleeligiblecountdown: self.ledger.remaining_credits(&record.owner),
                        owner_key: record.owner.to_string(),
                        name: record.name,
                        domain: record.domain,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            DOMAINS_TABLE => storage
                .list_domains(from_id, limit + 1)
                .await?
                .into_iter()
                .map(|record| {
                    serde_json::to_value(DomainRow {
                        id: record.id,
                        name: record.name,
                        owner_key: record.owner.to_string(),
                        is_public: record.is_public as u8,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => storage
                .list_obt_records(from_id, limit + 1)
                .await?
                .into_iter()
                .map(|record| {
                    serde_json::to_value(ObtRow {
                        id: record.id,
                        payer_fio_address: record.payer_fio_address,
                        payee_fio_address: record.payee_fio_address,
                        payer_key: record.payer_key.to_string(),
                        content: record.content,
                        status: record.status,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let more = rows.len() > limit;
        rows.truncate(limit);
        Ok(TableRowsResult { rows, more })
    }

    // ===== Devnet =====

    /// Credit tokens to an identity out of thin air (devnet faucet and genesis)
    pub fn fund(&self, fio_public_key: &str, amount: u64) -> Result<u64, BlockchainError> {
        let key = PublicKey::parse(fio_public_key)?;
        let balance = self.ledger.credit(&key, amount)?;
        if log::log_enabled!(log::Level::Info) {
            info!("funded {} with {}", key, amount);
        }
        Ok(balance)
    }
}
