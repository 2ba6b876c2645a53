// Bundle credit and balance ledger
// One DashMap entry per identity: every read-modify-write of credits and
// balance happens under the entry's write guard.

use dashmap::DashMap;
use fio_common::{
    account::{AccountState, PublicKey},
    error::{ErrorKind, FioError},
    fees::{self, quote_fee, scheduled_fee, ActionName, FeeQuote, Settlement},
};
use log::{debug, trace, warn};
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Ledger {
    // Concurrent account state (automatic locking via DashMap)
    accounts: DashMap<PublicKey, AccountState>,
    // Allowance granted with the first address of an identity
    initial_bundle_count: u64,
    // Sum of every fee charged since start
    collected_fees: AtomicU64,
}

impl Ledger {
    pub fn new(initial_bundle_count: u64) -> Self {
        Self {
            accounts: DashMap::new(),
            initial_bundle_count,
            collected_fees: AtomicU64::new(0),
        }
    }

    pub fn initial_bundle_count(&self) -> u64 {
        self.initial_bundle_count
    }

    pub fn collected_fees(&self) -> u64 {
        self.collected_fees.load(Ordering::Relaxed)
    }

    pub fn contains(&self, key: &PublicKey) -> bool {
        self.accounts.contains_key(key)
    }

    /// Snapshot of an identity's state
    pub fn account(&self, key: &PublicKey) -> Option<AccountState> {
        self.accounts.get(key).map(|entry| entry.value().clone())
    }

    pub fn balance(&self, key: &PublicKey) -> Option<u64> {
        self.accounts.get(key).map(|entry| entry.balance)
    }

    /// Remaining bundle credits, 0 for an unknown identity
    pub fn remaining_credits(&self, key: &PublicKey) -> u64 {
        self.accounts
            .get(key)
            .map(|entry| entry.remaining_credits())
            .unwrap_or(0)
    }

    /// Consume one bundle credit.
    /// Returns false, leaving the state untouched, when none is left.
    pub fn consume_credit(&self, key: &PublicKey) -> bool {
        match self.accounts.get_mut(key) {
            Some(mut entry) => entry.consume_credit(),
            None => false,
        }
    }

    /// Quote the fee of an action for an identity without consuming anything
    pub fn quote(&self, key: &PublicKey, action: ActionName) -> Result<FeeQuote, FioError> {
        quote_fee(self.remaining_credits(key), action)
    }

    /// Resolve the fee of an action, consuming one credit if the action is bundled
    pub fn resolve_fee(&self, key: &PublicKey, action: ActionName) -> Result<u64, FioError> {
        match self.accounts.get_mut(key) {
            Some(mut entry) => fees::resolve_fee(entry.value_mut(), action),
            None => fees::resolve_fee(&mut AccountState::new(), action),
        }
    }

    /// Settle an action for an identity
    pub fn settle(
        &self,
        key: &PublicKey,
        action: ActionName,
        declared_max_fee: u64,
    ) -> Result<Settlement, FioError> {
        self.settle_with(key, action, declared_max_fee, |_| Ok(()))
    }

    /// Settle an action and apply `apply` to the account in the same atomic step.
    /// If `apply` fails, the fee and the credit consumption are rolled back.
    pub fn settle_with<F>(
        &self,
        key: &PublicKey,
        action: ActionName,
        declared_max_fee: u64,
        apply: F,
    ) -> Result<Settlement, FioError>
    where
        F: FnOnce(&mut AccountState) -> Result<(), FioError>,
    {
        if !self.accounts.contains_key(key) {
            // Unknown identity: evaluated against an empty account, not created on failure
            fees::settle(&mut AccountState::new(), action, declared_max_fee)?;
        }

        let mut entry = self.accounts.entry(key.clone()).or_default();
        let mut next = entry.value().clone();
        let settlement = fees::settle(&mut next, action, declared_max_fee)?;
        apply(&mut next)?;
        let new_balance = next.balance;
        *entry = next;
        drop(entry);

        Ok(self.record(
            key,
            action,
            Settlement {
                new_balance,
                ..settlement
            },
        ))
    }

    /// Settle a token transfer: the payer pays the fee and `amount`, the payee
    /// is credited `amount`. Either both sides are applied or neither is.
    pub fn transfer(
        &self,
        payer: &PublicKey,
        payee: &PublicKey,
        action: ActionName,
        declared_max_fee: u64,
        amount: u64,
    ) -> Result<Settlement, FioError> {
        let insufficient =
            || FioError::with_value(ErrorKind::InsufficientBalance, amount.to_string());

        if payer == payee {
            // Paid back to itself: only the fee leaves the account
            return self.settle_with(payer, action, declared_max_fee, |state| {
                if state.balance < amount {
                    return Err(insufficient());
                }
                Ok(())
            });
        }

        if self.balance(payee).unwrap_or(0).checked_add(amount).is_none() {
            return Err(FioError::with_value(ErrorKind::Overflow, amount.to_string()));
        }

        let settlement = self.settle_with(payer, action, declared_max_fee, |state| {
            state.balance = state.balance.checked_sub(amount).ok_or_else(insufficient)?;
            Ok(())
        })?;
        // Payer guard is released: crediting the payee never holds two entries
        if let Err(err) = self.credit(payee, amount) {
            self.refund(payer, action, &settlement, amount);
            return Err(err);
        }
        Ok(settlement)
    }

    // Undo a settlement whose action could not be completed
    fn refund(&self, key: &PublicKey, action: ActionName, settlement: &Settlement, amount: u64) {
        let ram_bump = scheduled_fee(action)
            .map(|descriptor| descriptor.ram_bump)
            .unwrap_or(0);
        if let Some(mut entry) = self.accounts.get_mut(key) {
            entry.balance = entry
                .balance
                .saturating_add(settlement.fee_charged)
                .saturating_add(amount);
            if settlement.used_bundle_credit {
                entry.bundle_credits = entry.bundle_credits.saturating_add(1);
            }
            entry.ram_quota = entry.ram_quota.saturating_sub(ram_bump);
        }
        self.collected_fees
            .fetch_sub(settlement.fee_charged, Ordering::Relaxed);
        if log::log_enabled!(log::Level::Warn) {
            warn!(
                "refunded {} to {}: fee {}, amount {}",
                action, key, settlement.fee_charged, amount
            );
        }
    }

    fn record(&self, key: &PublicKey, action: ActionName, settlement: Settlement) -> Settlement {
        self.collected_fees
            .fetch_add(settlement.fee_charged, Ordering::Relaxed);
        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "settled {} for {}: fee {} (bundled: {}), balance {}",
                action,
                key,
                settlement.fee_charged,
                settlement.used_bundle_credit,
                settlement.new_balance
            );
        }
        settlement
    }

    /// Credit tokens to an identity, creating it on first transfer
    pub fn credit(&self, key: &PublicKey, amount: u64) -> Result<u64, FioError> {
        let mut entry = self.accounts.entry(key.clone()).or_default();
        entry.balance = entry
            .balance
            .checked_add(amount)
            .ok_or_else(|| FioError::with_value(ErrorKind::Overflow, amount.to_string()))?;
        if log::log_enabled!(log::Level::Trace) {
            trace!("credited {} to {}, balance {}", amount, key, entry.balance);
        }
        Ok(entry.balance)
    }

    /// Grant the initial bundle allowance, only once per identity
    pub fn grant_bundle(&self, key: &PublicKey) -> bool {
        let mut entry = self.accounts.entry(key.clone()).or_default();
        let granted = entry.grant_initial_bundle(self.initial_bundle_count);
        if granted && log::log_enabled!(log::Level::Debug) {
            debug!(
                "granted {} bundled transactions to {}",
                self.initial_bundle_count, key
            );
        }
        granted
    }
}
