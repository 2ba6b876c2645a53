use serde::{Deserialize, Serialize};

use crate::config::INITIAL_ACCOUNT_RAM;

/// Per identity accounting state
///
/// # Invariants
/// - `bundle_credits` only decreases, except when the first address of the
///   identity grants the initial allowance
/// - `balance` never goes below zero (enforced by settlement)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Token balance in smallest units
    pub balance: u64,
    /// Remaining free bundled actions
    pub bundle_credits: u64,
    /// RAM quota in bytes
    pub ram_quota: u64,
    // Set once the initial bundle allowance has been granted
    #[serde(default)]
    pub bundle_granted: bool,
}

impl Default for AccountState {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountState {
    pub fn new() -> Self {
        Self {
            balance: 0,
            bundle_credits: 0,
            ram_quota: INITIAL_ACCOUNT_RAM,
            bundle_granted: false,
        }
    }

    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            ..Self::new()
        }
    }

    pub fn remaining_credits(&self) -> u64 {
        self.bundle_credits
    }

    /// Decrement the credit count by one.
    /// Returns false and leaves the state untouched when no credit is left.
    pub fn consume_credit(&mut self) -> bool {
        if self.bundle_credits == 0 {
            return false;
        }
        self.bundle_credits -= 1;
        true
    }

    /// Grant the initial allowance, only the first time it is called.
    /// Returns whether credits were granted.
    pub fn grant_initial_bundle(&mut self, count: u64) -> bool {
        if self.bundle_granted {
            return false;
        }
        self.bundle_granted = true;
        self.bundle_credits = self.bundle_credits.saturating_add(count);
        true
    }
}
