use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{
    config::*,
    error::{ErrorKind, FioError},
};

/// Every chargeable action of the fee schedule.
/// The string form is the `end_point` name used by `get_fee`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionName {
    RegisterFioDomain,
    RegisterFioAddress,
    RenewFioDomain,
    RenewFioAddress,
    BurnFioAddress,
    TransferFioDomain,
    TransferFioAddress,
    AddPubAddress,
    RemovePubAddress,
    RemoveAllPubAddresses,
    TransferTokensPubKey,
    NewFundsRequest,
    RejectFundsRequest,
    RecordObtData,
    SetFioDomainPublic,
    RegisterProducer,
    RegisterProxy,
    UnregisterProxy,
    UnregisterProducer,
    ProxyVote,
    VoteProducer,
    AuthDelete,
    AuthLink,
    AuthUpdate,
    MsigPropose,
    MsigApprove,
    MsigUnapprove,
    MsigCancel,
    MsigExec,
    MsigInvalidate,
    CancelFundsRequest,
}

impl ActionName {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Parse an `end_point` name into an action
pub fn parse_action(name: &str) -> Result<ActionName, FioError> {
    ActionName::from_str(name).map_err(|_| FioError::with_value(ErrorKind::UnknownAction, name))
}

/// Static fee data of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    // Flat fee in smallest units (9 decimals)
    pub fee: u64,
    // Whether a bundle credit may pay for the action
    pub bundle_eligible: bool,
    // Bytes added to the RAM quota of the payer
    pub ram_bump: u64,
}

const fn descriptor(fee: u64, bundle_eligible: bool, ram_bump: u64) -> ActionDescriptor {
    ActionDescriptor {
        fee,
        bundle_eligible,
        ram_bump,
    }
}

fn build_schedule() -> IndexMap<ActionName, ActionDescriptor> {
    use ActionName::*;

    let mut schedule = IndexMap::new();
    for action in ActionName::iter() {
        let entry = match action {
            RegisterFioDomain => descriptor(800_000_000_000, false, REG_DOMAIN_RAM),
            RegisterFioAddress => descriptor(40_000_000_000, false, REG_ADDRESS_RAM),
            RenewFioDomain => descriptor(800_000_000_000, false, RENEW_DOMAIN_RAM),
            RenewFioAddress => descriptor(40_000_000_000, false, RENEW_ADDRESS_RAM),
            BurnFioAddress => descriptor(400_000_000, true, BURN_ADDRESS_RAM),
            TransferFioDomain => descriptor(1_000_000_000, false, XFER_DOMAIN_RAM),
            TransferFioAddress => descriptor(1_000_000_000, false, XFER_ADDRESS_RAM),
            AddPubAddress => descriptor(600_000_000, true, ADD_ADDRESS_RAM),
            RemovePubAddress => descriptor(600_000_000, true, 0),
            RemoveAllPubAddresses => descriptor(600_000_000, true, 0),
            TransferTokensPubKey => descriptor(2_000_000_000, false, TRANSFER_PUB_KEY_RAM),
            NewFundsRequest => descriptor(1_200_000_000, true, NEW_FUNDS_REQUEST_RAM),
            RejectFundsRequest => descriptor(600_000_000, true, REJECT_FUNDS_RAM),
            RecordObtData => descriptor(1_200_000_000, true, RECORD_OBT_RAM),
            SetFioDomainPublic => descriptor(600_000_000, false, SET_DOMAIN_PUB_RAM),
            RegisterProducer => descriptor(200_000_000_000, false, REG_PRODUCER_RAM),
            RegisterProxy => descriptor(20_000_000_000, false, REG_PROXY_RAM),
            UnregisterProxy => descriptor(400_000_000, false, 0),
            UnregisterProducer => descriptor(400_000_000, false, 0),
            ProxyVote => descriptor(600_000_000, true, VOTE_PROXY_RAM),
            VoteProducer => descriptor(600_000_000, true, VOTE_PRODUCER_RAM),
            AuthDelete => descriptor(400_000_000, false, 0),
            AuthLink => descriptor(400_000_000, false, LINK_AUTH_RAM),
            AuthUpdate => descriptor(1_000_000_000, false, UPDATE_AUTH_RAM),
            MsigPropose => descriptor(1_000_000_000, false, 0),
            MsigApprove => descriptor(400_000_000, false, 0),
            MsigUnapprove => descriptor(400_000_000, false, 0),
            MsigCancel => descriptor(400_000_000, false, 0),
            MsigExec => descriptor(400_000_000, false, 0),
            MsigInvalidate => descriptor(400_000_000, false, 0),
            CancelFundsRequest => descriptor(600_000_000, true, CANCEL_FUNDS_RAM),
        };
        schedule.insert(action, entry);
    }
    schedule
}

lazy_static! {
    /// Fee schedule, built once and never mutated
    pub static ref FEE_SCHEDULE: IndexMap<ActionName, ActionDescriptor> = build_schedule();
}

/// Look up the descriptor of an action
pub fn scheduled_fee(action: ActionName) -> Result<&'static ActionDescriptor, FioError> {
    FEE_SCHEDULE
        .get(&action)
        .ok_or_else(|| FioError::with_value(ErrorKind::UnknownAction, action.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_is_scheduled() {
        for action in ActionName::iter() {
            assert!(scheduled_fee(action).is_ok(), "{} missing", action);
        }
        assert_eq!(FEE_SCHEDULE.len(), ActionName::iter().count());
    }

    #[test]
    fn test_known_fees() {
        let burn = scheduled_fee(ActionName::BurnFioAddress).unwrap();
        assert_eq!(burn.fee, 400_000_000);
        assert!(burn.bundle_eligible);

        let domain = scheduled_fee(ActionName::RegisterFioDomain).unwrap();
        assert_eq!(domain.fee, 800 * COIN_VALUE);
        assert!(!domain.bundle_eligible);

        let obt = scheduled_fee(ActionName::RecordObtData).unwrap();
        assert_eq!(obt.fee, 1_200_000_000);
        assert!(obt.bundle_eligible);

        let transfer = scheduled_fee(ActionName::TransferTokensPubKey).unwrap();
        assert_eq!(transfer.fee, 2 * COIN_VALUE);
        assert!(!transfer.bundle_eligible);
    }

    #[test]
    fn test_parse_action_names() {
        assert_eq!(
            parse_action("burn_fio_address").unwrap(),
            ActionName::BurnFioAddress
        );
        assert_eq!(
            parse_action("remove_all_pub_addresses").unwrap(),
            ActionName::RemoveAllPubAddresses
        );
        assert_eq!(ActionName::RecordObtData.to_string(), "record_obt_data");

        let err = parse_action("mint_tokens").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownAction);
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        for action in ActionName::iter() {
            let first = *scheduled_fee(action).unwrap();
            let second = *scheduled_fee(action).unwrap();
            assert_eq!(first, second);
        }
    }
}
