use serde::{Deserialize, Serialize};

use super::{scheduled_fee, ActionName};
use crate::{
    account::AccountState,
    error::{ErrorKind, FioError},
};

/// Fee an identity would pay for an action, computed without side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub action: ActionName,
    pub fee: u64,
    // Whether a bundle credit would pay for the action
    pub bundled: bool,
}

/// Outcome of a successful settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub fee_charged: u64,
    pub new_balance: u64,
    pub used_bundle_credit: bool,
}

/// Quote the fee of an action for an identity holding `credits` bundle credits.
/// Same value as `resolve_fee`, but never consumes a credit.
pub fn quote_fee(credits: u64, action: ActionName) -> Result<FeeQuote, FioError> {
    let descriptor = scheduled_fee(action)?;
    let bundled = descriptor.bundle_eligible && credits > 0;
    Ok(FeeQuote {
        action,
        fee: if bundled { 0 } else { descriptor.fee },
        bundled,
    })
}

/// Resolve the fee of an action, consuming one bundle credit when the action
/// is bundle eligible and a credit is left
pub fn resolve_fee(state: &mut AccountState, action: ActionName) -> Result<u64, FioError> {
    let descriptor = scheduled_fee(action)?;
    if !descriptor.bundle_eligible {
        return Ok(descriptor.fee);
    }

    if state.consume_credit() {
        Ok(0)
    } else {
        Ok(descriptor.fee)
    }
}

/// Settle an action against an account state.
///
/// Credit consumption and balance deduction are applied together:
/// on any error the state is left untouched.
/// The max fee check happens before the balance check.
pub fn settle(
    state: &mut AccountState,
    action: ActionName,
    declared_max_fee: u64,
) -> Result<Settlement, FioError> {
    let descriptor = scheduled_fee(action)?;
    let mut next = state.clone();
    let credits_before = next.remaining_credits();

    let fee = resolve_fee(&mut next, action)?;
    if fee > declared_max_fee {
        return Err(FioError::with_value(
            ErrorKind::FeeExceedsMax,
            declared_max_fee.to_string(),
        ));
    }

    next.balance = next.balance.checked_sub(fee).ok_or_else(|| {
        FioError::with_value(ErrorKind::InsufficientFunds, declared_max_fee.to_string())
    })?;
    next.ram_quota = next.ram_quota.saturating_add(descriptor.ram_bump);

    let used_bundle_credit = next.remaining_credits() < credits_before;
    *state = next;

    Ok(Settlement {
        fee_charged: fee,
        new_balance: state.balance,
        used_bundle_credit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COIN_VALUE;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    fn account(balance: u64, credits: u64) -> AccountState {
        let mut state = AccountState::with_balance(balance);
        state.bundle_credits = credits;
        state
    }

    #[test]
    fn test_bundled_action_with_credits_is_free() {
        let mut state = account(0, 2);
        let settlement = settle(&mut state, ActionName::BurnFioAddress, 0).unwrap();
        assert_eq!(settlement.fee_charged, 0);
        assert!(settlement.used_bundle_credit);
        assert_eq!(state.remaining_credits(), 1);
    }

    #[test]
    fn test_fifty_one_bundled_actions() {
        let mut state = account(10 * COIN_VALUE, 50);
        for _ in 0..50 {
            let settlement = settle(&mut state, ActionName::RecordObtData, 0).unwrap();
            assert_eq!(settlement.fee_charged, 0);
        }
        assert_eq!(state.remaining_credits(), 0);

        let settlement =
            settle(&mut state, ActionName::RecordObtData, 1_200_000_000).unwrap();
        assert_eq!(settlement.fee_charged, 1_200_000_000);
        assert!(!settlement.used_bundle_credit);
        assert_eq!(state.balance, 10 * COIN_VALUE - 1_200_000_000);
    }

    #[test]
    fn test_fee_exceeds_max_before_balance() {
        // Enough balance, max fee one unit short
        let mut state = account(100 * COIN_VALUE, 0);
        let before = state.clone();
        let err = settle(&mut state, ActionName::BurnFioAddress, 399_999_999).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FeeExceedsMax);
        assert_eq!(state, before);

        // No balance and max fee too low: max fee wins
        let mut state = account(0, 0);
        let err = settle(&mut state, ActionName::BurnFioAddress, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FeeExceedsMax);
    }

    #[test]
    fn test_insufficient_funds() {
        let mut state = account(0, 0);
        let err = settle(&mut state, ActionName::BurnFioAddress, 400_000_000).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert_eq!(state, account(0, 0));
    }

    #[test]
    fn test_failed_settlement_keeps_credit() {
        // Non bundled action never touches credits
        let mut state = account(0, 3);
        let err = settle(&mut state, ActionName::RegisterFioDomain, u64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert_eq!(state.remaining_credits(), 3);
    }

    #[test]
    fn test_settlement_bumps_ram() {
        let mut state = account(1_000 * COIN_VALUE, 0);
        let ram = state.ram_quota;
        settle(&mut state, ActionName::RegisterFioDomain, u64::MAX).unwrap();
        assert_eq!(state.ram_quota, ram + crate::config::REG_DOMAIN_RAM);
    }

    #[test]
    fn test_quote_does_not_consume() {
        let quote = quote_fee(1, ActionName::BurnFioAddress).unwrap();
        assert_eq!(quote.fee, 0);
        assert!(quote.bundled);
        let quote = quote_fee(0, ActionName::BurnFioAddress).unwrap();
        assert_eq!(quote.fee, 400_000_000);
    }

    fn any_action() -> impl Strategy<Value = ActionName> {
        let actions: Vec<ActionName> = ActionName::iter().collect();
        prop::sample::select(actions)
    }

    proptest! {
        // A quote always agrees with the fee the same state resolves to
        #[test]
        fn test_quote_matches_resolution(credits in 0u64..100, action in any_action()) {
            let quote = quote_fee(credits, action).unwrap();
            let mut state = account(0, credits);
            let fee = resolve_fee(&mut state, action).unwrap();
            prop_assert_eq!(quote.fee, fee);
        }

        #[test]
        fn test_credits_drop_by_one_on_bundled_action(credits in 1u64..100, action in any_action()) {
            let descriptor = scheduled_fee(action).unwrap();
            let mut state = account(0, credits);
            let fee = resolve_fee(&mut state, action).unwrap();
            if descriptor.bundle_eligible {
                prop_assert_eq!(fee, 0);
                prop_assert_eq!(state.remaining_credits(), credits - 1);
            } else {
                prop_assert_eq!(fee, descriptor.fee);
                prop_assert_eq!(state.remaining_credits(), credits);
            }
        }

        #[test]
        fn test_no_credits_costs_scheduled_fee(action in any_action()) {
            let mut state = account(0, 0);
            let fee = resolve_fee(&mut state, action).unwrap();
            prop_assert_eq!(fee, scheduled_fee(action).unwrap().fee);
            prop_assert_eq!(state.remaining_credits(), 0);
        }

        #[test]
        fn test_settlement_conserves_balance(
            balance in 0u64..2_000 * COIN_VALUE,
            credits in 0u64..3,
            max_fee in 0u64..1_000 * COIN_VALUE,
            action in any_action(),
        ) {
            let mut state = account(balance, credits);
            match settle(&mut state, action, max_fee) {
                Ok(settlement) => {
                    prop_assert!(settlement.fee_charged <= max_fee);
                    prop_assert_eq!(settlement.new_balance + settlement.fee_charged, balance);
                }
                Err(err) => {
                    prop_assert!(err.category().is_retryable());
                    prop_assert_eq!(state, account(balance, credits));
                }
            }
        }
    }
}
