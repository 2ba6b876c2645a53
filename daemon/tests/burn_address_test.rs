// Burn-address scenarios run in-process against the chain executor

mod common;

use common::*;
use fio_common::{
    api::{FioNameRow, GetTableRowsParams},
    error::ErrorKind,
    fees::ActionName,
};
use fio_daemon::core::{chain::Chain, storage::MemoryStorage};

async fn fionames(chain: &Chain<MemoryStorage>) -> Vec<FioNameRow> {
    let params = GetTableRowsParams {
        code: "fio.address".to_string(),
        scope: "fio.address".to_string(),
        table: "fionames".to_string(),
        limit: Some(1000),
        lower_bound: None,
    };
    chain
        .get_table_rows(&params)
        .await
        .unwrap()
        .rows
        .into_iter()
        .map(|row| serde_json::from_value(row).unwrap())
        .collect()
}

async fn bundle_countdown(chain: &Chain<MemoryStorage>, name: &str) -> Option<u64> {
    fionames(chain)
        .await
        .into_iter()
        .find(|row| row.name == name)
        .map(|row| row.bundleeligiblecountdown)
}

#[tokio::test]
async fn test_burn_second_address_then_burn_with_fee() {
    let chain = build_chain();
    let wallet_a1 = new_user(&chain, 1, "walleta1").await;
    let _wallet_2 = new_user(&chain, 2, "wallet2").await;

    let second = address("walleta1two");
    let response = chain
        .register_address(&wallet_a1, "", &second, REGISTER_ADDRESS_FEE as i64, "")
        .await
        .unwrap();
    assert_eq!(response.status, "OK");

    // A second address does not grant another allowance
    let names = chain.get_fio_names(wallet_a1.as_str()).await.unwrap();
    assert_eq!(names.fio_addresses.len(), 2);
    assert!(names
        .fio_addresses
        .iter()
        .all(|entry| entry.remaining_bundled_tx == BUNDLE_COUNT));

    let balance_before = chain.get_balance(wallet_a1.as_str()).unwrap();
    assert_eq!(balance_before, FUNDS - 2 * REGISTER_ADDRESS_FEE);

    assert_eq!(chain.get_fee("burn_fio_address", &second).await.unwrap(), 0);
    let response = chain
        .burn_address(&wallet_a1, &second, BURN_FEE as i64, "")
        .await
        .unwrap();
    assert_eq!(response.status, "OK");
    assert_eq!(response.fee_collected, 0);
    assert_eq!(chain.ledger().remaining_credits(&wallet_a1), BUNDLE_COUNT - 1);
    assert_eq!(chain.get_balance(wallet_a1.as_str()).unwrap(), balance_before);

    let names = chain.get_fio_names(wallet_a1.as_str()).await.unwrap();
    assert_eq!(names.fio_addresses.len(), 1);
    assert_eq!(names.fio_addresses[0].fio_address, address("walleta1"));
    assert!(!chain.avail_check(&second).await.unwrap());
    assert!(bundle_countdown(&chain, &second).await.is_none());

    // Use up the remaining bundles, the next one is charged
    let fees = record_obt(&chain, &wallet_a1, "walleta1", "wallet2", 50).await;
    assert!(fees[..49].iter().all(|fee| *fee == 0));
    assert_eq!(fees[49], RECORD_OBT_FEE);
    assert_eq!(
        bundle_countdown(&chain, &address("walleta1")).await,
        Some(0)
    );

    let burn_fee = chain
        .get_fee("burn_fio_address", &address("walleta1"))
        .await
        .unwrap();
    assert_eq!(burn_fee, scheduled(ActionName::BurnFioAddress));
    assert_eq!(burn_fee, BURN_FEE);

    let balance_before = chain.get_balance(wallet_a1.as_str()).unwrap();
    let response = chain
        .burn_address(&wallet_a1, &address("walleta1"), burn_fee as i64, "")
        .await
        .unwrap();
    assert_eq!(response.fee_collected, BURN_FEE);
    assert_eq!(
        chain.get_balance(wallet_a1.as_str()).unwrap(),
        balance_before - BURN_FEE
    );

    let err = chain.get_fio_names(wallet_a1.as_str()).await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NoFioNames));
}

#[tokio::test]
async fn test_burned_name_can_be_registered_again() {
    let chain = build_chain();
    let wallet_a = new_user(&chain, 1, "walleta").await;
    let wallet_b = new_user(&chain, 2, "walletb").await;

    chain
        .burn_address(&wallet_a, &address("walleta"), 0, "")
        .await
        .unwrap();
    assert!(!chain.avail_check(&address("walleta")).await.unwrap());

    chain
        .register_address(&wallet_b, "", &address("walleta"), REGISTER_ADDRESS_FEE as i64, "")
        .await
        .unwrap();
    let names = chain.get_fio_names(wallet_b.as_str()).await.unwrap();
    assert_eq!(names.fio_addresses.len(), 2);
}

#[tokio::test]
async fn test_get_fee_burn_with_bundles() {
    let chain = build_chain();
    let wallet_c = new_user(&chain, 3, "walletc").await;

    let fee = chain
        .get_fee("burn_fio_address", &address("walletc"))
        .await
        .unwrap();
    assert_eq!(fee, 0);

    // Quoting never consumes a credit
    assert_eq!(chain.ledger().remaining_credits(&wallet_c), BUNDLE_COUNT);

    // Without an address the scheduled fee is returned
    assert_eq!(chain.get_fee("burn_fio_address", "").await.unwrap(), BURN_FEE);
}

#[tokio::test]
async fn test_burn_address_errors() {
    let chain = build_chain();
    let user_d1 = new_user(&chain, 4, "userd1").await;
    let user_d2 = new_user(&chain, 5, "userd2").await;
    let d1_address = address("userd1");

    let err = chain
        .burn_address(&user_d1, "invalid@@address", BURN_FEE as i64, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidFioAddress));
    assert_eq!(err.into_fio_error().status_code(), 400);

    let err = chain
        .burn_address(&user_d1, &d1_address, -33_000_000_000, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidFeeValue));
    assert_eq!(err.into_fio_error().status_code(), 400);

    let err = chain
        .burn_address(&user_d1, &d1_address, BURN_FEE as i64, "invalid@@tpid")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidTpid));

    let err = chain
        .burn_address(&user_d2, &d1_address, BURN_FEE as i64, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::SignatureError));
    assert_eq!(err.into_fio_error().status_code(), 403);

    let err = chain
        .burn_address(&user_d1, &address("notregistered"), BURN_FEE as i64, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::FioAddressNotRegistered));
    assert_eq!(err.into_fio_error().status_code(), 400);

    // Several failing checks: the earliest one is reported
    let err = chain
        .burn_address(&user_d1, "invalid@@address", -1, "invalid@@tpid")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidFioAddress));

    let err = chain
        .burn_address(&user_d1, &address("notregistered"), BURN_FEE as i64, "invalid@@tpid")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidTpid));

    let err = chain
        .burn_address(&user_d1, &address("notregistered"), -1, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidFeeValue));

    let err = chain
        .burn_address(&user_d1, &address("notregistered"), -1, "invalid@@tpid")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidTpid));

    // None of the rejected attempts consumed a credit
    assert_eq!(chain.ledger().remaining_credits(&user_d1), BUNDLE_COUNT);

    let fees = record_obt(&chain, &user_d1, "userd1", "userd2", 51).await;
    assert_eq!(fees.iter().filter(|fee| **fee > 0).count(), 1);

    let err = chain
        .burn_address(&user_d1, &d1_address, BURN_FEE as i64 - 1, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::FeeExceedsMax));

    // Ownership is checked before the fee
    let err = chain
        .burn_address(&user_d1, &address("userd2"), BURN_FEE as i64 - 1, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::SignatureError));

    // Transfer the entire balance away
    let balance = chain.get_balance(user_d1.as_str()).unwrap();
    assert_eq!(balance, FUNDS - REGISTER_ADDRESS_FEE - RECORD_OBT_FEE);
    let response = chain
        .transfer_tokens(
            &user_d1,
            user_d2.as_str(),
            (balance - TRANSFER_FEE) as i64,
            TRANSFER_FEE as i64,
            "",
        )
        .await
        .unwrap();
    assert_eq!(response.fee_collected, TRANSFER_FEE);
    assert_eq!(chain.get_balance(user_d1.as_str()).unwrap(), 0);
    assert_eq!(bundle_countdown(&chain, &d1_address).await, Some(0));

    let err = chain
        .burn_address(&user_d1, &d1_address, BURN_FEE as i64, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InsufficientFunds));
    assert!(chain.avail_check(&d1_address).await.unwrap());
}

#[tokio::test]
async fn test_burn_twice() {
    let chain = build_chain();
    let wallet = new_user(&chain, 6, "burntwice").await;

    chain
        .burn_address(&wallet, &address("burntwice"), BURN_FEE as i64, "")
        .await
        .unwrap();
    let err = chain
        .burn_address(&wallet, &address("burntwice"), BURN_FEE as i64, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::FioAddressNotRegistered));

    // The failed attempt left the remaining credits untouched
    assert_eq!(chain.ledger().remaining_credits(&wallet), BUNDLE_COUNT - 1);
}

#[tokio::test]
async fn test_burn_is_case_insensitive() {
    let chain = build_chain();
    let wallet = new_user(&chain, 7, "mixedcase").await;

    let response = chain
        .burn_address(&wallet, "MixedCase@SmokeTest", 0, "")
        .await
        .unwrap();
    assert_eq!(response.fee_collected, 0);
    assert!(!chain.avail_check(&address("mixedcase")).await.unwrap());
}
