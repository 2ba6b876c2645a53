// Shared setup for the daemon integration tests
#![allow(dead_code)]

use fio_common::{account::PublicKey, config::COIN_VALUE, fees::ActionName};
use fio_daemon::core::{chain::Chain, storage::MemoryStorage};

pub const DOMAIN: &str = "smoketest";
pub const FUNDS: u64 = 2_000 * COIN_VALUE;
pub const BUNDLE_COUNT: u64 = 50;

pub const REGISTER_ADDRESS_FEE: u64 = 40 * COIN_VALUE;
pub const BURN_FEE: u64 = 400_000_000;
pub const RECORD_OBT_FEE: u64 = 1_200_000_000;
pub const TRANSFER_FEE: u64 = 2 * COIN_VALUE;

const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Deterministic, well-formed public key derived from a seed
pub fn test_key(seed: u64) -> PublicKey {
    let mut body = [b'1'; 50];
    let mut n = seed;
    let mut i = body.len();
    while n > 0 {
        i -= 1;
        body[i] = BASE58_ALPHABET[(n % 58) as usize];
        n /= 58;
    }
    let body = std::str::from_utf8(&body).unwrap();
    PublicKey::parse(&format!("FIO{}", body)).unwrap()
}

/// Public domain owned by an admin identity, nothing else registered
pub fn build_chain() -> Chain<MemoryStorage> {
    let admin = test_key(u64::MAX);
    let storage = MemoryStorage::new().with_domain(DOMAIN, &admin, true);
    Chain::new(storage, BUNDLE_COUNT)
}

pub fn address(name: &str) -> String {
    format!("{}@{}", name, DOMAIN)
}

/// Funded identity owning `name@smoketest`, holding the full bundle allowance
pub async fn new_user(chain: &Chain<MemoryStorage>, seed: u64, name: &str) -> PublicKey {
    let key = test_key(seed);
    chain.fund(key.as_str(), FUNDS).unwrap();
    let response = chain
        .register_address(&key, "", &address(name), REGISTER_ADDRESS_FEE as i64, "")
        .await
        .unwrap();
    assert_eq!(response.fee_collected, REGISTER_ADDRESS_FEE);
    assert_eq!(chain.ledger().remaining_credits(&key), BUNDLE_COUNT);
    key
}

/// Record OBT data `count` times, returning the fees collected
pub async fn record_obt(
    chain: &Chain<MemoryStorage>,
    actor: &PublicKey,
    payer: &str,
    payee: &str,
    count: usize,
) -> Vec<u64> {
    let mut fees = Vec::with_capacity(count);
    for i in 0..count {
        let response = chain
            .record_obt_data(
                actor,
                &address(payer),
                &address(payee),
                &format!("obt content {}", i),
                RECORD_OBT_FEE as i64,
                "",
            )
            .await
            .unwrap();
        assert_eq!(response.status, "OK");
        fees.push(response.fee_collected);
    }
    fees
}

pub fn scheduled(action: ActionName) -> u64 {
    fio_common::fees::scheduled_fee(action).unwrap().fee
}
