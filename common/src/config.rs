pub const VERSION: &str = env!("BUILD_VERSION");

// 9 decimals numbers
pub const COIN_DECIMALS: u8 = 9;
// 1 000 000 000 to represent 1 FIO
pub const COIN_VALUE: u64 = 10u64.pow(COIN_DECIMALS as u32);

// ===== ACCOUNT DEFAULTS =====

// Free bundled actions granted with the first address of an identity
pub const DEFAULT_BUNDLE_COUNT: u64 = 50;
// Funds sent by the devnet faucet to each new test identity (2000 FIO)
pub const DEFAULT_FAUCET_FUNDS: u64 = 2_000 * COIN_VALUE;
// Domain used by the test tooling when none is given
pub const DEFAULT_DOMAIN: &str = "smoketest";

// Public keys are the prefix followed by a base58 body
pub const PUBLIC_KEY_PREFIX: &str = "FIO";
pub const PUBLIC_KEY_BODY_LENGTH: usize = 50;

// ===== PARAMETER LIMITS =====

pub const MIN_FIO_ADDRESS_LENGTH: usize = 3;
pub const MAX_FIO_ADDRESS_LENGTH: usize = 64;
pub const MIN_FIO_DOMAIN_LENGTH: usize = 1;
pub const MAX_FIO_DOMAIN_LENGTH: usize = 62;
pub const MAX_RECORD_OBT_DATA_CONTENT: usize = 432;

// Upper bound of rows returned by a single table query
pub const MAX_TABLE_ROWS_LIMIT: u32 = 1000;

// ===== RAM =====
// Every account starts with INITIAL_ACCOUNT_RAM bytes and each
// successful action raises the quota by its RAM bump.

pub const INITIAL_ACCOUNT_RAM: u64 = 25_600;
pub const REG_DOMAIN_RAM: u64 = 2_560;
pub const REG_ADDRESS_RAM: u64 = 2_560;
pub const ADD_ADDRESS_RAM: u64 = 512;
pub const SET_DOMAIN_PUB_RAM: u64 = 256;
pub const BURN_ADDRESS_RAM: u64 = 0;
pub const NEW_FUNDS_REQUEST_RAM: u64 = 2_048;
pub const RECORD_OBT_RAM: u64 = 2_048;
pub const RENEW_ADDRESS_RAM: u64 = 1_024;
pub const RENEW_DOMAIN_RAM: u64 = 1_024;
pub const TRANSFER_PUB_KEY_RAM: u64 = 1_024;
pub const REJECT_FUNDS_RAM: u64 = 512;
pub const CANCEL_FUNDS_RAM: u64 = 512;
pub const LINK_AUTH_RAM: u64 = 1_024;
pub const UPDATE_AUTH_RAM: u64 = 1_024;
pub const REG_PRODUCER_RAM: u64 = 2_560;
pub const REG_PROXY_RAM: u64 = 2_560;
pub const VOTE_PROXY_RAM: u64 = 512;
pub const VOTE_PRODUCER_RAM: u64 = 1_024;
pub const XFER_DOMAIN_RAM: u64 = 512;
pub const XFER_ADDRESS_RAM: u64 = 512;
