#[cfg(feature = "rpc-client")]
pub mod client;

mod error;

pub use error::*;

// All endpoints live under this prefix
pub const CHAIN_API_PREFIX: &str = "/v1/chain";
