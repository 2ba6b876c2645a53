mod key;
mod state;

pub use key::{PublicKey, PublicKeyError};
pub use state::AccountState;
