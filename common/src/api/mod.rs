mod chain;
mod push;

pub use chain::*;
pub use push::*;
