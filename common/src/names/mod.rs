// FIO name grammar
//
// Addresses take the form `name@domain`; domains are bare labels.
// Names are case-insensitive and stored lowercase.

mod normalize;
mod validate;

pub use normalize::*;
pub use validate::*;
