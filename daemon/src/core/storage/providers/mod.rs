mod names;
mod obt;

pub use names::*;
pub use obt::*;
