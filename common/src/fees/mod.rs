mod resolver;
mod schedule;

pub use resolver::*;
pub use schedule::*;
