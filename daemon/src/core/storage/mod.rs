mod memory;
mod providers;

pub use self::{memory::MemoryStorage, providers::*};

// Storage backing the chain executor
pub trait Storage: NameProvider + ObtProvider + Sync + Send + 'static {
    // Name of the backend, used in startup logs
    fn backend_name(&self) -> &'static str;
}
