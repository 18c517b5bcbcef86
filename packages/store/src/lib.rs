pub mod config;
pub mod credential;
pub mod models;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::{ConfigError, ConsoleConfig};
pub use credential::CredentialStore;
pub use models::{Credential, Role, UnknownRole};
