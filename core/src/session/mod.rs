//! Session lifecycle: identity acquisition, persistence, and loss.

pub mod manager;
pub mod state;
pub mod store;

pub use manager::SessionManager;
pub use state::{Identity, Role, SessionConfig};
pub use store::{FileIdentityStore, IdentityStore, MemoryIdentityStore, StoreError};
