//! ServiceHub Application Core
//!
//! Headless core of the ServiceHub marketplace mock: a session lifecycle
//! with an optional remembered identity, plus the seeded in-memory stores
//! (user directory, service catalog, message board) the role dashboards
//! are built on. Everything honors the original mock contract: logins
//! always succeed, roles are inferred from the email, and the only error
//! the session lifecycle knows is a malformed persisted record.

pub mod app;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod messaging;
pub mod session;

// Re-export commonly used types
pub use app::{AppState, Dashboard};
pub use config::Config;
pub use session::{Identity, Role, SessionManager};
