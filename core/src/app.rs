//! Shared application state.
//!
//! The session slot used to live in ambient global scope in the original
//! front-end; here it is an explicit context object constructed once at
//! process start and handed to whatever needs it.

use crate::catalog::{Catalog, ProviderStats};
use crate::config::Config;
use crate::directory::{DirectoryStats, UserDirectory};
use crate::messaging::MessageBoard;
use crate::session::state::Role;
use crate::session::{FileIdentityStore, Identity, SessionManager};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,
    pub directory: Arc<UserDirectory>,
    pub catalog: Arc<Catalog>,
    pub messages: Arc<MessageBoard>,
}

/// The role-appropriate dashboard for the signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    Admin(AdminOverview),
    Provider(ProviderOverview),
    Client(ClientOverview),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminOverview {
    pub users: DirectoryStats,
    pub active_ads: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderOverview {
    pub stats: ProviderStats,
    pub unread_messages: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOverview {
    pub available_services: usize,
    pub bookings: usize,
    pub unread_messages: u32,
}

impl AppState {
    /// Build the application state from configuration, persisting the
    /// remembered identity under the configured data directory.
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(FileIdentityStore::new(&config.data_dir));
        Self {
            session: Arc::new(SessionManager::with_config(store, config.session.clone())),
            directory: Arc::new(UserDirectory::new()),
            catalog: Arc::new(Catalog::new()),
            messages: Arc::new(MessageBoard::new()),
        }
    }

    /// Fully in-memory state with zero delays, for tests.
    pub fn ephemeral() -> Self {
        Self {
            session: Arc::new(SessionManager::ephemeral()),
            directory: Arc::new(UserDirectory::new()),
            catalog: Arc::new(Catalog::new()),
            messages: Arc::new(MessageBoard::new()),
        }
    }

    /// Sign in and stamp the matching directory account, if one exists.
    pub async fn login(&self, email: &str, password: &str, remember: bool) -> Identity {
        let identity = self.session.login(email, password, remember).await;
        self.directory.record_login(&identity.email).await;
        identity
    }

    /// The dashboard for the current session, or `None` when signed out.
    pub async fn dashboard(&self) -> Option<Dashboard> {
        let identity = self.session.current().await?;

        let dashboard = match identity.role {
            Role::Admin => Dashboard::Admin(AdminOverview {
                users: self.directory.stats().await,
                active_ads: self.catalog.active_ad_count().await,
            }),
            Role::Provider => Dashboard::Provider(ProviderOverview {
                stats: self.catalog.provider_stats().await,
                unread_messages: self.messages.unread_total().await,
            }),
            Role::Client => Dashboard::Client(ClientOverview {
                available_services: self.catalog.search_listings("").await.len(),
                bookings: self.catalog.appointments().await.len(),
                unread_messages: self.messages.unread_total().await,
            }),
        };

        Some(dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_dashboard_when_signed_out() {
        let app = AppState::ephemeral();
        assert!(app.dashboard().await.is_none());
    }

    #[tokio::test]
    async fn test_admin_dashboard() {
        let app = AppState::ephemeral();
        app.login("admin@servicehub.com", "x", false).await;

        let Some(Dashboard::Admin(overview)) = app.dashboard().await else {
            panic!("expected admin dashboard");
        };
        assert_eq!(overview.users.total, 5);
        assert_eq!(overview.active_ads, 1);
    }

    #[tokio::test]
    async fn test_provider_dashboard() {
        let app = AppState::ephemeral();
        app.login("fornecedor@x.com", "x", false).await;

        let Some(Dashboard::Provider(overview)) = app.dashboard().await else {
            panic!("expected provider dashboard");
        };
        assert_eq!(overview.stats.pending_appointments, 1);
        assert_eq!(overview.unread_messages, 3);
    }

    #[tokio::test]
    async fn test_client_dashboard() {
        let app = AppState::ephemeral();
        app.login("user@x.com", "x", false).await;

        let Some(Dashboard::Client(overview)) = app.dashboard().await else {
            panic!("expected client dashboard");
        };
        assert_eq!(overview.available_services, 3);
        assert_eq!(overview.bookings, 2);
    }

    #[tokio::test]
    async fn test_login_stamps_directory_account() {
        let app = AppState::ephemeral();
        // admin@servicehub.com is a seeded directory account
        app.login("admin@servicehub.com", "x", false).await;

        let admin = app
            .directory
            .all()
            .await
            .into_iter()
            .find(|u| u.email == "admin@servicehub.com")
            .unwrap();
        assert!(admin.last_login.is_some());
    }

    #[tokio::test]
    async fn test_logout_drops_dashboard() {
        let app = AppState::ephemeral();
        app.login("user@x.com", "x", false).await;
        assert!(app.dashboard().await.is_some());

        app.session.logout().await;
        assert!(app.dashboard().await.is_none());
    }
}
