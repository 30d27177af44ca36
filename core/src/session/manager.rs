use crate::session::state::{Identity, SessionConfig, mock_identity};
use crate::session::store::{IdentityStore, MemoryIdentityStore};
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Session manager: owns the single active identity and mediates its
/// acquisition and loss for the rest of the application.
///
/// This reproduces the mock contract of the original front-end: login always
/// succeeds, the password is never checked, and the only failure mode in the
/// whole lifecycle is a malformed persisted record, which is discarded.
pub struct SessionManager {
    current: RwLock<Option<Identity>>,
    store: Arc<dyn IdentityStore>,
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self::with_config(store, SessionConfig::default())
    }

    pub fn with_config(store: Arc<dyn IdentityStore>, config: SessionConfig) -> Self {
        Self {
            current: RwLock::new(None),
            store,
            config,
        }
    }

    /// In-memory manager with zero delays, for tests and ephemeral runs.
    pub fn ephemeral() -> Self {
        Self::with_config(
            Arc::new(MemoryIdentityStore::new()),
            SessionConfig::immediate(),
        )
    }

    /// Attempt to adopt a remembered identity at process start.
    ///
    /// Never fails the caller: a malformed record is discarded (and the
    /// stored copy removed), any store error is logged and swallowed, and
    /// the process continues with no active session.
    pub async fn restore(&self) -> Option<Identity> {
        let identity = match self.store.load().await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                debug!("No remembered identity found");
                return None;
            }
            Err(e) => {
                warn!("Discarding unreadable remembered identity: {}", e);
                if let Err(e) = self.store.clear().await {
                    warn!("Failed to remove corrupted identity record: {}", e);
                }
                return None;
            }
        };

        info!(
            "Restored remembered session for {} ({})",
            identity.email, identity.role
        );
        counter!("servicehub_sessions_restored_total").increment(1);

        *self.current.write().await = Some(identity.clone());
        Some(identity)
    }

    /// Mock credential exchange.
    ///
    /// Simulates a network round trip, derives the role from the email, and
    /// installs the resulting identity as the active session. The password
    /// is deliberately ignored and there is no failure path. With `remember`
    /// set the identity is persisted; otherwise any previously persisted
    /// record is cleared.
    pub async fn login(&self, email: &str, _password: &str, remember: bool) -> Identity {
        let start = Instant::now();

        tokio::time::sleep(self.config.login_delay).await;

        let identity = mock_identity(email);
        info!("Login for {} as {}", identity.email, identity.role);
        counter!("servicehub_logins_total", "role" => identity.role.label()).increment(1);

        *self.current.write().await = Some(identity.clone());

        if remember {
            if let Err(e) = self.store.save(&identity).await {
                warn!("Failed to persist remembered identity: {}", e);
            }
        } else if let Err(e) = self.store.clear().await {
            warn!("Failed to clear previously remembered identity: {}", e);
        }

        histogram!("servicehub_login_duration_seconds").record(start.elapsed());
        identity
    }

    /// Clear the active identity and any persisted copy.
    pub async fn logout(&self) {
        let previous = self.current.write().await.take();
        if let Some(identity) = previous {
            info!("Logged out {}", identity.email);
            counter!("servicehub_logouts_total").increment(1);
        }

        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear remembered identity on logout: {}", e);
        }
    }

    /// Mock password-reset round trip. Reports success unconditionally and
    /// performs no actual action.
    pub async fn reset_password(&self, email: &str) {
        tokio::time::sleep(self.config.reset_delay).await;
        info!("Password reset email sent to {}", email);
        counter!("servicehub_password_resets_total").increment(1);
    }

    /// The active identity, if any.
    pub async fn current(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}
