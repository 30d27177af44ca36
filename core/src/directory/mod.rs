//! Mock user directory backing the admin views.
//!
//! Seeded with the same hardcoded accounts the original platform shipped
//! with; mutations only ever flip the status field or stamp a login time.

use crate::session::state::{Role, now_millis};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Directory errors
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("User not found: {0}")]
    UserNotFound(String),
}

/// Whether an account may use the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    fn toggled(self) -> Self {
        match self {
            AccountStatus::Active => AccountStatus::Inactive,
            AccountStatus::Inactive => AccountStatus::Active,
        }
    }
}

/// A platform account as the admin screens see it.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: u64,
    pub last_login: Option<u64>,
}

/// Aggregate counts for the admin overview cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub total: usize,
    pub clients: usize,
    pub providers: usize,
    pub active: usize,
}

/// In-memory user directory
pub struct UserDirectory {
    users: RwLock<Vec<UserRecord>>,
}

impl UserDirectory {
    /// Directory seeded with the canonical mock accounts.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(seed_users()),
        }
    }

    pub async fn all(&self) -> Vec<UserRecord> {
        self.users.read().await.clone()
    }

    /// Case-insensitive substring search over name, email, and role label.
    /// An empty term matches everyone.
    pub async fn search(&self, term: &str) -> Vec<UserRecord> {
        let needle = term.to_lowercase();
        self.users
            .read()
            .await
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
                    || u.role.label().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> DirectoryStats {
        let users = self.users.read().await;
        DirectoryStats {
            total: users.len(),
            clients: users.iter().filter(|u| u.role == Role::Client).count(),
            providers: users.iter().filter(|u| u.role == Role::Provider).count(),
            active: users
                .iter()
                .filter(|u| u.status == AccountStatus::Active)
                .count(),
        }
    }

    /// Flip an account between active and inactive (the admin action).
    pub async fn toggle_status(&self, user_id: &str) -> Result<AccountStatus, DirectoryError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DirectoryError::UserNotFound(user_id.to_string()))?;

        user.status = user.status.toggled();
        info!("User {} is now {:?}", user.email, user.status);
        Ok(user.status)
    }

    /// Stamp the last-login time for the account matching `email`, if any.
    /// Mock logins are not required to correspond to a directory entry.
    pub async fn record_login(&self, email: &str) {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.email == email) {
            user.last_login = Some(now_millis());
        }
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_users() -> Vec<UserRecord> {
    // Seed timestamps are fixed dates in January 2024, kept as epoch millis
    const JAN_2024: u64 = 1_704_067_200_000; // 2024-01-01T00:00:00Z
    const DAY: u64 = 24 * 60 * 60 * 1000;
    let day = |d: u64| JAN_2024 + (d - 1) * DAY;

    vec![
        UserRecord {
            id: "1".to_string(),
            name: "João Silva".to_string(),
            email: "joao@email.com".to_string(),
            role: Role::Client,
            status: AccountStatus::Active,
            created_at: day(15),
            last_login: Some(day(20)),
        },
        UserRecord {
            id: "2".to_string(),
            name: "Maria Santos".to_string(),
            email: "maria.fornecedor@email.com".to_string(),
            role: Role::Provider,
            status: AccountStatus::Active,
            created_at: day(10),
            last_login: Some(day(19)),
        },
        UserRecord {
            id: "3".to_string(),
            name: "Pedro Costa".to_string(),
            email: "pedro.fornecedor@email.com".to_string(),
            role: Role::Provider,
            status: AccountStatus::Inactive,
            created_at: day(5),
            last_login: Some(day(15)),
        },
        UserRecord {
            id: "4".to_string(),
            name: "Ana Oliveira".to_string(),
            email: "ana@email.com".to_string(),
            role: Role::Client,
            status: AccountStatus::Active,
            created_at: day(12),
            last_login: Some(day(21)),
        },
        UserRecord {
            id: "5".to_string(),
            name: "Admin User".to_string(),
            email: "admin@servicehub.com".to_string(),
            role: Role::Admin,
            status: AccountStatus::Active,
            created_at: day(1),
            last_login: Some(day(21)),
        },
    ]
}
