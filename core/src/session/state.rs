use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Account role on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Client,
    Provider,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "cliente",
            Role::Provider => "fornecedor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The authenticated user's display attributes for the session's lifetime.
///
/// This struct, serialized as JSON, is exactly the record the identity store
/// persists when the remember flag is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

/// Derive a role from the login email.
///
/// Placeholder for a real authorization check: a substring match on the
/// address, nothing more. Kept deterministic so the rest of the app can be
/// exercised without a backend.
pub fn infer_role(email: &str) -> Role {
    if email.contains("admin") {
        Role::Admin
    } else if email.contains("fornecedor") {
        Role::Provider
    } else {
        Role::Client
    }
}

/// Build the synthetic identity the mock credential exchange hands out.
pub fn mock_identity(email: &str) -> Identity {
    let (id, display_name, role) = match infer_role(email) {
        Role::Admin => ("1", "Admin User", Role::Admin),
        Role::Provider => ("2", "Maria Santos", Role::Provider),
        Role::Client => ("3", "João Cliente", Role::Client),
    };

    Identity {
        id: id.to_string(),
        display_name: display_name.to_string(),
        email: email.to_string(),
        role,
    }
}

/// Session manager configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Artificial delay for the mock credential exchange
    pub login_delay: Duration,
    /// Artificial delay for the mock password-reset round trip
    pub reset_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_delay: Duration::from_millis(1000),
            reset_delay: Duration::from_millis(1000),
        }
    }
}

impl SessionConfig {
    /// Zero-delay configuration for tests.
    pub fn immediate() -> Self {
        Self {
            login_delay: Duration::ZERO,
            reset_delay: Duration::ZERO,
        }
    }
}

/// Get current timestamp in milliseconds
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_inference() {
        assert_eq!(infer_role("admin@servicehub.com"), Role::Admin);
        assert_eq!(infer_role("maria.fornecedor@email.com"), Role::Provider);
        assert_eq!(infer_role("joao@email.com"), Role::Client);
        // "admin" wins over "fornecedor" when both appear
        assert_eq!(infer_role("admin.fornecedor@email.com"), Role::Admin);
    }

    #[test]
    fn test_mock_identity_keeps_email() {
        let identity = mock_identity("fornecedor@x.com");
        assert_eq!(identity.role, Role::Provider);
        assert_eq!(identity.email, "fornecedor@x.com");
        assert_eq!(identity.display_name, "Maria Santos");
    }

    #[test]
    fn test_identity_round_trips_as_json() {
        let identity = mock_identity("user@x.com");
        let json = serde_json::to_string(&identity).unwrap();
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::Provider).unwrap();
        assert_eq!(json, "\"provider\"");
    }
}
