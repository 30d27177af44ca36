//! Application configuration
//!
//! Configuration is loaded from environment variables; every knob has a
//! sensible default so the app starts with no environment at all.

use crate::session::SessionConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the remembered-identity record
    pub data_dir: PathBuf,

    /// Session configuration
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".servicehub"),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SERVICEHUB_DATA_DIR")
            && !dir.is_empty()
        {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(val) = env::var("LOGIN_DELAY_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.session.login_delay = Duration::from_millis(ms);
        }
        if let Ok(val) = env::var("RESET_DELAY_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.session.reset_delay = Duration::from_millis(ms);
        }

        config
    }
}
