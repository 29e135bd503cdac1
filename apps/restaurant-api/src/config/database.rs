//! Database configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// SQLite connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://data/restaurants.db` or `sqlite::memory:`.
    #[serde(default = "default_url")]
    pub url: String,
    /// Pool size. One connection serializes every transaction.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before failing.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// Create the database file when it does not exist.
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            create_if_missing: default_create_if_missing(),
        }
    }
}

impl DatabaseConfig {
    /// In-memory database, used by tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            ..Self::default()
        }
    }

    /// Acquire timeout as a [`Duration`].
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

fn default_url() -> String {
    "sqlite://data/restaurants.db".to_string()
}

const fn default_max_connections() -> u32 {
    1
}

const fn default_acquire_timeout() -> u64 {
    30
}

const fn default_create_if_missing() -> bool {
    true
}
