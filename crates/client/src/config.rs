//! Client configuration.

use std::time::Duration;

use crate::poller::PollConfig;

/// Client configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (default: `http://localhost:8000`).
    pub base_url: String,
    /// Directory where the backend writes result artifacts
    /// (default: `results`). Artifact paths are reconstructed from it
    /// via `furnish_core::naming`.
    pub results_dir: String,
    /// Polling cadence and attempt budget.
    pub poll: PollConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            results_dir: "results".into(),
            poll: PollConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `FURNISH_BASE_URL`          | `http://localhost:8000` |
    /// | `FURNISH_RESULTS_DIR`       | `results`               |
    /// | `FURNISH_POLL_INTERVAL_SECS`| `2`                     |
    /// | `FURNISH_POLL_MAX_ATTEMPTS` | `70`                    |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("FURNISH_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".into());

        let results_dir =
            std::env::var("FURNISH_RESULTS_DIR").unwrap_or_else(|_| "results".into());

        let interval_secs: u64 = std::env::var("FURNISH_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("FURNISH_POLL_INTERVAL_SECS must be a valid u64");

        let max_attempts: u32 = std::env::var("FURNISH_POLL_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "70".into())
            .parse()
            .expect("FURNISH_POLL_MAX_ATTEMPTS must be a valid u32");

        Self {
            base_url,
            results_dir,
            poll: PollConfig {
                interval: Duration::from_secs(interval_secs),
                max_attempts,
                backoff: None,
            },
        }
    }
}
