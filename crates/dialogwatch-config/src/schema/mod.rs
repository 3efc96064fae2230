//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use dialogwatch_protocols::{BrowserKind, EnumerationMethod};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watcher: WatcherConfig,

    #[serde(default)]
    pub expectation: ExpectationConfig,

    #[serde(default)]
    pub dialogs: DialogsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Poller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    #[serde(default = "default_browser")]
    pub browser: BrowserKind,

    /// How child windows of a candidate dialog are enumerated.
    /// Defaults to the method the browser's dialogs need.
    #[serde(default)]
    pub enumeration: Option<EnumerationMethod>,

    /// Total sleep between two scans.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Shutdown is honored within one slice of this length.
    #[serde(default = "default_shutdown_check_ms")]
    pub shutdown_check_ms: u64,
}

impl WatcherConfig {
    pub fn child_enumeration(&self) -> EnumerationMethod {
        self.enumeration.unwrap_or_else(|| self.browser.child_enumeration())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn shutdown_check(&self) -> Duration {
        Duration::from_millis(self.shutdown_check_ms)
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            browser: default_browser(),
            enumeration: None,
            poll_interval_ms: default_poll_interval_ms(),
            shutdown_check_ms: default_shutdown_check_ms(),
        }
    }
}

fn default_browser() -> BrowserKind {
    BrowserKind::Firefox
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_shutdown_check_ms() -> u64 {
    200
}

/// Expectation and retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectationConfig {
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: u64,

    /// Upper bound of the exponential back-off between retries.
    #[serde(default = "default_max_retry_sleep_ms")]
    pub max_retry_sleep_ms: u64,
}

impl ExpectationConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    pub fn max_retry_sleep(&self) -> Duration {
        Duration::from_millis(self.max_retry_sleep_ms)
    }
}

impl Default for ExpectationConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: default_timeout_secs(),
            max_retry_sleep_ms: default_max_retry_sleep_ms(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retry_sleep_ms() -> u64 {
    100
}

/// Native dialog interaction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogsConfig {
    /// How long to wait for a window to disappear after an action closed it.
    #[serde(default = "default_dismiss_timeout_secs")]
    pub dismiss_timeout_secs: u64,

    /// Delay between characters posted to a native input queue.
    #[serde(default = "default_keystroke_delay_ms")]
    pub keystroke_delay_ms: u64,
}

impl DialogsConfig {
    pub fn dismiss_timeout(&self) -> Duration {
        Duration::from_secs(self.dismiss_timeout_secs)
    }

    pub fn keystroke_delay(&self) -> Duration {
        Duration::from_millis(self.keystroke_delay_ms)
    }
}

impl Default for DialogsConfig {
    fn default() -> Self {
        Self {
            dismiss_timeout_secs: default_dismiss_timeout_secs(),
            keystroke_delay_ms: default_keystroke_delay_ms(),
        }
    }
}

fn default_dismiss_timeout_secs() -> u64 {
    10
}

fn default_keystroke_delay_ms() -> u64 {
    50
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enables the rolling file layer when set.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            max_log_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    7
}

/// Default location of the configuration file (`~/.dialogwatch/config.toml`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".dialogwatch").join("config.toml"))
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
