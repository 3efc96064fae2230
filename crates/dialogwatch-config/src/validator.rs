//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Log levels accepted by the tracing filter.
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Poll intervals below this are legal but keep a core busy.
const SHORT_POLL_INTERVAL_MS: u64 = 100;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_watcher(config, &mut result);
        Self::validate_expectation(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_watcher(config: &Config, result: &mut ValidationResult) {
        let watcher = &config.watcher;

        if watcher.shutdown_check_ms == 0 {
            result.add_error(ValidationError::new(
                "watcher.shutdown_check_ms",
                "shutdown_check_ms must be greater than 0",
            ));
        }

        if watcher.shutdown_check_ms > watcher.poll_interval_ms {
            result.add_error(ValidationError::new(
                "watcher.shutdown_check_ms",
                "shutdown_check_ms cannot exceed poll_interval_ms",
            ));
        }

        if watcher.poll_interval_ms < SHORT_POLL_INTERVAL_MS {
            result.add_warning(ValidationWarning::new(
                "watcher.poll_interval_ms",
                "poll_interval_ms is very short (<100ms), scans will run almost continuously",
            ));
        }
    }

    fn validate_expectation(config: &Config, result: &mut ValidationResult) {
        if config.expectation.max_retry_sleep_ms == 0 {
            result.add_error(ValidationError::new(
                "expectation.max_retry_sleep_ms",
                "max_retry_sleep_ms must be greater than 0",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!("Unknown log level '{}'", config.logging.level),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
