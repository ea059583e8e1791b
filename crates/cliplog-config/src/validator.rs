//! Configuration validation.

use cliplog_protocols::{ContextKey, TraceLevel};

use crate::error::ConfigError;
use crate::schema::Config;

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

    /// Turn the first error into a [`ConfigError`].
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

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_gate(config, &mut result);
        Self::validate_funnel(config, &mut result);
        Self::validate_sink(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_gate(config: &Config, result: &mut ValidationResult) {
        if config.gate.required_context.is_empty() {
            result.add_warning(ValidationWarning::new(
                "gate.required_context",
                "No required context keys, logging is never deferred",
            ));
        }

        for name in &config.gate.required_context {
            if name.parse::<ContextKey>().is_err() {
                result.add_error(ValidationError::new(
                    "gate.required_context",
                    format!(
                        "Unknown context key '{}', valid keys: {:?}",
                        name,
                        ContextKey::ALL.map(|k| k.as_str())
                    ),
                ));
            }
        }
    }

    fn validate_funnel(config: &Config, result: &mut ValidationResult) {
        if config
            .funnel
            .extra_non_interaction_ids
            .iter()
            .any(|id| id.is_empty())
        {
            result.add_error(ValidationError::new(
                "funnel.extra_non_interaction_ids",
                "Click ids cannot be empty",
            ));
        }
    }

    fn validate_sink(config: &Config, result: &mut ValidationResult) {
        if config.sink.kind.writes_jsonl() && config.sink.path.is_none() {
            result.add_error(ValidationError::new(
                "sink.path",
                "path is required when the jsonl sink is enabled",
            ));
        }

        if config.sink.min_trace_level.parse::<TraceLevel>().is_err() {
            result.add_error(ValidationError::new(
                "sink.min_trace_level",
                format!("Unknown trace level '{}'", config.sink.min_trace_level),
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();
        if !VALID_LEVELS.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "'{}' is not a plain level, it will be used as a filter directive",
                    config.logging.level
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
