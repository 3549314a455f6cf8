mod generator;
mod limits;

pub use generator::*;
pub use limits::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.limits.max_agents < 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "limits.max_agents".into(),
                message: "must not be negative (use 0 for no explicit limit)".into(),
            });
        }

        if self.limits.ram_mb_override == Some(0) {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "limits.ram_mb_override".into(),
                message: "0 MiB will trigger the RAM warning for every tier".into(),
            });
        }

        if let Some(dir) = &self.generator.input_dir {
            if dir.as_os_str().is_empty() {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "generator.input_dir".into(),
                    message: "input_dir must not be empty".into(),
                });
            }
        }

        if self.generator.output.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "generator.output".into(),
                message: "output must not be empty (use \"-\" for stdout)".into(),
            });
        }

        if self.generator.license.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "generator.license".into(),
                message: "license must not be empty (use \"None\" for no header)".into(),
            });
        }

        errors
    }
}
