mod env;
mod history;
mod llm;
mod nag;
mod observability;
mod prompt;
mod server;

pub use env::*;
pub use history::*;
pub use llm::*;
pub use nag::*;
pub use observability::*;
pub use prompt::*;
pub use server::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub nag: NagConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
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

impl ConfigError {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
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

        if self.server.port == 0 {
            errors.push(ConfigError::error("server.port", "port must be greater than 0"));
        }
        if self.server.host.is_empty() {
            errors.push(ConfigError::error("server.host", "host must not be empty"));
        }
        if self.server.cors.allowed_origins.len() == 1
            && self.server.cors.allowed_origins[0] == "*"
        {
            errors.push(ConfigError::warning(
                "server.cors.allowed_origins",
                "wildcard \"*\" allows all origins (not recommended for production)",
            ));
        }

        if self.llm.base_url.is_empty() {
            errors.push(ConfigError::error("llm.base_url", "base_url must not be empty"));
        }
        if self.llm.model.is_empty() {
            errors.push(ConfigError::error("llm.model", "model must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            errors.push(ConfigError::error(
                "llm.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }
        if self.llm.auth.key.is_none() && self.llm.auth.env.is_empty() {
            errors.push(ConfigError::warning(
                "llm.auth",
                "no credential source configured; chat requests will fail",
            ));
        }

        if self.history.max_turns == 0 {
            errors.push(ConfigError::error(
                "history.max_turns",
                "window must keep at least one turn",
            ));
        }

        if self.prompt.enabled && self.prompt.instruction.is_empty() {
            errors.push(ConfigError::warning(
                "prompt.instruction",
                "prompt augmentation is enabled but the instruction is empty",
            ));
        }

        if !(0.0..=2.0).contains(&self.nag.temperature) {
            errors.push(ConfigError::error(
                "nag.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }
        if self.nag.variant() == NagVariant::Static {
            for placeholder in ["{person}", "{item}"] {
                if !self.nag.template.contains(placeholder) {
                    errors.push(ConfigError::warning(
                        "nag.template",
                        format!("template has no {placeholder} placeholder"),
                    ));
                }
            }
        }
        if self.nag.variant() == NagVariant::Dynamic && !self.nag.pitch_prompt.contains("{item}") {
            errors.push(ConfigError::warning(
                "nag.pitch_prompt",
                "pitch prompt has no {item} placeholder",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_errors() {
        let issues = Config::default().validate();
        assert!(
            issues.iter().all(|i| i.severity != ConfigSeverity::Error),
            "unexpected errors: {issues:?}"
        );
    }

    #[test]
    fn zero_window_is_an_error() {
        let mut config = Config::default();
        config.history.max_turns = 0;
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.field == "history.max_turns"));
    }

    #[test]
    fn out_of_range_temperature_is_an_error() {
        let mut config = Config::default();
        config.llm.temperature = 3.5;
        let issues = config.validate();
        assert!(issues
            .iter()
            .any(|i| i.field == "llm.temperature" && i.severity == ConfigSeverity::Error));
    }

    #[test]
    fn static_template_without_placeholders_warns() {
        let mut config = Config::default();
        config.nag.want_items = Some(vec!["bag".into()]);
        config.nag.person_names = Some(vec!["Aki".into()]);
        config.nag.template = "buy me something".into();
        let issues = config.validate();
        let template_warnings = issues.iter().filter(|i| i.field == "nag.template").count();
        assert_eq!(template_warnings, 2);
    }

    #[test]
    fn config_error_display_has_severity_tag() {
        let e = ConfigError::error("server.port", "port must be greater than 0");
        assert_eq!(e.to_string(), "[ERROR] server.port: port must be greater than 0");
    }
}
