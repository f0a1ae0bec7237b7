use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::command_trigger::{TriggerRegistry, DEFAULT_COMMAND_TRIGGERS};

pub const DEFAULT_MULTILABEL_LIMIT: usize = 5;
/// Environment variable overriding `multilabel_limit`.
pub const MULTILABEL_LIMIT_ENV: &str = "multilabel_limit";
pub const NO_DCO_LABEL: &str = "no-dco";

fn default_command_triggers() -> Vec<String> {
    DEFAULT_COMMAND_TRIGGERS
        .iter()
        .map(|trigger| trigger.to_string())
        .collect()
}

fn default_multilabel_limit() -> usize {
    DEFAULT_MULTILABEL_LIMIT
}

fn default_protected_labels() -> Vec<String> {
    vec![NO_DCO_LABEL.to_string()]
}

/// Validation failures for command configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandConfigError {
    #[error("at least one command trigger is required")]
    EmptyTriggers,
    #[error("command trigger at index {index} is blank")]
    BlankTrigger { index: usize },
    #[error("command trigger '{trigger}' is configured more than once")]
    DuplicateTrigger { trigger: String },
    #[error("multilabel_limit must be greater than 0")]
    ZeroLabelLimit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Hosting-environment configuration for the interpreter.
pub struct CommandConfig {
    #[serde(default = "default_command_triggers")]
    pub triggers: Vec<String>,
    #[serde(default = "default_multilabel_limit")]
    pub multilabel_limit: usize,
    /// Labels that may not be removed through a comment command.
    #[serde(default = "default_protected_labels")]
    pub protected_labels: Vec<String>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            triggers: default_command_triggers(),
            multilabel_limit: default_multilabel_limit(),
            protected_labels: default_protected_labels(),
        }
    }
}

impl CommandConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("failed to parse command config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CommandConfigError> {
        self.trigger_registry()?;
        if self.multilabel_limit == 0 {
            return Err(CommandConfigError::ZeroLabelLimit);
        }
        Ok(())
    }

    pub fn trigger_registry(&self) -> Result<TriggerRegistry, CommandConfigError> {
        TriggerRegistry::new(self.triggers.iter().cloned())
    }

    /// Applies `multilabel_limit` from `lookup`. Unparseable or zero values
    /// fall back to the default limit.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(MULTILABEL_LIMIT_ENV) {
            self.multilabel_limit = match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    warn!(
                        value = raw.as_str(),
                        default = DEFAULT_MULTILABEL_LIMIT,
                        "invalid multilabel_limit, using default"
                    );
                    DEFAULT_MULTILABEL_LIMIT
                }
            };
        }
        self
    }

    pub fn with_process_env(self) -> Self {
        self.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn is_protected_label(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.protected_labels
            .iter()
            .any(|protected| protected.to_lowercase() == label)
    }
}

/// Loads a TOML command config, or the defaults when `path` is `None`.
pub fn load_command_config(path: Option<&Path>) -> Result<CommandConfig> {
    let Some(path) = path else {
        return Ok(CommandConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read command config {}", path.display()))?;
    CommandConfig::from_toml_str(&raw)
        .with_context(|| format!("invalid command config {}", path.display()))
}
