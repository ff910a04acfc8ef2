//! Policy source configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::analysis::EffectUnit;
use crate::domain::policy::{ThresholdUnit, DEFAULT_CURRENCY};

/// Where policy artifacts live and how incomplete artifacts are read
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Directory holding one JSON/YAML artifact per policy version
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Currency applied to artifacts that omit one
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

impl PolicyConfig {
    /// Validate policy configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("policy.directory"));
        }
        ThresholdUnit::new(self.default_currency.clone(), EffectUnit::Qaly)
            .map_err(|_| ValidationError::InvalidCurrency(self.default_currency.clone()))?;
        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            default_currency: default_currency(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("policies")
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}
