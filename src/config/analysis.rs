//! Uncertainty analysis configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::{PsaSettings, MAX_PSA_SAMPLES};

/// Hard upper bound on the configurable sample ceiling.
const SAMPLE_CEILING_LIMIT: u32 = 1_000_000;

/// Hard upper bound on PSA worker threads.
const WORKER_LIMIT: usize = 64;

/// PSA sampling limits and parallelism
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Largest `samples` a request may ask for
    #[serde(default = "default_max_samples")]
    pub max_samples: u32,

    /// Draws per independently seeded chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,

    /// Worker threads per PSA run
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl AnalysisConfig {
    /// Convert to the analyzer's settings
    pub fn to_psa_settings(&self) -> PsaSettings {
        PsaSettings {
            max_samples: self.max_samples,
            chunk_size: self.chunk_size,
            workers: self.workers,
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_samples == 0 || self.max_samples > SAMPLE_CEILING_LIMIT {
            return Err(ValidationError::InvalidSampleCeiling {
                max: SAMPLE_CEILING_LIMIT,
            });
        }
        if self.chunk_size == 0 {
            return Err(ValidationError::InvalidChunkSize);
        }
        if self.workers == 0 || self.workers > WORKER_LIMIT {
            return Err(ValidationError::InvalidWorkerCount { max: WORKER_LIMIT });
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_samples: default_max_samples(),
            chunk_size: default_chunk_size(),
            workers: default_workers(),
        }
    }
}

fn default_max_samples() -> u32 {
    MAX_PSA_SAMPLES
}

fn default_chunk_size() -> u32 {
    1000
}

fn default_workers() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_analyzer_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.to_psa_settings(), PsaSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_ceiling_is_rejected() {
        let config = AnalysisConfig {
            max_samples: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_chunk_is_rejected() {
        let config = AnalysisConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidChunkSize)));
    }

    #[test]
    fn test_worker_bounds() {
        let config = AnalysisConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            workers: 4,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
