//! Uncertainty Analyzer - probabilistic sensitivity analysis (PSA).
//!
//! Each draw samples the four arm parameters from independent normal
//! distributions and counts how often the sampled net benefit is positive.
//! The share of positive draws is the CEAC acceptance probability at the
//! resolved threshold.
//!
//! Draws are split into fixed-size chunks. Chunk `i` uses ChaCha stream `i`
//! of the evaluation seed, so the accept count depends only on the seed and
//! the chunk size, never on how many worker threads processed the chunks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use super::{Arm, Increment};
use crate::domain::evaluation::EvaluationError;

/// Default number of Monte Carlo draws when the caller omits `samples`.
pub const DEFAULT_PSA_SAMPLES: u32 = 1000;

/// Default ceiling on Monte Carlo draws per evaluation.
pub const MAX_PSA_SAMPLES: u32 = 10_000;

fn default_samples() -> u32 {
    DEFAULT_PSA_SAMPLES
}

/// Caller-supplied parameter uncertainty for one evaluation.
///
/// Standard errors default to zero, which pins that parameter at its point
/// estimate. The short `se_cost_0`-style names are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertaintySpec {
    #[serde(default, alias = "se_cost_0")]
    pub se_cost_comparator: f64,
    #[serde(default, alias = "se_cost_1")]
    pub se_cost_intervention: f64,
    #[serde(default, alias = "se_eff_0")]
    pub se_effect_comparator: f64,
    #[serde(default, alias = "se_eff_1")]
    pub se_effect_intervention: f64,
    #[serde(default = "default_samples")]
    pub samples: u32,
    /// Pins the random sequence for reproducible runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for UncertaintySpec {
    fn default() -> Self {
        Self {
            se_cost_comparator: 0.0,
            se_cost_intervention: 0.0,
            se_effect_comparator: 0.0,
            se_effect_intervention: 0.0,
            samples: DEFAULT_PSA_SAMPLES,
            seed: None,
        }
    }
}

impl UncertaintySpec {
    /// Creates a spec with the given standard errors and sample count.
    pub fn new(
        se_cost_comparator: f64,
        se_cost_intervention: f64,
        se_effect_comparator: f64,
        se_effect_intervention: f64,
        samples: u32,
    ) -> Self {
        Self {
            se_cost_comparator,
            se_cost_intervention,
            se_effect_comparator,
            se_effect_intervention,
            samples,
            seed: None,
        }
    }

    /// Pins the random sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the sample count against `max_samples` and every standard error.
    pub fn validate(&self, max_samples: u32) -> Result<(), EvaluationError> {
        if self.samples == 0 {
            return Err(EvaluationError::InvalidUncertaintySpec(
                "samples must be positive".to_string(),
            ));
        }
        if self.samples > max_samples {
            return Err(EvaluationError::InvalidUncertaintySpec(format!(
                "samples must not exceed {}, got {}",
                max_samples, self.samples
            )));
        }

        let errors = [
            ("se_cost_comparator", self.se_cost_comparator),
            ("se_cost_intervention", self.se_cost_intervention),
            ("se_effect_comparator", self.se_effect_comparator),
            ("se_effect_intervention", self.se_effect_intervention),
        ];
        for (name, value) in errors {
            if !value.is_finite() || value < 0.0 {
                return Err(EvaluationError::InvalidUncertaintySpec(format!(
                    "{} must be a non-negative finite number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Tunables for the sampling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsaSettings {
    /// Upper bound on `UncertaintySpec::samples`.
    pub max_samples: u32,
    /// Draws per independently seeded chunk.
    pub chunk_size: u32,
    /// Worker threads used to process chunks.
    pub workers: usize,
}

impl Default for PsaSettings {
    fn default() -> Self {
        Self {
            max_samples: MAX_PSA_SAMPLES,
            chunk_size: 1000,
            workers: 1,
        }
    }
}

/// Result of one PSA run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsaOutcome {
    /// Share of draws with positive net benefit, in [0, 1].
    pub prob_accept: f64,
    pub accepted: u64,
    pub samples: u64,
    /// Seed that reproduces this run.
    pub seed: u64,
}

/// Independent normal distributions for the four sampled quantities.
struct DrawModel {
    cost_comparator: Normal<f64>,
    cost_intervention: Normal<f64>,
    effect_comparator: Normal<f64>,
    effect_intervention: Normal<f64>,
}

impl DrawModel {
    fn new(comparator: &Arm, intervention: &Arm, spec: &UncertaintySpec) -> Result<Self, EvaluationError> {
        Ok(Self {
            cost_comparator: normal(comparator.cost, spec.se_cost_comparator)?,
            cost_intervention: normal(intervention.cost, spec.se_cost_intervention)?,
            effect_comparator: normal(comparator.effect, spec.se_effect_comparator)?,
            effect_intervention: normal(intervention.effect, spec.se_effect_intervention)?,
        })
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Increment {
        let c0 = self.cost_comparator.sample(rng);
        let c1 = self.cost_intervention.sample(rng);
        let e0 = self.effect_comparator.sample(rng);
        let e1 = self.effect_intervention.sample(rng);
        Increment::from_deltas(c1 - c0, e1 - e0)
    }
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, EvaluationError> {
    Normal::new(mean, std_dev)
        .map_err(|e| EvaluationError::InvalidUncertaintySpec(format!("invalid distribution: {}", e)))
}

/// Monte Carlo PSA runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct UncertaintyAnalyzer {
    settings: PsaSettings,
}

impl UncertaintyAnalyzer {
    /// Creates an analyzer with the given settings.
    pub fn new(settings: PsaSettings) -> Self {
        Self { settings }
    }

    /// Returns the configured settings.
    pub fn settings(&self) -> &PsaSettings {
        &self.settings
    }

    /// Runs PSA using the spec's seed, or a fresh one from the thread RNG.
    pub fn analyze(
        &self,
        comparator: &Arm,
        intervention: &Arm,
        threshold: f64,
        spec: &UncertaintySpec,
    ) -> Result<PsaOutcome, EvaluationError> {
        let seed = spec.seed.unwrap_or_else(|| rand::thread_rng().gen());
        self.analyze_seeded(comparator, intervention, threshold, spec, seed)
    }

    /// Runs PSA with an explicit seed.
    pub fn analyze_seeded(
        &self,
        comparator: &Arm,
        intervention: &Arm,
        threshold: f64,
        spec: &UncertaintySpec,
        seed: u64,
    ) -> Result<PsaOutcome, EvaluationError> {
        spec.validate(self.settings.max_samples)?;
        let model = DrawModel::new(comparator, intervention, spec)?;

        let samples = u64::from(spec.samples);
        let chunk_size = u64::from(self.settings.chunk_size.max(1));
        let chunks = (samples + chunk_size - 1) / chunk_size;
        let chunk_len = |index: u64| chunk_size.min(samples - index * chunk_size);

        let workers = (self.settings.workers.max(1) as u64).min(chunks);
        let accepted: u64 = if workers <= 1 {
            (0..chunks)
                .map(|index| run_chunk(&model, threshold, seed, index, chunk_len(index)))
                .sum()
        } else {
            let model = &model;
            std::thread::scope(|scope| {
                let handles: Vec<_> = (0..workers)
                    .map(|worker| {
                        scope.spawn(move || {
                            (worker..chunks)
                                .step_by(workers as usize)
                                .map(|index| run_chunk(model, threshold, seed, index, chunk_len(index)))
                                .sum::<u64>()
                        })
                    })
                    .collect();

                handles.into_iter().try_fold(0u64, |total, handle| {
                    handle
                        .join()
                        .map(|partial| total + partial)
                        .map_err(|_| EvaluationError::Internal("PSA worker panicked".to_string()))
                })
            })?
        };

        Ok(PsaOutcome {
            prob_accept: accepted as f64 / samples as f64,
            accepted,
            samples,
            seed,
        })
    }
}

fn run_chunk(model: &DrawModel, threshold: f64, seed: u64, index: u64, draws: u64) -> u64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index);

    (0..draws)
        .filter(|_| model.draw(&mut rng).net_benefit(threshold) > 0.0)
        .count() as u64
}
