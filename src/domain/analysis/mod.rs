//! Analysis Module - Pure domain services for cost-effectiveness analysis.
//!
//! This module contains stateless functions that operate on arms and
//! thresholds to classify, price, and decide between two interventions.
//!
//! # Components
//!
//! - `Arm` / `Increment` - The compared options and their cost/effect deltas
//! - `DominanceAnalyzer` - Simple dominance classification
//! - `RatioCalculator` - ICER and incremental net monetary benefit
//! - `DecisionEngine` - Accept/reject/inconclusive verdict with rule cross-check
//! - `UncertaintyAnalyzer` - Monte Carlo PSA yielding a CEAC acceptance probability
//! - `DiscountingStrategy` - Present-value extension point
//!
//! # Design Philosophy
//!
//! Everything here except the PSA seed draw is pure. No ports or adapters
//! are needed since there's no I/O.

mod arm;
mod decision_engine;
mod discounting;
mod dominance_analyzer;
mod ratio_calculator;
mod uncertainty_analyzer;

pub use arm::{Arm, ArmRole, EffectUnit, Increment};
pub use decision_engine::{Decision, DecisionBasis, DecisionEngine, RuleAgreement, Verdict};
pub use discounting::{DiscountRates, DiscountingStrategy, Undiscounted, DEFAULT_DISCOUNT_RATE};
pub use dominance_analyzer::{Dominance, DominanceAnalyzer};
pub use ratio_calculator::{RatioCalculator, RatioOutcome};
pub use uncertainty_analyzer::{
    PsaOutcome, PsaSettings, UncertaintyAnalyzer, UncertaintySpec, DEFAULT_PSA_SAMPLES,
    MAX_PSA_SAMPLES,
};
