//! Property tests over the full evaluation pipeline.
//!
//! Uses explicit thresholds against an empty policy store, so every case
//! exercises validation, dominance, ratio, decision and PSA without policy
//! artifacts.

use std::sync::Arc;

use proptest::prelude::*;

use icer_engine::adapters::InMemoryPolicySource;
use icer_engine::application::{EvaluateCommand, EvaluateHandler, PolicyStore};
use icer_engine::domain::analysis::{
    Arm, Decision, Dominance, EffectUnit, PsaSettings, UncertaintyAnalyzer, UncertaintySpec,
};
use icer_engine::domain::evaluation::{EvaluationRequest, EvaluationResult};
use icer_engine::domain::policy::{Threshold, ThresholdSource, ThresholdUnit};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn handler(workers: usize) -> EvaluateHandler {
    let store = Arc::new(PolicyStore::empty(Arc::new(InMemoryPolicySource::default())));
    let analyzer = UncertaintyAnalyzer::new(PsaSettings {
        chunk_size: 250,
        workers,
        ..PsaSettings::default()
    });
    EvaluateHandler::new(store, analyzer)
}

fn threshold(value: f64) -> Threshold {
    Threshold::new(
        value,
        ThresholdUnit::new("CNY", EffectUnit::Qaly).unwrap(),
        ThresholdSource::Explicit,
    )
    .unwrap()
}

fn evaluate(
    handler: &EvaluateHandler,
    comparator: Arm,
    intervention: Arm,
    wtp: f64,
    uncertainty: Option<UncertaintySpec>,
) -> EvaluationResult {
    let mut request = EvaluationRequest::new(comparator, intervention).with_threshold(threshold(wtp));
    if let Some(spec) = uncertainty {
        request = request.with_uncertainty(spec);
    }
    handler.handle(EvaluateCommand::new(request)).unwrap()
}

fn cost() -> impl Strategy<Value = f64> {
    0.0..100_000.0f64
}

fn effect() -> impl Strategy<Value = f64> {
    -5.0..5.0f64
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn dominance_settles_the_decision(
        c0 in cost(), e0 in effect(), c1 in cost(), e1 in effect(), wtp in 1.0..200_000.0f64
    ) {
        let result = evaluate(&handler(1), Arm::new(c0, e0), Arm::new(c1, e1), wtp, None);

        match result.dominance {
            Dominance::SimpleDominant => prop_assert_eq!(result.decision, Decision::Accept),
            Dominance::SimpleDominated => prop_assert_eq!(result.decision, Decision::Reject),
            Dominance::None => {}
        }
    }

    #[test]
    fn ratio_is_null_exactly_when_effects_tie(
        c0 in cost(), e0 in effect(), c1 in cost(), wtp in 1.0..200_000.0f64
    ) {
        let tied = evaluate(&handler(1), Arm::new(c0, e0), Arm::new(c1, e0), wtp, None);
        prop_assert!(tied.icer_value.is_none());
        prop_assert!(tied.icer_unit.is_none());
    }

    #[test]
    fn ratio_and_net_benefit_rules_agree_when_effect_gains(
        c0 in cost(), e0 in effect(), c1 in cost(), gain in 0.01..5.0f64, wtp in 1.0..200_000.0f64
    ) {
        let result = evaluate(&handler(1), Arm::new(c0, e0), Arm::new(c1, e0 + gain), wtp, None);
        prop_assume!(result.net_benefit.abs() > 1e-6);

        let expected = if result.net_benefit > 0.0 { Decision::Accept } else { Decision::Reject };
        prop_assert_eq!(result.decision, expected);
    }

    #[test]
    fn psa_probability_is_bounded(
        c0 in cost(), e0 in effect(), c1 in cost(), e1 in effect(),
        se in 0.0..5_000.0f64, seed in any::<u64>()
    ) {
        let spec = UncertaintySpec::new(se, se, 0.1, 0.1, 500).with_seed(seed);
        let result = evaluate(&handler(1), Arm::new(c0, e0), Arm::new(c1, e1), 37446.0, Some(spec));

        let prob = result.ceac_prob_accept.unwrap();
        prop_assert!((0.0..=1.0).contains(&prob));
    }
}

// =============================================================================
// Reproducibility
// =============================================================================

#[test]
fn psa_is_identical_for_any_worker_count() {
    let spec = UncertaintySpec::new(1500.0, 1500.0, 0.1, 0.1, 2000).with_seed(2025);
    let comparator = Arm::new(10000.0, 0.8);
    let intervention = Arm::new(12000.0, 1.1);

    let single = evaluate(&handler(1), comparator, intervention, 37446.0, Some(spec.clone()));
    let parallel = evaluate(&handler(4), comparator, intervention, 37446.0, Some(spec));

    assert_eq!(single.ceac_prob_accept, parallel.ceac_prob_accept);
}

#[test]
fn psa_is_non_decreasing_in_threshold_for_fixed_seed() {
    let spec = UncertaintySpec::new(1500.0, 1500.0, 0.01, 0.01, 2000).with_seed(99);
    let comparator = Arm::new(10000.0, 0.8);
    let intervention = Arm::new(12000.0, 1.1);
    let handler = handler(2);

    let mut previous = 0.0;
    for wtp in [1000.0, 5000.0, 6000.0, 7000.0, 10000.0, 37446.0, 100000.0] {
        let result = evaluate(&handler, comparator, intervention, wtp, Some(spec.clone()));
        let prob = result.ceac_prob_accept.unwrap();
        assert!(prob >= previous, "threshold {} gave {} after {}", wtp, prob, previous);
        previous = prob;
    }
}

#[test]
fn missing_seed_is_generated_and_reported() {
    let spec = UncertaintySpec::new(100.0, 100.0, 0.05, 0.05, 100);
    let result = evaluate(
        &handler(1),
        Arm::new(10000.0, 0.8),
        Arm::new(12000.0, 1.1),
        37446.0,
        Some(spec),
    );

    let seed = result.assumptions.get("psa_seed").unwrap();
    assert!(seed.parse::<u64>().is_ok());
}
