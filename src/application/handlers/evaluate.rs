//! EvaluateHandler - Command handler for one ICER evaluation.
//!
//! Validates the request, resolves the threshold against a single policy
//! snapshot, then runs dominance, ratio, decision, and (optionally) PSA.
//! The handler is synchronous: PSA is CPU-bound, so async callers should run
//! it on a blocking thread.

use std::sync::Arc;

use crate::application::PolicyStore;
use crate::domain::analysis::{
    DecisionEngine, DiscountRates, DiscountingStrategy, DominanceAnalyzer, Increment,
    RatioCalculator, UncertaintyAnalyzer, Undiscounted,
};
use crate::domain::evaluation::{
    assumption_keys as keys, check_increment, Assumptions, EvaluationError, EvaluationRequest,
    EvaluationResult,
};
use crate::domain::foundation::{EvaluationId, Timestamp};

/// Command to evaluate an intervention against a comparator.
#[derive(Debug, Clone)]
pub struct EvaluateCommand {
    pub request: EvaluationRequest,
}

impl EvaluateCommand {
    pub fn new(request: EvaluationRequest) -> Self {
        Self { request }
    }
}

/// Handler for evaluations.
pub struct EvaluateHandler {
    store: Arc<PolicyStore>,
    analyzer: UncertaintyAnalyzer,
    discounting: Arc<dyn DiscountingStrategy>,
}

impl EvaluateHandler {
    pub fn new(store: Arc<PolicyStore>, analyzer: UncertaintyAnalyzer) -> Self {
        Self {
            store,
            analyzer,
            discounting: Arc::new(Undiscounted),
        }
    }

    /// Replaces the discounting strategy.
    pub fn with_discounting(mut self, discounting: Arc<dyn DiscountingStrategy>) -> Self {
        self.discounting = discounting;
        self
    }

    pub fn handle(&self, cmd: EvaluateCommand) -> Result<EvaluationResult, EvaluationError> {
        let request = cmd.request;
        let evaluation_id = EvaluationId::new();

        let effect_unit = request.validate()?;
        if let Some(spec) = &request.uncertainty {
            spec.validate(self.analyzer.settings().max_samples)?;
        }

        let policies = self.store.snapshot();
        let resolution = policies.resolve(
            request.policy_version.as_deref(),
            request.cohort.as_deref(),
            request.threshold.as_ref(),
            effect_unit,
        )?;
        let threshold = resolution.threshold.value;

        let rates = request.discount.unwrap_or_default();
        let comparator = self.discounting.apply(&request.comparator, &rates);
        let intervention = self.discounting.apply(&request.intervention, &rates);
        check_increment(&Increment::between(&comparator, &intervention), Some(threshold))?;

        let dominance = DominanceAnalyzer::classify(&comparator, &intervention);
        let ratio = RatioCalculator::compute(&comparator, &intervention, threshold);
        let verdict = DecisionEngine::verdict(
            dominance,
            ratio.icer,
            ratio.net_benefit,
            threshold,
            &ratio.increment,
        );

        if let Some(agreement) = DecisionEngine::cross_check(&ratio.increment, threshold) {
            if !agreement.agrees() {
                tracing::warn!(
                    evaluation_id = %evaluation_id,
                    delta_cost = ratio.increment.delta_cost,
                    delta_effect = ratio.increment.delta_effect,
                    threshold,
                    icer_accepts = agreement.icer_accepts,
                    net_benefit_accepts = agreement.net_benefit_accepts,
                    "ICER and net-benefit rules disagree"
                );
            }
        }

        tracing::debug!(
            evaluation_id = %evaluation_id,
            dominance = %dominance,
            decision = %verdict.decision,
            basis = verdict.basis.as_str(),
            threshold,
            "Deterministic evaluation complete"
        );

        let mut assumptions = Assumptions::new();
        assumptions.insert(keys::PERSPECTIVE, request.perspective);
        assumptions.insert(keys::EFFECT_UNIT, effect_unit);
        assumptions.insert(keys::THRESHOLD_UNIT, &resolution.threshold.unit);
        assumptions.insert(keys::THRESHOLD_SOURCE, resolution.threshold.source);
        if let Some(cohort) = &request.cohort {
            assumptions.insert(keys::COHORT, cohort);
        }
        assumptions.insert(keys::DECISION_BASIS, verdict.basis.as_str());
        assumptions.insert(keys::DOMINANCE_SCOPE, "simple");
        record_discounting(&mut assumptions, self.discounting.name(), &rates);

        let ceac_prob_accept = match &request.uncertainty {
            Some(spec) => {
                let outcome = self.analyzer.analyze(&comparator, &intervention, threshold, spec)?;
                tracing::debug!(
                    evaluation_id = %evaluation_id,
                    samples = outcome.samples,
                    accepted = outcome.accepted,
                    seed = outcome.seed,
                    "PSA complete"
                );
                assumptions.insert(keys::PSA_SAMPLES, outcome.samples);
                assumptions.insert(keys::PSA_SEED, outcome.seed);
                assumptions.insert(keys::PSA_CORRELATION, "independent");
                assumptions.insert(keys::PSA_TRUNCATION, "none");
                Some(outcome.prob_accept)
            }
            None => None,
        };

        let icer_unit = ratio.icer.map(|_| resolution.threshold.unit.to_string());

        Ok(EvaluationResult {
            evaluation_id,
            icer_value: ratio.icer,
            icer_unit,
            dominance,
            decision: verdict.decision,
            net_benefit: ratio.net_benefit,
            ceac_prob_accept,
            policy_version: resolution.policy_version,
            threshold_used: threshold,
            threshold_source: resolution.threshold.source,
            assumptions,
            evaluated_at: Timestamp::now(),
        })
    }
}

fn record_discounting(assumptions: &mut Assumptions, strategy: &str, rates: &DiscountRates) {
    assumptions.insert(keys::DISCOUNTING, strategy);
    assumptions.insert(keys::COST_DISCOUNT_RATE, rates.cost_rate);
    assumptions.insert(keys::EFFECT_DISCOUNT_RATE, rates.effect_rate);
}
