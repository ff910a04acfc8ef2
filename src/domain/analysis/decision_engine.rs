//! Decision Engine - turns dominance and ratio signals into a verdict.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Dominance, Increment};

/// Final verdict on the intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject,
    Inconclusive,
}

impl Decision {
    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Accept => "accept",
            Decision::Reject => "reject",
            Decision::Inconclusive => "inconclusive",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    Dominance,
    NoDifference,
    IcerThreshold,
    NetBenefit,
}

impl DecisionBasis {
    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionBasis::Dominance => "dominance",
            DecisionBasis::NoDifference => "no_difference",
            DecisionBasis::IcerThreshold => "icer_threshold",
            DecisionBasis::NetBenefit => "net_benefit",
        }
    }
}

/// A decision together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub decision: Decision,
    pub basis: DecisionBasis,
}

impl Verdict {
    fn new(decision: Decision, basis: DecisionBasis) -> Self {
        Self { decision, basis }
    }
}

/// Outcome of comparing the ratio rule with the net-benefit rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleAgreement {
    pub icer_accepts: bool,
    pub net_benefit_accepts: bool,
}

impl RuleAgreement {
    /// True when both rules land on the same side of the acceptance boundary.
    pub fn agrees(&self) -> bool {
        self.icer_accepts == self.net_benefit_accepts
    }
}

/// Pure decision rules.
pub struct DecisionEngine;

impl DecisionEngine {
    /// Decides on the intervention.
    pub fn decide(
        dominance: Dominance,
        icer: Option<f64>,
        net_benefit: f64,
        threshold: f64,
        increment: &Increment,
    ) -> Decision {
        Self::verdict(dominance, icer, net_benefit, threshold, increment).decision
    }

    /// Decides and reports which rule was used.
    ///
    /// # Precedence
    /// 1. Simple dominance settles the verdict outright
    /// 2. Identical arms are inconclusive
    /// 3. ΔE = 0 with ΔC ≠ 0: net-benefit sign (the ratio is undefined)
    /// 4. ΔE > 0: ICER <= threshold accepts
    /// 5. ΔE < 0: net-benefit sign (ICER vs threshold points the wrong way here)
    pub fn verdict(
        dominance: Dominance,
        icer: Option<f64>,
        net_benefit: f64,
        threshold: f64,
        increment: &Increment,
    ) -> Verdict {
        match dominance {
            Dominance::SimpleDominant => return Verdict::new(Decision::Accept, DecisionBasis::Dominance),
            Dominance::SimpleDominated => return Verdict::new(Decision::Reject, DecisionBasis::Dominance),
            Dominance::None => {}
        }

        if increment.is_null() {
            return Verdict::new(Decision::Inconclusive, DecisionBasis::NoDifference);
        }

        match icer {
            Some(ratio) if increment.delta_effect > 0.0 => {
                Verdict::new(Self::by_icer(ratio, threshold), DecisionBasis::IcerThreshold)
            }
            _ => Verdict::new(Self::by_net_benefit(net_benefit), DecisionBasis::NetBenefit),
        }
    }

    /// Net-benefit sign rule.
    pub fn by_net_benefit(net_benefit: f64) -> Decision {
        if net_benefit > 0.0 {
            Decision::Accept
        } else if net_benefit < 0.0 {
            Decision::Reject
        } else {
            Decision::Inconclusive
        }
    }

    /// ICER-versus-threshold rule. Only meaningful when ΔE > 0.
    pub fn by_icer(icer: f64, threshold: f64) -> Decision {
        if icer <= threshold {
            Decision::Accept
        } else {
            Decision::Reject
        }
    }

    /// Compares the ratio rule with the net-benefit rule.
    ///
    /// Returns `None` when the ratio is undefined (ΔE = 0). For ΔE < 0 the
    /// ratio is read as savings per unit of effect forgone, so it accepts when
    /// it is at least the threshold.
    pub fn cross_check(increment: &Increment, threshold: f64) -> Option<RuleAgreement> {
        let de = increment.delta_effect;
        if de == 0.0 {
            return None;
        }

        let icer = increment.delta_cost / de;
        let icer_accepts = if de > 0.0 {
            icer <= threshold
        } else {
            icer >= threshold
        };

        Some(RuleAgreement {
            icer_accepts,
            net_benefit_accepts: increment.net_benefit(threshold) >= 0.0,
        })
    }
}
