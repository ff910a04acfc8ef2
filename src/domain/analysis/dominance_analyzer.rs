//! Dominance Analyzer - simple dominance between a comparator and an intervention.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Arm, Increment};

/// Cost/effect relationship of the intervention relative to the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dominance {
    /// The arms trade cost against effect; a ratio is needed to decide.
    None,
    /// Intervention is no more costly and at least as effective, strictly on one axis.
    SimpleDominant,
    /// Intervention is no less costly and at most as effective, strictly on one axis.
    SimpleDominated,
}

impl Dominance {
    /// Returns true when dominance alone settles the decision.
    pub fn is_decisive(&self) -> bool {
        !matches!(self, Dominance::None)
    }

    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dominance::None => "none",
            Dominance::SimpleDominant => "simple_dominant",
            Dominance::SimpleDominated => "simple_dominated",
        }
    }
}

impl fmt::Display for Dominance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simple-dominance classification.
pub struct DominanceAnalyzer;

impl DominanceAnalyzer {
    /// Classifies the intervention against the comparator.
    pub fn classify(comparator: &Arm, intervention: &Arm) -> Dominance {
        Self::classify_increment(&Increment::between(comparator, intervention))
    }

    /// Classifies a precomputed increment.
    ///
    /// # Algorithm
    /// - Dominant: ΔC <= 0 and ΔE >= 0, with ΔC < 0 or ΔE > 0
    /// - Dominated: ΔC >= 0 and ΔE <= 0, with ΔC > 0 or ΔE < 0
    ///
    /// # Edge Cases
    /// - ΔC = ΔE = 0: `None` (identical arms carry no economic signal)
    /// - Comparisons are exact; no tolerance band is applied
    pub fn classify_increment(increment: &Increment) -> Dominance {
        let dc = increment.delta_cost;
        let de = increment.delta_effect;

        if dc <= 0.0 && de >= 0.0 && (dc < 0.0 || de > 0.0) {
            Dominance::SimpleDominant
        } else if dc >= 0.0 && de <= 0.0 && (dc > 0.0 || de < 0.0) {
            Dominance::SimpleDominated
        } else {
            Dominance::None
        }
    }

    /// Generates a human-readable explanation of the classification.
    pub fn explain(increment: &Increment) -> String {
        match Self::classify_increment(increment) {
            Dominance::SimpleDominant => format!(
                "intervention is no more costly (ΔC = {}) and at least as effective (ΔE = {})",
                increment.delta_cost, increment.delta_effect
            ),
            Dominance::SimpleDominated => format!(
                "intervention is no less costly (ΔC = {}) and at most as effective (ΔE = {})",
                increment.delta_cost, increment.delta_effect
            ),
            Dominance::None if increment.is_null() => {
                "arms are identical in cost and effect".to_string()
            }
            Dominance::None => format!(
                "arms trade cost (ΔC = {}) against effect (ΔE = {})",
                increment.delta_cost, increment.delta_effect
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify(dc: f64, de: f64) -> Dominance {
        DominanceAnalyzer::classify_increment(&Increment::from_deltas(dc, de))
    }

    #[test]
    fn cheaper_and_better_is_dominant() {
        let comparator = Arm::new(10000.0, 0.8);
        let intervention = Arm::new(9000.0, 0.9);
        assert_eq!(
            DominanceAnalyzer::classify(&comparator, &intervention),
            Dominance::SimpleDominant
        );
    }

    #[test]
    fn costlier_and_worse_is_dominated() {
        let comparator = Arm::new(10000.0, 1.0);
        let intervention = Arm::new(12000.0, 0.9);
        assert_eq!(
            DominanceAnalyzer::classify(&comparator, &intervention),
            Dominance::SimpleDominated
        );
    }

    #[test]
    fn weak_dominance_on_a_single_axis() {
        assert_eq!(classify(0.0, 0.1), Dominance::SimpleDominant);
        assert_eq!(classify(-50.0, 0.0), Dominance::SimpleDominant);
        assert_eq!(classify(0.0, -0.1), Dominance::SimpleDominated);
        assert_eq!(classify(2000.0, 0.0), Dominance::SimpleDominated);
    }

    #[test]
    fn identical_arms_are_not_dominance() {
        assert_eq!(classify(0.0, 0.0), Dominance::None);
    }

    #[test]
    fn tradeoffs_are_not_dominance() {
        assert_eq!(classify(2000.0, 0.3), Dominance::None);
        assert_eq!(classify(-2000.0, -0.3), Dominance::None);
    }

    #[test]
    fn tiny_differences_are_not_rounded_away() {
        assert_eq!(classify(1e-13, 0.0), Dominance::SimpleDominated);
        assert_eq!(classify(0.0, 1e-13), Dominance::SimpleDominant);
    }

    #[test]
    fn explanation_mentions_identity() {
        let text = DominanceAnalyzer::explain(&Increment::from_deltas(0.0, 0.0));
        assert!(text.contains("identical"));
    }

    #[test]
    fn dominance_serializes_snake_case() {
        let json = serde_json::to_string(&Dominance::SimpleDominated).unwrap();
        assert_eq!(json, "\"simple_dominated\"");
    }

    proptest! {
        #[test]
        fn non_positive_cost_non_negative_effect_is_dominant(
            dc in -1.0e6f64..=0.0,
            de in 0.0f64..=10.0,
        ) {
            prop_assume!(!(dc == 0.0 && de == 0.0));
            prop_assert_eq!(classify(dc, de), Dominance::SimpleDominant);
        }

        #[test]
        fn non_negative_cost_non_positive_effect_is_dominated(
            dc in 0.0f64..=1.0e6,
            de in -10.0f64..=0.0,
        ) {
            prop_assume!(!(dc == 0.0 && de == 0.0));
            prop_assert_eq!(classify(dc, de), Dominance::SimpleDominated);
        }

        #[test]
        fn strict_tradeoffs_are_never_dominance(
            dc in 1.0f64..1.0e6,
            de in 0.001f64..10.0,
            flip in any::<bool>(),
        ) {
            let (dc, de) = if flip { (-dc, -de) } else { (dc, de) };
            prop_assert_eq!(classify(dc, de), Dominance::None);
        }
    }
}
