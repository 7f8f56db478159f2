//! Weighted composite risk scoring
//!
//! score = round(sum(rating * weight) * 10), clamped to [0, 100].
//! Unknown protocols get a fixed medium-high score instead of an error.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::{FactorContribution, RiskFactor, RiskFactorRating, RiskRatingTable, RiskScore, RiskWeights};
use crate::telemetry::{record_fallback, FallbackKind};

/// Score assigned to protocols missing from the rating table
pub const FALLBACK_RISK_SCORE: u8 = 65;

const MAX_SCORE: Decimal = dec!(100);

/// Maps protocol ratings to 0-100 risk scores
#[derive(Debug, Clone)]
pub struct RiskScorer {
    table: RiskRatingTable,
    weights: RiskWeights,
    warn_on_fallback: bool,
}

impl RiskScorer {
    /// Create a scorer over the given table and weights
    pub fn new(table: RiskRatingTable, weights: RiskWeights) -> Self {
        Self {
            table,
            weights,
            warn_on_fallback: false,
        }
    }

    /// Log unknown protocols at warn level instead of debug
    pub fn with_fallback_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_fallback = enabled;
        self
    }

    pub fn table(&self) -> &RiskRatingTable {
        &self.table
    }

    pub fn weights(&self) -> &RiskWeights {
        &self.weights
    }

    /// Score a protocol by name
    pub fn score_protocol(&self, protocol: &str) -> RiskScore {
        match self.table.get(protocol) {
            Some(rating) => self.score_rating(protocol, rating),
            None => {
                record_fallback(FallbackKind::RiskProtocol, protocol, self.warn_on_fallback);
                RiskScore {
                    protocol: protocol.to_string(),
                    score: FALLBACK_RISK_SCORE,
                    breakdown: None,
                    used_fallback: true,
                }
            }
        }
    }

    /// Score every protocol in the table, in name order
    pub fn score_all(&self) -> Vec<RiskScore> {
        self.table
            .iter()
            .map(|(name, rating)| self.score_rating(name, rating))
            .collect()
    }

    /// Score an explicit rating
    pub fn score_rating(&self, protocol: &str, rating: &RiskFactorRating) -> RiskScore {
        let weighted = self.weighted_score(rating);
        let score = (weighted * dec!(10))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .clamp(Decimal::ZERO, MAX_SCORE);

        let breakdown = RiskFactor::ALL
            .iter()
            .map(|&factor| FactorContribution {
                factor,
                score: rating.get(factor),
                weight: self.weights.get(factor),
                description: factor.description(),
            })
            .collect();

        RiskScore {
            protocol: protocol.to_string(),
            score: score.to_u8().expect("score clamped to 0..=100"),
            breakdown: Some(breakdown),
            used_fallback: false,
        }
    }

    /// Weighted 0-10 score before scaling
    pub fn weighted_score(&self, rating: &RiskFactorRating) -> Decimal {
        RiskFactor::ALL
            .iter()
            .map(|&factor| rating.get(factor) * self.weights.get(factor))
            .sum()
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(RiskRatingTable::builtin(), RiskWeights::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scorer_with(name: &str, rating: RiskFactorRating) -> RiskScorer {
        let table = RiskRatingTable::new([(name.to_string(), rating)]).unwrap();
        RiskScorer::new(table, RiskWeights::default())
    }

    #[test]
    fn test_aave_score() {
        let scorer = RiskScorer::default();
        let aave = scorer.table().get("Aave").unwrap();

        // 0.25 + 0.40 + 0.30 + 0.15 + 0.10 + 0.30 + 0.10 = 1.60
        assert_eq!(scorer.weighted_score(aave), dec!(1.60));

        let score = scorer.score_protocol("Aave");
        assert_eq!(score.score, 16);
        assert!(!score.used_fallback);
    }

    #[test]
    fn test_breakdown_has_all_factors() {
        let score = RiskScorer::default().score_protocol("Curve");
        let breakdown = score.breakdown.unwrap();

        assert_eq!(breakdown.len(), 7);
        assert_eq!(breakdown[0].factor, RiskFactor::ExploitHistory);
        assert_eq!(breakdown[0].score, dec!(3));
        assert_eq!(breakdown[0].weight, dec!(0.25));
        assert_eq!(
            breakdown[6].description,
            "Market liquidity and depth"
        );
    }

    #[test]
    fn test_unknown_protocol_fallback() {
        let score = RiskScorer::default().score_protocol("NotAProtocol");
        assert_eq!(score.score, FALLBACK_RISK_SCORE);
        assert_eq!(score.score, 65);
        assert!(score.breakdown.is_none());
        assert!(score.used_fallback);
    }

    #[test]
    fn test_all_zero_and_all_ten() {
        let zero = scorer_with("Zero", RiskFactorRating::uniform(dec!(0)).unwrap());
        assert_eq!(zero.score_protocol("Zero").score, 0);

        let ten = scorer_with("Ten", RiskFactorRating::uniform(dec!(10)).unwrap());
        assert_eq!(ten.score_protocol("Ten").score, 100);
    }

    #[test]
    fn test_midpoint_rounds_up() {
        // 0.05 * 1 = 0.05 -> 0.5 -> 1
        let rating = RiskFactorRating::uniform(dec!(0))
            .unwrap()
            .with(RiskFactor::LiquidityRisk, dec!(1))
            .unwrap();
        assert_eq!(scorer_with("Half", rating).score_protocol("Half").score, 1);
    }

    #[test]
    fn test_injected_table_hides_builtin() {
        let scorer = scorer_with("Custom", RiskFactorRating::uniform(dec!(5)).unwrap());
        assert_eq!(scorer.score_protocol("Custom").score, 50);
        assert!(scorer.score_protocol("Aave").used_fallback);
    }

    #[test]
    fn test_score_all() {
        let scores = RiskScorer::default().score_all();
        assert_eq!(scores.len(), 12);
        assert!(scores.iter().all(|s| !s.used_fallback && s.breakdown.is_some()));

        let venus = scores.iter().find(|s| s.protocol == "Venus").unwrap();
        // 1.25 + 1.4 + 1.05 + 0.75 + 0.3 + 0.7 + 0.3 = 5.75
        assert_eq!(venus.score, 58);
    }

    #[test]
    fn test_idempotent() {
        let scorer = RiskScorer::default();
        assert_eq!(scorer.score_protocol("Yearn"), scorer.score_protocol("Yearn"));
    }

    fn rating_strategy() -> impl Strategy<Value = [u32; 7]> {
        prop::array::uniform7(0u32..=10)
    }

    fn to_rating(values: [u32; 7]) -> RiskFactorRating {
        let d = |i: usize| Decimal::from(values[i]);
        RiskFactorRating::new(d(0), d(1), d(2), d(3), d(4), d(5), d(6)).unwrap()
    }

    proptest! {
        #[test]
        fn prop_score_within_bounds(values in rating_strategy()) {
            let scorer = scorer_with("P", to_rating(values));
            let score = scorer.score_protocol("P").score;
            prop_assert!(score <= 100);
        }

        #[test]
        fn prop_raising_a_factor_never_lowers_score(
            values in rating_strategy(),
            factor_idx in 0usize..7,
            bump in 0u32..=10,
        ) {
            let base = to_rating(values);
            let factor = RiskFactor::ALL[factor_idx];
            let raised_value = (base.get(factor) + Decimal::from(bump)).min(dec!(10));
            let raised = base.with(factor, raised_value).unwrap();

            let scorer = RiskScorer::default();
            let before = scorer.score_rating("P", &base).score;
            let after = scorer.score_rating("P", &raised).score;
            prop_assert!(after >= before);
        }
    }
}
