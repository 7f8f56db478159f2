//! Batch-relative risk/reward classification
//!
//! Yield and risk are normalized against the batch maxima, then split at the
//! threshold. A yield exactly at the threshold counts as high yield; a risk
//! exactly at the threshold counts as low risk.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{Quadrant, QuadrantAssignment, YieldBasis};
use crate::opportunity::OpportunityRecord;
use crate::telemetry::record_quadrant;

/// Buckets opportunity batches into risk/reward quadrants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantClassifier {
    basis: YieldBasis,
    threshold: Decimal,
}

impl QuadrantClassifier {
    pub fn new(basis: YieldBasis, threshold: Decimal) -> Self {
        Self { basis, threshold }
    }

    pub fn basis(&self) -> YieldBasis {
        self.basis
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// Classify a batch, preserving input order
    ///
    /// A zero maximum is replaced by 1 so an all-zero axis normalizes to 0.
    pub fn classify(&self, records: &[OpportunityRecord]) -> Vec<QuadrantAssignment> {
        let max_yield = floor_max(records.iter().map(|r| self.basis.yield_of(r)));
        let max_risk = floor_max(records.iter().map(|r| Decimal::from(r.risk_score)));

        records
            .iter()
            .map(|record| {
                let normalized_yield = self.basis.yield_of(record) / max_yield;
                let normalized_risk = Decimal::from(record.risk_score) / max_risk;
                let quadrant = self.quadrant_for(normalized_risk, normalized_yield);
                record_quadrant(quadrant);

                QuadrantAssignment {
                    opportunity: record.clone(),
                    normalized_yield,
                    normalized_risk,
                    quadrant,
                }
            })
            .collect()
    }

    /// Quadrant for already-normalized coordinates
    pub fn quadrant_for(&self, normalized_risk: Decimal, normalized_yield: Decimal) -> Quadrant {
        let low_risk = normalized_risk <= self.threshold;
        let high_yield = normalized_yield >= self.threshold;

        match (low_risk, high_yield) {
            (true, true) => Quadrant::SweetSpot,
            (false, true) => Quadrant::HighRisk,
            (true, false) => Quadrant::SafeHaven,
            (false, false) => Quadrant::Avoid,
        }
    }
}

impl Default for QuadrantClassifier {
    fn default() -> Self {
        Self::new(YieldBasis::Net, dec!(0.5))
    }
}

fn floor_max(values: impl Iterator<Item = Decimal>) -> Decimal {
    let max = values.max().unwrap_or(Decimal::ZERO);
    if max <= Decimal::ZERO {
        Decimal::ONE
    } else {
        max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(protocol: &str, net_apy: Decimal, gross_apy: Decimal, risk: u8) -> OpportunityRecord {
        OpportunityRecord {
            protocol: protocol.to_string(),
            chain: "Ethereum".to_string(),
            category: "DEX".to_string(),
            token: "ETH".to_string(),
            tvl: dec!(100000000),
            gross_apy,
            net_apy,
            fee_impact_percent: dec!(0),
            risk_score: risk,
        }
    }

    #[test]
    fn test_quadrant_table() {
        let c = QuadrantClassifier::default();
        assert_eq!(c.quadrant_for(dec!(0.2), dec!(0.9)), Quadrant::SweetSpot);
        assert_eq!(c.quadrant_for(dec!(0.8), dec!(0.9)), Quadrant::HighRisk);
        assert_eq!(c.quadrant_for(dec!(0.2), dec!(0.1)), Quadrant::SafeHaven);
        assert_eq!(c.quadrant_for(dec!(0.8), dec!(0.1)), Quadrant::Avoid);
    }

    #[test]
    fn test_boundary_ties() {
        let c = QuadrantClassifier::default();
        // risk 0.5 is low risk, yield 0.5 is high yield
        assert_eq!(c.quadrant_for(dec!(0.5), dec!(0.5)), Quadrant::SweetSpot);
        assert_eq!(c.quadrant_for(dec!(0.5), dec!(0.4999)), Quadrant::SafeHaven);
        assert_eq!(c.quadrant_for(dec!(0.5001), dec!(0.5)), Quadrant::HighRisk);
    }

    #[test]
    fn test_empty_batch() {
        assert!(QuadrantClassifier::default().classify(&[]).is_empty());
    }

    #[test]
    fn test_single_record_normalizes_to_one() {
        let out = QuadrantClassifier::default().classify(&[record("A", dec!(7), dec!(9), 40)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].normalized_yield, dec!(1));
        assert_eq!(out[0].normalized_risk, dec!(1));
        assert_eq!(out[0].quadrant, Quadrant::HighRisk);
    }

    #[test]
    fn test_single_record_zero_yield() {
        let out = QuadrantClassifier::default().classify(&[record("A", dec!(0), dec!(3), 40)]);
        assert_eq!(out[0].normalized_yield, dec!(0));
        assert_eq!(out[0].quadrant, Quadrant::Avoid);
    }

    #[test]
    fn test_zero_maxima_floor_to_one() {
        let records = vec![record("A", dec!(0), dec!(0), 0), record("B", dec!(0), dec!(0), 0)];
        let out = QuadrantClassifier::default().classify(&records);
        for a in &out {
            assert_eq!(a.normalized_yield, dec!(0));
            assert_eq!(a.normalized_risk, dec!(0));
            assert_eq!(a.quadrant, Quadrant::SafeHaven);
        }
    }

    #[test]
    fn test_batch_classification_preserves_order() {
        let records = vec![
            record("high-risk", dec!(20), dec!(22), 80),
            record("sweet", dec!(18), dec!(20), 20),
            record("avoid", dec!(2), dec!(3), 70),
            record("safe", dec!(4), dec!(5), 10),
        ];
        let out = QuadrantClassifier::default().classify(&records);

        let quadrants: Vec<_> = out.iter().map(|a| a.quadrant).collect();
        assert_eq!(
            quadrants,
            vec![
                Quadrant::HighRisk,
                Quadrant::SweetSpot,
                Quadrant::Avoid,
                Quadrant::SafeHaven
            ]
        );
        assert_eq!(out[1].opportunity.protocol, "sweet");
        assert_eq!(out[1].normalized_yield, dec!(0.9));
        assert_eq!(out[1].normalized_risk, dec!(0.25));
    }

    #[test]
    fn test_gross_basis() {
        let records = vec![
            record("A", dec!(1), dec!(20), 10),
            record("B", dec!(10), dec!(10), 40),
        ];

        let net = QuadrantClassifier::new(YieldBasis::Net, dec!(0.5)).classify(&records);
        assert_eq!(net[0].quadrant, Quadrant::SafeHaven);

        let gross = QuadrantClassifier::new(YieldBasis::Gross, dec!(0.5)).classify(&records);
        assert_eq!(gross[0].quadrant, Quadrant::SweetSpot);
        assert_eq!(gross[1].normalized_yield, dec!(0.5));
    }

    #[test]
    fn test_idempotent() {
        let records = vec![record("A", dec!(5), dec!(6), 30), record("B", dec!(9), dec!(10), 60)];
        let c = QuadrantClassifier::default();
        assert_eq!(c.classify(&records), c.classify(&records));
    }
}
