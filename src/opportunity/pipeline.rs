//! Score -> yield -> aggregate pipeline

use tracing::{debug, info};

use super::{OpportunityRecord, PositionParams, ProtocolMeta};
use crate::fees::{FeeError, YieldCalculationInput, YieldCalculationResult, YieldCalculator};
use crate::quadrant::{QuadrantClassifier, QuadrantReport};
use crate::risk::{RiskScore, RiskScorer};
use crate::telemetry::record_batch;

/// Merge a risk score and a yield result with protocol metadata
pub fn build_opportunity(
    meta: &ProtocolMeta,
    risk: &RiskScore,
    yield_result: &YieldCalculationResult,
) -> OpportunityRecord {
    OpportunityRecord {
        protocol: meta.protocol.clone(),
        chain: meta.chain.clone(),
        category: meta.category.clone(),
        token: meta.token.clone(),
        tvl: meta.tvl,
        gross_apy: yield_result.gross_apy,
        net_apy: yield_result.net_apy,
        fee_impact_percent: yield_result.fee_impact_percent,
        risk_score: risk.score,
    }
}

/// Turns protocol metadata into opportunity records
#[derive(Debug, Clone, Default)]
pub struct OpportunityPipeline {
    scorer: RiskScorer,
    calculator: YieldCalculator,
    position: PositionParams,
}

impl OpportunityPipeline {
    pub fn new(scorer: RiskScorer, calculator: YieldCalculator, position: PositionParams) -> Self {
        Self {
            scorer,
            calculator,
            position,
        }
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    pub fn calculator(&self) -> &YieldCalculator {
        &self.calculator
    }

    pub fn position(&self) -> PositionParams {
        self.position
    }

    /// Evaluate one protocol deployment
    pub fn evaluate(&self, meta: &ProtocolMeta) -> Result<OpportunityRecord, FeeError> {
        let risk = self.scorer.score_protocol(&meta.protocol);
        let yield_result = self.calculator.calculate_net_yield(&YieldCalculationInput {
            protocol: meta.protocol.clone(),
            chain: meta.chain.clone(),
            gross_apy: meta.gross_apy,
            investment_amount: self.position.investment_amount,
            holding_period_days: self.position.holding_period_days,
        })?;

        debug!(
            protocol = %meta.protocol,
            chain = %meta.chain,
            risk_score = risk.score,
            net_apy = %yield_result.net_apy,
            "Evaluated opportunity"
        );

        Ok(build_opportunity(meta, &risk, &yield_result))
    }

    /// Evaluate a batch, preserving input order
    pub fn evaluate_batch(&self, metas: &[ProtocolMeta]) -> Result<Vec<OpportunityRecord>, FeeError> {
        record_batch(metas.len());
        metas.iter().map(|meta| self.evaluate(meta)).collect()
    }

    /// Evaluate and classify a batch
    pub fn analyze(
        &self,
        metas: &[ProtocolMeta],
        classifier: &QuadrantClassifier,
    ) -> Result<QuadrantReport, FeeError> {
        let records = self.evaluate_batch(metas)?;
        let report = QuadrantReport::new(classifier.basis(), classifier.classify(&records));

        info!(
            opportunities = report.assignments.len(),
            sweet_spot = report.summary.sweet_spot,
            high_risk = report.summary.high_risk,
            safe_haven = report.summary.safe_haven,
            avoid = report.summary.avoid,
            "Classified opportunity batch"
        );

        Ok(report)
    }
}
