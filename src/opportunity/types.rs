//! Opportunity types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::risk::RiskLevel;

/// Market data for one protocol deployment, supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolMeta {
    pub protocol: String,
    pub chain: String,
    /// e.g. Lending, DEX, Yield Farming, Staking
    pub category: String,
    pub token: String,
    /// Total value locked, USD
    pub tvl: Decimal,
    /// Gross APY in percent
    pub gross_apy: Decimal,
}

/// Hypothetical position used to price fees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionParams {
    /// USD
    pub investment_amount: Decimal,
    pub holding_period_days: u32,
}

impl Default for PositionParams {
    fn default() -> Self {
        Self {
            investment_amount: dec!(10000),
            holding_period_days: 365,
        }
    }
}

/// Scored, fee-adjusted opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    pub protocol: String,
    pub chain: String,
    pub category: String,
    pub token: String,
    pub tvl: Decimal,
    pub gross_apy: Decimal,
    pub net_apy: Decimal,
    pub fee_impact_percent: Decimal,
    pub risk_score: u8,
}

impl OpportunityRecord {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}
