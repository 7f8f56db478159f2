//! Fee calculation types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fee calculation errors
#[derive(Debug, Error)]
pub enum FeeError {
    /// Caller supplied an unusable input value
    #[error("Invalid argument {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
    /// A fee profile contains a negative amount or a rate outside [0, 1]
    #[error("Invalid fee profile for {name}: {reason}")]
    InvalidProfile { name: String, reason: String },
    /// The designated default chain or protocol is missing from the schedule
    #[error("Default {kind} profile {name:?} not present in fee schedule")]
    MissingDefault { kind: &'static str, name: String },
    /// Inputs too large to price in decimal arithmetic
    #[error("Arithmetic overflow computing {stage}")]
    Overflow { stage: &'static str },
}

/// Inputs to a fee-adjusted yield calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldCalculationInput {
    pub protocol: String,
    pub chain: String,
    /// Gross APY in percent (10 = 10%)
    pub gross_apy: Decimal,
    /// Amount invested in USD
    pub investment_amount: Decimal,
    pub holding_period_days: u32,
}

/// Fee totals by category, in USD
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub gas_fees: Decimal,
    pub bridge_fees: Decimal,
    pub slippage_fees: Decimal,
    pub protocol_fees: Decimal,
    pub performance_fee: Decimal,
    pub management_fee: Decimal,
    pub total_fees: Decimal,
}

/// Outcome of a fee-adjusted yield calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldCalculationResult {
    /// Gross APY in percent
    pub gross_apy: Decimal,
    /// APY after all fees, in percent, never negative
    pub net_apy: Decimal,
    /// Yield before fees over the holding period, USD
    pub gross_yield: Decimal,
    /// Yield after fees over the holding period, USD, never negative
    pub net_yield: Decimal,
    pub fee_breakdown: FeeBreakdown,
    /// Share of gross APY consumed by fees, in percent
    pub fee_impact_percent: Decimal,
    /// Chain was unknown and the default chain profile was used
    pub chain_fallback: bool,
    /// Protocol was unknown and the default protocol profile was used
    pub protocol_fallback: bool,
}
