//! Risk factors, per-protocol ratings and factor weights

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::RiskError;

/// Highest value a single factor rating may take
pub const MAX_RATING: Decimal = dec!(10);

/// Allowed distance of the weight sum from 1
const WEIGHT_SUM_TOLERANCE: Decimal = dec!(0.000000001);

/// The seven rated risk dimensions of a protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    ExploitHistory,
    OracleDependency,
    TvlConcentration,
    CodeAudit,
    TimeInMarket,
    GovernanceRisk,
    LiquidityRisk,
}

impl RiskFactor {
    /// All factors, in breakdown order
    pub const ALL: [RiskFactor; 7] = [
        RiskFactor::ExploitHistory,
        RiskFactor::OracleDependency,
        RiskFactor::TvlConcentration,
        RiskFactor::CodeAudit,
        RiskFactor::TimeInMarket,
        RiskFactor::GovernanceRisk,
        RiskFactor::LiquidityRisk,
    ];

    /// Short machine name
    pub fn name(&self) -> &'static str {
        match self {
            RiskFactor::ExploitHistory => "exploit_history",
            RiskFactor::OracleDependency => "oracle_dependency",
            RiskFactor::TvlConcentration => "tvl_concentration",
            RiskFactor::CodeAudit => "code_audit",
            RiskFactor::TimeInMarket => "time_in_market",
            RiskFactor::GovernanceRisk => "governance_risk",
            RiskFactor::LiquidityRisk => "liquidity_risk",
        }
    }

    /// Human-readable description used by narrative generation
    pub fn description(&self) -> &'static str {
        match self {
            RiskFactor::ExploitHistory => "Historical security incidents and exploits",
            RiskFactor::OracleDependency => "Reliance on external price oracles",
            RiskFactor::TvlConcentration => "Concentration of total value locked",
            RiskFactor::CodeAudit => "Code audit quality and coverage",
            RiskFactor::TimeInMarket => "Protocol maturity and track record",
            RiskFactor::GovernanceRisk => "Decentralization and governance structure",
            RiskFactor::LiquidityRisk => "Market liquidity and depth",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw 0-10 ratings for one protocol (0 = safest, 10 = riskiest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactorRating {
    pub exploit_history: Decimal,
    pub oracle_dependency: Decimal,
    pub tvl_concentration: Decimal,
    pub code_audit: Decimal,
    pub time_in_market: Decimal,
    pub governance_risk: Decimal,
    pub liquidity_risk: Decimal,
}

impl RiskFactorRating {
    /// Create a rating, checking every factor is within [0, 10]
    pub fn new(
        exploit_history: Decimal,
        oracle_dependency: Decimal,
        tvl_concentration: Decimal,
        code_audit: Decimal,
        time_in_market: Decimal,
        governance_risk: Decimal,
        liquidity_risk: Decimal,
    ) -> Result<Self, RiskError> {
        let rating = Self {
            exploit_history,
            oracle_dependency,
            tvl_concentration,
            code_audit,
            time_in_market,
            governance_risk,
            liquidity_risk,
        };
        rating.validate()?;
        Ok(rating)
    }

    /// Every factor set to the same value
    pub fn uniform(value: Decimal) -> Result<Self, RiskError> {
        Self::new(value, value, value, value, value, value, value)
    }

    /// Rating for a single factor
    pub fn get(&self, factor: RiskFactor) -> Decimal {
        match factor {
            RiskFactor::ExploitHistory => self.exploit_history,
            RiskFactor::OracleDependency => self.oracle_dependency,
            RiskFactor::TvlConcentration => self.tvl_concentration,
            RiskFactor::CodeAudit => self.code_audit,
            RiskFactor::TimeInMarket => self.time_in_market,
            RiskFactor::GovernanceRisk => self.governance_risk,
            RiskFactor::LiquidityRisk => self.liquidity_risk,
        }
    }

    /// Copy with one factor replaced
    pub fn with(mut self, factor: RiskFactor, value: Decimal) -> Result<Self, RiskError> {
        let slot = match factor {
            RiskFactor::ExploitHistory => &mut self.exploit_history,
            RiskFactor::OracleDependency => &mut self.oracle_dependency,
            RiskFactor::TvlConcentration => &mut self.tvl_concentration,
            RiskFactor::CodeAudit => &mut self.code_audit,
            RiskFactor::TimeInMarket => &mut self.time_in_market,
            RiskFactor::GovernanceRisk => &mut self.governance_risk,
            RiskFactor::LiquidityRisk => &mut self.liquidity_risk,
        };
        *slot = value;
        self.validate()?;
        Ok(self)
    }

    /// Check every factor is within [0, 10]
    pub fn validate(&self) -> Result<(), RiskError> {
        for factor in RiskFactor::ALL {
            let value = self.get(factor);
            if value < Decimal::ZERO || value > MAX_RATING {
                return Err(RiskError::InvalidRating { factor, value });
            }
        }
        Ok(())
    }
}

/// Weight of each factor in the composite score
///
/// Weights lie in (0, 1] and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWeights")]
pub struct RiskWeights {
    exploit_history: Decimal,
    oracle_dependency: Decimal,
    tvl_concentration: Decimal,
    code_audit: Decimal,
    time_in_market: Decimal,
    governance_risk: Decimal,
    liquidity_risk: Decimal,
}

#[derive(Deserialize)]
struct RawWeights {
    exploit_history: Decimal,
    oracle_dependency: Decimal,
    tvl_concentration: Decimal,
    code_audit: Decimal,
    time_in_market: Decimal,
    governance_risk: Decimal,
    liquidity_risk: Decimal,
}

impl TryFrom<RawWeights> for RiskWeights {
    type Error = RiskError;

    fn try_from(raw: RawWeights) -> Result<Self, Self::Error> {
        Self::new(
            raw.exploit_history,
            raw.oracle_dependency,
            raw.tvl_concentration,
            raw.code_audit,
            raw.time_in_market,
            raw.governance_risk,
            raw.liquidity_risk,
        )
    }
}

impl RiskWeights {
    /// Create a weight set, rejecting out-of-range weights or a sum other than 1
    pub fn new(
        exploit_history: Decimal,
        oracle_dependency: Decimal,
        tvl_concentration: Decimal,
        code_audit: Decimal,
        time_in_market: Decimal,
        governance_risk: Decimal,
        liquidity_risk: Decimal,
    ) -> Result<Self, RiskError> {
        let weights = Self {
            exploit_history,
            oracle_dependency,
            tvl_concentration,
            code_audit,
            time_in_market,
            governance_risk,
            liquidity_risk,
        };

        for factor in RiskFactor::ALL {
            let weight = weights.get(factor);
            if weight <= Decimal::ZERO || weight > Decimal::ONE {
                return Err(RiskError::InvalidWeight { factor, weight });
            }
        }

        let sum = weights.sum();
        if (sum - Decimal::ONE).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RiskError::WeightSum(sum));
        }

        Ok(weights)
    }

    /// Weight for a single factor
    pub fn get(&self, factor: RiskFactor) -> Decimal {
        match factor {
            RiskFactor::ExploitHistory => self.exploit_history,
            RiskFactor::OracleDependency => self.oracle_dependency,
            RiskFactor::TvlConcentration => self.tvl_concentration,
            RiskFactor::CodeAudit => self.code_audit,
            RiskFactor::TimeInMarket => self.time_in_market,
            RiskFactor::GovernanceRisk => self.governance_risk,
            RiskFactor::LiquidityRisk => self.liquidity_risk,
        }
    }

    /// Sum of all seven weights
    pub fn sum(&self) -> Decimal {
        RiskFactor::ALL.iter().map(|f| self.get(*f)).sum()
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            exploit_history: dec!(0.25),
            oracle_dependency: dec!(0.20),
            tvl_concentration: dec!(0.15),
            code_audit: dec!(0.15),
            time_in_market: dec!(0.10),
            governance_risk: dec!(0.10),
            liquidity_risk: dec!(0.05),
        }
    }
}
