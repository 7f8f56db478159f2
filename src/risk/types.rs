//! Risk scoring types

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::RiskFactor;

/// Risk reference data errors
#[derive(Debug, Error)]
pub enum RiskError {
    /// A factor rating lies outside [0, 10]
    #[error("Rating for {factor} out of range: {value}")]
    InvalidRating { factor: RiskFactor, value: Decimal },
    /// A factor weight lies outside (0, 1]
    #[error("Weight for {factor} out of range: {weight}")]
    InvalidWeight { factor: RiskFactor, weight: Decimal },
    /// Weights do not sum to 1
    #[error("Risk weights sum to {0}, expected 1")]
    WeightSum(Decimal),
}

/// Coarse risk band shown alongside the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Band a 0-100 score: up to 30 is low, up to 60 medium, above that high
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => RiskLevel::Low,
            31..=60 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

/// One factor's contribution to a composite score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub factor: RiskFactor,
    /// Raw 0-10 rating
    pub score: Decimal,
    pub weight: Decimal,
    pub description: &'static str,
}

/// Composite 0-100 risk score for a protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskScore {
    pub protocol: String,
    pub score: u8,
    /// Per-factor detail; absent when the protocol was not rated
    pub breakdown: Option<Vec<FactorContribution>>,
    /// True when the protocol was unknown and the fallback score was used
    pub used_fallback: bool,
}

impl RiskScore {
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score)
    }

    /// Score as a decimal, for normalization
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.score)
    }
}
