//! Risk/reward quadrant module
//!
//! Normalizes a batch of opportunities and buckets each into one of four quadrants

mod classifier;
mod report;

pub use classifier::QuadrantClassifier;
pub use report::{format_tvl, round_display, QuadrantReport, QuadrantSummary};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::opportunity::OpportunityRecord;

/// Risk/reward bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    /// High yield, low risk
    SweetSpot,
    /// High yield, high risk
    HighRisk,
    /// Low yield, low risk
    SafeHaven,
    /// Low yield, high risk
    Avoid,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::SweetSpot,
        Quadrant::HighRisk,
        Quadrant::SafeHaven,
        Quadrant::Avoid,
    ];

    /// Wire name, e.g. `sweet-spot`
    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::SweetSpot => "sweet-spot",
            Quadrant::HighRisk => "high-risk",
            Quadrant::SafeHaven => "safe-haven",
            Quadrant::Avoid => "avoid",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Quadrant::SweetSpot => "Sweet Spot",
            Quadrant::HighRisk => "High Risk",
            Quadrant::SafeHaven => "Safe Haven",
            Quadrant::Avoid => "Avoid",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Quadrant::SweetSpot => "High rewards with manageable risk",
            Quadrant::HighRisk => "Maximum rewards but significant risk",
            Quadrant::SafeHaven => "Lower returns but very stable",
            Quadrant::Avoid => "High risk with low rewards",
        }
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which APY drives the yield axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum YieldBasis {
    /// APY after fees
    #[default]
    Net,
    /// APY before fees
    Gross,
}

impl YieldBasis {
    pub fn yield_of(&self, record: &OpportunityRecord) -> Decimal {
        match self {
            YieldBasis::Net => record.net_apy,
            YieldBasis::Gross => record.gross_apy,
        }
    }
}

/// Classification of one opportunity within its batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantAssignment {
    pub opportunity: OpportunityRecord,
    /// Yield relative to the batch maximum, in [0, 1]
    pub normalized_yield: Decimal,
    /// Risk relative to the batch maximum, in [0, 1]
    pub normalized_risk: Decimal,
    pub quadrant: Quadrant,
}
