//! Risk scoring module
//!
//! Protocol risk ratings, factor weights, and the composite 0-100 score

mod factors;
mod scorer;
mod table;
mod types;

pub use factors::{RiskFactor, RiskFactorRating, RiskWeights, MAX_RATING};
pub use scorer::{RiskScorer, FALLBACK_RISK_SCORE};
pub use table::RiskRatingTable;
pub use types::{FactorContribution, RiskError, RiskLevel, RiskScore};
