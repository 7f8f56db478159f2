//! Opportunity aggregation module
//!
//! Combines risk scores and fee-adjusted yields with protocol metadata,
//! and estimates near-term capital inflow

mod inflow;
mod pipeline;
mod types;

pub use inflow::{predict_inflow, InflowPrediction, InflowSignal};
pub use pipeline::{build_opportunity, OpportunityPipeline};
pub use types::{OpportunityRecord, PositionParams, ProtocolMeta};
