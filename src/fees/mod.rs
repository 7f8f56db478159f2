//! Fee-adjusted yield module
//!
//! Chain and protocol fee tables, and the net yield calculation built on them

mod calculator;
mod profiles;
mod types;

pub use calculator::YieldCalculator;
pub use profiles::{ChainFeeProfile, FeeSchedule, ProtocolFeeProfile};
pub use types::{FeeBreakdown, FeeError, YieldCalculationInput, YieldCalculationResult};
