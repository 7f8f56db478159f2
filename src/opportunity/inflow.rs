//! Capital inflow likelihood heuristic

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const BASE_PROBABILITY: Decimal = dec!(0.5);
const INFLOW_SCALE_USD: Decimal = dec!(10000000);
const APY_DELTA_SCALE: Decimal = dec!(10);
const UNLOCK_PENALTY: Decimal = dec!(0.25);

/// Observed drivers of near-term capital flows into a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflowSignal {
    /// Recent net inflow, USD (negative for outflow)
    pub inflow: Decimal,
    /// Recent APY change, percentage points
    pub apy_delta: Decimal,
    /// A major token unlock is scheduled
    pub unlock_flag: bool,
}

/// Likelihood of continued inflow, with the direction of each driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InflowPrediction {
    /// In [0, 1]
    pub probability: Decimal,
    pub inflow_positive: bool,
    pub apy_delta_positive: bool,
    pub unlock_flag: bool,
}

/// Score an inflow signal
///
/// Starts at 0.5 and adds:
/// - inflow / $10M, capped to [-0.2, +0.3]
/// - APY delta / 10, capped to [-0.15, +0.2]
/// - -0.25 when a major unlock is pending
///
/// The sum is clamped to [0, 1].
pub fn predict_inflow(signal: &InflowSignal) -> InflowPrediction {
    let inflow_term = (signal.inflow / INFLOW_SCALE_USD).clamp(dec!(-0.2), dec!(0.3));
    let apy_term = (signal.apy_delta / APY_DELTA_SCALE).clamp(dec!(-0.15), dec!(0.2));
    let unlock_term = if signal.unlock_flag {
        -UNLOCK_PENALTY
    } else {
        Decimal::ZERO
    };

    let probability =
        (BASE_PROBABILITY + inflow_term + apy_term + unlock_term).clamp(Decimal::ZERO, Decimal::ONE);

    InflowPrediction {
        probability,
        inflow_positive: signal.inflow > Decimal::ZERO,
        apy_delta_positive: signal.apy_delta > Decimal::ZERO,
        unlock_flag: signal.unlock_flag,
    }
}
