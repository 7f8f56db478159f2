//! Analytics metrics
//!
//! Recorded through the `metrics` facade; they are no-ops until the embedding
//! application installs a recorder.

use crate::quadrant::Quadrant;

/// Reference table that missed a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// Protocol missing from the risk rating table
    RiskProtocol,
    /// Chain missing from the fee schedule
    Chain,
    /// Protocol missing from the fee schedule
    FeeProtocol,
}

impl FallbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackKind::RiskProtocol => "risk_protocol",
            FallbackKind::Chain => "chain",
            FallbackKind::FeeProtocol => "fee_protocol",
        }
    }
}

/// Record a lookup that fell back to a default entry
pub fn record_fallback(kind: FallbackKind, key: &str, warn: bool) {
    if warn {
        tracing::warn!(kind = kind.as_str(), key, "Unknown key, using default");
    } else {
        tracing::debug!(kind = kind.as_str(), key, "Unknown key, using default");
    }

    ::metrics::counter!("yieldscope_fallback_total", "kind" => kind.as_str()).increment(1);
}

/// Record one quadrant assignment
pub fn record_quadrant(quadrant: Quadrant) {
    ::metrics::counter!("yieldscope_quadrant_assignments_total", "quadrant" => quadrant.as_str())
        .increment(1);
}

/// Record the size of an evaluated batch
pub fn record_batch(size: usize) {
    ::metrics::histogram!("yieldscope_batch_size").record(size as f64);
}
