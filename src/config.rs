//! Configuration types for yieldscope

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

use crate::fees::{FeeSchedule, YieldCalculator};
use crate::opportunity::{OpportunityPipeline, PositionParams};
use crate::quadrant::{QuadrantClassifier, YieldBasis};
use crate::risk::{RiskRatingTable, RiskScorer, RiskWeights};
use crate::telemetry::LogFormat;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analytics: AnalyticsConfig,
    pub reference: ReferenceConfig,
    pub telemetry: TelemetryConfig,
}

/// Scoring and classification settings
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Position size used to price fees, USD
    #[serde(default = "default_investment_usd")]
    pub default_investment_usd: Decimal,

    /// Holding period used to price fees
    #[serde(default = "default_holding_period_days")]
    pub default_holding_period_days: u32,

    /// APY driving the quadrant yield axis
    #[serde(default)]
    pub yield_basis: YieldBasis,

    /// Normalized split point for both quadrant axes
    #[serde(default = "default_quadrant_threshold")]
    pub quadrant_threshold: Decimal,

    /// Log unknown protocols/chains at warn level
    #[serde(default)]
    pub warn_on_fallback: bool,
}

fn default_investment_usd() -> Decimal {
    dec!(10000)
}
fn default_holding_period_days() -> u32 {
    365
}
fn default_quadrant_threshold() -> Decimal {
    dec!(0.5)
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_investment_usd: dec!(10000),
            default_holding_period_days: 365,
            yield_basis: YieldBasis::Net,
            quadrant_threshold: dec!(0.5),
            warn_on_fallback: false,
        }
    }
}

/// Reference data overrides; built-in tables are used when unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceConfig {
    /// TOML file of per-protocol risk ratings
    pub risk_table: Option<PathBuf>,
    /// TOML file of chain/protocol fee profiles
    pub fee_schedule: Option<PathBuf>,
    /// Factor weights, validated to sum to 1
    pub risk_weights: Option<RiskWeights>,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let a = &self.analytics;
        if a.default_investment_usd <= Decimal::ZERO {
            anyhow::bail!(
                "analytics.default_investment_usd must be positive, got {}",
                a.default_investment_usd
            );
        }
        if a.default_holding_period_days == 0 {
            anyhow::bail!("analytics.default_holding_period_days must be at least 1");
        }
        if a.quadrant_threshold <= Decimal::ZERO || a.quadrant_threshold >= Decimal::ONE {
            anyhow::bail!(
                "analytics.quadrant_threshold must be within (0, 1), got {}",
                a.quadrant_threshold
            );
        }
        Ok(())
    }

    /// Default position for fee calculations
    pub fn position(&self) -> PositionParams {
        PositionParams {
            investment_amount: self.analytics.default_investment_usd,
            holding_period_days: self.analytics.default_holding_period_days,
        }
    }

    /// Risk scorer over the configured (or built-in) table and weights
    pub fn build_scorer(&self) -> anyhow::Result<RiskScorer> {
        let table = match &self.reference.risk_table {
            Some(path) => RiskRatingTable::load(path)?,
            None => RiskRatingTable::builtin(),
        };
        let weights = self.reference.risk_weights.unwrap_or_default();
        Ok(RiskScorer::new(table, weights).with_fallback_warnings(self.analytics.warn_on_fallback))
    }

    /// Yield calculator over the configured (or built-in) fee schedule
    pub fn build_calculator(&self) -> anyhow::Result<YieldCalculator> {
        let schedule = match &self.reference.fee_schedule {
            Some(path) => FeeSchedule::load(path)?,
            None => FeeSchedule::builtin(),
        };
        Ok(YieldCalculator::new(schedule).with_fallback_warnings(self.analytics.warn_on_fallback))
    }

    pub fn build_pipeline(&self) -> anyhow::Result<OpportunityPipeline> {
        Ok(OpportunityPipeline::new(
            self.build_scorer()?,
            self.build_calculator()?,
            self.position(),
        ))
    }

    pub fn build_classifier(&self) -> QuadrantClassifier {
        QuadrantClassifier::new(self.analytics.yield_basis, self.analytics.quadrant_threshold)
    }
}
