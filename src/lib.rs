//! yieldscope: DeFi opportunity analytics
//!
//! This library provides the core components for:
//! - Composite protocol risk scoring from weighted factor ratings
//! - Fee-adjusted net yield across chain and protocol costs
//! - Opportunity aggregation from market metadata
//! - Batch-relative risk/reward quadrant classification
//! - Logging and metrics

pub mod cli;
pub mod config;
pub mod fees;
pub mod opportunity;
pub mod quadrant;
pub mod risk;
pub mod telemetry;
