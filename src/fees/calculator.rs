//! Fee-adjusted yield calculator
//!
//! Models a deposit and eventual withdrawal:
//! - gas on both legs, bridge fee on both legs (round trip)
//! - slippage and protocol fees on principal going in, principal + yield coming out
//! - performance fee on profit, management fee prorated on principal

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{FeeBreakdown, FeeError, FeeSchedule, YieldCalculationInput, YieldCalculationResult};
use crate::telemetry::{record_fallback, FallbackKind};

const DAYS_PER_YEAR: Decimal = dec!(365);
const HUNDRED: Decimal = dec!(100);

/// Computes net yield after chain and protocol costs
#[derive(Debug, Clone, Default)]
pub struct YieldCalculator {
    schedule: FeeSchedule,
    warn_on_fallback: bool,
}

impl YieldCalculator {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self {
            schedule,
            warn_on_fallback: false,
        }
    }

    /// Log unknown chains/protocols at warn level instead of debug
    pub fn with_fallback_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_fallback = enabled;
        self
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Calculate net yield and fee breakdown for a position
    pub fn calculate_net_yield(
        &self,
        input: &YieldCalculationInput,
    ) -> Result<YieldCalculationResult, FeeError> {
        validate(input)?;

        let (chain, chain_fallback) = self.schedule.chain(&input.chain);
        if chain_fallback {
            record_fallback(FallbackKind::Chain, &input.chain, self.warn_on_fallback);
        }
        let (protocol, protocol_fallback) = self.schedule.protocol(&input.protocol);
        if protocol_fallback {
            record_fallback(FallbackKind::FeeProtocol, &input.protocol, self.warn_on_fallback);
        }

        let amount = input.investment_amount;
        let days = Decimal::from(input.holding_period_days);

        // days / 365 applied in a single division
        let gross_yield = checked(
            amount
                .checked_mul(input.gross_apy)
                .and_then(|v| v.checked_mul(days))
                .and_then(|v| v.checked_div(DAYS_PER_YEAR * HUNDRED)),
            "gross_yield",
        )?;
        let exit_value = checked(amount.checked_add(gross_yield), "exit_value")?;

        let gas_fees = checked(chain.gas_per_tx.checked_add(chain.withdrawal_fee), "gas_fees")?;
        let bridge_fees = checked(chain.bridge_fee.checked_mul(dec!(2)), "bridge_fees")?;
        let slippage_fees = checked(
            amount
                .checked_mul(chain.slippage_rate)
                .zip(exit_value.checked_mul(chain.slippage_rate))
                .and_then(|(entry, exit)| entry.checked_add(exit)),
            "slippage_fees",
        )?;
        let protocol_fees = checked(
            amount
                .checked_mul(protocol.deposit_fee_rate)
                .zip(exit_value.checked_mul(protocol.withdrawal_fee_rate))
                .and_then(|(entry, exit)| entry.checked_add(exit)),
            "protocol_fees",
        )?;
        let performance_fee = checked(
            gross_yield.checked_mul(protocol.performance_fee_rate),
            "performance_fee",
        )?;
        let management_fee = checked(
            amount
                .checked_mul(protocol.management_fee_rate)
                .and_then(|v| v.checked_mul(days))
                .and_then(|v| v.checked_div(DAYS_PER_YEAR)),
            "management_fee",
        )?;

        let total_fees = checked(
            [bridge_fees, slippage_fees, protocol_fees, performance_fee, management_fee]
                .into_iter()
                .try_fold(gas_fees, |acc, fee| acc.checked_add(fee)),
            "total_fees",
        )?;

        let net_yield = (gross_yield - total_fees).max(Decimal::ZERO);
        let net_apy = if total_fees.is_zero() {
            input.gross_apy
        } else {
            checked(
                net_yield
                    .checked_div(amount)
                    .and_then(|v| v.checked_mul(DAYS_PER_YEAR * HUNDRED))
                    .and_then(|v| v.checked_div(days)),
                "net_apy",
            )?
            .clamp(Decimal::ZERO, input.gross_apy)
        };

        let fee_impact_percent = if input.gross_apy.is_zero() {
            Decimal::ZERO
        } else {
            checked(
                (input.gross_apy - net_apy)
                    .checked_div(input.gross_apy)
                    .and_then(|v| v.checked_mul(HUNDRED)),
                "fee_impact_percent",
            )?
        };

        tracing::trace!(
            protocol = %input.protocol,
            chain = %input.chain,
            %gross_yield,
            %total_fees,
            %net_apy,
            "Calculated fee-adjusted yield"
        );

        Ok(YieldCalculationResult {
            gross_apy: input.gross_apy,
            net_apy,
            gross_yield,
            net_yield,
            fee_breakdown: FeeBreakdown {
                gas_fees,
                bridge_fees,
                slippage_fees,
                protocol_fees,
                performance_fee,
                management_fee,
                total_fees,
            },
            fee_impact_percent,
            chain_fallback,
            protocol_fallback,
        })
    }
}

fn checked(value: Option<Decimal>, stage: &'static str) -> Result<Decimal, FeeError> {
    value.ok_or(FeeError::Overflow { stage })
}

fn validate(input: &YieldCalculationInput) -> Result<(), FeeError> {
    if input.investment_amount <= Decimal::ZERO {
        return Err(FeeError::InvalidArgument {
            field: "investment_amount",
            reason: format!("must be positive, got {}", input.investment_amount),
        });
    }
    if input.holding_period_days == 0 {
        return Err(FeeError::InvalidArgument {
            field: "holding_period_days",
            reason: "must be at least one day".to_string(),
        });
    }
    if input.gross_apy < Decimal::ZERO {
        return Err(FeeError::InvalidArgument {
            field: "gross_apy",
            reason: format!("must not be negative, got {}", input.gross_apy),
        });
    }
    Ok(())
}
