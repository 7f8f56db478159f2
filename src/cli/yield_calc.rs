//! Yield command implementation

use clap::Args;
use rust_decimal::Decimal;

use super::{print_json, OutputFormat};
use crate::config::Config;
use crate::fees::{YieldCalculationInput, YieldCalculationResult};
use crate::quadrant::round_display;

#[derive(Args, Debug)]
pub struct YieldArgs {
    /// Protocol name, e.g. "Uniswap V3"
    #[arg(long)]
    pub protocol: String,

    /// Chain name, e.g. Ethereum
    #[arg(long)]
    pub chain: String,

    /// Gross APY in percent
    #[arg(long)]
    pub apy: Decimal,

    /// Investment amount in USD (defaults to config)
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Holding period in days (defaults to config)
    #[arg(long)]
    pub days: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl YieldArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let calculator = config.build_calculator()?;
        let position = config.position();
        let input = YieldCalculationInput {
            protocol: self.protocol.clone(),
            chain: self.chain.clone(),
            gross_apy: self.apy,
            investment_amount: self.amount.unwrap_or(position.investment_amount),
            holding_period_days: self.days.unwrap_or(position.holding_period_days),
        };

        let result = calculator.calculate_net_yield(&input)?;

        match self.format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "parameters": input,
                "result": result,
            })),
            OutputFormat::Table => {
                print!("{}", format_result(&input, &result));
                Ok(())
            }
        }
    }
}

fn format_result(input: &YieldCalculationInput, result: &YieldCalculationResult) -> String {
    let fees = &result.fee_breakdown;
    let r = |value: Decimal| round_display(value, 2);
    let mut notes = Vec::new();
    if result.chain_fallback {
        notes.push(format!("chain {:?} unknown, default profile used", input.chain));
    }
    if result.protocol_fallback {
        notes.push(format!("protocol {:?} unknown, default profile used", input.protocol));
    }

    let mut out = format!(
        r#"
{} on {}  (${} for {} days)
───────────────────────────────────────
Gross APY:        {:.2}%
Net APY:          {:.2}%
Fee Impact:       {:.2}%
Gross Yield:      ${:.2}
Net Yield:        ${:.2}

FEES
───────────────────────────────────────
Gas:              ${:.2}
Bridge:           ${:.2}
Slippage:         ${:.2}
Protocol:         ${:.2}
Performance:      ${:.2}
Management:       ${:.2}
Total:            ${:.2}
"#,
        input.protocol,
        input.chain,
        input.investment_amount,
        input.holding_period_days,
        r(result.gross_apy),
        r(result.net_apy),
        r(result.fee_impact_percent),
        r(result.gross_yield),
        r(result.net_yield),
        r(fees.gas_fees),
        r(fees.bridge_fees),
        r(fees.slippage_fees),
        r(fees.protocol_fees),
        r(fees.performance_fee),
        r(fees.management_fee),
        r(fees.total_fees),
    );
    for note in notes {
        out.push_str(&format!("Note: {note}\n"));
    }
    out
}
