//! Inflow command implementation

use clap::Args;
use rust_decimal::Decimal;

use super::{print_json, OutputFormat};
use crate::opportunity::{predict_inflow, InflowPrediction, InflowSignal};
use crate::quadrant::round_display;

#[derive(Args, Debug)]
pub struct InflowArgs {
    /// Recent net inflow in USD, negative for outflow
    #[arg(long, allow_hyphen_values = true)]
    pub inflow: Decimal,

    /// Recent APY change in percentage points
    #[arg(long, allow_hyphen_values = true, default_value_t = Decimal::ZERO)]
    pub apy_delta: Decimal,

    /// A major token unlock is scheduled
    #[arg(long)]
    pub unlock: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl InflowArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let prediction = predict_inflow(&InflowSignal {
            inflow: self.inflow,
            apy_delta: self.apy_delta,
            unlock_flag: self.unlock,
        });

        match self.format {
            OutputFormat::Json => print_json(&prediction),
            OutputFormat::Table => {
                print!("{}", format_prediction(&prediction));
                Ok(())
            }
        }
    }
}

fn format_prediction(p: &InflowPrediction) -> String {
    let direction = |positive: bool| if positive { "positive" } else { "negative" };
    format!(
        "Inflow probability: {:.1}%\n  inflow:    {}\n  APY delta: {}\n  unlock:    {}\n",
        round_display(p.probability * Decimal::ONE_HUNDRED, 1),
        direction(p.inflow_positive),
        direction(p.apy_delta_positive),
        if p.unlock_flag { "major unlock detected" } else { "no major unlocks" },
    )
}
