//! Score command implementation

use clap::Args;

use super::{print_json, OutputFormat};
use crate::config::Config;
use crate::risk::RiskScore;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Protocol to score; all rated protocols when omitted
    pub protocol: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ScoreArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let scorer = config.build_scorer()?;
        let scores = match &self.protocol {
            Some(protocol) => vec![scorer.score_protocol(protocol)],
            None => scorer.score_all(),
        };

        tracing::info!(protocols = scores.len(), "Scored protocols");

        match self.format {
            OutputFormat::Json => match scores.as_slice() {
                [single] => print_json(single),
                _ => print_json(&scores),
            },
            OutputFormat::Table => {
                for score in &scores {
                    print!("{}", format_score(score));
                }
                Ok(())
            }
        }
    }
}

fn format_score(score: &RiskScore) -> String {
    let mut out = format!(
        "{:<14} {:>3}/100  {}{}\n",
        score.protocol,
        score.score,
        score.level().label(),
        if score.used_fallback { "  (unrated, default score)" } else { "" },
    );
    if let Some(breakdown) = &score.breakdown {
        for c in breakdown {
            out.push_str(&format!(
                "    {:<18} {:>4}/10  x{:<5} {}\n",
                c.factor.name(),
                c.score,
                c.weight,
                c.description,
            ));
        }
    }
    out
}
