//! Classify command implementation

use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

use super::{print_json, OutputFormat};
use crate::config::Config;
use crate::opportunity::ProtocolMeta;
use crate::quadrant::{QuadrantClassifier, YieldBasis};

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// JSON file containing an array of protocol metadata
    pub input: PathBuf,

    /// Yield axis basis (defaults to config)
    #[arg(long, value_enum)]
    pub basis: Option<YieldBasis>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ClassifyArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let metas = load_batch(&self.input)?;
        tracing::info!(input = ?self.input, opportunities = metas.len(), "Classifying batch");

        let pipeline = config.build_pipeline()?;
        let defaults = config.build_classifier();
        let classifier = match self.basis {
            Some(basis) => QuadrantClassifier::new(basis, defaults.threshold()),
            None => defaults,
        };

        let report = pipeline.analyze(&metas, &classifier)?;

        match self.format {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Table => {
                print!("{}", report.format_table());
                Ok(())
            }
        }
    }
}

/// Read a JSON array of protocol metadata
pub fn load_batch(path: &Path) -> anyhow::Result<Vec<ProtocolMeta>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading opportunity batch {}", path.display()))?;
    let metas: Vec<ProtocolMeta> = serde_json::from_str(&content)
        .with_context(|| format!("parsing opportunity batch {}", path.display()))?;
    Ok(metas)
}
