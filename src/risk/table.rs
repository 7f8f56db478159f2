//! Per-protocol risk rating table

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{RiskError, RiskFactorRating};

/// Immutable protocol name -> rating lookup
///
/// Names match exactly (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct RiskRatingTable {
    protocols: BTreeMap<String, RiskFactorRating>,
}

#[derive(Deserialize)]
struct RawTable {
    protocols: BTreeMap<String, RiskFactorRating>,
}

impl TryFrom<RawTable> for RiskRatingTable {
    type Error = RiskError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Self::new(raw.protocols)
    }
}

impl RiskRatingTable {
    /// Build a table, validating every rating
    pub fn new(
        entries: impl IntoIterator<Item = (String, RiskFactorRating)>,
    ) -> Result<Self, RiskError> {
        let protocols: BTreeMap<_, _> = entries.into_iter().collect();
        for rating in protocols.values() {
            rating.validate()?;
        }
        Ok(Self { protocols })
    }

    /// Ratings for the protocols tracked by the dashboard
    pub fn builtin() -> Self {
        let protocols = [
            ("Aave", [1, 2, 2, 1, 1, 3, 2]),
            ("Compound", [2, 3, 3, 1, 1, 2, 2]),
            ("Uniswap V3", [1, 4, 2, 1, 2, 3, 1]),
            ("Curve", [3, 5, 4, 2, 1, 4, 3]),
            ("Convex", [2, 6, 5, 3, 3, 5, 4]),
            ("Yearn", [4, 6, 6, 2, 2, 4, 5]),
            ("Raydium", [2, 4, 5, 4, 4, 6, 3]),
            ("Orca", [1, 3, 4, 3, 4, 5, 3]),
            ("PancakeSwap", [3, 5, 6, 4, 3, 6, 4]),
            ("Venus", [5, 7, 7, 5, 3, 7, 6]),
            ("Trader Joe", [2, 4, 5, 3, 4, 5, 4]),
            ("Benqi", [1, 3, 4, 3, 4, 4, 3]),
        ]
        .into_iter()
        .map(|(name, r)| {
            let d = |i: usize| Decimal::from(r[i]);
            (
                name.to_string(),
                RiskFactorRating {
                    exploit_history: d(0),
                    oracle_dependency: d(1),
                    tvl_concentration: d(2),
                    code_audit: d(3),
                    time_in_market: d(4),
                    governance_risk: d(5),
                    liquidity_risk: d(6),
                },
            )
        })
        .collect();

        Self { protocols }
    }

    /// Load a table from a TOML file with one `[protocols."<name>"]` section per protocol
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table: RiskRatingTable = toml::from_str(&content)?;
        Ok(table)
    }

    pub fn get(&self, protocol: &str) -> Option<&RiskFactorRating> {
        self.protocols.get(protocol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RiskFactorRating)> {
        self.protocols.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}
