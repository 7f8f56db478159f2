//! Static chain and protocol fee profiles

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::FeeError;

/// Per-chain transaction costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFeeProfile {
    /// Gas for one transaction, USD
    pub gas_per_tx: Decimal,
    /// One-way bridge fee, USD
    pub bridge_fee: Decimal,
    /// Slippage as a fraction of transaction size
    pub slippage_rate: Decimal,
    /// Gas for the withdrawal transaction, USD
    pub withdrawal_fee: Decimal,
}

impl ChainFeeProfile {
    pub fn new(
        gas_per_tx: Decimal,
        bridge_fee: Decimal,
        slippage_rate: Decimal,
        withdrawal_fee: Decimal,
    ) -> Self {
        Self {
            gas_per_tx,
            bridge_fee,
            slippage_rate,
            withdrawal_fee,
        }
    }

    fn validate(&self, name: &str) -> Result<(), FeeError> {
        check_amount(name, "gas_per_tx", self.gas_per_tx)?;
        check_amount(name, "bridge_fee", self.bridge_fee)?;
        check_amount(name, "withdrawal_fee", self.withdrawal_fee)?;
        check_rate(name, "slippage_rate", self.slippage_rate)
    }
}

/// Per-protocol fee rates, all fractions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolFeeProfile {
    pub deposit_fee_rate: Decimal,
    pub withdrawal_fee_rate: Decimal,
    /// Charged on profit only
    pub performance_fee_rate: Decimal,
    /// Annual, prorated on principal
    pub management_fee_rate: Decimal,
}

impl ProtocolFeeProfile {
    /// Symmetric swap-style deposit and withdrawal fee
    pub fn swap(rate: Decimal) -> Self {
        Self {
            deposit_fee_rate: rate,
            withdrawal_fee_rate: rate,
            ..Self::default()
        }
    }

    fn validate(&self, name: &str) -> Result<(), FeeError> {
        check_rate(name, "deposit_fee_rate", self.deposit_fee_rate)?;
        check_rate(name, "withdrawal_fee_rate", self.withdrawal_fee_rate)?;
        check_rate(name, "performance_fee_rate", self.performance_fee_rate)?;
        check_rate(name, "management_fee_rate", self.management_fee_rate)
    }
}

fn check_amount(name: &str, field: &str, value: Decimal) -> Result<(), FeeError> {
    if value < Decimal::ZERO {
        return Err(FeeError::InvalidProfile {
            name: name.to_string(),
            reason: format!("{field} is negative ({value})"),
        });
    }
    Ok(())
}

fn check_rate(name: &str, field: &str, value: Decimal) -> Result<(), FeeError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(FeeError::InvalidProfile {
            name: name.to_string(),
            reason: format!("{field} must be within [0, 1], got {value}"),
        });
    }
    Ok(())
}

/// Chain and protocol fee tables with designated fallbacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct FeeSchedule {
    default_chain: String,
    default_protocol: String,
    chains: BTreeMap<String, ChainFeeProfile>,
    protocols: BTreeMap<String, ProtocolFeeProfile>,
}

#[derive(Deserialize)]
struct RawSchedule {
    default_chain: String,
    default_protocol: String,
    chains: BTreeMap<String, ChainFeeProfile>,
    #[serde(default)]
    protocols: BTreeMap<String, ProtocolFeeProfile>,
}

impl TryFrom<RawSchedule> for FeeSchedule {
    type Error = FeeError;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        Self::new(raw.default_chain, raw.default_protocol, raw.chains, raw.protocols)
    }
}

impl FeeSchedule {
    /// Build a schedule; both defaults must be present and every profile valid
    pub fn new(
        default_chain: impl Into<String>,
        default_protocol: impl Into<String>,
        chains: BTreeMap<String, ChainFeeProfile>,
        protocols: BTreeMap<String, ProtocolFeeProfile>,
    ) -> Result<Self, FeeError> {
        let default_chain = default_chain.into();
        let default_protocol = default_protocol.into();

        if !chains.contains_key(&default_chain) {
            return Err(FeeError::MissingDefault {
                kind: "chain",
                name: default_chain,
            });
        }
        if !protocols.contains_key(&default_protocol) {
            return Err(FeeError::MissingDefault {
                kind: "protocol",
                name: default_protocol,
            });
        }

        for (name, profile) in &chains {
            profile.validate(name)?;
        }
        for (name, profile) in &protocols {
            profile.validate(name)?;
        }

        Ok(Self {
            default_chain,
            default_protocol,
            chains,
            protocols,
        })
    }

    /// Fee tables for the supported chains and protocols
    ///
    /// Defaults to Ethereum for unknown chains and Aave (no fees) for unknown protocols.
    pub fn builtin() -> Self {
        let chains = [
            ("Ethereum", dec!(25), dec!(15), dec!(0.003), dec!(30)),
            ("Solana", dec!(0.01), dec!(5), dec!(0.002), dec!(0.02)),
            ("BSC", dec!(0.5), dec!(3), dec!(0.005), dec!(1)),
            ("Avalanche", dec!(2), dec!(8), dec!(0.003), dec!(3)),
            ("Sui", dec!(0.1), dec!(4), dec!(0.004), dec!(0.2)),
            ("Aptos", dec!(0.05), dec!(4), dec!(0.004), dec!(0.1)),
            ("Base", dec!(0.8), dec!(2), dec!(0.002), dec!(1.5)),
            ("Arbitrum", dec!(1.2), dec!(5), dec!(0.002), dec!(2)),
            ("Polygon", dec!(0.3), dec!(3), dec!(0.003), dec!(0.5)),
        ]
        .into_iter()
        .map(|(name, gas, bridge, slippage, withdrawal)| {
            (
                name.to_string(),
                ChainFeeProfile::new(gas, bridge, slippage, withdrawal),
            )
        })
        .collect();

        let protocols = [
            ("Aave", ProtocolFeeProfile::default()),
            ("Compound", ProtocolFeeProfile::default()),
            ("Uniswap V3", ProtocolFeeProfile::swap(dec!(0.003))),
            ("Curve", ProtocolFeeProfile::swap(dec!(0.0004))),
            (
                "Convex",
                ProtocolFeeProfile {
                    performance_fee_rate: dec!(0.17),
                    ..ProtocolFeeProfile::default()
                },
            ),
            (
                "Yearn",
                ProtocolFeeProfile {
                    performance_fee_rate: dec!(0.20),
                    management_fee_rate: dec!(0.02),
                    ..ProtocolFeeProfile::default()
                },
            ),
            ("Raydium", ProtocolFeeProfile::swap(dec!(0.0025))),
            ("Orca", ProtocolFeeProfile::swap(dec!(0.003))),
            ("PancakeSwap", ProtocolFeeProfile::swap(dec!(0.0025))),
            ("Venus", ProtocolFeeProfile::default()),
            ("Trader Joe", ProtocolFeeProfile::swap(dec!(0.003))),
            ("Benqi", ProtocolFeeProfile::default()),
        ]
        .into_iter()
        .map(|(name, profile)| (name.to_string(), profile))
        .collect();

        Self {
            default_chain: "Ethereum".to_string(),
            default_protocol: "Aave".to_string(),
            chains,
            protocols,
        }
    }

    /// Load a schedule from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let schedule: FeeSchedule = toml::from_str(&content)?;
        Ok(schedule)
    }

    /// Profile for a chain, and whether the default was substituted
    pub fn chain(&self, name: &str) -> (&ChainFeeProfile, bool) {
        match self.chains.get(name) {
            Some(profile) => (profile, false),
            None => (&self.chains[&self.default_chain], true),
        }
    }

    /// Profile for a protocol, and whether the default was substituted
    pub fn protocol(&self, name: &str) -> (&ProtocolFeeProfile, bool) {
        match self.protocols.get(name) {
            Some(profile) => (profile, false),
            None => (&self.protocols[&self.default_protocol], true),
        }
    }

    pub fn default_chain(&self) -> &str {
        &self.default_chain
    }

    pub fn default_protocol(&self) -> &str {
        &self.default_protocol
    }

    pub fn chains(&self) -> impl Iterator<Item = (&str, &ChainFeeProfile)> {
        self.chains.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn protocols(&self) -> impl Iterator<Item = (&str, &ProtocolFeeProfile)> {
        self.protocols.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_lookup() {
        let schedule = FeeSchedule::builtin();

        let (eth, fallback) = schedule.chain("Ethereum");
        assert!(!fallback);
        assert_eq!(eth.gas_per_tx, dec!(25));
        assert_eq!(eth.withdrawal_fee, dec!(30));

        let (yearn, fallback) = schedule.protocol("Yearn");
        assert!(!fallback);
        assert_eq!(yearn.management_fee_rate, dec!(0.02));
    }

    #[test]
    fn test_unknown_keys_fall_back() {
        let schedule = FeeSchedule::builtin();

        let (chain, fallback) = schedule.chain("Etherium");
        assert!(fallback);
        assert_eq!(*chain, *schedule.chain("Ethereum").0);

        let (protocol, fallback) = schedule.protocol("Unknown");
        assert!(fallback);
        assert_eq!(*protocol, ProtocolFeeProfile::default());
    }

    #[test]
    fn test_builtin_is_valid() {
        let b = FeeSchedule::builtin();
        let rebuilt = FeeSchedule::new(
            b.default_chain.clone(),
            b.default_protocol.clone(),
            b.chains.clone(),
            b.protocols.clone(),
        );
        assert_eq!(rebuilt.unwrap(), b);
    }

    #[test]
    fn test_missing_default_chain() {
        let result = FeeSchedule::new(
            "Mars",
            "Aave",
            BTreeMap::new(),
            BTreeMap::from([("Aave".to_string(), ProtocolFeeProfile::default())]),
        );
        assert!(matches!(result, Err(FeeError::MissingDefault { kind: "chain", .. })));
    }

    #[test]
    fn test_rejects_rate_above_one() {
        let chains = BTreeMap::from([(
            "Ethereum".to_string(),
            ChainFeeProfile::new(dec!(1), dec!(1), dec!(1.5), dec!(1)),
        )]);
        let protocols = BTreeMap::from([("Aave".to_string(), ProtocolFeeProfile::default())]);
        let result = FeeSchedule::new("Ethereum", "Aave", chains, protocols);
        assert!(matches!(result, Err(FeeError::InvalidProfile { .. })));
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            default_chain = "Base"
            default_protocol = "Plain"

            [chains.Base]
            gas_per_tx = 0.8
            bridge_fee = 2
            slippage_rate = 0.002
            withdrawal_fee = 1.5

            [protocols.Plain]

            [protocols.Vault]
            performance_fee_rate = 0.1
            "#
        )
        .unwrap();

        let schedule = FeeSchedule::load(file.path()).unwrap();
        assert_eq!(schedule.default_chain(), "Base");
        assert_eq!(schedule.protocol("Vault").0.performance_fee_rate, dec!(0.1));
        assert_eq!(schedule.protocol("Vault").0.deposit_fee_rate, dec!(0));
        assert!(schedule.chain("Ethereum").1);
    }

    #[test]
    fn test_load_rejects_missing_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            default_chain = "Base"
            default_protocol = "Missing"

            [chains.Base]
            gas_per_tx = 0.8
            bridge_fee = 2
            slippage_rate = 0.002
            withdrawal_fee = 1.5
            "#
        )
        .unwrap();

        assert!(FeeSchedule::load(file.path()).is_err());
    }
}
