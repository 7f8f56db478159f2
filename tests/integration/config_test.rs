//! Configuration and reference data loading

use rust_decimal_macros::dec;
use yieldscope::config::Config;
use yieldscope::quadrant::YieldBasis;

#[test]
fn test_config_example_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml.example");
    let config = Config::load(path).unwrap();
    assert_eq!(config.analytics.default_investment_usd, dec!(10000));
    assert_eq!(config.analytics.yield_basis, YieldBasis::Net);
}

#[test]
fn test_custom_reference_tables() {
    let dir = tempfile::tempdir().unwrap();
    let ratings = dir.path().join("ratings.toml");
    let fees = dir.path().join("fees.toml");
    let config_path = dir.path().join("config.toml");

    std::fs::write(
        &ratings,
        r#"
        [protocols.Lido]
        exploit_history = 1
        oracle_dependency = 1
        tvl_concentration = 1
        code_audit = 1
        time_in_market = 1
        governance_risk = 1
        liquidity_risk = 1
        "#,
    )
    .unwrap();
    std::fs::write(
        &fees,
        r#"
        default_chain = "Ethereum"
        default_protocol = "Lido"

        [chains.Ethereum]
        gas_per_tx = 0
        bridge_fee = 0
        slippage_rate = 0
        withdrawal_fee = 0

        [protocols.Lido]
        performance_fee_rate = 0.1
        "#,
    )
    .unwrap();
    std::fs::write(
        &config_path,
        format!(
            "[reference]\nrisk_table = {:?}\nfee_schedule = {:?}\n",
            ratings.display().to_string(),
            fees.display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    let pipeline = config.build_pipeline().unwrap();

    let record = pipeline
        .evaluate(&yieldscope::opportunity::ProtocolMeta {
            protocol: "Lido".to_string(),
            chain: "Ethereum".to_string(),
            category: "Staking".to_string(),
            token: "ETH".to_string(),
            tvl: dec!(30000000000),
            gross_apy: dec!(4),
        })
        .unwrap();

    assert_eq!(record.risk_score, 10);
    // 10% performance fee only
    assert_eq!(record.net_apy, dec!(3.6));
    assert_eq!(record.fee_impact_percent, dec!(10));

    // built-in protocols are no longer rated
    assert!(pipeline.scorer().score_protocol("Aave").used_fallback);
}
