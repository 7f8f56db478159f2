//! End-to-end pipeline tests

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::Path;
use yieldscope::cli::ClassifyArgs;
use yieldscope::fees::{YieldCalculationInput, YieldCalculator};
use yieldscope::opportunity::{build_opportunity, OpportunityPipeline, ProtocolMeta};
use yieldscope::quadrant::{Quadrant, QuadrantClassifier};
use yieldscope::risk::RiskScorer;

fn meta(protocol: &str, chain: &str, apy: Decimal) -> ProtocolMeta {
    ProtocolMeta {
        protocol: protocol.to_string(),
        chain: chain.to_string(),
        category: "Lending".to_string(),
        token: "USDC".to_string(),
        tvl: dec!(500000000),
        gross_apy: apy,
    }
}

#[test]
fn test_aave_ethereum_end_to_end() {
    let scorer = RiskScorer::default();
    let calculator = YieldCalculator::default();

    let risk = scorer.score_protocol("Aave");
    let yield_result = calculator
        .calculate_net_yield(&YieldCalculationInput {
            protocol: "Aave".to_string(),
            chain: "Ethereum".to_string(),
            gross_apy: dec!(10),
            investment_amount: dec!(10000),
            holding_period_days: 365,
        })
        .unwrap();

    let record = build_opportunity(&meta("Aave", "Ethereum", dec!(10)), &risk, &yield_result);
    assert_eq!(record.risk_score, 16);
    assert_eq!(record.net_apy, dec!(8.52));
    assert_eq!(record.fee_impact_percent, dec!(14.8));

    let assignments = QuadrantClassifier::default().classify(&[record]);
    assert_eq!(assignments[0].normalized_yield, dec!(1));
    assert_eq!(assignments[0].normalized_risk, dec!(1));
    assert_eq!(assignments[0].quadrant, Quadrant::HighRisk);
}

#[test]
fn test_sample_batch_classifies_every_record() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/opportunities.json");
    let metas = yieldscope::cli::load_batch(&path).unwrap();
    assert_eq!(metas.len(), 12);

    let report = OpportunityPipeline::default()
        .analyze(&metas, &QuadrantClassifier::default())
        .unwrap();

    assert_eq!(report.summary.total(), 12);
    for (meta, assignment) in metas.iter().zip(&report.assignments) {
        assert_eq!(meta.protocol, assignment.opportunity.protocol);
        assert!(assignment.normalized_yield >= dec!(0) && assignment.normalized_yield <= dec!(1));
        assert!(assignment.normalized_risk >= dec!(0) && assignment.normalized_risk <= dec!(1));
        assert!(assignment.opportunity.net_apy <= assignment.opportunity.gross_apy);
    }

    // Venus carries the highest risk score in the batch
    let venus = report
        .assignments
        .iter()
        .find(|a| a.opportunity.protocol == "Venus")
        .unwrap();
    assert_eq!(venus.normalized_risk, dec!(1));
}

#[test]
fn test_batch_composition_changes_normalization() {
    let pipeline = OpportunityPipeline::default();
    let classifier = QuadrantClassifier::default();

    let alone = pipeline
        .analyze(&[meta("Benqi", "Avalanche", dec!(6))], &classifier)
        .unwrap();
    let with_riskier = pipeline
        .analyze(
            &[meta("Benqi", "Avalanche", dec!(6)), meta("Venus", "BSC", dec!(6))],
            &classifier,
        )
        .unwrap();

    assert_eq!(alone.assignments[0].normalized_risk, dec!(1));
    assert!(with_riskier.assignments[0].normalized_risk < dec!(1));
}

#[test]
fn test_components_share_across_threads() {
    let pipeline = OpportunityPipeline::default();
    let protocols = ["Aave", "Curve", "Orca", "Venus"];

    let sequential: Vec<_> = protocols
        .iter()
        .map(|p| pipeline.evaluate(&meta(p, "Ethereum", dec!(8))).unwrap())
        .collect();

    let parallel: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = protocols
            .iter()
            .map(|p| {
                let pipeline = &pipeline;
                s.spawn(move || pipeline.evaluate(&meta(p, "Ethereum", dec!(8))).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn test_classify_command_runs_on_sample() {
    let args = ClassifyArgs {
        input: Path::new(env!("CARGO_MANIFEST_DIR")).join("data/opportunities.json"),
        basis: None,
        format: yieldscope::cli::OutputFormat::Json,
    };
    args.execute(&yieldscope::config::Config::default()).unwrap();
}
