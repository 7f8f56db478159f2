//! Quadrant reports and CLI formatting

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use super::{Quadrant, QuadrantAssignment, YieldBasis};

/// Count of opportunities per quadrant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuadrantSummary {
    pub sweet_spot: usize,
    pub high_risk: usize,
    pub safe_haven: usize,
    pub avoid: usize,
}

impl QuadrantSummary {
    pub fn from_assignments(assignments: &[QuadrantAssignment]) -> Self {
        let mut summary = Self::default();
        for a in assignments {
            *summary.slot(a.quadrant) += 1;
        }
        summary
    }

    pub fn count(&self, quadrant: Quadrant) -> usize {
        match quadrant {
            Quadrant::SweetSpot => self.sweet_spot,
            Quadrant::HighRisk => self.high_risk,
            Quadrant::SafeHaven => self.safe_haven,
            Quadrant::Avoid => self.avoid,
        }
    }

    pub fn total(&self) -> usize {
        self.sweet_spot + self.high_risk + self.safe_haven + self.avoid
    }

    fn slot(&mut self, quadrant: Quadrant) -> &mut usize {
        match quadrant {
            Quadrant::SweetSpot => &mut self.sweet_spot,
            Quadrant::HighRisk => &mut self.high_risk,
            Quadrant::SafeHaven => &mut self.safe_haven,
            Quadrant::Avoid => &mut self.avoid,
        }
    }
}

/// A classified batch
#[derive(Debug, Clone, Serialize)]
pub struct QuadrantReport {
    pub basis: YieldBasis,
    pub computed_at: DateTime<Utc>,
    pub summary: QuadrantSummary,
    /// In input order
    pub assignments: Vec<QuadrantAssignment>,
}

impl QuadrantReport {
    pub fn new(basis: YieldBasis, assignments: Vec<QuadrantAssignment>) -> Self {
        Self {
            basis,
            computed_at: Utc::now(),
            summary: QuadrantSummary::from_assignments(&assignments),
            assignments,
        }
    }

    /// Assignments in one quadrant, in input order
    pub fn in_quadrant(&self, quadrant: Quadrant) -> impl Iterator<Item = &QuadrantAssignment> {
        self.assignments
            .iter()
            .filter(move |a| a.quadrant == quadrant)
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let mut out = String::new();
        out.push_str("══════════════════════════════════════════════════════════════════\n");
        out.push_str("                  RISK / REWARD QUADRANTS\n");
        out.push_str("══════════════════════════════════════════════════════════════════\n");
        out.push_str(&format!(
            "Yield basis: {:?}   Opportunities: {}   Computed: {}\n",
            self.basis,
            self.summary.total(),
            self.computed_at.format("%Y-%m-%d %H:%M:%S UTC"),
        ));

        for quadrant in Quadrant::ALL {
            out.push_str(&format!(
                "\n{} ({}) - {}\n",
                quadrant.title().to_uppercase(),
                self.summary.count(quadrant),
                quadrant.description(),
            ));
            out.push_str("──────────────────────────────────────────────────────────────────\n");
            for a in self.in_quadrant(quadrant) {
                let o = &a.opportunity;
                out.push_str(&format!(
                    "{:<14} {:<10} {:<6} TVL {:>8}  APY {:>6.2}% -> {:>6.2}%  Risk {:>3} ({})\n",
                    o.protocol,
                    o.chain,
                    o.token,
                    format_tvl(o.tvl),
                    round_display(o.gross_apy, 2),
                    round_display(o.net_apy, 2),
                    o.risk_score,
                    o.risk_level().label(),
                ));
            }
        }
        out.push_str("══════════════════════════════════════════════════════════════════\n");
        out
    }
}

/// Round half away from zero before fixed-precision display
///
/// `Decimal`'s `{:.N}` formatting truncates.
pub fn round_display(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Compact USD rendering: `$1.2B`, `$350.0M`, `$12,345`
pub fn format_tvl(tvl: Decimal) -> String {
    if tvl >= dec!(1000000000) {
        format!("${:.1}B", round_display(tvl / dec!(1000000000), 1))
    } else if tvl >= dec!(1000000) {
        format!("${:.1}M", round_display(tvl / dec!(1000000), 1))
    } else {
        let whole = round_display(tvl, 0).normalize().to_string();
        let (sign, digits) = match whole.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", whole.as_str()),
        };
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        format!("{sign}${grouped}")
    }
}
