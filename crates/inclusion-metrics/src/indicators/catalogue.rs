//! Declarative formula catalogue and the scoring pass that evaluates it.

use super::fields::{BranchReportMetrics, ReportField};
use super::math::{round2, safe_divide};
use super::scorecard::{
    IndicatorScorecard, PerformanceIndicator, PerformanceScore, RiskIndicator, RiskScore,
};
use super::weights::{WeightConfig, DEFAULT_RISK_TERM_WEIGHT};

/// Denominator of a ratio: summed report counters, or a fixed program target
/// such as the three-MFI diversification goal.
#[derive(Debug, Clone, PartialEq)]
pub enum Denominator {
    Fields(Vec<ReportField>),
    Constant(f64),
}

/// A ratio over report counters, always evaluated through [`safe_divide`].
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSpec {
    pub numerator: Vec<ReportField>,
    pub denominator: Denominator,
}

impl RatioSpec {
    pub fn of(numerator: ReportField, denominator: ReportField) -> RatioSpec {
        RatioSpec {
            numerator: vec![numerator],
            denominator: Denominator::Fields(vec![denominator]),
        }
    }

    pub fn against_target(numerator: ReportField, target: f64) -> RatioSpec {
        RatioSpec {
            numerator: vec![numerator],
            denominator: Denominator::Constant(target),
        }
    }

    pub fn evaluate(&self, metrics: &BranchReportMetrics) -> f64 {
        let numerator: f64 = self
            .numerator
            .iter()
            .map(|field| field.read(metrics))
            .sum();
        let denominator = match &self.denominator {
            Denominator::Fields(fields) => fields.iter().map(|field| field.read(metrics)).sum(),
            Denominator::Constant(target) => *target,
        };
        safe_divide(numerator, denominator)
    }
}

/// One `(1 - KRI) * weight` discount inside a KPI composite.
///
/// The configured weight wins when it is finite; otherwise `fallback`
/// applies, so a missing admin row can never erase the term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedTerm {
    pub risk: RiskIndicator,
    pub fallback: f64,
}

impl WeightedTerm {
    pub const fn of(risk: RiskIndicator) -> WeightedTerm {
        WeightedTerm {
            risk,
            fallback: DEFAULT_RISK_TERM_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskFormula {
    pub id: RiskIndicator,
    pub ratio: RatioSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceFormula {
    pub id: PerformanceIndicator,
    pub base: RatioSpec,
    pub terms: Vec<WeightedTerm>,
}

/// The indicator catalogue: every KRI and KPI the program tracks, as data.
///
/// Programs with extra indicators extend the tables through [`MetricCatalogue::new`]
/// instead of touching the scoring pass.
#[derive(Debug, Clone)]
pub struct MetricCatalogue {
    risks: Vec<RiskFormula>,
    performance: Vec<PerformanceFormula>,
}

impl MetricCatalogue {
    pub fn new(risks: Vec<RiskFormula>, performance: Vec<PerformanceFormula>) -> MetricCatalogue {
        MetricCatalogue { risks, performance }
    }

    /// The standard financial-inclusion catalogue: seven KRIs, four KPIs.
    pub fn standard() -> MetricCatalogue {
        MetricCatalogue::new(standard_risk_formulas(), standard_performance_formulas())
    }

    pub fn risks(&self) -> &[RiskFormula] {
        &self.risks
    }

    pub fn performance(&self) -> &[PerformanceFormula] {
        &self.performance
    }

    /// Evaluates every formula against one report with the given weights.
    ///
    /// The pass is pure: same report and weights, same scorecard. All values
    /// come out rounded to two decimals and no input combination fails.
    pub fn scorecard(
        &self,
        metrics: &BranchReportMetrics,
        weights: &WeightConfig,
    ) -> IndicatorScorecard {
        let risks: Vec<RiskScore> = self
            .risks
            .iter()
            .map(|formula| RiskScore {
                indicator: formula.id,
                value: formula.ratio.evaluate(metrics),
            })
            .collect();

        let performance = self
            .performance
            .iter()
            .map(|formula| {
                let base_ratio = formula.base.evaluate(metrics);
                let multiplier = if formula.terms.is_empty() {
                    1.0
                } else {
                    let sum: f64 = formula
                        .terms
                        .iter()
                        .map(|term| {
                            let risk_value = risks
                                .iter()
                                .find(|score| score.indicator == term.risk)
                                .map(|score| score.value)
                                .unwrap_or(0.0);
                            let weight = weights
                                .risk_weight(term.risk)
                                .filter(|weight| weight.is_finite())
                                .unwrap_or(term.fallback);
                            (1.0 - risk_value) * weight
                        })
                        .sum();
                    round2(sum)
                };
                PerformanceScore {
                    indicator: formula.id,
                    base_ratio,
                    multiplier,
                    value: round2(base_ratio * multiplier),
                }
            })
            .collect();

        IndicatorScorecard { risks, performance }
    }
}

impl Default for MetricCatalogue {
    fn default() -> MetricCatalogue {
        MetricCatalogue::standard()
    }
}

fn standard_risk_formulas() -> Vec<RiskFormula> {
    vec![
        RiskFormula {
            id: RiskIndicator::ChurnRate,
            ratio: RatioSpec::of(ReportField::MembersDroppedOut, ReportField::MembersAtStart),
        },
        RiskFormula {
            id: RiskIndicator::SlowAccountOpeningRate,
            ratio: RatioSpec::of(
                ReportField::MembersComplainingSlowAccount,
                ReportField::MembersApplyingAccounts,
            ),
        },
        RiskFormula {
            id: RiskIndicator::DisbursementDelayRate,
            ratio: RatioSpec::of(
                ReportField::MembersComplainingDelay,
                ReportField::MembersApplyingLoans,
            ),
        },
        RiskFormula {
            id: RiskIndicator::LoanDefaultRate,
            ratio: RatioSpec::of(ReportField::LoansDefaulted, ReportField::MembersReceivedLoans),
        },
        RiskFormula {
            id: RiskIndicator::FraudIncidentRate,
            ratio: RatioSpec::of(ReportField::FraudCases, ReportField::MembersAtEnd),
        },
        RiskFormula {
            id: RiskIndicator::AccessBarrierRate,
            ratio: RatioSpec::of(ReportField::BarrierReports, ReportField::MembersAtEnd),
        },
        RiskFormula {
            id: RiskIndicator::GenderBarrierRate,
            ratio: RatioSpec::of(
                ReportField::GenderBarrierReports,
                ReportField::MembersAtEnd,
            ),
        },
    ]
}

/// Diversification target: members can reach three distinct MFIs.
const MFI_DIVERSIFICATION_TARGET: f64 = 3.0;

fn standard_performance_formulas() -> Vec<PerformanceFormula> {
    vec![
        PerformanceFormula {
            id: PerformanceIndicator::AccountUptakeRate,
            base: RatioSpec::of(ReportField::MembersBankAccount, ReportField::MembersAtEnd),
            terms: vec![
                WeightedTerm::of(RiskIndicator::SlowAccountOpeningRate),
                WeightedTerm::of(RiskIndicator::ChurnRate),
            ],
        },
        PerformanceFormula {
            id: PerformanceIndicator::LoanUptakeRate,
            base: RatioSpec::of(ReportField::MembersReceivedLoans, ReportField::MembersAtEnd),
            terms: vec![
                WeightedTerm::of(RiskIndicator::DisbursementDelayRate),
                WeightedTerm::of(RiskIndicator::LoanDefaultRate),
            ],
        },
        PerformanceFormula {
            id: PerformanceIndicator::LoanDiversificationRate,
            base: RatioSpec::against_target(ReportField::NumMfis, MFI_DIVERSIFICATION_TARGET),
            terms: Vec::new(),
        },
        PerformanceFormula {
            id: PerformanceIndicator::ServiceUsageScore,
            base: RatioSpec::of(ReportField::MembersAtEnd, ReportField::MembersAtStart),
            terms: RiskIndicator::ordered().map(WeightedTerm::of).to_vec(),
        },
    ]
}
