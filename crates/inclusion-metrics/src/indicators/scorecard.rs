//! Indicator identities and the computed scorecard returned by the engine.

use serde::{Deserialize, Serialize};

/// Key Risk Indicator identity. KRIs are plain ratios where a higher value
/// signals a worse condition for members.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskIndicator {
    ChurnRate,
    SlowAccountOpeningRate,
    DisbursementDelayRate,
    LoanDefaultRate,
    FraudIncidentRate,
    AccessBarrierRate,
    GenderBarrierRate,
}

impl RiskIndicator {
    pub const fn ordered() -> [RiskIndicator; 7] {
        [
            RiskIndicator::ChurnRate,
            RiskIndicator::SlowAccountOpeningRate,
            RiskIndicator::DisbursementDelayRate,
            RiskIndicator::LoanDefaultRate,
            RiskIndicator::FraudIncidentRate,
            RiskIndicator::AccessBarrierRate,
            RiskIndicator::GenderBarrierRate,
        ]
    }

    /// Stable key used for weight lookups and chart series.
    pub const fn key(self) -> &'static str {
        match self {
            RiskIndicator::ChurnRate => "churn_rate",
            RiskIndicator::SlowAccountOpeningRate => "slow_account_opening_rate",
            RiskIndicator::DisbursementDelayRate => "disbursement_delay_rate",
            RiskIndicator::LoanDefaultRate => "loan_default_rate",
            RiskIndicator::FraudIncidentRate => "fraud_incident_rate",
            RiskIndicator::AccessBarrierRate => "access_barrier_rate",
            RiskIndicator::GenderBarrierRate => "gender_barrier_rate",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskIndicator::ChurnRate => "Member Churn",
            RiskIndicator::SlowAccountOpeningRate => "Slow Account Opening",
            RiskIndicator::DisbursementDelayRate => "Loan Disbursement Delay",
            RiskIndicator::LoanDefaultRate => "Loan Default",
            RiskIndicator::FraudIncidentRate => "Fraud Incidents",
            RiskIndicator::AccessBarrierRate => "Access Barriers",
            RiskIndicator::GenderBarrierRate => "Gender Barriers",
        }
    }
}

/// Key Performance Indicator identity. KPIs combine a base uptake ratio with
/// weighted risk discounts, so a higher value signals healthier uptake.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceIndicator {
    AccountUptakeRate,
    LoanUptakeRate,
    LoanDiversificationRate,
    ServiceUsageScore,
}

impl PerformanceIndicator {
    pub const fn ordered() -> [PerformanceIndicator; 4] {
        [
            PerformanceIndicator::AccountUptakeRate,
            PerformanceIndicator::LoanUptakeRate,
            PerformanceIndicator::LoanDiversificationRate,
            PerformanceIndicator::ServiceUsageScore,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            PerformanceIndicator::AccountUptakeRate => "account_uptake_rate",
            PerformanceIndicator::LoanUptakeRate => "loan_uptake_rate",
            PerformanceIndicator::LoanDiversificationRate => "loan_diversification_rate",
            PerformanceIndicator::ServiceUsageScore => "service_usage_score",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PerformanceIndicator::AccountUptakeRate => "Account Uptake",
            PerformanceIndicator::LoanUptakeRate => "Loan Uptake",
            PerformanceIndicator::LoanDiversificationRate => "Loan Diversification",
            PerformanceIndicator::ServiceUsageScore => "Service Usage",
        }
    }
}

/// Computed KRI value for one report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub indicator: RiskIndicator,
    pub value: f64,
}

/// Computed KPI value, kept with its factors so reviewers can audit how the
/// composite was produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScore {
    pub indicator: PerformanceIndicator,
    pub base_ratio: f64,
    pub multiplier: f64,
    pub value: f64,
}

/// Full indicator output for a single branch report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorScorecard {
    pub risks: Vec<RiskScore>,
    pub performance: Vec<PerformanceScore>,
}

impl IndicatorScorecard {
    pub fn risk(&self, indicator: RiskIndicator) -> Option<f64> {
        self.risks
            .iter()
            .find(|score| score.indicator == indicator)
            .map(|score| score.value)
    }

    pub fn performance(&self, indicator: PerformanceIndicator) -> Option<f64> {
        self.performance
            .iter()
            .find(|score| score.indicator == indicator)
            .map(|score| score.value)
    }

    /// Display-ready summary with human captions, in catalogue order.
    pub fn summary(&self) -> ScorecardSummary {
        let risks = RiskIndicator::ordered()
            .into_iter()
            .filter_map(|indicator| {
                self.risk(indicator).map(|value| RiskScoreView {
                    indicator,
                    label: indicator.label(),
                    value,
                })
            })
            .collect();
        let performance = PerformanceIndicator::ordered()
            .into_iter()
            .filter_map(|indicator| {
                self.performance
                    .iter()
                    .find(|score| score.indicator == indicator)
                    .map(|score| PerformanceScoreView {
                        indicator,
                        label: indicator.label(),
                        base_ratio: score.base_ratio,
                        multiplier: score.multiplier,
                        value: score.value,
                    })
            })
            .collect();
        ScorecardSummary { risks, performance }
    }
}

/// Sanitized KRI row for dashboards and API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RiskScoreView {
    pub indicator: RiskIndicator,
    pub label: &'static str,
    pub value: f64,
}

/// Sanitized KPI row, factors included.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceScoreView {
    pub indicator: PerformanceIndicator,
    pub label: &'static str,
    pub base_ratio: f64,
    pub multiplier: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScorecardSummary {
    pub risks: Vec<RiskScoreView>,
    pub performance: Vec<PerformanceScoreView>,
}
