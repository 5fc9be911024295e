//! Serializable rows and banding for the portfolio dashboard.

use serde::Serialize;

use crate::indicators::{PerformanceIndicator, RiskIndicator, ScorecardSummary};

/// Attention band for a risk average. Thresholds follow the program's
/// monitoring handbook: below 5% is routine, 30% and above needs a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Watch,
    Elevated,
    Critical,
}

impl RiskBand {
    pub fn for_value(value: f64) -> RiskBand {
        if value < 0.05 {
            RiskBand::Low
        } else if value < 0.15 {
            RiskBand::Watch
        } else if value < 0.30 {
            RiskBand::Elevated
        } else {
            RiskBand::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Watch => "Watch",
            RiskBand::Elevated => "Elevated",
            RiskBand::Critical => "Critical",
        }
    }
}

/// Portfolio-wide average for one KRI.
#[derive(Debug, Clone, Serialize)]
pub struct RiskOverviewEntry {
    pub indicator: RiskIndicator,
    pub label: &'static str,
    pub average: f64,
    pub band: RiskBand,
    pub band_label: &'static str,
}

/// Portfolio-wide average for one KPI.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceOverviewEntry {
    pub indicator: PerformanceIndicator,
    pub label: &'static str,
    pub average: f64,
}

/// Branch ranked by composite risk, with its dominant indicator.
#[derive(Debug, Clone, Serialize)]
pub struct BranchHotspotView {
    pub branch_id: String,
    pub project_id: String,
    pub composite_risk: f64,
    pub worst_indicator: RiskIndicator,
    pub worst_label: &'static str,
    pub worst_value: f64,
}

/// Per-branch scorecard row for dashboards that expand the detail table.
#[derive(Debug, Clone, Serialize)]
pub struct BranchScorecardView {
    pub branch_id: String,
    pub project_id: String,
    pub members: f64,
    pub scorecard: ScorecardSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub period: String,
    pub branches: usize,
    pub members: f64,
    pub risk_overview: Vec<RiskOverviewEntry>,
    pub performance_overview: Vec<PerformanceOverviewEntry>,
    pub hotspots: Vec<BranchHotspotView>,
}

/// Narrative layer over the summary for program coordinators.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioInsights {
    pub inclusion_score: f64,
    pub overall_band: RiskBand,
    pub overall_band_label: &'static str,
    pub observations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_thresholds_match_the_handbook() {
        assert_eq!(RiskBand::for_value(0.0), RiskBand::Low);
        assert_eq!(RiskBand::for_value(0.04), RiskBand::Low);
        assert_eq!(RiskBand::for_value(0.05), RiskBand::Watch);
        assert_eq!(RiskBand::for_value(0.14), RiskBand::Watch);
        assert_eq!(RiskBand::for_value(0.15), RiskBand::Elevated);
        assert_eq!(RiskBand::for_value(0.29), RiskBand::Elevated);
        assert_eq!(RiskBand::for_value(0.30), RiskBand::Critical);
        assert_eq!(RiskBand::for_value(0.75), RiskBand::Critical);
    }

    #[test]
    fn bands_order_by_severity() {
        assert!(RiskBand::Low < RiskBand::Watch);
        assert!(RiskBand::Elevated < RiskBand::Critical);
    }
}
