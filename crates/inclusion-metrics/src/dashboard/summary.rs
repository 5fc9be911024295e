//! Portfolio aggregation across the scored branches of one period.

use crate::indicators::{
    safe_divide, IndicatorScorecard, MetricCatalogue, PerformanceIndicator, RiskIndicator,
    WeightConfig,
};
use crate::reporting::{BranchId, BranchReportRecord, ProjectId, ReportingPeriod};

use super::insights::generate_insights;
use super::views::{
    BranchHotspotView, BranchScorecardView, DashboardSummary, PerformanceOverviewEntry,
    PortfolioInsights, RiskBand, RiskOverviewEntry,
};

/// One branch's contribution to the portfolio view.
#[derive(Debug, Clone)]
pub struct ScoredBranch {
    pub branch_id: BranchId,
    pub project_id: ProjectId,
    pub members: f64,
    pub scorecard: IndicatorScorecard,
}

/// Aggregated dashboard for one reporting period.
///
/// Scorecards are always recomputed from raw counters and the current weight
/// table when the dashboard is built; cached snapshots never feed it.
#[derive(Debug, Clone)]
pub struct PortfolioDashboard {
    period: ReportingPeriod,
    branches: Vec<ScoredBranch>,
}

impl PortfolioDashboard {
    pub fn new(period: ReportingPeriod, branches: Vec<ScoredBranch>) -> PortfolioDashboard {
        PortfolioDashboard { period, branches }
    }

    /// Builds the dashboard by scoring every stored report fresh.
    pub fn from_records(
        period: ReportingPeriod,
        records: &[BranchReportRecord],
        catalogue: &MetricCatalogue,
        weights: &WeightConfig,
    ) -> PortfolioDashboard {
        let branches = records
            .iter()
            .map(|record| ScoredBranch {
                branch_id: record.report.branch_id.clone(),
                project_id: record.report.project_id.clone(),
                members: record.report.metrics.members_at_end,
                scorecard: catalogue.scorecard(&record.report.metrics, weights),
            })
            .collect();
        PortfolioDashboard { period, branches }
    }

    pub fn branches(&self) -> &[ScoredBranch] {
        &self.branches
    }

    pub fn summary(&self) -> DashboardSummary {
        let members: f64 = self.branches.iter().map(|branch| branch.members).sum();

        let risk_overview = RiskIndicator::ordered()
            .into_iter()
            .map(|indicator| {
                let average = self.weighted_average(|scorecard| scorecard.risk(indicator));
                let band = RiskBand::for_value(average);
                RiskOverviewEntry {
                    indicator,
                    label: indicator.label(),
                    average,
                    band,
                    band_label: band.label(),
                }
            })
            .collect();

        let performance_overview = PerformanceIndicator::ordered()
            .into_iter()
            .map(|indicator| PerformanceOverviewEntry {
                indicator,
                label: indicator.label(),
                average: self.weighted_average(|scorecard| scorecard.performance(indicator)),
            })
            .collect();

        DashboardSummary {
            period: self.period.label(),
            branches: self.branches.len(),
            members,
            risk_overview,
            performance_overview,
            hotspots: self.hotspots(3),
        }
    }

    pub fn insights(&self) -> PortfolioInsights {
        generate_insights(&self.summary())
    }

    /// Detail rows for dashboards that expand the per-branch table.
    pub fn branch_details(&self) -> Vec<BranchScorecardView> {
        self.branches
            .iter()
            .map(|branch| BranchScorecardView {
                branch_id: branch.branch_id.0.clone(),
                project_id: branch.project_id.0.clone(),
                members: branch.members,
                scorecard: branch.scorecard.summary(),
            })
            .collect()
    }

    /// Member-weighted portfolio average of one indicator. Branches with no
    /// members contribute nothing, and an empty portfolio averages to zero.
    fn weighted_average<F>(&self, value: F) -> f64
    where
        F: Fn(&IndicatorScorecard) -> Option<f64>,
    {
        let mut weighted_sum = 0.0;
        let mut member_total = 0.0;
        for branch in &self.branches {
            if let Some(score) = value(&branch.scorecard) {
                weighted_sum += score * branch.members;
                member_total += branch.members;
            }
        }
        safe_divide(weighted_sum, member_total)
    }

    fn hotspots(&self, limit: usize) -> Vec<BranchHotspotView> {
        let mut ranked: Vec<BranchHotspotView> = self
            .branches
            .iter()
            .filter_map(|branch| {
                let risks = &branch.scorecard.risks;
                if risks.is_empty() {
                    return None;
                }
                let total: f64 = risks.iter().map(|score| score.value).sum();
                let composite = safe_divide(total, risks.len() as f64);
                let worst = risks
                    .iter()
                    .max_by(|a, b| a.value.total_cmp(&b.value))?;
                Some(BranchHotspotView {
                    branch_id: branch.branch_id.0.clone(),
                    project_id: branch.project_id.0.clone(),
                    composite_risk: composite,
                    worst_indicator: worst.indicator,
                    worst_label: worst.indicator.label(),
                    worst_value: worst.value,
                })
            })
            .collect();
        ranked.sort_by(|a, b| b.composite_risk.total_cmp(&a.composite_risk));
        ranked.truncate(limit);
        ranked
    }
}
