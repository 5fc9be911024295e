//! Portfolio dashboard aggregation across scored branches.

use inclusion_metrics::dashboard::{PortfolioDashboard, RiskBand, ScoredBranch};
use inclusion_metrics::indicators::{
    BranchReportMetrics, MetricCatalogue, PerformanceIndicator, RiskIndicator, WeightConfig,
};
use inclusion_metrics::reporting::{BranchId, ProjectId, ReportingPeriod};

fn branch(
    code: &str,
    members_at_start: f64,
    members_at_end: f64,
    dropped_out: f64,
    catalogue: &MetricCatalogue,
) -> ScoredBranch {
    let metrics = BranchReportMetrics {
        members_at_start,
        members_at_end,
        members_dropped_out: dropped_out,
        ..BranchReportMetrics::default()
    };
    ScoredBranch {
        branch_id: BranchId(code.to_string()),
        project_id: ProjectId("FIP-2026".to_string()),
        members: members_at_end,
        scorecard: catalogue.scorecard(&metrics, &WeightConfig::empty()),
    }
}

fn period() -> ReportingPeriod {
    ReportingPeriod::new(2026, 3)
}

#[test]
fn portfolio_averages_weight_branches_by_members() {
    let catalogue = MetricCatalogue::standard();
    // 100-member branch at 10% churn, 300-member branch at 30% churn:
    // weighted average (10 + 90) / 400 = 0.25.
    let dashboard = PortfolioDashboard::new(
        period(),
        vec![
            branch("KMB-01", 100.0, 100.0, 10.0, &catalogue),
            branch("KMB-02", 300.0, 300.0, 90.0, &catalogue),
        ],
    );

    let summary = dashboard.summary();
    assert_eq!(summary.branches, 2);
    assert_eq!(summary.members, 400.0);

    let churn = summary
        .risk_overview
        .iter()
        .find(|entry| entry.indicator == RiskIndicator::ChurnRate)
        .expect("churn entry");
    assert_eq!(churn.average, 0.25);
    assert_eq!(churn.band, RiskBand::Elevated);
}

#[test]
fn hotspots_rank_branches_by_composite_risk() {
    let catalogue = MetricCatalogue::standard();
    let dashboard = PortfolioDashboard::new(
        period(),
        vec![
            branch("KMB-01", 100.0, 100.0, 2.0, &catalogue),
            branch("KMB-02", 100.0, 100.0, 40.0, &catalogue),
            branch("KMB-03", 100.0, 100.0, 15.0, &catalogue),
        ],
    );

    let summary = dashboard.summary();
    assert_eq!(summary.hotspots.len(), 3);
    assert_eq!(summary.hotspots[0].branch_id, "KMB-02");
    assert_eq!(summary.hotspots[0].worst_indicator, RiskIndicator::ChurnRate);
    assert_eq!(summary.hotspots[0].worst_value, 0.4);
}

#[test]
fn empty_period_produces_a_quiet_dashboard() {
    let dashboard = PortfolioDashboard::new(period(), Vec::new());
    let summary = dashboard.summary();

    assert_eq!(summary.branches, 0);
    assert_eq!(summary.members, 0.0);
    assert!(summary.hotspots.is_empty());
    assert!(summary
        .risk_overview
        .iter()
        .all(|entry| entry.average == 0.0));

    let insights = dashboard.insights();
    assert_eq!(insights.overall_band, RiskBand::Low);
    assert!(insights.recommended_actions.is_empty());
}

#[test]
fn insights_follow_the_summary_numbers() {
    let catalogue = MetricCatalogue::standard();
    let dashboard = PortfolioDashboard::new(
        period(),
        vec![branch("KMB-04", 100.0, 100.0, 35.0, &catalogue)],
    );

    let insights = dashboard.insights();
    assert_eq!(insights.overall_band, RiskBand::Critical);
    assert!(insights
        .recommended_actions
        .iter()
        .any(|action| action.contains("retention")));
    assert!(insights
        .observations
        .iter()
        .any(|note| note.contains("KMB-04")));
}

#[test]
fn detail_rows_expose_per_branch_scorecards() {
    let catalogue = MetricCatalogue::standard();
    let dashboard = PortfolioDashboard::new(
        period(),
        vec![branch("KMB-01", 120.0, 118.0, 3.0, &catalogue)],
    );

    let details = dashboard.branch_details();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].branch_id, "KMB-01");
    assert_eq!(details[0].members, 118.0);
    assert_eq!(details[0].scorecard.risks.len(), 7);
    assert_eq!(details[0].scorecard.performance.len(), 4);
}

#[test]
fn dashboards_recompute_from_raw_counters() {
    // Same records, different weight tables: the dashboard reflects the
    // table it was built with, not anything cached on the records.
    use inclusion_metrics::indicators::WeightCategory;
    use inclusion_metrics::reporting::{
        BranchReportRecord, ReportId, ReportStatus, ValidatedReport,
    };

    let metrics = BranchReportMetrics {
        members_at_start: 100.0,
        members_at_end: 100.0,
        members_bank_account: 50.0,
        ..BranchReportMetrics::default()
    };
    let record = BranchReportRecord {
        report: ValidatedReport {
            report_id: ReportId("rpt-000101".to_string()),
            branch_id: BranchId("KMB-01".to_string()),
            project_id: ProjectId("FIP-2026".to_string()),
            period: period(),
            metrics,
            flags: Vec::new(),
            notes: None,
        },
        status: ReportStatus::Submitted,
        scorecard: None,
    };

    let catalogue = MetricCatalogue::standard();
    let records = vec![record];

    let light = PortfolioDashboard::from_records(
        period(),
        &records,
        &catalogue,
        &WeightConfig::empty(),
    );
    let mut heavier_table = WeightConfig::empty();
    heavier_table.set(WeightCategory::Kri, RiskIndicator::ChurnRate.key(), 0.5);
    heavier_table.set(
        WeightCategory::Kri,
        RiskIndicator::SlowAccountOpeningRate.key(),
        0.14,
    );
    let heavy = PortfolioDashboard::from_records(period(), &records, &catalogue, &heavier_table);

    let uptake = |dashboard: &PortfolioDashboard| {
        dashboard
            .summary()
            .performance_overview
            .iter()
            .find(|entry| entry.indicator == PerformanceIndicator::AccountUptakeRate)
            .map(|entry| entry.average)
    };
    assert_eq!(uptake(&light), Some(0.14));
    assert_eq!(uptake(&heavy), Some(0.32));
}
