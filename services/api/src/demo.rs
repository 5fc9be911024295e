use crate::infra::{
    default_weight_config, uniform_weight_config, InMemoryReportRepository,
    InMemorySnapshotPublisher, InMemoryWeightStore,
};
use chrono::{Datelike, Local};
use clap::Args;
use inclusion_metrics::dashboard::{
    BranchScorecardView, DashboardSummary, PortfolioDashboard, PortfolioInsights,
};
use inclusion_metrics::error::AppError;
use inclusion_metrics::indicators::{
    BranchReportMetrics, IndicatorScorecard, MetricCatalogue, PerformanceIndicator,
};
use inclusion_metrics::ingest::FieldReportCsvImporter;
use inclusion_metrics::reporting::{
    BranchId, BranchReportService, ProjectId, ReportIntakeGuard, ReportServiceError,
    ReportSubmission, ReportingPeriod, ValidatedReport,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reporting period for the demo data (YYYY-MM). Defaults to the current month.
    #[arg(long, value_parser = crate::infra::parse_period)]
    pub(crate) period: Option<ReportingPeriod>,
    /// Optional field report CSV to seed the portfolio instead of the built-in branches.
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Include per-branch scorecard rows in the dashboard output.
    #[arg(long)]
    pub(crate) include_branches: bool,
    /// Skip the weight override portion of the demo.
    #[arg(long)]
    pub(crate) skip_weight_update: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScorecardArgs {
    /// Field report CSV export to score
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Only score rows for this reporting period (YYYY-MM)
    #[arg(long, value_parser = crate::infra::parse_period)]
    pub(crate) period: Option<ReportingPeriod>,
    /// Apply this weight to every risk term instead of the stored table
    #[arg(long)]
    pub(crate) risk_weight: Option<f64>,
}

pub(crate) fn run_scorecard(args: ScorecardArgs) -> Result<(), AppError> {
    let ScorecardArgs {
        csv,
        period,
        risk_weight,
    } = args;

    let submissions = FieldReportCsvImporter::from_path(csv)?;
    let weights = match risk_weight {
        Some(value) => uniform_weight_config(value),
        None => default_weight_config(),
    };
    let catalogue = MetricCatalogue::standard();
    let guard = ReportIntakeGuard::default();

    let mut scored = 0usize;
    for submission in submissions {
        if let Some(period) = period {
            if submission.period != period {
                continue;
            }
        }
        let report = guard
            .validate(submission)
            .map_err(ReportServiceError::from)?;
        let scorecard = catalogue.scorecard(&report.metrics, &weights);
        render_branch_scorecard(&report, &scorecard);
        scored += 1;
    }

    if scored == 0 {
        println!("No rows matched the requested period.");
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        period,
        csv,
        include_branches,
        skip_weight_update,
    } = args;

    let period = period.unwrap_or_else(current_period);
    let today = Local::now().date_naive();

    println!("Branch reporting demo for {}", period.label());

    let repository = Arc::new(InMemoryReportRepository::default());
    let snapshots = Arc::new(InMemorySnapshotPublisher::default());
    let weights = Arc::new(InMemoryWeightStore::new(default_weight_config()));
    let service = Arc::new(BranchReportService::new(
        repository,
        snapshots.clone(),
        weights,
    ));

    let submissions: Vec<ReportSubmission> = match csv {
        Some(path) => FieldReportCsvImporter::from_path(path)?
            .into_iter()
            .filter(|submission| submission.period == period)
            .collect(),
        None => sample_submissions(period),
    };

    if submissions.is_empty() {
        println!("No field reports found for {}.", period.label());
        return Ok(());
    }

    println!("\nIntake and scoring");
    for submission in submissions {
        let record = match service.submit(submission) {
            Ok(record) => record,
            Err(err) => {
                println!("- Submission rejected: {err}");
                continue;
            }
        };
        println!(
            "- Received {} from {} -> status {}",
            record.report.report_id.0,
            record.report.branch_id.0,
            record.status.label()
        );
        for flag in &record.report.flags {
            println!("  data quality: {}", flag.detail());
        }

        let scorecard = service.score(&record.report.report_id, today)?;
        let usage = scorecard
            .performance(PerformanceIndicator::ServiceUsageScore)
            .unwrap_or_default();
        println!("  scored: service usage {usage:.2}");
    }

    let records = service.reports_for_period(period)?;
    let table = service.weight_table()?;
    let dashboard = PortfolioDashboard::from_records(period, &records, service.catalogue(), &table);
    render_dashboard(
        &dashboard.summary(),
        &dashboard.insights(),
        include_branches.then(|| dashboard.branch_details()),
    );

    println!(
        "\nSnapshots pushed to the display cache: {}",
        snapshots.events().len()
    );

    if skip_weight_update {
        return Ok(());
    }

    println!("\nWeight override: every risk term at 0.25");
    service.replace_weight_table(uniform_weight_config(0.25))?;
    let reweighted = service.weight_table()?;
    let dashboard =
        PortfolioDashboard::from_records(period, &records, service.catalogue(), &reweighted);
    render_dashboard(&dashboard.summary(), &dashboard.insights(), None);

    Ok(())
}

fn current_period() -> ReportingPeriod {
    let today = Local::now().date_naive();
    ReportingPeriod::new(today.year(), today.month())
}

fn sample_submissions(period: ReportingPeriod) -> Vec<ReportSubmission> {
    vec![
        demo_submission(
            period,
            "KMB-01",
            "FIP-2026",
            BranchReportMetrics {
                members_at_start: 1250.0,
                members_at_end: 1238.0,
                members_dropped_out: 12.0,
                members_bank_account: 910.0,
                members_applying_accounts: 160.0,
                members_complaining_slow_account: 6.0,
                members_applying_loans: 140.0,
                members_received_loans: 118.0,
                members_complaining_delay: 9.0,
                loans_defaulted: 4.0,
                fraud_cases: 1.0,
                num_mfis: 4.0,
                barrier_reports: 10.0,
                gender_barrier_reports: 4.0,
            },
            Some("Steady quarter, two new savings groups."),
        ),
        demo_submission(
            period,
            "KMB-02",
            "FIP-2026",
            BranchReportMetrics {
                members_at_start: 640.0,
                members_at_end: 588.0,
                members_dropped_out: 52.0,
                members_bank_account: 210.0,
                members_applying_accounts: 150.0,
                members_complaining_slow_account: 38.0,
                members_applying_loans: 120.0,
                members_received_loans: 61.0,
                members_complaining_delay: 33.0,
                loans_defaulted: 12.0,
                fraud_cases: 4.0,
                num_mfis: 1.0,
                barrier_reports: 52.0,
                gender_barrier_reports: 30.0,
            },
            Some("Road washouts kept two villages from the branch all month."),
        ),
        demo_submission(
            period,
            "KMB-03",
            "FIP-2026",
            BranchReportMetrics {
                members_at_start: 910.0,
                members_at_end: 905.0,
                members_dropped_out: 5.0,
                members_bank_account: 520.0,
                members_applying_accounts: 230.0,
                members_complaining_slow_account: 12.0,
                members_applying_loans: 180.0,
                members_received_loans: 150.0,
                members_complaining_delay: 14.0,
                loans_defaulted: 6.0,
                fraud_cases: 0.0,
                num_mfis: 3.0,
                barrier_reports: 20.0,
                gender_barrier_reports: 8.0,
            },
            None,
        ),
    ]
}

fn demo_submission(
    period: ReportingPeriod,
    branch: &str,
    project: &str,
    metrics: BranchReportMetrics,
    notes: Option<&str>,
) -> ReportSubmission {
    ReportSubmission {
        branch_id: BranchId(branch.to_string()),
        project_id: ProjectId(project.to_string()),
        period,
        metrics,
        notes: notes.map(str::to_string),
    }
}

fn render_branch_scorecard(report: &ValidatedReport, scorecard: &IndicatorScorecard) {
    println!(
        "\n{} / {} ({})",
        report.branch_id.0,
        report.project_id.0,
        report.period.label()
    );
    if !report.flags.is_empty() {
        println!("  Data quality:");
        for flag in &report.flags {
            println!("  - {}", flag.detail());
        }
    }
    println!("  Risk indicators:");
    for score in &scorecard.risks {
        println!("  - {}: {:.2}", score.indicator.label(), score.value);
    }
    println!("  Performance indicators:");
    for score in &scorecard.performance {
        println!(
            "  - {}: {:.2} (base {:.2} x multiplier {:.2})",
            score.indicator.label(),
            score.value,
            score.base_ratio,
            score.multiplier
        );
    }
}

fn render_dashboard(
    summary: &DashboardSummary,
    insights: &PortfolioInsights,
    branches: Option<Vec<BranchScorecardView>>,
) {
    println!("\nPortfolio dashboard for {}", summary.period);
    println!(
        "- {} branches | {:.0} members tracked",
        summary.branches, summary.members
    );

    println!("\nRisk overview");
    for entry in &summary.risk_overview {
        println!(
            "- {}: {:.2} ({})",
            entry.label, entry.average, entry.band_label
        );
    }

    println!("\nPerformance overview");
    for entry in &summary.performance_overview {
        println!("- {}: {:.2}", entry.label, entry.average);
    }

    if summary.hotspots.is_empty() {
        println!("\nHotspots: none");
    } else {
        println!("\nHotspots");
        for hotspot in &summary.hotspots {
            println!(
                "- {} ({}): composite risk {:.2}, worst {} at {:.2}",
                hotspot.branch_id,
                hotspot.project_id,
                hotspot.composite_risk,
                hotspot.worst_label,
                hotspot.worst_value
            );
        }
    }

    println!(
        "\nInclusion score: {:.2} ({})",
        insights.inclusion_score, insights.overall_band_label
    );

    if !insights.observations.is_empty() {
        println!("\nObservations");
        for note in &insights.observations {
            println!("- {}", note);
        }
    }

    if !insights.recommended_actions.is_empty() {
        println!("\nRecommended actions");
        for action in &insights.recommended_actions {
            println!("- {}", action);
        }
    }

    if let Some(branches) = branches {
        println!("\nBranch scorecards");
        for branch in branches {
            println!(
                "- {} ({}) | {:.0} members",
                branch.branch_id, branch.project_id, branch.members
            );
            for score in &branch.scorecard.risks {
                println!("    {}: {:.2}", score.label, score.value);
            }
            for score in &branch.scorecard.performance {
                println!("    {}: {:.2}", score.label, score.value);
            }
        }
    }
}
