use chrono::NaiveDate;

use super::common::*;
use crate::indicators::{
    PerformanceIndicator, RiskIndicator, WeightCategory, WeightConfig,
};
use crate::reporting::repository::WeightStore;

fn scoring_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 31).expect("valid date")
}

#[test]
fn account_uptake_combines_base_ratio_and_weighted_discounts() {
    let (service, _, _, _) = build_service();
    let record = service.submit(submission()).expect("submission stored");

    let scorecard = service
        .score(&record.report.report_id, scoring_date())
        .expect("scoring succeeds");

    assert_eq!(scorecard.risk(RiskIndicator::ChurnRate), Some(0.0));
    assert_eq!(
        scorecard.risk(RiskIndicator::SlowAccountOpeningRate),
        Some(0.0)
    );
    let account = scorecard
        .performance
        .iter()
        .find(|score| score.indicator == PerformanceIndicator::AccountUptakeRate)
        .expect("account uptake present");
    assert_eq!(account.base_ratio, 0.5);
    assert_eq!(account.multiplier, 0.28);
    assert_eq!(account.value, 0.14);
}

#[test]
fn empty_weight_table_scores_with_fallbacks() {
    let (service, _, _, weights) = build_service();
    weights
        .replace(WeightConfig::empty())
        .expect("weights cleared");
    let record = service.submit(submission()).expect("submission stored");

    let scorecard = service
        .score(&record.report.report_id, scoring_date())
        .expect("scoring succeeds");

    let account = scorecard
        .performance(PerformanceIndicator::AccountUptakeRate)
        .expect("account uptake present");
    assert_eq!(account, 0.14);
}

#[test]
fn weight_changes_apply_to_the_next_scoring_run() {
    let (service, _, _, _) = build_service();
    let record = service.submit(submission()).expect("submission stored");

    let first = service
        .score(&record.report.report_id, scoring_date())
        .expect("first scoring");
    assert_eq!(
        first.performance(PerformanceIndicator::AccountUptakeRate),
        Some(0.14)
    );

    let mut heavier = uniform_weights(0.14);
    heavier.set(WeightCategory::Kri, RiskIndicator::ChurnRate.key(), 0.5);
    service
        .replace_weight_table(heavier)
        .expect("weights replaced");

    let second = service
        .score(&record.report.report_id, scoring_date())
        .expect("second scoring");
    let account = second
        .performance
        .iter()
        .find(|score| score.indicator == PerformanceIndicator::AccountUptakeRate)
        .expect("account uptake present");
    assert_eq!(account.multiplier, 0.64);
    assert_eq!(account.value, 0.32);
}

#[test]
fn each_scoring_run_publishes_one_snapshot() {
    let (service, _, snapshots, _) = build_service();
    let record = service.submit(submission()).expect("submission stored");

    service
        .score(&record.report.report_id, scoring_date())
        .expect("first scoring");
    service
        .score(&record.report.report_id, scoring_date())
        .expect("second scoring");

    let events = snapshots.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].report_id, record.report.report_id);
    assert_eq!(events[0].as_of, scoring_date());
    assert_eq!(events[0].period, record.report.period);
    assert!(!events[0].scorecard.risks.is_empty());
}

#[test]
fn zero_loan_activity_scores_zero_uptake() {
    let (service, _, _, _) = build_service();
    let mut quiet = submission();
    quiet.metrics.members_received_loans = 0.0;
    quiet.metrics.loans_defaulted = 0.0;
    let record = service.submit(quiet).expect("submission stored");

    let scorecard = service
        .score(&record.report.report_id, scoring_date())
        .expect("scoring succeeds");
    assert_eq!(
        scorecard.performance(PerformanceIndicator::LoanUptakeRate),
        Some(0.0)
    );
    assert_eq!(scorecard.risk(RiskIndicator::LoanDefaultRate), Some(0.0));
}

#[test]
fn three_partner_mfis_reach_the_diversification_target() {
    let (service, _, _, _) = build_service();
    let record = service.submit(submission()).expect("submission stored");

    let scorecard = service
        .score(&record.report.report_id, scoring_date())
        .expect("scoring succeeds");
    assert_eq!(
        scorecard.performance(PerformanceIndicator::LoanDiversificationRate),
        Some(1.0)
    );
}

#[test]
fn service_usage_discounts_all_seven_risks() {
    let (service, _, _, _) = build_service();
    let record = service.submit(submission()).expect("submission stored");

    let scorecard = service
        .score(&record.report.report_id, scoring_date())
        .expect("scoring succeeds");

    // All risks are zero, so the multiplier is the sum of the seven weights.
    let usage = scorecard
        .performance
        .iter()
        .find(|score| score.indicator == PerformanceIndicator::ServiceUsageScore)
        .expect("usage score present");
    assert_eq!(usage.base_ratio, 1.0);
    assert_eq!(usage.multiplier, 0.98);
    assert_eq!(usage.value, 0.98);
}
