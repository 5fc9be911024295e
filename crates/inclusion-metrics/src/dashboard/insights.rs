//! Narrative layer turning dashboard numbers into coordinator guidance.

use crate::indicators::{PerformanceIndicator, RiskIndicator};

use super::views::{DashboardSummary, PortfolioInsights, RiskBand};

/// Program target for the service usage score.
const USAGE_TARGET: f64 = 0.6;

pub(crate) fn generate_insights(summary: &DashboardSummary) -> PortfolioInsights {
    let inclusion_score = summary
        .performance_overview
        .iter()
        .find(|entry| entry.indicator == PerformanceIndicator::ServiceUsageScore)
        .map(|entry| entry.average)
        .unwrap_or(0.0);

    let overall_band = summary
        .risk_overview
        .iter()
        .map(|entry| entry.band)
        .max()
        .unwrap_or(RiskBand::Low);

    let mut observations = Vec::new();
    observations.push(format!(
        "{} branches reporting with {:.0} members at period end",
        summary.branches, summary.members
    ));

    if let Some(worst) = summary
        .risk_overview
        .iter()
        .max_by(|a, b| a.average.total_cmp(&b.average))
    {
        if worst.band >= RiskBand::Watch {
            observations.push(format!(
                "{} averages {:.2} across the portfolio ({})",
                worst.label, worst.average, worst.band_label
            ));
        }
    }

    if summary.branches > 0 && inclusion_score < USAGE_TARGET {
        observations.push(format!(
            "Service usage score {inclusion_score:.2} trails the {USAGE_TARGET:.2} program target"
        ));
    }

    if let Some(hotspot) = summary.hotspots.first() {
        observations.push(format!(
            "Branch {} carries the highest composite risk at {:.2}, led by {}",
            hotspot.branch_id, hotspot.composite_risk, hotspot.worst_label
        ));
    }

    let mut recommended_actions = Vec::new();
    for entry in &summary.risk_overview {
        if entry.band >= RiskBand::Elevated {
            recommended_actions.push(risk_action(entry.indicator, entry.average));
        }
    }
    if summary.branches > 0 && recommended_actions.is_empty() {
        observations.push(
            "No indicator is above the elevated threshold; keep the current monitoring cadence"
                .to_string(),
        );
    }

    PortfolioInsights {
        inclusion_score,
        overall_band,
        overall_band_label: overall_band.label(),
        observations,
        recommended_actions,
    }
}

fn risk_action(indicator: RiskIndicator, average: f64) -> String {
    match indicator {
        RiskIndicator::ChurnRate => {
            format!("Schedule retention visits; churn is averaging {average:.2}")
        }
        RiskIndicator::SlowAccountOpeningRate => format!(
            "Escalate account-opening turnaround with partner banks (complaint rate {average:.2})"
        ),
        RiskIndicator::DisbursementDelayRate => {
            format!("Review the disbursement pipeline with MFI partners (delay rate {average:.2})")
        }
        RiskIndicator::LoanDefaultRate => {
            format!("Tighten loan follow-up and restructuring support (default rate {average:.2})")
        }
        RiskIndicator::FraudIncidentRate => {
            format!("Open a fraud review for the period (incident rate {average:.2})")
        }
        RiskIndicator::AccessBarrierRate => {
            format!("Plan outreach to remove reported access barriers (rate {average:.2})")
        }
        RiskIndicator::GenderBarrierRate => {
            format!("Engage gender focal points on reported barriers (rate {average:.2})")
        }
    }
}
