//! Intake guard: structural checks and data-quality flagging.
//!
//! The guard rejects only structurally broken submissions. Counter values
//! are never rejected or clamped here; implausible numbers become
//! [`DataQualityFlag`]s that travel with the record.

use crate::indicators::{BranchReportMetrics, ReportField};

use super::domain::{DataQualityFlag, ReportId, ReportSubmission, ValidatedReport};

/// Structural problems that stop a submission at the door.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("branch identifier is empty")]
    MissingBranch,
    #[error("project identifier is empty")]
    MissingProject,
    #[error("reporting period month {month} is outside 1-12")]
    InvalidPeriod { month: u32 },
}

#[derive(Debug, Clone, Default)]
pub struct ReportIntakeGuard;

impl ReportIntakeGuard {
    pub fn validate(
        &self,
        submission: ReportSubmission,
    ) -> Result<ValidatedReport, IntakeViolation> {
        let ReportSubmission {
            branch_id,
            project_id,
            period,
            metrics,
            notes,
        } = submission;

        if branch_id.0.trim().is_empty() {
            return Err(IntakeViolation::MissingBranch);
        }
        if project_id.0.trim().is_empty() {
            return Err(IntakeViolation::MissingProject);
        }
        if !(1..=12).contains(&period.month) {
            return Err(IntakeViolation::InvalidPeriod {
                month: period.month,
            });
        }

        let flags = quality_flags(&metrics);
        Ok(ValidatedReport {
            // The service assigns the real identifier on insert.
            report_id: ReportId("pending".to_string()),
            branch_id,
            project_id,
            period,
            metrics,
            flags,
            notes,
        })
    }
}

fn quality_flags(metrics: &BranchReportMetrics) -> Vec<DataQualityFlag> {
    let mut flags = Vec::new();
    for field in ReportField::ordered() {
        if field.read(metrics) < 0.0 {
            flags.push(DataQualityFlag::NegativeCount { field });
        }
    }
    if metrics.members_bank_account > metrics.members_at_end {
        flags.push(DataQualityFlag::AccountsExceedMembers);
    }
    if metrics.members_received_loans > metrics.members_at_end {
        flags.push(DataQualityFlag::LoansExceedMembers);
    }
    if metrics.members_dropped_out > metrics.members_at_start {
        flags.push(DataQualityFlag::DropoutsExceedStart);
    }
    flags
}
