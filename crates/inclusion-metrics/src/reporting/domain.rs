//! Core types for branch report intake and scoring.

use serde::{Deserialize, Serialize};

use crate::indicators::{BranchReportMetrics, ReportField};

/// Identifier assigned to a stored branch report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

/// Branch code as maintained by program administrators, e.g. `KMB-01`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BranchId(pub String);

/// Program or funding project the report belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// Calendar month one report covers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ReportingPeriod {
    pub year: i32,
    pub month: u32,
}

impl ReportingPeriod {
    pub fn new(year: i32, month: u32) -> ReportingPeriod {
        ReportingPeriod { year, month }
    }

    /// Parses the `YYYY-MM` form used in spreadsheets and query strings.
    pub fn parse(raw: &str) -> Option<ReportingPeriod> {
        let (year, month) = raw.trim().split_once('-')?;
        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u32>().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(ReportingPeriod { year, month })
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Officer-facing submission payload for one branch, project, and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSubmission {
    pub branch_id: BranchId,
    pub project_id: ProjectId,
    pub period: ReportingPeriod,
    #[serde(default)]
    pub metrics: BranchReportMetrics,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Lifecycle of a stored report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Submitted,
    Scored,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReportStatus::Submitted => "submitted",
            ReportStatus::Scored => "scored",
        }
    }
}

/// Non-blocking annotation attached when raw counters look implausible.
///
/// Flags travel with the record for reviewers; they never stop intake and
/// never change what the engine computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityFlag {
    NegativeCount { field: ReportField },
    AccountsExceedMembers,
    LoansExceedMembers,
    DropoutsExceedStart,
}

impl DataQualityFlag {
    pub fn detail(&self) -> String {
        match self {
            DataQualityFlag::NegativeCount { field } => {
                format!("negative value reported for {}", field.label())
            }
            DataQualityFlag::AccountsExceedMembers => {
                "more bank accounts than members at period end".to_string()
            }
            DataQualityFlag::LoansExceedMembers => {
                "more loan recipients than members at period end".to_string()
            }
            DataQualityFlag::DropoutsExceedStart => {
                "more dropouts than members at period start".to_string()
            }
        }
    }
}

/// Intake-checked report ready for storage and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedReport {
    pub report_id: ReportId,
    pub branch_id: BranchId,
    pub project_id: ProjectId,
    pub period: ReportingPeriod,
    pub metrics: BranchReportMetrics,
    pub flags: Vec<DataQualityFlag>,
    #[serde(default)]
    pub notes: Option<String>,
}
