//! Raw branch report counters and the field selectors used by formulas.

use serde::{Deserialize, Serialize};

/// Counters a field officer reports for one branch, project, and month.
///
/// Every counter defaults to zero so sparse spreadsheets and partial API
/// payloads stay computable. Values are kept as `f64` because several
/// upstream sources report fractional membership adjustments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchReportMetrics {
    pub members_at_start: f64,
    pub members_at_end: f64,
    pub members_dropped_out: f64,
    pub members_bank_account: f64,
    pub members_applying_accounts: f64,
    pub members_complaining_slow_account: f64,
    pub members_applying_loans: f64,
    pub members_received_loans: f64,
    pub members_complaining_delay: f64,
    pub loans_defaulted: f64,
    pub fraud_cases: f64,
    pub num_mfis: f64,
    pub barrier_reports: f64,
    pub gender_barrier_reports: f64,
}

/// Selector for a single counter, used by the declarative formula catalogue
/// and by data-quality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportField {
    MembersAtStart,
    MembersAtEnd,
    MembersDroppedOut,
    MembersBankAccount,
    MembersApplyingAccounts,
    MembersComplainingSlowAccount,
    MembersApplyingLoans,
    MembersReceivedLoans,
    MembersComplainingDelay,
    LoansDefaulted,
    FraudCases,
    NumMfis,
    BarrierReports,
    GenderBarrierReports,
}

impl ReportField {
    pub const fn ordered() -> [ReportField; 14] {
        [
            ReportField::MembersAtStart,
            ReportField::MembersAtEnd,
            ReportField::MembersDroppedOut,
            ReportField::MembersBankAccount,
            ReportField::MembersApplyingAccounts,
            ReportField::MembersComplainingSlowAccount,
            ReportField::MembersApplyingLoans,
            ReportField::MembersReceivedLoans,
            ReportField::MembersComplainingDelay,
            ReportField::LoansDefaulted,
            ReportField::FraudCases,
            ReportField::NumMfis,
            ReportField::BarrierReports,
            ReportField::GenderBarrierReports,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            ReportField::MembersAtStart => "members at period start",
            ReportField::MembersAtEnd => "members at period end",
            ReportField::MembersDroppedOut => "members dropped out",
            ReportField::MembersBankAccount => "members with bank accounts",
            ReportField::MembersApplyingAccounts => "members applying for accounts",
            ReportField::MembersComplainingSlowAccount => "slow account-opening complaints",
            ReportField::MembersApplyingLoans => "members applying for loans",
            ReportField::MembersReceivedLoans => "members who received loans",
            ReportField::MembersComplainingDelay => "disbursement delay complaints",
            ReportField::LoansDefaulted => "loans in default",
            ReportField::FraudCases => "reported fraud cases",
            ReportField::NumMfis => "partner MFIs active",
            ReportField::BarrierReports => "access barrier reports",
            ReportField::GenderBarrierReports => "gender barrier reports",
        }
    }

    /// Reads the selected counter out of a report.
    pub fn read(self, metrics: &BranchReportMetrics) -> f64 {
        match self {
            ReportField::MembersAtStart => metrics.members_at_start,
            ReportField::MembersAtEnd => metrics.members_at_end,
            ReportField::MembersDroppedOut => metrics.members_dropped_out,
            ReportField::MembersBankAccount => metrics.members_bank_account,
            ReportField::MembersApplyingAccounts => metrics.members_applying_accounts,
            ReportField::MembersComplainingSlowAccount => {
                metrics.members_complaining_slow_account
            }
            ReportField::MembersApplyingLoans => metrics.members_applying_loans,
            ReportField::MembersReceivedLoans => metrics.members_received_loans,
            ReportField::MembersComplainingDelay => metrics.members_complaining_delay,
            ReportField::LoansDefaulted => metrics.loans_defaulted,
            ReportField::FraudCases => metrics.fraud_cases,
            ReportField::NumMfis => metrics.num_mfis,
            ReportField::BarrierReports => metrics.barrier_reports,
            ReportField::GenderBarrierReports => metrics.gender_barrier_reports,
        }
    }
}
