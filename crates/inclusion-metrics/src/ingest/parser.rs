//! Row-level parsing for the monthly field report template.

use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::indicators::BranchReportMetrics;

use super::FieldReportImportError;

/// One spreadsheet row, with the headers the circulated template uses.
#[derive(Debug, Deserialize)]
pub(crate) struct FieldReportRow {
    #[serde(rename = "Branch", default)]
    pub(crate) branch: String,
    #[serde(rename = "Project", default)]
    pub(crate) project: String,
    #[serde(rename = "Period", default)]
    pub(crate) period: String,
    #[serde(rename = "Members at Start", default, deserialize_with = "numeric_cell")]
    pub(crate) members_at_start: f64,
    #[serde(rename = "Members at End", default, deserialize_with = "numeric_cell")]
    pub(crate) members_at_end: f64,
    #[serde(rename = "Dropped Out", default, deserialize_with = "numeric_cell")]
    pub(crate) members_dropped_out: f64,
    #[serde(rename = "With Bank Account", default, deserialize_with = "numeric_cell")]
    pub(crate) members_bank_account: f64,
    #[serde(
        rename = "Applying for Accounts",
        default,
        deserialize_with = "numeric_cell"
    )]
    pub(crate) members_applying_accounts: f64,
    #[serde(
        rename = "Slow Account Complaints",
        default,
        deserialize_with = "numeric_cell"
    )]
    pub(crate) members_complaining_slow_account: f64,
    #[serde(rename = "Applying for Loans", default, deserialize_with = "numeric_cell")]
    pub(crate) members_applying_loans: f64,
    #[serde(rename = "Received Loans", default, deserialize_with = "numeric_cell")]
    pub(crate) members_received_loans: f64,
    #[serde(rename = "Delay Complaints", default, deserialize_with = "numeric_cell")]
    pub(crate) members_complaining_delay: f64,
    #[serde(rename = "Loans Defaulted", default, deserialize_with = "numeric_cell")]
    pub(crate) loans_defaulted: f64,
    #[serde(rename = "Fraud Cases", default, deserialize_with = "numeric_cell")]
    pub(crate) fraud_cases: f64,
    #[serde(rename = "Partner MFIs", default, deserialize_with = "numeric_cell")]
    pub(crate) num_mfis: f64,
    #[serde(rename = "Barrier Reports", default, deserialize_with = "numeric_cell")]
    pub(crate) barrier_reports: f64,
    #[serde(
        rename = "Gender Barrier Reports",
        default,
        deserialize_with = "numeric_cell"
    )]
    pub(crate) gender_barrier_reports: f64,
    #[serde(rename = "Notes", default)]
    pub(crate) notes: Option<String>,
}

impl FieldReportRow {
    pub(crate) fn metrics(&self) -> BranchReportMetrics {
        BranchReportMetrics {
            members_at_start: self.members_at_start,
            members_at_end: self.members_at_end,
            members_dropped_out: self.members_dropped_out,
            members_bank_account: self.members_bank_account,
            members_applying_accounts: self.members_applying_accounts,
            members_complaining_slow_account: self.members_complaining_slow_account,
            members_applying_loans: self.members_applying_loans,
            members_received_loans: self.members_received_loans,
            members_complaining_delay: self.members_complaining_delay,
            loans_defaulted: self.loans_defaulted,
            fraud_cases: self.fraud_cases,
            num_mfis: self.num_mfis,
            barrier_reports: self.barrier_reports,
            gender_barrier_reports: self.gender_barrier_reports,
        }
    }
}

pub(crate) fn parse_rows<R: Read>(
    reader: R,
) -> Result<Vec<FieldReportRow>, FieldReportImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: FieldReportRow = result?;
        rows.push(row);
    }
    Ok(rows)
}

/// Parses a count cell. Blank means zero; thousands separators and interior
/// spaces are tolerated.
pub(crate) fn parse_count(raw: &str) -> Result<f64, String> {
    let cleaned = raw.trim().replace([',', ' '], "");
    if cleaned.is_empty() {
        return Ok(0.0);
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| format!("{raw:?} is not a number"))
}

fn numeric_cell<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_count(raw.as_deref().unwrap_or("")).map_err(serde::de::Error::custom)
}
