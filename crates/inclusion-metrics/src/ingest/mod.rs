//! CSV ingestion for the monthly field report template.
//!
//! Field offices submit one workbook per month with a row per branch. The
//! importer normalizes codes and periods, treats blank count cells as zero,
//! and reports structural problems with the offending line number.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

mod normalizer;
mod parser;

use normalizer::{normalize_code, normalize_period};
use parser::parse_rows;

use crate::reporting::{BranchId, ProjectId, ReportSubmission, ReportingPeriod};

#[derive(Debug)]
pub enum FieldReportImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: u64, reason: String },
}

impl fmt::Display for FieldReportImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldReportImportError::Io(err) => write!(f, "failed to read report file: {err}"),
            FieldReportImportError::Csv(err) => write!(f, "failed to parse report file: {err}"),
            FieldReportImportError::Row { line, reason } => {
                write!(f, "line {line}: {reason}")
            }
        }
    }
}

impl Error for FieldReportImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FieldReportImportError::Io(err) => Some(err),
            FieldReportImportError::Csv(err) => Some(err),
            FieldReportImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for FieldReportImportError {
    fn from(err: std::io::Error) -> Self {
        FieldReportImportError::Io(err)
    }
}

impl From<csv::Error> for FieldReportImportError {
    fn from(err: csv::Error) -> Self {
        FieldReportImportError::Csv(err)
    }
}

/// Importer for the monthly template circulated to field offices.
#[derive(Debug, Clone, Default)]
pub struct FieldReportCsvImporter;

impl FieldReportCsvImporter {
    pub fn from_path(
        path: impl AsRef<Path>,
    ) -> Result<Vec<ReportSubmission>, FieldReportImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<ReportSubmission>, FieldReportImportError> {
        let rows = parse_rows(reader)?;
        let mut submissions = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            // Header occupies line one.
            let line = index as u64 + 2;

            let branch = normalize_code(&row.branch);
            if branch.is_empty() {
                return Err(FieldReportImportError::Row {
                    line,
                    reason: "branch cell is empty".to_string(),
                });
            }
            let project = normalize_code(&row.project);
            if project.is_empty() {
                return Err(FieldReportImportError::Row {
                    line,
                    reason: "project cell is empty".to_string(),
                });
            }
            let period = ReportingPeriod::parse(&normalize_period(&row.period)).ok_or_else(
                || FieldReportImportError::Row {
                    line,
                    reason: format!("period {:?} is not in YYYY-MM form", row.period),
                },
            )?;

            let metrics = row.metrics();
            let notes = row
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|notes| !notes.is_empty())
                .map(str::to_string);
            submissions.push(ReportSubmission {
                branch_id: BranchId(branch),
                project_id: ProjectId(project),
                period,
                metrics,
                notes,
            });
        }
        Ok(submissions)
    }
}
