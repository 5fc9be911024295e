//! Portfolio dashboard assembled from scored branch reports.

mod insights;
mod summary;
pub mod views;

pub use summary::{PortfolioDashboard, ScoredBranch};
pub use views::{
    BranchHotspotView, BranchScorecardView, DashboardSummary, PerformanceOverviewEntry,
    PortfolioInsights, RiskBand, RiskOverviewEntry,
};
