//! Admin-managed weight table consumed by the KPI composites.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::scorecard::RiskIndicator;

/// Weight applied to a risk term when the admin table has no finite entry
/// for it. Composites never treat an unconfigured weight as zero.
pub const DEFAULT_RISK_TERM_WEIGHT: f64 = 0.14;

/// Configuration group a weight row belongs to. The uppercase names match
/// the admin table the weights are managed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightCategory {
    MainFactor,
    SubFactor,
    Kpi,
    Kri,
}

impl WeightCategory {
    pub const fn ordered() -> [WeightCategory; 4] {
        [
            WeightCategory::MainFactor,
            WeightCategory::SubFactor,
            WeightCategory::Kpi,
            WeightCategory::Kri,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            WeightCategory::MainFactor => "MAIN_FACTOR",
            WeightCategory::SubFactor => "SUB_FACTOR",
            WeightCategory::Kpi => "KPI",
            WeightCategory::Kri => "KRI",
        }
    }
}

/// Weight rows grouped by category, keyed by indicator key.
///
/// Administrators maintain values on a 0-10 convention; the range is not
/// enforced here because the engine treats weights as plain multipliers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightConfig {
    entries: BTreeMap<WeightCategory, BTreeMap<String, f64>>,
}

impl WeightConfig {
    pub fn empty() -> WeightConfig {
        WeightConfig::default()
    }

    pub fn set(&mut self, category: WeightCategory, key: impl Into<String>, value: f64) {
        self.entries
            .entry(category)
            .or_default()
            .insert(key.into(), value);
    }

    pub fn get(&self, category: WeightCategory, key: &str) -> Option<f64> {
        self.entries
            .get(&category)
            .and_then(|group| group.get(key))
            .copied()
    }

    /// Weight for a `(1 - KRI) * weight` term inside a KPI composite.
    pub fn risk_weight(&self, indicator: RiskIndicator) -> Option<f64> {
        self.get(WeightCategory::Kri, indicator.key())
    }

    pub fn category(&self, category: WeightCategory) -> Option<&BTreeMap<String, f64>> {
        self.entries.get(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }
}
