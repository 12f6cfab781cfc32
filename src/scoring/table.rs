use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::classifier::{self, ChartRow, Classification, RiskCategory, ScoreBand};
use super::error::{Result, ScoringError};

/// Published variant of the point table.
///
/// The two variants differ only in the AKI weight and the Low-band
/// probability. `Revised` is canonical.
///
/// Example YAML:
/// ```yaml
/// variant: original
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ScoreVariant {
    /// AKI = 1 point, Low band = 0.52%
    Original,
    /// AKI = 2 points, Low band = 0.53%
    #[default]
    Revised,
}

impl ScoreVariant {
    pub fn toggled(self) -> Self {
        match self {
            ScoreVariant::Original => ScoreVariant::Revised,
            ScoreVariant::Revised => ScoreVariant::Original,
        }
    }

    fn aki_points(self) -> u32 {
        match self {
            ScoreVariant::Original => 1,
            ScoreVariant::Revised => 2,
        }
    }

    fn low_band_percent(self) -> f64 {
        match self {
            ScoreVariant::Original => 0.52,
            ScoreVariant::Revised => 0.53,
        }
    }
}

impl fmt::Display for ScoreVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreVariant::Original => f.write_str("original"),
            ScoreVariant::Revised => f.write_str("revised"),
        }
    }
}

/// A scored risk factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFactor {
    /// Stable kebab-case key, usable on the command line
    pub id: String,
    /// Display label
    pub name: String,
    pub points: u32,
}

impl RiskFactor {
    pub fn new(id: &str, name: &str, points: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            points,
        }
    }

    /// Exact display name, or id ignoring ASCII case.
    pub fn matches_key(&self, key: &str) -> bool {
        self.name == key || self.id.eq_ignore_ascii_case(key)
    }
}

/// The set of factor keys marked present for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    /// Flip a key in or out of the selection. Returns true if it is now present.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key.to_string());
            true
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Canonical catalog of risk factors plus the score bands for one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    variant: ScoreVariant,
    factors: Vec<RiskFactor>,
    bands: Vec<ScoreBand>,
}

impl ScoreTable {
    pub fn new(variant: ScoreVariant) -> Self {
        let factors = vec![
            RiskFactor::new("va-ecmo", "VA-ECMO", 9),
            RiskFactor::new("acute-ischemic-stroke", "Acute ischemic stroke", 5),
            RiskFactor::new("thrombophilia", "Thrombophilia", 2),
            RiskFactor::new("microaxial-mcs", "Microaxial MCS (e.g., Impella)", 2),
            RiskFactor::new("sepsis", "Sepsis", 2),
            RiskFactor::new("thrombolysis", "Thrombolysis", 2),
            RiskFactor::new("aki", "Acute kidney injury (AKI)", variant.aki_points()),
            RiskFactor::new("age-under-65", "Age < 65 years", 1),
        ];

        let bands = vec![
            ScoreBand::new(Some(5), variant.low_band_percent(), RiskCategory::Low),
            ScoreBand::new(Some(10), 1.96, RiskCategory::Moderate),
            ScoreBand::new(Some(15), 7.97, RiskCategory::High),
            ScoreBand::new(None, 22.91, RiskCategory::VeryHigh),
        ];

        Self {
            variant,
            factors,
            bands,
        }
    }

    /// Build a table from arbitrary parts. Callers should run
    /// `validate_table` on the result before scoring with it.
    pub fn from_parts(variant: ScoreVariant, factors: Vec<RiskFactor>, bands: Vec<ScoreBand>) -> Self {
        Self {
            variant,
            factors,
            bands,
        }
    }

    pub fn variant(&self) -> ScoreVariant {
        self.variant
    }

    /// The catalog in display order.
    pub fn list_factors(&self) -> &[RiskFactor] {
        &self.factors
    }

    pub fn bands(&self) -> &[ScoreBand] {
        &self.bands
    }

    pub fn find(&self, key: &str) -> Option<&RiskFactor> {
        self.factors.iter().find(|f| f.matches_key(key))
    }

    /// Sum of every factor's points.
    pub fn max_score(&self) -> u32 {
        self.factors.iter().map(|f| f.points).sum()
    }

    /// Resolve a selection to catalog factors, in catalog order.
    ///
    /// Fails with every unknown key if any key does not resolve. Keys naming
    /// the same factor (by id and by name) resolve to it once.
    pub fn resolve(&self, selection: &Selection) -> Result<Vec<&RiskFactor>> {
        let mut indices = BTreeSet::new();
        let mut unknown = Vec::new();

        for key in selection.iter() {
            match self.factors.iter().position(|f| f.matches_key(key)) {
                Some(idx) => {
                    indices.insert(idx);
                }
                None => unknown.push(key.to_string()),
            }
        }

        if !unknown.is_empty() {
            return Err(ScoringError::UnknownFactor(unknown));
        }

        Ok(indices.into_iter().map(|idx| &self.factors[idx]).collect())
    }

    /// Total points of the selected factors. Empty selection scores 0.
    pub fn compute_score(&self, selection: &Selection) -> Result<u32> {
        Ok(self.resolve(selection)?.iter().map(|f| f.points).sum())
    }

    pub fn classify(&self, score: i64) -> Result<Classification> {
        classifier::classify(score, &self.bands)
    }

    pub fn chart_rows(&self) -> Vec<ChartRow> {
        classifier::chart_rows(&self.bands)
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::new(ScoreVariant::default())
    }
}
