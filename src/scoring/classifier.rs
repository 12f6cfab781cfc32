use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{Result, ScoringError};

/// Risk category, ordered from lowest to highest risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskCategory {
    /// Human-readable label, e.g. "Very High"
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
            RiskCategory::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A closed range of total scores mapped to one category and probability.
///
/// `upper_bound` is inclusive; `None` means the band is unbounded above.
/// The lower bound is implied by the previous band in the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBand {
    pub upper_bound: Option<u32>,
    pub probability_percent: f64,
    pub category: RiskCategory,
}

impl ScoreBand {
    pub const fn new(upper_bound: Option<u32>, probability_percent: f64, category: RiskCategory) -> Self {
        Self {
            upper_bound,
            probability_percent,
            category,
        }
    }

    pub fn contains(&self, score: u32) -> bool {
        match self.upper_bound {
            Some(upper) => score <= upper,
            None => true,
        }
    }

    pub fn probability_label(&self) -> String {
        format_probability(self.probability_percent)
    }
}

/// Result of classifying a total score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub category: RiskCategory,
    pub probability: String,
    pub probability_percent: f64,
}

/// One row of the reference chart: a score range and its probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub range_label: String,
    pub probability_percent: f64,
    pub category: RiskCategory,
}

/// Format a percentage with two decimals and a trailing `%`.
pub fn format_probability(percent: f64) -> String {
    format!("{:.2}%", percent)
}

/// Map a total score to its band.
///
/// Bands are checked in ascending order and the first whose upper bound is
/// `>= score` wins.
pub fn classify(score: i64, bands: &[ScoreBand]) -> Result<Classification> {
    if score < 0 {
        return Err(ScoringError::InvalidScore(score));
    }
    // Scores past u32::MAX can only land in the unbounded band.
    let score = u32::try_from(score).unwrap_or(u32::MAX);

    let band = bands
        .iter()
        .find(|band| band.contains(score))
        .ok_or(ScoringError::InvalidScore(score as i64))?;

    Ok(Classification {
        category: band.category,
        probability: band.probability_label(),
        probability_percent: band.probability_percent,
    })
}

/// Build the reference chart rows ("0-5", "6-10", "11-15", ">15").
pub fn chart_rows(bands: &[ScoreBand]) -> Vec<ChartRow> {
    let mut lower = 0u32;
    let mut rows = Vec::with_capacity(bands.len());

    for band in bands {
        let range_label = match band.upper_bound {
            Some(upper) => format!("{}-{}", lower, upper),
            None if lower == 0 => "0+".to_string(),
            None => format!(">{}", lower - 1),
        };
        rows.push(ChartRow {
            range_label,
            probability_percent: band.probability_percent,
            category: band.category,
        });
        if let Some(upper) = band.upper_bound {
            lower = upper.saturating_add(1);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANDS: [ScoreBand; 4] = [
        ScoreBand::new(Some(5), 0.53, RiskCategory::Low),
        ScoreBand::new(Some(10), 1.96, RiskCategory::Moderate),
        ScoreBand::new(Some(15), 7.97, RiskCategory::High),
        ScoreBand::new(None, 22.91, RiskCategory::VeryHigh),
    ];

    #[test]
    fn test_low_band() {
        for score in 0..=5 {
            let result = classify(score, &BANDS).unwrap();
            assert_eq!(result.category, RiskCategory::Low);
            assert_eq!(result.probability, "0.53%");
        }
    }

    #[test]
    fn test_moderate_band() {
        for score in 6..=10 {
            let result = classify(score, &BANDS).unwrap();
            assert_eq!(result.category, RiskCategory::Moderate);
            assert_eq!(result.probability, "1.96%");
        }
    }

    #[test]
    fn test_high_band() {
        for score in 11..=15 {
            let result = classify(score, &BANDS).unwrap();
            assert_eq!(result.category, RiskCategory::High);
            assert_eq!(result.probability, "7.97%");
        }
    }

    #[test]
    fn test_very_high_band_is_unbounded() {
        for score in [16, 17, 30, 1_000, i64::from(u32::MAX) + 10] {
            let result = classify(score, &BANDS).unwrap();
            assert_eq!(result.category, RiskCategory::VeryHigh);
            assert_eq!(result.probability, "22.91%");
        }
    }

    #[test]
    fn test_boundaries_belong_to_lower_band() {
        assert_eq!(classify(5, &BANDS).unwrap().category, RiskCategory::Low);
        assert_eq!(classify(6, &BANDS).unwrap().category, RiskCategory::Moderate);
        assert_eq!(classify(10, &BANDS).unwrap().category, RiskCategory::Moderate);
        assert_eq!(classify(11, &BANDS).unwrap().category, RiskCategory::High);
        assert_eq!(classify(15, &BANDS).unwrap().category, RiskCategory::High);
        assert_eq!(classify(16, &BANDS).unwrap().category, RiskCategory::VeryHigh);
    }

    #[test]
    fn test_negative_score_rejected() {
        assert_eq!(classify(-1, &BANDS), Err(ScoringError::InvalidScore(-1)));
    }

    #[test]
    fn test_classify_is_pure() {
        for score in 0..=30 {
            assert_eq!(classify(score, &BANDS), classify(score, &BANDS));
        }
    }

    #[test]
    fn test_no_matching_band_is_an_error() {
        let bounded = [ScoreBand::new(Some(5), 1.0, RiskCategory::Low)];
        assert!(classify(6, &bounded).is_err());
    }

    #[test]
    fn test_chart_rows_labels() {
        let rows = chart_rows(&BANDS);
        let labels: Vec<&str> = rows.iter().map(|r| r.range_label.as_str()).collect();
        assert_eq!(labels, vec!["0-5", "6-10", "11-15", ">15"]);
        assert_eq!(rows[3].probability_percent, 22.91);
    }

    #[test]
    fn test_format_probability_two_decimals() {
        assert_eq!(format_probability(0.5), "0.50%");
        assert_eq!(format_probability(22.91), "22.91%");
    }

    #[test]
    fn test_category_ordering() {
        assert!(RiskCategory::Low < RiskCategory::Moderate);
        assert!(RiskCategory::High < RiskCategory::VeryHigh);
        assert_eq!(RiskCategory::VeryHigh.to_string(), "Very High");
    }
}
