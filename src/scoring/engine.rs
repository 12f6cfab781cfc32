use serde::Serialize;

use super::classifier::RiskCategory;
use super::error::Result;
use super::table::{ScoreTable, ScoreVariant, Selection};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub id: String,
    pub name: String,
    pub points: u32,
    pub before: u32, // Total before this factor
    pub after: u32,  // Total after this factor
}

/// Full result of scoring one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub variant: ScoreVariant,
    pub score: u32,
    pub max_score: u32,
    pub category: RiskCategory,
    pub probability: String,
    pub probability_percent: f64,
    pub breakdown: Vec<FactorContribution>,
}

impl Evaluation {
    /// e.g. "High Risk of ICH: 7.97%"
    pub fn message(&self) -> String {
        format!("{} Risk of ICH: {}", self.category.label(), self.probability)
    }
}

pub fn evaluate(table: &ScoreTable, selection: &Selection) -> Result<Evaluation> {
    let factors = table.resolve(selection)?;

    let mut score = 0u32;
    let mut breakdown = Vec::with_capacity(factors.len());
    for factor in factors {
        let before = score;
        score += factor.points;
        breakdown.push(FactorContribution {
            id: factor.id.clone(),
            name: factor.name.clone(),
            points: factor.points,
            before,
            after: score,
        });
    }

    let classification = table.classify(i64::from(score))?;

    Ok(Evaluation {
        variant: table.variant(),
        score,
        max_score: table.max_score(),
        category: classification.category,
        probability: classification.probability,
        probability_percent: classification.probability_percent,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringError;

    fn run(variant: ScoreVariant, keys: &[&str]) -> Evaluation {
        let table = ScoreTable::new(variant);
        let selection: Selection = keys.iter().copied().collect();
        evaluate(&table, &selection).unwrap()
    }

    #[test]
    fn test_empty_selection_is_low() {
        let result = run(ScoreVariant::Revised, &[]);
        assert_eq!(result.score, 0);
        assert_eq!(result.category, RiskCategory::Low);
        assert_eq!(result.probability, "0.53%");
        assert!(result.breakdown.is_empty());

        let result = run(ScoreVariant::Original, &[]);
        assert_eq!(result.probability, "0.52%");
    }

    #[test]
    fn test_va_ecmo_alone_is_moderate() {
        let result = run(ScoreVariant::Revised, &["VA-ECMO"]);
        assert_eq!(result.score, 9);
        assert_eq!(result.category, RiskCategory::Moderate);
        assert_eq!(result.probability, "1.96%");
    }

    #[test]
    fn test_va_ecmo_and_stroke_is_high() {
        let result = run(ScoreVariant::Revised, &["VA-ECMO", "Acute ischemic stroke"]);
        assert_eq!(result.score, 14);
        assert_eq!(result.category, RiskCategory::High);
        assert_eq!(result.probability, "7.97%");
        assert_eq!(result.message(), "High Risk of ICH: 7.97%");
    }

    #[test]
    fn test_full_catalog_is_very_high() {
        for variant in [ScoreVariant::Original, ScoreVariant::Revised] {
            let table = ScoreTable::new(variant);
            let all: Selection = table.list_factors().iter().map(|f| f.id.clone()).collect();
            let result = evaluate(&table, &all).unwrap();
            assert_eq!(result.score, table.max_score());
            assert_eq!(result.category, RiskCategory::VeryHigh);
            assert_eq!(result.probability, "22.91%");
            assert_eq!(result.message(), "Very High Risk of ICH: 22.91%");
        }
    }

    #[test]
    fn test_age_alone_is_low() {
        let result = run(ScoreVariant::Original, &["Age < 65 years"]);
        assert_eq!(result.score, 1);
        assert_eq!(result.category, RiskCategory::Low);
        assert_eq!(result.probability, "0.52%");
    }

    #[test]
    fn test_breakdown_running_totals() {
        let result = run(ScoreVariant::Revised, &["aki", "va-ecmo", "sepsis"]);
        let steps: Vec<(&str, u32, u32)> = result
            .breakdown
            .iter()
            .map(|c| (c.id.as_str(), c.before, c.after))
            .collect();
        assert_eq!(
            steps,
            vec![("va-ecmo", 0, 9), ("sepsis", 9, 11), ("aki", 11, 13)]
        );
        assert_eq!(result.score, 13);
        assert_eq!(result.category, RiskCategory::High);
    }

    #[test]
    fn test_aki_weight_moves_band_edge() {
        // va-ecmo + aki: 10 (Moderate) on original, 11 (High) on revised
        let original = run(ScoreVariant::Original, &["va-ecmo", "aki"]);
        let revised = run(ScoreVariant::Revised, &["va-ecmo", "aki"]);
        assert_eq!(original.category, RiskCategory::Moderate);
        assert_eq!(revised.category, RiskCategory::High);
    }

    #[test]
    fn test_unknown_factor_propagates() {
        let table = ScoreTable::default();
        let selection: Selection = ["bogus"].into_iter().collect();
        assert_eq!(
            evaluate(&table, &selection),
            Err(ScoringError::UnknownFactor(vec!["bogus".to_string()]))
        );
    }

    #[test]
    fn test_serializes_to_json() {
        let result = run(ScoreVariant::Revised, &["va-ecmo"]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 9);
        assert_eq!(json["category"], "moderate");
        assert_eq!(json["probability"], "1.96%");
        assert_eq!(json["variant"], "revised");
        assert_eq!(json["breakdown"][0]["id"], "va-ecmo");
    }
}
