use std::collections::HashSet;

use super::classifier::ScoreBand;
use super::table::{RiskFactor, ScoreTable};

/// Validate a score table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_table(table: &ScoreTable) -> Result<(), Vec<String>> {
    let mut errors = validate_factors(table.list_factors());
    errors.extend(validate_bands(table.bands()));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_factors(factors: &[RiskFactor]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for (i, factor) in factors.iter().enumerate() {
        if factor.id.trim().is_empty() {
            errors.push(format!("factors[{}].id: must not be empty", i));
        } else if !seen_ids.insert(factor.id.to_ascii_lowercase()) {
            errors.push(format!("factors[{}].id: duplicate '{}'", i, factor.id));
        }

        if factor.name.trim().is_empty() {
            errors.push(format!("factors[{}].name: must not be empty", i));
        } else if !seen_names.insert(factor.name.as_str()) {
            errors.push(format!("factors[{}].name: duplicate '{}'", i, factor.name));
        }
    }

    errors
}

/// Bands must tile [0, inf): strictly ascending upper bounds with only the
/// last band unbounded.
fn validate_bands(bands: &[ScoreBand]) -> Vec<String> {
    let mut errors = Vec::new();

    if bands.is_empty() {
        errors.push("bands: at least one band is required".to_string());
        return errors;
    }

    let last = bands.len() - 1;
    for (i, band) in bands.iter().enumerate() {
        match band.upper_bound {
            None if i != last => {
                errors.push(format!("bands[{}].upper_bound: only the last band may be unbounded", i));
            }
            Some(upper) if i == last => {
                errors.push(format!(
                    "bands[{}].upper_bound: last band must be unbounded, found {}",
                    i, upper
                ));
            }
            _ => {}
        }

        if !(0.0..=100.0).contains(&band.probability_percent) {
            errors.push(format!(
                "bands[{}].probability_percent: {} is outside 0-100",
                i, band.probability_percent
            ));
        }

        if i > 0 {
            let prev = &bands[i - 1];
            if let (Some(prev_upper), Some(upper)) = (prev.upper_bound, band.upper_bound) {
                if upper <= prev_upper {
                    errors.push(format!(
                        "bands[{}].upper_bound: {} must be greater than {}",
                        i, upper, prev_upper
                    ));
                }
            }
            if band.category <= prev.category {
                errors.push(format!(
                    "bands[{}].category: {} must rank above {}",
                    i, band.category, prev.category
                ));
            }
            if band.probability_percent < prev.probability_percent {
                errors.push(format!(
                    "bands[{}].probability_percent: {} is lower than the previous band",
                    i, band.probability_percent
                ));
            }
        }
    }

    errors
}
