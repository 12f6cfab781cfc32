use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::scoring::{format_probability, ChartRow, Evaluation, RiskCategory, ScoreTable};

/// Message style for a risk category, mirroring the usual
/// success/info/warning/error alert levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStyle {
    Success,
    Info,
    Warning,
    Error,
}

pub fn style_for(category: RiskCategory) -> DisplayStyle {
    match category {
        RiskCategory::Low => DisplayStyle::Success,
        RiskCategory::Moderate => DisplayStyle::Info,
        RiskCategory::High => DisplayStyle::Warning,
        RiskCategory::VeryHigh => DisplayStyle::Error,
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn paint(text: &str, style: DisplayStyle) -> String {
    match style {
        DisplayStyle::Success => text.green().bold().to_string(),
        DisplayStyle::Info => text.cyan().bold().to_string(),
        DisplayStyle::Warning => text.yellow().bold().to_string(),
        DisplayStyle::Error => text.red().bold().to_string(),
    }
}

/// Format an evaluation as human-readable text.
///
/// ```text
/// Total Score: 14
/// High Risk of ICH: 7.97%
/// ```
/// With `verbose`, each contributing factor is listed below.
pub fn format_result(eval: &Evaluation, use_colors: bool, verbose: bool) -> String {
    let score = format!("{}", eval.score);
    let message = eval.message();

    let mut lines = if use_colors {
        vec![
            format!("{} {}", "Total Score:".bold(), score.bold()),
            paint(&message, style_for(eval.category)),
        ]
    } else {
        vec![format!("Total Score: {}", score), message]
    };

    if verbose {
        lines.push(format!("Variant: {} (max {})", eval.variant, eval.max_score));
        if eval.breakdown.is_empty() {
            lines.push("  No risk factors selected".to_string());
        }
        for c in &eval.breakdown {
            let line = format!("  +{:<2} {}  ({} -> {})", c.points, c.name, c.before, c.after);
            if use_colors {
                lines.push(line.dimmed().to_string());
            } else {
                lines.push(line);
            }
        }
    }

    lines.join("\n")
}

/// Format an evaluation as pretty JSON
pub fn format_json(eval: &Evaluation) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(eval)?)
}

/// Format an evaluation as tab-separated values for scripting
/// Columns: score, category, probability (no headers, no colors)
pub fn format_tsv(eval: &Evaluation) -> String {
    format!("{}\t{}\t{}", eval.score, eval.category.label(), eval.probability)
}

/// List the catalog with its point values, one factor per line.
pub fn format_factor_list(table: &ScoreTable, use_colors: bool) -> String {
    let factors = table.list_factors();
    let name_width = factors.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);

    let mut lines: Vec<String> = factors
        .iter()
        .map(|f| {
            let unit = if f.points == 1 { "point" } else { "points" };
            let name = format!("{:<width$}", f.name, width = name_width);
            let points = format!("{:>2} {:<6}", f.points, unit);
            if use_colors {
                format!("{}  {}  {}", name.bold(), points, f.id.dimmed())
            } else {
                format!("{}  {}  {}", name, points, f.id)
            }
        })
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "Variant: {}  Maximum score: {}",
        table.variant(),
        table.max_score()
    ));
    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Draw the reference chart as horizontal bars, scaled so the largest
/// probability fills the available width. The row for `highlight` is marked.
pub fn format_chart(rows: &[ChartRow], highlight: Option<RiskCategory>, use_colors: bool) -> String {
    let bar_width = get_terminal_width()
        .map(|w| w.saturating_sub(24).clamp(10, 60))
        .unwrap_or(40);
    render_chart(rows, highlight, use_colors, bar_width)
}

fn render_chart(
    rows: &[ChartRow],
    highlight: Option<RiskCategory>,
    use_colors: bool,
    bar_width: usize,
) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let max = rows
        .iter()
        .map(|r| r.probability_percent)
        .fold(0.0_f64, f64::max);
    let label_width = rows.iter().map(|r| r.range_label.len()).max().unwrap_or(0);

    let mut lines = vec!["Estimated ICH Risk by Score Range".to_string()];
    for row in rows {
        let ratio = if max > 0.0 { row.probability_percent / max } else { 0.0 };
        // Non-zero probabilities always get at least one block.
        let filled = ((ratio * bar_width as f64).round() as usize)
            .max(usize::from(row.probability_percent > 0.0));
        let bar = "█".repeat(filled);
        let marker = if highlight == Some(row.category) { "<" } else { "" };
        let label = format!("{:>width$}", row.range_label, width = label_width);
        let value = format_probability(row.probability_percent);

        if use_colors {
            lines.push(format!(
                "{} {} {} {}",
                label.dimmed(),
                paint(&bar, style_for(row.category)),
                value,
                marker.bold()
            ));
        } else {
            lines.push(format!("{} {} {} {}", label, bar, value, marker));
        }
    }

    lines
        .iter()
        .map(|l| l.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{evaluate, ScoreVariant, Selection};

    fn eval(keys: &[&str]) -> Evaluation {
        let table = ScoreTable::new(ScoreVariant::Revised);
        let selection: Selection = keys.iter().copied().collect();
        evaluate(&table, &selection).unwrap()
    }

    #[test]
    fn test_style_for_each_category() {
        assert_eq!(style_for(RiskCategory::Low), DisplayStyle::Success);
        assert_eq!(style_for(RiskCategory::Moderate), DisplayStyle::Info);
        assert_eq!(style_for(RiskCategory::High), DisplayStyle::Warning);
        assert_eq!(style_for(RiskCategory::VeryHigh), DisplayStyle::Error);
    }

    #[test]
    fn test_format_result_plain() {
        let result = format_result(&eval(&["va-ecmo"]), false, false);
        assert_eq!(result, "Total Score: 9\nModerate Risk of ICH: 1.96%");
    }

    #[test]
    fn test_format_result_verbose_lists_factors() {
        let result = format_result(&eval(&["va-ecmo", "sepsis"]), false, true);
        assert!(result.contains("Variant: revised (max 25)"));
        assert!(result.contains("+9  VA-ECMO  (0 -> 9)"));
        assert!(result.contains("+2  Sepsis  (9 -> 11)"));
    }

    #[test]
    fn test_format_result_verbose_empty() {
        let result = format_result(&eval(&[]), false, true);
        assert!(result.contains("Low Risk of ICH: 0.53%"));
        assert!(result.contains("No risk factors selected"));
    }

    #[test]
    fn test_format_tsv() {
        assert_eq!(
            format_tsv(&eval(&["va-ecmo", "acute-ischemic-stroke"])),
            "14\tHigh\t7.97%"
        );
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&eval(&[])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 0);
        assert_eq!(value["category"], "low");
        assert_eq!(value["probability"], "0.53%");
    }

    #[test]
    fn test_format_factor_list() {
        let table = ScoreTable::new(ScoreVariant::Original);
        let result = format_factor_list(&table, false);
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[0].starts_with("VA-ECMO"));
        assert!(lines[0].contains(" 9 points"));
        assert!(lines[0].ends_with("va-ecmo"));
        assert!(lines[6].contains(" 1 point "));
        assert!(result.ends_with("Variant: original  Maximum score: 24"));
    }

    #[test]
    fn test_render_chart_scales_to_largest() {
        let table = ScoreTable::default();
        let chart = render_chart(&table.chart_rows(), None, false, 20);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Estimated ICH Risk by Score Range");
        assert_eq!(lines[4], format!("  >15 {} 22.91%", "█".repeat(20)));
        // 0.53 / 22.91 * 20 rounds to 0, but stays visible
        assert_eq!(lines[1], "  0-5 █ 0.53%");
    }

    #[test]
    fn test_render_chart_highlight() {
        let table = ScoreTable::default();
        let chart = render_chart(&table.chart_rows(), Some(RiskCategory::High), false, 20);
        let marked: Vec<&str> = chart.lines().filter(|l| l.ends_with('<')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("11-15"));
    }

    #[test]
    fn test_render_chart_empty() {
        assert_eq!(render_chart(&[], None, false, 20), "");
    }
}
