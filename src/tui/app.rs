use crate::scoring::{evaluate, Evaluation, RiskFactor, ScoreTable, ScoreVariant, Selection};
use crate::tui::theme::ThemeColors;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

pub struct App {
    pub table: ScoreTable,
    pub selection: Selection,
    pub evaluation: Option<Evaluation>,
    pub list_state: ratatui::widgets::ListState,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub colors: ThemeColors,
}

impl App {
    pub fn new(variant: ScoreVariant, colors: ThemeColors) -> Self {
        let table = ScoreTable::new(variant);
        let mut list_state = ratatui::widgets::ListState::default();
        if !table.list_factors().is_empty() {
            list_state.select(Some(0));
        }

        let mut app = Self {
            table,
            selection: Selection::new(),
            evaluation: None,
            list_state,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            colors,
        };
        app.recalculate();
        app
    }

    pub fn factors(&self) -> &[RiskFactor] {
        self.table.list_factors()
    }

    pub fn is_checked(&self, factor: &RiskFactor) -> bool {
        self.selection.contains(&factor.id)
    }

    pub fn next_row(&mut self) {
        let len = self.factors().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.factors().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected_factor(&self) -> Option<&RiskFactor> {
        self.list_state.selected().and_then(|i| self.factors().get(i))
    }

    /// Check or uncheck the factor under the cursor
    pub fn toggle_selected(&mut self) {
        let id = match self.selected_factor() {
            Some(factor) => factor.id.clone(),
            None => return,
        };
        self.selection.toggle(&id);
        self.recalculate();
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.recalculate();
        self.show_flash("Cleared all risk factors".to_string());
    }

    /// Switch between the original and revised point tables, keeping the
    /// current checkboxes.
    pub fn toggle_variant(&mut self) {
        let variant = self.table.variant().toggled();
        self.table = ScoreTable::new(variant);
        self.recalculate();
        self.show_flash(format!("Using {} point table", variant));
    }

    fn recalculate(&mut self) {
        match evaluate(&self.table, &self.selection) {
            Ok(evaluation) => {
                log::debug!(
                    "Score {} -> {} ({})",
                    evaluation.score,
                    evaluation.category,
                    evaluation.probability
                );
                self.evaluation = Some(evaluation);
            }
            Err(e) => {
                log::warn!("Evaluation failed: {}", e);
                self.evaluation = None;
                self.show_flash(format!("Error: {}", e));
            }
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
