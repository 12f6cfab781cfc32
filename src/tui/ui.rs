use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Clear, List, ListItem, Paragraph};
use crate::output::style_for;
use crate::scoring::format_probability;
use crate::tui::app::{App, InputMode};

const TITLE: &str = "ICH Risk Score Calculator for AMI-CS";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 14 || area.width < 50 {
        let msg = Paragraph::new("Terminal too small")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),  // Title bar
        Constraint::Fill(1),    // Checklist | result + chart
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    let body = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .split(chunks[1]);

    let right = Layout::vertical([
        Constraint::Length(6),  // Result
        Constraint::Fill(1),    // Chart
    ])
    .split(body[1]);

    render_title(frame, chunks[0], app);
    render_checklist(frame, body[0], app);
    render_result(frame, right[0], app);
    render_chart(frame, right[1], app);
    render_status_bar(frame, chunks[2], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let variant_text = format!("{} table", app.table.variant());
    let padding_len = (area.width as usize).saturating_sub(TITLE.len() + variant_text.len());

    let title = Line::from(vec![
        Span::styled(TITLE, Style::default().fg(app.colors.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(variant_text, Style::default().fg(app.colors.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_checklist(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = &app.colors;
    let items: Vec<ListItem> = app
        .factors()
        .iter()
        .map(|factor| {
            let (mark, mark_color) = if app.is_checked(factor) {
                ("[x] ", colors.checked)
            } else {
                ("[ ] ", colors.unchecked)
            };
            let unit = if factor.points == 1 { "pt " } else { "pts" };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(mark_color).bold()),
                Span::raw(factor.name.clone()),
                Span::styled(
                    format!("  +{} {}", factor.points, unit),
                    Style::default().fg(colors.points_color),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(" Risk Factors Present "))
        .highlight_style(colors.row_selected)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered().title(" Results ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(eval) = &app.evaluation else {
        let msg = Paragraph::new("No result")
            .style(Style::default().fg(app.colors.error));
        frame.render_widget(msg, inner);
        return;
    };

    let color = app.colors.style_color(style_for(eval.category));
    let bar_width = (inner.width as usize).saturating_sub(2).min(30);

    let mut bar_line = score_bar(eval.score, eval.max_score, bar_width, color, app.colors.bar_inactive);
    bar_line.spans.push(Span::styled(
        format!(" {}/{}", eval.score, eval.max_score),
        Style::default().fg(app.colors.muted),
    ));

    let lines = vec![
        Line::from(vec![
            Span::styled("Total Score: ", app.colors.header_style),
            Span::styled(eval.score.to_string(), app.colors.header_style),
        ]),
        Line::from(Span::styled(eval.message(), Style::default().fg(color).bold())),
        bar_line,
        Line::from(Span::styled(
            format!("{} of {} factors selected", eval.breakdown.len(), app.factors().len()),
            Style::default().fg(app.colors.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn score_bar(score: u32, max_score: u32, width: usize, filled_color: Color, empty_color: Color) -> Line<'static> {
    let ratio = if max_score > 0 {
        (score as f64 / max_score as f64).min(1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(filled_color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(empty_color)));
    }

    Line::from(spans)
}

fn render_chart(frame: &mut Frame, area: Rect, app: &App) {
    let rows = app.table.chart_rows();
    let active = app.evaluation.as_ref().map(|e| e.category);

    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            let color = if Some(row.category) == active {
                app.colors.style_color(style_for(row.category))
            } else {
                app.colors.bar_inactive
            };
            Bar::default()
                .value((row.probability_percent * 100.0).round() as u64)
                .label(Line::from(row.range_label.clone()))
                .text_value(format_probability(row.probability_percent))
                .style(Style::default().fg(color))
        })
        .collect();

    // Fit four bars with one-column gaps inside the border
    let inner_width = area.width.saturating_sub(2);
    let count = rows.len().max(1) as u16;
    let bar_width = (inner_width.saturating_sub(count - 1) / count).clamp(3, 9);

    let chart = BarChart::default()
        .block(Block::bordered().title(" Estimated ICH Risk by Score Range "))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);

    frame.render_widget(chart, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Error") {
            app.colors.error
        } else {
            app.colors.flash_color
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints = [
            ("j/k", ":nav "),
            ("Space", ":toggle "),
            ("c", ":clear "),
            ("v", ":variant "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(app.colors.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(app.colors.status_bar_bg)),
        area
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 13, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", app.colors.popup_title))
        .border_style(Style::default().fg(app.colors.popup_border))
        .style(Style::default().bg(app.colors.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(app.colors.status_key_color).bold();
    let shortcuts = [
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("Space / Enter ", "Toggle risk factor"),
        ("c             ", "Clear all factors"),
        ("v             ", "Switch original/revised table"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = shortcuts
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.colors.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
