use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::helpers::spans_width;

/// Render the task list, keeping the cursor row in view
pub fn render_board_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let tasks = app.board.tasks();

    if tasks.is_empty() {
        let hint = Line::from(Span::styled(
            " No tasks yet. Press a to add a sample task.",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(hint).style(Style::default().bg(bg)), area);
        return;
    }

    let visible = area.height as usize;
    let scroll = (app.cursor + 1).saturating_sub(visible);
    let active_id = app.board.active_task().map(|t| t.id);

    let lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible)
        .map(|(i, task)| {
            let selected = i == app.cursor;
            let row_bg = if selected { app.theme.selection_bg } else { bg };
            let marker = if selected { "\u{25B8} " } else { "  " };
            let check_color = if task.is_completed {
                app.theme.green
            } else {
                app.theme.text
            };
            let mut title_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
            if task.is_completed {
                title_style = title_style
                    .fg(app.theme.dim)
                    .add_modifier(Modifier::CROSSED_OUT);
            }

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
                Span::styled(task.checkbox(), Style::default().fg(check_color).bg(row_bg)),
                Span::styled(
                    format!(" {:<5} ", task.id.to_string()),
                    Style::default().fg(app.theme.dim).bg(row_bg),
                ),
            ];
            let suffix = if active_id == Some(task.id) {
                " \u{25CF} focus"
            } else {
                ""
            };
            let room = width.saturating_sub(spans_width(&spans) + suffix.chars().count());
            spans.push(Span::styled(truncate_to_width(&task.title, room), title_style));
            if !suffix.is_empty() {
                spans.push(Span::styled(
                    suffix,
                    Style::default().fg(app.theme.cyan).bg(row_bg),
                ));
            }

            // Pad the selected row so the highlight spans the width
            let used = spans_width(&spans);
            if selected && used < width {
                spans.push(Span::styled(
                    " ".repeat(width - used),
                    Style::default().bg(row_bg),
                ));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
