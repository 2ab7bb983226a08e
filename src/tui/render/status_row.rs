use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::DemoMode;
use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

use super::helpers::spans_width;

const BOARD_HINTS: &str =
    "a add  A new\u{2026}  space toggle  enter focus  s start/pause  R reset  T reset tips  d dismiss  ? help  q quit";
const DEMO_HINTS: &str = "c complete  T reset tips  d dismiss  ? help  q quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::AddTask => {
            // Title prompt: New task: title▌
            let mut spans = vec![
                Span::styled(
                    format!("New task: {}", app.title_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            let hint = "Enter add  Esc cancel";
            let content_width = spans_width(&spans);
            let hint_width = hint.chars().count();
            if content_width + hint_width < width {
                let padding = width - content_width - hint_width;
                spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
                spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
            }
            Line::from(spans)
        }
        Mode::Navigate => {
            if let Some(ref status) = app.status {
                Line::from(Span::styled(
                    status.clone(),
                    Style::default().fg(app.theme.yellow).bg(bg),
                ))
            } else if app.show_key_hints {
                let hints = match app.demo {
                    DemoMode::Board => BOARD_HINTS,
                    DemoMode::Single => DEMO_HINTS,
                };
                Line::from(Span::styled(
                    truncate_to_width(hints, width),
                    Style::default().fg(app.theme.dim).bg(bg),
                ))
            } else {
                Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
            }
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;

    fn row(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn demo_hints() {
        let app = app_for(DemoMode::Single);
        assert_snapshot!(row(&app), @"c complete  T reset tips  d dismiss  ? help  q quit");
    }

    #[test]
    fn board_hints_are_truncated() {
        let app = app_for(DemoMode::Board);
        let output = row(&app);
        assert!(output.starts_with("a add  A new"));
        assert!(output.ends_with('\u{2026}'));
    }

    #[test]
    fn status_message_wins() {
        let mut app = app_for(DemoMode::Board);
        app.status = Some("tips reset".into());
        assert_eq!(row(&app), "tips reset");
    }

    #[test]
    fn add_prompt() {
        let mut app = app_for(DemoMode::Board);
        app.mode = Mode::AddTask;
        app.title_input = "Plan".into();
        let output = row(&app);
        assert!(output.starts_with("New task: Plan\u{258C}"));
        assert!(output.ends_with("Enter add  Esc cancel"));
    }

    #[test]
    fn hints_can_be_hidden() {
        let mut app = app_for(DemoMode::Board);
        app.show_key_hints = false;
        assert_eq!(row(&app), "");
    }
}
