use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::DemoMode;
use crate::tui::app::App;

use super::helpers::spans_width;

/// Title on the left, board counts on the right, separator below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let title = match app.demo {
        DemoMode::Board => " tipboard",
        DemoMode::Single => " Tip Demo",
    };
    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];

    let summary = match app.demo {
        DemoMode::Board => format!(
            "{} tasks \u{00B7} {} done ",
            app.board.task_count(),
            app.board.completed_count()
        ),
        DemoMode::Single => String::new(),
    };
    let used = spans_width(&spans) + summary.chars().count();
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            summary,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let separator = Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    );

    let paragraph =
        Paragraph::new(vec![Line::from(spans), Line::from(separator)]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::board::BoardAction;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn header_counts() {
        let mut app = app_for(DemoMode::Board);
        app.perform(BoardAction::AddTask);
        app.perform(BoardAction::ToggleTask);
        let output = render_to_string(40, 2, |frame, area| render_header(frame, &app, area));
        let first = output.lines().next().unwrap();
        assert!(first.starts_with(" tipboard"));
        assert!(first.ends_with("1 tasks \u{00B7} 1 done"));
    }
}
