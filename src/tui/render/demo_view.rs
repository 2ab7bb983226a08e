use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Single-task demo: a completion counter and two buttons, centered
pub fn render_demo_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let button = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled(
            format!("Completed Demo Tasks: {}", app.board.demo_completed()),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
        Line::from(Span::styled("[c] Complete Demo Task", button)),
        Line::from(""),
        Line::from(Span::styled(
            "[T] Reset Tip Demo",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];

    let height = (lines.len() as u16).min(area.height);
    let body = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(height) / 2,
        area.width,
        height,
    );
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DemoMode;
    use crate::ops::board::BoardAction;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn counter_tracks_completions() {
        let mut app = app_for(DemoMode::Single);
        app.perform(BoardAction::CompleteDemoTask);
        app.perform(BoardAction::CompleteDemoTask);
        let output = render_to_string(TERM_W, 9, |frame, area| {
            render_demo_view(frame, &app, area)
        });
        let lines: Vec<&str> = output.lines().map(str::trim).collect();
        assert_eq!(lines[2], "Completed Demo Tasks: 2");
        assert_eq!(lines[4], "[c] Complete Demo Task");
        assert_eq!(lines[6], "[T] Reset Tip Demo");
    }
}
