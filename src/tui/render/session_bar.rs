use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::helpers::spans_width;

/// Render the focus session bar: state, countdown, target task, progress
pub fn render_session_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let session = app.board.session();

    let (state_label, state_color) = if session.is_running {
        ("\u{25B6} running", app.theme.green)
    } else {
        ("\u{25A0} paused ", app.theme.yellow)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            " Focus session ",
            Style::default().fg(app.theme.text).bg(bg),
        ))
        .style(Style::default().bg(bg));
    let inner_w = area.width.saturating_sub(2) as usize;

    let mut spans = vec![
        Span::styled(
            format!(" {} ", state_label),
            Style::default().fg(state_color).bg(bg),
        ),
        Span::styled(
            session.remaining_label(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default().bg(bg)),
    ];

    let target = app
        .board
        .active_task()
        .map_or("no active task", |t| t.title.as_str());
    let target = truncate_to_width(target, inner_w.saturating_sub(spans_width(&spans)) / 2);
    spans.push(Span::styled(
        target,
        Style::default().fg(app.theme.text).bg(bg),
    ));
    spans.push(Span::styled("  ", Style::default().bg(bg)));

    // Progress bar fills whatever is left
    let bar_w = inner_w.saturating_sub(spans_width(&spans) + 1);
    let filled = (session.progress() * bar_w as f64).round() as usize;
    spans.push(Span::styled(
        "\u{2588}".repeat(filled),
        Style::default().fg(app.theme.highlight).bg(bg),
    ));
    spans.push(Span::styled(
        "\u{2591}".repeat(bar_w - filled.min(bar_w)),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
