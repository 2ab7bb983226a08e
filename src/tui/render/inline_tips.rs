use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::rules::TipDefinition;
use crate::tui::app::App;
use crate::util::unicode::wrap_words;

/// Width available for message text inside a bordered tip
fn text_width(area_width: u16) -> usize {
    area_width.saturating_sub(4).max(1) as usize
}

/// Rows taken by one inline tip: borders plus wrapped message
fn tip_height(tip: &TipDefinition, area_width: u16) -> u16 {
    wrap_words(tip.message, text_width(area_width)).len() as u16 + 2
}

/// Total rows needed for the stacked inline tips
pub fn inline_tips_height(tips: &[&TipDefinition], area_width: u16) -> u16 {
    tips.iter().map(|t| tip_height(t, area_width)).sum()
}

/// Stack every visible inline tip, top to bottom
pub fn render_inline_tips(frame: &mut Frame, app: &App, tips: &[&TipDefinition], area: Rect) {
    let bg = app.theme.background;
    let mut y = area.y;

    for tip in tips {
        let height = tip_height(tip, area.width).min(area.bottom().saturating_sub(y));
        if height < 2 {
            break;
        }
        let rect = Rect::new(area.x, y, area.width, height);
        y += height;

        let border = app.theme.tip_border(tip.presentation);
        let title = Line::from(vec![
            Span::styled(format!(" {} ", tip.icon.glyph()), Style::default().fg(border).bg(bg)),
            Span::styled(
                format!("{} ", tip.title),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border).bg(bg))
            .title(title)
            .style(Style::default().bg(bg));

        let lines: Vec<Line> = wrap_words(tip.message, text_width(area.width))
            .into_iter()
            .map(|s| Line::from(Span::styled(format!(" {}", s), Style::default().fg(app.theme.text).bg(bg))))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), rect);
    }
}
