use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::rules::{Anchor, Presentation, TipDefinition};
use crate::tui::app::App;
use crate::util::unicode::wrap_words;

use super::AnchorRects;

const POPOVER_W: u16 = 40;

/// Which side of its anchor a popover sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Below,
    /// Just inside the top of the anchor
    Within,
    Above,
}

fn side_for(anchor: Anchor) -> Side {
    match anchor {
        Anchor::Header => Side::Below,
        Anchor::Tasks => Side::Within,
        Anchor::Session => Side::Above,
    }
}

/// Place a popover of `width` x `height` next to `target`, right aligned and
/// kept inside `area`.
fn place(target: Rect, side: Side, width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = target
        .right()
        .saturating_sub(width + 1)
        .max(area.x)
        .min(area.right().saturating_sub(width));
    let y = match side {
        // Leave the first row under the anchor free
        Side::Below => target.bottom() + 1,
        Side::Within => target.y + 1,
        Side::Above => target.y.saturating_sub(height),
    };
    let y = y.max(area.y).min(area.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}

/// Render the visible popover tip pointing at its anchor
pub fn render_tip_popover(
    frame: &mut Frame,
    app: &App,
    tip: &TipDefinition,
    anchors: &AnchorRects,
    area: Rect,
) {
    let Presentation::Popover(anchor) = tip.presentation else {
        return;
    };
    let bg = app.theme.background;
    let border = app.theme.tip_border(tip.presentation);

    let width = POPOVER_W.min(area.width.saturating_sub(2));
    if width < 8 {
        return;
    }
    let text_w = width.saturating_sub(4) as usize;
    let message = wrap_words(tip.message, text_w);
    // borders + title + message + hint
    let height = message.len() as u16 + 4;

    let side = side_for(anchor);
    let rect = place(anchors.get(anchor), side, width, height, area);
    if rect.height < 3 {
        return;
    }

    frame.render_widget(Clear, rect);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {} ", tip.icon.glyph()), Style::default().fg(border).bg(bg)),
        Span::styled(
            tip.title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ])];
    for text in message {
        lines.push(Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(app.theme.text).bg(bg),
        )));
    }
    lines.push(
        Line::from(Span::styled(
            "d dismiss ",
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .alignment(Alignment::Right),
    );

    let arrow_style = Style::default().fg(border).bg(bg);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    block = match side {
        Side::Below | Side::Within => {
            block.title_top(Line::from(Span::styled("\u{25B2}", arrow_style)).right_aligned())
        }
        Side::Above => {
            block.title_bottom(Line::from(Span::styled("\u{25BC}", arrow_style)).right_aligned())
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, rect);
}
