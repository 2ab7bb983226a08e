pub mod board_view;
pub mod demo_view;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod inline_tips;
pub mod session_bar;
pub mod status_row;
pub mod tip_popover;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::model::DemoMode;
use crate::rules::Anchor;

use super::app::App;

/// Screen regions a popover can point at
#[derive(Debug, Clone, Copy)]
pub struct AnchorRects {
    pub header: Rect,
    pub tasks: Rect,
    pub session: Rect,
}

impl AnchorRects {
    pub fn get(&self, anchor: Anchor) -> Rect {
        match anchor {
            Anchor::Header => self.header,
            Anchor::Tasks => self.tasks,
            Anchor::Session => self.session,
        }
    }
}

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let anchors = match app.demo {
        DemoMode::Board => render_board_layout(frame, app, area),
        DemoMode::Single => render_demo_layout(frame, app, area),
    };

    // Popover (rendered on top of content)
    if let Some(tip) = app.tips.visible_popover() {
        tip_popover::render_tip_popover(frame, app, tip, &anchors, area);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// Layout: header (2) | inline tips | tasks | session bar (3) | status (1)
fn render_board_layout(frame: &mut Frame, app: &App, area: Rect) -> AnchorRects {
    let inline = app.tips.visible_inline();
    let tips_height = inline_tips::inline_tips_height(&inline, area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(tips_height),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    inline_tips::render_inline_tips(frame, app, &inline, chunks[1]);
    board_view::render_board_view(frame, app, chunks[2]);
    session_bar::render_session_bar(frame, app, chunks[3]);
    status_row::render_status_row(frame, app, chunks[4]);

    AnchorRects {
        header: chunks[0],
        tasks: chunks[2],
        session: chunks[3],
    }
}

/// Layout: header (2) | demo body | status (1)
fn render_demo_layout(frame: &mut Frame, app: &App, area: Rect) -> AnchorRects {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    demo_view::render_demo_view(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    AnchorRects {
        header: chunks[0],
        tasks: chunks[1],
        session: chunks[1],
    }
}
