use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::tip_store::MemoryTipStore;
use crate::model::{BoardConfig, DemoMode, RunOptions};
use crate::ops::board::Board;
use crate::rules::{RuleEngine, TipPresenter};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Options for an in-memory run with default config
pub fn test_options(demo: DemoMode) -> RunOptions {
    RunOptions {
        data_dir: PathBuf::from("/tmp/tipboard-test"),
        config: BoardConfig::default(),
        ephemeral: true,
        demo,
    }
}

/// A fresh app with an in-memory tip store
pub fn app_for(demo: DemoMode) -> App {
    let options = test_options(demo);
    let tips = TipPresenter::new(RuleEngine::for_demo(demo), Box::new(MemoryTipStore::new()));
    App::new(
        Board::new(options.config.session.length_secs),
        tips,
        &options,
    )
}
