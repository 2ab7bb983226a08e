use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::cli::handlers::open_presenter;
use crate::model::{DemoMode, DisplayFrequency, RunOptions, TaskId, TipsConfig};
use crate::ops::board::{Board, BoardAction};
use crate::rules::TipPresenter;

use super::input;
use super::render;
use super::theme::Theme;

const TICK_RATE: Duration = Duration::from_secs(1);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing the title of a new task
    AddTask,
}

/// Main application state
pub struct App {
    pub board: Board,
    pub tips: TipPresenter,
    pub demo: DemoMode,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Help overlay visible
    pub show_help: bool,
    /// Cursor index into the task list
    pub cursor: usize,
    /// Title being typed in AddTask mode
    pub title_input: String,
    /// One-shot message for the status row
    pub status: Option<String>,
    /// Options reapplied after a tip datastore reset
    tips_config: TipsConfig,
}

impl App {
    /// Build the app and run the first tip evaluation. `tips` is configured
    /// here; a configuration failure is logged and ignored.
    pub fn new(mut board: Board, mut tips: TipPresenter, options: &RunOptions) -> Self {
        board.subscribe(|input| tracing::trace!(%input, "rule input updated"));

        let tips_config = options.config.tips.clone();
        if let Err(e) = tips.configure(tips_config.clone()) {
            tracing::warn!(error = %e, "tip configuration failed");
        }

        let mut app = App {
            board,
            tips,
            demo: options.demo,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&options.config.ui),
            show_key_hints: options.config.ui.show_key_hints,
            show_help: false,
            cursor: 0,
            title_input: String::new(),
            status: None,
            tips_config,
        };
        app.sync_tips();
        app
    }

    /// Id of the task under the cursor
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.board.tasks().get(self.cursor).map(|t| t.id)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.board.task_count();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(count - 1);
    }

    /// Run one user action against the board, then re-evaluate tips.
    ///
    /// A visible tip that suggested this action is suppressed before the
    /// board changes.
    pub fn perform(&mut self, action: BoardAction) {
        if !self.can_perform(action) {
            return;
        }
        self.tips.action_performed(action);

        match action {
            BoardAction::AddTask => {
                let title = std::mem::take(&mut self.title_input);
                self.board.add_task(&title);
                self.cursor = self.board.task_count().saturating_sub(1);
            }
            BoardAction::ToggleTask => {
                if let Some(id) = self.selected_task_id() {
                    self.board.toggle_completion(id);
                }
            }
            BoardAction::SetActiveTask => {
                if let Some(id) = self.selected_task_id() {
                    self.board.set_active_task(id);
                }
            }
            BoardAction::StartPauseSession => self.board.start_pause_session(),
            BoardAction::ResetBoard => {
                self.board.reset_board();
                self.cursor = 0;
                self.status = Some("board reset".into());
            }
            BoardAction::CompleteDemoTask => self.board.complete_demo_task(),
            BoardAction::ResetTipDemo => self.reset_tip_demo(),
        }

        self.sync_tips();
    }

    /// Actions that need a selected task are ignored on an empty board
    fn can_perform(&self, action: BoardAction) -> bool {
        match action {
            BoardAction::ToggleTask | BoardAction::SetActiveTask => {
                self.selected_task_id().is_some()
            }
            BoardAction::CompleteDemoTask => self.demo == DemoMode::Single,
            _ => true,
        }
    }

    /// Clear tip history and re-arm every tip. Best effort: failures are
    /// logged and the demo continues as if the reset worked.
    fn reset_tip_demo(&mut self) {
        self.board.reset_demo();
        if let Err(e) = self.tips.reset_datastore() {
            tracing::warn!(error = %e, "unable to reset tip demo");
        }
        let config = TipsConfig {
            display_frequency: DisplayFrequency::Immediate,
            ..self.tips_config.clone()
        };
        if let Err(e) = self.tips.configure(config) {
            tracing::warn!(error = %e, "tip configuration failed");
        }
        self.status = Some("tips reset".into());
    }

    /// Dismiss the visible popover, if any
    pub fn dismiss_popover(&mut self) {
        if let Some(tip) = self.tips.visible_popover() {
            self.tips.dismiss(tip.id);
            self.sync_tips();
        }
    }

    /// Dismiss every visible inline tip
    pub fn dismiss_inline(&mut self) {
        let ids: Vec<_> = self.tips.visible_inline().iter().map(|t| t.id).collect();
        if ids.is_empty() {
            return;
        }
        for id in ids {
            self.tips.dismiss(id);
        }
        self.sync_tips();
    }

    /// One second of wall time passed
    pub fn on_tick(&mut self) {
        if self.board.session().is_running {
            self.board.tick();
            self.sync_tips();
        }
    }

    fn sync_tips(&mut self) {
        self.tips.sync(self.board.rule_input());
    }
}

/// Run the TUI application
pub fn run(options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let board = Board::new(options.config.session.length_secs);
    let tips = open_presenter(&options);
    let mut app = App::new(board, tips, &options);
    tracing::info!(demo = ?options.demo, "starting tipboard");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("tipboard exited");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::tip_store::MemoryTipStore;
    use crate::model::{BoardConfig, TipId};
    use crate::rules::{RuleEngine, TipState};
    use std::path::PathBuf;

    fn options(demo: DemoMode) -> RunOptions {
        RunOptions {
            data_dir: PathBuf::from("/tmp/tipboard-test"),
            config: BoardConfig::default(),
            ephemeral: true,
            demo,
        }
    }

    fn app(demo: DemoMode) -> App {
        let opts = options(demo);
        let tips = TipPresenter::new(RuleEngine::for_demo(demo), Box::new(MemoryTipStore::new()));
        App::new(Board::new(3), tips, &opts)
    }

    #[test]
    fn startup_shows_add_task_popover() {
        let app = app(DemoMode::Board);
        assert_eq!(app.tips.visible_popover().map(|t| t.id), Some(TipId::AddTask));
    }

    #[test]
    fn adding_a_task_acts_on_the_tip() {
        let mut app = app(DemoMode::Board);
        app.perform(BoardAction::AddTask);
        assert_eq!(app.tips.state(TipId::AddTask), TipState::Suppressed);
        assert_eq!(app.tips.state(TipId::CompleteTask), TipState::Shown);

        // Empty board again: the add-task tip stays away
        app.perform(BoardAction::ResetBoard);
        assert!(!app.tips.should_display(TipId::AddTask));
    }

    #[test]
    fn toggle_needs_a_task() {
        let mut app = app(DemoMode::Board);
        app.perform(BoardAction::ToggleTask);
        assert_eq!(app.board.completed_count(), 0);
    }

    #[test]
    fn progressive_tips() {
        let mut app = app(DemoMode::Board);
        for _ in 0..3 {
            app.perform(BoardAction::AddTask);
        }
        let inline: Vec<TipId> = app.tips.visible_inline().iter().map(|t| t.id).collect();
        assert_eq!(inline, vec![TipId::CompleteTask, TipId::ResetBoard]);

        app.cursor = 0;
        app.perform(BoardAction::ToggleTask);
        app.cursor = 1;
        app.perform(BoardAction::ToggleTask);
        assert_eq!(app.board.completed_count(), 2);
        assert!(app.tips.should_display(TipId::Streak));
        assert_eq!(
            app.tips.visible_popover().map(|t| t.id),
            Some(TipId::FocusSession)
        );
    }

    #[test]
    fn session_runs_to_completion_on_ticks() {
        let mut app = app(DemoMode::Board);
        app.perform(BoardAction::AddTask);
        app.perform(BoardAction::StartPauseSession);
        app.on_tick();
        app.on_tick();
        assert!(!app.board.tasks()[0].is_completed);
        app.on_tick();
        assert!(app.board.tasks()[0].is_completed);
        assert!(!app.board.session().is_running);
        // Completed a task while no session runs
        assert!(app.tips.should_display(TipId::FocusSession));
    }

    #[test]
    fn reset_tip_demo_rearms_tips() {
        let mut app = app(DemoMode::Board);
        app.dismiss_popover();
        assert!(app.tips.already_shown(TipId::AddTask));
        app.perform(BoardAction::ResetTipDemo);
        assert!(app.tips.should_display(TipId::AddTask));
        assert_eq!(app.status.as_deref(), Some("tips reset"));
    }

    #[test]
    fn single_task_demo() {
        let mut app = app(DemoMode::Single);
        assert_eq!(
            app.tips.visible_popover().map(|t| t.id),
            Some(TipId::CompleteFirstTask)
        );
        app.perform(BoardAction::CompleteDemoTask);
        assert_eq!(app.board.demo_completed(), 1);
        assert!(app.tips.visible_popover().is_none());

        app.perform(BoardAction::ResetTipDemo);
        assert_eq!(app.board.demo_completed(), 0);
        assert_eq!(
            app.tips.visible_popover().map(|t| t.id),
            Some(TipId::CompleteFirstTask)
        );
    }

    #[test]
    fn demo_button_ignored_on_board() {
        let mut app = app(DemoMode::Board);
        app.perform(BoardAction::CompleteDemoTask);
        assert_eq!(app.board.demo_completed(), 0);
    }

    #[test]
    fn cursor_is_clamped() {
        let mut app = app(DemoMode::Board);
        app.move_cursor(1);
        assert_eq!(app.cursor, 0);
        app.perform(BoardAction::AddTask);
        app.perform(BoardAction::AddTask);
        app.move_cursor(-5);
        assert_eq!(app.cursor, 0);
        app.move_cursor(9);
        assert_eq!(app.cursor, 1);
    }
}
