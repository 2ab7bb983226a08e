use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::DemoMode;
use crate::ops::board::BoardAction;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('d') | KeyCode::Esc => app.dismiss_popover(),
        KeyCode::Char('D') => app.dismiss_inline(),
        KeyCode::Char('T') => app.perform(BoardAction::ResetTipDemo),
        _ => match app.demo {
            DemoMode::Board => handle_board_key(app, key),
            DemoMode::Single => handle_single_key(app, key),
        },
    }
}

fn handle_board_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),
        KeyCode::Char('a') => app.perform(BoardAction::AddTask),
        KeyCode::Char('A') => {
            app.title_input.clear();
            app.mode = Mode::AddTask;
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => app.perform(BoardAction::ToggleTask),
        KeyCode::Enter => app.perform(BoardAction::SetActiveTask),
        KeyCode::Char('s') => app.perform(BoardAction::StartPauseSession),
        KeyCode::Char('R') => app.perform(BoardAction::ResetBoard),
        _ => {}
    }
}

fn handle_single_key(app: &mut App, key: KeyEvent) {
    if let KeyCode::Char('c') | KeyCode::Enter | KeyCode::Char(' ') = key.code {
        app.perform(BoardAction::CompleteDemoTask);
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{DemoMode, TipId};
    use crate::tui::app::Mode;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::{ch, key};
    use crate::tui::render::test_helpers::app_for;
    use crossterm::event::KeyCode;

    #[test]
    fn board_keys_drive_the_store() {
        let mut app = app_for(DemoMode::Board);
        handle_key(&mut app, ch('a'));
        handle_key(&mut app, ch('a'));
        assert_eq!(app.board.task_count(), 2);
        assert_eq!(app.cursor, 1);

        handle_key(&mut app, ch('k'));
        handle_key(&mut app, ch(' '));
        assert!(app.board.tasks()[0].is_completed);

        handle_key(&mut app, ch('j'));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.board.active_task().map(|t| t.title.as_str()), Some("Sample task 2"));

        handle_key(&mut app, ch('s'));
        assert!(app.board.session().is_running);
        handle_key(&mut app, ch('s'));
        assert!(!app.board.session().is_running);

        handle_key(&mut app, ch('R'));
        assert_eq!(app.board.task_count(), 0);
    }

    #[test]
    fn dismiss_keys() {
        let mut app = app_for(DemoMode::Board);
        assert!(app.tips.should_display(TipId::AddTask));
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.tips.already_shown(TipId::AddTask));

        handle_key(&mut app, ch('a'));
        assert!(app.tips.should_display(TipId::CompleteTask));
        handle_key(&mut app, ch('D'));
        assert!(app.tips.already_shown(TipId::CompleteTask));
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app_for(DemoMode::Board);
        handle_key(&mut app, ch('?'));
        assert!(app.show_help);
        handle_key(&mut app, ch('a'));
        assert_eq!(app.board.task_count(), 0);
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn capital_a_prompts_for_title() {
        let mut app = app_for(DemoMode::Board);
        handle_key(&mut app, ch('A'));
        assert_eq!(app.mode, Mode::AddTask);
    }

    #[test]
    fn single_demo_keys() {
        let mut app = app_for(DemoMode::Single);
        handle_key(&mut app, ch('c'));
        assert_eq!(app.board.demo_completed(), 1);
        // Board keys do nothing here
        handle_key(&mut app, ch('a'));
        assert_eq!(app.board.task_count(), 0);
        handle_key(&mut app, ch('T'));
        assert_eq!(app.board.demo_completed(), 0);
    }

    #[test]
    fn quit() {
        let mut app = app_for(DemoMode::Board);
        handle_key(&mut app, ch('q'));
        assert!(app.should_quit);
    }
}
