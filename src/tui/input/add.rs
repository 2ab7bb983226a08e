use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::board::BoardAction;
use crate::tui::app::{App, Mode};

/// Typing a task title. Enter adds (a blank title gets a sample title),
/// Esc cancels.
pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.title_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            app.mode = Mode::Navigate;
            app.perform(BoardAction::AddTask);
        }
        KeyCode::Backspace => {
            app.title_input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.title_input.push(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::model::DemoMode;
    use crate::tui::app::Mode;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::{ch, key};
    use crate::tui::render::test_helpers::app_for;
    use crossterm::event::KeyCode;

    #[test]
    fn typed_title_is_added() {
        let mut app = app_for(DemoMode::Board);
        handle_key(&mut app, ch('A'));
        for c in "Plan sprintt".chars() {
            handle_key(&mut app, ch(c));
        }
        handle_key(&mut app, key(KeyCode::Backspace));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.board.tasks()[0].title, "Plan sprint");
        assert!(app.title_input.is_empty());
    }

    #[test]
    fn escape_cancels() {
        let mut app = app_for(DemoMode::Board);
        handle_key(&mut app, ch('A'));
        handle_key(&mut app, ch('x'));
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.board.task_count(), 0);
    }
}
