//! The built-in tips and their eligibility rules.

use crate::model::{DemoMode, TipId};
use crate::ops::board::BoardAction;

use super::engine::{Anchor, Icon, Predicate, Presentation, TipDefinition};
use super::input::Variable;

const TASK_COUNT_IS_ZERO: Predicate = Predicate {
    variable: Variable::TaskCount,
    label: "taskCount == 0",
    test: |v| v.as_int() == Some(0),
};

const TASK_COUNT_POSITIVE: Predicate = Predicate {
    variable: Variable::TaskCount,
    label: "taskCount > 0",
    test: |v| v.as_int().is_some_and(|n| n > 0),
};

const TASK_COUNT_AT_LEAST_THREE: Predicate = Predicate {
    variable: Variable::TaskCount,
    label: "taskCount >= 3",
    test: |v| v.as_int().is_some_and(|n| n >= 3),
};

const NOTHING_COMPLETED: Predicate = Predicate {
    variable: Variable::CompletedTaskCount,
    label: "completedTaskCount == 0",
    test: |v| v.as_int() == Some(0),
};

const SOMETHING_COMPLETED: Predicate = Predicate {
    variable: Variable::CompletedTaskCount,
    label: "completedTaskCount > 0",
    test: |v| v.as_int().is_some_and(|n| n > 0),
};

const TWO_COMPLETED: Predicate = Predicate {
    variable: Variable::CompletedTaskCount,
    label: "completedTaskCount >= 2",
    test: |v| v.as_int().is_some_and(|n| n >= 2),
};

const SESSION_IDLE: Predicate = Predicate {
    variable: Variable::IsSessionRunning,
    label: "isSessionRunning == false",
    test: |v| v.as_bool() == Some(false),
};

const FIRST_TASK_PENDING: Predicate = Predicate {
    variable: Variable::CompletedFirstTask,
    label: "completedFirstTask == false",
    test: |v| v.as_bool() == Some(false),
};

pub static CATALOG: [TipDefinition; 6] = [
    TipDefinition {
        id: TipId::AddTask,
        title: "Seed your board",
        message: "Start by adding a sample task. More contextual tips appear as you progress.",
        icon: Icon::Plus,
        rules: &[TASK_COUNT_IS_ZERO],
        presentation: Presentation::Popover(Anchor::Header),
        action: Some(BoardAction::AddTask),
    },
    TipDefinition {
        id: TipId::CompleteTask,
        title: "Complete your first task",
        message: "Select a task and mark it done to unlock focus-session guidance.",
        icon: Icon::CheckmarkSeal,
        rules: &[TASK_COUNT_POSITIVE, NOTHING_COMPLETED],
        presentation: Presentation::Inline,
        action: Some(BoardAction::ToggleTask),
    },
    TipDefinition {
        id: TipId::FocusSession,
        title: "Start a focus sprint",
        message: "Use the timer to run a focused sprint on your active task.",
        icon: Icon::Timer,
        rules: &[SOMETHING_COMPLETED, SESSION_IDLE],
        presentation: Presentation::Popover(Anchor::Session),
        action: Some(BoardAction::StartPauseSession),
    },
    TipDefinition {
        id: TipId::ResetBoard,
        title: "Keep your board tidy",
        message: "After a few tasks, reset the board and start a fresh cycle.",
        icon: Icon::CounterClockwise,
        rules: &[TASK_COUNT_AT_LEAST_THREE],
        presentation: Presentation::Inline,
        action: Some(BoardAction::ResetBoard),
    },
    TipDefinition {
        id: TipId::Streak,
        title: "Streak unlocked",
        message: "Two tasks complete. Keep momentum with a focus sprint.",
        icon: Icon::Sparkles,
        rules: &[TWO_COMPLETED],
        presentation: Presentation::Inline,
        action: None,
    },
    TipDefinition {
        id: TipId::CompleteFirstTask,
        title: "Complete your first task",
        message: "Press the button to complete a demo task.",
        icon: Icon::Checkmark,
        rules: &[FIRST_TASK_PENDING],
        presentation: Presentation::Popover(Anchor::Tasks),
        action: Some(BoardAction::CompleteDemoTask),
    },
];

/// Tips offered by each demo. The board demo uses every tip except the
/// single-task one.
pub fn tips_for(demo: DemoMode) -> &'static [TipDefinition] {
    match demo {
        DemoMode::Board => &CATALOG[..5],
        DemoMode::Single => &CATALOG[5..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demos_split_the_catalog() {
        let board: Vec<TipId> = tips_for(DemoMode::Board).iter().map(|t| t.id).collect();
        assert_eq!(board.len(), 5);
        assert!(!board.contains(&TipId::CompleteFirstTask));
        let single: Vec<TipId> = tips_for(DemoMode::Single).iter().map(|t| t.id).collect();
        assert_eq!(single, vec![TipId::CompleteFirstTask]);
    }

    #[test]
    fn catalog_covers_every_tip_once() {
        let ids: Vec<TipId> = CATALOG.iter().map(|t| t.id).collect();
        assert_eq!(ids, TipId::ALL.to_vec());
    }

    #[test]
    fn every_tip_has_rules_and_copy() {
        for tip in &CATALOG {
            assert!(!tip.rules.is_empty(), "{} has no rules", tip.id);
            assert!(!tip.title.is_empty());
            assert!(!tip.message.is_empty());
        }
    }
}
