use std::fmt;

use serde::Serialize;

use crate::model::session::SessionState;
use crate::model::task::{Task, TaskId};
use crate::rules::input::{RuleInput, Variable};

/// User actions on the board, one per store mutator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoardAction {
    AddTask,
    ToggleTask,
    SetActiveTask,
    StartPauseSession,
    ResetBoard,
    CompleteDemoTask,
    ResetTipDemo,
}

type Observer = Box<dyn FnMut(&RuleInput)>;

/// The single writable source of truth for board state.
///
/// Every mutator is total. After any change the rule snapshot is rebuilt and
/// observers are called before the mutator returns.
pub struct Board {
    tasks: Vec<Task>,
    active_task: Option<TaskId>,
    session: SessionState,
    next_id: u64,
    /// Single-task demo: how many times the demo button was pressed
    demo_completed: u32,
    completed_first_task: bool,
    snapshot: RuleInput,
    observers: Vec<Observer>,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("tasks", &self.tasks)
            .field("active_task", &self.active_task)
            .field("session", &self.session)
            .field("demo_completed", &self.demo_completed)
            .field("completed_first_task", &self.completed_first_task)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(SessionState::default().session_length)
    }
}

impl Board {
    pub fn new(session_length: u32) -> Self {
        let mut board = Board {
            tasks: Vec::new(),
            active_task: None,
            session: SessionState::new(session_length),
            next_id: 1,
            demo_completed: 0,
            completed_first_task: false,
            snapshot: RuleInput::new(),
            observers: Vec::new(),
        };
        board.snapshot = board.build_snapshot();
        board
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.active_task.and_then(|id| self.task(id))
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed).count()
    }

    pub fn demo_completed(&self) -> u32 {
        self.demo_completed
    }

    /// Latest rule snapshot; never older than the last mutation
    pub fn rule_input(&self) -> &RuleInput {
        &self.snapshot
    }

    /// Register a callback run after every mutation
    pub fn subscribe(&mut self, observer: impl FnMut(&RuleInput) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Append an open task. A blank title gets a generated sample title.
    /// The first task added becomes the active one.
    pub fn add_task(&mut self, title: &str) {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let title = match title.trim() {
            "" => format!("Sample task {}", id.0),
            t => t.to_string(),
        };
        self.tasks.push(Task::new(id, title));
        if self.active_task.is_none() {
            self.active_task = Some(id);
        }
        tracing::debug!(%id, "task added");
        self.publish();
    }

    /// Flip completion. Unknown ids are ignored.
    pub fn toggle_completion(&mut self, id: TaskId) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        task.is_completed = !task.is_completed;
        tracing::debug!(%id, completed = task.is_completed, "task toggled");
        self.publish();
    }

    /// Choose the task a focus session works on. Unknown ids are ignored.
    pub fn set_active_task(&mut self, id: TaskId) {
        if self.task(id).is_none() || self.active_task == Some(id) {
            return;
        }
        self.active_task = Some(id);
        self.publish();
    }

    pub fn start_pause_session(&mut self) {
        self.session.is_running = !self.session.is_running;
        tracing::debug!(running = self.session.is_running, "session toggled");
        self.publish();
    }

    /// Advance the countdown by one second. Ends the session when the
    /// countdown reaches zero.
    pub fn tick(&mut self) {
        if !self.session.is_running {
            return;
        }
        self.session.seconds_remaining = self.session.seconds_remaining.saturating_sub(1);
        if self.session.seconds_remaining == 0 {
            self.finish_session();
        }
        self.publish();
    }

    /// Complete the active task and reset the timer
    pub fn end_session(&mut self) {
        self.finish_session();
        self.publish();
    }

    /// Remove every task and reset the timer
    pub fn reset_board(&mut self) {
        let idle = SessionState::new(self.session.session_length);
        if self.tasks.is_empty() && self.active_task.is_none() && self.session == idle {
            return;
        }
        self.tasks.clear();
        self.active_task = None;
        self.session.reset();
        tracing::debug!("board reset");
        self.publish();
    }

    pub fn complete_demo_task(&mut self) {
        self.demo_completed += 1;
        self.completed_first_task = true;
        self.publish();
    }

    pub fn reset_demo(&mut self) {
        if self.demo_completed == 0 && !self.completed_first_task {
            return;
        }
        self.demo_completed = 0;
        self.completed_first_task = false;
        self.publish();
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn finish_session(&mut self) {
        if let Some(id) = self.active_task
            && let Some(task) = self.tasks.iter_mut().find(|t| t.id == id)
        {
            task.is_completed = true;
        }
        tracing::info!(task = ?self.active_task, "focus session ended");
        self.session.reset();
    }

    fn build_snapshot(&self) -> RuleInput {
        RuleInput::new()
            .with(Variable::TaskCount, self.task_count())
            .with(Variable::CompletedTaskCount, self.completed_count())
            .with(Variable::IsSessionRunning, self.session.is_running)
            .with(Variable::CompletedFirstTask, self.completed_first_task)
    }

    fn publish(&mut self) {
        self.snapshot = self.build_snapshot();
        for observer in &mut self.observers {
            observer(&self.snapshot);
        }
    }
}
