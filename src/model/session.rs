use serde::{Deserialize, Serialize};

/// Default focus sprint length: 25 minutes
pub const DEFAULT_SESSION_LENGTH: u32 = 25 * 60;

/// Countdown state of the focus session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub is_running: bool,
    pub seconds_remaining: u32,
    /// Fixed for the lifetime of the board
    pub session_length: u32,
}

impl SessionState {
    pub fn new(session_length: u32) -> Self {
        // A zero-length session would end before it starts
        let session_length = session_length.max(1);
        SessionState {
            is_running: false,
            seconds_remaining: session_length,
            session_length,
        }
    }

    /// Stop the countdown and restore the full length
    pub fn reset(&mut self) {
        self.is_running = false;
        self.seconds_remaining = self.session_length;
    }

    /// Fraction of the session elapsed, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        let total = f64::from(self.session_length);
        (1.0 - f64::from(self.seconds_remaining) / total).clamp(0.0, 1.0)
    }

    /// `MM:SS` rendering of the remaining time
    pub fn remaining_label(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.seconds_remaining / 60,
            self.seconds_remaining % 60
        )
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new(DEFAULT_SESSION_LENGTH)
    }
}
