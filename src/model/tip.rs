use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Every tip the board knows about, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TipId {
    AddTask,
    CompleteTask,
    FocusSession,
    ResetBoard,
    Streak,
    CompleteFirstTask,
}

impl TipId {
    pub const ALL: [TipId; 6] = [
        TipId::AddTask,
        TipId::CompleteTask,
        TipId::FocusSession,
        TipId::ResetBoard,
        TipId::Streak,
        TipId::CompleteFirstTask,
    ];

    /// Stable key used in the datastore and config
    pub fn as_str(self) -> &'static str {
        match self {
            TipId::AddTask => "add-task",
            TipId::CompleteTask => "complete-task",
            TipId::FocusSession => "focus-session",
            TipId::ResetBoard => "reset-board",
            TipId::Streak => "streak",
            TipId::CompleteFirstTask => "complete-first-task",
        }
    }
}

impl fmt::Display for TipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TipId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown tip '{}'", s))
    }
}

/// Why a tip stopped being offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidationReason {
    /// The user closed the tip
    TipClosed,
    /// The user did the thing the tip suggested
    ActionPerformed,
    /// The tip reached its configured display limit
    DisplayCountExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invalidation {
    pub reason: InvalidationReason,
    pub at: DateTime<Utc>,
}

/// Persisted display history for one tip
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipDisplayRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_shown_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_shown_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub display_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalidation: Option<Invalidation>,
}

impl TipDisplayRecord {
    /// True once the tip was dismissed or acted upon
    pub fn already_shown(&self) -> bool {
        self.invalidation.is_some()
    }
}

/// How often a new tip may appear after another one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFrequency {
    #[default]
    Immediate,
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

impl DisplayFrequency {
    /// Minimum gap between two tips first appearing
    pub fn interval(self) -> Duration {
        match self {
            DisplayFrequency::Immediate => Duration::zero(),
            DisplayFrequency::Hourly => Duration::hours(1),
            DisplayFrequency::Daily => Duration::days(1),
            DisplayFrequency::Weekly => Duration::weeks(1),
            DisplayFrequency::Monthly => Duration::days(30),
        }
    }
}
