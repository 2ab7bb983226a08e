use serde::Serialize;

use crate::model::{DemoMode, TipId};
use crate::ops::board::BoardAction;

use super::catalog::{CATALOG, tips_for};
use super::input::{RuleInput, Value, Variable};

/// A named test on a single rule variable.
///
/// A predicate whose variable is missing from the snapshot does not hold.
#[derive(Debug, Clone, Copy)]
pub struct Predicate {
    pub variable: Variable,
    /// Human readable form, e.g. `taskCount == 0`
    pub label: &'static str,
    pub test: fn(Value) -> bool,
}

impl Predicate {
    pub fn holds(&self, input: &RuleInput) -> bool {
        input.get(self.variable).is_some_and(self.test)
    }
}

/// Where a tip is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// Floating box pointing at a part of the screen
    Popover(Anchor),
    /// Drawn in the flow of the board above the task list
    Inline,
}

/// Screen element a popover points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Header,
    Tasks,
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Plus,
    CheckmarkSeal,
    Timer,
    CounterClockwise,
    Sparkles,
    Checkmark,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Plus => "+",
            Icon::CheckmarkSeal => "\u{2714}",
            Icon::Timer => "\u{23F1}",
            Icon::CounterClockwise => "\u{21BA}",
            Icon::Sparkles => "\u{2728}",
            Icon::Checkmark => "\u{2713}",
        }
    }
}

/// Static description of a tip
#[derive(Debug, Clone, Copy)]
pub struct TipDefinition {
    pub id: TipId,
    pub title: &'static str,
    pub message: &'static str,
    pub icon: Icon,
    /// Evaluated in order; all must hold
    pub rules: &'static [Predicate],
    pub presentation: Presentation,
    /// User action that counts as following the tip
    pub action: Option<BoardAction>,
}

impl TipDefinition {
    pub fn is_popover(&self) -> bool {
        matches!(self.presentation, Presentation::Popover(_))
    }
}

/// Outcome of one predicate, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredicateResult {
    pub label: &'static str,
    pub holds: bool,
}

/// Evaluates tip rules against a snapshot. Holds no state besides the
/// definitions, so results depend only on the input.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine {
    tips: &'static [TipDefinition],
}

impl Default for RuleEngine {
    fn default() -> Self {
        RuleEngine::new(&CATALOG)
    }
}

impl RuleEngine {
    pub fn new(tips: &'static [TipDefinition]) -> Self {
        RuleEngine { tips }
    }

    /// Engine over the tips of one demo
    pub fn for_demo(demo: DemoMode) -> Self {
        RuleEngine::new(tips_for(demo))
    }

    pub fn tips(&self) -> &'static [TipDefinition] {
        self.tips
    }

    pub fn definition(&self, id: TipId) -> Option<&'static TipDefinition> {
        self.tips.iter().find(|t| t.id == id)
    }

    /// True when every predicate of the tip holds. Unknown tips are never
    /// eligible.
    pub fn is_eligible(&self, id: TipId, input: &RuleInput) -> bool {
        self.definition(id)
            .is_some_and(|tip| tip.rules.iter().all(|p| p.holds(input)))
    }

    /// Eligibility of every known tip, in definition order
    pub fn evaluate_all(&self, input: &RuleInput) -> Vec<(TipId, bool)> {
        self.tips
            .iter()
            .map(|tip| (tip.id, self.is_eligible(tip.id, input)))
            .collect()
    }

    /// Per-predicate results without short-circuiting
    pub fn explain(&self, id: TipId, input: &RuleInput) -> Vec<PredicateResult> {
        self.definition(id)
            .map(|tip| {
                tip.rules
                    .iter()
                    .map(|p| PredicateResult {
                        label: p.label,
                        holds: p.holds(input),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
