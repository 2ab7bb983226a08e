pub mod catalog;
pub mod engine;
pub mod input;
pub mod presenter;

pub use engine::{Anchor, Icon, Predicate, PredicateResult, Presentation, RuleEngine, TipDefinition};
pub use input::{RuleInput, Value, Variable};
pub use presenter::{TipError, TipPresenter, TipState, TipTransition};
