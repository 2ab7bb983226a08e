use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// State variables tips can be gated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Variable {
    #[serde(rename = "taskCount")]
    TaskCount,
    #[serde(rename = "completedTaskCount")]
    CompletedTaskCount,
    #[serde(rename = "isSessionRunning")]
    IsSessionRunning,
    #[serde(rename = "completedFirstTask")]
    CompletedFirstTask,
}

impl Variable {
    pub fn name(self) -> &'static str {
        match self {
            Variable::TaskCount => "taskCount",
            Variable::CompletedTaskCount => "completedTaskCount",
            Variable::IsSessionRunning => "isSessionRunning",
            Variable::CompletedFirstTask => "completedFirstTask",
        }
    }
}

/// A scalar rule input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    pub fn as_int(self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(n),
            Value::Bool(_) => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            Value::Int(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Snapshot of every rule variable at one point in time.
///
/// Built by the board after each mutation and handed to the engine by
/// reference; tips never hold state of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleInput {
    values: BTreeMap<Variable, Value>,
}

impl RuleInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, variable: Variable, value: impl Into<Value>) -> Self {
        self.set(variable, value);
        self
    }

    pub fn set(&mut self, variable: Variable, value: impl Into<Value>) {
        self.values.insert(variable, value.into());
    }

    pub fn get(&self, variable: Variable) -> Option<Value> {
        self.values.get(&variable).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, Value)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

impl fmt::Display for RuleInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (variable, value) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", variable.name(), value)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites() {
        let mut input = RuleInput::new().with(Variable::TaskCount, 1i64);
        input.set(Variable::TaskCount, 4i64);
        assert_eq!(input.get(Variable::TaskCount), Some(Value::Int(4)));
        assert_eq!(input.get(Variable::IsSessionRunning), None);
    }

    #[test]
    fn display_lists_variables_in_order() {
        let input = RuleInput::new()
            .with(Variable::IsSessionRunning, false)
            .with(Variable::TaskCount, 2usize);
        assert_eq!(input.to_string(), "taskCount=2 isSessionRunning=false");
    }

    #[test]
    fn serializes_as_named_map() {
        let input = RuleInput::new()
            .with(Variable::TaskCount, 0i64)
            .with(Variable::CompletedFirstTask, true);
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(json, r#"{"taskCount":0,"completedFirstTask":true}"#);
    }

    #[test]
    fn value_accessors_are_typed() {
        assert_eq!(Value::Int(3).as_int(), Some(3));
        assert_eq!(Value::Int(3).as_bool(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
    }
}
