use std::collections::HashMap;

use crate::errors::{EvalError, Result};
use crate::value::Value;

/// Read-only variable lookup supplied by the caller for one evaluation pass.
///
/// Only the variable operators consult it. The engine never mutates it.
pub trait EvaluationContext {
    fn get(&self, key: &str) -> Option<Value>;
}

impl<C: EvaluationContext + ?Sized> EvaluationContext for &C {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }
}

impl EvaluationContext for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        HashMap::get(self, key).cloned()
    }
}

/// Default in-memory context.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    vars: HashMap<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(key.into(), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.vars.remove(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Parses a `name=<json>` assignment. A right-hand side that is not valid
    /// JSON is stored as text.
    pub fn parse_assignment(assignment: &str) -> Result<(String, Value)> {
        let (name, raw) = assignment
            .split_once('=')
            .ok_or_else(|| EvalError::Conversion(format!("expected name=value, got `{assignment}`")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(EvalError::Conversion("variable name is empty".into()));
        }
        let value = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(json) => Value::try_from(json)?,
            Err(_) => Value::Text(raw.to_string()),
        };
        Ok((name.to_string(), value))
    }
}

impl EvaluationContext for Variables {
    fn get(&self, key: &str) -> Option<Value> {
        self.vars.get(key).cloned()
    }
}

impl FromIterator<(String, Value)> for Variables {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}
