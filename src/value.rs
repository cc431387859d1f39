use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::EvalError;

/// Every operand and every result of an operator belongs to one of these
/// five cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    Number(f64),
    Boolean(bool),
    Text(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// Tag of a [`Value`], used for dispatch diagnostics and parameter descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    Boolean,
    Text,
    Sequence,
    Mapping,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Number => "Number",
            ValueKind::Boolean => "Boolean",
            ValueKind::Text => "Text",
            ValueKind::Sequence => "Sequence",
            ValueKind::Mapping => "Mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Text(_) => ValueKind::Text,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Natural string form of the value. Text is returned unchanged.
    pub fn to_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 || (1e-3..1e7).contains(&n.abs()) {
        // Debug keeps the trailing `.0` on integral values.
        write!(f, "{n:?}")
    } else {
        // Scientific form with at least one fractional mantissa digit: `1.0E16`.
        let sci = format!("{n:e}");
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        if mantissa.contains('.') {
            write!(f, "{mantissa}E{exponent}")
        } else {
            write!(f, "{mantissa}.0E{exponent}")
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt_number(*n, f),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Text(s) => f.write_str(s),
            Value::Sequence(items) => write!(f, "[{}]", items.iter().join(", ")),
            Value::Mapping(map) => write!(
                f,
                "{{{}}}",
                map.iter().map(|(k, v)| format!("{k}={v}")).join(", ")
            ),
        }
    }
}

/// Key/value pairs with [`Value`] keys.
///
/// Keys are compared by equality. Insertion order is kept for display but is
/// irrelevant for equality between two mappings.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(Value, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, returning the previous value of an equal key.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl FromIterator<(Value, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for Mapping {
    type Item = (Value, Value);
    type IntoIter = std::vec::IntoIter<(Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = EvalError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;
        Ok(match json {
            Json::Null => {
                return Err(EvalError::Conversion(
                    "null has no counterpart in the value domain".into(),
                ))
            }
            Json::Bool(b) => Value::Boolean(b),
            Json::Number(n) => Value::Number(
                n.as_f64()
                    .ok_or_else(|| EvalError::Conversion(format!("number {n} is not representable")))?,
            ),
            Json::String(s) => Value::Text(s),
            Json::Array(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Json::Object(obj) => {
                let mut map = Mapping::new();
                for (k, v) in obj {
                    map.insert(Value::Text(k), Value::try_from(v)?);
                }
                Value::Mapping(map)
            }
        })
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Value::Number(n) => serde_json::Number::from_f64(n)
                .map(Json::Number)
                .unwrap_or_else(|| Json::String(Value::Number(n).to_string())),
            Value::Boolean(b) => Json::Bool(b),
            Value::Text(s) => Json::String(s),
            Value::Sequence(items) => Json::Array(items.into_iter().map(Json::from).collect()),
            Value::Mapping(map) => Json::Object(
                map.into_iter()
                    .map(|(k, v)| (k.to_text(), Json::from(v)))
                    .collect(),
            ),
        }
    }
}
