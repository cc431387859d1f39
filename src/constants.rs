//! Named constants published next to the operator catalog.

use std::f64::consts;

use crate::value::Value;

#[derive(Debug, Clone, Copy)]
pub struct Constant {
    pub name: &'static str,
    pub description: &'static str,
    value: ConstantValue,
}

#[derive(Debug, Clone, Copy)]
enum ConstantValue {
    Number(f64),
    Boolean(bool),
    Text(&'static str),
}

impl Constant {
    pub fn value(&self) -> Value {
        match self.value {
            ConstantValue::Number(n) => Value::Number(n),
            ConstantValue::Boolean(b) => Value::Boolean(b),
            ConstantValue::Text(s) => Value::Text(s.to_string()),
        }
    }
}

const fn number(name: &'static str, description: &'static str, n: f64) -> Constant {
    Constant {
        name,
        description,
        value: ConstantValue::Number(n),
    }
}

static CONSTANTS: &[Constant] = &[
    Constant {
        name: "TRUE",
        description: "Boolean true",
        value: ConstantValue::Boolean(true),
    },
    Constant {
        name: "FALSE",
        description: "Boolean false",
        value: ConstantValue::Boolean(false),
    },
    Constant {
        name: "NEWLINE",
        description: "A line break",
        value: ConstantValue::Text("\n"),
    },
    number("E", "Euler's number", consts::E),
    number("PI", "The circle constant", consts::PI),
    number("TAU", "Twice the circle constant", consts::TAU),
    number("INF", "Positive infinity", f64::INFINITY),
    number("-INF", "Negative infinity", f64::NEG_INFINITY),
    number("NAN", "Not a number", f64::NAN),
];

pub fn constants() -> &'static [Constant] {
    CONSTANTS
}

pub fn constant(name: &str) -> Option<Value> {
    CONSTANTS.iter().find(|c| c.name == name).map(Constant::value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup() {
        assert_eq!(constant("TRUE"), Some(Value::Boolean(true)));
        assert_eq!(constant("NEWLINE"), Some(Value::from("\n")));
        assert_eq!(constant("-INF"), Some(Value::Number(f64::NEG_INFINITY)));
        assert!(matches!(constant("NAN"), Some(Value::Number(n)) if n.is_nan()));
        assert_eq!(constant("pi"), None);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = constants().iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), constants().len());
    }
}
