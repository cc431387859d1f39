//! Element access (`x @ i`, `x AT i`).
//!
//! The left operand selects the lookup rule:
//! - sequences and text take numeric indices; negative indices count from the
//!   end and wrap as often as needed, so `-4` on three items is `2`;
//! - mappings take raw keys, without coercion or wrapping.
//!
//! A sequence on the right requests several elements at once. The results keep
//! the requested order, including duplicates.

use crate::context::EvaluationContext;
use crate::errors::{EvalError, Result};
use crate::value::{Value, ValueKind};

use super::dispatch::next_pair;
use super::{Associativity, Operator, OperatorInfo, ParameterInfo, Registry, ANY};

/// Tightest of all binary operators.
pub const ELEMENT_ACCESS_PRECEDENCE: i32 = 9;

const PARAMS: &[ParameterInfo] = &[
    ParameterInfo::new(
        "container",
        "The sequence, mapping or text to read from",
        &[ValueKind::Sequence, ValueKind::Mapping, ValueKind::Text],
    ),
    ParameterInfo::new(
        "index",
        "An index, a mapping key, or a sequence of them",
        ANY,
    ),
];

pub(crate) fn register(registry: &mut Registry) {
    registry.register(ElementAccess::new("@"));
    registry.register(ElementAccess::new("AT"));
}

pub struct ElementAccess {
    info: OperatorInfo,
}

impl ElementAccess {
    pub fn new(symbol: &'static str) -> Self {
        Self {
            info: OperatorInfo::binary(
                symbol,
                Associativity::Right,
                ELEMENT_ACCESS_PRECEDENCE,
                PARAMS,
            ),
        }
    }

    fn lookup(&self, container: &Value, index: &Value) -> Result<Option<Value>> {
        match container {
            Value::Sequence(items) => {
                let i = self.position(index, items.len())?;
                Ok(Some(items[i].clone()))
            }
            Value::Text(s) => {
                let chars: Vec<char> = s.chars().collect();
                let i = self.position(index, chars.len())?;
                Ok(Some(Value::Text(chars[i].to_string())))
            }
            Value::Mapping(map) => Ok(map.get(index).cloned()),
            other => Err(EvalError::unsupported(self.info.symbol, other.kind())),
        }
    }

    fn lookup_many(&self, container: &Value, indices: &[Value]) -> Result<Value> {
        indices
            .iter()
            .map(|index| {
                self.lookup(container, index)?
                    .ok_or_else(|| EvalError::KeyNotFound(index.to_text()))
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence)
    }

    fn position(&self, index: &Value, len: usize) -> Result<usize> {
        let Value::Number(n) = index else {
            return Err(EvalError::unsupported(self.info.symbol, index.kind()));
        };
        wrap_index(n.trunc() as i64, len)
    }
}

/// Maps `index` into `0..len`, counting negative indices from the end.
pub fn wrap_index(index: i64, len: usize) -> Result<usize> {
    let out_of_bounds = || EvalError::IndexOutOfBounds { index, len };
    if len == 0 {
        return Err(out_of_bounds());
    }
    let wrapped = if index < 0 {
        index.rem_euclid(len as i64)
    } else {
        index
    };
    usize::try_from(wrapped)
        .ok()
        .filter(|i| *i < len)
        .ok_or_else(out_of_bounds)
}

impl Operator for ElementAccess {
    fn info(&self) -> &OperatorInfo {
        &self.info
    }

    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        _ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let (container, index) = next_pair(operands, &self.info)?;
        if !matches!(
            container,
            Value::Sequence(_) | Value::Mapping(_) | Value::Text(_)
        ) {
            return Err(EvalError::unsupported(self.info.symbol, container.kind()));
        }
        match &index {
            Value::Sequence(indices) => self.lookup_many(&container, indices).map(Some),
            single => self.lookup(&container, single),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Variables;
    use crate::value::Mapping;
    use pretty_assertions::assert_eq;

    fn eval(container: Value, index: Value) -> Result<Option<Value>> {
        ElementAccess::new("@").evaluate(&mut vec![container, index].into_iter(), &Variables::new())
    }

    fn abc() -> Value {
        Value::Sequence(vec!["a".into(), "b".into(), "c".into()])
    }

    fn idx(i: f64) -> Value {
        Value::Number(i)
    }

    #[test]
    fn positive_and_negative_indices() {
        assert_eq!(eval(abc(), idx(0.0)), Ok(Some("a".into())));
        assert_eq!(eval(abc(), idx(-1.0)), Ok(Some("c".into())));
        assert_eq!(eval(abc(), idx(-4.0)), Ok(Some("c".into())));
        assert_eq!(eval(abc(), idx(-6.0)), Ok(Some("a".into())));
        assert_eq!(eval(abc(), idx(1.9)), Ok(Some("b".into())));
    }

    #[test]
    fn out_of_bounds() {
        assert_eq!(
            eval(abc(), idx(3.0)),
            Err(EvalError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            eval(Value::Sequence(vec![]), idx(-1.0)),
            Err(EvalError::IndexOutOfBounds { index: -1, len: 0 })
        );
    }

    #[test]
    fn multi_index_keeps_order_and_duplicates() {
        let indices = Value::Sequence(vec![idx(2.0), idx(0.0), idx(2.0)]);
        assert_eq!(
            eval(abc(), indices),
            Ok(Some(Value::Sequence(vec!["c".into(), "a".into(), "c".into()])))
        );
    }

    #[test]
    fn text_yields_single_characters() {
        assert_eq!(eval("héllo".into(), idx(1.0)), Ok(Some("é".into())));
        assert_eq!(eval("hello".into(), idx(-5.0)), Ok(Some("h".into())));
        assert_eq!(
            eval("hello".into(), Value::Sequence(vec![idx(4.0), idx(0.0)])),
            Ok(Some(Value::Sequence(vec!["o".into(), "h".into()])))
        );
    }

    #[test]
    fn mapping_uses_raw_keys() {
        let map: Mapping = [
            (Value::from("w"), Value::from(640.0)),
            (Value::from(1.0), Value::from("one")),
        ]
        .into_iter()
        .collect();
        assert_eq!(eval(map.clone().into(), "w".into()), Ok(Some(640.0.into())));
        assert_eq!(eval(map.clone().into(), idx(1.0)), Ok(Some("one".into())));
        // No coercion and no wrapping.
        assert_eq!(eval(map.clone().into(), "1.0".into()), Ok(None));
        assert_eq!(eval(map.clone().into(), idx(-1.0)), Ok(None));
        assert_eq!(
            eval(map.clone().into(), Value::Sequence(vec!["w".into(), "w".into()])),
            Ok(Some(Value::Sequence(vec![640.0.into(), 640.0.into()])))
        );
        assert_eq!(
            eval(map.into(), Value::Sequence(vec!["h".into()])),
            Err(EvalError::KeyNotFound("h".into()))
        );
    }

    #[test]
    fn unsupported_container_or_index() {
        assert_eq!(
            eval(idx(5.0), idx(0.0)),
            Err(EvalError::UnsupportedOperand { operator: "@", kind: ValueKind::Number })
        );
        assert_eq!(
            eval(Value::from(true), Value::Sequence(vec![])),
            Err(EvalError::UnsupportedOperand { operator: "@", kind: ValueKind::Boolean })
        );
        assert_eq!(
            eval(abc(), "0".into()),
            Err(EvalError::UnsupportedOperand { operator: "@", kind: ValueKind::Text })
        );
    }

    #[test]
    fn wrap_index_matches_repeated_addition() {
        for len in 1..6usize {
            for index in -20i64..0 {
                let mut expected = index;
                while expected < 0 {
                    expected += len as i64;
                }
                assert_eq!(wrap_index(index, len), Ok(expected as usize));
            }
        }
    }
}
