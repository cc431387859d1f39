//! Coercion dispatch shared by the concrete operators.
//!
//! Operators are composed from an [`OperatorInfo`] and a set of typed
//! sub-evaluations. The dispatch functions here inspect the operand tags and
//! route to exactly one sub-evaluation, so a sub-evaluation never sees an
//! operand of a kind it did not ask for.

use crate::context::EvaluationContext;
use crate::errors::{EvalError, Result};
use crate::value::{Mapping, Value};

use super::{Operator, OperatorInfo};

/// Pulls the next operand, failing if the driver supplied fewer than `arity`.
pub fn next_operand(
    operands: &mut dyn Iterator<Item = Value>,
    info: &OperatorInfo,
) -> Result<Value> {
    operands.next().ok_or(EvalError::MissingOperand {
        operator: info.symbol,
        expected: info.arity,
    })
}

pub(crate) fn next_pair(
    operands: &mut dyn Iterator<Item = Value>,
    info: &OperatorInfo,
) -> Result<(Value, Value)> {
    let a = next_operand(operands, info)?;
    let b = next_operand(operands, info)?;
    Ok((a, b))
}

/// Number and Boolean promote to `f64`; nothing else does.
fn promote(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => Some(*n),
        Value::Boolean(true) => Some(1.0),
        Value::Boolean(false) => Some(0.0),
        _ => None,
    }
}

fn into_text(v: Value) -> String {
    match v {
        Value::Text(s) => s,
        other => other.to_string(),
    }
}

/// Typed sub-evaluations of an arithmetic-style operator.
#[derive(Clone, Copy)]
pub struct ArithmeticOps {
    pub numeric: fn(f64, f64) -> Result<Value>,
    pub text: fn(String, String) -> Result<Value>,
    pub sequence: fn(Vec<Value>, Value) -> Result<Value>,
    pub mapping: fn(Mapping, Value) -> Result<Value>,
}

/// Arithmetic-style dispatch. Branch order is significant:
/// numeric-or-boolean pair, then a sequence `a`, then a mapping `a`, and text
/// for everything else. The sequence and mapping branches receive `b` as is.
pub fn dispatch_arithmetic(a: Value, b: Value, ops: &ArithmeticOps) -> Result<Value> {
    if let (Some(x), Some(y)) = (promote(&a), promote(&b)) {
        return (ops.numeric)(x, y);
    }
    match a {
        Value::Sequence(items) => (ops.sequence)(items, b),
        Value::Mapping(map) => (ops.mapping)(map, b),
        a => (ops.text)(into_text(a), into_text(b)),
    }
}

/// Typed sub-evaluations of a predicate-style operator.
#[derive(Clone, Copy)]
pub struct PredicateOps {
    pub numeric: fn(f64, f64) -> bool,
    pub text: fn(&str, &str) -> bool,
    pub sequence: fn(&[Value], &[Value]) -> bool,
    pub mapping: fn(&Mapping, &Mapping) -> bool,
}

/// Predicate-style dispatch. Unlike [`dispatch_arithmetic`], the collection
/// branches require both operands to share the kind; mixed pairs compare as
/// text.
pub fn dispatch_predicate(a: &Value, b: &Value, ops: &PredicateOps) -> bool {
    if let (Some(x), Some(y)) = (promote(a), promote(b)) {
        return (ops.numeric)(x, y);
    }
    match (a, b) {
        (Value::Sequence(x), Value::Sequence(y)) => (ops.sequence)(x, y),
        (Value::Mapping(x), Value::Mapping(y)) => (ops.mapping)(x, y),
        (Value::Text(x), Value::Text(y)) => (ops.text)(x, y),
        _ => (ops.text)(&a.to_text(), &b.to_text()),
    }
}

/// Strict numeric coercion: text must parse as a decimal number, collections
/// are rejected.
pub fn coerce_number(operator: &'static str, v: &Value) -> Result<f64> {
    match v {
        Value::Number(n) => Ok(*n),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => parse_decimal(s)
            .ok_or_else(|| EvalError::coercion(operator, format!("cannot parse `{s}` as a number"))),
        other => Err(EvalError::unsupported(operator, other.kind())),
    }
}

/// Decimal or exponent literal only; `inf` and `nan` spellings are not numbers.
fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim();
    let literal = s.bytes().any(|c| c.is_ascii_digit())
        && s.bytes().all(|c| c.is_ascii_digit() || matches!(c, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !literal {
        return None;
    }
    s.parse().ok()
}

/// Logical operands are never coerced.
pub fn expect_boolean(operator: &'static str, v: &Value) -> Result<bool> {
    match v {
        Value::Boolean(b) => Ok(*b),
        Value::Number(_) | Value::Text(_) => Err(EvalError::coercion(
            operator,
            format!("expected Boolean, got {}", v.kind()),
        )),
        other => Err(EvalError::unsupported(operator, other.kind())),
    }
}

/// Binary operator built on [`dispatch_arithmetic`].
pub struct ArithmeticOperator {
    info: OperatorInfo,
    ops: ArithmeticOps,
}

impl ArithmeticOperator {
    pub fn new(info: OperatorInfo, ops: ArithmeticOps) -> Self {
        Self { info, ops }
    }
}

impl Operator for ArithmeticOperator {
    fn info(&self) -> &OperatorInfo {
        &self.info
    }

    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        _ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let (a, b) = next_pair(operands, &self.info)?;
        dispatch_arithmetic(a, b, &self.ops).map(Some)
    }
}

/// Binary operator built on [`dispatch_predicate`]; always yields a Boolean.
pub struct PredicateOperator {
    info: OperatorInfo,
    ops: PredicateOps,
}

impl PredicateOperator {
    pub fn new(info: OperatorInfo, ops: PredicateOps) -> Self {
        Self { info, ops }
    }
}

impl Operator for PredicateOperator {
    fn info(&self) -> &OperatorInfo {
        &self.info
    }

    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        _ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let (a, b) = next_pair(operands, &self.info)?;
        Ok(Some(Value::Boolean(dispatch_predicate(&a, &b, &self.ops))))
    }
}

/// Binary operator over strictly coerced numbers.
pub struct NumericOperator {
    info: OperatorInfo,
    op: fn(f64, f64) -> Value,
}

impl NumericOperator {
    pub fn new(info: OperatorInfo, op: fn(f64, f64) -> Value) -> Self {
        Self { info, op }
    }
}

impl Operator for NumericOperator {
    fn info(&self) -> &OperatorInfo {
        &self.info
    }

    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        _ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let (a, b) = next_pair(operands, &self.info)?;
        let x = coerce_number(self.info.symbol, &a)?;
        let y = coerce_number(self.info.symbol, &b)?;
        Ok(Some((self.op)(x, y)))
    }
}
