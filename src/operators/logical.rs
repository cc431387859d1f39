use crate::context::EvaluationContext;
use crate::errors::Result;
use crate::value::Value;

use super::dispatch::{expect_boolean, next_operand, next_pair};
use super::{Associativity, Operator, OperatorInfo, ParameterInfo, Registry, BOOLEAN};

pub const NOT_PRECEDENCE: i32 = 3;
pub const AND_PRECEDENCE: i32 = 2;
pub const XOR_PRECEDENCE: i32 = 2;
pub const OR_PRECEDENCE: i32 = 1;

const BOOLEAN_PAIR: &[ParameterInfo] = &[
    ParameterInfo::new("x", "The left operand", BOOLEAN),
    ParameterInfo::new("y", "The right operand", BOOLEAN),
];

const NOT_PARAMS: &[ParameterInfo] = &[ParameterInfo::new("x", "The value to negate", BOOLEAN)];

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Not::new("!"));
    registry.register(Not::new("NOT"));
    registry.register(BooleanOperator::new("&", AND_PRECEDENCE, |a, b| a && b));
    registry.register(BooleanOperator::new("AND", AND_PRECEDENCE, |a, b| a && b));
    registry.register(BooleanOperator::new("|", OR_PRECEDENCE, |a, b| a || b));
    registry.register(BooleanOperator::new("OR", OR_PRECEDENCE, |a, b| a || b));
    registry.register(BooleanOperator::new("XOR", XOR_PRECEDENCE, |a, b| a ^ b));
}

/// Logical negation. The operand must already be a Boolean.
pub struct Not {
    info: OperatorInfo,
}

impl Not {
    pub fn new(symbol: &'static str) -> Self {
        Self {
            info: OperatorInfo::unary(symbol, Associativity::Right, NOT_PRECEDENCE, NOT_PARAMS),
        }
    }
}

impl Operator for Not {
    fn info(&self) -> &OperatorInfo {
        &self.info
    }

    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        _ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let v = next_operand(operands, &self.info)?;
        Ok(Some(Value::Boolean(!expect_boolean(self.info.symbol, &v)?)))
    }
}

/// Binary connective over Boolean operands. Both operands are always
/// consumed; there is no short-circuit at this level.
pub struct BooleanOperator {
    info: OperatorInfo,
    op: fn(bool, bool) -> bool,
}

impl BooleanOperator {
    pub fn new(symbol: &'static str, precedence: i32, op: fn(bool, bool) -> bool) -> Self {
        Self {
            info: OperatorInfo::binary(symbol, Associativity::Left, precedence, BOOLEAN_PAIR),
            op,
        }
    }
}

impl Operator for BooleanOperator {
    fn info(&self) -> &OperatorInfo {
        &self.info
    }

    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        _ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let (a, b) = next_pair(operands, &self.info)?;
        let a = expect_boolean(self.info.symbol, &a)?;
        let b = expect_boolean(self.info.symbol, &b)?;
        Ok(Some(Value::Boolean((self.op)(a, b))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Variables;
    use crate::errors::EvalError;
    use pretty_assertions::assert_eq;

    fn eval(op: &dyn Operator, operands: Vec<Value>) -> Result<Option<Value>> {
        op.evaluate(&mut operands.into_iter(), &Variables::new())
    }

    #[test]
    fn truth_tables() {
        let registry = Registry::with_builtins();
        let cases = [
            ("AND", true, false, false),
            ("&", true, true, true),
            ("OR", false, true, true),
            ("|", false, false, false),
            ("XOR", true, true, false),
            ("XOR", true, false, true),
        ];
        for (symbol, a, b, expected) in cases {
            let op = registry.get(symbol, 2).unwrap();
            assert_eq!(
                eval(op.as_ref(), vec![a.into(), b.into()]).unwrap(),
                Some(Value::from(expected)),
                "{a} {symbol} {b}"
            );
        }
    }

    #[test]
    fn not_negates() {
        assert_eq!(
            eval(&Not::new("NOT"), vec![Value::from(false)]).unwrap(),
            Some(Value::from(true))
        );
    }

    #[test]
    fn numbers_are_not_promoted() {
        let registry = Registry::with_builtins();
        let or = registry.get("OR", 2).unwrap();
        assert!(matches!(
            eval(or.as_ref(), vec![Value::from(1.0), Value::from(true)]),
            Err(EvalError::TypeCoercion { operator: "OR", .. })
        ));
        assert!(matches!(
            eval(&Not::new("!"), vec![Value::from("true")]),
            Err(EvalError::TypeCoercion { .. })
        ));
    }

    #[test]
    fn collections_are_unsupported() {
        let xor = BooleanOperator::new("XOR", XOR_PRECEDENCE, |a, b| a ^ b);
        assert!(matches!(
            eval(&xor, vec![Value::from(true), Value::from(vec![])]),
            Err(EvalError::UnsupportedOperand { operator: "XOR", .. })
        ));
    }

    #[test]
    fn consumes_exactly_two_operands() {
        let and = BooleanOperator::new("AND", AND_PRECEDENCE, |a, b| a && b);
        let mut operands = vec![Value::from(true), Value::from(true), Value::from(7.0)].into_iter();
        let out = and.evaluate(&mut operands, &Variables::new()).unwrap();
        assert_eq!(out, Some(Value::from(true)));
        assert_eq!(operands.next(), Some(Value::from(7.0)));
    }
}
