use crate::context::EvaluationContext;
use crate::errors::{EvalError, Result};
use crate::value::{Mapping, Value};

use super::dispatch::{
    coerce_number, next_operand, ArithmeticOperator, ArithmeticOps, NumericOperator,
};
use super::{Associativity, Operator, OperatorInfo, ParameterInfo, Registry, ANY, NUMERIC};

pub const ADDITIVE_PRECEDENCE: i32 = 6;
pub const MULTIPLICATIVE_PRECEDENCE: i32 = 7;
pub const EXPONENT_PRECEDENCE: i32 = 8;
pub const NEGATE_PRECEDENCE: i32 = 11;

const ANY_PAIR: &[ParameterInfo] = &[
    ParameterInfo::new("x", "The left operand", ANY),
    ParameterInfo::new("y", "The right operand", ANY),
];

const NUMERIC_PAIR: &[ParameterInfo] = &[
    ParameterInfo::new("x", "The left operand", NUMERIC),
    ParameterInfo::new("y", "The right operand", NUMERIC),
];

const EXPONENT_PARAMS: &[ParameterInfo] = &[
    ParameterInfo::new("base", "The base", NUMERIC),
    ParameterInfo::new("exponent", "The exponent", NUMERIC),
];

pub(crate) fn register(registry: &mut Registry) {
    registry.register(addition());
    registry.register(subtraction());
    registry.register(numeric(
        "*",
        MULTIPLICATIVE_PRECEDENCE,
        Associativity::Left,
        NUMERIC_PAIR,
        |a, b| Value::Number(a * b),
    ));
    registry.register(numeric(
        "/",
        MULTIPLICATIVE_PRECEDENCE,
        Associativity::Left,
        NUMERIC_PAIR,
        |a, b| Value::Number(a / b),
    ));
    registry.register(numeric(
        "%",
        MULTIPLICATIVE_PRECEDENCE,
        Associativity::Left,
        NUMERIC_PAIR,
        |a, b| Value::Number(a % b),
    ));
    registry.register(numeric(
        "^",
        EXPONENT_PRECEDENCE,
        Associativity::Right,
        EXPONENT_PARAMS,
        |a, b| Value::Number(a.powf(b)),
    ));
    registry.register(Negate);
}

fn numeric(
    symbol: &'static str,
    precedence: i32,
    associativity: Associativity,
    params: &'static [ParameterInfo],
    op: fn(f64, f64) -> Value,
) -> NumericOperator {
    NumericOperator::new(
        OperatorInfo::binary(symbol, associativity, precedence, params),
        op,
    )
}

/// `+`: numeric sum, text concatenation, sequence concatenation and mapping
/// merge.
pub fn addition() -> ArithmeticOperator {
    ArithmeticOperator::new(
        OperatorInfo::binary("+", Associativity::Left, ADDITIVE_PRECEDENCE, ANY_PAIR),
        ArithmeticOps {
            numeric: |a, b| Ok(Value::Number(a + b)),
            text: |a, b| Ok(Value::Text(a + &b)),
            sequence: |mut items, b| {
                match b {
                    Value::Sequence(more) => items.extend(more),
                    other => items.push(other),
                }
                Ok(Value::Sequence(items))
            },
            mapping: |mut map, b| match b {
                Value::Mapping(other) => {
                    for (k, v) in other {
                        map.insert(k, v);
                    }
                    Ok(Value::Mapping(map))
                }
                other => Err(EvalError::unsupported("+", other.kind())),
            },
        },
    )
}

/// `-`: numeric difference and removal from collections.
///
/// Two text operands yield `false` rather than an error; callers rely on that.
pub fn subtraction() -> ArithmeticOperator {
    ArithmeticOperator::new(
        OperatorInfo::binary("-", Associativity::Left, ADDITIVE_PRECEDENCE, ANY_PAIR),
        ArithmeticOps {
            numeric: |a, b| Ok(Value::Number(a - b)),
            text: |_, _| Ok(Value::Boolean(false)),
            sequence: |mut items, b| {
                match b {
                    Value::Sequence(removed) => items.retain(|item| !removed.contains(item)),
                    other => items.retain(|item| *item != other),
                }
                Ok(Value::Sequence(items))
            },
            mapping: |map, b| Ok(Value::Mapping(remove_keys(map, b))),
        },
    )
}

fn remove_keys(mut map: Mapping, keys: Value) -> Mapping {
    match keys {
        Value::Sequence(keys) => {
            for key in &keys {
                map.remove(key);
            }
        }
        key => {
            map.remove(&key);
        }
    }
    map
}

/// Unary `-`.
pub struct Negate;

static NEGATE_INFO: OperatorInfo = OperatorInfo::unary(
    "-",
    Associativity::Right,
    NEGATE_PRECEDENCE,
    &[ParameterInfo::new("x", "The value to negate", NUMERIC)],
);

impl Operator for Negate {
    fn info(&self) -> &OperatorInfo {
        &NEGATE_INFO
    }

    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        _ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let v = next_operand(operands, &NEGATE_INFO)?;
        Ok(Some(Value::Number(-coerce_number("-", &v)?)))
    }
}
