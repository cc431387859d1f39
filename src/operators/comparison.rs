use crate::value::Value;

use super::dispatch::{NumericOperator, PredicateOperator, PredicateOps};
use super::{Associativity, OperatorInfo, ParameterInfo, Registry, ANY, NUMERIC};

pub const COMPARISON_PRECEDENCE: i32 = 5;

const ANY_PAIR: &[ParameterInfo] = &[
    ParameterInfo::new("x", "The left operand", ANY),
    ParameterInfo::new("y", "The right operand", ANY),
];

const NUMERIC_PAIR: &[ParameterInfo] = &[
    ParameterInfo::new("x", "The left operand", NUMERIC),
    ParameterInfo::new("y", "The right operand", NUMERIC),
];

const EQUALS: PredicateOps = PredicateOps {
    numeric: |a, b| a == b,
    text: |a, b| a == b,
    sequence: |a, b| a == b,
    mapping: |a, b| a == b,
};

const UNEQUALS: PredicateOps = PredicateOps {
    numeric: |a, b| a != b,
    text: |a, b| a != b,
    sequence: |a, b| a != b,
    mapping: |a, b| a != b,
};

// The keyword form keeps the sequence branch of the equality test.
const UNEQUALS_KEYWORD: PredicateOps = PredicateOps {
    sequence: |a, b| a == b,
    ..UNEQUALS
};

pub(crate) fn register(registry: &mut Registry) {
    registry.register(equality("=="));
    registry.register(equality("EQUALS"));
    registry.register(inequality("!="));
    registry.register(inequality_keyword("UNEQUAL"));
    registry.register(ordering("<", |a, b| Value::Boolean(a < b)));
    registry.register(ordering(">", |a, b| Value::Boolean(a > b)));
    registry.register(ordering("<=", |a, b| Value::Boolean(a <= b)));
    registry.register(ordering(">=", |a, b| Value::Boolean(a >= b)));
}

fn info(symbol: &'static str, params: &'static [ParameterInfo]) -> OperatorInfo {
    OperatorInfo::binary(symbol, Associativity::Left, COMPARISON_PRECEDENCE, params)
}

pub fn equality(symbol: &'static str) -> PredicateOperator {
    PredicateOperator::new(info(symbol, ANY_PAIR), EQUALS)
}

pub fn inequality(symbol: &'static str) -> PredicateOperator {
    PredicateOperator::new(info(symbol, ANY_PAIR), UNEQUALS)
}

/// Inequality whose sequence branch reports equality of the two sequences.
pub fn inequality_keyword(symbol: &'static str) -> PredicateOperator {
    PredicateOperator::new(info(symbol, ANY_PAIR), UNEQUALS_KEYWORD)
}

/// Strict numeric comparison; text operands are parsed, collections rejected.
pub fn ordering(symbol: &'static str, pred: fn(f64, f64) -> Value) -> NumericOperator {
    NumericOperator::new(info(symbol, NUMERIC_PAIR), pred)
}
