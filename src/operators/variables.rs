use crate::context::EvaluationContext;
use crate::errors::Result;
use crate::value::Value;

use super::dispatch::next_operand;
use super::{Associativity, Operator, OperatorInfo, ParameterInfo, Registry, ANY};

pub const RESOLVE_PRECEDENCE: i32 = 10;
pub const EXISTS_PRECEDENCE: i32 = 7;

static RESOLVE_INFO: OperatorInfo = OperatorInfo::unary(
    "$",
    Associativity::Right,
    RESOLVE_PRECEDENCE,
    &[ParameterInfo::new("name", "The variable name", ANY)],
);

static EXISTS_INFO: OperatorInfo = OperatorInfo::unary(
    "EXISTS",
    Associativity::Left,
    EXISTS_PRECEDENCE,
    &[ParameterInfo::new("name", "The variable name", ANY)],
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Resolve);
    registry.register(Exists);
}

/// `$name`: the stored value, or absent when the variable is unknown.
pub struct Resolve;

impl Operator for Resolve {
    fn info(&self) -> &OperatorInfo {
        &RESOLVE_INFO
    }

    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let key = next_operand(operands, &RESOLVE_INFO)?.to_text();
        Ok(ctx.get(&key))
    }
}

/// `EXISTS name`
pub struct Exists;

impl Operator for Exists {
    fn info(&self) -> &OperatorInfo {
        &EXISTS_INFO
    }

    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let key = next_operand(operands, &EXISTS_INFO)?.to_text();
        Ok(Some(Value::Boolean(ctx.get(&key).is_some())))
    }
}
