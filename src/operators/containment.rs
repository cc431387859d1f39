use crate::context::EvaluationContext;
use crate::errors::Result;
use crate::value::Value;

use super::dispatch::next_pair;
use super::{Associativity, Operator, OperatorInfo, ParameterInfo, Registry, ANY};

pub const CONTAINS_PRECEDENCE: i32 = 6;

const IN_PARAMS: &[ParameterInfo] = &[
    ParameterInfo::new("needle", "The text to look for", ANY),
    ParameterInfo::new("haystack", "The text that is searched", ANY),
];

const CONTAINS_PARAMS: &[ParameterInfo] = &[
    ParameterInfo::new("haystack", "The text that is searched", ANY),
    ParameterInfo::new("needle", "The text to look for", ANY),
];

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Containment::needle_first("IN"));
    registry.register(Containment::haystack_first("CONTAINS"));
}

/// Substring test over the natural string forms of both operands.
pub struct Containment {
    info: OperatorInfo,
    needle_first: bool,
}

impl Containment {
    /// `needle IN haystack`
    pub fn needle_first(symbol: &'static str) -> Self {
        Self {
            info: OperatorInfo::binary(symbol, Associativity::Left, CONTAINS_PRECEDENCE, IN_PARAMS),
            needle_first: true,
        }
    }

    /// `haystack CONTAINS needle`
    pub fn haystack_first(symbol: &'static str) -> Self {
        Self {
            info: OperatorInfo::binary(
                symbol,
                Associativity::Left,
                CONTAINS_PRECEDENCE,
                CONTAINS_PARAMS,
            ),
            needle_first: false,
        }
    }
}

impl Operator for Containment {
    fn info(&self) -> &OperatorInfo {
        &self.info
    }

    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        _ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let (left, right) = next_pair(operands, &self.info)?;
        let (needle, haystack) = if self.needle_first {
            (left.to_text(), right.to_text())
        } else {
            (right.to_text(), left.to_text())
        };
        Ok(Some(Value::Boolean(haystack.contains(&needle))))
    }
}
