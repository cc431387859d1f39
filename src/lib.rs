pub mod constants;
pub mod context;
pub mod errors;
pub mod operators;
pub mod value;

use tracing::trace;

use context::EvaluationContext;
use errors::{EvalError, Result};
use operators::Registry;

pub use context::Variables;
pub use operators::{Associativity, Operator, OperatorInfo, ParameterInfo};
pub use value::{Mapping, Value, ValueKind};

/// Applies catalog operators to already evaluated operands.
///
/// This is the hook an external precedence-climbing driver calls once per
/// operator application. No text is parsed here.
pub struct Evaluator {
    registry: Registry,
}

impl Evaluator {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Selects the operator by symbol and operand count and evaluates it.
    pub fn apply(
        &self,
        symbol: &str,
        operands: Vec<Value>,
        ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>> {
        let arity = operands.len();
        let op = self
            .registry
            .get(symbol, arity)
            .ok_or_else(|| EvalError::UnknownOperator {
                symbol: symbol.to_string(),
                arity,
            })?;
        trace!(symbol, arity, "applying operator");
        op.evaluate(&mut operands.into_iter(), ctx)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(Registry::global().clone())
    }
}

/// Convenience: apply a builtin operator.
pub fn apply(symbol: &str, operands: Vec<Value>, ctx: &dyn EvaluationContext) -> Result<Option<Value>> {
    Evaluator::default().apply(symbol, operands, ctx)
}
