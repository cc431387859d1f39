use thiserror::Error;

use crate::value::ValueKind;

/// Failures raised by a single operator evaluation.
///
/// All variants are immediate: the evaluation that raised them produced no
/// partial result. An unknown variable is not an error, `$` yields an absent
/// result instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("operator `{operator}` does not support operand of kind {kind}")]
    UnsupportedOperand {
        operator: &'static str,
        kind: ValueKind,
    },

    #[error("operator `{operator}`: {message}")]
    TypeCoercion {
        operator: &'static str,
        message: String,
    },

    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("key `{0}` not found")]
    KeyNotFound(String),

    #[error("operator `{operator}` expects {expected} operand(s)")]
    MissingOperand {
        operator: &'static str,
        expected: usize,
    },

    #[error("unknown operator `{symbol}` with arity {arity}")]
    UnknownOperator { symbol: String, arity: usize },

    #[error("conversion error: {0}")]
    Conversion(String),
}

impl EvalError {
    pub(crate) fn unsupported(operator: &'static str, kind: ValueKind) -> Self {
        EvalError::UnsupportedOperand { operator, kind }
    }

    pub(crate) fn coercion(operator: &'static str, message: impl Into<String>) -> Self {
        EvalError::TypeCoercion {
            operator,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
