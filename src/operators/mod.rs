//! Operator contract and the read-only operator catalog.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use itertools::Itertools;
use tracing::debug;

use crate::context::EvaluationContext;
use crate::errors::Result;
use crate::value::{Value, ValueKind};

pub mod arithmetic;
pub mod comparison;
pub mod containment;
pub mod dispatch;
pub mod element_access;
pub mod logical;
pub mod variables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Associativity::Left => "left",
            Associativity::Right => "right",
        })
    }
}

/// Human-readable descriptor of one operand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub kinds: &'static [ValueKind],
}

impl ParameterInfo {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        kinds: &'static [ValueKind],
    ) -> Self {
        Self {
            name,
            description,
            kinds,
        }
    }
}

pub(crate) const ANY: &[ValueKind] = &[
    ValueKind::Number,
    ValueKind::Boolean,
    ValueKind::Text,
    ValueKind::Sequence,
    ValueKind::Mapping,
];
pub(crate) const NUMERIC: &[ValueKind] = &[ValueKind::Number, ValueKind::Boolean, ValueKind::Text];
pub(crate) const BOOLEAN: &[ValueKind] = &[ValueKind::Boolean];

/// Grammar metadata shared by every operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorInfo {
    pub symbol: &'static str,
    pub arity: usize,
    pub associativity: Associativity,
    pub precedence: i32,
    pub params: &'static [ParameterInfo],
}

impl OperatorInfo {
    pub const fn binary(
        symbol: &'static str,
        associativity: Associativity,
        precedence: i32,
        params: &'static [ParameterInfo],
    ) -> Self {
        Self {
            symbol,
            arity: 2,
            associativity,
            precedence,
            params,
        }
    }

    pub const fn unary(
        symbol: &'static str,
        associativity: Associativity,
        precedence: i32,
        params: &'static [ParameterInfo],
    ) -> Self {
        Self {
            symbol,
            arity: 1,
            associativity,
            precedence,
            params,
        }
    }
}

/// An operator of the formula language.
///
/// Operators are immutable and hold no per-call state, so one instance may be
/// evaluated concurrently from any number of threads.
pub trait Operator: Send + Sync {
    fn info(&self) -> &OperatorInfo;

    fn symbol(&self) -> &'static str {
        self.info().symbol
    }

    fn arity(&self) -> usize {
        self.info().arity
    }

    fn associativity(&self) -> Associativity {
        self.info().associativity
    }

    /// Higher binds tighter.
    fn precedence(&self) -> i32 {
        self.info().precedence
    }

    fn parameter_info(&self, index: usize) -> Option<ParameterInfo> {
        self.info().params.get(index).copied()
    }

    /// Consumes exactly `arity` operands from `operands`, in source order.
    ///
    /// `Ok(None)` is the absent result (an unknown variable or mapping key).
    fn evaluate(
        &self,
        operands: &mut dyn Iterator<Item = Value>,
        ctx: &dyn EvaluationContext,
    ) -> Result<Option<Value>>;
}

/// Thread-safe operator catalog keyed by symbol and arity.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<HashMap<&'static str, Vec<Arc<dyn Operator>>>>,
}

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        arithmetic::register(&mut registry);
        comparison::register(&mut registry);
        logical::register(&mut registry);
        containment::register(&mut registry);
        element_access::register(&mut registry);
        variables::register(&mut registry);
        debug!(operators = registry.len(), "built operator catalog");
        registry
    }

    /// Catalog with every builtin operator, built once per process.
    pub fn global() -> &'static Registry {
        GLOBAL_REGISTRY.get_or_init(Registry::with_builtins)
    }

    /// Registers `op`, replacing an operator with the same symbol and arity.
    pub fn register<O: Operator + 'static>(&mut self, op: O) {
        let map = Arc::make_mut(&mut self.inner);
        let slot = map.entry(op.symbol()).or_default();
        slot.retain(|existing| existing.arity() != op.arity());
        slot.push(Arc::new(op));
    }

    pub fn get(&self, symbol: &str, arity: usize) -> Option<Arc<dyn Operator>> {
        self.inner
            .get(symbol)?
            .iter()
            .find(|op| op.arity() == arity)
            .cloned()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.inner.contains_key(symbol)
    }

    /// All operators, tightest-binding first, then by symbol and arity.
    pub fn operators(&self) -> Vec<Arc<dyn Operator>> {
        self.inner
            .values()
            .flatten()
            .cloned()
            .sorted_by(|a, b| {
                b.precedence()
                    .cmp(&a.precedence())
                    .then_with(|| a.symbol().cmp(b.symbol()))
                    .then_with(|| a.arity().cmp(&b.arity()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
