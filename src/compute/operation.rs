//! The per-node operation contract and the built-in operations over [`Value`].
use super::value::Value;
use crate::error::OpError;
use serde::{Serialize, Deserialize};
use std::fmt;

/// Number of operands an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// A function from an ordered operand list to one value.
///
/// Operand `i` is the cached result of the node's `i`-th predecessor, in edge
/// insertion order. Operands are shared borrows of other nodes' results.
pub trait Operation<V> {
    fn arity(&self) -> Arity;

    fn apply(&self, operands: &[&V]) -> Result<V, OpError>;

    /// Short label used in traces.
    fn name(&self) -> &str { "op" }
}

impl<V, O: Operation<V> + ?Sized> Operation<V> for Box<O> {
    fn arity(&self) -> Arity { (**self).arity() }
    fn apply(&self, operands: &[&V]) -> Result<V, OpError> { (**self).apply(operands) }
    fn name(&self) -> &str { (**self).name() }
}

/// Adapts a closure into an [`Operation`] with an explicit arity.
pub struct FnOp<F> {
    name: String,
    arity: Arity,
    f: F,
}

impl<F> FnOp<F> {
    pub fn new(name: impl Into<String>, arity: Arity, f: F) -> Self {
        Self { name: name.into(), arity, f }
    }
}

impl<F> fmt::Debug for FnOp<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOp").field("name", &self.name).field("arity", &self.arity).finish()
    }
}

impl<V, F> Operation<V> for FnOp<F>
where
    F: Fn(&[&V]) -> Result<V, OpError>,
{
    fn arity(&self) -> Arity { self.arity }
    fn apply(&self, operands: &[&V]) -> Result<V, OpError> { (self.f)(operands) }
    fn name(&self) -> &str { &self.name }
}

/// Serializable operation descriptions over [`Value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Identity,
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,
    Scale { factor: f64 },
    Offset { amount: f64 },
    /// Sum of one or more operands.
    Sum,
}

impl Operation<Value> for Op {
    fn arity(&self) -> Arity {
        match self {
            Op::Identity | Op::Negate | Op::Scale { .. } | Op::Offset { .. } => Arity::Exact(1),
            Op::Add | Op::Subtract | Op::Multiply | Op::Divide => Arity::Exact(2),
            Op::Sum => Arity::AtLeast(1),
        }
    }

    fn apply(&self, operands: &[&Value]) -> Result<Value, OpError> {
        let unary = || operands.first().copied().ok_or_else(|| missing(self));
        let binary = || match operands {
            [l, r] => Ok((*l, *r)),
            _ => Err(missing(self)),
        };

        match self {
            Op::Identity => Ok(unary()?.clone()),
            Op::Negate => Ok(unary()?.map(|x| -x)),
            Op::Scale { factor } => Ok(unary()?.map(|x| x * factor)),
            Op::Offset { amount } => Ok(unary()?.map(|x| x + amount)),
            Op::Add => { let (l, r) = binary()?; l.zip_with(r, |a, b| Ok(a + b)) }
            Op::Subtract => { let (l, r) = binary()?; l.zip_with(r, |a, b| Ok(a - b)) }
            Op::Multiply => { let (l, r) = binary()?; l.zip_with(r, |a, b| Ok(a * b)) }
            Op::Divide => {
                let (l, r) = binary()?;
                l.zip_with(r, |a, b| if b == 0.0 { Err(OpError::DivisionByZero) } else { Ok(a / b) })
            }
            Op::Sum => {
                let (first, rest) = operands.split_first().ok_or_else(|| missing(self))?;
                rest.iter().try_fold((*first).clone(), |acc, v| acc.zip_with(v, |a, b| Ok(a + b)))
            }
        }
    }

    fn name(&self) -> &str {
        match self {
            Op::Identity => "identity",
            Op::Add => "add",
            Op::Subtract => "subtract",
            Op::Multiply => "multiply",
            Op::Divide => "divide",
            Op::Negate => "negate",
            Op::Scale { .. } => "scale",
            Op::Offset { .. } => "offset",
            Op::Sum => "sum",
        }
    }
}

fn missing(op: &Op) -> OpError {
    OpError::Custom(format!("{} expects {} operand(s)", op.name(), op.arity()))
}
