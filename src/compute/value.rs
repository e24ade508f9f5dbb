//! value.rs
//! Hybrid Scalar/Series value passed between operations.

use serde::{Serialize, Deserialize};
use std::sync::Arc;

/// The atomic unit of data flowing along edges.
///
/// Series are shared behind an `Arc`, so handing a result to several
/// dependents never copies the samples and never lets one of them mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Scalar(f64),
    Series(Arc<Vec<f64>>),
}

impl Value {
    pub fn series(samples: Vec<f64>) -> Self { Value::Series(Arc::new(samples)) }

    pub fn len(&self) -> usize {
        match self { Value::Scalar(_) => 1, Value::Series(v) => v.len() }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Sample `i`, broadcasting a shorter value by its last sample.
    #[inline(always)]
    pub fn get_at(&self, i: usize) -> f64 {
        match self {
            Value::Scalar(s) => *s,
            Value::Series(vec) => *vec.get(i).unwrap_or_else(|| vec.last().unwrap_or(&0.0)),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self { Value::Scalar(s) => Some(*s), Value::Series(_) => None }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        match self { Value::Scalar(s) => vec![*s], Value::Series(s) => s.to_vec() }
    }

    /// Applies `f` sample-wise; a scalar stays a scalar.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Value {
        match self {
            Value::Scalar(s) => Value::Scalar(f(*s)),
            Value::Series(v) => Value::series(v.iter().map(|x| f(*x)).collect()),
        }
    }

    /// Combines two values sample-wise over the longer of the two.
    pub fn zip_with<E>(&self, rhs: &Value, f: impl Fn(f64, f64) -> Result<f64, E>) -> Result<Value, E> {
        if let (Value::Scalar(l), Value::Scalar(r)) = (self, rhs) {
            return Ok(Value::Scalar(f(*l, *r)?));
        }
        let len = self.len().max(rhs.len());
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            out.push(f(self.get_at(i), rhs.get_at(i))?);
        }
        Ok(Value::series(out))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Scalar(v) }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self { Value::series(v) }
}
