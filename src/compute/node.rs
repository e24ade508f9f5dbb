//! Defines the payload of a computation node: its operation and last result.

use serde::{Serialize, Deserialize};

/// One step of a computation graph.
///
/// `result` is owned by the node and overwritten each time the node runs; it
/// is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "O: Serialize", deserialize = "O: Deserialize<'de>"))]
pub struct ComputeNode<V, O> {
    pub op: O,
    #[serde(skip)]
    pub result: Option<V>,
}

impl<V, O> ComputeNode<V, O> {
    pub fn new(op: O) -> Self {
        Self { op, result: None }
    }

    pub fn result(&self) -> Option<&V> { self.result.as_ref() }
}
