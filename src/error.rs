//! Error types for graph construction, ordering and evaluation.
use crate::store::NodeId;
use std::fmt;
use thiserror::Error;

/// Which distinguished node of a `ComputationalDag` a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Entry,
    Exit,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Entry => f.write_str("entry"),
            Endpoint::Exit => f.write_str("exit"),
        }
    }
}

/// Failure raised by an individual operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("{0}")]
    Custom(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {id} is out of range (graph has {size} nodes)")]
    NodeOutOfRange { id: NodeId, size: usize },
    #[error("Cycle detected: edge {from} -> {to} closes a cycle")]
    CycleDetected { from: NodeId, to: NodeId },
    #[error("The {0} node has not been set")]
    MissingEndpoint(Endpoint),
    #[error("{} node(s) are unreachable from the entry: {nodes:?}", .nodes.len())]
    Unreachable { nodes: Vec<NodeId> },
    #[error("Exit node {exit} is not reachable from the entry")]
    ExitUnreachable { exit: NodeId },
    #[error("Operand {operand} of node {node} was not evaluated in this pass")]
    MissingOperand { node: NodeId, operand: NodeId },
    #[error("Arity mismatch at node {node}: expected {expected}, got {actual} operand(s)")]
    ArityMismatch { node: NodeId, expected: String, actual: usize },
    #[error("Operation at node {node} failed: {source}")]
    Operation { node: NodeId, #[source] source: OpError },
    #[error("Persistence error: {0}")]
    Persist(String),
}

impl GraphError {
    /// The node the error is attributed to, if any.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            GraphError::NodeOutOfRange { id, .. } => Some(*id),
            GraphError::CycleDetected { to, .. } => Some(*to),
            GraphError::ExitUnreachable { exit } => Some(*exit),
            GraphError::MissingOperand { node, .. }
            | GraphError::ArityMismatch { node, .. }
            | GraphError::Operation { node, .. } => Some(*node),
            GraphError::MissingEndpoint(_)
            | GraphError::Unreachable { .. }
            | GraphError::Persist(_) => None,
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(e: serde_json::Error) -> Self {
        GraphError::Persist(e.to_string())
    }
}

impl From<std::io::Error> for GraphError {
    fn from(e: std::io::Error) -> Self {
        GraphError::Persist(e.to_string())
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_nodes() {
        let err = GraphError::CycleDetected { from: NodeId(2), to: NodeId(0) };
        assert_eq!(err.to_string(), "Cycle detected: edge #2 -> #0 closes a cycle");
        assert_eq!(err.node_id(), Some(NodeId(0)));

        let err = GraphError::MissingEndpoint(Endpoint::Exit);
        assert_eq!(err.to_string(), "The exit node has not been set");
        assert_eq!(err.node_id(), None);
    }

    #[test]
    fn test_operation_error_keeps_source() {
        use std::error::Error;
        let err = GraphError::Operation { node: NodeId(3), source: OpError::DivisionByZero };
        assert!(err.to_string().contains("Division by zero"));
        assert!(err.source().is_some());
    }
}
