//! Directed acyclic graphs with a lazily cached topological order, and a
//! dataflow evaluator that runs a forward pass over a graph of operations.
//!
//! ```
//! use dagflow_core::{ComputationalDag, Graph, Op, Value};
//!
//! let mut dag: ComputationalDag<Value, Op> = ComputationalDag::new();
//! let input = dag.add_op(Op::Identity);
//! let double = dag.add_op(Op::Scale { factor: 2.0 });
//! let out = dag.add_op(Op::Offset { amount: 1.0 });
//! dag.add_edge(input, double).unwrap();
//! dag.add_edge(double, out).unwrap();
//! dag.set_entry(input).unwrap();
//! dag.set_exit(out).unwrap();
//!
//! assert_eq!(dag.evaluate(Value::Scalar(3.0)).unwrap(), Value::Scalar(7.0));
//! ```
//!
//! Instances are not internally synchronized; operations must not call back
//! into the graph that is evaluating them.

pub mod compute;
pub mod config;
pub mod display;
pub mod error;
pub mod graph;
pub mod persist;
pub mod store;

pub use compute::{Arity, ComputationalDag, ComputeNode, Diagnostic, FnOp, Op, Operation, Value};
pub use config::{EvalConfig, Reachability};
pub use error::{Endpoint, GraphError, GraphResult, OpError};
pub use graph::Dag;
pub use store::{Graph, GraphStore, NodeId};
