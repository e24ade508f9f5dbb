//! Executes computation graphs.
pub mod dag;
pub mod node;
pub mod operation;
pub mod value;

pub use dag::{ComputationalDag, Diagnostic};
pub use node::ComputeNode;
pub use operation::{Arity, FnOp, Op, Operation};
pub use value::Value;
