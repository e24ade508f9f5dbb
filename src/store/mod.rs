//! Node and adjacency storage underneath the graph layer.
pub mod registry;
pub mod types;

pub use registry::{Graph, GraphStore};
pub use types::NodeId;
