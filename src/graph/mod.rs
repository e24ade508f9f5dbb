//! Directed acyclic graphs with a lazily cached topological order.
pub mod dag;
pub mod properties;
pub mod topology;

// Re-export key types for convenient access
pub use dag::Dag;
pub use topology::TopoCache;
