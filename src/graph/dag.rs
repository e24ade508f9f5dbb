//! dag.rs
//! Wraps the GraphStore with a lazily cached topological order.

use super::topology::TopoCache;
use crate::error::GraphResult;
use crate::store::{Graph, GraphStore, NodeId};
use serde::{Serialize, Deserialize};

/// A directed graph that is expected to be acyclic.
///
/// Every `add_node`/`add_edge` invalidates the cached order; the next call to
/// [`Dag::topo_order`] recomputes it. Cycles are reported when the order is
/// computed, not when the edge is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dag<N> {
    pub(crate) store: GraphStore<N>,
    #[serde(skip)]
    topo: TopoCache,
}

impl<N> Default for Dag<N> {
    fn default() -> Self {
        Self { store: GraphStore::new(), topo: TopoCache::new() }
    }
}

impl<N> Dag<N> {
    pub fn new() -> Self { Self::default() }

    /// Creates `n` nodes with default payloads and no edges.
    pub fn with_nodes(n: usize) -> Self
    where
        N: Default,
    {
        let mut dag = Self::new();
        for _ in 0..n {
            dag.add_node(N::default());
        }
        dag
    }

    /// Builds a graph from payloads and per-node successor lists.
    ///
    /// Ids are range-checked here; acyclicity is only checked by `topo_order`.
    pub fn from_parts(payloads: Vec<N>, successor_lists: Vec<Vec<NodeId>>) -> GraphResult<Self> {
        Ok(Self { store: GraphStore::from_parts(payloads, successor_lists)?, topo: TopoCache::new() })
    }

    /// Returns the nodes in topological order, recomputing only after a mutation.
    ///
    /// Roots are scanned in ascending id order and successors in insertion
    /// order, so identical build sequences always yield identical orders.
    pub fn topo_order(&mut self) -> GraphResult<&[NodeId]> {
        let roots = self.store.ids();
        self.topo.get_or_rebuild(&self.store, roots)
    }

    /// Number of times the order has been rebuilt.
    pub fn recomputations(&self) -> u64 { self.topo.recomputations() }

    pub fn store(&self) -> &GraphStore<N> { &self.store }

    pub fn node_count(&self) -> usize { self.store.count() }

    pub fn edge_count(&self) -> usize { self.store.edge_count() }
}

impl<N> Graph for Dag<N> {
    type Payload = N;

    fn size(&self) -> usize { self.store.size() }
    fn get(&self, id: NodeId) -> GraphResult<&N> { self.store.get(id) }
    fn get_mut(&mut self, id: NodeId) -> GraphResult<&mut N> { self.store.get_mut(id) }
    fn predecessors(&self, id: NodeId) -> GraphResult<&[NodeId]> { self.store.predecessors(id) }
    fn successors(&self, id: NodeId) -> GraphResult<&[NodeId]> { self.store.successors(id) }

    fn add_node(&mut self, payload: N) -> NodeId {
        self.topo.invalidate();
        self.store.add_node(payload)
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) -> GraphResult<()> {
        self.store.add_edge(from, to)?;
        self.topo.invalidate();
        Ok(())
    }
}
