use super::types::NodeId;
use crate::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize, Serializer};

/// The storage surface shared by the store and the graphs layered on top of it.
///
/// `Dag` and `ComputationalDag` hold a `GraphStore` and forward through this
/// trait, adding order invalidation on the mutating calls.
pub trait Graph {
    type Payload;

    fn size(&self) -> usize;
    fn get(&self, id: NodeId) -> GraphResult<&Self::Payload>;
    fn get_mut(&mut self, id: NodeId) -> GraphResult<&mut Self::Payload>;
    /// Predecessors of `id` in edge insertion order.
    fn predecessors(&self, id: NodeId) -> GraphResult<&[NodeId]>;
    /// Successors of `id` in edge insertion order.
    fn successors(&self, id: NodeId) -> GraphResult<&[NodeId]>;
    fn add_node(&mut self, payload: Self::Payload) -> NodeId;
    fn add_edge(&mut self, from: NodeId, to: NodeId) -> GraphResult<()>;
}

/// Dense node storage with insertion-ordered adjacency in both directions.
///
/// Duplicate edges and self-loops are stored as given. Deserialization goes
/// through [`StoreRepr`] and rejects adjacency that does not fit the payloads.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "StoreRepr<N>", bound(deserialize = "N: Deserialize<'de>"))]
pub struct GraphStore<N> {
    payloads: Vec<N>,
    preds: Vec<Vec<NodeId>>,
    succs: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl<N> Default for GraphStore<N> {
    fn default() -> Self {
        Self { payloads: Vec::new(), preds: Vec::new(), succs: Vec::new(), edge_count: 0 }
    }
}

impl<N> GraphStore<N> {
    pub fn new() -> Self { Self::default() }

    pub fn count(&self) -> usize { self.payloads.len() }

    pub fn edge_count(&self) -> usize { self.edge_count }

    #[inline(always)]
    pub fn check(&self, id: NodeId) -> GraphResult<()> {
        if id.index() < self.payloads.len() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange { id, size: self.payloads.len() })
        }
    }

    /// Builds a store from payloads and per-node successor lists.
    pub fn from_parts(payloads: Vec<N>, successor_lists: Vec<Vec<NodeId>>) -> GraphResult<Self> {
        if successor_lists.len() > payloads.len() {
            return Err(GraphError::NodeOutOfRange {
                id: NodeId::new(successor_lists.len() - 1),
                size: payloads.len(),
            });
        }
        let mut store = Self::new();
        for payload in payloads {
            store.push(payload);
        }
        for (from, targets) in successor_lists.into_iter().enumerate() {
            for to in targets {
                store.link(NodeId::new(from), to)?;
            }
        }
        Ok(store)
    }

    /// Rebuilds a store from both adjacency directions, as persisted.
    ///
    /// Both lists are kept verbatim so predecessor order survives a round trip.
    fn from_adjacency(payloads: Vec<N>, preds: Vec<Vec<NodeId>>, succs: Vec<Vec<NodeId>>) -> GraphResult<Self> {
        let size = payloads.len();
        if preds.len() != size || succs.len() != size {
            return Err(GraphError::Persist(format!(
                "expected {} adjacency lists, found {} predecessor and {} successor lists",
                size,
                preds.len(),
                succs.len()
            )));
        }

        let mut forward = Vec::new();
        for (from, targets) in succs.iter().enumerate() {
            for &to in targets {
                if to.index() >= size {
                    return Err(GraphError::NodeOutOfRange { id: to, size });
                }
                forward.push((NodeId::new(from), to));
            }
        }
        let mut backward = Vec::new();
        for (to, sources) in preds.iter().enumerate() {
            for &from in sources {
                if from.index() >= size {
                    return Err(GraphError::NodeOutOfRange { id: from, size });
                }
                backward.push((from, NodeId::new(to)));
            }
        }
        forward.sort_unstable();
        backward.sort_unstable();
        if forward != backward {
            return Err(GraphError::Persist("predecessor and successor lists disagree".into()));
        }

        Ok(Self { payloads, preds, succs, edge_count: forward.len() })
    }

    fn push(&mut self, payload: N) -> NodeId {
        let id = NodeId::new(self.payloads.len());
        self.payloads.push(payload);
        self.preds.push(Vec::new());
        self.succs.push(Vec::new());
        id
    }

    fn link(&mut self, from: NodeId, to: NodeId) -> GraphResult<()> {
        self.check(from)?;
        self.check(to)?;
        self.succs[from.index()].push(to);
        self.preds[to.index()].push(from);
        self.edge_count += 1;
        Ok(())
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.payloads.len()).map(NodeId::new)
    }

    pub fn payloads(&self) -> &[N] { &self.payloads }

    pub fn payloads_mut(&mut self) -> &mut [N] { &mut self.payloads }
}

/// On-disk shape of a [`GraphStore`]. The edge count is derived on load.
#[derive(Deserialize)]
pub struct StoreRepr<N> {
    payloads: Vec<N>,
    preds: Vec<Vec<NodeId>>,
    succs: Vec<Vec<NodeId>>,
}

#[derive(Serialize)]
struct StoreReprRef<'a, N> {
    payloads: &'a [N],
    preds: &'a [Vec<NodeId>],
    succs: &'a [Vec<NodeId>],
}

impl<N> TryFrom<StoreRepr<N>> for GraphStore<N> {
    type Error = GraphError;

    fn try_from(repr: StoreRepr<N>) -> GraphResult<Self> {
        Self::from_adjacency(repr.payloads, repr.preds, repr.succs)
    }
}

impl<N: Serialize> Serialize for GraphStore<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StoreReprRef { payloads: &self.payloads, preds: &self.preds, succs: &self.succs }.serialize(serializer)
    }
}

impl<N> Graph for GraphStore<N> {
    type Payload = N;

    fn size(&self) -> usize { self.count() }

    fn get(&self, id: NodeId) -> GraphResult<&N> {
        self.check(id)?;
        Ok(&self.payloads[id.index()])
    }

    fn get_mut(&mut self, id: NodeId) -> GraphResult<&mut N> {
        self.check(id)?;
        Ok(&mut self.payloads[id.index()])
    }

    fn predecessors(&self, id: NodeId) -> GraphResult<&[NodeId]> {
        self.check(id)?;
        Ok(&self.preds[id.index()])
    }

    fn successors(&self, id: NodeId) -> GraphResult<&[NodeId]> {
        self.check(id)?;
        Ok(&self.succs[id.index()])
    }

    fn add_node(&mut self, payload: N) -> NodeId { self.push(payload) }

    fn add_edge(&mut self, from: NodeId, to: NodeId) -> GraphResult<()> { self.link(from, to) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_keeps_insertion_order() {
        let mut store = GraphStore::new();
        let a = store.add_node("a");
        let b = store.add_node("b");
        let c = store.add_node("c");
        store.add_edge(c, a).unwrap();
        store.add_edge(b, a).unwrap();
        store.add_edge(b, a).unwrap(); // duplicates are kept

        assert_eq!(store.predecessors(a).unwrap(), &[c, b, b]);
        assert_eq!(store.successors(b).unwrap(), &[a, a]);
        assert_eq!(store.edge_count(), 3);
    }

    #[test]
    fn test_out_of_range_ids_are_rejected() {
        let mut store = GraphStore::new();
        let a = store.add_node(1);
        let err = store.add_edge(a, NodeId(7)).unwrap_err();
        assert_eq!(err, GraphError::NodeOutOfRange { id: NodeId(7), size: 1 });
        assert!(store.get(NodeId(1)).is_err());
        assert!(store.successors(a).unwrap().is_empty(), "failed edge must not be half-inserted");
    }

    #[test]
    fn test_from_parts_builds_both_directions() {
        let store = GraphStore::from_parts(
            vec![10, 20, 30],
            vec![vec![NodeId(1), NodeId(2)], vec![NodeId(2)]],
        ).unwrap();
        assert_eq!(store.predecessors(NodeId(2)).unwrap(), &[NodeId(0), NodeId(1)]);
        assert_eq!(*store.get(NodeId(1)).unwrap(), 20);

        let bad = GraphStore::from_parts(vec![1], vec![vec![NodeId(3)]]);
        assert!(matches!(bad, Err(GraphError::NodeOutOfRange { .. })));
    }

    #[test]
    fn test_serialized_store_keeps_predecessor_order() {
        let mut store = GraphStore::new();
        let a = store.add_node('a');
        let b = store.add_node('b');
        let c = store.add_node('c');
        store.add_edge(c, a).unwrap();
        store.add_edge(b, a).unwrap();

        let json = serde_json::to_string(&store).unwrap();
        let back: GraphStore<char> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.predecessors(a).unwrap(), &[c, b]);
        assert_eq!(back.edge_count(), 2);
    }

    #[test]
    fn test_inconsistent_adjacency_is_rejected() {
        let out_of_range = GraphStore::from_adjacency(vec![1], vec![vec![]], vec![vec![NodeId(5)]]);
        assert_eq!(out_of_range.unwrap_err(), GraphError::NodeOutOfRange { id: NodeId(5), size: 1 });

        let short = GraphStore::from_adjacency(vec![1, 2, 3], vec![vec![]], vec![vec![]]);
        assert!(matches!(short, Err(GraphError::Persist(_))));

        // 0 -> 1 on one side only
        let one_sided = GraphStore::from_adjacency(vec![1, 2], vec![vec![], vec![]], vec![vec![NodeId(1)], vec![]]);
        assert!(matches!(one_sided, Err(GraphError::Persist(_))));
    }
}
