use crate::error::{GraphError, GraphResult};
use crate::store::{Graph, NodeId};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Lazily maintained topological order.
///
/// `valid` is cleared by every structural mutation of the owning graph; the
/// order is rebuilt on the next read.
#[derive(Debug, Clone, Default)]
pub struct TopoCache {
    valid: bool,
    order: Vec<NodeId>,
    recomputations: u64,
}

impl TopoCache {
    pub fn new() -> Self { Self::default() }

    #[inline(always)]
    pub fn invalidate(&mut self) { self.valid = false; }

    pub fn is_valid(&self) -> bool { self.valid }

    /// Number of times the order has been rebuilt.
    pub fn recomputations(&self) -> u64 { self.recomputations }

    /// Returns the cached order, rebuilding it from `roots` first if stale.
    ///
    /// A failed rebuild leaves the cache invalid.
    pub fn get_or_rebuild<G, I>(&mut self, graph: &G, roots: I) -> GraphResult<&[NodeId]>
    where
        G: Graph,
        I: IntoIterator<Item = NodeId>,
    {
        if !self.valid {
            self.order = sort(graph, roots)?;
            self.valid = true;
            self.recomputations += 1;
            debug!(
                nodes = graph.size(),
                ordered = self.order.len(),
                recomputations = self.recomputations,
                "recomputed topological order"
            );
        }
        Ok(&self.order)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    None,
    Visiting, // on the current DFS path
    Visited,
}

/// Topological sort by depth-first postorder, reversed.
///
/// Roots are scanned in the order given; successors are explored in edge
/// insertion order. Only nodes reachable from `roots` appear in the result.
/// Uses an explicit work stack, so deep chains cannot overflow the call stack.
pub fn sort<G, I>(graph: &G, roots: I) -> GraphResult<Vec<NodeId>>
where
    G: Graph,
    I: IntoIterator<Item = NodeId>,
{
    let count = graph.size();
    let mut state = vec![VisitState::None; count];
    let mut postorder = Vec::with_capacity(count);
    // (node, index of the next successor to explore)
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    for root in roots {
        if root.index() >= count {
            return Err(GraphError::NodeOutOfRange { id: root, size: count });
        }
        if state[root.index()] != VisitState::None {
            continue;
        }
        state[root.index()] = VisitState::Visiting;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let succs = graph.successors(node)?;
            if let Some(&succ) = succs.get(frame.1) {
                frame.1 += 1;
                match state[succ.index()] {
                    VisitState::None => {
                        state[succ.index()] = VisitState::Visiting;
                        stack.push((succ, 0));
                    }
                    VisitState::Visiting => {
                        return Err(GraphError::CycleDetected { from: node, to: succ });
                    }
                    VisitState::Visited => {}
                }
            } else {
                stack.pop();
                state[node.index()] = VisitState::Visited;
                postorder.push(node);
            }
        }
    }

    postorder.reverse();
    Ok(postorder)
}

/// All nodes reachable from `start_nodes` along successor edges, starts included.
pub fn downstream_from<G: Graph>(graph: &G, start_nodes: &[NodeId]) -> GraphResult<HashSet<NodeId>> {
    walk(graph, start_nodes, |g, id| g.successors(id))
}

/// All nodes from which `start_nodes` can be reached, starts included.
pub fn upstream_from<G: Graph>(graph: &G, start_nodes: &[NodeId]) -> GraphResult<HashSet<NodeId>> {
    walk(graph, start_nodes, |g, id| g.predecessors(id))
}

fn walk<'g, G, F>(graph: &'g G, start_nodes: &[NodeId], next: F) -> GraphResult<HashSet<NodeId>>
where
    G: Graph,
    F: Fn(&'g G, NodeId) -> GraphResult<&'g [NodeId]>,
{
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from(start_nodes.to_vec());

    while let Some(node) = queue.pop_front() {
        let neighbours = next(graph, node)?;
        if visited.insert(node) {
            queue.extend(neighbours.iter().copied());
        }
    }
    Ok(visited)
}
