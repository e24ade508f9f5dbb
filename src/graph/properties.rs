//! Structural queries over any [`Graph`]: sources, sinks, parallel edges and acyclicity.
use super::topology;
use crate::error::{GraphError, GraphResult};
use crate::store::{Graph, NodeId};
use std::collections::HashSet;

/// Nodes without predecessors, in ascending id order.
pub fn entries<G: Graph>(graph: &G) -> GraphResult<Vec<NodeId>> {
    filter_ids(graph, |g, id| Ok(g.predecessors(id)?.is_empty()))
}

/// Nodes without successors, in ascending id order.
pub fn exits<G: Graph>(graph: &G) -> GraphResult<Vec<NodeId>> {
    filter_ids(graph, |g, id| Ok(g.successors(id)?.is_empty()))
}

/// True if any (from, to) pair was inserted more than once.
pub fn has_parallel_edges<G: Graph>(graph: &G) -> GraphResult<bool> {
    for i in 0..graph.size() {
        let succs = graph.successors(NodeId::new(i))?;
        let mut seen = HashSet::with_capacity(succs.len());
        if !succs.iter().all(|s| seen.insert(*s)) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Full cycle check over every node. Does not touch any cached order.
pub fn is_acyclic<G: Graph>(graph: &G) -> GraphResult<bool> {
    match topology::sort(graph, (0..graph.size()).map(NodeId::new)) {
        Ok(_) => Ok(true),
        Err(GraphError::CycleDetected { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

/// `starts` and everything reachable from them.
pub fn descendants<G: Graph>(graph: &G, starts: &[NodeId]) -> GraphResult<HashSet<NodeId>> {
    topology::downstream_from(graph, starts)
}

/// `starts` and everything they depend on.
pub fn ancestors<G: Graph>(graph: &G, starts: &[NodeId]) -> GraphResult<HashSet<NodeId>> {
    topology::upstream_from(graph, starts)
}

fn filter_ids<G, F>(graph: &G, keep: F) -> GraphResult<Vec<NodeId>>
where
    G: Graph,
    F: Fn(&G, NodeId) -> GraphResult<bool>,
{
    let mut out = Vec::new();
    for i in 0..graph.size() {
        let id = NodeId::new(i);
        if keep(graph, id)? {
            out.push(id);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Dag;
    use rstest::rstest;

    fn build(n: usize, edges: &[(u32, u32)]) -> Dag<()> {
        let mut dag = Dag::with_nodes(n);
        for &(from, to) in edges {
            dag.add_edge(NodeId(from), NodeId(to)).unwrap();
        }
        dag
    }

    #[test]
    fn test_entries_and_exits() {
        let dag = build(5, &[(0, 1), (4, 1), (1, 2), (4, 2), (3, 0)]);
        assert_eq!(entries(&dag).unwrap(), vec![NodeId(3), NodeId(4)]);
        assert_eq!(exits(&dag).unwrap(), vec![NodeId(2)]);
    }

    #[rstest]
    #[case(&[(0, 1), (1, 2)], false)]
    #[case(&[(0, 1), (0, 1)], true)]
    #[case(&[(0, 1), (1, 0)], false)]
    fn test_parallel_edges(#[case] edges: &[(u32, u32)], #[case] expected: bool) {
        assert_eq!(has_parallel_edges(&build(3, edges)).unwrap(), expected);
    }

    #[rstest]
    #[case(&[(0, 1), (1, 2)], true)]
    #[case(&[(0, 1), (1, 2), (2, 0)], false)]
    #[case(&[(2, 2)], false)]
    #[case(&[], true)]
    fn test_acyclicity(#[case] edges: &[(u32, u32)], #[case] expected: bool) {
        assert_eq!(is_acyclic(&build(3, edges)).unwrap(), expected);
    }

    #[test]
    fn test_ancestors_and_descendants() {
        let dag = build(5, &[(0, 1), (4, 1), (1, 2), (4, 2), (3, 0)]);
        let down = descendants(&dag, &[NodeId(0)]).unwrap();
        assert_eq!(down, [0, 1, 2].into_iter().map(NodeId).collect::<HashSet<_>>());
        let up = ancestors(&dag, &[NodeId(1)]).unwrap();
        assert_eq!(up, [0, 1, 3, 4].into_iter().map(NodeId).collect::<HashSet<_>>());
    }
}
