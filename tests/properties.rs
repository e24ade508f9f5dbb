use dagflow_core::graph::properties;
use dagflow_core::{Dag, Graph, GraphError, NodeId};
use petgraph::graph::DiGraph;
use proptest::prelude::*;

/// Node count and edges of a random acyclic graph.
///
/// Edges always run from lower to higher rank in a shuffled ranking, so node
/// ids are not already in topological order.
fn acyclic_graph() -> impl Strategy<Value = (usize, Vec<(u32, u32)>)> {
    (1usize..40)
        .prop_flat_map(|n| {
            let ranking = Just((0..n as u32).collect::<Vec<_>>()).prop_shuffle();
            let raw = prop::collection::vec((0..n, 0..n), 0..n * 3);
            (Just(n), ranking, raw)
        })
        .prop_map(|(n, ranking, raw)| {
            let edges = raw
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (ranking[a.min(b)], ranking[a.max(b)]))
                .collect();
            (n, edges)
        })
}

/// Any directed graph, cycles and self-loops included.
fn any_graph() -> impl Strategy<Value = (usize, Vec<(u32, u32)>)> {
    (1usize..12).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n as u32, 0..n as u32), 0..n * 2);
        (Just(n), edges)
    })
}

fn build(n: usize, edges: &[(u32, u32)]) -> Dag<()> {
    let mut dag = Dag::new();
    for _ in 0..n {
        dag.add_node(());
    }
    for &(from, to) in edges {
        dag.add_edge(NodeId(from), NodeId(to)).unwrap();
    }
    dag
}

proptest! {
    #[test]
    fn order_is_a_permutation_respecting_every_edge((n, edges) in acyclic_graph()) {
        let mut dag = build(n, &edges);
        let order = dag.topo_order().unwrap().to_vec();

        prop_assert_eq!(order.len(), n);
        let mut position = vec![usize::MAX; n];
        for (i, id) in order.iter().enumerate() {
            prop_assert_eq!(position[id.index()], usize::MAX, "node listed twice");
            position[id.index()] = i;
        }
        for &(from, to) in &edges {
            prop_assert!(position[from as usize] < position[to as usize]);
        }
    }

    #[test]
    fn identical_builds_give_identical_orders((n, edges) in acyclic_graph()) {
        let first = build(n, &edges).topo_order().unwrap().to_vec();
        let second = build(n, &edges).topo_order().unwrap().to_vec();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reads_between_mutations_reuse_the_cache((n, edges) in acyclic_graph()) {
        let mut dag = build(n, &edges);
        let first = dag.topo_order().unwrap().to_vec();
        let second = dag.topo_order().unwrap().to_vec();
        prop_assert_eq!(first, second);
        prop_assert_eq!(dag.recomputations(), 1);
    }

    #[test]
    fn mutations_are_reflected_on_next_read((n, edges) in acyclic_graph()) {
        let mut dag = build(n, &edges);
        dag.topo_order().unwrap();

        // New sink fed by every existing node.
        let sink = dag.add_node(());
        for i in 0..n {
            dag.add_edge(NodeId::new(i), sink).unwrap();
        }
        let order = dag.topo_order().unwrap().to_vec();
        prop_assert_eq!(order.len(), n + 1);
        prop_assert_eq!(*order.last().unwrap(), sink);
        prop_assert_eq!(dag.recomputations(), 2);
    }

    #[test]
    fn cycle_detection_matches_petgraph((n, edges) in any_graph()) {
        let mut reference = DiGraph::<(), ()>::new();
        let nodes: Vec<_> = (0..n).map(|_| reference.add_node(())).collect();
        for &(from, to) in &edges {
            reference.add_edge(nodes[from as usize], nodes[to as usize], ());
        }
        let cyclic = petgraph::algo::is_cyclic_directed(&reference);

        let mut dag = build(n, &edges);
        prop_assert_eq!(properties::is_acyclic(&dag).unwrap(), !cyclic);
        match dag.topo_order() {
            Ok(_) => prop_assert!(!cyclic),
            Err(GraphError::CycleDetected { from, to }) => {
                prop_assert!(cyclic);
                prop_assert!(dag.successors(from).unwrap().contains(&to));
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }
}
