//! A synchronous, single-threaded dataflow evaluator over a computation DAG.
use super::node::ComputeNode;
use super::operation::Operation;
use crate::config::{EvalConfig, Reachability};
use crate::error::{Endpoint, GraphError, GraphResult};
use crate::graph::TopoCache;
use crate::store::{Graph, GraphStore, NodeId};
use serde::{Serialize, Deserialize};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

/// Something worth reporting about the last `evaluate` call that did not stop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The node is not reachable from the entry and was not evaluated.
    Unreachable(NodeId),
}

/// A DAG whose nodes are operations, with one entry and one exit.
///
/// The entry receives the external input as its sole operand, whatever edges
/// point at it; the exit's result is the output of [`ComputationalDag::evaluate`].
/// The topological order is seeded from the entry only, so nodes the entry
/// cannot reach are never evaluated.
#[derive(Serialize, Deserialize)]
#[serde(bound(serialize = "O: Serialize", deserialize = "O: Deserialize<'de>"))]
pub struct ComputationalDag<V, O = Box<dyn Operation<V>>> {
    store: GraphStore<ComputeNode<V, O>>,
    entry: Option<NodeId>,
    exit: Option<NodeId>,
    #[serde(default)]
    config: EvalConfig,
    #[serde(skip)]
    topo: TopoCache,
    #[serde(skip)]
    diagnostics: Vec<Diagnostic>,
}

impl<V, O> Default for ComputationalDag<V, O> {
    fn default() -> Self {
        Self {
            store: GraphStore::new(),
            entry: None,
            exit: None,
            config: EvalConfig::default(),
            topo: TopoCache::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl<V, O> ComputationalDag<V, O> {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: EvalConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &EvalConfig { &self.config }

    pub fn set_config(&mut self, config: EvalConfig) { self.config = config; }

    /// Adds a node running `op`.
    pub fn add_op(&mut self, op: O) -> NodeId {
        self.add_node(ComputeNode::new(op))
    }

    pub fn entry(&self) -> Option<NodeId> { self.entry }

    pub fn exit(&self) -> Option<NodeId> { self.exit }

    /// Changing the entry re-seeds the order, so the cached order is dropped.
    pub fn set_entry(&mut self, id: NodeId) -> GraphResult<()> {
        self.store.check(id)?;
        if self.entry != Some(id) {
            self.entry = Some(id);
            self.topo.invalidate();
        }
        Ok(())
    }

    pub fn set_exit(&mut self, id: NodeId) -> GraphResult<()> {
        self.store.check(id)?;
        self.exit = Some(id);
        Ok(())
    }

    /// Nodes reachable from the entry in evaluation order.
    pub fn topo_order(&mut self) -> GraphResult<&[NodeId]> {
        let entry = self.entry.ok_or(GraphError::MissingEndpoint(Endpoint::Entry))?;
        self.topo.get_or_rebuild(&self.store, [entry])
    }

    /// Nodes outside the entry-seeded order, ascending.
    pub fn unreachable(&mut self) -> GraphResult<Vec<NodeId>> {
        let count = self.store.count();
        let order = self.topo_order()?;
        Ok(complement(order, count))
    }

    /// Cached result of `id` from the last pass that reached it.
    pub fn result(&self, id: NodeId) -> Option<&V> {
        self.store.payloads().get(id.index()).and_then(|n| n.result())
    }

    pub fn clear_results(&mut self) {
        for node in self.store.payloads_mut() {
            node.result = None;
        }
    }

    /// Diagnostics recorded by the last `evaluate` call.
    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }

    pub fn recomputations(&self) -> u64 { self.topo.recomputations() }

    pub fn store(&self) -> &GraphStore<ComputeNode<V, O>> { &self.store }

    pub fn node_count(&self) -> usize { self.store.count() }
}

impl<V, O> ComputationalDag<V, O>
where
    V: Clone,
    O: Operation<V>,
{
    /// Runs one forward pass and returns the exit's result.
    ///
    /// Every reached node runs exactly once, after all of its operands. Results
    /// are staged and committed only if the whole pass succeeds; nodes the pass
    /// does not reach keep whatever they held before, unless
    /// `clear_stale_results` is set.
    pub fn evaluate(&mut self, input: V) -> GraphResult<V> {
        let entry = self.entry.ok_or(GraphError::MissingEndpoint(Endpoint::Entry))?;
        let exit = self.exit.ok_or(GraphError::MissingEndpoint(Endpoint::Exit))?;
        self.diagnostics.clear();

        let count = self.store.count();
        let order = self.topo.get_or_rebuild(&self.store, [entry])?;

        let unreachable = complement(order, count);
        if !unreachable.is_empty() {
            match self.config.reachability {
                Reachability::Strict => return Err(GraphError::Unreachable { nodes: unreachable }),
                Reachability::Diagnose => {
                    for id in unreachable {
                        warn!(node = id.0, "node is unreachable from the entry and will not be evaluated");
                        self.diagnostics.push(Diagnostic::Unreachable(id));
                    }
                }
            }
        }
        if !order.contains(&exit) {
            return Err(GraphError::ExitUnreachable { exit });
        }

        let mut staged: Vec<Option<V>> = Vec::with_capacity(count);
        staged.resize_with(count, || None);

        for &node in order {
            let payload = self.store.get(node)?;
            let value = {
                let mut operands: SmallVec<[&V; 4]> = SmallVec::new();
                if node == entry {
                    operands.push(&input);
                } else {
                    for &pred in self.store.predecessors(node)? {
                        let operand = staged[pred.index()]
                            .as_ref()
                            .ok_or(GraphError::MissingOperand { node, operand: pred })?;
                        operands.push(operand);
                    }
                }

                let arity = payload.op.arity();
                if !arity.accepts(operands.len()) {
                    return Err(GraphError::ArityMismatch {
                        node,
                        expected: arity.to_string(),
                        actual: operands.len(),
                    });
                }
                trace!(node = node.0, op = payload.op.name(), operands = operands.len(), "evaluating node");
                payload.op.apply(&operands).map_err(|source| GraphError::Operation { node, source })?
            };
            staged[node.index()] = Some(value);
        }
        let evaluated = order.len();

        if self.config.clear_stale_results {
            self.clear_results();
        }
        for (node, value) in self.store.payloads_mut().iter_mut().zip(staged) {
            if value.is_some() {
                node.result = value;
            }
        }
        debug!(evaluated, skipped = count - evaluated, "evaluation finished");

        self.result(exit).cloned().ok_or(GraphError::ExitUnreachable { exit })
    }
}

impl<V, O> Graph for ComputationalDag<V, O> {
    type Payload = ComputeNode<V, O>;

    fn size(&self) -> usize { self.store.size() }
    fn get(&self, id: NodeId) -> GraphResult<&Self::Payload> { self.store.get(id) }
    fn get_mut(&mut self, id: NodeId) -> GraphResult<&mut Self::Payload> { self.store.get_mut(id) }
    fn predecessors(&self, id: NodeId) -> GraphResult<&[NodeId]> { self.store.predecessors(id) }
    fn successors(&self, id: NodeId) -> GraphResult<&[NodeId]> { self.store.successors(id) }

    fn add_node(&mut self, payload: Self::Payload) -> NodeId {
        self.topo.invalidate();
        self.store.add_node(payload)
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) -> GraphResult<()> {
        self.store.add_edge(from, to)?;
        self.topo.invalidate();
        Ok(())
    }
}

impl<V: 'static> ComputationalDag<V> {
    /// Boxes `op` and adds it as a new node.
    pub fn add_operation(&mut self, op: impl Operation<V> + 'static) -> NodeId {
        self.add_op(Box::new(op))
    }
}

fn complement(order: &[NodeId], count: usize) -> Vec<NodeId> {
    let mut reached = vec![false; count];
    for id in order {
        reached[id.index()] = true;
    }
    (0..count).filter(|&i| !reached[i]).map(NodeId::new).collect()
}
