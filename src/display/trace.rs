use crate::compute::{ComputationalDag, Operation};
use crate::store::{Graph, NodeId};
use std::collections::HashMap;
use std::fmt::{Debug, Write};

/// Renders the operand tree feeding `target`, with each node's cached result.
///
/// Operands are listed in predecessor order. A node reached a second time is
/// printed as a reference to the level where it first appeared. The walk uses
/// an explicit stack, so depth is bounded only by the size of the output.
pub fn format_trace<V, O>(dag: &ComputationalDag<V, O>, target: NodeId) -> String
where
    V: Debug,
    O: Operation<V>,
{
    let mut tracer = Tracer {
        dag,
        visited_at_level: HashMap::new(),
        output: String::new(),
    };

    if target.index() < dag.node_count() {
        let _ = writeln!(tracer.output, "TRACE for node {}:", target);
        let _ = writeln!(tracer.output, "--------------------------------------------------");
        tracer.trace_from(target);
    } else {
        let _ = writeln!(tracer.output, "Error: Invalid Node ID {:?}", target);
    }
    tracer.output
}

struct Tracer<'a, V, O> {
    dag: &'a ComputationalDag<V, O>,
    visited_at_level: HashMap<NodeId, usize>,
    output: String,
}

impl<'a, V: Debug, O: Operation<V>> Tracer<'a, V, O> {
    fn trace_from(&mut self, target: NodeId) {
        // (node, level, line prefix), popped in pre-order
        let mut stack: Vec<(NodeId, usize, String)> = vec![(target, 1, String::new())];

        while let Some((node_id, level, prefix)) = stack.pop() {
            if let Some(&first_seen) = self.visited_at_level.get(&node_id) {
                let _ = writeln!(self.output, "{}-> {} (Ref to L{})", prefix, node_id, first_seen);
                continue;
            }
            self.visited_at_level.insert(node_id, level);

            let dag = self.dag;
            let Ok(node) = dag.get(node_id) else {
                let _ = writeln!(self.output, "{}{} <missing>", prefix, node_id);
                continue;
            };
            let value = match node.result() {
                Some(v) => format!("{:?}", v),
                None => "<not evaluated>".to_string(),
            };
            let marker = if dag.entry() == Some(node_id) { " [ENTRY]" } else { "" };
            let _ = writeln!(self.output, "{}[L{}] {} {}{} = {}", prefix, level, node_id, node.op.name(), marker, value);

            // The entry takes the external input, not its predecessors.
            if dag.entry() == Some(node_id) {
                continue;
            }
            let parents = dag.predecessors(node_id).unwrap_or(&[]);
            let stem = Self::build_child_stem(&prefix);
            for (i, &parent) in parents.iter().enumerate().rev() {
                let connector = if i == parents.len() - 1 { "`--" } else { "|--" };
                stack.push((parent, level + 1, format!("{}{}", stem, connector)));
            }
        }
    }

    fn build_child_stem(prefix: &str) -> String {
        prefix.replace("|--", "|  ").replace("`--", "   ")
    }
}
