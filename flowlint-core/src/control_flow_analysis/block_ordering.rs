use std::collections::VecDeque;

use crate::control_flow_analysis::flow_graph::{BlockIndex, FlowGraph};
use flowlint_error::error::AnalysisError;
use flowlint_types::{Ident, Span};
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};

/// A forward-dependency-respecting total order over a function's live blocks,
/// together with each block's forward predecessors.
pub(crate) struct BlockOrdering {
    pub(crate) order: Vec<BlockIndex>,
    /// Forward predecessors per block. Back-edges and self-loops are already
    /// excluded; a block absent from this map has none.
    pub(crate) deps: FxHashMap<BlockIndex, Vec<BlockIndex>>,
    depths: FxHashMap<BlockIndex, usize>,
}

impl BlockOrdering {
    /// A block exits the function when it has no successor other than
    /// itself. A loop body that flows back to its header continues the
    /// function, so it never takes part in the exit merge.
    pub(crate) fn is_exit(&self, flow: &FlowGraph, block: BlockIndex) -> bool {
        if !self.depths.contains_key(&block) {
            return false;
        }
        flow.graph
            .neighbors_directed(block, Direction::Outgoing)
            .all(|succ| succ == block)
    }
}

impl FlowGraph {
    /// Orders the live blocks so that each block follows every block it
    /// forward-depends on. An edge B -> S counts as a forward dependency of S
    /// unless S's depth (distance from the entry block) is less than or equal
    /// to B's, in which case it is a loop continuation and ignored;
    /// self-loops are always ignored. Blocks unreachable from the entry are
    /// dropped.
    pub(crate) fn dependency_order(
        &self,
        function: &Ident,
        span: &Span,
    ) -> Result<BlockOrdering, AnalysisError> {
        let entry = self.entry.ok_or_else(|| AnalysisError::MissingEntryBlock {
            function: function.clone(),
            span: span.clone(),
        })?;

        // Depth of each block, breadth-first from the entry. Anything the
        // walk never reaches is unreachable and takes no part in ordering.
        let mut depths: FxHashMap<BlockIndex, usize> = FxHashMap::default();
        let mut queue = VecDeque::new();
        depths.insert(entry, 0);
        queue.push_back(entry);
        while let Some(block) = queue.pop_front() {
            let depth = depths[&block];
            for succ in self.graph.neighbors_directed(block, Direction::Outgoing) {
                if !depths.contains_key(&succ) {
                    depths.insert(succ, depth + 1);
                    queue.push_back(succ);
                }
            }
        }

        let mut deps: FxHashMap<BlockIndex, Vec<BlockIndex>> = FxHashMap::default();
        let live: Vec<BlockIndex> = self
            .graph
            .node_indices()
            .filter(|ix| depths.contains_key(ix))
            .collect();
        for &block in &live {
            for succ in self.graph.neighbors_directed(block, Direction::Outgoing) {
                if succ == block {
                    continue;
                }
                let (Some(&block_depth), Some(&succ_depth)) =
                    (depths.get(&block), depths.get(&succ))
                else {
                    continue;
                };
                if succ_depth <= block_depth {
                    // Loop continuation, not forward progress.
                    continue;
                }
                deps.entry(succ).or_default().push(block);
            }
        }

        // Repeatedly move any block whose remaining forward dependencies are
        // already ordered into the output. A full pass with no progress means
        // a cycle survived back-edge removal, which is an engine fault.
        let mut order = Vec::with_capacity(live.len());
        let mut ordered: FxHashSet<BlockIndex> = FxHashSet::default();
        let mut remaining = live;
        while !remaining.is_empty() {
            let before = remaining.len();
            remaining.retain(|&block| {
                let ready = deps
                    .get(&block)
                    .map_or(true, |ds| ds.iter().all(|d| ordered.contains(d)));
                if ready {
                    order.push(block);
                    ordered.insert(block);
                }
                !ready
            });
            if remaining.len() == before {
                return Err(AnalysisError::ResidualFlowCycle {
                    function: function.clone(),
                    span: span.clone(),
                });
            }
        }

        tracing::trace!(
            function = %function,
            blocks = order.len(),
            "ordered flow graph blocks"
        );

        Ok(BlockOrdering {
            order,
            deps,
            depths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_flow_analysis::flow_graph::BasicBlock;

    fn block(label: &str) -> BasicBlock {
        BasicBlock::new(label, Span::dummy(), vec![])
    }

    fn fn_name() -> Ident {
        Ident::new_no_span("test_fn".into())
    }

    #[test]
    fn diamond_orders_join_last() {
        let mut flow = FlowGraph::default();
        let entry = flow.add_block(block("entry"));
        let then_b = flow.add_block(block("if.then"));
        let else_b = flow.add_block(block("else"));
        let join = flow.add_block(block("if.done"));
        flow.set_entry(entry);
        flow.add_edge(entry, then_b, "then".into());
        flow.add_edge(entry, else_b, "else".into());
        flow.add_edge(then_b, join, "".into());
        flow.add_edge(else_b, join, "".into());

        let ordering = flow.dependency_order(&fn_name(), &Span::dummy()).unwrap();
        assert_eq!(ordering.order.first(), Some(&entry));
        assert_eq!(ordering.order.last(), Some(&join));
        assert_eq!(ordering.order.len(), 4);

        let mut join_deps = ordering.deps[&join].clone();
        join_deps.sort();
        let mut expected = vec![then_b, else_b];
        expected.sort();
        assert_eq!(join_deps, expected);
    }

    #[test]
    fn loop_back_edge_is_excluded() {
        let mut flow = FlowGraph::default();
        let entry = flow.add_block(block("entry"));
        let header = flow.add_block(block("for"));
        let body = flow.add_block(block("for.body"));
        let exit = flow.add_block(block("for.done"));
        flow.set_entry(entry);
        flow.add_edge(entry, header, "".into());
        flow.add_edge(header, body, "".into());
        flow.add_edge(header, exit, "".into());
        flow.add_edge(body, header, "loop".into());

        let ordering = flow.dependency_order(&fn_name(), &Span::dummy()).unwrap();
        assert_eq!(ordering.order.len(), 4);
        // The body's edge back to the header is no dependency of the header.
        assert_eq!(ordering.deps[&header], vec![entry]);
        // The body continues at the header, so it never exits the function.
        assert!(!ordering.is_exit(&flow, body));
        assert!(!ordering.is_exit(&flow, header));
        assert!(ordering.is_exit(&flow, exit));
    }

    #[test]
    fn self_loop_is_ignored() {
        let mut flow = FlowGraph::default();
        let entry = flow.add_block(block("entry"));
        let spin = flow.add_block(block("for"));
        flow.set_entry(entry);
        flow.add_edge(entry, spin, "".into());
        flow.add_edge(spin, spin, "loop".into());

        let ordering = flow.dependency_order(&fn_name(), &Span::dummy()).unwrap();
        assert_eq!(ordering.order, vec![entry, spin]);
        assert!(ordering.is_exit(&flow, spin));
    }

    #[test]
    fn unreachable_blocks_are_dropped() {
        let mut flow = FlowGraph::default();
        let entry = flow.add_block(block("entry"));
        let island = flow.add_block(block("island"));
        let also_island = flow.add_block(block("island2"));
        flow.set_entry(entry);
        flow.add_edge(island, also_island, "".into());

        let ordering = flow.dependency_order(&fn_name(), &Span::dummy()).unwrap();
        assert_eq!(ordering.order, vec![entry]);
        assert!(!ordering.is_exit(&flow, island));
    }

    #[test]
    fn missing_entry_is_fatal() {
        let flow = FlowGraph::default();
        let result = flow.dependency_order(&fn_name(), &Span::dummy());
        assert!(matches!(
            result,
            Err(AnalysisError::MissingEntryBlock { .. })
        ));
    }
}
