//! This is the flow graph, a graph which contains edges that represent
//! possible steps of program execution through one function body.

use std::fmt;

use crate::language::ast::Statement;
use flowlint_types::Span;

use petgraph::graph::EdgeIndex;
use petgraph::prelude::NodeIndex;

pub type BlockIndex = NodeIndex;

pub type Graph = petgraph::Graph<BasicBlock, FlowEdge>;

/// The control-flow graph of a single function body, as handed over by the
/// provider. Blocks live in the graph's arena and refer to each other by
/// index, so cyclic graphs need no special representation.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub(crate) graph: Graph,
    pub(crate) entry: Option<BlockIndex>,
}

/// A maximal straight-line statement sequence with a single entry and exit.
#[derive(Debug, Clone)]
pub struct BasicBlock {
    /// Human label of the branch this block starts ("else", "case 3",
    /// "default", "for", "switch").
    pub label: String,
    /// Location of the block's leading statement; doubles as the block's
    /// identity when attributing blame.
    pub span: Span,
    pub statements: Vec<Statement>,
}

impl BasicBlock {
    pub fn new(label: impl Into<String>, span: Span, statements: Vec<Statement>) -> BasicBlock {
        BasicBlock {
            label: label.into(),
            span,
            statements,
        }
    }
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} statements)", self.label, self.statements.len())
    }
}

#[derive(Clone)]
pub struct FlowEdge(String);

impl fmt::Debug for FlowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::convert::From<&str> for FlowEdge {
    fn from(o: &str) -> Self {
        FlowEdge(o.to_string())
    }
}

impl FlowGraph {
    pub fn add_block(&mut self, block: BasicBlock) -> BlockIndex {
        self.graph.add_node(block)
    }

    pub fn add_edge(&mut self, from: BlockIndex, to: BlockIndex, edge: FlowEdge) -> EdgeIndex {
        self.graph.add_edge(from, to, edge)
    }

    pub fn set_entry(&mut self, entry: BlockIndex) {
        self.entry = Some(entry);
    }

    pub fn entry(&self) -> Option<BlockIndex> {
        self.entry
    }

    pub fn block(&self, index: BlockIndex) -> &BasicBlock {
        &self.graph[index]
    }

    /// Prints out GraphViz DOT format for this graph.
    pub fn visualize(&self) {
        use petgraph::dot::{Config, Dot};
        tracing::info!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]));
    }
}
