//! The uninitialized-variable dataflow analysis: block ordering over the flow
//! graph, per-branch scope merging, and the statement/expression evaluator
//! that updates the facts and emits findings.

mod block_ordering;
mod evaluate;
pub mod flow_graph;
mod function_analysis;
mod merge;
mod reporter;
mod scope;

pub(crate) use evaluate::{eval_var_decl, Context};
pub use flow_graph::{BasicBlock, BlockIndex, FlowEdge, FlowGraph};
pub use function_analysis::analyze_function;
pub use merge::merge_scopes;
pub use reporter::Reporter;
pub use scope::{BranchId, Decl, DeclBranch, Scope};
