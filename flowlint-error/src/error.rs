use flowlint_types::{Ident, Span, Spanned};
use thiserror::Error;

/// Fatal faults of the analysis engine itself. These indicate that the
/// AST/CFG provider handed the engine a shape it has no coverage for, never a
/// defect in the analyzed code, and they abort the current run without
/// partial reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Flow graph of \"{function}\" still contains a cycle after back-edge removal.")]
    ResidualFlowCycle { function: Ident, span: Span },
    #[error("Flow graph of \"{function}\" has no entry block.")]
    MissingEntryBlock { function: Ident, span: Span },
    #[error("Unsupported top-level declaration shape: {kind}.")]
    UnsupportedDeclaration { kind: String, span: Span },
}

impl Spanned for AnalysisError {
    fn span(&self) -> Span {
        match self {
            AnalysisError::ResidualFlowCycle { span, .. } => span.clone(),
            AnalysisError::MissingEntryBlock { span, .. } => span.clone(),
            AnalysisError::UnsupportedDeclaration { span, .. } => span.clone(),
        }
    }
}
