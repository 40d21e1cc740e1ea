use core::fmt;

use flowlint_types::{Ident, Span, Spanned};

/// A finding produced by the analyzer. Findings never abort an analysis run;
/// they accumulate and are surfaced to the caller once the run completes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LintWarning {
    pub span: Span,
    pub content: Warning,
}

impl Spanned for LintWarning {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

impl LintWarning {
    pub fn to_friendly_warning_string(&self) -> String {
        self.content.to_string()
    }
}

/// One control-flow path on which a variable was left uninitialized: where
/// the branch starts and what kind of branch it is ("else", "case 3",
/// "default", "for", "switch").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlamedBranch {
    pub span: Span,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Warning {
    /// A variable was read at a point where at least one incoming path never
    /// assigned it. Carries the complete list of blamed branches.
    UninitializedUse {
        name: Ident,
        branches: Vec<BlamedBranch>,
    },
    /// A named return or module-level variable that no path ever assigned.
    NeverInitialized { name: Ident },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UninitializedUse { name, branches } => {
                write!(
                    f,
                    "`{name}` hasn't been initialized in the following branches:"
                )?;
                for branch in branches {
                    write!(f, "\n - {} ({})", branch.span.line_col(), branch.label)?;
                }
                Ok(())
            }
            Warning::NeverInitialized { .. } => {
                write!(f, "This variable was never explicitly initialized")
            }
        }
    }
}
