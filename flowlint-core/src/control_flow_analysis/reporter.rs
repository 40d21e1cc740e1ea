use crate::language::ast::DeclId;
use flowlint_error::warning::LintWarning;
use rustc_hash::FxHashSet;

/// Accumulates findings for one analysis run and guarantees at most one
/// finding per declaration, no matter how many unsafe uses follow the first.
///
/// Deduplication is first-use-wins, so declarations must be visited in source
/// order. One reporter is threaded by mutable reference through every nested
/// closure analysis of a module, since the same declaration can be reached
/// from several nested scopes via capture.
#[derive(Debug, Default)]
pub struct Reporter {
    warnings: Vec<LintWarning>,
    reported: FxHashSet<DeclId>,
}

impl Reporter {
    pub fn new() -> Reporter {
        Reporter::default()
    }

    pub(crate) fn is_reported(&self, id: DeclId) -> bool {
        self.reported.contains(&id)
    }

    /// Records a finding for `id`. A declaration that has already been
    /// reported is silently skipped.
    pub(crate) fn report(&mut self, id: DeclId, warning: LintWarning) {
        if self.reported.insert(id) {
            self.warnings.push(warning);
        }
    }

    pub fn warnings(&self) -> &[LintWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<LintWarning> {
        self.warnings
    }
}
