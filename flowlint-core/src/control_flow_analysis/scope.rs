use crate::language::ast::{Binding, DeclId};
use flowlint_types::{Ident, Span, Spanned};
use im::OrdMap;

/// Identity of a CFG block for blame attribution: the location of the block's
/// leading statement. Ordered so blame sets iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchId(Span);

impl BranchId {
    pub fn new(span: Span) -> BranchId {
        BranchId(span)
    }

    pub fn dummy() -> BranchId {
        BranchId(Span::dummy())
    }
}

impl Spanned for BranchId {
    fn span(&self) -> Span {
        self.0.clone()
    }
}

/// Human label of a branch blamed for leaving a variable uninitialized. The
/// branch's location lives in the [BranchId] key alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclBranch {
    pub label: String,
}

/// Per-variable dataflow record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub name: Ident,
    /// True once any path contributing to this point has assigned the
    /// variable. Monotone: merges only ever OR it upwards.
    pub changed: bool,
    /// Branches on which the variable is still uninitialized. Empty means
    /// provably initialized on every path reaching this point.
    pub uninitialized: OrdMap<BranchId, DeclBranch>,
}

/// The dataflow fact attached to one program point: for every tracked
/// declaration, the branches on which it may still be uninitialized. Backed
/// by persistent maps, so cloning a scope for a sibling branch or a closure
/// snapshot is cheap and the clones never observe each other's edits.
#[derive(Debug, Clone)]
pub struct Scope {
    /// Identity of the block this scope belongs to; used as provenance for
    /// declarations evaluated here and as blame when this path fails to
    /// assign a variable other paths assigned.
    pub branch: BranchId,
    pub label: String,
    pub uninitialized: OrdMap<DeclId, Decl>,
}

impl Scope {
    pub fn new(branch: BranchId, label: impl Into<String>) -> Scope {
        Scope {
            branch,
            label: label.into(),
            uninitialized: OrdMap::new(),
        }
    }

    pub(crate) fn get(&self, id: DeclId) -> Option<&Decl> {
        self.uninitialized.get(&id)
    }

    /// Records a bare declaration. Provenance is this scope's own branch: as
    /// long as nothing assigns the variable, the declaration site itself is
    /// the blamed path.
    pub(crate) fn new_decl(&mut self, binding: &Binding) {
        let mut uninitialized = OrdMap::new();
        uninitialized.insert(
            self.branch.clone(),
            DeclBranch {
                label: self.label.clone(),
            },
        );
        self.uninitialized.insert(
            binding.id,
            Decl {
                name: binding.name.clone(),
                changed: false,
                uninitialized,
            },
        );
    }

    /// Marks a tracked variable as assigned at this point: all blame is
    /// cleared and `changed` flips on for good.
    pub(crate) fn mark_initialized(&mut self, id: DeclId) {
        if let Some(decl) = self.uninitialized.get_mut(&id) {
            decl.changed = true;
            decl.uninitialized = OrdMap::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(name: &str, id: u32) -> Binding {
        Binding {
            name: Ident::new_no_span(name.into()),
            id: DeclId::new(id),
        }
    }

    #[test]
    fn new_decl_blames_the_declaring_branch() {
        let mut scope = Scope::new(BranchId::dummy(), "entry");
        scope.new_decl(&binding("x", 1));
        let decl = scope.get(DeclId::new(1)).unwrap();
        assert!(!decl.changed);
        assert_eq!(decl.uninitialized.len(), 1);
        let (branch, info) = decl.uninitialized.iter().next().unwrap();
        assert_eq!(branch, &scope.branch);
        assert_eq!(info.label, "entry");
    }

    #[test]
    fn mark_initialized_clears_blame() {
        let mut scope = Scope::new(BranchId::dummy(), "entry");
        scope.new_decl(&binding("x", 1));
        scope.mark_initialized(DeclId::new(1));
        let decl = scope.get(DeclId::new(1)).unwrap();
        assert!(decl.changed);
        assert!(decl.uninitialized.is_empty());
    }

    #[test]
    fn mark_initialized_ignores_untracked_ids() {
        let mut scope = Scope::new(BranchId::dummy(), "entry");
        scope.mark_initialized(DeclId::new(7));
        assert!(scope.uninitialized.is_empty());
    }
}
