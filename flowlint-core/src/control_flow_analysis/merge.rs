use crate::control_flow_analysis::scope::{BranchId, Decl, DeclBranch, Scope};
use im::OrdMap;

/// Combines the dataflow facts of a join block's predecessors into one fact.
///
/// Two passes are required because a variable's merged `changed` status must
/// be fully known before per-predecessor blame can be assigned:
///
/// 1. For every declaration present in any predecessor, the merged `changed`
///    is the logical OR across all predecessors.
/// 2. Blame per predecessor then falls into three cases. If the merged
///    `changed` is true and the predecessor assigned too, its remaining blame
///    set carries forward unchanged. If the merged `changed` is true but this
///    predecessor never assigned, the predecessor's own branch identity is
///    blamed — this path alone, not its inherited history. If nothing has
///    assigned the variable anywhere yet, the existing blame (ultimately the
///    declaration site) keeps propagating.
///
/// The result is independent of the order of `inputs`.
pub fn merge_scopes(branch: BranchId, label: impl Into<String>, inputs: &[Scope]) -> Scope {
    let mut merged: OrdMap<_, Decl> = OrdMap::new();

    for input in inputs {
        for (id, decl) in input.uninitialized.iter() {
            match merged.get_mut(id) {
                Some(entry) => entry.changed = entry.changed || decl.changed,
                None => {
                    merged.insert(
                        *id,
                        Decl {
                            name: decl.name.clone(),
                            changed: decl.changed,
                            uninitialized: OrdMap::new(),
                        },
                    );
                }
            }
        }
    }

    for input in inputs {
        for (id, decl) in input.uninitialized.iter() {
            let Some(entry) = merged.get_mut(id) else {
                continue;
            };
            if entry.changed {
                if decl.changed {
                    // Merge this predecessor's remaining blame forward.
                    for (blamed, info) in decl.uninitialized.iter() {
                        entry.uninitialized.insert(blamed.clone(), info.clone());
                    }
                } else {
                    // No assignment on this path while some other path did
                    // assign: this predecessor is the one missing the
                    // initialization.
                    entry.uninitialized.insert(
                        input.branch.clone(),
                        DeclBranch {
                            label: input.label.clone(),
                        },
                    );
                }
            } else {
                // Nothing assigned anywhere yet; keep the old blame sets.
                for (blamed, info) in decl.uninitialized.iter() {
                    entry.uninitialized.insert(blamed.clone(), info.clone());
                }
            }
        }
    }

    Scope {
        branch,
        label: label.into(),
        uninitialized: merged,
    }
}
