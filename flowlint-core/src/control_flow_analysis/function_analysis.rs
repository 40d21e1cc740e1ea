use crate::control_flow_analysis::evaluate::{eval_statement, Context};
use crate::control_flow_analysis::flow_graph::BlockIndex;
use crate::control_flow_analysis::merge::merge_scopes;
use crate::control_flow_analysis::reporter::Reporter;
use crate::control_flow_analysis::scope::{BranchId, Scope};
use crate::language::ast::{Function, StatementKind};
use flowlint_error::error::AnalysisError;
use flowlint_error::warning::{LintWarning, Warning};
use flowlint_types::{Ident, Spanned};
use rustc_hash::FxHashMap;

/// Analyzes one function body: orders its blocks, merges and evaluates them
/// in order, and returns the function's overall exit scope.
///
/// `inputs` are the scopes feeding the first block. A top-level function
/// starts from nothing; a function literal re-entered from an enclosing
/// analysis receives a snapshot of the scope at the literal's position.
pub fn analyze_function(
    func: &Function,
    inputs: &[Scope],
    reporter: &mut Reporter,
) -> Result<Scope, AnalysisError> {
    let name = func
        .name
        .clone()
        .unwrap_or_else(|| Ident::new_with_override("fn literal".into(), func.span.clone()));
    let ordering = func.body.dependency_order(&name, &func.span)?;
    tracing::trace!(function = %name, "analyzing function body");

    let mut block_scopes: FxHashMap<BlockIndex, Scope> = FxHashMap::default();
    // End scopes of every block the function exits from, and separately of
    // those exiting through a bare `return`.
    let mut outputs = Vec::new();
    let mut bare_return_outputs = Vec::new();

    for (position, &index) in ordering.order.iter().enumerate() {
        let block = func.body.block(index);
        let branch = BranchId::new(block.span.clone());

        let mut scope = match ordering.deps.get(&index).filter(|deps| !deps.is_empty()) {
            None => merge_scopes(branch, block.label.clone(), inputs),
            Some(dep_indices) => {
                let dep_scopes: Vec<Scope> = dep_indices
                    .iter()
                    .filter_map(|dep| block_scopes.get(dep).cloned())
                    .collect();
                merge_scopes(branch, block.label.clone(), &dep_scopes)
            }
        };

        // The first block also registers named returns as fresh declarations.
        if position == 0 {
            for binding in &func.named_returns {
                scope.new_decl(binding);
            }
        }

        {
            let mut ctx = Context {
                scope: &mut scope,
                reporter,
            };
            for stmt in &block.statements {
                eval_statement(&mut ctx, stmt)?;
            }
        }

        if ordering.is_exit(&func.body, index) {
            outputs.push(scope.clone());
            if let Some(last) = block.statements.last() {
                if matches!(&last.kind, StatementKind::Return { values } if values.is_empty()) {
                    bare_return_outputs.push(scope.clone());
                }
            }
        }
        block_scopes.insert(index, scope);
    }

    let exit_scope = merge_scopes(BranchId::dummy(), "", &outputs);

    // Named returns are checked against the bare-return exits only: a path
    // returning explicit values never surfaces their current state.
    if !func.named_returns.is_empty() {
        let bare_exit = merge_scopes(BranchId::dummy(), "", &bare_return_outputs);
        for binding in &func.named_returns {
            let Some(decl) = bare_exit.uninitialized.get(&binding.id) else {
                continue;
            };
            if !decl.uninitialized.is_empty() {
                reporter.report(
                    binding.id,
                    LintWarning {
                        span: binding.name.span(),
                        content: Warning::NeverInitialized {
                            name: binding.name.clone(),
                        },
                    },
                );
            }
        }
    }

    Ok(exit_scope)
}
