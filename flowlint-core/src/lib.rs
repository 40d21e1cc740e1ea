//! Flowlint's core: a flow-sensitive analysis that finds variables declared
//! without an initializer and used on a control-flow path where no preceding
//! assignment is guaranteed.
//!
//! The engine consumes an already-resolved AST whose function bodies have
//! been lowered to flow graphs (see [language::ast] and
//! [control_flow_analysis::flow_graph]); building that representation from
//! source text is the provider's job.

pub mod control_flow_analysis;
pub mod language;

use control_flow_analysis::{
    analyze_function, eval_var_decl, BranchId, Context, Reporter, Scope,
};
use flowlint_error::error::AnalysisError;
use flowlint_error::warning::{LintWarning, Warning};
use flowlint_types::Spanned;
use language::ast::{Module, ModuleDecl};

/// Analyzes one module's top-level declarations in source order and returns
/// the findings. Functions are analyzed from an empty scope; module-level var
/// declarations accumulate in a shared module scope and any of them that no
/// declaration-time initializer covered is reported once the walk completes.
///
/// A declaration shape the engine has no coverage for aborts the run: partial
/// results for unsupported input would be misleading.
pub fn analyze_module(module: &Module) -> Result<Vec<LintWarning>, AnalysisError> {
    let mut reporter = Reporter::new();
    let mut module_scope = Scope::new(BranchId::new(module.span.clone()), "module");

    for decl in &module.decls {
        match decl {
            ModuleDecl::Function(func) => {
                analyze_function(func, &[], &mut reporter)?;
            }
            ModuleDecl::Var(var_decl) => {
                let mut ctx = Context {
                    scope: &mut module_scope,
                    reporter: &mut reporter,
                };
                eval_var_decl(&mut ctx, var_decl)?;
            }
            ModuleDecl::Unsupported { kind, span } => {
                return Err(AnalysisError::UnsupportedDeclaration {
                    kind: kind.clone(),
                    span: span.clone(),
                });
            }
        }
    }

    for (id, decl) in module_scope.uninitialized.iter() {
        if !decl.uninitialized.is_empty() {
            reporter.report(
                *id,
                LintWarning {
                    span: decl.name.span(),
                    content: Warning::NeverInitialized {
                        name: decl.name.clone(),
                    },
                },
            );
        }
    }

    Ok(reporter.into_warnings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use control_flow_analysis::{BasicBlock, FlowGraph};
    use flowlint_types::{Ident, Span};
    use language::ast::{
        Binding, DeclId, Expression, ExpressionKind, Function, Literal, VarDecl,
    };
    use std::sync::Arc;

    fn src() -> Arc<str> {
        Arc::from(" ".repeat(128))
    }

    fn sp(src: &Arc<str>, at: usize) -> Span {
        Span::new(src.clone(), at, at + 1, None).unwrap()
    }

    fn module_var(src: &Arc<str>, name: &str, id: u32, at: usize, initialized: bool) -> ModuleDecl {
        ModuleDecl::Var(VarDecl {
            bindings: vec![Binding {
                name: Ident::new_with_override(name.into(), sp(src, at)),
                id: DeclId::new(id),
            }],
            initializers: if initialized {
                vec![Expression {
                    kind: ExpressionKind::Literal(Literal::Integer(0)),
                    span: sp(src, at),
                }]
            } else {
                vec![]
            },
            is_const: false,
            span: sp(src, at),
        })
    }

    #[test]
    fn module_var_without_initializer_is_reported_at_its_declaration() {
        let src = src();
        let module = Module {
            span: sp(&src, 0),
            decls: vec![
                module_var(&src, "count", 1, 10, false),
                module_var(&src, "limit", 2, 20, true),
            ],
        };
        let warnings = analyze_module(&module).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].span, sp(&src, 10));
        assert!(matches!(
            &warnings[0].content,
            Warning::NeverInitialized { name } if name.as_str() == "count"
        ));
    }

    #[test]
    fn const_module_declarations_are_ignored() {
        let src = src();
        let module = Module {
            span: sp(&src, 0),
            decls: vec![ModuleDecl::Var(VarDecl {
                bindings: vec![Binding {
                    name: Ident::new_with_override("max".into(), sp(&src, 10)),
                    id: DeclId::new(1),
                }],
                initializers: vec![],
                is_const: true,
                span: sp(&src, 10),
            })],
        };
        assert!(analyze_module(&module).unwrap().is_empty());
    }

    #[test]
    fn unsupported_declaration_shape_aborts_the_run() {
        let src = src();
        let module = Module {
            span: sp(&src, 0),
            decls: vec![
                module_var(&src, "count", 1, 10, false),
                ModuleDecl::Unsupported {
                    kind: "type alias".into(),
                    span: sp(&src, 30),
                },
            ],
        };
        assert!(matches!(
            analyze_module(&module),
            Err(AnalysisError::UnsupportedDeclaration { kind, .. }) if kind == "type alias"
        ));
    }

    #[test]
    fn functions_are_analyzed_in_source_order() {
        // Two functions each use their own bare declaration; both get a
        // finding, in declaration order.
        let src = src();
        let mut decls = vec![];
        for (base, id) in [(10usize, 1u32), (40, 2)] {
            let mut flow = FlowGraph::default();
            let decl = language::ast::Statement {
                kind: language::ast::StatementKind::Declaration(VarDecl {
                    bindings: vec![Binding {
                        name: Ident::new_with_override(format!("x{id}"), sp(&src, base + 2)),
                        id: DeclId::new(id),
                    }],
                    initializers: vec![],
                    is_const: false,
                    span: sp(&src, base + 2),
                }),
                span: sp(&src, base + 2),
            };
            let use_stmt = language::ast::Statement {
                kind: language::ast::StatementKind::Expression(Expression {
                    kind: ExpressionKind::Variable(language::ast::VariableRef {
                        name: Ident::new_with_override(format!("x{id}"), sp(&src, base + 4)),
                        target: Some(DeclId::new(id)),
                    }),
                    span: sp(&src, base + 4),
                }),
                span: sp(&src, base + 4),
            };
            let entry = flow.add_block(BasicBlock::new("entry", sp(&src, base), vec![decl, use_stmt]));
            flow.set_entry(entry);
            decls.push(ModuleDecl::Function(Function {
                name: Some(Ident::new_with_override(format!("f{id}"), sp(&src, base))),
                named_returns: vec![],
                body: flow,
                span: sp(&src, base),
            }));
        }
        let module = Module {
            span: sp(&src, 0),
            decls,
        };
        let warnings = analyze_module(&module).unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].span, sp(&src, 14));
        assert_eq!(warnings[1].span, sp(&src, 44));
    }
}
