//! The statement/expression evaluator. Walks one block's contents, mutating
//! the current [Scope] in place; the scope itself is the dataflow fact, so
//! nothing is returned besides fatal engine faults.

use crate::control_flow_analysis::function_analysis::analyze_function;
use crate::control_flow_analysis::reporter::Reporter;
use crate::control_flow_analysis::scope::Scope;
use crate::language::ast::{
    CallExpression, DeclId, Expression, ExpressionKind, Function, Statement, StatementKind,
    VarDecl, VariableRef,
};
use flowlint_error::error::AnalysisError;
use flowlint_error::warning::{BlamedBranch, LintWarning, Warning};
use flowlint_types::{Span, Spanned};

pub(crate) struct Context<'a> {
    pub(crate) scope: &'a mut Scope,
    pub(crate) reporter: &'a mut Reporter,
}

pub(crate) fn eval_statement(ctx: &mut Context, stmt: &Statement) -> Result<(), AnalysisError> {
    match &stmt.kind {
        StatementKind::Declaration(decl) => eval_var_decl(ctx, decl),
        StatementKind::Assignment { targets, values } => {
            // Non-identifier targets (field/index writes) never initialize
            // anything; reading their base is their only dataflow effect.
            for target in targets {
                if !matches!(target.kind, ExpressionKind::Variable(_)) {
                    eval_expression(ctx, target)?;
                }
            }
            // The right-hand side is read in full before any target becomes
            // initialized, so `x = x + 1` still flags the read of `x`.
            for value in values {
                eval_expression(ctx, value)?;
            }
            for target in targets {
                if let ExpressionKind::Variable(var) = &target.kind {
                    if let Some(id) = var.target {
                        ctx.scope.mark_initialized(id);
                    }
                }
            }
            Ok(())
        }
        StatementKind::Expression(expr) => eval_expression(ctx, expr),
        StatementKind::Spawn(call) | StatementKind::Defer(call) => eval_unordered_call(ctx, call),
        StatementKind::Return { values } => {
            for value in values {
                eval_expression(ctx, value)?;
            }
            Ok(())
        }
    }
}

pub(crate) fn eval_var_decl(ctx: &mut Context, decl: &VarDecl) -> Result<(), AnalysisError> {
    // Const declarations always carry initializers in the source language.
    if decl.is_const {
        return Ok(());
    }
    // Source invariant: initializers are either absent or one per binding.
    if !decl.initializers.is_empty() {
        for init in &decl.initializers {
            eval_expression(ctx, init)?;
        }
    } else {
        for binding in &decl.bindings {
            ctx.scope.new_decl(binding);
        }
    }
    Ok(())
}

fn eval_expression(ctx: &mut Context, expr: &Expression) -> Result<(), AnalysisError> {
    match &expr.kind {
        ExpressionKind::Call(call) => eval_call(ctx, call),
        ExpressionKind::AddressOf { operand } => {
            // Taking the address of a plain identifier, or of the immediate
            // field of one, is assumed to hand the location to something that
            // fills it in; the use-check is suppressed for this occurrence.
            match &operand.kind {
                ExpressionKind::Variable(var) => {
                    if let Some(id) = var.target {
                        ctx.scope.mark_initialized(id);
                    }
                    Ok(())
                }
                ExpressionKind::FieldAccess { base, .. }
                    if matches!(base.kind, ExpressionKind::Variable(_)) =>
                {
                    if let ExpressionKind::Variable(var) = &base.kind {
                        if let Some(id) = var.target {
                            ctx.scope.mark_initialized(id);
                        }
                    }
                    Ok(())
                }
                _ => eval_expression(ctx, operand),
            }
        }
        ExpressionKind::Variable(var) => {
            check_use(ctx, var, &expr.span);
            Ok(())
        }
        ExpressionKind::FnLiteral(func) => {
            // A literal that is neither invoked nor spawned here has unknown
            // execution timing; treat it like a deferred one.
            let snapshot = ctx.scope.clone();
            analyze_function(func, std::slice::from_ref(&snapshot), ctx.reporter)?;
            Ok(())
        }
        ExpressionKind::Unary { operand, .. } => eval_expression(ctx, operand),
        ExpressionKind::Binary { lhs, rhs, .. } => {
            eval_expression(ctx, lhs)?;
            eval_expression(ctx, rhs)
        }
        ExpressionKind::FieldAccess { base, .. } => eval_expression(ctx, base),
        ExpressionKind::Index { base, index } => {
            eval_expression(ctx, base)?;
            eval_expression(ctx, index)
        }
        ExpressionKind::Literal(_) => Ok(()),
    }
}

/// A call whose execution is ordered with the enclosing flow. Arguments are
/// evaluated as reads first; only then are the effects of synchronously
/// invoked function literals applied.
fn eval_call(ctx: &mut Context, call: &CallExpression) -> Result<(), AnalysisError> {
    if !matches!(call.callee.kind, ExpressionKind::FnLiteral(_)) {
        eval_expression(ctx, &call.callee)?;
    }
    for arg in &call.args {
        if !matches!(arg.kind, ExpressionKind::FnLiteral(_)) {
            eval_expression(ctx, arg)?;
        }
    }
    // Closures passed to a function as arguments are assumed to be called
    // before the function returns. This produces some false negatives but
    // such cases are hopefully rare.
    for arg in &call.args {
        if let ExpressionKind::FnLiteral(func) = &arg.kind {
            apply_synchronous_literal(ctx, func)?;
        }
    }
    if let ExpressionKind::FnLiteral(func) = &call.callee.kind {
        apply_synchronous_literal(ctx, func)?;
    }
    Ok(())
}

/// A call spawned as a concurrent unit or deferred for later execution. The
/// literal sees the captured variables' initialization state at the point of
/// forking, but initializations inside must not affect the outer flow, since
/// the actual execution could happen whenever.
fn eval_unordered_call(ctx: &mut Context, call: &CallExpression) -> Result<(), AnalysisError> {
    for arg in &call.args {
        eval_expression(ctx, arg)?;
    }
    if let ExpressionKind::FnLiteral(func) = &call.callee.kind {
        let snapshot = ctx.scope.clone();
        analyze_function(func, std::slice::from_ref(&snapshot), ctx.reporter)?;
        Ok(())
    } else {
        eval_expression(ctx, &call.callee)
    }
}

/// A synchronously invoked literal: its exit state is assumed visible to the
/// continuation, so it replaces the current scope's facts.
fn apply_synchronous_literal(ctx: &mut Context, func: &Function) -> Result<(), AnalysisError> {
    let snapshot = ctx.scope.clone();
    let exit = analyze_function(func, std::slice::from_ref(&snapshot), ctx.reporter)?;
    ctx.scope.uninitialized = exit.uninitialized;
    Ok(())
}

fn check_use(ctx: &mut Context, var: &VariableRef, use_span: &Span) {
    // A name the resolver knows nothing about (predeclared/builtin) has no
    // dataflow effect.
    let Some(id) = var.target else {
        return;
    };
    if ctx.reporter.is_reported(id) {
        return;
    }
    check_use_by_decl(ctx.scope, ctx.reporter, id, use_span.clone());
}

fn check_use_by_decl(scope: &Scope, reporter: &mut Reporter, id: DeclId, report_span: Span) {
    let Some(decl) = scope.get(id) else {
        return;
    };
    if decl.uninitialized.is_empty() {
        return;
    }
    let branches = decl
        .uninitialized
        .iter()
        .map(|(branch, info)| BlamedBranch {
            span: branch.span(),
            label: info.label.clone(),
        })
        .collect();
    reporter.report(
        id,
        LintWarning {
            span: report_span,
            content: Warning::UninitializedUse {
                name: decl.name.clone(),
                branches,
            },
        },
    );
}
