use crate::control_flow_analysis::FlowGraph;
use flowlint_types::{Ident, Span, Spanned};

/// An opaque handle to a variable declaration, assigned by the resolver that
/// built this AST. Equality is exact identity of the declaration site, never
/// name equality; handles are unique per module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(u32);

impl DeclId {
    pub fn new(id: u32) -> DeclId {
        DeclId(id)
    }
}

/// One source file's worth of top-level declarations, in source order.
#[derive(Debug, Clone)]
pub struct Module {
    pub span: Span,
    pub decls: Vec<ModuleDecl>,
}

#[derive(Debug, Clone)]
pub enum ModuleDecl {
    Function(Function),
    Var(VarDecl),
    /// A declaration shape the provider recognizes but the engine has no
    /// coverage for. Encountering one aborts the run.
    Unsupported { kind: String, span: Span },
}

/// A function declaration or function literal. The body has already been
/// lowered to a [FlowGraph] by the provider.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Option<Ident>,
    /// Declared return variables that a bare `return` surfaces implicitly.
    pub named_returns: Vec<Binding>,
    pub body: FlowGraph,
    pub span: Span,
}

/// A declared name together with its resolver handle.
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: Ident,
    pub id: DeclId,
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub bindings: Vec<Binding>,
    /// Either empty, or one initializer per binding.
    pub initializers: Vec<Expression>,
    pub is_const: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StatementKind {
    Declaration(VarDecl),
    Assignment {
        targets: Vec<Expression>,
        values: Vec<Expression>,
    },
    Expression(Expression),
    /// A call launched as a fire-and-forget concurrent unit.
    Spawn(CallExpression),
    /// A call deferred until the enclosing function exits.
    Defer(CallExpression),
    Return { values: Vec<Expression> },
}

#[derive(Debug, Clone)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExpressionKind {
    Literal(Literal),
    Variable(VariableRef),
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    AddressOf {
        operand: Box<Expression>,
    },
    FieldAccess {
        base: Box<Expression>,
        field: Ident,
    },
    Index {
        base: Box<Expression>,
        index: Box<Expression>,
    },
    Call(CallExpression),
    FnLiteral(Box<Function>),
}

/// An identifier occurrence. `target` is the resolver's verdict: `None` means
/// a predeclared or builtin name with no tracked declaration.
#[derive(Debug, Clone)]
pub struct VariableRef {
    pub name: Ident,
    pub target: Option<DeclId>,
}

#[derive(Debug, Clone)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub args: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Integer(u64),
    Boolean(bool),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    Dereference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LogicalAnd,
    LogicalOr,
}

impl Spanned for Statement {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

impl Spanned for Expression {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

impl Spanned for Function {
    fn span(&self) -> Span {
        self.span.clone()
    }
}
