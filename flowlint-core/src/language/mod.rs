//! The input representation the analyzer consumes: a resolved AST whose
//! function bodies have already been lowered to flow graphs by the provider.

pub mod ast;
