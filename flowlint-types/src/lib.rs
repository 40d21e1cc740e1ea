pub mod ident;
pub mod source_engine;
pub mod span;

pub use ident::*;
pub use source_engine::*;
pub use span::*;
