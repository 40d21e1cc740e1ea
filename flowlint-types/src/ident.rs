use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};
use std::{
    cmp::{Ord, Ordering},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// An [Ident] is an _identifier_ with a corresponding `span` from which it was
/// derived. Hashing and equality only look at its textual name, so that name
/// lookups aren't reliant on the span itself, which will often be different.
#[derive(Clone, Serialize, Deserialize)]
pub struct Ident {
    name_override_opt: Option<Arc<String>>,
    span: Span,
}

impl Ident {
    pub fn as_str(&self) -> &str {
        self.name_override_opt
            .as_deref()
            .map(|x| x.as_str())
            .unwrap_or_else(|| self.span.as_str())
    }

    pub fn new(span: Span) -> Ident {
        let span = span.trim();
        Ident {
            name_override_opt: None,
            span,
        }
    }

    pub fn new_with_override(name_override: String, span: Span) -> Ident {
        Ident {
            name_override_opt: Some(Arc::new(name_override)),
            span,
        }
    }

    pub fn new_no_span(name: String) -> Ident {
        Ident {
            name_override_opt: Some(Arc::new(name)),
            span: Span::dummy(),
        }
    }
}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Ident {}

impl Ord for Ident {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Ident {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Spanned for Ident {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}
