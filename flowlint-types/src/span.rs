use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, hash::Hash, sync::Arc};

/// An integer-based handle to a source file, assigned by the [SourceEngine].
///
/// [SourceEngine]: crate::source_engine::SourceEngine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceId {
    pub(crate) id: u32,
}

impl SourceId {
    pub fn new(id: u32) -> SourceId {
        SourceId { id }
    }
}

pub trait Spanned {
    fn span(&self) -> Span;
}

/// A line/column pair within a source file, both one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A region of a source file, identified by byte offsets into the shared
/// source text. Equality, ordering, and hashing look only at the offsets and
/// the source id, never at the text itself.
#[derive(Clone, Serialize, Deserialize)]
pub struct Span {
    // The original source code.
    src: Arc<str>,
    // The byte position in the string of the start of the span.
    start: usize,
    // The byte position in the string of the end of the span.
    end: usize,
    // A reference counted pointer to the file from which this span originated.
    source_id: Option<SourceId>,
}

impl Span {
    pub fn new(src: Arc<str>, start: usize, end: usize, source_id: Option<SourceId>) -> Option<Span> {
        let _ = src.get(start..end)?;
        Some(Span {
            src,
            start,
            end,
            source_id,
        })
    }

    pub fn dummy() -> Span {
        Span {
            src: "".into(),
            start: 0,
            end: 0,
            source_id: None,
        }
    }

    pub fn src(&self) -> &Arc<str> {
        &self.src
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn source_id(&self) -> Option<&SourceId> {
        self.source_id.as_ref()
    }

    pub fn as_str(&self) -> &str {
        &self.src[self.start..self.end]
    }

    pub fn is_dummy(&self) -> bool {
        self.source_id.is_none() && self.start == 0 && self.end == 0
    }

    /// Creates a new span whose leading and trailing whitespace have been
    /// stripped off.
    pub fn trim(self) -> Span {
        let start_delta = self.as_str().len() - self.as_str().trim_start().len();
        let end_delta = self.as_str().len() - self.as_str().trim_end().len();
        Span {
            src: self.src,
            start: self.start + start_delta,
            end: self.end - end_delta,
            source_id: self.source_id,
        }
    }

    /// The one-based line/column position of the start of this span.
    pub fn line_col(&self) -> LineCol {
        let prefix = &self.src.as_bytes()[..self.start];
        let line = bytecount::count(prefix, b'\n') + 1;
        let col = match prefix.iter().rposition(|&b| b == b'\n') {
            Some(pos) => self.start - pos,
            None => self.start + 1,
        };
        LineCol { line, col }
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.source_id == other.source_id
    }
}

impl Eq for Span {}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source_id
            .cmp(&other.source_id)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.source_id.hash(state);
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Span")
            .field("src (ptr)", &self.src.as_ptr())
            .field("source_id", &self.source_id)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("as_str()", &self.as_str())
            .finish()
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_newlines() {
        let src: Arc<str> = "ab\ncd\nef".into();
        let span = Span::new(src, 6, 8, None).unwrap();
        assert_eq!(span.line_col(), LineCol { line: 3, col: 1 });
    }

    #[test]
    fn new_rejects_out_of_bounds() {
        let src: Arc<str> = "abc".into();
        assert!(Span::new(src.clone(), 0, 4, None).is_none());
        assert!(Span::new(src, 2, 1, None).is_none());
    }

    #[test]
    fn trim_strips_whitespace() {
        let src: Arc<str> = "  name  ".into();
        let span = Span::new(src, 0, 8, None).unwrap().trim();
        assert_eq!(span.as_str(), "name");
    }
}
