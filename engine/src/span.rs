use std::fmt::{self, Display};

use crate::reader::Pos;

/// A region of input between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub fn new(start: Pos, end: Pos) -> Self {
        assert!(start <= end, "span start {} after end {}", start, end);
        Span { start, end }
    }

    /// Check if this span contains the entirety of the other span.
    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A human readable position: 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_contains() {
        let outer = Span::new(Pos(0), Pos(11));
        let inner = Span::new(Pos(3), Pos(8));
        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!inner.contains(&outer));
        assert_eq!(inner.to_string(), "3..8");
    }

    #[test]
    #[should_panic(expected = "after end")]
    fn span_end_before_start() {
        Span::new(Pos(4), Pos(2));
    }
}
