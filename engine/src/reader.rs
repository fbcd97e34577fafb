use std::fmt::{self, Display};
use std::sync::Arc;

use crate::span::Location;

/// An offset into the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos(pub usize);

impl Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cursor over some input.
///
/// Readers are cheap to clone. Sibling branches of a parse each work on their
/// own clone so they never observe each other's progress.
pub trait Reader: Clone + Send + Sync + 'static {
    fn pos(&self) -> Pos;

    /// Number of unconsumed input units.
    fn remaining(&self) -> usize;

    fn is_eof(&self) -> bool {
        self.remaining() == 0
    }

    /// A clone of this reader moved to `pos`.
    fn at(&self, pos: Pos) -> Self;
}

/// Keep track of a position within a string, updating on successful
/// operations.
#[derive(Debug, Clone)]
pub struct TextReader {
    input: Arc<str>,
    idx: usize,
}

impl TextReader {
    pub fn new(input: &str) -> Self {
        TextReader {
            input: Arc::from(input),
            idx: 0,
        }
    }

    /// The unconsumed part of the input.
    pub fn rest(&self) -> &str {
        &self.input[self.idx..]
    }

    /// Move current index forward `n` bytes, stopping at the end of input.
    pub fn advance(&mut self, n: usize) {
        self.idx = (self.idx + n).min(self.input.len());
    }

    /// Check if a string matches the current input starting at the current
    /// index. The index will be updated on match.
    pub fn match_str(&mut self, s: &str) -> bool {
        let end = self.idx + s.len();
        if self.input.get(self.idx..end) == Some(s) {
            self.idx = end;
            true
        } else {
            false
        }
    }

    /// Line and column (both 1-based, columns counted in chars) of a position.
    pub fn location(&self, pos: Pos) -> Location {
        let end = pos.0.min(self.input.len());
        let before = self.input.get(..end).unwrap_or(&self.input);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Location { line, column }
    }
}

impl Reader for TextReader {
    fn pos(&self) -> Pos {
        Pos(self.idx)
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.idx
    }

    fn at(&self, pos: Pos) -> Self {
        TextReader {
            input: Arc::clone(&self.input),
            idx: pos.0.min(self.input.len()),
        }
    }
}
