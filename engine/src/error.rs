use std::error;
use std::fmt::{self, Display};

use crate::reader::Pos;

/// A positioned parse failure: no derivation was found at `pos`.
///
/// Failures are recoverable. Combinators keep the one that got furthest into
/// the input since it best describes what the parser was expecting.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub pos: Pos,
    pub message: String,
}

impl Error {
    pub fn new(pos: Pos, message: impl Into<String>) -> Self {
        Error {
            pos,
            message: message.into(),
        }
    }

    pub fn expected(pos: Pos, what: &str) -> Self {
        Error::new(pos, format!("expected {}", what))
    }

    /// Pick the furthest of two optional errors, preferring `new` on ties.
    pub fn furthest(current: Option<Error>, new: Option<Error>) -> Option<Error> {
        match (current, new) {
            (Some(c), Some(n)) => {
                if n.pos >= c.pos {
                    Some(n)
                } else {
                    Some(c)
                }
            }
            (c, None) => c,
            (None, n) => n,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.pos)
    }
}

impl error::Error for Error {}
