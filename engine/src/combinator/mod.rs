//! Parsers built from other parsers.

pub mod any;
pub mod choice;
pub mod eof;
pub mod memoize;
pub mod optional;
pub mod sequence;

pub use any::{any, Any};
pub use choice::{choice, Choice};
pub use eof::{end_of_input, sentence, EndOfInput};
pub use memoize::{memoize, Memoize};
pub use optional::{optional, Optional};
pub use sequence::{many, many1, sep_by, sep_by1, seq, seq_try, Children, Sequence};
