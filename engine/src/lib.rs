//! A parser-combinator engine that accepts left-recursive and ambiguous
//! grammars.
//!
//! Every parser returns all the ways it matched from a position, not just the
//! first. Memoized parsers cache those results per position, and cut left
//! recursion short once it is nested deeper than the remaining input could
//! support, so a rule like `A -> A 'b' | 'a'` grows its matches from the seed
//! instead of looping.

pub mod builder;
pub mod combinator;
pub mod interpreter;

mod curtail;
mod error;
mod grammar;
mod history;
mod leftrec;
mod node;
mod parse;
mod parser;
mod reader;
mod result;
mod span;
mod value;

pub use builder::NodeBuilder;
pub use combinator::{
    any, choice, end_of_input, many, many1, memoize, optional, sentence, sep_by, sep_by1, seq,
    seq_try,
};
pub use curtail::CurtailSet;
pub use error::Error;
pub use grammar::{Grammar, Rule};
pub use history::History;
pub use interpreter::Interpreter;
pub use leftrec::LeftRecCtx;
pub use node::{Node, NonTerminal, Terminal, EOF, NIL};
pub use parse::{evaluate, parse};
pub use parser::{func, Func, Output, Parser, ParserExt, ParserRef};
pub use reader::{Pos, Reader, TextReader};
pub use result::{ParseResult, ResultSet};
pub use span::{Location, Span};
pub use value::Value;
