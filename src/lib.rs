//! Parse text with grammars composed from the `engine` combinators and the
//! `terminal` scanners.
//!
//! ```ignore
//! use curtail::{builder, interpreter, terminal, Grammar, ParserExt};
//!
//! let mut g = Grammar::new();
//! let a = g.rule("A");
//! a.define(curtail::any(vec![
//!     curtail::seq(
//!         builder::all("A", interpreter::concat()),
//!         vec![a.clone().boxed(), terminal::rune("B", 'b').boxed()],
//!     )
//!     .boxed(),
//!     terminal::rune("A", 'a').boxed(),
//! ]));
//!
//! let value = curtail::evaluate("abbb", &a.boxed(), &())?;
//! ```

use std::any::Any;
use std::sync::Arc;

use tracing::{event, Level};

mod error;
pub use error::Error;

pub use engine::{
    any, builder, choice, end_of_input, interpreter, many, many1, memoize, optional, sentence,
    sep_by, sep_by1, seq, seq_try, Grammar, History, Node, NodeBuilder, Parser, ParserExt,
    Location, ParserRef, Pos, Reader, Rule, TextReader, Value,
};
pub use terminal;

/// Options for the text-level entry points.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fail unless the root matches the whole input. When off, the longest
    /// match is used and any trailing input is ignored.
    pub require_eof: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config { require_eof: true }
    }
}

/// Parse all of `input` with `root`.
pub fn parse(input: &str, root: &ParserRef<TextReader>) -> Result<Option<Node>, Error> {
    parse_with(&Config::default(), input, root)
}

pub fn parse_with(
    config: &Config,
    input: &str,
    root: &ParserRef<TextReader>,
) -> Result<Option<Node>, Error> {
    let reader = TextReader::new(input);
    let mut h = History::new();

    event!(Level::DEBUG, len = input.len(), require_eof = config.require_eof, "parsing");
    let res = if config.require_eof {
        engine::parse(&mut h, &reader, &sentence(Arc::clone(root)))
    } else {
        engine::parse(&mut h, &reader, root)
    };

    res.map_err(|err| {
        let location = reader.location(err.pos);
        event!(Level::DEBUG, %location, message = %err.message, "parse failed");
        Error::Parse {
            location,
            message: err.message,
        }
    })
}

/// Parse all of `input` with `root` and evaluate the result. `ctx` is handed
/// to every interpreter.
pub fn evaluate(input: &str, root: &ParserRef<TextReader>, ctx: &dyn Any) -> anyhow::Result<Value> {
    evaluate_with(&Config::default(), input, root, ctx)
}

pub fn evaluate_with(
    config: &Config,
    input: &str,
    root: &ParserRef<TextReader>,
    ctx: &dyn Any,
) -> anyhow::Result<Value> {
    match parse_with(config, input, root)? {
        Some(node) => node.value(ctx),
        None => Ok(Value::Nil),
    }
}
