use std::sync::Arc;

use crate::combinator::sequence::{seq, Sequence};
use crate::error::Error;
use crate::history::History;
use crate::leftrec::LeftRecCtx;
use crate::node::{Node, EOF};
use crate::parser::{Output, Parser, ParserRef};
use crate::reader::Reader;
use crate::result::ParseResult;
use crate::value::Value;

/// Matches only at the end of the input.
pub struct EndOfInput;

pub fn end_of_input() -> EndOfInput {
    EndOfInput
}

impl<R: Reader> Parser<R> for EndOfInput {
    fn parse(&self, _: &mut History, _: &LeftRecCtx, r: &R) -> Output {
        let pos = r.pos();
        if r.is_eof() {
            let node = Node::terminal(EOF, Value::Nil, pos, pos);
            Output::matched(ParseResult::new(Some(node), pos))
        } else {
            Output::failed(Error::expected(pos, "end of input"))
        }
    }
}

/// `p` followed by the end of the input. Builds `p`'s node, or nothing if
/// `p` built none.
pub fn sentence<R: Reader>(p: ParserRef<R>) -> Sequence<R> {
    let first = |children: Vec<Node>| -> Option<Node> {
        children.into_iter().find(|node| !node.is_eof())
    };
    seq(Arc::new(first), vec![p, Arc::new(EndOfInput)])
}
