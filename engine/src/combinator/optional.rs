use crate::history::History;
use crate::leftrec::LeftRecCtx;
use crate::node::{Node, NIL};
use crate::parser::{Output, Parser, ParserRef};
use crate::reader::Reader;
use crate::result::ParseResult;
use crate::value::Value;

/// Matches `p`, or nothing.
///
/// When `p` has no match a `NIL` placeholder with an empty span takes its
/// place, so enclosing sequences see the same number of children either way.
pub struct Optional<R: Reader> {
    inner: ParserRef<R>,
}

pub fn optional<R: Reader>(inner: ParserRef<R>) -> Optional<R> {
    Optional { inner }
}

impl<R: Reader> Parser<R> for Optional<R> {
    fn parse(&self, h: &mut History, ctx: &LeftRecCtx, r: &R) -> Output {
        let mut output = self.inner.parse(h, ctx, r);
        if output.results.is_empty() {
            let pos = r.pos();
            let placeholder = Node::terminal(NIL, Value::Nil, pos, pos);
            output
                .results
                .insert(ParseResult::new(Some(placeholder), pos));
        }
        output
    }
}
