use std::any::Any;

use tracing::{event, Level};

use crate::error::Error;
use crate::history::History;
use crate::leftrec::LeftRecCtx;
use crate::node::Node;
use crate::parser::Parser;
use crate::reader::Reader;
use crate::value::Value;

/// Run `root` from the reader's position and return the node of the match
/// that got furthest into the input.
///
/// `Ok(None)` means the root matched but its builder discarded the node.
pub fn parse<R: Reader>(
    h: &mut History,
    reader: &R,
    root: &dyn Parser<R>,
) -> Result<Option<Node>, Error> {
    let start = reader.pos();
    let output = root.parse(h, &LeftRecCtx::new(), reader);

    event!(
        Level::DEBUG,
        results = output.results.len(),
        calls = h.total_calls(),
        cached = h.len(),
        "parse finished"
    );

    match output.results.into_iter().last() {
        Some(result) => Ok(result.node),
        None => Err(output
            .err
            .unwrap_or_else(|| Error::new(start, "no match"))),
    }
}

/// Parse, then evaluate the resulting node with `ctx` as the evaluation
/// context. A discarded root node evaluates to nil.
pub fn evaluate<R: Reader>(
    h: &mut History,
    reader: &R,
    root: &dyn Parser<R>,
    ctx: &dyn Any,
) -> anyhow::Result<Value> {
    let node = parse(h, reader, root)?;
    match node {
        Some(node) => node.value(ctx),
        None => Ok(Value::Nil),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder;
    use crate::combinator::testing::{failing, matching};
    use crate::combinator::{any, seq};
    use crate::interpreter;
    use crate::reader::{Pos, TextReader};

    #[test]
    fn picks_the_furthest_result() {
        let root = any(vec![matching(0, 1), matching(1, 3), matching(2, 2)]);
        let node = parse(&mut History::new(), &TextReader::new("abc"), &root)
            .unwrap()
            .unwrap();
        assert_eq!(node.token(), "P1");
    }

    #[test]
    fn surfaces_the_best_error() {
        let root = any(vec![failing(0, 2)]);
        let err = parse(&mut History::new(), &TextReader::new("abc"), &root).unwrap_err();
        assert_eq!(err, Error::new(Pos(0), "no match"));

        let err = parse(&mut History::new(), &TextReader::new("abc"), &failing(0, 2)).unwrap_err();
        assert_eq!(err.to_string(), "failed 0 at 2");
    }

    #[test]
    fn evaluates_the_root() -> anyhow::Result<()> {
        let root = seq(
            builder::all("PAIR", interpreter::array()),
            vec![matching(0, 1), matching(1, 2)],
        );
        let value = evaluate(&mut History::new(), &TextReader::new("ab"), &root, &())?;
        assert_eq!(value, Value::List(vec![Value::Int(0), Value::Int(1)]));
        Ok(())
    }

    #[test]
    fn discarded_root_is_nil() -> anyhow::Result<()> {
        let root = seq(builder::nil(), vec![matching(0, 1)]);
        let value = evaluate(&mut History::new(), &TextReader::new("a"), &root, &())?;
        assert!(value.is_nil());
        Ok(())
    }
}
