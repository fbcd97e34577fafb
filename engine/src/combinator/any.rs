use crate::curtail::CurtailSet;
use crate::history::History;
use crate::leftrec::LeftRecCtx;
use crate::parser::{Output, Parser, ParserRef};
use crate::reader::Reader;
use crate::result::ResultSet;

/// Unordered alternation: the results of every alternative.
///
/// Where two alternatives end at the same position, the earlier alternative's
/// derivation is kept. Use this rather than `choice` for the alternatives of
/// a left-recursive rule, since the seed and its extensions come from
/// different alternatives.
pub struct Any<R: Reader> {
    parsers: Vec<ParserRef<R>>,
}

pub fn any<R: Reader>(parsers: Vec<ParserRef<R>>) -> Any<R> {
    assert!(!parsers.is_empty(), "any needs at least one parser");
    Any { parsers }
}

impl<R: Reader> Parser<R> for Any<R> {
    fn parse(&self, h: &mut History, ctx: &LeftRecCtx, r: &R) -> Output {
        let mut curtail = CurtailSet::new();
        let mut results = ResultSet::new();
        for parser in &self.parsers {
            let output = parser.parse(h, ctx, r);
            curtail = curtail.union(&output.curtail);
            results.union(output.results);
        }
        Output::new(curtail, results, None)
    }
}
