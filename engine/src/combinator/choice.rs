use crate::curtail::CurtailSet;
use crate::error::Error;
use crate::history::History;
use crate::leftrec::LeftRecCtx;
use crate::parser::{Output, Parser, ParserRef};
use crate::reader::Reader;
use crate::result::ResultSet;

/// Ordered alternation: the results of the first alternative that matches.
pub struct Choice<R: Reader> {
    label: &'static str,
    parsers: Vec<ParserRef<R>>,
}

/// Try `parsers` in order. `label` names what was expected when none of them
/// got past the start position.
pub fn choice<R: Reader>(label: &'static str, parsers: Vec<ParserRef<R>>) -> Choice<R> {
    assert!(!parsers.is_empty(), "choice {} needs at least one parser", label);
    Choice { label, parsers }
}

impl<R: Reader> Parser<R> for Choice<R> {
    fn parse(&self, h: &mut History, ctx: &LeftRecCtx, r: &R) -> Output {
        let start = r.pos();
        let mut curtail = CurtailSet::new();
        let mut err = None;
        let mut results = ResultSet::new();

        for parser in &self.parsers {
            let output = parser.parse(h, ctx, r);
            curtail = curtail.union(&output.curtail);
            err = Error::furthest(err, output.err);
            if !output.results.is_empty() {
                results = output.results;
                break;
            }
        }

        let err = match err {
            Some(err) if err.pos > start => err,
            _ => Error::expected(start, self.label),
        };
        Output::new(curtail, results, Some(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::testing::{failing, matching};
    use crate::reader::{Pos, TextReader};

    #[test]
    fn first_match_wins() {
        let p = choice("letter", vec![failing(0, 0), matching(1, 2), matching(2, 3)]);
        let out = p.parse(&mut History::new(), &LeftRecCtx::new(), &TextReader::new("abc"));
        assert_eq!(out.results.positions(), vec![Pos(2)]);
        assert_eq!(out.curtail, vec![0, 1].into_iter().collect::<CurtailSet>());
        assert_eq!(out.err, Some(Error::expected(Pos(0), "letter")));
    }

    #[test]
    fn keeps_errors_past_the_start() {
        let p = choice("value", vec![failing(0, 2), failing(1, 1)]);
        let out = p.parse(&mut History::new(), &LeftRecCtx::new(), &TextReader::new("abc"));
        assert!(out.results.is_empty());
        let err = out.err.unwrap();
        assert_eq!(err.pos, Pos(2));
        assert_eq!(err.message, "failed 0");
    }

    #[test]
    fn labels_failures_at_the_start() {
        let p = choice("value", vec![failing(0, 0), failing(1, 0)]);
        let out = p.parse(&mut History::new(), &LeftRecCtx::new(), &TextReader::new("abc"));
        assert_eq!(out.err.unwrap().to_string(), "expected value at 0");
    }

    #[test]
    #[should_panic(expected = "at least one parser")]
    fn empty_choice() {
        choice::<TextReader>("nothing", vec![]);
    }
}
