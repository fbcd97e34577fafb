use std::sync::Arc;

use tracing::{event, Level};

use crate::curtail::CurtailSet;
use crate::history::History;
use crate::leftrec::LeftRecCtx;
use crate::parser::{Output, Parser, ParserRef};
use crate::reader::Reader;
use crate::result::ResultSet;

/// Caches the results of a parser per position and bounds its left recursion.
pub struct Memoize<R: Reader> {
    idx: usize,
    inner: ParserRef<R>,
}

/// Memoize `inner` under parser index `idx`.
///
/// Indices identify cache entries and recursion counts, so every memoized
/// parser in a grammar needs its own. `Grammar::memoize` hands them out.
pub fn memoize<R: Reader>(idx: usize, inner: impl Parser<R> + 'static) -> Memoize<R> {
    Memoize {
        idx,
        inner: Arc::new(inner),
    }
}

impl<R: Reader> Memoize<R> {
    pub fn idx(&self) -> usize {
        self.idx
    }
}

impl<R: Reader> Parser<R> for Memoize<R> {
    fn parse(&self, h: &mut History, ctx: &LeftRecCtx, r: &R) -> Output {
        parse_memoized(self.idx, &*self.inner, h, ctx, r)
    }
}

/// Run `inner` for parser `idx` through the history's cache.
///
/// A cached output is reused when it was computed under recursion counts no
/// greater than the caller's. Once `idx` has been entered more often at this
/// position than there is input left (plus one), another level of recursion
/// can not consume anything new, so the call is cut short and reported in the
/// curtail set instead.
pub(crate) fn parse_memoized<R: Reader>(
    idx: usize,
    inner: &dyn Parser<R>,
    h: &mut History,
    ctx: &LeftRecCtx,
    r: &R,
) -> Output {
    let pos = r.pos();
    if let Some(cached) = h.get(idx, pos, ctx) {
        event!(Level::TRACE, parser = idx, %pos, "cache hit");
        return cached.clone();
    }

    if ctx.get(idx) > r.remaining() + 1 {
        event!(Level::TRACE, parser = idx, %pos, depth = ctx.get(idx), "curtailed");
        return Output::new(CurtailSet::single(idx), ResultSet::new(), None);
    }

    h.register_call(idx);
    let output = inner.parse(h, &ctx.increment(idx), r);
    h.save(idx, pos, ctx.filter(&output.curtail), output.clone());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::parser::func;
    use crate::reader::{Pos, TextReader};
    use crate::result::ParseResult;
    use crate::value::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Matches one char and reports parser 9 as curtailed, counting its calls.
    fn counting(calls: Arc<AtomicUsize>) -> impl Parser<TextReader> {
        func(move |_: &mut History, _: &LeftRecCtx, r: &TextReader| {
            calls.fetch_add(1, Ordering::SeqCst);
            let start = r.pos();
            let node = Node::terminal("CHAR", Value::Nil, start, Pos(start.0 + 1));
            Output::new(
                CurtailSet::single(9),
                ResultSet::single(ParseResult::new(Some(node), Pos(start.0 + 1))),
                None,
            )
        })
    }

    #[test]
    fn reuses_results_computed_under_smaller_counts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = memoize(0, counting(Arc::clone(&calls)));
        let mut h = History::new();
        let r = TextReader::new("abc");

        let c1: LeftRecCtx = vec![(9, 1)].into_iter().collect();
        let c2: LeftRecCtx = vec![(9, 2), (3, 1)].into_iter().collect();

        let first = p.parse(&mut h, &c1, &r);
        let second = p.parse(&mut h, &c2, &r);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.calls(0), 1);
        assert_eq!(first.results.positions(), second.results.positions());
        assert_eq!(second.curtail, CurtailSet::single(9));
    }

    #[test]
    fn recomputes_for_shallower_callers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = memoize(0, counting(Arc::clone(&calls)));
        let mut h = History::new();
        let r = TextReader::new("abc");

        let deep: LeftRecCtx = vec![(9, 2)].into_iter().collect();
        p.parse(&mut h, &deep, &r);
        p.parse(&mut h, &LeftRecCtx::new(), &r);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cache_is_per_position() {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = memoize(0, counting(Arc::clone(&calls)));
        let mut h = History::new();
        let r = TextReader::new("abc");

        p.parse(&mut h, &LeftRecCtx::new(), &r);
        p.parse(&mut h, &LeftRecCtx::new(), &r.at(Pos(1)));
        p.parse(&mut h, &LeftRecCtx::new(), &r.at(Pos(1)));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn curtails_when_recursion_exceeds_remaining_input() {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = memoize(4, counting(Arc::clone(&calls)));
        let mut h = History::new();
        let r = TextReader::new("abc");

        // Three chars remain, so four levels are still allowed.
        let allowed: LeftRecCtx = vec![(4, 4)].into_iter().collect();
        let out = p.parse(&mut h, &allowed, &r);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(out.results.len(), 1);

        let mut h = History::new();
        let too_deep: LeftRecCtx = vec![(4, 5)].into_iter().collect();
        let out = p.parse(&mut h, &too_deep, &r);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(out.results.is_empty());
        assert_eq!(out.curtail, CurtailSet::single(4));
        assert!(out.err.is_none());
    }

    #[test]
    fn inner_sees_incremented_context() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in = Arc::clone(&seen);
        let p = memoize(
            2,
            func(move |_: &mut History, ctx: &LeftRecCtx, _: &TextReader| {
                seen_in.store(ctx.get(2), Ordering::SeqCst);
                Output::default()
            }),
        );
        let mut h = History::new();
        let ctx: LeftRecCtx = vec![(2, 1)].into_iter().collect();
        p.parse(&mut h, &ctx, &TextReader::new("x"));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
