use std::sync::Arc;

use crate::curtail::CurtailSet;
use crate::error::Error;
use crate::history::History;
use crate::leftrec::LeftRecCtx;
use crate::reader::Reader;
use crate::result::{ParseResult, ResultSet};

/// What a parser returns: every way it matched, the parsers that were
/// curtailed while computing them, and the furthest failure seen along the
/// way.
#[derive(Debug, Clone, Default)]
pub struct Output {
    pub curtail: CurtailSet,
    pub results: ResultSet,
    pub err: Option<Error>,
}

impl Output {
    pub fn new(curtail: CurtailSet, results: ResultSet, err: Option<Error>) -> Self {
        Output {
            curtail,
            results,
            err,
        }
    }

    /// A single successful match.
    pub fn matched(result: ParseResult) -> Self {
        Output {
            results: ResultSet::single(result),
            ..Output::default()
        }
    }

    pub fn failed(err: Error) -> Self {
        Output {
            err: Some(err),
            ..Output::default()
        }
    }
}

/// A matching rule.
///
/// Parsing must be a function of `ctx` and the reader's position and input:
/// calling a parser twice with equal inputs yields equal outputs, otherwise
/// memoization gives wrong answers. The history may be used for caching and
/// counting calls only.
pub trait Parser<R: Reader>: Send + Sync {
    fn parse(&self, h: &mut History, ctx: &LeftRecCtx, r: &R) -> Output;
}

/// A shared, type-erased parser. Grammars are graphs of these.
pub type ParserRef<R> = Arc<dyn Parser<R>>;

impl<R: Reader, P: Parser<R> + ?Sized> Parser<R> for Arc<P> {
    fn parse(&self, h: &mut History, ctx: &LeftRecCtx, r: &R) -> Output {
        (**self).parse(h, ctx, r)
    }
}

pub trait ParserExt<R: Reader>: Parser<R> + Sized + 'static {
    fn boxed(self) -> ParserRef<R> {
        Arc::new(self)
    }
}

impl<R: Reader, P: Parser<R> + Sized + 'static> ParserExt<R> for P {}

/// A parser backed by a closure.
pub struct Func<F>(F);

impl<R, F> Parser<R> for Func<F>
where
    R: Reader,
    F: Fn(&mut History, &LeftRecCtx, &R) -> Output + Send + Sync,
{
    fn parse(&self, h: &mut History, ctx: &LeftRecCtx, r: &R) -> Output {
        (self.0)(h, ctx, r)
    }
}

pub fn func<R, F>(f: F) -> Func<F>
where
    R: Reader,
    F: Fn(&mut History, &LeftRecCtx, &R) -> Output + Send + Sync,
{
    Func(f)
}
