use std::sync::Arc;

use crate::builder::NodeBuilder;
use crate::curtail::CurtailSet;
use crate::error::Error;
use crate::history::History;
use crate::leftrec::LeftRecCtx;
use crate::node::Node;
use crate::parser::{Output, Parser, ParserRef};
use crate::reader::{Pos, Reader};
use crate::result::{ParseResult, ResultSet};

/// Which parser to run at each depth of a sequence.
pub enum Children<R: Reader> {
    /// A fixed list, one parser per depth.
    Fixed(Vec<ParserRef<R>>),
    /// The same parser at every depth.
    Repeat(ParserRef<R>),
    /// Values at even depths, separators at odd depths. A match must end with
    /// a value.
    Separated {
        value: ParserRef<R>,
        separator: ParserRef<R>,
    },
}

impl<R: Reader> Children<R> {
    fn at(&self, depth: usize) -> &ParserRef<R> {
        match self {
            Children::Fixed(parsers) => &parsers[depth],
            Children::Repeat(parser) => parser,
            Children::Separated { value, separator } => {
                if depth % 2 == 0 {
                    value
                } else {
                    separator
                }
            }
        }
    }

    fn can_end(&self, depth: usize) -> bool {
        match self {
            Children::Separated { .. } => depth == 0 || depth % 2 == 1,
            _ => true,
        }
    }
}

/// Runs child parsers one after another, exploring every result of every
/// child, and builds one node per complete match.
///
/// `seq`, `seq_try`, `many`, `many1`, `sep_by` and `sep_by1` are all
/// sequences; they differ in their children and in how many children a match
/// needs (`min`) and may have (`max`, unbounded for repetition).
pub struct Sequence<R: Reader> {
    children: Children<R>,
    min: usize,
    max: Option<usize>,
    builder: Arc<dyn NodeBuilder>,
}

impl<R: Reader> Sequence<R> {
    /// Panics on an empty fixed list or when `min > max`.
    pub fn new(
        children: Children<R>,
        min: usize,
        max: Option<usize>,
        builder: Arc<dyn NodeBuilder>,
    ) -> Self {
        if let Children::Fixed(ref parsers) = children {
            assert!(!parsers.is_empty(), "sequence needs at least one parser");
        }
        if let Some(max) = max {
            assert!(min <= max, "sequence min {} is above max {}", min, max);
        }
        Sequence {
            children,
            min,
            max,
            builder,
        }
    }
}

/// Match all of `parsers` in order.
pub fn seq<R: Reader>(builder: Arc<dyn NodeBuilder>, parsers: Vec<ParserRef<R>>) -> Sequence<R> {
    let len = parsers.len();
    Sequence::new(Children::Fixed(parsers), len, Some(len), builder)
}

/// Match as many of `parsers` in order as possible, but at least `min`.
pub fn seq_try<R: Reader>(
    builder: Arc<dyn NodeBuilder>,
    min: usize,
    parsers: Vec<ParserRef<R>>,
) -> Sequence<R> {
    let len = parsers.len();
    Sequence::new(Children::Fixed(parsers), min, Some(len), builder)
}

/// Match `parser` zero or more times.
pub fn many<R: Reader>(builder: Arc<dyn NodeBuilder>, parser: ParserRef<R>) -> Sequence<R> {
    Sequence::new(Children::Repeat(parser), 0, None, builder)
}

/// Match `parser` one or more times.
pub fn many1<R: Reader>(builder: Arc<dyn NodeBuilder>, parser: ParserRef<R>) -> Sequence<R> {
    Sequence::new(Children::Repeat(parser), 1, None, builder)
}

/// Match zero or more `value`s separated by `separator`. The builder sees
/// values and separators interleaved.
pub fn sep_by<R: Reader>(
    builder: Arc<dyn NodeBuilder>,
    value: ParserRef<R>,
    separator: ParserRef<R>,
) -> Sequence<R> {
    Sequence::new(Children::Separated { value, separator }, 0, None, builder)
}

/// Like `sep_by`, but at least one value is required.
pub fn sep_by1<R: Reader>(
    builder: Arc<dyn NodeBuilder>,
    value: ParserRef<R>,
    separator: ParserRef<R>,
) -> Sequence<R> {
    Sequence::new(Children::Separated { value, separator }, 1, None, builder)
}

impl<R: Reader> Parser<R> for Sequence<R> {
    fn parse(&self, h: &mut History, ctx: &LeftRecCtx, r: &R) -> Output {
        let mut explorer = Explorer {
            seq: self,
            h,
            reader: r,
            curtail: CurtailSet::new(),
            results: ResultSet::new(),
            err: None,
        };
        explorer.explore(ctx.clone(), r.pos());
        Output::new(explorer.curtail, explorer.results, explorer.err)
    }
}

/// State of one depth-first walk through a sequence's matches.
struct Explorer<'a, R: Reader> {
    seq: &'a Sequence<R>,
    h: &'a mut History,
    reader: &'a R,
    curtail: CurtailSet,
    results: ResultSet,
    err: Option<Error>,
}

/// One depth of the walk: the child's results still to be explored from
/// `pos`.
struct Frame {
    depth: usize,
    ctx: LeftRecCtx,
    pos: Pos,
    /// Where the depth before this one started.
    prev: Pos,
    /// Number of nodes on the shared path when this depth was entered.
    base: usize,
    merge_curtail: bool,
    results: std::iter::Enumerate<std::vec::IntoIter<ParseResult>>,
    matched: bool,
    emitted: bool,
}

impl<'a, R: Reader> Explorer<'a, R> {
    /// Walk every combination of child results depth first. Depths live on an
    /// explicit stack, and the nodes matched so far on a shared path, so long
    /// repetitions need neither native stack nor a copy of the path per depth.
    fn explore(&mut self, ctx: LeftRecCtx, start: Pos) {
        let mut path: Vec<Node> = Vec::new();
        let mut stack = vec![self.enter(0, ctx, start, start, 0, true)];

        while let Some(frame) = stack.last_mut() {
            let (i, result) = match frame.results.next() {
                Some(next) => next,
                None => {
                    // Every continuation was explored; emit the prefix itself
                    // when nothing longer could be.
                    let mut emitted = frame.emitted;
                    let (depth, pos, base, matched) =
                        (frame.depth, frame.pos, frame.base, frame.matched);
                    stack.pop();
                    path.truncate(base);
                    if self.accepts(depth) && (!matched || !emitted) {
                        self.emit(path.clone(), pos);
                        emitted = true;
                    }
                    if emitted {
                        if let Some(parent) = stack.last_mut() {
                            parent.emitted = true;
                        }
                    }
                    continue;
                }
            };
            frame.matched = true;

            // Once the cursor moved on, or the child was ambiguous, the
            // recursion counts of the start position no longer apply.
            if i > 0 || result.pos > frame.pos {
                frame.ctx = LeftRecCtx::new();
                frame.merge_curtail = false;
            }

            let ParseResult { node, pos: next } = result;
            let at_eof = node.as_ref().map_or(false, Node::is_eof);
            let stalled = self.stalled(frame, next);

            path.truncate(frame.base);
            path.extend(node);

            if at_eof || stalled {
                if self.accepts(frame.depth + 1) {
                    self.emit(path.clone(), next);
                    frame.emitted = true;
                }
                continue;
            }

            let (depth, ctx, pos, merge_curtail) =
                (frame.depth + 1, frame.ctx.clone(), frame.pos, frame.merge_curtail);
            let child = self.enter(depth, ctx, next, pos, path.len(), merge_curtail);
            stack.push(child);
        }
    }

    /// Run the child for `depth` at `pos`.
    fn enter(
        &mut self,
        depth: usize,
        ctx: LeftRecCtx,
        pos: Pos,
        prev: Pos,
        base: usize,
        merge_curtail: bool,
    ) -> Frame {
        let mut results: Vec<ParseResult> = Vec::new();
        if self.seq.max.map_or(true, |max| depth < max) {
            let parser = self.seq.children.at(depth);
            let output = parser.parse(self.h, &ctx, &self.reader.at(pos));

            self.err = Error::furthest(self.err.take(), output.err);
            if merge_curtail {
                self.curtail = self.curtail.union(&output.curtail);
            }
            results = output.results.into_iter().collect();
        }

        Frame {
            depth,
            ctx,
            pos,
            prev,
            base,
            merge_curtail,
            results: results.into_iter().enumerate(),
            matched: false,
            emitted: false,
        }
    }

    /// An unbounded repetition stops once a whole round made no progress. For
    /// separated values a round is a separator and the value after it.
    fn stalled(&self, frame: &Frame, next: Pos) -> bool {
        if self.seq.max.is_some() {
            return false;
        }
        match self.seq.children {
            Children::Separated { .. } => {
                frame.depth > 0 && frame.depth % 2 == 0 && next == frame.prev
            }
            _ => next == frame.pos,
        }
    }

    fn accepts(&self, depth: usize) -> bool {
        depth >= self.seq.min
            && self.seq.max.map_or(true, |max| depth <= max)
            && self.seq.children.can_end(depth)
    }

    fn emit(&mut self, nodes: Vec<Node>, pos: Pos) {
        let node = self.seq.builder.build(nodes);
        self.results.insert(ParseResult::new(node, pos));
    }
}
