use std::collections::HashMap;

use crate::leftrec::LeftRecCtx;
use crate::parser::Output;
use crate::reader::Pos;

/// A cached output together with the recursion counts it was computed under.
#[derive(Debug, Clone)]
struct Entry {
    ctx: LeftRecCtx,
    output: Output,
}

/// Per-parse session state: the memoization cache and call statistics.
///
/// A history belongs to one top-level parse. Sharing one between independent
/// parses would make cached results and recursion counts meaningless.
#[derive(Debug, Default)]
pub struct History {
    entries: HashMap<(usize, Pos), Entry>,
    calls: Vec<usize>,
    total_calls: usize,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// The cached output of parser `idx` at `pos`, if it was computed under
    /// recursion counts no greater than `ctx`'s.
    pub fn get(&self, idx: usize, pos: Pos, ctx: &LeftRecCtx) -> Option<&Output> {
        self.entries
            .get(&(idx, pos))
            .filter(|entry| entry.ctx.within(ctx))
            .map(|entry| &entry.output)
    }

    /// Cache `output` for parser `idx` at `pos`, replacing any earlier entry.
    pub fn save(&mut self, idx: usize, pos: Pos, ctx: LeftRecCtx, output: Output) {
        self.entries.insert((idx, pos), Entry { ctx, output });
    }

    /// Record one invocation of parser `idx`.
    pub fn register_call(&mut self, idx: usize) {
        if self.calls.len() <= idx {
            self.calls.resize(idx + 1, 0);
        }
        self.calls[idx] += 1;
        self.total_calls += 1;
    }

    /// How many times parser `idx` was invoked.
    pub fn calls(&self, idx: usize) -> usize {
        self.calls.get(idx).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls
    }

    /// Number of cached (parser, position) pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
