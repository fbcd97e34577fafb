use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::combinator::memoize::{memoize, parse_memoized, Memoize};
use crate::history::History;
use crate::leftrec::LeftRecCtx;
use crate::parser::{Output, Parser, ParserRef};
use crate::reader::Reader;

/// Interns rule names into dense parser indices.
///
/// Indices are what the history keys its cache and call counts by, so a
/// grammar should hand out every index used by its memoized parsers.
#[derive(Debug, Default)]
pub struct Grammar {
    names: Vec<&'static str>,
    indices: HashMap<&'static str, usize>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    /// The index of `name`, allocating the next free one on first use.
    pub fn index(&mut self, name: &'static str) -> usize {
        if let Some(idx) = self.indices.get(name) {
            return *idx;
        }
        let idx = self.names.len();
        self.names.push(name);
        self.indices.insert(name, idx);
        idx
    }

    pub fn name(&self, idx: usize) -> Option<&'static str> {
        self.names.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// A memoized rule that can be referenced before it is defined.
    pub fn rule<R: Reader>(&mut self, name: &'static str) -> Rule<R> {
        Rule {
            idx: self.index(name),
            name,
            body: Arc::new(OnceLock::new()),
        }
    }

    /// Memoize `parser` under the index interned for `name`.
    pub fn memoize<R: Reader>(
        &mut self,
        name: &'static str,
        parser: impl Parser<R> + 'static,
    ) -> Memoize<R> {
        memoize(self.index(name), parser)
    }
}

/// A late-bound, memoized grammar rule.
///
/// Recursive grammars need to reference a rule while building its own
/// definition. A `Rule` is a cheap handle to a slot filled in by
/// [`Rule::define`]; every clone refers to the same slot.
pub struct Rule<R: Reader> {
    idx: usize,
    name: &'static str,
    body: Arc<OnceLock<ParserRef<R>>>,
}

impl<R: Reader> Clone for Rule<R> {
    fn clone(&self) -> Self {
        Rule {
            idx: self.idx,
            name: self.name,
            body: Arc::clone(&self.body),
        }
    }
}

impl<R: Reader> Rule<R> {
    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Panics if the rule was already defined.
    pub fn define(&self, parser: impl Parser<R> + 'static) {
        if self.body.set(Arc::new(parser)).is_err() {
            panic!("rule {} defined twice", self.name);
        }
    }

    pub fn is_defined(&self) -> bool {
        self.body.get().is_some()
    }
}

impl<R: Reader> Parser<R> for Rule<R> {
    fn parse(&self, h: &mut History, ctx: &LeftRecCtx, r: &R) -> Output {
        let body = self
            .body
            .get()
            .unwrap_or_else(|| panic!("rule {} used before it was defined", self.name));
        parse_memoized(self.idx, &**body, h, ctx, r)
    }
}
