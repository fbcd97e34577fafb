use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::sync::Arc;

use crate::curtail::CurtailSet;

/// How many times each parser has been entered at the current position along
/// the current call chain.
///
/// Contexts are shared between sibling branches of an ambiguous parse, so
/// they are never modified in place: `increment` and `filter` return new
/// contexts. Absent keys count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeftRecCtx(Arc<BTreeMap<usize, usize>>);

impl LeftRecCtx {
    pub fn new() -> Self {
        LeftRecCtx::default()
    }

    pub fn get(&self, idx: usize) -> usize {
        self.0.get(&idx).copied().unwrap_or(0)
    }

    pub fn increment(&self, idx: usize) -> LeftRecCtx {
        let mut counts = (*self.0).clone();
        *counts.entry(idx).or_insert(0) += 1;
        LeftRecCtx(Arc::new(counts))
    }

    /// Keep only the counts of the parsers in `keep`.
    pub fn filter(&self, keep: &CurtailSet) -> LeftRecCtx {
        if self.0.is_empty() || keep.is_empty() {
            return LeftRecCtx::default();
        }
        let counts = keep
            .iter()
            .filter_map(|idx| self.0.get(&idx).map(|count| (idx, *count)))
            .collect();
        LeftRecCtx(Arc::new(counts))
    }

    /// True if every count recorded here is at most the count in `other`.
    pub fn within(&self, other: &LeftRecCtx) -> bool {
        self.iter().all(|(idx, count)| count <= other.get(idx))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(idx, count)| (*idx, *count))
    }
}

impl std::iter::FromIterator<(usize, usize)> for LeftRecCtx {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        LeftRecCtx(Arc::new(iter.into_iter().collect()))
    }
}

impl Display for LeftRecCtx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (idx, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", idx, count)?;
        }
        write!(f, "}}")
    }
}
