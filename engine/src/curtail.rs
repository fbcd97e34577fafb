use std::collections::BTreeSet;
use std::fmt::{self, Display};

/// Indices of the parsers whose exploration was cut short during an attempt.
///
/// A result computed while any of these parsers was curtailed is provisional:
/// it is only valid for callers at the same or a deeper recursion level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurtailSet(BTreeSet<usize>);

impl CurtailSet {
    pub fn new() -> Self {
        CurtailSet(BTreeSet::new())
    }

    pub fn single(idx: usize) -> Self {
        let mut set = BTreeSet::new();
        set.insert(idx);
        CurtailSet(set)
    }

    pub fn union(&self, other: &CurtailSet) -> CurtailSet {
        if other.0.is_empty() {
            return self.clone();
        }
        if self.0.is_empty() {
            return other.clone();
        }
        CurtailSet(self.0.union(&other.0).copied().collect())
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.0.contains(&idx)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl std::iter::FromIterator<usize> for CurtailSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        CurtailSet(iter.into_iter().collect())
    }
}

impl Display for CurtailSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", idx)?;
        }
        write!(f, "}}")
    }
}
