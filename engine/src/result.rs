use crate::node::Node;
use crate::reader::Pos;

/// One way a parser matched: the node it built and where it stopped.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub node: Option<Node>,
    pub pos: Pos,
}

impl ParseResult {
    pub fn new(node: Option<Node>, pos: Pos) -> Self {
        ParseResult { node, pos }
    }
}

/// Every distinct way a parser matched from one start position.
///
/// Results are kept sorted by end position, with at most one result per end
/// position: the first one inserted wins.
#[derive(Debug, Clone, Default)]
pub struct ResultSet(Vec<ParseResult>);

impl ResultSet {
    pub fn new() -> Self {
        ResultSet(Vec::new())
    }

    pub fn single(result: ParseResult) -> Self {
        ResultSet(vec![result])
    }

    /// Insert a result unless one already ends at the same position.
    pub fn insert(&mut self, result: ParseResult) {
        if let Err(idx) = self.0.binary_search_by(|r| r.pos.cmp(&result.pos)) {
            self.0.insert(idx, result);
        }
    }

    pub fn union(&mut self, other: ResultSet) {
        if self.0.is_empty() {
            self.0 = other.0;
            return;
        }
        for result in other.0 {
            self.insert(result);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The result that got furthest into the input.
    pub fn last(&self) -> Option<&ParseResult> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseResult> {
        self.0.iter()
    }

    /// End positions in ascending order.
    pub fn positions(&self) -> Vec<Pos> {
        self.0.iter().map(|r| r.pos).collect()
    }
}

impl IntoIterator for ResultSet {
    type Item = ParseResult;
    type IntoIter = std::vec::IntoIter<ParseResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::iter::FromIterator<ParseResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ParseResult>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for result in iter {
            set.insert(result);
        }
        set
    }
}
