//! Node builders turn the children matched by a sequence into a single node.

use std::sync::Arc;

use crate::interpreter::Interpreter;
use crate::node::Node;

/// Combines the children matched by one completed sequence into a node.
///
/// Returning `None` discards the match's node: the match still counts, but
/// contributes no child to an enclosing sequence.
pub trait NodeBuilder: Send + Sync {
    fn build(&self, children: Vec<Node>) -> Option<Node>;
}

impl<F> NodeBuilder for F
where
    F: Fn(Vec<Node>) -> Option<Node> + Send + Sync,
{
    fn build(&self, children: Vec<Node>) -> Option<Node> {
        self(children)
    }
}

/// Keep only the child at `idx`. Panics if there are not enough children.
pub fn select(idx: usize) -> Arc<dyn NodeBuilder> {
    Arc::new(move |mut children: Vec<Node>| -> Option<Node> {
        if idx >= children.len() {
            panic!(
                "can not select child {} of a sequence with {} children",
                idx,
                children.len()
            );
        }
        Some(children.swap_remove(idx))
    })
}

/// Wrap all children in a new non-terminal. An empty match builds no node.
pub fn all(token: &'static str, interpreter: Arc<dyn Interpreter>) -> Arc<dyn NodeBuilder> {
    Arc::new(move |children: Vec<Node>| -> Option<Node> {
        if children.is_empty() {
            return None;
        }
        Some(Node::non_terminal(
            token,
            children,
            Some(Arc::clone(&interpreter)),
        ))
    })
}

/// Turn `left op right` into a node labelled with the operator's token whose
/// children are the two operands. Panics unless exactly three children were
/// matched.
pub fn binary_operator(interpreter: Arc<dyn Interpreter>) -> Arc<dyn NodeBuilder> {
    Arc::new(move |children: Vec<Node>| -> Option<Node> {
        if children.len() != 3 {
            panic!(
                "binary operator expects 3 children, got {}",
                children.len()
            );
        }
        let mut children = children.into_iter();
        let (left, op, right) = match (children.next(), children.next(), children.next()) {
            (Some(left), Some(op), Some(right)) => (left, op, right),
            _ => unreachable!(),
        };
        Some(Node::non_terminal(
            op.token(),
            vec![left, right],
            Some(Arc::clone(&interpreter)),
        ))
    })
}

/// Like `all`, but the children of non-terminal children are spliced in
/// place of their parent. Only one level is flattened.
pub fn flatten(token: &'static str, interpreter: Arc<dyn Interpreter>) -> Arc<dyn NodeBuilder> {
    Arc::new(move |children: Vec<Node>| -> Option<Node> {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Node::NonTerminal(ref n) => flat.extend(n.children().iter().cloned()),
                Node::Terminal(_) => flat.push(child),
            }
        }
        if flat.is_empty() {
            return None;
        }
        Some(Node::non_terminal(token, flat, Some(Arc::clone(&interpreter))))
    })
}

/// Discard the match's node.
pub fn nil() -> Arc<dyn NodeBuilder> {
    Arc::new(|_: Vec<Node>| -> Option<Node> { None })
}
