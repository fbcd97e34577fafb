use anyhow::Context;
use std::any::Any;
use std::fmt::{self, Display};
use std::sync::Arc;

use crate::interpreter::Interpreter;
use crate::reader::Pos;
use crate::span::Span;
use crate::value::Value;

/// Token of the node produced at end of input.
pub const EOF: &str = "EOF";

/// Token of the placeholder produced by an optional parser that did not match.
pub const NIL: &str = "NIL";

/// A node of the syntax tree.
///
/// Nodes are immutable and cheap to clone. Evaluating or transforming a tree
/// produces new values, never modifies nodes in place.
#[derive(Clone)]
pub enum Node {
    Terminal(Arc<Terminal>),
    NonTerminal(Arc<NonTerminal>),
}

/// A leaf carrying a value computed while scanning.
#[derive(Debug)]
pub struct Terminal {
    token: &'static str,
    value: Value,
    span: Span,
}

/// An inner node whose value is computed from its children by an
/// interpreter.
pub struct NonTerminal {
    token: &'static str,
    children: Vec<Node>,
    interpreter: Option<Arc<dyn Interpreter>>,
    span: Span,
}

impl Node {
    pub fn terminal(token: &'static str, value: Value, start: Pos, end: Pos) -> Node {
        Node::Terminal(Arc::new(Terminal {
            token,
            value,
            span: Span::new(start, end),
        }))
    }

    /// Panics if `children` is empty: a non-terminal takes its span from its
    /// children.
    pub fn non_terminal(
        token: &'static str,
        children: Vec<Node>,
        interpreter: Option<Arc<dyn Interpreter>>,
    ) -> Node {
        let (first, last) = match (children.first(), children.last()) {
            (Some(first), Some(last)) => (first.span(), last.span()),
            _ => panic!("non-terminal {} must have at least one child", token),
        };
        Node::NonTerminal(Arc::new(NonTerminal {
            token,
            span: Span::new(first.start, last.end),
            children,
            interpreter,
        }))
    }

    pub fn token(&self) -> &'static str {
        match self {
            Node::Terminal(t) => t.token,
            Node::NonTerminal(n) => n.token,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Terminal(t) => t.span,
            Node::NonTerminal(n) => n.span,
        }
    }

    pub fn pos(&self) -> Pos {
        self.span().start
    }

    pub fn end(&self) -> Pos {
        self.span().end
    }

    pub fn is_eof(&self) -> bool {
        self.token() == EOF
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Terminal(_) => &[],
            Node::NonTerminal(n) => &n.children,
        }
    }

    /// Evaluate the node. `ctx` is handed unchanged to every interpreter.
    pub fn value(&self, ctx: &dyn Any) -> Result<Value, anyhow::Error> {
        match self {
            Node::Terminal(t) => Ok(t.value.clone()),
            Node::NonTerminal(n) => n.value(ctx),
        }
    }

    /// Visit nodes in pre-order. The walk stops as soon as `f` returns true,
    /// and the return value reports whether it was stopped.
    pub fn walk<F>(&self, f: &mut F) -> bool
    where
        F: FnMut(&Node) -> bool,
    {
        if f(self) {
            return true;
        }
        self.children().iter().any(|child| child.walk(f))
    }
}

impl Terminal {
    pub fn token(&self) -> &'static str {
        self.token
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl NonTerminal {
    pub fn token(&self) -> &'static str {
        self.token
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, idx: usize) -> Option<&Node> {
        self.children.get(idx)
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Panics if the node was built without an interpreter.
    pub fn value(&self, ctx: &dyn Any) -> Result<Value, anyhow::Error> {
        let interpreter = self
            .interpreter
            .as_ref()
            .unwrap_or_else(|| panic!("non-terminal {} has no interpreter", self.token));
        interpreter
            .eval(ctx, self)
            .with_context(|| format!("failed to evaluate {} at {}", self.token, self.span))
    }

    /// Values of all children, in order.
    pub fn child_values(&self, ctx: &dyn Any) -> Result<Vec<Value>, anyhow::Error> {
        self.children.iter().map(|c| c.value(ctx)).collect()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Debug for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NonTerminal")
            .field("token", &self.token)
            .field("children", &self.children)
            .field("span", &self.span)
            .finish()
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Terminal(t) => write!(f, "{}{{{:?}, {}}}", t.token, t.value, t.span),
            Node::NonTerminal(n) => {
                write!(f, "{}{{", n.token)?;
                for (i, child) in n.children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ", {}}}", n.span)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter;

    fn int(i: i64, start: usize) -> Node {
        Node::terminal("INT", Value::Int(i), Pos(start), Pos(start + 1))
    }

    #[test]
    fn non_terminal_covers_children() {
        let n = Node::non_terminal("LIST", vec![int(1, 2), int(2, 5)], None);
        assert_eq!(n.span(), Span::new(Pos(2), Pos(6)));
        for child in n.children() {
            assert!(n.span().contains(&child.span()));
        }
    }

    #[test]
    #[should_panic(expected = "at least one child")]
    fn non_terminal_without_children() {
        Node::non_terminal("EMPTY", vec![], None);
    }

    #[test]
    #[should_panic(expected = "no interpreter")]
    fn evaluate_without_interpreter() {
        let n = Node::non_terminal("LIST", vec![int(1, 0)], None);
        let _ = n.value(&());
    }

    #[test]
    fn evaluate_with_interpreter() {
        let n = Node::non_terminal(
            "LIST",
            vec![int(1, 0), int(2, 2)],
            Some(interpreter::array()),
        );
        let v = n.value(&()).unwrap();
        assert_eq!(v, Value::List(vec![Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn walk_pre_order_and_stop() {
        let inner = Node::non_terminal("PAIR", vec![int(1, 0), int(2, 2)], None);
        let outer = Node::non_terminal("LIST", vec![inner, int(3, 4)], None);

        let mut seen = Vec::new();
        let stopped = outer.walk(&mut |n| {
            seen.push(n.token());
            false
        });
        assert!(!stopped);
        assert_eq!(seen, vec!["LIST", "PAIR", "INT", "INT", "INT"]);

        let mut count = 0;
        let stopped = outer.walk(&mut |n| {
            count += 1;
            n.token() == "PAIR"
        });
        assert!(stopped);
        assert_eq!(count, 2);
    }

    #[test]
    fn display() {
        let n = Node::non_terminal("LIST", vec![int(1, 0)], None);
        assert_eq!(n.to_string(), "LIST{INT{Int(1), 0..1}, 0..1}");
    }
}
