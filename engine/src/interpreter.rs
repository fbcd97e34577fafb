//! Value computation for non-terminal nodes.

use anyhow::anyhow;
use std::any::Any;
use std::sync::Arc;

use crate::node::NonTerminal;
use crate::value::Value;

/// Computes the value of a non-terminal node.
///
/// The interpreter receives the node rather than its children's values so it
/// can decide which children to evaluate, and in which order. `ctx` is the
/// evaluation context handed to the top-level evaluate call.
pub trait Interpreter: Send + Sync {
    fn eval(&self, ctx: &dyn Any, node: &NonTerminal) -> Result<Value, anyhow::Error>;
}

impl<F> Interpreter for F
where
    F: Fn(&dyn Any, &NonTerminal) -> Result<Value, anyhow::Error> + Send + Sync,
{
    fn eval(&self, ctx: &dyn Any, node: &NonTerminal) -> Result<Value, anyhow::Error> {
        self(ctx, node)
    }
}

/// The value of the child at `idx`.
pub fn select(idx: usize) -> Arc<dyn Interpreter> {
    Arc::new(
        move |ctx: &dyn Any, node: &NonTerminal| -> Result<Value, anyhow::Error> {
            match node.child(idx) {
                Some(child) => child.value(ctx),
                None => Err(anyhow!(
                    "{} has {} children, can not select child {}",
                    node.token(),
                    node.children().len(),
                    idx
                )),
            }
        },
    )
}

/// Always evaluates to nil.
pub fn nil() -> Arc<dyn Interpreter> {
    Arc::new(
        |_: &dyn Any, _: &NonTerminal| -> Result<Value, anyhow::Error> { Ok(Value::Nil) },
    )
}

/// A list of the children's values.
pub fn array() -> Arc<dyn Interpreter> {
    from_values(|values| Ok(Value::List(values)))
}

/// The children's values concatenated as a string.
pub fn concat() -> Arc<dyn Interpreter> {
    from_values(|values| {
        let s: String = values.iter().map(|v| v.to_string()).collect();
        Ok(Value::Str(s))
    })
}

/// Evaluate every child first, then combine the values with `f`.
pub fn from_values<F>(f: F) -> Arc<dyn Interpreter>
where
    F: Fn(Vec<Value>) -> Result<Value, anyhow::Error> + Send + Sync + 'static,
{
    Arc::new(
        move |ctx: &dyn Any, node: &NonTerminal| -> Result<Value, anyhow::Error> {
            f(node.child_values(ctx)?)
        },
    )
}
