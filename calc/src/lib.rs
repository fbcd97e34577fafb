//! Small grammars built from the engine: a left-recursive letter sequence, an
//! ambiguous sum, and nested value lists.

use std::any::Any;
use std::sync::Arc;

use anyhow::anyhow;
use engine::builder;
use engine::interpreter;
use engine::{
    any, choice, optional, sep_by, seq, Grammar, NonTerminal, ParserExt, ParserRef, Rule,
    TextReader, Value,
};
use terminal::{boolean, float, integer, rune, string, whitespace0, word};

/// A -> A 'b' | 'a'
///
/// Evaluates to the matched text.
pub fn letters() -> Rule<TextReader> {
    let mut g = Grammar::new();
    let a = g.rule("A");
    a.define(any(vec![
        seq(
            builder::all("A", interpreter::concat()),
            vec![a.clone().boxed(), rune("B", 'b').boxed()],
        )
        .boxed(),
        rune("A", 'a').boxed(),
    ]));
    a
}

/// E -> E '+' E | int
///
/// Whitespace is allowed around `+`. Every derivation of a sum has the same
/// value, so whichever one the engine keeps evaluates correctly.
pub fn sum() -> Rule<TextReader> {
    let mut g = Grammar::new();
    let e = g.rule("E");
    let add = interpreter::from_values(|values| {
        let mut total = 0;
        for v in values {
            total += v
                .as_int()
                .ok_or_else(|| anyhow!("can not add non-integer {}", v))?;
        }
        Ok(Value::Int(total))
    });
    e.define(any(vec![
        seq(
            builder::binary_operator(add),
            vec![
                e.clone().boxed(),
                whitespace0().boxed(),
                rune("+", '+').boxed(),
                whitespace0().boxed(),
                e.clone().boxed(),
            ],
        )
        .boxed(),
        integer().boxed(),
    ]));
    e
}

/// list = '[' , [ value , { ',' , value } ] , [ ',' ] , ']' ;
/// value = float | integer | string | boolean | word | list ;
///
/// Evaluates to a (possibly nested) list value.
pub fn list() -> Rule<TextReader> {
    let mut g = Grammar::new();
    let list = g.rule("list");

    let value = g.memoize(
        "value",
        choice(
            "value",
            vec![
                float().boxed(),
                integer().boxed(),
                string().boxed(),
                boolean().boxed(),
                word("IDENT").boxed(),
                list.clone().boxed(),
            ],
        ),
    );
    let comma = || -> ParserRef<TextReader> {
        seq(
            builder::nil(),
            vec![whitespace0().boxed(), rune(",", ',').boxed(), whitespace0().boxed()],
        )
        .boxed()
    };
    let items = sep_by(
        builder::all("ITEMS", interpreter::array()),
        value.boxed(),
        comma(),
    );

    list.define(seq(
        builder::all("LIST", Arc::new(list_items)),
        vec![
            rune("[", '[').boxed(),
            whitespace0().boxed(),
            items.boxed(),
            optional(comma()).boxed(),
            whitespace0().boxed(),
            rune("]", ']').boxed(),
        ],
    ));
    list
}

/// An empty list builds no `ITEMS` node.
fn list_items(ctx: &dyn Any, node: &NonTerminal) -> Result<Value, anyhow::Error> {
    match node.children().iter().find(|child| child.token() == "ITEMS") {
        Some(items) => items.value(ctx),
        None => Ok(Value::List(Vec::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_value() -> anyhow::Result<()> {
        let tests = vec![("a", "a"), ("abb", "abb"), ("abbbbbbb", "abbbbbbb")];
        for (input, expected) in tests {
            let value = curtail::evaluate(input, &letters().boxed(), &())?;
            assert_eq!(value.to_string(), expected);
        }
        assert!(curtail::parse("ba", &letters().boxed()).is_err());
        Ok(())
    }

    #[test]
    fn sum_value() -> anyhow::Result<()> {
        let tests = vec![("7", 7), ("1+2", 3), ("1 + 2 +3", 6), ("-1+1", 0)];
        for (input, expected) in tests {
            let value = curtail::evaluate(input, &sum().boxed(), &())?;
            assert_eq!(value, Value::Int(expected), "input: {}", input);
        }
        Ok(())
    }

    #[test]
    fn list_value() -> anyhow::Result<()> {
        let tests = vec![
            ("[]", "[]"),
            ("[1]", "[1]"),
            ("[1, 2.5, \"three\", true, four]", "[1, 2.5, three, true, four]"),
            ("[[1, 2], [], [[3]],]", "[[1, 2], [], [[3]]]"),
        ];
        for (input, expected) in tests {
            let value = curtail::evaluate(input, &list().boxed(), &())?;
            assert_eq!(value.to_string(), expected, "input: {}", input);
        }
        Ok(())
    }
}
