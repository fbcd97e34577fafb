//! Terminal parsers for text input.
//!
//! Each scanner matches one token at the reader's position and produces a
//! terminal node. Scanners never recurse, so they neither touch the history
//! nor look at the left recursion context.

use engine::{
    Error, History, LeftRecCtx, Node, Output, ParseResult, Parser, Reader, TextReader, Value,
};
use nom::{bytes::complete::tag, character::complete::char, IResult};

mod scan;

type ScanFn = dyn Fn(&str) -> IResult<&str, Value> + Send + Sync;

/// A parser backed by a nom function over the unread input.
pub struct Scanner {
    token: &'static str,
    expected: String,
    discard: bool,
    scan: Box<ScanFn>,
}

impl Scanner {
    pub fn new<F>(token: &'static str, expected: impl Into<String>, scan: F) -> Self
    where
        F: Fn(&str) -> IResult<&str, Value> + Send + Sync + 'static,
    {
        Scanner {
            token,
            expected: expected.into(),
            discard: false,
            scan: Box::new(scan),
        }
    }

    /// Match as usual, but produce no node.
    pub fn discarded(mut self) -> Self {
        self.discard = true;
        self
    }

    pub fn token(&self) -> &'static str {
        self.token
    }
}

impl Parser<TextReader> for Scanner {
    fn parse(&self, _: &mut History, _: &LeftRecCtx, r: &TextReader) -> Output {
        let start = r.pos();
        let rest = r.rest();
        match (self.scan)(rest) {
            Ok((rem, value)) => {
                let mut next = r.clone();
                next.advance(rest.len() - rem.len());
                let end = next.pos();
                let node = if self.discard {
                    None
                } else {
                    Some(Node::terminal(self.token, value, start, end))
                };
                Output::matched(ParseResult::new(node, end))
            }
            Err(_) => Output::failed(Error::expected(start, &self.expected)),
        }
    }
}

/// Match `text` exactly.
pub fn literal(token: &'static str, text: &'static str) -> Scanner {
    Scanner::new(token, format!("{:?}", text), move |input: &str| {
        let (rem, matched) = tag(text)(input)?;
        Ok((rem, Value::from(matched)))
    })
}

/// Match the single character `c`.
pub fn rune(token: &'static str, c: char) -> Scanner {
    Scanner::new(token, format!("{:?}", c), move |input: &str| {
        let (rem, matched) = char(c)(input)?;
        Ok((rem, Value::Char(matched)))
    })
}

/// A decimal integer with an optional leading minus.
pub fn integer() -> Scanner {
    Scanner::new("INT", "integer", |input: &str| {
        let (rem, i) = scan::integer(input)?;
        Ok((rem, Value::Int(i)))
    })
}

/// A decimal number with a fractional part and an optional exponent.
pub fn float() -> Scanner {
    Scanner::new("FLOAT", "float", |input: &str| {
        let (rem, x) = scan::float(input)?;
        Ok((rem, Value::Float(x)))
    })
}

/// A double quoted string.
pub fn string() -> Scanner {
    Scanner::new("STRING", "string", |input: &str| {
        let (rem, s) = scan::string(input)?;
        Ok((rem, Value::Str(s)))
    })
}

pub fn boolean() -> Scanner {
    Scanner::new("BOOL", "boolean", |input: &str| {
        let (rem, b) = scan::boolean(input)?;
        Ok((rem, Value::Bool(b)))
    })
}

/// An identifier: a letter or underscore followed by letters, digits and
/// underscores.
pub fn word(token: &'static str) -> Scanner {
    Scanner::new(token, "word", |input: &str| {
        let (rem, w) = scan::word(input)?;
        Ok((rem, Value::from(w)))
    })
}

/// One or more whitespace characters. Builds no node.
pub fn whitespace() -> Scanner {
    Scanner::new("WS", "whitespace", |input: &str| {
        let (rem, _) = scan::whitespace(input)?;
        Ok((rem, Value::Nil))
    })
    .discarded()
}

/// Any amount of whitespace, including none. Builds no node.
pub fn whitespace0() -> Scanner {
    Scanner::new("WS", "whitespace", |input: &str| {
        let (rem, _) = scan::whitespace0(input)?;
        Ok((rem, Value::Nil))
    })
    .discarded()
}
