//! Raw nom scanners over the unread input.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0, multispace1, one_of, satisfy},
    combinator::{map, map_res, not, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};

pub fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i64>()
    })(input)
}

pub fn float(input: &str) -> IResult<&str, f64> {
    let exponent = tuple((one_of("eE"), opt(one_of("+-")), digit1));
    map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            char('.'),
            digit1,
            opt(exponent),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

pub fn string(input: &str) -> IResult<&str, String> {
    let escape = alt((
        value("\\", tag("\\")),
        value("\"", tag("\"")),
        value("\n", tag("n")),
        value("\t", tag("t")),
        value("\r", tag("r")),
    ));
    alt((
        map(tag("\"\""), |_| String::new()),
        delimited(
            char('"'),
            escaped_transform(is_not("\\\""), '\\', escape),
            char('"'),
        ),
    ))(input)
}

pub fn boolean(input: &str) -> IResult<&str, bool> {
    terminated(
        alt((value(true, tag("true")), value(false, tag("false")))),
        not(satisfy(is_word_char)),
    )(input)
}

pub fn word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

pub fn whitespace(input: &str) -> IResult<&str, &str> {
    multispace1(input)
}

pub fn whitespace0(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;

    struct TestCase<T> {
        input: &'static str,
        // Some indicates success, None indicates error.
        out: Option<(&'static str, T)>,
    }

    fn assert_test_cases<T, F>(f: F, tests: Vec<TestCase<T>>)
    where
        T: Debug + PartialEq,
        F: Fn(&'static str) -> IResult<&'static str, T>,
    {
        for t in tests {
            let res = f(t.input);
            match t.out {
                Some(out) => assert_eq!(res, Ok(out), "input: {:?}", t.input),
                None => assert!(res.is_err(), "expected error: {:?}", res),
            }
        }
    }

    #[test]
    fn scan_integer() {
        let tests = vec![
            TestCase {
                input: "123",
                out: Some(("", 123)),
            },
            TestCase {
                input: "-42+1",
                out: Some(("+1", -42)),
            },
            TestCase {
                input: "007x",
                out: Some(("x", 7)),
            },
            TestCase {
                input: "99999999999999999999",
                out: None,
            },
            TestCase {
                input: "-",
                out: None,
            },
        ];

        assert_test_cases(integer, tests);
    }

    #[test]
    fn scan_float() {
        let tests = vec![
            TestCase {
                input: "1.5",
                out: Some(("", 1.5)),
            },
            TestCase {
                input: "-0.25,",
                out: Some((",", -0.25)),
            },
            TestCase {
                input: "2.0e3",
                out: Some(("", 2000.0)),
            },
            TestCase {
                input: "12",
                out: None,
            },
            TestCase {
                input: "1.",
                out: None,
            },
        ];

        assert_test_cases(float, tests);
    }

    #[test]
    fn scan_string() {
        let tests = vec![
            TestCase {
                input: "\"hello\" world",
                out: Some((" world", "hello".to_owned())),
            },
            TestCase {
                input: "\"\"",
                out: Some(("", String::new())),
            },
            TestCase {
                input: r#""say \"hi\"\n""#,
                out: Some(("", "say \"hi\"\n".to_owned())),
            },
            TestCase {
                input: r#""a\\b\tc""#,
                out: Some(("", "a\\b\tc".to_owned())),
            },
            TestCase {
                input: "\"unterminated",
                out: None,
            },
            TestCase {
                input: "hello",
                out: None,
            },
        ];

        assert_test_cases(string, tests);
    }

    #[test]
    fn scan_boolean() {
        let tests = vec![
            TestCase {
                input: "true",
                out: Some(("", true)),
            },
            TestCase {
                input: "false)",
                out: Some((")", false)),
            },
            TestCase {
                input: "trueish",
                out: None,
            },
        ];

        assert_test_cases(boolean, tests);
    }

    #[test]
    fn scan_word() {
        let tests = vec![
            TestCase {
                input: "hello",
                out: Some(("", "hello")),
            },
            TestCase {
                input: "_private1 rest",
                out: Some((" rest", "_private1")),
            },
            TestCase {
                input: "hello=world",
                out: Some(("=world", "hello")),
            },
            TestCase {
                input: "1abc",
                out: None,
            },
        ];

        assert_test_cases(word, tests);
    }

    #[test]
    fn scan_whitespace() {
        assert_eq!(whitespace(" \t\nx"), Ok(("x", " \t\n")));
        assert!(whitespace("x").is_err());
        assert_eq!(whitespace0("x"), Ok(("x", "")));
    }
}
