//! Trigger argument signatures in C-family syntax.
//!
//! This is a heuristic for one dialect of C++ parameter lists, not a type
//! grammar: it splits on top-level commas (tracking `<`/`>` nesting so that
//! `std::map<K, V>` stays whole), takes the last word of each argument as
//! the name and everything before it as the type. Reference and pointer
//! qualifiers belong to the type (`const std::string& who`), never to the
//! name.

use crate::charclass::{is_decimal_digit, is_letter};
use crate::error::SignatureError;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Punctuation accepted anywhere in a signature, besides letters and digits.
const ALLOWED_PUNCTUATION: &[char] = &['_', '<', '>', ':', ' ', '&', '(', ')', ','];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerArgument {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

impl fmt::Display for TriggerArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// Parse a raw argument list such as `"const std::vector<int>& items, int count"`.
///
/// Every argument needs a type and a name, so a blank string is rejected.
pub fn parse_arguments(raw: &str) -> Result<Vec<TriggerArgument>, SignatureError> {
    let split = split_arguments(raw)?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut args = Vec::with_capacity(split.len());
    for arg_str in &split {
        let arg = parse_argument(arg_str)?;
        if !seen.insert(arg.name.clone()) {
            return Err(SignatureError::DuplicateArgument { name: arg.name });
        }
        args.push(arg);
    }
    Ok(args)
}

/// Split on commas outside template brackets and normalize whitespace.
///
/// `"const std::map<K, V>& m,  int  n"` -> `["const std::map<K, V>& m", "int n"]`
fn split_arguments(raw: &str) -> Result<Vec<String>, SignatureError> {
    let mut args = Vec::new();
    let mut depth: usize = 0;
    let mut current = String::new();

    for (index, ch) in raw.chars().enumerate() {
        if ch == ',' && depth == 0 {
            args.push(std::mem::take(&mut current));
            continue;
        }

        if !is_letter(ch) && !is_decimal_digit(ch) && !ALLOWED_PUNCTUATION.contains(&ch) {
            return Err(SignatureError::InvalidChar { index, ch });
        }
        current.push(ch);

        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(SignatureError::UnopenedTemplate { index })?;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(SignatureError::UnterminatedTemplate);
    }
    args.push(current);

    Ok(args
        .iter()
        .map(|arg| arg.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect())
}

fn parse_argument(arg_str: &str) -> Result<TriggerArgument, SignatureError> {
    let words: Vec<&str> = arg_str.split_whitespace().collect();
    let Some((name, type_words)) = words.split_last().filter(|(_, rest)| !rest.is_empty()) else {
        return Err(SignatureError::MissingName {
            argument: arg_str.to_owned(),
        });
    };

    if let Some(ch) = name
        .chars()
        .find(|c| !(is_letter(*c) || is_decimal_digit(*c) || *c == '_'))
    {
        return Err(SignatureError::InvalidName {
            argument: arg_str.to_owned(),
            ch,
        });
    }

    Ok(TriggerArgument {
        ty: type_words.join(" "),
        name: (*name).to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(ty: &str, name: &str) -> TriggerArgument {
        TriggerArgument {
            ty: ty.to_owned(),
            name: name.to_owned(),
        }
    }

    #[test]
    fn parses_valid_signatures() {
        let cases: Vec<(&str, Vec<TriggerArgument>)> = vec![
            ("int foo", vec![arg("int", "foo")]),
            ("std::string foo", vec![arg("std::string", "foo")]),
            ("const std::string& foo", vec![arg("const std::string&", "foo")]),
            (
                "const std::vector<std::string>& foo",
                vec![arg("const std::vector<std::string>&", "foo")],
            ),
            (
                "const std::vector<std::unique_ptr<std::string, 22>>& foo",
                vec![arg("const std::vector<std::unique_ptr<std::string, 22>>&", "foo")],
            ),
            (
                "const std::vector<std::unique_ptr<std::string, 22>>& foo, int bar, std::string<22, std::greater()> baz",
                vec![
                    arg("const std::vector<std::unique_ptr<std::string, 22>>&", "foo"),
                    arg("int", "bar"),
                    arg("std::string<22, std::greater()>", "baz"),
                ],
            ),
            ("  unsigned   long count ,int  x", vec![arg("unsigned long", "count"), arg("int", "x")]),
            ("int \u{e9}t\u{e9}_2", vec![arg("int", "\u{e9}t\u{e9}_2")]),
            ("int n\u{661}", vec![arg("int", "n\u{661}")]),
        ];

        for (input, want) in cases {
            let got = parse_arguments(input)
                .unwrap_or_else(|e| panic!("unexpected error for {:?}: {}", input, e));
            assert_eq!(got, want, "input {:?}", input);
        }
    }

    #[test]
    fn rejects_malformed_signatures() {
        let cases = vec![
            ("", "at least 2 words"),
            ("   ", "at least 2 words"),
            ("int", "at least 2 words"),
            ("int foo,", "at least 2 words"),
            ("int foo, std::string", "at least 2 words"),
            (",int foo", "at least 2 words"),
            ("int foo, int foo", "argument is defined twice"),
            ("std::vector<int foo", "unterminated template"),
            ("std::vector<std::string>> foo", "closing unopening template"),
            ("int foo&", "unexpected character in argument name"),
            ("const Foo& a, int b&", "unexpected character in argument name"),
            ("int\tfoo", "invalid char"),
            ("int foo; int bar", "invalid char"),
            ("std::array<int, 3> [arr]", "invalid char"),
            ("int x\u{b2}", "invalid char"),
            ("Foo<\u{216b}> x", "invalid char"),
        ];

        for (input, want) in cases {
            match parse_arguments(input) {
                Ok(got) => panic!("expected error for {:?}, got {:?}", input, got),
                Err(e) => assert!(
                    e.to_string().contains(want),
                    "error for {:?} was {:?}, expected it to contain {:?}",
                    input,
                    e.to_string(),
                    want
                ),
            }
        }
    }

    #[test]
    fn error_variants_carry_positions() {
        assert_eq!(
            parse_arguments("int a; int b"),
            Err(SignatureError::InvalidChar { index: 5, ch: ';' })
        );
        assert_eq!(
            parse_arguments("Foo> x"),
            Err(SignatureError::UnopenedTemplate { index: 3 })
        );
        assert_eq!(
            parse_arguments("int x, int x"),
            Err(SignatureError::DuplicateArgument {
                name: "x".to_owned()
            })
        );
        assert_eq!(
            parse_arguments("int foo&"),
            Err(SignatureError::InvalidName {
                argument: "int foo&".to_owned(),
                ch: '&'
            })
        );
    }

    #[test]
    fn argument_display_joins_type_and_name() {
        assert_eq!(
            arg("const std::string&", "who").to_string(),
            "const std::string& who"
        );
    }
}
