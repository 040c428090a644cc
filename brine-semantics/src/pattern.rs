// This file is part of brine, a POSIX-compatible shell.
// Copyright (C) 2026 WATANABE Yuki
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Pattern matching
//!
//! A [`Pattern`] is compiled from a [`GlobWord`]. Unquoted `?` and `*`
//! match any single character and any string, respectively. A bracket
//! expression `[...]` matches one character in the set. Quoted characters
//! always match themselves.
//!
//! The pattern is converted to a regular expression that matches the whole
//! string. If the conversion yields an invalid regular expression, the
//! pattern falls back to matching its literal text.

use crate::expansion::glob_word::CharKind;
use crate::expansion::glob_word::GlobWord;
use regex::Regex;

/// Names of character classes allowed in bracket expressions
const CLASS_NAMES: [&str; 12] = [
    "alnum", "alpha", "blank", "cntrl", "digit", "graph", "lower", "print", "punct", "space",
    "upper", "xdigit",
];

#[derive(Clone, Debug, Eq, PartialEq)]
enum Item {
    Literal(char),
    Question,
    Star,
    /// Bracket expression converted to a regex character class
    Bracket(String),
}

/// Compiled pattern
#[derive(Clone, Debug)]
pub struct Pattern {
    items: Vec<Item>,
    regex: Option<Regex>,
    text: String,
}

impl Pattern {
    /// Compiles a pattern.
    #[must_use]
    pub fn new(word: &GlobWord) -> Pattern {
        let items = parse(&word.chars());
        let mut source = String::from("(?s)^");
        for item in &items {
            match item {
                Item::Literal(c) => source.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
                Item::Question => source.push('.'),
                Item::Star => source.push_str(".*"),
                Item::Bracket(class) => source.push_str(class),
            }
        }
        source.push('$');
        let regex = match Regex::new(&source) {
            Ok(regex) => Some(regex),
            Err(error) => {
                log::debug!("pattern {source:?} is not a valid regex: {error}");
                None
            }
        };
        Pattern {
            items,
            regex,
            text: word.to_text(),
        }
    }

    /// Returns the text the pattern matches if it contains no wildcards.
    #[must_use]
    pub fn as_literal(&self) -> Option<String> {
        self.items
            .iter()
            .map(|item| match item {
                Item::Literal(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Whether the pattern starts with a literal period.
    ///
    /// In pathname expansion, a file name starting with a period is only
    /// matched by such a pattern.
    #[must_use]
    pub fn starts_with_period(&self) -> bool {
        self.items.first() == Some(&Item::Literal('.'))
    }

    /// Tests whether the whole string matches the pattern.
    #[must_use]
    pub fn is_match(&self, s: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(s),
            None => s == self.text,
        }
    }
}

fn parse(chars: &[(char, CharKind)]) -> Vec<Item> {
    let mut items = Vec::new();
    let mut i = 0;
    while let Some(&(c, kind)) = chars.get(i) {
        i += 1;
        if kind != CharKind::Meta {
            items.push(Item::Literal(c));
            continue;
        }
        match c {
            '?' => items.push(Item::Question),
            '*' => items.push(Item::Star),
            '[' => match parse_bracket(chars, i) {
                Some((class, next)) => {
                    items.push(Item::Bracket(class));
                    i = next;
                }
                None => items.push(Item::Literal('[')),
            },
            _ => items.push(Item::Literal(c)),
        }
    }
    items
}

/// Parses a bracket expression that starts at `start`, just after the `[`.
///
/// Returns the regex character class and the index just after the closing
/// `]`, or `None` if the `[` does not start a valid bracket expression.
fn parse_bracket(chars: &[(char, CharKind)], start: usize) -> Option<(String, usize)> {
    let unquoted = |i: usize, c: char| {
        chars
            .get(i)
            .is_some_and(|&(d, kind)| d == c && kind != CharKind::Quoted)
    };

    let mut class = String::from("[");
    let mut i = start;
    if unquoted(i, '!') {
        class.push('^');
        i += 1;
    }
    let first = i;
    loop {
        let &(c, kind) = chars.get(i)?;
        if kind == CharKind::Quoted {
            if "[]-\\^:&~".contains(c) {
                class.push('\\');
            }
            class.push(c);
            i += 1;
            continue;
        }
        match c {
            ']' if i > first => {
                class.push(']');
                return Some((class, i + 1));
            }
            '[' if unquoted(i + 1, ':') => {
                let (name, next) = parse_class_name(chars, i + 2)?;
                class.push_str("[:");
                class.push_str(&name);
                class.push_str(":]");
                i = next;
            }
            _ => {
                if "[]\\^:&~".contains(c) {
                    class.push('\\');
                }
                class.push(c);
                i += 1;
            }
        }
    }
}

/// Parses the name of a character class up to the closing `:]`.
fn parse_class_name(chars: &[(char, CharKind)], start: usize) -> Option<(String, usize)> {
    let mut name = String::new();
    let mut i = start;
    loop {
        let &(c, kind) = chars.get(i)?;
        if c == ':' && kind != CharKind::Quoted {
            let &(close, close_kind) = chars.get(i + 1)?;
            if close != ']' || close_kind == CharKind::Quoted {
                return None;
            }
            return CLASS_NAMES
                .contains(&name.as_str())
                .then_some((name, i + 2));
        }
        name.push(c);
        i += 1;
    }
}
