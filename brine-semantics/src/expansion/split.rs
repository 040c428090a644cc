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

//! Field splitting
//!
//! Field splitting divides the result of an unquoted expansion into fields
//! at the characters contained in the `IFS` variable. IFS characters are
//! classified into IFS whitespace (space, tab and newline) and IFS
//! non-whitespace. A delimiter is either a run of IFS whitespace or a single
//! IFS non-whitespace with any IFS whitespace around it. IFS whitespace at
//! the beginning and end of the string is ignored.
//!
//! ```
//! # use brine_semantics::expansion::split::split;
//! assert_eq!(split("  a b\tc ", " \t\n"), ["a", "b", "c"]);
//! assert_eq!(split("a::b:", ":"), ["a", "", "b"]);
//! assert_eq!(split("a b", ""), ["a b"]);
//! ```

/// Class of a character
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Class {
    /// Character not contained in IFS
    NonIfs,
    /// Space, tab or newline contained in IFS
    IfsWhitespace,
    /// Other character contained in IFS
    IfsNonWhitespace,
}

/// Set of field separator characters
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ifs<'a> {
    chars: &'a str,
}

impl<'a> Ifs<'a> {
    /// Creates an `Ifs` from the value of the `IFS` variable.
    #[must_use]
    pub fn new(chars: &'a str) -> Self {
        Ifs { chars }
    }

    /// Whether the IFS is empty, which disables field splitting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Classifies a character.
    #[must_use]
    pub fn classify(&self, c: char) -> Class {
        if !self.chars.contains(c) {
            Class::NonIfs
        } else if matches!(c, ' ' | '\t' | '\n') {
            Class::IfsWhitespace
        } else {
            Class::IfsNonWhitespace
        }
    }
}

/// Result of splitting a string with information on its edges
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Split {
    pub fields: Vec<String>,
    /// Whether the string starts with IFS whitespace, which separates it
    /// from a preceding word
    pub leading_delimiter: bool,
    /// Whether the string ends with an IFS character, which separates it
    /// from a following word
    pub trailing_delimiter: bool,
}

/// Splits a string into fields, reporting delimiters at the edges.
#[must_use]
pub fn split_with_edges(s: &str, ifs: Ifs<'_>) -> Split {
    if ifs.is_empty() || s.is_empty() {
        return Split {
            fields: if s.is_empty() { vec![] } else { vec![s.to_owned()] },
            ..Split::default()
        };
    }

    let leading_delimiter = s
        .chars()
        .next()
        .is_some_and(|c| ifs.classify(c) == Class::IfsWhitespace);
    let trailing_delimiter = s
        .chars()
        .next_back()
        .is_some_and(|c| ifs.classify(c) != Class::NonIfs);

    let trimmed = s.trim_matches(|c| ifs.classify(c) == Class::IfsWhitespace);
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut after_delimiter = false;
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        match ifs.classify(c) {
            Class::NonIfs => {
                field.push(c);
                after_delimiter = false;
            }
            class => {
                // A delimiter is IFS whitespace around at most one
                // non-whitespace.
                let mut seen_non_whitespace = class == Class::IfsNonWhitespace;
                while let Some(&next) = chars.peek() {
                    match ifs.classify(next) {
                        Class::IfsWhitespace => {}
                        Class::IfsNonWhitespace if !seen_non_whitespace => {
                            seen_non_whitespace = true
                        }
                        _ => break,
                    }
                    chars.next();
                }
                fields.push(std::mem::take(&mut field));
                after_delimiter = true;
            }
        }
    }
    if !trimmed.is_empty() && !after_delimiter {
        fields.push(field);
    }

    Split {
        fields,
        leading_delimiter,
        trailing_delimiter,
    }
}

/// Splits a string into fields.
///
/// If `ifs` is empty, the result is the input as a single field.
#[must_use]
pub fn split(s: &str, ifs: &str) -> Vec<String> {
    if ifs.is_empty() {
        return vec![s.to_owned()];
    }
    split_with_edges(s, Ifs::new(ifs)).fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let ifs = Ifs::new(" :");
        assert_eq!(ifs.classify('a'), Class::NonIfs);
        assert_eq!(ifs.classify(' '), Class::IfsWhitespace);
        assert_eq!(ifs.classify('\t'), Class::NonIfs);
        assert_eq!(ifs.classify(':'), Class::IfsNonWhitespace);
    }

    #[test]
    fn whitespace_runs_are_single_delimiters() {
        assert_eq!(split("a  b \t c", " \t\n"), ["a", "b", "c"]);
        assert_eq!(split("   ", " \t\n"), [] as [&str; 0]);
        assert_eq!(split("", " \t\n"), [] as [&str; 0]);
    }

    #[test]
    fn non_whitespace_delimits_empty_fields() {
        assert_eq!(split(":a", ":"), ["", "a"]);
        assert_eq!(split("a:", ":"), ["a"]);
        assert_eq!(split(":", ":"), [""]);
        assert_eq!(split("a : b", " :"), ["a", "b"]);
        assert_eq!(split("a :: b", " :"), ["a", "", "b"]);
    }

    #[test]
    fn multibyte_characters() {
        assert_eq!(split("α・β", "・"), ["α", "β"]);
    }

    #[test]
    fn edges_are_reported() {
        let split = split_with_edges(" a:", Ifs::new(" :"));
        assert_eq!(split.fields, ["a"]);
        assert!(split.leading_delimiter);
        assert!(split.trailing_delimiter);

        let split = split_with_edges(":a", Ifs::new(" :"));
        assert_eq!(split.fields, ["", "a"]);
        assert!(!split.leading_delimiter);
        assert!(!split.trailing_delimiter);
    }
}
