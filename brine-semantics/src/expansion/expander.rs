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

//! Intermediate representation of expanded words
//!
//! The initial expansion converts each word into an [`Expander`]. The
//! expander remembers which parts of the word came from unquoted expansions,
//! so that only those parts are subject to field splitting, and which
//! characters are glob metacharacters.

use super::glob_word::GlobWord;
use super::glob_word::Segment;
use super::split::Ifs;
use super::split::split_with_edges;

/// Result of the initial expansion of a word
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expander {
    /// Result of an expansion, subject to field splitting when unquoted
    Scalar(String),
    /// Text that appeared literally in the word
    ///
    /// Unquoted literal text is never split, but it keeps its special
    /// meaning inside bracket expressions.
    Literal { text: String, quoted: bool },
    /// Unquoted `?`, `*`, `[` or `]`
    GlobMeta(char),
    /// Concatenation
    Compound(Vec<Expander>),
    /// Concatenation in double quotes
    DoubleQuoted(Vec<Expander>),
    /// Positional parameters expanded by `$@` or `$*`
    Array {
        elems: Vec<String>,
        /// Value of `IFS` at the time of the expansion
        ifs: String,
        /// True for `$@`, false for `$*`
        is_at: bool,
    },
}

/// Piece of the expansion result before the words are assembled
#[derive(Debug)]
enum Token {
    /// Text that belongs to the current word
    Piece(GlobWord),
    /// Boundary between words
    Delimiter,
}

impl Expander {
    /// Creates an unquoted literal.
    #[must_use]
    pub fn literal<S: Into<String>>(text: S) -> Self {
        Expander::Literal {
            text: text.into(),
            quoted: false,
        }
    }

    /// Creates a quoted literal.
    #[must_use]
    pub fn quoted<S: Into<String>>(text: S) -> Self {
        Expander::Literal {
            text: text.into(),
            quoted: true,
        }
    }

    /// Performs field splitting, producing any number of words.
    ///
    /// An unquoted expansion that results in an empty string produces no
    /// word. A quoted empty string produces an empty word.
    #[must_use]
    pub fn expand(&self, ifs: &str) -> Vec<GlobWord> {
        let mut tokens = Vec::new();
        self.tokenize(Ifs::new(ifs), false, &mut tokens);

        let mut words = Vec::new();
        let mut current: Option<GlobWord> = None;
        for token in tokens {
            match token {
                Token::Piece(piece) => current.get_or_insert_with(GlobWord::default).append(piece),
                Token::Delimiter => words.extend(current.take()),
            }
        }
        words.extend(current);
        words
    }

    fn tokenize(&self, ifs: Ifs<'_>, in_quotes: bool, tokens: &mut Vec<Token>) {
        match self {
            Expander::Scalar(value) if in_quotes => {
                tokens.push(Token::Piece(GlobWord::quoted(value)));
            }
            Expander::Scalar(value) => tokenize_unquoted(value, ifs, tokens),
            Expander::Literal { text, quoted } => {
                let mut word = GlobWord::default();
                if *quoted || in_quotes {
                    word.push_quoted(text);
                } else {
                    word.push_text(text);
                }
                tokens.push(Token::Piece(word));
            }
            Expander::GlobMeta(c) if in_quotes => {
                tokens.push(Token::Piece(GlobWord::quoted(c.encode_utf8(&mut [0; 4]))));
            }
            Expander::GlobMeta(c) => tokens.push(Token::Piece(GlobWord {
                segments: vec![Segment::Meta(*c)],
            })),
            Expander::Compound(children) => {
                for child in children {
                    child.tokenize(ifs, in_quotes, tokens);
                }
            }
            Expander::DoubleQuoted(children) => {
                // "" is one empty word, but "$@" may be no word at all.
                if !children.iter().any(Expander::is_at) {
                    tokens.push(Token::Piece(GlobWord::default()));
                }
                for child in children {
                    child.tokenize(ifs, true, tokens);
                }
            }
            Expander::Array { elems, ifs: _, is_at: true } if in_quotes => {
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        tokens.push(Token::Delimiter);
                    }
                    tokens.push(Token::Piece(GlobWord::quoted(elem)));
                }
            }
            Expander::Array { .. } if in_quotes => {
                tokens.push(Token::Piece(GlobWord::quoted(&self.expand_one_word())));
            }
            Expander::Array { elems, .. } => {
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        tokens.push(Token::Delimiter);
                    }
                    tokenize_unquoted(elem, ifs, tokens);
                }
            }
        }
    }

    fn is_at(&self) -> bool {
        matches!(self, Expander::Array { is_at: true, .. })
    }

    /// Concatenates the expansion into one string without field splitting.
    ///
    /// The elements of `$@` are joined with spaces. Those of `$*` are joined
    /// with the first character of `IFS`.
    #[must_use]
    pub fn expand_one_word(&self) -> String {
        let mut result = String::new();
        self.append_to(&mut result);
        result
    }

    fn append_to(&self, result: &mut String) {
        match self {
            Expander::Scalar(text) | Expander::Literal { text, .. } => result.push_str(text),
            Expander::GlobMeta(c) => result.push(*c),
            Expander::Compound(children) | Expander::DoubleQuoted(children) => {
                for child in children {
                    child.append_to(result);
                }
            }
            Expander::Array { elems, ifs, is_at } => {
                let separator = if *is_at {
                    Some(' ')
                } else {
                    ifs.chars().next()
                };
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        result.extend(separator);
                    }
                    result.push_str(elem);
                }
            }
        }
    }

    /// Converts the expansion into one pattern without field splitting.
    #[must_use]
    pub fn to_glob_word(&self) -> GlobWord {
        let mut word = GlobWord::default();
        self.append_glob_word(false, &mut word);
        word
    }

    fn append_glob_word(&self, in_quotes: bool, word: &mut GlobWord) {
        match self {
            Expander::Literal { text, quoted } if *quoted || in_quotes => word.push_quoted(text),
            Expander::Literal { text, .. } => word.push_text(text),
            Expander::GlobMeta(c) if !in_quotes => word.segments.push(Segment::Meta(*c)),
            Expander::Compound(children) => {
                for child in children {
                    child.append_glob_word(in_quotes, word);
                }
            }
            Expander::DoubleQuoted(children) => {
                for child in children {
                    child.append_glob_word(true, word);
                }
            }
            _ if in_quotes => word.push_quoted(&self.expand_one_word()),
            _ => word.append(GlobWord::unquoted(&self.expand_one_word())),
        }
    }
}

/// Splits an unquoted expansion result into tokens.
fn tokenize_unquoted(value: &str, ifs: Ifs<'_>, tokens: &mut Vec<Token>) {
    if ifs.is_empty() {
        if !value.is_empty() {
            tokens.push(Token::Piece(GlobWord::unquoted(value)));
        }
        return;
    }
    let split = split_with_edges(value, ifs);
    if split.leading_delimiter {
        tokens.push(Token::Delimiter);
    }
    for (i, field) in split.fields.iter().enumerate() {
        if i > 0 {
            tokens.push(Token::Delimiter);
        }
        tokens.push(Token::Piece(GlobWord::unquoted(field)));
    }
    if split.trailing_delimiter {
        tokens.push(Token::Delimiter);
    }
}
