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

//! Syntax parser for the shell language
//!
//! The parser is a hand-written recursive-descent parser that works on the
//! preprocessed [text](Source::text) of a [`Source`]. The entry point is
//! [`parse`], which returns the whole program as a [`Chunk`].
//!
//! Parsing never stops at an error. When the parser finds something it cannot
//! make sense of, it records an [`Error`] with the position in the original
//! code, skips one character and goes on. Parsing therefore always consumes
//! the entire input, and all the errors are reported together as [`Errors`].
//!
//! Here-documents are parsed in two steps. The redirection operator creates a
//! [`Heredoc`](crate::syntax::Heredoc) whose body is empty and queues it as
//! pending. When the parser next consumes a newline token, it reads the lines
//! that follow as the bodies of the pending here-documents, in the order the
//! operators appeared.

mod compound_command;
mod core;
mod error;
mod form;
mod heredoc;
mod list;
mod param;
mod redir;
mod word;

pub use self::core::Parser;
pub use self::error::Error;
pub use self::error::Errors;
pub use self::error::SyntaxError;

use crate::source::Source;
use crate::syntax::Chunk;

/// Characters that end a bareword
pub const BAREWORD_STOPPERS: &str = " \t\r\n;()}&|<>[]{\"'$`?*";

/// Returns true if the character ends a bareword.
#[must_use]
pub fn is_bareword_stopper(c: char) -> bool {
    BAREWORD_STOPPERS.contains(c)
}

/// Returns true if the string is a valid variable name.
#[must_use]
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Returns true if the word is a reserved word.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    self::core::KEYWORDS.contains(&word)
}

/// Returns true if the string consists of unquoted literal words only.
///
/// The result is true if the string contains no character other than
/// whitespace that would end a bareword, which means the string would parse
/// as a sequence of plain words with no quotes, expansions, operators or
/// glob characters. Alias definitions must satisfy this.
#[must_use]
pub fn is_plain_words(s: &str) -> bool {
    s.chars()
        .all(|c| matches!(c, ' ' | '\t' | '\n') || !(is_bareword_stopper(c) || c == '\\'))
}

/// Parses the whole source code.
///
/// Returns the parsed program if no errors were found.
pub fn parse(source: &Source) -> Result<Chunk, Errors> {
    let mut parser = Parser::new(source);
    let chunk = parser.program();
    let errors = parser.take_errors();
    if errors.is_empty() {
        Ok(chunk)
    } else {
        Err(errors.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert!(is_name("a"));
        assert!(is_name("_foo1"));
        assert!(!is_name(""));
        assert!(!is_name("1a"));
        assert!(!is_name("a-b"));
    }

    #[test]
    fn keywords() {
        assert!(is_keyword("if"));
        assert!(is_keyword("{"));
        assert!(!is_keyword("echo"));
        assert!(!is_keyword("IF"));
    }

    #[test]
    fn plain_words() {
        assert!(is_plain_words("ls -l"));
        assert!(is_plain_words("echo "));
        assert!(!is_plain_words("echo $x"));
        assert!(!is_plain_words("ls *.txt"));
        assert!(!is_plain_words("a; b"));
        assert!(!is_plain_words("'a'"));
    }

    #[test]
    fn parse_reports_all_errors() {
        let source = Source::new("echo 'a\necho \"b");
        let errors = parse(&source).unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].cause, SyntaxError::UnclosedSingleQuote);

        let source = Source::new("a &\n) b");
        let errors = parse(&source).unwrap_err();
        assert_eq!(errors.errors.len(), 2);
        assert_eq!(errors.errors[0].cause, SyntaxError::AsyncNotSupported);
        assert_eq!(errors.errors[1].cause, SyntaxError::UnexpectedChar(')'));
        assert_eq!(errors.errors[1].position, 4);
    }
}
