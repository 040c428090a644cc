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

//! Definition of errors that happen in the parser

use crate::source::Source;
use crate::source::floor_char_boundary;
use annotate_snippets::Level;
use annotate_snippets::Renderer;
use annotate_snippets::Snippet;
use thiserror::Error;

/// Types of syntax errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum SyntaxError {
    /// A single quotation lacks a closing `'`.
    #[error("the single quote is not closed")]
    UnclosedSingleQuote,
    /// A double quotation lacks a closing `"`.
    #[error("the double quote is not closed")]
    UnclosedDoubleQuote,
    /// A parameter expansion lacks a closing `}`.
    #[error("the parameter expansion is not closed")]
    UnclosedParam,
    /// A parameter expansion lacks a name.
    #[error("the parameter name is missing")]
    EmptyParam,
    /// A modifier does not have a valid form in a parameter expansion.
    #[error("the parameter expansion contains a malformed modifier")]
    InvalidModifier,
    /// A command substitution started with `$(` but lacks a closing `)`.
    #[error("the command substitution is not closed")]
    UnclosedCommandSubstitution,
    /// A command substitution started with `` ` `` but lacks a closing `` ` ``.
    #[error("the backquote is not closed")]
    UnclosedBackquote,
    /// An arithmetic expansion lacks a closing `))`.
    #[error("the arithmetic expansion is not closed")]
    UnclosedArith,
    /// A character that cannot start or continue a command
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    /// A reserved word that cannot appear here
    #[error("`{0}` is not expected here")]
    UnexpectedKeyword(&'static str),
    /// The file descriptor specified for a redirection cannot be used.
    #[error("the file descriptor is too large")]
    FdOutOfRange,
    /// A redirection operator is missing its operand.
    #[error("the redirection operator is missing its operand")]
    MissingRedirOperand,
    /// `<<` is followed by `&`.
    #[error("a here-document cannot duplicate a file descriptor")]
    FdHeredoc,
    /// The newline that starts the content of a here-document is missing.
    #[error("content of the here-document `{0}` is missing")]
    MissingHeredocContent(String),
    /// A here-document content is missing its delimiter.
    #[error("the delimiter `{0}` to close the here-document content is missing")]
    UnclosedHeredocContent(String),
    /// A grouping is not closed.
    #[error("the grouping is not closed")]
    UnclosedGrouping,
    /// A grouping contains no commands.
    #[error("the grouping is missing its content")]
    EmptyGrouping,
    /// A subshell is not closed.
    #[error("the subshell is not closed")]
    UnclosedSubshell,
    /// A subshell contains no commands.
    #[error("the subshell is missing its content")]
    EmptySubshell,
    /// A reserved word is required to continue a compound command.
    #[error("`{0}` is missing")]
    MissingKeyword(&'static str),
    /// A condition or body of a compound command contains no commands.
    #[error("the `{0}` clause is missing its content")]
    EmptyClause(&'static str),
    /// The variable name is missing in a for loop.
    #[error("the variable name is missing in the `for` loop")]
    MissingForName,
    /// The variable name is not a valid name in a for loop.
    #[error("`{0}` is not a valid variable name")]
    InvalidForName(String),
    /// The case command is missing its subject.
    #[error("the subject is missing after `case`")]
    MissingCaseSubject,
    /// The `)` is missing in a case item.
    #[error("the pattern list is not properly closed by a `)`")]
    UnclosedPatternList,
    /// The pattern is missing in a case item.
    #[error("a pattern is missing in the `case` command")]
    MissingPattern,
    /// The `(` is not followed by `)` in a function definition.
    #[error("`)` is missing after `(`")]
    UnmatchedParenthesis,
    /// The function body is missing in a function definition command.
    #[error("the function body is missing")]
    MissingFunctionBody,
    /// A pipeline is missing after a `&&` or `||` token.
    #[error("a command is missing after `{0}`")]
    MissingPipeline(&'static str),
    /// A command is missing after a `!` token.
    #[error("a command is missing after `!`")]
    MissingCommandAfterBang,
    /// A command is missing after a `|` token.
    #[error("a command is missing after `|`")]
    MissingCommandAfterBar,
    /// An and-or list is terminated by `&`.
    #[error("asynchronous commands are not supported")]
    AsyncNotSupported,
}

/// Syntax error with its position
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{cause}")]
pub struct Error {
    pub cause: SyntaxError,
    /// Byte offset of the error in the original code
    pub position: usize,
}

/// All errors found while parsing a piece of code
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{} syntax error(s)", errors.len())]
pub struct Errors {
    pub errors: Vec<Error>,
}

impl Errors {
    /// Formats the errors for the user.
    ///
    /// Each error is shown with the line of the original code it occurred on
    /// and a caret under the position. `origin` names the source of the code,
    /// typically a file name or `-c`.
    #[must_use]
    pub fn render(&self, source: &Source, origin: &str) -> String {
        let orig = source.orig();
        let renderer = Renderer::plain();
        let mut result = String::new();
        for error in &self.errors {
            let mut begin = floor_char_boundary(orig, error.position);
            if begin == orig.len() && begin > 0 {
                // Point at the last character for errors at end of input.
                begin = floor_char_boundary(orig, begin - 1);
            }
            let end = orig[begin..]
                .chars()
                .next()
                .map_or(begin, |c| begin + c.len_utf8());
            let title = error.cause.to_string();
            let (line, column) = source.line_column(begin);
            let label = format!("line {line}, column {column}");
            let message = Level::Error.title(&title).snippet(
                Snippet::source(orig)
                    .line_start(1)
                    .origin(origin)
                    .fold(true)
                    .annotation(Level::Error.span(begin..end).label(&label)),
            );
            result.push_str(&renderer.render(message).to_string());
            result.push('\n');
        }
        result
    }
}

impl From<Vec<Error>> for Errors {
    fn from(errors: Vec<Error>) -> Self {
        Errors { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_syntax_error() {
        assert_eq!(
            SyntaxError::MissingKeyword("fi").to_string(),
            "`fi` is missing"
        );
        assert_eq!(
            SyntaxError::UnclosedHeredocContent("EOF".to_owned()).to_string(),
            "the delimiter `EOF` to close the here-document content is missing"
        );
    }

    #[test]
    fn rendering_shows_message_and_origin() {
        let source = Source::new("echo ok\necho 'oops\n");
        let errors = Errors::from(vec![Error {
            cause: SyntaxError::UnclosedSingleQuote,
            position: 13,
        }]);
        let rendered = errors.render(&source, "script.sh");
        assert!(rendered.contains("the single quote is not closed"), "{rendered}");
        assert!(rendered.contains("script.sh"), "{rendered}");
        assert!(rendered.contains("echo 'oops"), "{rendered}");
    }

    #[test]
    fn rendering_error_at_end_of_input() {
        let source = Source::new("echo \"");
        let errors = Errors::from(vec![Error {
            cause: SyntaxError::UnclosedDoubleQuote,
            position: 6,
        }]);
        let rendered = errors.render(&source, "-c");
        assert!(rendered.contains("the double quote is not closed"), "{rendered}");
    }
}
