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

//! Fundamental building blocks of the parser

use super::error::Error;
use super::error::SyntaxError;
use crate::source::Source;
use crate::source::Span;
use crate::syntax::AndOr;
use crate::syntax::Chunk;
use crate::syntax::Heredoc;
use std::sync::Arc;

/// Reserved words
pub(super) const KEYWORDS: &[&str] = &[
    "!", "{", "}", "case", "do", "done", "elif", "else", "esac", "fi", "for", "if", "in", "then",
    "until", "while",
];

/// Reserved words that end a chunk
const CHUNK_TERMINATORS: &[&str] = &["then", "else", "elif", "fi", "do", "done", "esac"];

/// Characters that delimit a reserved word
pub(super) const KEYWORD_DELIMITERS: &str = " \t\r\n;&|()<>";

/// Returns the token that delimits a `` `…` `` command substitution at the
/// given nesting depth, which must be positive.
///
/// Every level of nesting escapes the backslashes and the backquote of the
/// enclosing level, so the token at depth `n` is a backquote preceded by
/// 2<sup>n-1</sup>-1 backslashes.
fn backquote_token(depth: usize) -> String {
    let mut token = "\\".repeat((1_usize << (depth - 1).min(16)) - 1);
    token.push('`');
    token
}

/// Here-document waiting for its content
#[derive(Debug)]
pub(super) struct PendingHeredoc {
    pub heredoc: Arc<Heredoc>,
    /// Position of the redirection operator in the text
    pub position: usize,
}

/// Recursive-descent parser
///
/// A parser is created for a [`Source`] and parses its
/// [text](Source::text) from the beginning. Call [`program`](Self::program)
/// to parse everything, and then [`take_errors`](Self::take_errors) to obtain
/// the errors found in the meantime.
#[derive(Debug)]
pub struct Parser<'a> {
    pub(super) source: &'a Source,
    pub(super) text: &'a str,
    /// Current position in the text
    pub(super) pos: usize,
    errors: Vec<Error>,
    pub(super) pending_heredocs: Vec<PendingHeredoc>,
    /// Number of `` `…` `` command substitutions enclosing the current
    /// position, reset to zero inside `$(…)`
    pub(super) backquote_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser that starts at the beginning of the source.
    #[must_use]
    pub fn new(source: &'a Source) -> Self {
        Parser {
            source,
            text: source.text(),
            pos: 0,
            errors: Vec::new(),
            pending_heredocs: Vec::new(),
            backquote_depth: 0,
        }
    }

    /// Returns the errors found so far, leaving none in the parser.
    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    /// Parses the whole text.
    ///
    /// Anything that cannot start a command is reported as an error and
    /// skipped, so this function always consumes the entire text.
    pub fn program(&mut self) -> Chunk {
        let begin = self.pos;
        let mut and_ors: Vec<AndOr> = Vec::new();
        loop {
            let chunk = self.chunk();
            and_ors.extend(chunk.and_ors);
            if self.peek().is_none() {
                break;
            }
            self.unexpected();
        }
        for pending in std::mem::take(&mut self.pending_heredocs) {
            let delim = pending.heredoc.delim.clone();
            self.error_at(SyntaxError::MissingHeredocContent(delim), pending.position);
            let _ = pending.heredoc.fill(Default::default());
        }
        Chunk {
            span: Span::new(begin, self.pos),
            and_ors,
        }
    }

    /// Reports the token at the current position as unexpected and skips it.
    pub(super) fn unexpected(&mut self) {
        match self.keyword() {
            Some(keyword) if keyword != "{" && keyword != "!" => {
                self.error_here(SyntaxError::UnexpectedKeyword(keyword));
                self.pos += keyword.len();
            }
            _ => {
                if let Some(c) = self.peek() {
                    self.error_here(SyntaxError::UnexpectedChar(c));
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    /// Returns the text from the current position.
    pub(super) fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Returns the character at the current position.
    pub(super) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the character after the current one.
    pub(super) fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Tests if the text at the current position starts with `s`.
    pub(super) fn looking_at(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consumes `s` if the text at the current position starts with it.
    pub(super) fn consume(&mut self, s: &str) -> bool {
        let found = self.looking_at(s);
        if found {
            self.pos += s.len();
        }
        found
    }

    /// Consumes and returns the current character.
    pub(super) fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Tests if the current position ends the innermost `` `…` `` command
    /// substitution.
    ///
    /// An unescaped backquote ends every level of nesting. Inside a nested
    /// substitution, it is an error caught by the enclosing one.
    pub(super) fn at_backquote_closer(&self) -> bool {
        self.backquote_depth > 0
            && (self.looking_at("`") || self.looking_at(&backquote_token(self.backquote_depth)))
    }

    /// Tests if the current position opens a `` `…` `` command substitution.
    ///
    /// Inside backquotes, a nested substitution is opened by an escaped
    /// backquote.
    pub(super) fn at_backquote_opener(&self) -> bool {
        self.looking_at(&backquote_token(self.backquote_depth + 1))
    }

    /// Returns the length of the token that opens a nested `` `…` `` command
    /// substitution.
    pub(super) fn backquote_opener_len(&self) -> usize {
        backquote_token(self.backquote_depth + 1).len()
    }

    /// Records an error at a position in the text.
    pub(super) fn error_at(&mut self, cause: SyntaxError, pos: usize) {
        let position = self.source.recover_pos(pos);
        log::trace!("syntax error at {position}: {cause}");
        self.errors.push(Error { cause, position });
    }

    /// Records an error at the current position.
    pub(super) fn error_here(&mut self, cause: SyntaxError) {
        self.error_at(cause, self.pos);
    }

    /// Skips blanks and a comment, not including the newline.
    pub(super) fn ws(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r') => self.pos += 1,
                Some('#') => {
                    let len = self.rest().find('\n').unwrap_or(self.rest().len());
                    self.pos += len;
                }
                _ => break,
            }
        }
    }

    /// Consumes a newline and reads the pending here-documents that follow.
    ///
    /// Returns false if the current character is not a newline.
    pub(super) fn newline(&mut self) -> bool {
        if !self.consume("\n") {
            return false;
        }
        for pending in std::mem::take(&mut self.pending_heredocs) {
            self.heredoc_content(&pending);
        }
        true
    }

    /// Skips blanks, comments and newlines.
    pub(super) fn linebreak(&mut self) {
        loop {
            self.ws();
            if !self.newline() {
                break;
            }
        }
    }

    /// Skips blanks, comments, newlines and `;` separators.
    ///
    /// A `;;` is not skipped.
    pub(super) fn separators(&mut self) {
        loop {
            self.linebreak();
            if self.looking_at(";") && !self.looking_at(";;") {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Returns the reserved word at the current position, if any.
    ///
    /// A reserved word is recognized only if it is followed by a delimiter or
    /// the end of the text.
    pub(super) fn keyword(&self) -> Option<&'static str> {
        let rest = self.rest();
        let len = rest.find(|c| KEYWORD_DELIMITERS.contains(c)).unwrap_or(rest.len());
        let word = &rest[..len];
        KEYWORDS.iter().copied().find(|&keyword| keyword == word)
    }

    /// Consumes the given reserved word if it is at the current position.
    pub(super) fn consume_keyword(&mut self, keyword: &str) -> bool {
        let found = self.keyword() == Some(keyword);
        if found {
            self.pos += keyword.len();
        }
        found
    }

    /// Tests if the parser is at a position that ends a chunk.
    pub(super) fn at_chunk_end(&self) -> bool {
        match self.peek() {
            None | Some(')' | '}') => true,
            Some(_) if self.at_backquote_closer() => true,
            Some(_) => {
                self.looking_at(";;")
                    || self
                        .keyword()
                        .is_some_and(|keyword| CHUNK_TERMINATORS.contains(&keyword))
            }
        }
    }

    /// Returns the span from `begin` to the current position.
    pub(super) fn span_from(&self, begin: usize) -> Span {
        Span::new(begin, self.pos)
    }
}
