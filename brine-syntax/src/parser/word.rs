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

//! Parsers for words and their parts

use super::core::KEYWORD_DELIMITERS;
use super::core::Parser;
use super::error::SyntaxError;
use super::is_bareword_stopper;
use crate::source::Span;
use crate::syntax::Compound;
use crate::syntax::DqSegment;
use crate::syntax::Primary;
use crate::syntax::PrimaryKind;
use std::sync::Arc;

/// Context in which a word is parsed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum WordMode {
    /// Ordinary command word
    Normal,
    /// Argument of a parameter expansion modifier
    ///
    /// Blanks and operator characters are part of the word, and `}` ends it.
    /// If `quoted` is true, the expansion is inside double quotes, where
    /// single quotes are literal and a backslash only quotes `$`, `` ` ``,
    /// `"`, `\` and `}`.
    BraceArg { quoted: bool },
}

impl WordMode {
    fn stops_bareword(self, c: char) -> bool {
        match self {
            WordMode::Normal => is_bareword_stopper(c),
            WordMode::BraceArg { quoted: false } => "}$`'\"[]*?".contains(c),
            WordMode::BraceArg { quoted: true } => "}$`\"[]*?".contains(c),
        }
    }
}

impl Parser<'_> {
    /// Parses a compound word.
    ///
    /// In the normal mode, returns `None` if there is no word at the current
    /// position. In the brace argument mode, the result may be an empty
    /// compound.
    pub(super) fn compound(&mut self, mode: WordMode) -> Option<Compound> {
        let begin = self.pos;
        let tilde_prefix = self.tilde_prefix(mode);
        let mut parts = Vec::new();
        while let Some(primary) = self.primary(mode, parts.is_empty() && tilde_prefix.is_none()) {
            parts.push(primary);
        }
        if mode == WordMode::Normal && tilde_prefix.is_none() && parts.is_empty() {
            return None;
        }
        Some(Compound {
            span: self.span_from(begin),
            tilde_prefix,
            parts,
        })
    }

    /// Parses a tilde prefix.
    ///
    /// The prefix is `~` followed by a possibly empty user name that ends at
    /// a `/` or the end of the word. If the name contains any quotes or
    /// expansions, the `~` is not a tilde prefix.
    fn tilde_prefix(&mut self, mode: WordMode) -> Option<String> {
        if !self.looking_at("~") || mode == (WordMode::BraceArg { quoted: true }) {
            return None;
        }
        let rest = &self.rest()[1..];
        let len = rest
            .find(|c: char| c == '/' || c == '\\' || is_bareword_stopper(c))
            .unwrap_or(rest.len());
        let valid_end = match rest[len..].chars().next() {
            None | Some('/') => true,
            Some(c) => match mode {
                WordMode::Normal => KEYWORD_DELIMITERS.contains(c),
                WordMode::BraceArg { .. } => c == '}',
            },
        };
        if !valid_end {
            return None;
        }
        let user = rest[..len].to_owned();
        self.pos += 1 + len;
        Some(user)
    }

    /// Parses a primary.
    ///
    /// `at_start` tells whether this is the first primary of the compound. In
    /// the normal mode, a `}` only continues a word that has already started.
    fn primary(&mut self, mode: WordMode, at_start: bool) -> Option<Primary> {
        let begin = self.pos;
        let c = self.peek()?;
        if self.at_backquote_closer() {
            return None;
        }
        if self.at_expansion() {
            let quoted = mode == WordMode::BraceArg { quoted: true };
            return Some(self.dollar_or_backquote(quoted).unwrap_or_else(|| Primary {
                span: self.span_from(begin),
                kind: PrimaryKind::Bareword("$".to_owned()),
            }));
        }
        let kind = match c {
            '\'' if mode != (WordMode::BraceArg { quoted: true }) => self.single_quoted(),
            '"' => self.double_quoted(),
            '[' | ']' | '*' | '?' => {
                self.pos += 1;
                PrimaryKind::WildcardChar(c)
            }
            '{' if mode == WordMode::Normal => self.bareword(mode, true),
            '}' if mode == WordMode::Normal && !at_start => self.bareword(mode, true),
            _ if mode.stops_bareword(c) => return None,
            _ => self.bareword(mode, false),
        };
        Some(Primary {
            span: self.span_from(begin),
            kind,
        })
    }

    /// Parses a bareword.
    ///
    /// If `force_first` is true, the current character is taken even if it
    /// would end a bareword.
    fn bareword(&mut self, mode: WordMode, force_first: bool) -> PrimaryKind {
        let mut value = String::new();
        if force_first {
            value.extend(self.next_char());
        }
        while let Some(c) = self.peek() {
            if c == '\\' {
                if self.at_backquote_closer() || self.at_expansion() {
                    break;
                }
                match (mode, self.peek_second()) {
                    (WordMode::BraceArg { quoted: true }, Some(next))
                        if !matches!(next, '$' | '`' | '"' | '\\' | '}') =>
                    {
                        self.pos += 1;
                        value.push('\\');
                    }
                    (_, Some(next)) => {
                        self.pos += 1 + next.len_utf8();
                        value.push(next);
                    }
                    (_, None) => {
                        self.pos += 1;
                        value.push('\\');
                    }
                }
                continue;
            }
            if mode.stops_bareword(c) {
                break;
            }
            value.push(c);
            self.pos += c.len_utf8();
        }
        PrimaryKind::Bareword(value)
    }

    /// Parses a single-quoted string.
    ///
    /// The content is taken from the original code because a
    /// backslash-newline pair is not a line continuation inside single
    /// quotes.
    fn single_quoted(&mut self) -> PrimaryKind {
        let orig = self.source.orig();
        let content_begin = self.source.recover_pos(self.pos) + 1;
        let content = orig.get(content_begin..).unwrap_or_default();
        match content.find('\'') {
            Some(len) => {
                self.pos = self.source.text_pos(content_begin + len + 1);
                PrimaryKind::SingleQuoted(content[..len].to_owned())
            }
            None => {
                self.error_here(SyntaxError::UnclosedSingleQuote);
                self.pos = self.text.len();
                PrimaryKind::SingleQuoted(content.to_owned())
            }
        }
    }

    /// Parses a double-quoted string.
    fn double_quoted(&mut self) -> PrimaryKind {
        let begin = self.pos;
        self.pos += 1;
        let mut segments = Vec::new();
        let mut literal = String::new();
        loop {
            match self.peek() {
                None => {
                    self.error_at(SyntaxError::UnclosedDoubleQuote, begin);
                    break;
                }
                Some('"') => {
                    self.pos += 1;
                    break;
                }
                Some(_) if self.at_backquote_closer() => {
                    self.error_at(SyntaxError::UnclosedDoubleQuote, begin);
                    break;
                }
                Some(_) if self.at_expansion() => match self.dollar_or_backquote(true) {
                    Some(primary) => {
                        if !literal.is_empty() {
                            segments.push(DqSegment::String(std::mem::take(&mut literal)));
                        }
                        segments.push(DqSegment::Expansion(primary));
                    }
                    None => literal.push('$'),
                },
                Some('\\') => match self.peek_second() {
                    Some(c @ ('$' | '`' | '"' | '\\')) => {
                        self.pos += 2;
                        literal.push(c);
                    }
                    _ => {
                        self.pos += 1;
                        literal.push('\\');
                    }
                },
                Some(c) => {
                    self.pos += c.len_utf8();
                    literal.push(c);
                }
            }
        }
        if !literal.is_empty() {
            segments.push(DqSegment::String(literal));
        }
        PrimaryKind::DoubleQuoted(segments)
    }

    /// Tests if the current position starts an expansion.
    ///
    /// Inside backquotes, an escaped backquote opens a nested command
    /// substitution and `\$` is an unquoted `$`, as the body of the
    /// substitution is unescaped before it is run as a command.
    pub(super) fn at_expansion(&self) -> bool {
        match self.peek() {
            Some('$') => true,
            Some('`') => self.backquote_depth == 0,
            Some('\\') => {
                self.backquote_depth > 0
                    && (self.at_backquote_opener() || self.peek_second() == Some('$'))
            }
            _ => false,
        }
    }

    /// Parses an expansion starting with `$` or a `` `…` `` command
    /// substitution.
    ///
    /// Returns `None` if the `$` does not start an expansion, in which case
    /// the `$` has been consumed and should be taken literally. `quoted`
    /// tells whether the expansion is inside double quotes.
    pub(super) fn dollar_or_backquote(&mut self, quoted: bool) -> Option<Primary> {
        let begin = self.pos;
        if self.backquote_depth > 0 && self.looking_at("\\$") {
            self.pos += 1;
        }
        let kind = if self.at_backquote_opener() {
            let close = &self.rest()[..self.backquote_opener_len()];
            self.pos += close.len();
            self.backquote_depth += 1;
            let chunk = self.enclosed_chunk(close, SyntaxError::UnclosedBackquote, begin);
            self.backquote_depth -= 1;
            PrimaryKind::OutputCapture(Arc::new(chunk))
        } else {
            self.pos += 1;
            if self.consume("((") {
                self.arithmetic(begin)
            } else if self.consume("(") {
                let saved = std::mem::replace(&mut self.backquote_depth, 0);
                let chunk = self.enclosed_chunk(")", SyntaxError::UnclosedCommandSubstitution, begin);
                self.backquote_depth = saved;
                PrimaryKind::OutputCapture(Arc::new(chunk))
            } else if self.consume("{") {
                PrimaryKind::Variable(self.braced_param(begin, quoted))
            } else {
                PrimaryKind::Variable(self.unbraced_param()?)
            }
        };
        Some(Primary {
            span: self.span_from(begin),
            kind,
        })
    }

    /// Parses the content of an arithmetic expansion after `$((`.
    fn arithmetic(&mut self, begin: usize) -> PrimaryKind {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut depth = 0_usize;
        loop {
            match self.peek() {
                None => {
                    self.error_at(SyntaxError::UnclosedArith, begin);
                    break;
                }
                Some(_) if self.at_backquote_closer() => {
                    self.error_at(SyntaxError::UnclosedArith, begin);
                    break;
                }
                Some(_) if self.at_expansion() => match self.dollar_or_backquote(true) {
                    Some(primary) => {
                        if !literal.is_empty() {
                            segments.push(DqSegment::String(std::mem::take(&mut literal)));
                        }
                        segments.push(DqSegment::Expansion(primary));
                    }
                    None => literal.push('$'),
                },
                Some(')') if depth == 0 => {
                    if !self.consume("))") {
                        self.error_at(SyntaxError::UnclosedArith, begin);
                        self.pos += 1;
                    }
                    break;
                }
                Some(c @ ('(' | ')')) => {
                    if c == '(' {
                        depth += 1;
                    } else {
                        depth -= 1;
                    }
                    self.pos += 1;
                    literal.push(c);
                }
                Some('\\') => match self.peek_second() {
                    Some(c @ ('$' | '`' | '\\')) => {
                        self.pos += 2;
                        literal.push(c);
                    }
                    _ => {
                        self.pos += 1;
                        literal.push('\\');
                    }
                },
                Some(c) => {
                    self.pos += c.len_utf8();
                    literal.push(c);
                }
            }
        }
        if !literal.is_empty() {
            segments.push(DqSegment::String(literal));
        }
        PrimaryKind::Arithmetic(segments)
    }

    /// Returns an empty compound at the current position.
    pub(super) fn empty_compound(&self) -> Compound {
        Compound {
            span: Span::new(self.pos, self.pos),
            ..Compound::default()
        }
    }
}
