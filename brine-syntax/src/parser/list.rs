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

//! Parsers for chunks, and-or lists and pipelines

use super::core::Parser;
use super::error::SyntaxError;
use crate::source::Span;
use crate::syntax::AndOr;
use crate::syntax::Chunk;
use crate::syntax::Pipeline;

impl Parser<'_> {
    /// Parses a sequence of and-or lists.
    ///
    /// The chunk ends at the end of the text, at a `)`, `}` or `;;`, at a
    /// reserved word that closes a compound command, or at a backquote when
    /// parsing inside backquotes. Anything else that cannot start a command
    /// is reported and skipped.
    pub(super) fn chunk(&mut self) -> Chunk {
        let begin = self.pos;
        let mut and_ors = Vec::new();
        loop {
            self.separators();
            if self.at_chunk_end() {
                break;
            }
            let Some(and_or) = self.and_or() else {
                self.unexpected();
                continue;
            };
            and_ors.push(and_or);

            self.ws();
            if self.looking_at("&") && !self.looking_at("&&") {
                self.error_here(SyntaxError::AsyncNotSupported);
                self.pos += 1;
                continue;
            }
            match self.peek() {
                None | Some(';' | '\n' | ')' | '}') => {}
                Some(_) if self.at_backquote_closer() => {}
                Some(_) => self.unexpected(),
            }
        }
        Chunk {
            span: self.span_from(begin),
            and_ors,
        }
    }

    /// Parses a chunk that must be followed by `close`.
    ///
    /// Tokens that end the chunk early are reported and skipped until `close`
    /// is found. `begin` is the position of the opening token, where the
    /// `unclosed` error is reported if the text ends before `close`.
    pub(super) fn enclosed_chunk(&mut self, close: &str, unclosed: SyntaxError, begin: usize) -> Chunk {
        let mut chunk = self.chunk();
        loop {
            let end = self.pos;
            if self.consume(close) {
                chunk.span.end = end;
                break;
            }
            if self.peek().is_none() {
                self.error_at(unclosed, begin);
                chunk.span.end = end;
                break;
            }
            self.unexpected();
            let more = self.chunk();
            chunk.and_ors.extend(more.and_ors);
        }
        chunk
    }

    /// Parses an and-or list.
    pub(super) fn and_or(&mut self) -> Option<AndOr> {
        let begin = self.pos;
        let first = self.pipeline()?;
        let mut end = first.span.end;
        let mut pipelines = vec![first];
        let mut and_op = Vec::new();
        loop {
            self.ws();
            let op = if self.consume("&&") {
                "&&"
            } else if self.consume("||") {
                "||"
            } else {
                break;
            };
            self.linebreak();
            match self.pipeline() {
                Some(pipeline) => {
                    end = pipeline.span.end;
                    pipelines.push(pipeline);
                    and_op.push(op == "&&");
                }
                None => {
                    self.error_here(SyntaxError::MissingPipeline(op));
                    break;
                }
            }
        }
        Some(AndOr {
            span: Span::new(begin, end),
            pipelines,
            and_op,
        })
    }

    /// Parses a pipeline.
    fn pipeline(&mut self) -> Option<Pipeline> {
        let begin = self.pos;
        let negation = self.consume_keyword("!");
        if negation {
            self.ws();
        }
        let Some(first) = self.form() else {
            if !negation {
                return None;
            }
            self.error_here(SyntaxError::MissingCommandAfterBang);
            return Some(Pipeline {
                span: self.span_from(begin),
                negation,
                forms: Vec::new(),
            });
        };
        let mut end = first.span.end;
        let mut forms = vec![first];
        loop {
            self.ws();
            if !self.looking_at("|") || self.looking_at("||") {
                break;
            }
            self.pos += 1;
            self.linebreak();
            match self.form() {
                Some(form) => {
                    end = form.span.end;
                    forms.push(form);
                }
                None => {
                    self.error_here(SyntaxError::MissingCommandAfterBar);
                    break;
                }
            }
        }
        Some(Pipeline {
            span: Span::new(begin, end),
            negation,
            forms,
        })
    }
}
