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

//! Parser for redirections

use super::core::Parser;
use super::core::PendingHeredoc;
use super::error::SyntaxError;
use super::word::WordMode;
use crate::syntax::Heredoc;
use crate::syntax::Redir;
use crate::syntax::RedirMode;
use std::sync::Arc;

/// Redirection operators, longest first
const OPERATORS: &[(&str, RedirMode)] = &[
    (">>", RedirMode::Append),
    ("<>", RedirMode::InputOutput),
    ("<<", RedirMode::Heredoc),
    (">|", RedirMode::Clobber),
    (">", RedirMode::Output),
    ("<", RedirMode::Input),
];

impl Parser<'_> {
    /// Parses a redirection if there is one at the current position.
    pub(super) fn redir(&mut self) -> Option<Redir> {
        let begin = self.pos;
        let rest = self.rest();
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (operator, mode) = OPERATORS
            .iter()
            .copied()
            .find(|(operator, _)| rest[digits..].starts_with(operator))?;

        let left = if digits == 0 {
            None
        } else {
            match rest[..digits].parse() {
                Ok(fd) => Some(fd),
                Err(_) => {
                    self.error_here(SyntaxError::FdOutOfRange);
                    None
                }
            }
        };
        self.pos += digits;
        let operator_pos = self.pos;
        self.pos += operator.len();
        let strip_tabs = mode == RedirMode::Heredoc && self.consume("-");
        let mut right_fd = self.consume("&");
        if right_fd && mode == RedirMode::Heredoc {
            self.error_at(SyntaxError::FdHeredoc, operator_pos);
            right_fd = false;
        }

        self.ws();
        let right = match self.compound(WordMode::Normal) {
            Some(word) => word,
            None => {
                self.error_here(SyntaxError::MissingRedirOperand);
                self.empty_compound()
            }
        };

        let heredoc = if mode == RedirMode::Heredoc && !right.parts.is_empty() {
            let (delim, quoted) = right.unquote();
            let heredoc = Arc::new(Heredoc::new(delim, quoted, strip_tabs));
            self.pending_heredocs.push(PendingHeredoc {
                heredoc: Arc::clone(&heredoc),
                position: operator_pos,
            });
            Some(heredoc)
        } else {
            None
        };

        Some(Redir {
            span: self.span_from(begin),
            left,
            mode,
            right_fd,
            right,
            heredoc,
        })
    }
}
