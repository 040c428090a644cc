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

//! Parser for forms

use super::core::Parser;
use super::error::SyntaxError;
use super::word::WordMode;
use crate::source::Span;
use crate::syntax::Assign;
use crate::syntax::Compound;
use crate::syntax::Form;
use crate::syntax::FormType;
use std::sync::Arc;

impl Parser<'_> {
    /// Parses a form.
    ///
    /// Returns `None` if there is nothing that can start a command.
    pub(super) fn form(&mut self) -> Option<Form> {
        let begin = self.pos;
        if let Some(body) = self.compound_command() {
            let mut redirs = Vec::new();
            let mut end = self.pos;
            loop {
                self.ws();
                let Some(redir) = self.redir() else { break };
                redirs.push(redir);
                end = self.pos;
            }
            return Some(Form {
                span: Span::new(begin, end),
                r#type: FormType::CompoundCommand,
                assigns: Vec::new(),
                words: Vec::new(),
                redirs,
                body: Some(Arc::new(body)),
            });
        }

        let mut assigns = Vec::new();
        let mut words = Vec::new();
        let mut redirs = Vec::new();
        let mut end = self.pos;
        loop {
            self.ws();
            if words.is_empty() {
                if let Some(assign) = self.assign() {
                    assigns.push(assign);
                    end = self.pos;
                    continue;
                }
            }
            if let Some(redir) = self.redir() {
                redirs.push(redir);
                end = self.pos;
                continue;
            }
            let Some(word) = self.compound(WordMode::Normal) else { break };
            words.push(word);
            end = self.pos;
            if words.len() == 1 && assigns.is_empty() && redirs.is_empty() {
                self.ws();
                if self.looking_at("(") {
                    let name = words.pop().unwrap_or_default();
                    return Some(self.function_definition(begin, name));
                }
            }
        }
        if assigns.is_empty() && words.is_empty() && redirs.is_empty() {
            return None;
        }
        Some(Form {
            span: Span::new(begin, end),
            r#type: FormType::Normal,
            assigns,
            words,
            redirs,
            body: None,
        })
    }

    /// Parses an assignment if there is one at the current position.
    fn assign(&mut self) -> Option<Assign> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c == '_' || c.is_ascii_alphanumeric()))
            .unwrap_or(rest.len());
        if len == 0 || rest.starts_with(|c: char| c.is_ascii_digit()) || !rest[len..].starts_with('=') {
            return None;
        }
        let begin = self.pos;
        let lhs = rest[..len].to_owned();
        self.pos += len + 1;
        let rhs = self
            .compound(WordMode::Normal)
            .unwrap_or_else(|| self.empty_compound());
        Some(Assign {
            span: self.span_from(begin),
            lhs,
            rhs,
        })
    }

    /// Parses the rest of a function definition after the name.
    ///
    /// The current position must be at the `(`.
    fn function_definition(&mut self, begin: usize, name: Compound) -> Form {
        self.pos += 1;
        self.ws();
        if !self.consume(")") {
            self.error_here(SyntaxError::UnmatchedParenthesis);
        }
        self.linebreak();
        let body = self.compound_command().map(Arc::new);
        if body.is_none() {
            self.error_here(SyntaxError::MissingFunctionBody);
        }
        let mut redirs = Vec::new();
        let mut end = self.pos;
        loop {
            self.ws();
            let Some(redir) = self.redir() else { break };
            redirs.push(redir);
            end = self.pos;
        }
        Form {
            span: Span::new(begin, end),
            r#type: FormType::FnDefinition,
            assigns: Vec::new(),
            words: vec![name],
            redirs,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::SyntaxError;
    use crate::parser::parse;
    use crate::source::Source;
    use crate::source::Span;
    use crate::syntax::CompoundKind;
    use crate::syntax::Form;
    use crate::syntax::FormType;
    use crate::syntax::RedirMode;
    use assert_matches::assert_matches;

    fn parse_form(code: &str) -> Form {
        let chunk = parse(&Source::new(code)).unwrap();
        chunk.and_ors[0].pipelines[0].forms[0].clone()
    }

    #[test]
    fn simple_command_with_everything() {
        let form = parse_form("A=1 B= >out echo a 2>&1 b");
        assert_eq!(form.r#type, FormType::Normal);
        assert_eq!(form.assigns.len(), 2);
        assert_eq!(form.assigns[0].lhs, "A");
        assert_eq!(form.assigns[0].rhs.as_bareword(), Some("1"));
        assert_eq!(form.assigns[1].lhs, "B");
        assert_eq!(form.assigns[1].rhs.parts, []);
        assert_eq!(form.words.len(), 3);
        assert_eq!(form.redirs.len(), 2);
        assert_eq!(form.redirs[1].left, Some(2));
        assert!(form.redirs[1].right_fd);
        assert_eq!(form.span, Span::new(0, 25));
    }

    #[test]
    fn assignment_after_word_is_a_word() {
        let form = parse_form("echo a=b");
        assert_eq!(form.assigns, []);
        assert_eq!(form.words[1].as_bareword(), Some("a=b"));
        let form = parse_form("1a=b");
        assert_eq!(form.assigns, []);
    }

    #[test]
    fn function_definitions() {
        let form = parse_form("greet () { echo hi; } >&2");
        assert_eq!(form.r#type, FormType::FnDefinition);
        assert_eq!(form.words[0].as_bareword(), Some("greet"));
        assert_matches!(&form.body.as_ref().unwrap().kind, CompoundKind::Grouping(chunk) => {
            assert_eq!(chunk.and_ors.len(), 1);
        });
        assert_eq!(form.redirs[0].mode, RedirMode::Output);

        let form = parse_form("f()\n(echo)");
        assert_eq!(form.r#type, FormType::FnDefinition);
        assert!(form.body.as_ref().unwrap().is_subshell());
    }

    #[test]
    fn function_definition_errors() {
        let errors = parse(&Source::new("f( { :; }")).unwrap_err().errors;
        assert_eq!(errors[0].cause, SyntaxError::UnmatchedParenthesis);
        let errors = parse(&Source::new("f() echo")).unwrap_err().errors;
        assert_eq!(errors[0].cause, SyntaxError::MissingFunctionBody);
    }

    #[test]
    fn compound_command_with_redirections() {
        let form = parse_form("{ echo a; } >out 2>err");
        assert_eq!(form.r#type, FormType::CompoundCommand);
        assert_eq!(form.redirs.len(), 2);
    }
}
