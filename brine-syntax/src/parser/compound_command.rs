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

//! Parsers for compound commands

use super::core::Parser;
use super::error::SyntaxError;
use super::is_name;
use super::word::WordMode;
use crate::syntax::CaseItem;
use crate::syntax::Chunk;
use crate::syntax::Compound;
use crate::syntax::CompoundCommand;
use crate::syntax::CompoundKind;
use crate::syntax::IfBranch;

impl Parser<'_> {
    /// Parses a compound command if there is one at the current position.
    pub(super) fn compound_command(&mut self) -> Option<CompoundCommand> {
        let begin = self.pos;
        let kind = if self.consume("(") {
            let chunk = self.enclosed_chunk(")", SyntaxError::UnclosedSubshell, begin);
            if chunk.and_ors.is_empty() {
                self.error_at(SyntaxError::EmptySubshell, begin);
            }
            CompoundKind::Subshell(chunk)
        } else {
            let keyword = self.keyword()?;
            match keyword {
                "{" => {
                    self.pos += 1;
                    let chunk = self.enclosed_chunk("}", SyntaxError::UnclosedGrouping, begin);
                    if chunk.and_ors.is_empty() {
                        self.error_at(SyntaxError::EmptyGrouping, begin);
                    }
                    CompoundKind::Grouping(chunk)
                }
                "if" => self.if_command(),
                "while" | "until" => {
                    self.pos += keyword.len();
                    let condition = self.clause(keyword);
                    let body = self.do_clause();
                    if keyword == "while" {
                        CompoundKind::While { condition, body }
                    } else {
                        CompoundKind::Until { condition, body }
                    }
                }
                "for" => self.for_loop(),
                "case" => self.case_command(),
                _ => return None,
            }
        };
        Some(CompoundCommand {
            span: self.span_from(begin),
            kind,
        })
    }

    /// Parses a chunk that is part of a compound command.
    ///
    /// An empty chunk is reported as an error of the named clause.
    fn clause(&mut self, name: &'static str) -> Chunk {
        let chunk = self.chunk();
        if chunk.and_ors.is_empty() {
            self.error_here(SyntaxError::EmptyClause(name));
        }
        chunk
    }

    /// Consumes a reserved word that must appear at the current position.
    fn expect_keyword(&mut self, keyword: &'static str) -> bool {
        self.linebreak();
        let found = self.consume_keyword(keyword);
        if !found {
            self.error_here(SyntaxError::MissingKeyword(keyword));
        }
        found
    }

    /// Parses `do … done`.
    fn do_clause(&mut self) -> Chunk {
        if !self.expect_keyword("do") {
            return Chunk::default();
        }
        let body = self.clause("do");
        self.expect_keyword("done");
        body
    }

    fn if_command(&mut self) -> CompoundKind {
        self.pos += "if".len();
        let mut branches = Vec::new();
        let mut r#else = None;
        let mut keyword = "if";
        loop {
            let condition = self.clause(keyword);
            if !self.expect_keyword("then") {
                branches.push(IfBranch {
                    condition,
                    body: Chunk::default(),
                });
                return CompoundKind::If { branches, r#else };
            }
            let body = self.clause("then");
            branches.push(IfBranch { condition, body });
            if !self.consume_keyword("elif") {
                break;
            }
            keyword = "elif";
        }
        if self.consume_keyword("else") {
            r#else = Some(self.clause("else"));
        }
        self.expect_keyword("fi");
        CompoundKind::If { branches, r#else }
    }

    fn for_loop(&mut self) -> CompoundKind {
        self.pos += "for".len();
        self.ws();
        let name = match self.compound(WordMode::Normal) {
            Some(word) => match word.as_bareword() {
                Some(name) if is_name(name) => name.to_owned(),
                _ => {
                    self.error_at(SyntaxError::InvalidForName(word.to_string()), word.span.begin);
                    String::new()
                }
            },
            None => {
                self.error_here(SyntaxError::MissingForName);
                String::new()
            }
        };

        self.linebreak();
        let values = if self.consume_keyword("in") {
            let mut values = Vec::new();
            loop {
                self.ws();
                let Some(word) = self.compound(WordMode::Normal) else { break };
                values.push(word);
            }
            if !self.consume(";") {
                self.newline();
            }
            Some(values)
        } else {
            self.consume(";");
            None
        };

        let body = self.do_clause();
        CompoundKind::For { name, values, body }
    }

    fn case_command(&mut self) -> CompoundKind {
        self.pos += "case".len();
        self.ws();
        let subject = self.compound(WordMode::Normal).unwrap_or_else(|| {
            self.error_here(SyntaxError::MissingCaseSubject);
            Compound::default()
        });
        let mut items = Vec::new();
        if !self.expect_keyword("in") {
            return CompoundKind::Case { subject, items };
        }
        loop {
            self.linebreak();
            if self.consume_keyword("esac") {
                break;
            }
            if self.peek().is_none() {
                self.error_here(SyntaxError::MissingKeyword("esac"));
                break;
            }

            let item_begin = self.pos;
            self.consume("(");
            let mut patterns = Vec::new();
            loop {
                self.ws();
                let Some(pattern) = self.compound(WordMode::Normal) else {
                    self.error_here(SyntaxError::MissingPattern);
                    break;
                };
                patterns.push(pattern);
                self.ws();
                if !self.consume("|") {
                    break;
                }
            }
            if !self.consume(")") {
                self.error_here(SyntaxError::UnclosedPatternList);
                break;
            }

            let body = self.chunk();
            items.push(CaseItem {
                span: self.span_from(item_begin),
                patterns,
                body,
            });
            if !self.consume(";;") {
                self.expect_keyword("esac");
                break;
            }
        }
        CompoundKind::Case { subject, items }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::SyntaxError;
    use crate::parser::parse;
    use crate::source::Source;
    use crate::syntax::CompoundKind;
    use assert_matches::assert_matches;

    fn compound_kind(code: &str) -> CompoundKind {
        let chunk = parse(&Source::new(code)).unwrap();
        let form = &chunk.and_ors[0].pipelines[0].forms[0];
        form.body.as_ref().unwrap().kind.clone()
    }

    fn first_error(code: &str) -> SyntaxError {
        parse(&Source::new(code)).unwrap_err().errors[0].cause.clone()
    }

    #[test]
    fn grouping_and_subshell() {
        assert_matches!(compound_kind("{ a; b\n}"), CompoundKind::Grouping(chunk) => {
            assert_eq!(chunk.and_ors.len(), 2);
        });
        assert_matches!(compound_kind("(a)"), CompoundKind::Subshell(chunk) => {
            assert_eq!(chunk.and_ors.len(), 1);
        });
        assert_eq!(first_error("{ a; "), SyntaxError::UnclosedGrouping);
        assert_eq!(first_error("( )"), SyntaxError::EmptySubshell);
    }

    #[test]
    fn if_elif_else() {
        let kind = compound_kind("if a; then b; elif c\nthen d; else e; fi");
        assert_matches!(kind, CompoundKind::If { branches, r#else } => {
            assert_eq!(branches.len(), 2);
            assert_eq!(branches[1].condition.and_ors.len(), 1);
            assert!(r#else.is_some());
        });
        assert_eq!(first_error("if a; then b"), SyntaxError::MissingKeyword("fi"));
        assert_eq!(first_error("if a; b; fi"), SyntaxError::MissingKeyword("then"));
        assert_eq!(first_error("if then b; fi"), SyntaxError::EmptyClause("if"));
    }

    #[test]
    fn loops() {
        assert_matches!(compound_kind("while a; do b; done"), CompoundKind::While { .. });
        assert_matches!(compound_kind("until a\ndo\nb\ndone"), CompoundKind::Until { .. });
        assert_eq!(first_error("while a; done"), SyntaxError::MissingKeyword("do"));
    }

    #[test]
    fn for_loops() {
        assert_matches!(compound_kind("for i in a b c; do x; done"), CompoundKind::For { name, values, .. } => {
            assert_eq!(name, "i");
            assert_eq!(values.unwrap().len(), 3);
        });
        assert_matches!(compound_kind("for i\ndo x; done"), CompoundKind::For { values: None, .. });
        assert_matches!(compound_kind("for i in\ndo x; done"), CompoundKind::For { values: Some(values), .. } => {
            assert_eq!(values, []);
        });
        assert_eq!(
            first_error("for 1 in a; do x; done"),
            SyntaxError::InvalidForName("1".to_owned())
        );
    }

    #[test]
    fn case_command() {
        let kind = compound_kind("case $x in\n(a|b) echo ab;;\n*) ;;\nc) echo c\nesac");
        assert_matches!(kind, CompoundKind::Case { items, .. } => {
            assert_eq!(items.len(), 3);
            assert_eq!(items[0].patterns.len(), 2);
            assert_eq!(items[1].body.and_ors, []);
            assert_eq!(items[2].body.and_ors.len(), 1);
        });
        assert_matches!(compound_kind("case x in esac"), CompoundKind::Case { items, .. } => {
            assert_eq!(items, []);
        });
        assert_eq!(first_error("case x in a) b;;"), SyntaxError::MissingKeyword("esac"));
        assert_eq!(first_error("case x in a b"), SyntaxError::UnclosedPatternList);
    }

    #[test]
    fn reserved_words_are_arguments_elsewhere() {
        let chunk = parse(&Source::new("echo if then fi")).unwrap();
        assert_eq!(chunk.and_ors[0].pipelines[0].forms[0].words.len(), 4);
    }
}
