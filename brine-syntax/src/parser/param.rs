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

//! Parser for parameter expansions

use super::core::Parser;
use super::error::SyntaxError;
use super::word::WordMode;
use crate::syntax::Modifier;
use crate::syntax::ModifierOp;
use crate::syntax::Variable;

/// Returns true if the character names a special parameter.
#[must_use]
pub fn is_special_param(c: char) -> bool {
    matches!(c, '@' | '*' | '#' | '?' | '-' | '$' | '!' | '0')
}

impl Parser<'_> {
    /// Parses the name of a parameter expansion without braces.
    ///
    /// The current position must be just after the `$`. A positional
    /// parameter is one digit.
    pub(super) fn unbraced_param(&mut self) -> Option<Variable> {
        let c = self.peek()?;
        let name = if is_special_param(c) || c.is_ascii_digit() {
            self.pos += 1;
            c.to_string()
        } else if c == '_' || c.is_ascii_alphabetic() {
            self.name()
        } else {
            return None;
        };
        Some(Variable {
            name,
            length_op: false,
            modifier: None,
        })
    }

    /// Consumes a run of name characters.
    fn name(&mut self) -> String {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c == '_' || c.is_ascii_alphanumeric()))
            .unwrap_or(rest.len());
        self.pos += len;
        rest[..len].to_owned()
    }

    /// Parses a parameter expansion after `${`.
    ///
    /// `begin` is the position of the `$`. `quoted` tells whether the
    /// expansion is inside double quotes.
    pub(super) fn braced_param(&mut self, begin: usize, quoted: bool) -> Variable {
        let mut length_op = false;
        if self.looking_at("#") {
            let after = &self.rest()[1..];
            let names_hash = after.starts_with('}')
                || ModifierOp::ALL
                    .iter()
                    .any(|op| after.starts_with(op.as_str()));
            if !names_hash {
                length_op = true;
                self.pos += 1;
            }
        }

        let name = match self.peek() {
            Some(c) if is_special_param(c) => {
                self.pos += 1;
                c.to_string()
            }
            Some(c) if c.is_ascii_digit() => {
                let rest = self.rest();
                let len = rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len());
                self.pos += len;
                rest[..len].to_owned()
            }
            Some(c) if c == '_' || c.is_ascii_alphabetic() => self.name(),
            _ => {
                self.error_here(SyntaxError::EmptyParam);
                self.skip_to_closing_brace(begin);
                return Variable {
                    name: String::new(),
                    length_op,
                    modifier: None,
                };
            }
        };

        let mut modifier = None;
        if !self.looking_at("}") && self.peek().is_some() {
            match ModifierOp::ALL
                .iter()
                .copied()
                .find(|op| self.looking_at(op.as_str()))
            {
                Some(operator) if !length_op => {
                    self.pos += operator.as_str().len();
                    let argument = self
                        .compound(WordMode::BraceArg { quoted })
                        .unwrap_or_else(|| self.empty_compound());
                    modifier = Some(Box::new(Modifier { operator, argument }));
                }
                _ => {
                    self.error_here(SyntaxError::InvalidModifier);
                    self.skip_to_closing_brace(begin);
                    return Variable {
                        name,
                        length_op,
                        modifier,
                    };
                }
            }
        }

        if !self.consume("}") {
            self.error_at(SyntaxError::UnclosedParam, begin);
        }
        Variable {
            name,
            length_op,
            modifier,
        }
    }

    /// Skips to just after the next `}` after an error in a parameter
    /// expansion.
    fn skip_to_closing_brace(&mut self, begin: usize) {
        match self.rest().find('}') {
            Some(i) => self.pos += i + 1,
            None => {
                self.error_at(SyntaxError::UnclosedParam, begin);
                self.pos = self.text.len();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;
    use crate::syntax::PrimaryKind;
    use assert_matches::assert_matches;

    fn param(code: &str) -> (Variable, Vec<crate::parser::Error>) {
        let source = Source::new(code);
        let mut parser = Parser::new(&source);
        let primary = parser.dollar_or_backquote(false).unwrap();
        let errors = parser.take_errors();
        assert_matches!(primary.kind, PrimaryKind::Variable(variable) => (variable, errors))
    }

    #[test]
    fn unbraced_names() {
        assert_eq!(param("$foo_1-x").0.name, "foo_1");
        assert_eq!(param("$12").0.name, "1");
        assert_eq!(param("$@x").0.name, "@");
        assert_eq!(param("$$").0.name, "$");
    }

    #[test]
    fn braced_names() {
        let (variable, errors) = param("${10}");
        assert_eq!(errors, []);
        assert_eq!(variable.name, "10");
        assert!(!variable.length_op);

        let (variable, _) = param("${#}");
        assert_eq!(variable.name, "#");
        assert!(!variable.length_op);

        let (variable, _) = param("${#x}");
        assert_eq!(variable.name, "x");
        assert!(variable.length_op);
    }

    #[test]
    fn modifiers() {
        let (variable, errors) = param("${x:-a b}");
        assert_eq!(errors, []);
        let modifier = variable.modifier.unwrap();
        assert_eq!(modifier.operator, ModifierOp::ColonHyphen);
        assert_eq!(modifier.argument.as_bareword(), Some("a b"));

        let (variable, _) = param("${p##*/}");
        let modifier = variable.modifier.unwrap();
        assert_eq!(modifier.operator, ModifierOp::DoubleHash);
        assert_eq!(modifier.argument.parts.len(), 2);

        let (variable, _) = param("${x=}");
        let modifier = variable.modifier.unwrap();
        assert_eq!(modifier.operator, ModifierOp::Equal);
        assert_eq!(modifier.argument.parts, []);

        let (variable, _) = param("${#-}");
        assert_eq!(variable.name, "#");
        assert_eq!(variable.modifier.unwrap().operator, ModifierOp::Hyphen);
    }

    #[test]
    fn errors_in_braced_params() {
        let (_, errors) = param("${}");
        assert_eq!(errors[0].cause, SyntaxError::EmptyParam);

        let (_, errors) = param("${x;}");
        assert_eq!(errors[0].cause, SyntaxError::InvalidModifier);
        assert_eq!(errors.len(), 1);

        let (_, errors) = param("${#x%y}");
        assert_eq!(errors[0].cause, SyntaxError::InvalidModifier);

        let (_, errors) = param("${x");
        assert_eq!(errors[0].cause, SyntaxError::UnclosedParam);
        assert_eq!(errors[0].position, 0);
    }
}
