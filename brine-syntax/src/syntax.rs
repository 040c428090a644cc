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

//! Shell command language syntax
//!
//! This module contains types that represent abstract syntax trees (ASTs) of
//! the shell language.
//!
//! ## Syntactic elements
//!
//! The AST type that represents the whole shell script is [`Chunk`], which is
//! a sequence of [`AndOr`] lists. An `AndOr` is a sequence of conditionally
//! executed [`Pipeline`]s. A `Pipeline` is a sequence of [`Form`]s separated
//! by `|`. A `Form` is either a simple command, a function definition or a
//! [`CompoundCommand`].
//!
//! ## Lexical elements
//!
//! A command word is a [`Compound`], a sequence of adjacent [`Primary`]
//! elements with no whitespace in between. A compound expands to one or more
//! fields depending on the primaries it contains.
//!
//! Every node carries a [`Span`] that locates it in the preprocessed text of
//! the [`Source`](crate::source::Source). See the [`node`] module for a
//! uniform view of the tree and the [`pretty`] module for a debug printer.

pub mod node;
pub mod pretty;

use crate::source::Span;
use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

/// Sequence of and-or lists separated by `;` or newlines
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Chunk {
    pub span: Span,
    pub and_ors: Vec<AndOr>,
}

/// Sequence of pipelines joined by `&&` or `||`
///
/// `and_op[i]` is true if `pipelines[i]` and `pipelines[i + 1]` are joined by
/// `&&`, and false for `||`. The length of `and_op` is one less than that of
/// `pipelines`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AndOr {
    pub span: Span,
    pub pipelines: Vec<Pipeline>,
    pub and_op: Vec<bool>,
}

/// Forms joined by `|`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pipeline {
    pub span: Span,
    /// Whether the pipeline begins with `!`
    pub negation: bool,
    pub forms: Vec<Form>,
}

/// Kind of a [`Form`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FormType {
    /// Simple command
    Normal,
    /// `name() compound-command`
    FnDefinition,
    /// Compound command with optional redirections
    CompoundCommand,
}

/// Single command in a pipeline
///
/// For a normal form, `assigns`, `words` and `redirs` make up the simple
/// command and `body` is `None`. A function definition form has the function
/// name as its only word and the function body in `body`. A compound command
/// form has the command in `body` and possibly some redirections.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Form {
    pub span: Span,
    pub r#type: FormType,
    pub assigns: Vec<Assign>,
    pub words: Vec<Compound>,
    pub redirs: Vec<Redir>,
    pub body: Option<Arc<CompoundCommand>>,
}

/// Item of a `case` command
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CaseItem {
    pub span: Span,
    pub patterns: Vec<Compound>,
    pub body: Chunk,
}

/// Condition-body pair of an `if` command
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IfBranch {
    pub condition: Chunk,
    pub body: Chunk,
}

/// Variants of compound commands
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompoundKind {
    /// `{ chunk }`
    Grouping(Chunk),
    /// `( chunk )`
    Subshell(Chunk),
    /// `for name [in words]; do chunk done`
    For {
        name: String,
        values: Option<Vec<Compound>>,
        body: Chunk,
    },
    /// `while chunk; do chunk done`
    While { condition: Chunk, body: Chunk },
    /// `until chunk; do chunk done`
    Until { condition: Chunk, body: Chunk },
    /// `if chunk; then chunk; [elif chunk; then chunk;]... [else chunk;] fi`
    If {
        branches: Vec<IfBranch>,
        r#else: Option<Chunk>,
    },
    /// `case word in [(]pattern[|pattern]...) chunk ;; ... esac`
    Case { subject: Compound, items: Vec<CaseItem> },
}

/// Compound command
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompoundCommand {
    pub span: Span,
    pub kind: CompoundKind,
}

impl CompoundCommand {
    /// Returns true if this is a `( … )` command.
    #[must_use]
    pub fn is_subshell(&self) -> bool {
        matches!(self.kind, CompoundKind::Subshell(_))
    }
}

/// Variable assignment `name=value`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assign {
    pub span: Span,
    pub lhs: String,
    pub rhs: Compound,
}

/// Redirection operator
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RedirMode {
    /// Not yet determined
    Invalid,
    /// `<`
    Input,
    /// `>`
    Output,
    /// `<>`
    InputOutput,
    /// `>>`
    Append,
    /// `>|`
    Clobber,
    /// `<<`, `<<-`
    Heredoc,
}

impl RedirMode {
    /// File descriptor a redirection of this mode applies to when none is
    /// given.
    #[must_use]
    pub fn default_fd(self) -> i32 {
        match self {
            RedirMode::Input | RedirMode::InputOutput | RedirMode::Heredoc => 0,
            RedirMode::Output | RedirMode::Append | RedirMode::Clobber | RedirMode::Invalid => 1,
        }
    }
}

impl fmt::Display for RedirMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RedirMode::Invalid => "?",
            RedirMode::Input => "<",
            RedirMode::Output => ">",
            RedirMode::InputOutput => "<>",
            RedirMode::Append => ">>",
            RedirMode::Clobber => ">|",
            RedirMode::Heredoc => "<<",
        })
    }
}

/// Redirection
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redir {
    pub span: Span,
    /// File descriptor on the left of the operator, if any
    pub left: Option<i32>,
    pub mode: RedirMode,
    /// Whether the operator is followed by `&`, making the right-hand side a
    /// file descriptor
    pub right_fd: bool,
    pub right: Compound,
    pub heredoc: Option<Arc<Heredoc>>,
}

/// Content of a here-document
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HeredocBody {
    /// Text of the body as written, with leading tabs removed for `<<-`
    pub value: String,
    /// Body split into literal strings and expansions
    ///
    /// If the delimiter was quoted, this is a single string segment equal to
    /// `value`.
    pub segments: Vec<DqSegment>,
}

/// Here-document
///
/// The content of a here-document appears after the next newline following
/// the redirection operator, so it is filled in after the redirection itself
/// has been parsed. The body is `None` until then.
#[derive(Debug, Default)]
pub struct Heredoc {
    pub delim: String,
    /// Whether any part of the delimiter was quoted, which disables
    /// expansions in the content
    pub quoted: bool,
    /// Whether leading tabs are removed (`<<-`)
    pub strip_tabs: bool,
    body: OnceLock<HeredocBody>,
}

impl Heredoc {
    /// Creates a here-document whose content is not yet known.
    #[must_use]
    pub fn new(delim: String, quoted: bool, strip_tabs: bool) -> Self {
        Heredoc {
            delim,
            quoted,
            strip_tabs,
            body: OnceLock::new(),
        }
    }

    /// Returns the body, or `None` if not yet filled.
    #[must_use]
    pub fn body(&self) -> Option<&HeredocBody> {
        self.body.get()
    }

    /// Returns the text of the body, or `None` if not yet filled.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.body().map(|body| body.value.as_str())
    }

    /// Fills in the body.
    ///
    /// Returns the body back if it has already been filled.
    pub fn fill(&self, body: HeredocBody) -> Result<(), HeredocBody> {
        self.body.set(body)
    }
}

impl Clone for Heredoc {
    fn clone(&self) -> Self {
        let body = OnceLock::new();
        if let Some(value) = self.body() {
            let _ = body.set(value.clone());
        }
        Heredoc {
            delim: self.delim.clone(),
            quoted: self.quoted,
            strip_tabs: self.strip_tabs,
            body,
        }
    }
}

impl PartialEq for Heredoc {
    fn eq(&self, other: &Self) -> bool {
        self.delim == other.delim
            && self.quoted == other.quoted
            && self.strip_tabs == other.strip_tabs
            && self.body() == other.body()
    }
}

impl Eq for Heredoc {}

/// Sequence of primaries that make up a word
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Compound {
    pub span: Span,
    /// User name after `~`, if the word starts with a tilde prefix
    ///
    /// `Some("")` stands for a bare `~`.
    pub tilde_prefix: Option<String>,
    pub parts: Vec<Primary>,
}

impl Compound {
    /// Returns the literal value if the compound consists of exactly one
    /// bareword.
    #[must_use]
    pub fn as_bareword(&self) -> Option<&str> {
        match (&self.tilde_prefix, self.parts.as_slice()) {
            (
                None,
                [
                    Primary {
                        kind: PrimaryKind::Bareword(value),
                        ..
                    },
                ],
            ) => Some(value),
            _ => None,
        }
    }

    /// Returns the word with quotes removed and without performing any
    /// expansions.
    ///
    /// Expansions are rendered as the text they were written with, as far as
    /// that can be reconstructed. The second value is true if any part of the
    /// word was quoted.
    #[must_use]
    pub fn unquote(&self) -> (String, bool) {
        let mut result = String::new();
        let mut quoted = false;
        if let Some(user) = &self.tilde_prefix {
            result.push('~');
            result.push_str(user);
        }
        for part in &self.parts {
            match &part.kind {
                PrimaryKind::Bareword(value) => result.push_str(value),
                PrimaryKind::SingleQuoted(value) => {
                    quoted = true;
                    result.push_str(value);
                }
                PrimaryKind::DoubleQuoted(segments) => {
                    quoted = true;
                    for segment in segments {
                        match segment {
                            DqSegment::String(value) => result.push_str(value),
                            DqSegment::Expansion(primary) => {
                                result.push_str(&primary.to_string())
                            }
                        }
                    }
                }
                _ => result.push_str(&part.to_string()),
            }
        }
        (result, quoted)
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user) = &self.tilde_prefix {
            write!(f, "~{user}")?;
        }
        self.parts.iter().try_for_each(|part| part.fmt(f))
    }
}

/// Segment of a double-quoted string
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DqSegment {
    /// Literal text with backslash escapes resolved
    String(String),
    /// Parameter expansion, command substitution or arithmetic expansion
    Expansion(Primary),
}

/// Element of a [`Compound`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Primary {
    pub span: Span,
    pub kind: PrimaryKind,
}

/// Variants of [`Primary`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrimaryKind {
    /// Unquoted literal with backslash escapes resolved
    Bareword(String),
    /// Content of a single-quoted string, taken from the original code
    SingleQuoted(String),
    /// Double-quoted string
    DoubleQuoted(Vec<DqSegment>),
    /// One of `[`, `]`, `*` and `?`
    WildcardChar(char),
    /// `$(…)` or `` `…` ``
    OutputCapture(Arc<Chunk>),
    /// `$name` or `${…}`
    Variable(Variable),
    /// `$((…))`
    Arithmetic(Vec<DqSegment>),
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PrimaryKind::Bareword(value) => {
                for c in value.chars() {
                    if crate::parser::is_bareword_stopper(c) || c == '\\' || c == '#' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                Ok(())
            }
            PrimaryKind::SingleQuoted(value) => write!(f, "'{value}'"),
            PrimaryKind::DoubleQuoted(segments) => {
                f.write_str("\"")?;
                for segment in segments {
                    match segment {
                        DqSegment::String(value) => {
                            for c in value.chars() {
                                if matches!(c, '$' | '`' | '"' | '\\') {
                                    f.write_str("\\")?;
                                }
                                write!(f, "{c}")?;
                            }
                        }
                        DqSegment::Expansion(primary) => primary.fmt(f)?,
                    }
                }
                f.write_str("\"")
            }
            PrimaryKind::WildcardChar(c) => write!(f, "{c}"),
            PrimaryKind::OutputCapture(_) => f.write_str("$(…)"),
            PrimaryKind::Variable(variable) => variable.fmt(f),
            PrimaryKind::Arithmetic(segments) => {
                f.write_str("$((")?;
                for segment in segments {
                    match segment {
                        DqSegment::String(value) => f.write_str(value)?,
                        DqSegment::Expansion(primary) => primary.fmt(f)?,
                    }
                }
                f.write_str("))")
            }
        }
    }
}

/// Parameter expansion
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variable {
    pub name: String,
    /// Whether this is a `${#name}` expansion
    pub length_op: bool,
    pub modifier: Option<Box<Modifier>>,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.length_op && self.modifier.is_none() && self.name.len() == 1 {
            return write!(f, "${}", self.name);
        }
        f.write_str("${")?;
        if self.length_op {
            f.write_str("#")?;
        }
        f.write_str(&self.name)?;
        if let Some(modifier) = &self.modifier {
            write!(f, "{}{}", modifier.operator, modifier.argument)?;
        }
        f.write_str("}")
    }
}

/// Operator of a [`Modifier`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ModifierOp {
    /// `:-`
    ColonHyphen,
    /// `-`
    Hyphen,
    /// `:=`
    ColonEqual,
    /// `=`
    Equal,
    /// `:?`
    ColonQuestion,
    /// `?`
    Question,
    /// `:+`
    ColonPlus,
    /// `+`
    Plus,
    /// `%%`
    DoublePercent,
    /// `%`
    Percent,
    /// `##`
    DoubleHash,
    /// `#`
    Hash,
}

impl ModifierOp {
    /// All operators, ordered so that the longest match comes first
    pub const ALL: [ModifierOp; 12] = [
        ModifierOp::ColonHyphen,
        ModifierOp::ColonEqual,
        ModifierOp::ColonQuestion,
        ModifierOp::ColonPlus,
        ModifierOp::Hyphen,
        ModifierOp::Equal,
        ModifierOp::Question,
        ModifierOp::Plus,
        ModifierOp::DoublePercent,
        ModifierOp::Percent,
        ModifierOp::DoubleHash,
        ModifierOp::Hash,
    ];

    /// Returns the operator as written in the source.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        use ModifierOp::*;
        match self {
            ColonHyphen => ":-",
            Hyphen => "-",
            ColonEqual => ":=",
            Equal => "=",
            ColonQuestion => ":?",
            Question => "?",
            ColonPlus => ":+",
            Plus => "+",
            DoublePercent => "%%",
            Percent => "%",
            DoubleHash => "##",
            Hash => "#",
        }
    }

    /// Whether the operator begins with a colon, which makes it treat an
    /// empty value like an unset one.
    #[must_use]
    pub fn tests_null(self) -> bool {
        self.as_str().starts_with(':')
    }
}

impl fmt::Display for ModifierOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier of a braced parameter expansion
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Modifier {
    pub operator: ModifierOp,
    pub argument: Compound,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bareword(value: &str) -> Primary {
        Primary {
            span: Span::default(),
            kind: PrimaryKind::Bareword(value.to_owned()),
        }
    }

    #[test]
    fn compound_as_bareword() {
        let mut compound = Compound {
            parts: vec![bareword("ls")],
            ..Compound::default()
        };
        assert_eq!(compound.as_bareword(), Some("ls"));

        compound.parts.push(bareword("x"));
        assert_eq!(compound.as_bareword(), None);
    }

    #[test]
    fn unquoting_compound() {
        let compound = Compound {
            parts: vec![
                bareword("E"),
                Primary {
                    span: Span::default(),
                    kind: PrimaryKind::SingleQuoted("O".to_owned()),
                },
                Primary {
                    span: Span::default(),
                    kind: PrimaryKind::DoubleQuoted(vec![DqSegment::String("F".to_owned())]),
                },
            ],
            ..Compound::default()
        };
        assert_eq!(compound.unquote(), ("EOF".to_owned(), true));
    }

    #[test]
    fn heredoc_is_filled_once() {
        let heredoc = Heredoc::new("END".to_owned(), false, false);
        assert_eq!(heredoc.value(), None);
        let body = |value: &str| HeredocBody {
            value: value.to_owned(),
            segments: vec![DqSegment::String(value.to_owned())],
        };
        assert_eq!(heredoc.fill(body("foo\n")), Ok(()));
        assert_eq!(heredoc.fill(body("bar\n")), Err(body("bar\n")));
        assert_eq!(heredoc.value(), Some("foo\n"));
    }

    #[test]
    fn variable_display() {
        let variable = Variable {
            name: "x".to_owned(),
            length_op: false,
            modifier: Some(Box::new(Modifier {
                operator: ModifierOp::ColonHyphen,
                argument: Compound {
                    parts: vec![bareword("d")],
                    ..Compound::default()
                },
            })),
        };
        assert_eq!(variable.to_string(), "${x:-d}");
    }
}
