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

//! Word expansion
//!
//! The word expansion converts a [`Compound`] in the syntax tree into the
//! strings the command receives. It proceeds in these steps:
//!
//! 1. The initial expansion performs tilde expansion, parameter expansion,
//!    command substitution and arithmetic expansion, producing an
//!    [`Expander`](expander::Expander).
//! 2. [Field splitting](split) divides the results of unquoted expansions
//!    into fields, each represented as a [`GlobWord`].
//! 3. [Pathname expansion](glob) replaces fields containing glob
//!    metacharacters with the matching file names. The result has quotes
//!    removed.
//!
//! [`expand_words`] performs all the steps. [`expand_word`] skips field
//! splitting and pathname expansion, which is what assignments and
//! redirections need. [`expand_pattern`] produces a pattern for `case` and
//! parameter trimming.

mod arith;
mod command_subst;
pub mod expander;
pub mod glob;
pub mod glob_word;
mod initial;
mod param;
pub mod split;
mod tilde;

use self::glob_word::GlobWord;
use brine_env::Frame;
use brine_env::semantics::ExitStatus;
use brine_env::variable::AssignError;
use brine_syntax::syntax::Compound;
use brine_syntax::syntax::DqSegment;
use thiserror::Error;

/// Error in the word expansion
#[derive(Debug, Error)]
pub enum Error {
    /// `${name?message}` or `${name:?message}` on an unset or empty
    /// parameter
    #[error("{name}: {message}")]
    EmptyParameter { name: String, message: String },
    /// Expansion of an unset parameter while the `nounset` option is on
    #[error("{0}: parameter not set")]
    UnsetParameter(String),
    /// `${name=value}` on a parameter that is not a variable
    #[error("{0}: cannot assign to this parameter")]
    NonAssignableParameter(String),
    #[error(transparent)]
    AssignReadOnly(#[from] AssignError),
    #[error("arithmetic expansion: {0}")]
    Arith(String),
    #[error("command substitution: {0}")]
    CommandSubst(#[from] std::io::Error),
}

impl Error {
    /// Whether the error should make the shell exit.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::EmptyParameter { .. } | Error::UnsetParameter(_)
        )
    }
}

/// Result of word expansion
pub type Result<T> = std::result::Result<T, Error>;

/// Environment in which words are expanded
#[derive(Debug)]
pub struct Env<'a> {
    pub frame: &'a mut Frame,
    /// Exit status of the last command substitution performed, if any
    ///
    /// A simple command without a command word takes this as its exit
    /// status.
    pub last_command_subst_status: Option<ExitStatus>,
}

impl<'a> Env<'a> {
    /// Creates an expansion environment.
    pub fn new(frame: &'a mut Frame) -> Self {
        Env {
            frame,
            last_command_subst_status: None,
        }
    }
}

/// Expands words into fields.
///
/// Each word may produce any number of fields after field splitting and
/// pathname expansion.
pub fn expand_words(env: &mut Env<'_>, words: &[Compound]) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    for word in words {
        let expander = initial::expand_compound(env, word)?;
        for glob_word in expander.expand(env.frame.ifs()) {
            fields.extend(glob::glob(env.frame, &glob_word));
        }
    }
    Ok(fields)
}

/// Expands a word into a single string.
pub fn expand_word(env: &mut Env<'_>, word: &Compound) -> Result<String> {
    Ok(initial::expand_compound(env, word)?.expand_one_word())
}

/// Expands a word into a pattern.
pub fn expand_pattern(env: &mut Env<'_>, word: &Compound) -> Result<GlobWord> {
    Ok(initial::expand_compound(env, word)?.to_glob_word())
}

/// Expands the contents of a double-quoted string or here-document into a
/// single string.
pub fn expand_text(env: &mut Env<'_>, segments: &[DqSegment]) -> Result<String> {
    initial::expand_text(env, segments)
}
