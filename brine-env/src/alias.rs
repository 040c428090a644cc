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

//! Defining aliases.
//!
//! An alias replaces the command name of a simple command with a sequence of
//! words. Only plain words are allowed in the replacement: no quotes,
//! expansions, operators or glob characters.

use brine_syntax::parser::is_plain_words;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;
use thiserror::Error;

/// Name-value pair that defines an alias.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alias {
    /// Name of the alias that is matched against a command word
    pub name: String,
    /// String that substitutes the command word
    pub replacement: String,
}

impl Alias {
    /// Returns the words of the replacement.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.replacement.split_ascii_whitespace()
    }

    /// Whether the replacement ends with a blank, which makes the next word
    /// subject to alias substitution, too.
    #[must_use]
    pub fn ends_with_blank(&self) -> bool {
        self.replacement.ends_with([' ', '\t', '\n'])
    }
}

/// Wrapper of [`Alias`] for inserting into a hash set.
///
/// The `Hash` and `PartialEq` implementations only compare the names.
#[derive(Clone, Debug, Eq)]
pub struct HashEntry(pub Arc<Alias>);

impl PartialEq for HashEntry {
    fn eq(&self, other: &HashEntry) -> bool {
        self.0.name == other.0.name
    }
}

impl Hash for HashEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state)
    }
}

impl Borrow<str> for HashEntry {
    fn borrow(&self) -> &str {
        &self.0.name
    }
}

/// Collection of aliases.
pub type AliasSet = HashSet<HashEntry>;

/// Error in defining an alias
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DefineError {
    #[error("`{0}` is not a valid alias name")]
    InvalidName(String),
    #[error("the value of alias `{0}` may contain only plain words")]
    InvalidReplacement(String),
}

/// Defines or redefines an alias.
pub fn define(
    aliases: &mut AliasSet,
    name: String,
    replacement: String,
) -> Result<(), DefineError> {
    if name.is_empty() || name.contains(['=', '/', ' ', '\t', '\n']) || !is_plain_words(&name) {
        return Err(DefineError::InvalidName(name));
    }
    if !is_plain_words(&replacement) {
        return Err(DefineError::InvalidReplacement(name));
    }
    aliases.replace(HashEntry(Arc::new(Alias { name, replacement })));
    Ok(())
}
