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

//! Type definitions for functions.

use brine_syntax::syntax::CompoundCommand;
use brine_syntax::syntax::Redir;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

/// Definition of a function
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Function {
    /// String that identifies the function.
    pub name: String,
    /// Command that is executed when the function is called.
    pub body: Arc<CompoundCommand>,
    /// Redirections performed each time the function is called
    pub redirs: Vec<Redir>,
}

/// Wrapper of [`Function`] for inserting into a hash set.
///
/// The `Hash` and `PartialEq` implementations only compare the names.
#[derive(Clone, Debug, Eq)]
pub struct HashEntry(pub Arc<Function>);

impl HashEntry {
    /// Convenience method for creating a new function as `HashEntry`
    pub fn new(name: String, body: Arc<CompoundCommand>, redirs: Vec<Redir>) -> HashEntry {
        HashEntry(Arc::new(Function { name, body, redirs }))
    }
}

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

/// Collection of functions.
pub type FunctionSet = HashSet<HashEntry>;
