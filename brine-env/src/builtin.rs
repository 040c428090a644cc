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

//! Type definitions for built-in utilities.
//!
//! This module provides data types for defining built-in utilities.
//!
//! Note that concrete implementations of built-ins are not included in the
//! `brine_env` crate. For implementations of specific built-ins like `cd` and
//! `export`, see the `brine_builtin` crate.

use crate::Frame;
use crate::semantics::ExitStatus;
use std::fmt::Debug;
use std::ops::ControlFlow;

/// Types of built-in utilities
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Type {
    /// Special built-in
    ///
    /// Special built-in utilities are treated differently from regular
    /// built-ins. Assignments in the simple command that runs a special
    /// built-in persist after the command, special built-ins are found
    /// before functions, and an error in a special built-in makes a
    /// non-interactive shell exit.
    Special,

    /// Regular built-in
    ///
    /// A regular built-in is found after functions, like an external
    /// utility found in `PATH`.
    Regular,
}

/// Result of built-in utility execution
///
/// The second element is `Break` if the built-in requests the current
/// command to be abandoned. `break`, `continue`, `return` and `exit` return
/// `Break` after setting the corresponding field of the [`Frame`]. A special
/// built-in that returns `Break` without setting any of them has failed in a
/// way that makes the shell exit.
pub type Result = (ExitStatus, ControlFlow<()>);

/// Type of functions that implement the behavior of a built-in
///
/// The function receives the command words that follow the command name.
pub type Main = fn(&mut Frame, Vec<String>) -> Result;

/// Built-in utility definition
#[derive(Clone, Copy)]
pub struct Builtin {
    /// Type of the built-in
    pub r#type: Type,
    /// Function that implements the behavior of the built-in
    pub execute: Main,
}

impl Builtin {
    /// Creates a new built-in utility definition.
    pub const fn new(r#type: Type, execute: Main) -> Self {
        Self { r#type, execute }
    }
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
            .field("type", &self.r#type)
            .finish_non_exhaustive()
    }
}
