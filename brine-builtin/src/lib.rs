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

//! Implementation of the shell built-in utilities.
//!
//! Each built-in utility is implemented in the submodule named after the
//! utility. The submodule contains the `main` function that implements the
//! built-in utility. The submodule may also export other items that are used
//! by the `main` function. The module documentation for each submodule
//! describes the specification of the built-in utility.
//!
//! The [`common`] module provides common functions that are used for
//! implementing built-in utilities.
//!
//! To make the built-ins available to the shell, register [`BUILTINS`] in
//! the [`builtins`](brine_env::Frame::builtins) map of the frame.

pub mod alias;
pub mod r#break;
pub mod cd;
pub mod colon;
pub mod command;
pub mod common;
pub mod r#continue;
pub mod eval;
pub mod exec;
pub mod exit;
pub mod export;
pub mod r#false;
pub mod pwd;
pub mod read;
pub mod readonly;
pub mod r#return;
pub mod set;
pub mod shift;
pub mod source;
pub mod times;
pub mod trap;
pub mod r#true;
pub mod r#type;
pub mod ulimit;
pub mod umask;
pub mod unalias;
pub mod unset;


#[doc(no_inline)]
pub use brine_env::builtin::*;

use Type::{Regular, Special};

/// Array of all the implemented built-in utilities.
///
/// The array items are ordered alphabetically.
pub const BUILTINS: &[(&str, Builtin)] = &[
    (".", Builtin::new(Special, source::main)),
    (":", Builtin::new(Special, colon::main)),
    ("alias", Builtin::new(Regular, alias::main)),
    ("break", Builtin::new(Special, r#break::main)),
    ("cd", Builtin::new(Regular, cd::main)),
    ("command", Builtin::new(Regular, command::main)),
    ("continue", Builtin::new(Special, r#continue::main)),
    ("eval", Builtin::new(Special, eval::main)),
    ("exec", Builtin::new(Special, exec::main)),
    ("exit", Builtin::new(Special, exit::main)),
    ("export", Builtin::new(Special, export::main)),
    ("false", Builtin::new(Regular, r#false::main)),
    ("pwd", Builtin::new(Regular, pwd::main)),
    ("read", Builtin::new(Regular, read::main)),
    ("readonly", Builtin::new(Special, readonly::main)),
    ("return", Builtin::new(Special, r#return::main)),
    ("set", Builtin::new(Special, set::main)),
    ("shift", Builtin::new(Special, shift::main)),
    ("times", Builtin::new(Special, times::main)),
    ("trap", Builtin::new(Special, trap::main)),
    ("true", Builtin::new(Regular, r#true::main)),
    ("type", Builtin::new(Regular, r#type::main)),
    ("ulimit", Builtin::new(Regular, ulimit::main)),
    ("umask", Builtin::new(Regular, umask::main)),
    ("unalias", Builtin::new(Regular, unalias::main)),
    ("unset", Builtin::new(Special, unset::main)),
];

#[cfg(test)]
mod builtins_tests {
    use super::*;

    #[test]
    fn builtins_are_sorted() {
        BUILTINS
            .windows(2)
            .for_each(|pair| assert!(pair[0].0 < pair[1].0, "{:?}", pair));
    }
}
