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

//! Semantics of the shell language.
//!
//! This crate defines the standard semantics for the shell language. The core
//! of the semantics is command execution and word expansion.
//! A command can be executed by calling
//! [`Command::execute`](command::Command::execute).
//! A word can be expanded by using functions defined in [`expansion`].
//!
//! An [`Evaler`] parses and executes shell scripts. It is a utility for
//! running a whole script in a [`Frame`](brine_env::Frame).

pub mod alias;
pub mod assign;
pub mod command;
pub mod command_search;
pub mod expansion;
pub mod pattern;
pub mod redir;
pub mod trap;
pub mod xtrace;

#[doc(no_inline)]
pub use brine_env::semantics::*;

mod handle;
pub use handle::Handle;

mod runner;
pub use runner::Evaler;
pub use runner::run_code;

use nix::fcntl::OFlag;
use std::fs::File;

/// Creates a pipe whose ends are closed on exec.
///
/// Returns the reading end and the writing end.
pub(crate) fn pipe() -> std::io::Result<(File, File)> {
    let (reader, writer) = nix::unistd::pipe2(OFlag::O_CLOEXEC)?;
    Ok((File::from(reader), File::from(writer)))
}

#[cfg(test)]
pub(crate) mod tests;
