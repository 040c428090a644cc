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

//! Command execution
//!
//! Every executable syntax node implements [`Command`]. Executing a command
//! updates `frame.last_status`. The result is `Break` when the command was
//! abandoned because of a pending `break`, `continue`, `return` or `exit`,
//! which is recorded in the [`Frame`] and examined by the enclosing loop,
//! function or the top level.

mod and_or;
mod compound_command;
mod function_definition;
mod pipeline;
pub mod simple_command;

use crate::Result;
use brine_env::Frame;
use brine_env::option;
use brine_syntax::syntax;
use brine_syntax::syntax::FormType;
use std::ops::ControlFlow::{Break, Continue};

/// Syntactic construct that can be executed.
pub trait Command {
    /// Executes this command.
    ///
    /// Implementations of this method are expected to update
    /// `frame.last_status` reflecting the result of the command execution.
    fn execute(&self, frame: &mut Frame) -> Result;
}

/// Executes the form according to its type.
impl Command for syntax::Form {
    fn execute(&self, frame: &mut Frame) -> Result {
        match self.r#type {
            FormType::Normal => simple_command::execute(self, frame),
            FormType::FnDefinition => function_definition::execute(self, frame),
            FormType::CompoundCommand => compound_command::execute_form(self, frame),
        }
    }
}

/// Executes the chunk.
///
/// The and-or lists are executed in sequence. If any of them is abandoned,
/// the remaining ones are not executed.
///
/// If the `exec` option is off (`set -n`), nothing is executed.
impl Command for syntax::Chunk {
    fn execute(&self, frame: &mut Frame) -> Result {
        if !frame.options.is_on(option::Exec) {
            return Continue(());
        }
        for and_or in &self.and_ors {
            and_or.execute(frame)?;
        }
        Continue(())
    }
}

/// Makes the shell exit if the `errexit` option applies to the last status.
///
/// The option applies when it is on, the status is non-zero, and the
/// command is not part of a condition (`condition_depth` is zero).
pub(crate) fn apply_errexit(frame: &mut Frame) -> Result {
    if frame.options.is_on(option::ErrExit)
        && !frame.last_status.is_successful()
        && frame.condition_depth == 0
    {
        log::debug!("errexit: exiting with {:?}", frame.last_status);
        frame.exit = Some(frame.last_status);
        Break(())
    } else {
        Continue(())
    }
}

/// Executes `f` with `condition_depth` incremented.
pub(crate) fn in_condition<F>(frame: &mut Frame, f: F) -> Result
where
    F: FnOnce(&mut Frame) -> Result,
{
    frame.condition_depth += 1;
    let result = f(frame);
    frame.condition_depth -= 1;
    result
}
