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

//! Exec built-in
//!
//! The **`exec`** built-in replaces the shell with a command or makes
//! redirections persistent.
//!
//! # Synopsis
//!
//! ```sh
//! exec [command [argument...]]
//! ```
//!
//! # Description
//!
//! Without operands, the redirections of the simple command that invoked
//! the built-in are not undone after the built-in returns, so they stay in
//! effect for the rest of the shell.
//!
//! With operands, the command is run and the shell exits with its exit
//! status. The `EXIT` trap does not run, as the shell would be replaced by
//! the command.
//!
//! # Errors
//!
//! If the command is not found, the shell exits with status 127.
//!
//! # Exit status
//!
//! Zero without operands. Otherwise, the shell exits with the exit status
//! of the command.
//!
//! # Portability
//!
//! A real `exec` replaces the shell process with the command. This shell
//! runs the command as a child process and exits when it finishes, which
//! looks the same to the parent process.

use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use brine_env::trap::{Action, Condition};
use brine_semantics::command::simple_command::execute_target;
use brine_semantics::command_search::search;
use std::ops::ControlFlow::{Break, Continue};

/// Entry point for executing the `exec` built-in
pub fn main(frame: &mut Frame, mut args: Vec<String>) -> Result {
    if args.first().is_some_and(|arg| arg == "--") {
        args.remove(0);
    }

    let Some(name) = args.first() else {
        frame.retain_redirs = true;
        return (ExitStatus::SUCCESS, Continue(()));
    };

    let target = search(frame, name);
    log::debug!("exec {name}: {target:?}");
    frame.traps.set(Condition::Exit, Action::Default);
    let _ = execute_target(frame, target, args);

    let status = *frame.exit.get_or_insert(frame.last_status);
    (status, Break(()))
}
