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

//! Simple command semantics for the absent target

use crate::Handle;
use crate::Result;
use crate::assign::perform_assignments;
use crate::expansion::Env;
use crate::redir::RedirGuard;
use crate::xtrace::XTrace;
use brine_env::Frame;
use brine_env::semantics::ExitStatus;
use brine_syntax::syntax::Assign;
use brine_syntax::syntax::Redir;
use std::ops::ControlFlow::Continue;

pub fn execute(
    frame: &mut Frame,
    assigns: &[Assign],
    redirs: &[Redir],
    exit_status: ExitStatus,
) -> Result {
    // The redirections are undone when the guard is dropped.
    let redir_exit_status = {
        let mut guard = RedirGuard::new(frame);
        match guard.perform_redirs(redirs) {
            Ok(exit_status) => exit_status,
            Err(error) => return error.handle(&mut guard),
        }
    };

    let mut xtrace = XTrace::from_frame(frame).filter(|_| !assigns.is_empty());
    let mut env = Env::new(frame);
    if let Err(error) = perform_assignments(&mut env, assigns, false, xtrace.as_mut()) {
        return error.handle(frame);
    }
    let assign_exit_status = env.last_command_subst_status;

    if let Some(xtrace) = xtrace {
        xtrace.finish(frame);
    }

    frame.last_status = assign_exit_status
        .or(redir_exit_status)
        .unwrap_or(exit_status);
    Continue(())
}
