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

//! Execution of the if command

use super::evaluate_condition;
use crate::Result;
use crate::command::Command;
use brine_env::Frame;
use brine_env::semantics::ExitStatus;
use brine_syntax::syntax::Chunk;
use brine_syntax::syntax::IfBranch;
use std::ops::ControlFlow::Continue;

/// Executes the if command.
pub fn execute(frame: &mut Frame, branches: &[IfBranch], r#else: Option<&Chunk>) -> Result {
    for branch in branches {
        if evaluate_condition(frame, &branch.condition)? {
            return branch.body.execute(frame);
        }
    }

    match r#else {
        Some(body) => body.execute(frame),
        None => {
            frame.last_status = ExitStatus::SUCCESS;
            Continue(())
        }
    }
}
