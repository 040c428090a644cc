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

//! Execution of the subshell compound command

use crate::Result;
use crate::command::Command;
use crate::command::apply_errexit;
use crate::trap::run_exit_trap;
use brine_env::Frame;
use brine_syntax::syntax::Chunk;

/// Executes the chunk in a subshell.
///
/// Nothing the chunk does to the subshell is visible to the frame. An
/// `exit` in the subshell only ends the subshell, whose exit status becomes
/// the exit status of the command.
pub fn execute(frame: &mut Frame, body: &Chunk) -> Result {
    let mut subshell = frame.subshell();
    let _ = body.execute(&mut subshell);
    run_exit_trap(&mut subshell);
    frame.last_status = subshell.exit.unwrap_or(subshell.last_status);
    apply_errexit(frame)
}

#[cfg(test)]
mod tests {
    use crate::command::Command as _;
    use crate::tests::capture_stdout;
    use crate::tests::frame_with_echo;
    use crate::tests::parse;
    use crate::tests::read_all;
    use brine_env::semantics::ExitStatus;
    use brine_env::trap::Action;
    use brine_env::trap::Condition;
    use std::ops::ControlFlow::Continue;

    #[test]
    fn subshell_is_isolated() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let result = parse("x=1; (x=2; echo $x); echo $x").execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(read_all(&stdout), "2\n1\n");
    }

    #[test]
    fn exit_status_of_subshell() {
        let mut frame = frame_with_echo();
        let _ = parse("(return -n 4)").execute(&mut frame);
        assert_eq!(frame.last_status, ExitStatus(4));
    }

    #[test]
    fn return_ends_only_subshell() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let result = parse("(return 6; echo no); echo $?").execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert!(!frame.fn_abort);
        assert_eq!(read_all(&stdout), "6\n");
    }

    #[test]
    fn outer_exit_trap_is_not_run_by_subshell() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        frame
            .traps
            .set(Condition::Exit, Action::Command("echo outer".into()));
        let _ = parse("(echo in)").execute(&mut frame);
        assert_eq!(read_all(&stdout), "in\n");
        assert_ne!(*frame.traps.get(Condition::Exit), Action::Default);
    }
}
