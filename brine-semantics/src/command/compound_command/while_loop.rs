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

//! Execution of the while and until loops

use super::Iteration;
use super::evaluate_condition;
use super::in_loop;
use super::loop_control;
use super::unwind;
use crate::Result;
use crate::command::Command;
use brine_env::Frame;
use brine_env::semantics::ExitStatus;
use brine_syntax::syntax::Chunk;
use std::ops::ControlFlow::{Break, Continue};

/// Executes the while loop.
pub fn execute_while(frame: &mut Frame, condition: &Chunk, body: &Chunk) -> Result {
    in_loop(frame, |frame| execute(frame, condition, body, true))
}

/// Executes the until loop.
pub fn execute_until(frame: &mut Frame, condition: &Chunk, body: &Chunk) -> Result {
    in_loop(frame, |frame| execute(frame, condition, body, false))
}

fn execute(frame: &mut Frame, condition: &Chunk, body: &Chunk, expected: bool) -> Result {
    let mut exit_status = ExitStatus::SUCCESS;
    loop {
        match evaluate_condition(frame, condition) {
            Continue(result) if result == expected => {}
            Continue(_) => break,
            Break(()) => match loop_control(frame) {
                Iteration::Continue => continue,
                Iteration::Stop => break,
                Iteration::Unwind => return Break(()),
            },
        }

        let _ = body.execute(frame);
        exit_status = frame.last_status;
        match loop_control(frame) {
            Iteration::Continue => {}
            iteration @ (Iteration::Stop | Iteration::Unwind) => {
                frame.last_status = exit_status;
                return unwind(iteration);
            }
        }
    }

    frame.last_status = exit_status;
    Continue(())
}

#[cfg(test)]
mod tests {
    use crate::command::Command as _;
    use crate::tests::capture_stdout;
    use crate::tests::frame_with_echo;
    use crate::tests::parse;
    use crate::tests::read_all;
    use brine_env::semantics::ExitStatus;
    use std::ops::ControlFlow::{Break, Continue};

    #[test]
    fn while_loop_with_false_condition() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        frame.last_status = ExitStatus(3);
        let _ = parse("while return -n 1; do echo x; done").execute(&mut frame);
        assert_eq!(read_all(&stdout), "");
        assert_eq!(frame.last_status, ExitStatus::SUCCESS);
    }

    #[test]
    fn while_loop_counts() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let code = "i=0; while return -n $((i < 3 ? 0 : 1)); do echo $i; i=$((i+1)); done";
        let result = parse(code).execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(read_all(&stdout), "0\n1\n2\n");
        assert_eq!(frame.loop_depth, 0);
    }

    #[test]
    fn until_loop_counts() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let code = "i=0; until return -n $((i < 2)); do echo $i; i=$((i+1)); done";
        let _ = parse(code).execute(&mut frame);
        assert_eq!(read_all(&stdout), "0\n1\n");
    }

    #[test]
    fn exit_status_of_last_body() {
        let mut frame = frame_with_echo();
        let code = "i=0; while return -n $((i > 0)); do i=1; return -n 7; done";
        let _ = parse(code).execute(&mut frame);
        assert_eq!(frame.last_status, ExitStatus(7));
    }

    #[test]
    fn break_in_body() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let result = parse("while echo a; do break; echo b; done; echo c").execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(read_all(&stdout), "a\nc\n");
        assert_eq!(frame.loop_abort, None);
    }

    #[test]
    fn continue_in_body() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let code = "i=0; while return -n $((i > 1)); do i=$((i+1)); continue; echo x; done; echo $i";
        let _ = parse(code).execute(&mut frame);
        assert_eq!(read_all(&stdout), "2\n");
    }

    #[test]
    fn break_in_condition() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let _ = parse("while break; do echo x; done; echo y").execute(&mut frame);
        assert_eq!(read_all(&stdout), "y\n");
    }

    #[test]
    fn break_outer_loop() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let code = "while echo 1; do while echo 2; do break 2; done; echo no; done; echo 3";
        let result = parse(code).execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(read_all(&stdout), "1\n2\n3\n");
    }

    #[test]
    fn return_in_body() {
        let mut frame = frame_with_echo();
        let _stdout = capture_stdout(&mut frame);
        let result = parse("while echo; do return 4; done").execute(&mut frame);
        assert_eq!(result, Break(()));
        assert!(frame.fn_abort);
        assert_eq!(frame.last_status, ExitStatus(4));
    }
}
