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

//! Continue built-in
//!
//! The **`continue`** built-in skips the rest of a loop body and resumes the
//! next iteration.
//!
//! # Synopsis
//!
//! ```sh
//! continue [n]
//! ```
//!
//! # Description
//!
//! `continue n` interrupts the execution of the *n*th innermost `for`,
//! `while`, or `until` loop and resumes its next iteration. If *n* is
//! greater than the number of enclosing loops, the built-in affects the
//! outermost one.
//!
//! # Operands
//!
//! Operand *n* specifies the nest level of the affected loop. If omitted, it
//! defaults to 1. It is an error if the value is not a positive decimal
//! integer.
//!
//! # Errors
//!
//! Same as the [`break`](crate::r#break) built-in.
//!
//! # Exit status
//!
//! Zero if a loop is continued, one if there is no loop.

use crate::r#break::abort_loop;
use brine_env::Frame;
use brine_env::builtin::Result;

/// Entry point for executing the `continue` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    abort_loop(frame, "continue", &args, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, frame};
    use brine_env::semantics::{ExitStatus, LoopAbort};
    use brine_semantics::run_code;
    use std::ops::ControlFlow::Break;

    #[test]
    fn continuing_second_loop() {
        let mut frame = frame();
        frame.loop_depth = 2;
        assert_eq!(main(&mut frame, args(&["2"])), (ExitStatus::SUCCESS, Break(())));
        assert_eq!(
            frame.loop_abort,
            Some(LoopAbort {
                dest_depth: 1,
                next: true
            })
        );
    }

    #[test]
    fn continue_skips_rest_of_body() {
        let mut frame = frame();
        let code = "x=; for i in 1 2 3; do continue; x=$x$i; done; y=$i";
        let _ = run_code(&mut frame, code, "test");
        assert_eq!(frame.variables.value("x"), Some(""));
        assert_eq!(frame.variables.value("y"), Some("3"));
    }
}
