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

//! Eval built-in
//!
//! The **`eval`** built-in evaluates the arguments as shell commands.
//!
//! # Synopsis
//!
//! ```sh
//! eval [argument...]
//! ```
//!
//! # Description
//!
//! The arguments are joined with a space and the resulting string is parsed
//! and executed in the current shell environment.
//!
//! # Errors
//!
//! A syntax error in the string is printed and makes the exit status
//! non-zero.
//!
//! # Exit status
//!
//! The exit status of the last command executed, or zero if the string
//! contains no commands.

use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use brine_semantics::run_code;

/// Entry point for executing the `eval` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let code = args.join(" ");
    frame.last_status = ExitStatus::SUCCESS;
    let result = run_code(frame, &code, "eval");
    (frame.last_status, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, capture_stderr, frame};
    use std::ops::ControlFlow::{Break, Continue};

    #[test]
    fn arguments_are_joined() {
        let mut frame = frame();
        let result = main(&mut frame, args(&["x=1;", "y=$x"]));
        assert_eq!(result, (ExitStatus::SUCCESS, Continue(())));
        assert_eq!(frame.variables.value("y"), Some("1"));
    }

    #[test]
    fn empty_code_succeeds() {
        let mut frame = frame();
        frame.last_status = ExitStatus(4);
        assert_eq!(main(&mut frame, vec![]), (ExitStatus::SUCCESS, Continue(())));
    }

    #[test]
    fn status_of_last_command() {
        let mut frame = frame();
        assert_eq!(main(&mut frame, args(&["false"])), (ExitStatus::FAILURE, Continue(())));
    }

    #[test]
    fn syntax_error() {
        let mut frame = frame();
        let _stderr = capture_stderr(&mut frame);
        let (status, result) = main(&mut frame, args(&["fi"]));
        assert_eq!(status, ExitStatus::SYNTAX_ERROR);
        assert_eq!(result, Continue(()));
    }

    #[test]
    fn exit_in_eval() {
        let mut frame = frame();
        let result = main(&mut frame, args(&["exit", "3"]));
        assert_eq!(result, (ExitStatus(3), Break(())));
        assert_eq!(frame.exit, Some(ExitStatus(3)));
    }
}
