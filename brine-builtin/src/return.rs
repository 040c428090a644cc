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

//! Return built-in
//!
//! The **`return`** built-in quits the currently executing function or dot
//! script.
//!
//! # Synopsis
//!
//! ```sh
//! return [exit_status]
//! ```
//!
//! # Description
//!
//! `return exit_status` makes the shell return from the currently executing
//! function or dot script with the specified exit status.
//!
//! # Operands
//!
//! The optional ***exit_status*** operand, if given, should be a
//! non-negative decimal integer and will be the exit status of the function
//! or dot script. It defaults to the exit status of the last executed
//! command.
//!
//! # Errors
//!
//! An invalid operand is a fatal error. Using the built-in outside a
//! function or dot script is reported but does not abort the shell.
//!
//! # Exit status
//!
//! The operand, or the status of the last command.
//!
//! # Portability
//!
//! POSIX leaves unspecified what happens when `return` is used outside a
//! function or dot script.

use crate::common::report_failure;
use crate::common::report_special_error;
use crate::exit::parse_status;
use brine_env::Frame;
use brine_env::builtin::Result;
use std::ops::ControlFlow::Break;

/// Entry point for executing the `return` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let status = match args.as_slice() {
        [] => frame.last_status,
        [operand] => match parse_status(operand) {
            Some(status) => status,
            None => {
                return report_special_error(
                    frame,
                    "return",
                    format_args!("`{operand}` is not a valid exit status"),
                );
            }
        },
        [_, extra, ..] => {
            return report_special_error(
                frame,
                "return",
                format_args!("{extra}: too many operands"),
            );
        }
    };

    if frame.return_depth == 0 {
        return report_failure(frame, "return", "not in a function or dot script");
    }

    frame.fn_abort = true;
    (status, Break(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, capture_stderr, frame, read_all};
    use brine_env::semantics::ExitStatus;
    use brine_semantics::run_code;
    use std::ops::ControlFlow::Continue;

    #[test]
    fn return_from_function() {
        let mut frame = frame();
        let code = "f() { x=1; return 3; x=2; }; f; y=$?";
        let _ = run_code(&mut frame, code, "test");
        assert_eq!(frame.variables.value("x"), Some("1"));
        assert_eq!(frame.variables.value("y"), Some("3"));
        assert!(!frame.fn_abort);
    }

    #[test]
    fn return_with_last_status() {
        let mut frame = frame();
        frame.return_depth = 1;
        frame.last_status = ExitStatus(9);
        assert_eq!(main(&mut frame, vec![]), (ExitStatus(9), Break(())));
        assert!(frame.fn_abort);
    }

    #[test]
    fn return_outside_function() {
        let mut frame = frame();
        let stderr = capture_stderr(&mut frame);
        assert_eq!(main(&mut frame, args(&["1"])), (ExitStatus::FAILURE, Continue(())));
        assert!(!frame.fn_abort);
        assert_eq!(
            read_all(&stderr),
            "brine: return: not in a function or dot script\n"
        );
    }
}
