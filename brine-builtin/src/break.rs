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

//! Break built-in
//!
//! The **`break`** built-in terminates the execution of a loop.
//!
//! # Synopsis
//!
//! ```sh
//! break [n]
//! ```
//!
//! # Description
//!
//! `break n` quits the execution of the *n*th innermost `for`, `while`, or
//! `until` loop. The loop must be running in the same function or dot script
//! as the built-in. If *n* is greater than the number of enclosing loops,
//! the built-in exits the outermost one.
//!
//! # Operands
//!
//! Operand *n* specifies the nest level of the loop to exit. If omitted, it
//! defaults to 1. It is an error if the value is not a positive decimal
//! integer.
//!
//! # Errors
//!
//! An invalid operand is a fatal error. Using the built-in outside a loop
//! is reported but does not abort the shell.
//!
//! # Exit status
//!
//! Zero if the loop is exited, one if there is no loop.
//!
//! # Portability
//!
//! The behavior is unspecified in POSIX when the built-in is used without an
//! enclosing loop.
//!
//! # Implementation notes
//!
//! The built-in sets [`Frame::loop_abort`] and returns `Break`. The loops
//! between the built-in and the target loop see the abort and unwind. Part
//! of the implementation is shared with the [`continue`](crate::r#continue)
//! built-in.

use crate::common::parse_count;
use crate::common::report_failure;
use crate::common::report_special_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use brine_env::semantics::LoopAbort;
use std::ops::ControlFlow::Break;

/// Sets the loop abort for `break` and `continue`.
pub(crate) fn abort_loop(frame: &mut Frame, name: &str, args: &[String], next: bool) -> Result {
    let count = match args {
        [] => 1,
        [operand] => match parse_count(operand) {
            Some(count) if count > 0 => count,
            _ => {
                return report_special_error(
                    frame,
                    name,
                    format_args!("`{operand}` is not a positive integer"),
                );
            }
        },
        [_, extra, ..] => {
            return report_special_error(frame, name, format_args!("{extra}: too many operands"));
        }
    };

    if frame.loop_depth == 0 {
        return report_failure(frame, name, "not in a loop");
    }

    let dest_depth = (frame.loop_depth - count.min(frame.loop_depth)) + 1;
    frame.loop_abort = Some(LoopAbort { dest_depth, next });
    (ExitStatus::SUCCESS, Break(()))
}

/// Entry point for executing the `break` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    abort_loop(frame, "break", &args, false)
}
