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

//! Shift built-in
//!
//! The **`shift`** built-in removes some positional parameters.
//!
//! # Synopsis
//!
//! ```sh
//! shift [n]
//! ```
//!
//! # Description
//!
//! The built-in removes the first *n* positional parameters from the list of
//! positional parameters. If *n* is omitted, it is assumed to be `1`.
//!
//! # Operands
//!
//! The operand specifies the number of positional parameters to remove. It must
//! be a non-negative decimal integer less than or equal to the number of
//! positional parameters.
//!
//! # Errors
//!
//! It is a fatal error to try to remove more than the number of existing
//! positional parameters.
//!
//! # Exit status
//!
//! Zero unless an error occurs.

use crate::common::parse_count;
use crate::common::report_special_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use std::ops::ControlFlow::Continue;

/// Entry point for executing the `shift` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let count = match args.as_slice() {
        [] => 1,
        [operand] => match parse_count(operand) {
            Some(count) => count,
            None => {
                return report_special_error(
                    frame,
                    "shift",
                    format_args!("`{operand}` is not a non-negative integer"),
                );
            }
        },
        [_, extra, ..] => {
            return report_special_error(frame, "shift", format_args!("{extra}: too many operands"));
        }
    };

    let param_count = frame.arguments.len().saturating_sub(1);
    if count > param_count {
        return report_special_error(
            frame,
            "shift",
            format_args!("cannot shift {count} parameter(s) out of {param_count}"),
        );
    }
    frame.arguments.drain(1..=count);
    (ExitStatus::SUCCESS, Continue(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, capture_stderr, frame, read_all};
    use std::ops::ControlFlow::Break;

    #[test]
    fn shifting_one() {
        let mut frame = frame();
        frame.arguments = args(&["sh", "a", "b", "c"]);
        assert_eq!(main(&mut frame, vec![]), (ExitStatus::SUCCESS, Continue(())));
        assert_eq!(frame.arguments, ["sh", "b", "c"]);
    }

    #[test]
    fn shifting_all() {
        let mut frame = frame();
        frame.arguments = args(&["sh", "a", "b"]);
        main(&mut frame, args(&["2"]));
        assert_eq!(frame.arguments, ["sh"]);
    }

    #[test]
    fn shifting_zero() {
        let mut frame = frame();
        frame.arguments = args(&["sh", "a"]);
        main(&mut frame, args(&["0"]));
        assert_eq!(frame.arguments, ["sh", "a"]);
    }

    #[test]
    fn shifting_too_many() {
        let mut frame = frame();
        frame.arguments = args(&["sh", "a"]);
        let stderr = capture_stderr(&mut frame);
        assert_eq!(main(&mut frame, args(&["2"])), (ExitStatus::ERROR, Break(())));
        assert_eq!(frame.arguments, ["sh", "a"]);
        assert_eq!(
            read_all(&stderr),
            "brine: shift: cannot shift 2 parameter(s) out of 1\n"
        );
    }
}
