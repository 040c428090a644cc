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

//! Exit built-in
//!
//! The **`exit`** built-in causes the currently executing shell to exit.
//!
//! # Synopsis
//!
//! ```sh
//! exit [exit_status]
//! ```
//!
//! # Description
//!
//! `exit exit_status` makes the shell exit with the specified exit status.
//! Before exiting, the shell runs the `EXIT` trap, if any. In a subshell,
//! only the subshell exits.
//!
//! # Operands
//!
//! The optional ***exit_status*** operand, if given, should be a
//! non-negative decimal integer and will be the exit status of the exiting
//! shell process. It defaults to the exit status of the last executed
//! command.
//!
//! # Errors
//!
//! An invalid operand is a fatal error. The shell exits with a non-zero
//! status anyway.
//!
//! # Exit status
//!
//! The exit status of the shell is the operand, or the status of the last
//! command. The operating system truncates the status to eight bits.

use crate::common::report_special_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use std::ops::ControlFlow::Break;

/// Parses an exit status operand.
pub(crate) fn parse_status(operand: &str) -> Option<ExitStatus> {
    if operand.is_empty() || !operand.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    operand.parse().ok().map(ExitStatus)
}

/// Entry point for executing the `exit` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let status = match args.as_slice() {
        [] => frame.last_status,
        [operand] => match parse_status(operand) {
            Some(status) => status,
            None => {
                return report_special_error(
                    frame,
                    "exit",
                    format_args!("`{operand}` is not a valid exit status"),
                );
            }
        },
        [_, extra, ..] => {
            return report_special_error(frame, "exit", format_args!("{extra}: too many operands"));
        }
    };

    log::debug!("exit {}", status.0);
    frame.exit = Some(status);
    (status, Break(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, capture_stderr, frame};
    use brine_semantics::Evaler;

    #[test]
    fn exit_with_last_status() {
        let mut frame = frame();
        frame.last_status = ExitStatus(42);
        assert_eq!(main(&mut frame, vec![]), (ExitStatus(42), Break(())));
        assert_eq!(frame.exit, Some(ExitStatus(42)));
    }

    #[test]
    fn exit_with_operand() {
        let mut frame = frame();
        assert_eq!(main(&mut frame, args(&["3"])), (ExitStatus(3), Break(())));
        assert_eq!(frame.exit, Some(ExitStatus(3)));
    }

    #[test]
    fn invalid_operand() {
        let mut frame = frame();
        let _stderr = capture_stderr(&mut frame);
        assert_eq!(main(&mut frame, args(&["-1"])), (ExitStatus::ERROR, Break(())));
        assert_eq!(frame.exit, None);
    }

    #[test]
    fn exit_stops_script() {
        let mut evaler = Evaler::new(frame());
        let status = evaler.eval("x=1; exit 5; x=2", "test");
        assert_eq!(status, ExitStatus(5));
        assert_eq!(evaler.frame.variables.value("x"), Some("1"));
    }

    #[test]
    fn exit_in_subshell_does_not_exit_shell() {
        let mut evaler = Evaler::new(frame());
        let status = evaler.eval("(exit 7); x=$?", "test");
        assert_eq!(status, ExitStatus::SUCCESS);
        assert_eq!(evaler.frame.variables.value("x"), Some("7"));
        assert!(!evaler.is_exiting());
    }
}
