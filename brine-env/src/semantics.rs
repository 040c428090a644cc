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

//! Type definitions for command execution.

use nix::sys::signal::Signal;
use std::ops::ControlFlow;
use std::os::raw::c_int;
use std::os::unix::process::ExitStatusExt;

/// Number that summarizes the result of command execution.
///
/// An exit status is an integer returned from a utility (or command) when
/// executed. It usually is a summarized result of the execution. Many
/// utilities return an exit status of zero when successful and non-zero
/// otherwise.
///
/// In the shell language, the special parameter `$?` expands to the exit status
/// of the last executed pipeline. Exit statuses also affect the behavior of
/// and-or lists and some compound commands.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub c_int);

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<c_int> for ExitStatus {
    fn from(value: c_int) -> ExitStatus {
        ExitStatus(value)
    }
}

impl From<ExitStatus> for c_int {
    fn from(exit_status: ExitStatus) -> c_int {
        exit_status.0
    }
}

/// Converts a signal to the corresponding exit status.
///
/// The result is [`SIGNAL_BASE`](ExitStatus::SIGNAL_BASE) plus the signal
/// number.
impl From<Signal> for ExitStatus {
    fn from(signal: Signal) -> Self {
        Self(ExitStatus::SIGNAL_BASE.0 + signal as c_int)
    }
}

/// Converts the result of a child process.
///
/// A process killed by a signal yields the status for the signal.
impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => ExitStatus(code),
            (None, Some(signal)) => ExitStatus(ExitStatus::SIGNAL_BASE.0 + signal),
            (None, None) => ExitStatus::WAIT_OTHER,
        }
    }
}

impl ExitStatus {
    /// Exit status of 0: success.
    pub const SUCCESS: ExitStatus = ExitStatus(0);
    /// Exit status of 1: failure.
    pub const FAILURE: ExitStatus = ExitStatus(1);
    /// Exit status of 2: error severer than failure.
    pub const ERROR: ExitStatus = ExitStatus(2);
    /// The code could not be parsed.
    pub const SYNTAX_ERROR: ExitStatus = ExitStatus(2);
    /// A word could not be expanded.
    pub const EXPANSION_ERROR: ExitStatus = ExitStatus(2);
    /// A redirection could not be performed.
    pub const REDIRECTION_ERROR: ExitStatus = ExitStatus(2);
    /// A built-in was given invalid options or operands.
    pub const BAD_COMMAND_LINE: ExitStatus = ExitStatus(2);
    /// A function was defined with an invalid name.
    pub const INVALID_FUNCTION_NAME: ExitStatus = ExitStatus(2);
    /// The file given to the dot built-in was not found.
    pub const FILE_TO_SOURCE_NOT_FOUND: ExitStatus = ExitStatus(2);
    /// The file given to the dot built-in could not be read.
    pub const FILE_TO_SOURCE_NOT_READABLE: ExitStatus = ExitStatus(2);
    /// A resource limit could not be read or changed.
    pub const R_USAGE_ERROR: ExitStatus = ExitStatus(2);
    /// The requested feature is not implemented.
    pub const NOT_IMPLEMENTED: ExitStatus = ExitStatus(99);
    /// A pipe could not be created.
    pub const PIPE_ERROR: ExitStatus = ExitStatus(100);
    /// Waiting for a child process failed.
    pub const WAIT_ERROR: ExitStatus = ExitStatus(101);
    /// A child process ended in a way that has no exit status.
    pub const WAIT_OTHER: ExitStatus = ExitStatus(102);
    /// The shell reached a state that should be impossible.
    pub const SHELL_BUG: ExitStatus = ExitStatus(103);
    /// Exit Status of 126: command not executable.
    pub const NOEXEC: ExitStatus = ExitStatus(126);
    /// Exit status of 127: command not found.
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);
    /// Offset added to a signal number to make an exit status.
    pub const SIGNAL_BASE: ExitStatus = ExitStatus(128);

    /// Returns true if and only if `self` is zero.
    pub const fn is_successful(&self) -> bool {
        self.0 == 0
    }
}

/// Result of command execution
///
/// `Break` means the rest of the enclosing commands must be skipped because
/// of a pending `break`, `continue`, `return` or `exit` recorded in the
/// [`Frame`](crate::Frame). The exit status of the command is in
/// [`Frame::last_status`](crate::Frame::last_status).
pub type Result = ControlFlow<()>;

/// Request for the control flow to leave loops
///
/// `break` and `continue` set this to make enclosing loops stop. The loop at
/// depth `dest_depth` (counted from 1 for the outermost loop) either ends or
/// starts its next iteration, depending on `next`. Loops nested deeper than
/// that end immediately.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LoopAbort {
    pub dest_depth: usize,
    /// True for `continue`, false for `break`
    pub next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn exit_status_from_signal() {
        assert_eq!(ExitStatus::from(Signal::SIGINT), ExitStatus(130));
        assert_eq!(ExitStatus::from(Signal::SIGKILL), ExitStatus(137));
    }

    #[test]
    fn exit_status_from_process() {
        let status = Command::new("sh").args(["-c", "exit 3"]).status().unwrap();
        assert_eq!(ExitStatus::from(status), ExitStatus(3));
        let status = Command::new("sh").args(["-c", "kill -9 $$"]).status().unwrap();
        assert_eq!(ExitStatus::from(status), ExitStatus(137));
    }
}
