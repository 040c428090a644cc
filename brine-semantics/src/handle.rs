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

//! Error handlers.

use crate::Result;
use brine_env::Frame;
use brine_env::semantics::ExitStatus;
use std::ops::ControlFlow::{Break, Continue};

/// Error handler.
///
/// Most errors in the shell are handled by printing an error message to the
/// standard error and setting a non-zero exit status. This trait provides a
/// standard interface for implementing that behavior.
pub trait Handle {
    /// Handles the error.
    ///
    /// The exit status is stored in `frame.last_status`. The result is
    /// `Break` if the shell should stop executing commands.
    fn handle(&self, frame: &mut Frame) -> Result;
}

/// Prints an error message and sets the exit status to
/// [`ExitStatus::EXPANSION_ERROR`].
///
/// If the error is [fatal](crate::expansion::Error::is_fatal), the shell is
/// also made to exit with the status.
impl Handle for crate::expansion::Error {
    fn handle(&self, frame: &mut Frame) -> Result {
        frame.print_error(&self.to_string());
        frame.last_status = ExitStatus::EXPANSION_ERROR;
        if self.is_fatal() {
            frame.exit = Some(ExitStatus::EXPANSION_ERROR);
            Break(())
        } else {
            Continue(())
        }
    }
}

/// Prints an error message and sets the exit status to
/// [`ExitStatus::REDIRECTION_ERROR`].
///
/// Errors in expanding the redirection target are handled as expansion
/// errors.
impl Handle for crate::redir::Error {
    fn handle(&self, frame: &mut Frame) -> Result {
        if let crate::redir::Error::Expansion(error) = self {
            return error.handle(frame);
        }
        frame.print_error(&self.to_string());
        frame.last_status = ExitStatus::REDIRECTION_ERROR;
        Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::Error;
    use crate::tests::capture_stderr;
    use crate::tests::read_all;

    #[test]
    fn non_fatal_expansion_error() {
        let mut frame = Frame::new();
        let stderr = capture_stderr(&mut frame);
        let result = Error::Arith("division by zero".into()).handle(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(frame.last_status, ExitStatus::EXPANSION_ERROR);
        assert_eq!(frame.exit, None);
        assert_eq!(
            read_all(&stderr),
            "brine: arithmetic expansion: division by zero\n"
        );
    }

    #[test]
    fn fatal_expansion_error() {
        let mut frame = Frame::new();
        let _stderr = capture_stderr(&mut frame);
        let result = Error::UnsetParameter("x".into()).handle(&mut frame);
        assert_eq!(result, Break(()));
        assert_eq!(frame.exit, Some(ExitStatus::EXPANSION_ERROR));
    }
}
