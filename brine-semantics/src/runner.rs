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

//! Running shell scripts

use crate::Result;
use crate::command::Command as _;
use crate::trap::run_exit_trap;
use brine_env::Frame;
use brine_env::io::STDERR;
use brine_env::option;
use brine_env::semantics::ExitStatus;
use brine_syntax::parser::parse;
use brine_syntax::source::Source;
use std::ops::ControlFlow::Continue;

/// Parses and executes code in the frame.
///
/// If the `verbose` option is on, the code is printed to the standard error
/// before parsing. If the code contains syntax errors, they are printed with
/// `origin` naming the source of the code, nothing is executed, and the exit
/// status is set to [`ExitStatus::SYNTAX_ERROR`].
pub fn run_code(frame: &mut Frame, code: &str, origin: &str) -> Result {
    if frame.options.is_on(option::Verbose) {
        let mut echo = code.to_owned();
        if !echo.ends_with('\n') {
            echo.push('\n');
        }
        if let Err(error) = frame.fds.write_all(STDERR, echo.as_bytes()) {
            log::warn!("cannot print verbose output: {error}");
        }
    }

    let source = Source::new(code);
    match parse(&source) {
        Ok(chunk) => {
            log::trace!("parsed {} and-or list(s) from {origin}", chunk.and_ors.len());
            chunk.execute(frame)
        }
        Err(errors) => {
            let message = errors.render(&source, origin);
            if let Err(error) = frame.fds.write_all(STDERR, message.as_bytes()) {
                log::warn!("cannot print syntax errors: {error}");
            }
            frame.last_status = ExitStatus::SYNTAX_ERROR;
            Continue(())
        }
    }
}

/// Shell script evaluator
///
/// An `Evaler` owns the frame in which scripts are run. Each call to
/// [`eval`](Self::eval) runs a piece of code in the same frame, so variables
/// and functions defined by one piece are visible to the next.
#[derive(Clone, Debug)]
pub struct Evaler {
    pub frame: Frame,
}

impl Evaler {
    /// Creates an evaluator that runs in the frame.
    #[must_use]
    pub fn new(frame: Frame) -> Self {
        Evaler { frame }
    }

    /// Parses and runs code.
    ///
    /// Returns the exit status of the code, or the status with which the
    /// shell should exit if the code ran `exit` or hit a fatal error. Once
    /// the shell is exiting, further code is not run.
    pub fn eval(&mut self, code: &str, origin: &str) -> ExitStatus {
        if let Some(status) = self.frame.exit {
            return status;
        }
        let _ = run_code(&mut self.frame, code, origin);
        self.status()
    }

    /// Returns the exit status of the last command, or the status with
    /// which the shell should exit.
    #[must_use]
    pub fn status(&self) -> ExitStatus {
        self.frame.exit.unwrap_or(self.frame.last_status)
    }

    /// Whether the shell should exit.
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.frame.exit.is_some()
    }

    /// Runs the `EXIT` trap and returns the final exit status of the shell.
    pub fn finish(&mut self) -> ExitStatus {
        run_exit_trap(&mut self.frame);
        self.status()
    }
}
