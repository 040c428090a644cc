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

//! Helper items for printing expansion results
//!
//! When the `xtrace` [shell option](brine_env::option) is on, the shell
//! traces words expanded during command execution. For each simple command
//! executed, the shell prints to the standard error a line containing the
//! value of `$PS4` followed by the assignments and the expanded command
//! words, each quoted as needed so that the line can be read back as a
//! command.

use brine_env::Frame;
use brine_env::io::STDERR;
use brine_env::option;
use std::fmt::Write as _;
use yash_quote::quoted;

/// Name of the variable that is printed before each trace
pub const PS4: &str = "PS4";

/// Default value of `$PS4`
pub const PS4_INITIAL_VALUE: &str = "+ ";

/// Collection of expansion results to be traced
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct XTrace {
    words: String,
}

impl XTrace {
    /// Creates a new trace if the `xtrace` option is on.
    #[must_use]
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        frame
            .options
            .is_on(option::XTrace)
            .then(XTrace::default)
    }

    /// Adds an assignment.
    pub fn push_assign(&mut self, name: &str, value: &str) {
        let _ = write!(self.words, "{name}={} ", quoted(value));
    }

    /// Adds command words.
    pub fn push_fields(&mut self, fields: &[String]) {
        for field in fields {
            let _ = write!(self.words, "{} ", quoted(field));
        }
    }

    /// Prints the trace to the standard error.
    pub fn finish(self, frame: &Frame) {
        let ps4 = frame.variables.value(PS4).unwrap_or(PS4_INITIAL_VALUE);
        let line = format!("{ps4}{}\n", self.words.trim_end_matches(' '));
        if let Err(error) = frame.fds.write_all(STDERR, line.as_bytes()) {
            log::warn!("cannot print trace: {error}");
        }
    }
}

/// Prints a trace of the command words if the `xtrace` option is on.
pub fn trace_fields(frame: &Frame, fields: &[String]) {
    if let Some(mut xtrace) = XTrace::from_frame(frame) {
        xtrace.push_fields(fields);
        xtrace.finish(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::capture_stderr;
    use crate::tests::read_all;

    #[test]
    fn disabled_by_default() {
        assert_eq!(XTrace::from_frame(&Frame::new()), None);
    }

    #[test]
    fn trace_is_quoted() {
        let mut frame = Frame::new();
        frame.options.set(option::XTrace, option::On);
        let stderr = capture_stderr(&mut frame);
        let mut xtrace = XTrace::from_frame(&frame).unwrap();
        xtrace.push_assign("a", "1 2");
        xtrace.push_fields(&["echo".to_owned(), "x".to_owned(), "".to_owned()]);
        xtrace.finish(&frame);
        assert_eq!(read_all(&stderr), "+ a='1 2' echo x ''\n");
    }

    #[test]
    fn custom_ps4() {
        let mut frame = Frame::new();
        frame.options.set(option::XTrace, option::On);
        frame.variables.assign(PS4, "> ").unwrap();
        let stderr = capture_stderr(&mut frame);
        trace_fields(&frame, &["ls".to_owned()]);
        assert_eq!(read_all(&stderr), "> ls\n");
    }
}
