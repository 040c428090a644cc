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

//! Times built-in
//!
//! The **`times`** built-in prints the accumulated user and system times of
//! the shell and its children.
//!
//! # Synopsis
//!
//! ```sh
//! times
//! ```
//!
//! # Description
//!
//! The built-in prints two lines. The first line shows the user and system
//! times consumed by the shell process, and the second line shows those of
//! the child processes that have been waited for. Each time is formatted as
//! `{minutes}m{seconds}.{microseconds}s`, for example `0m1.250000s`.
//!
//! # Errors
//!
//! Operands are not accepted.
//!
//! # Exit status
//!
//! Zero unless an error occurs.

use crate::common::output;
use crate::common::report_failure;
use crate::common::report_special_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use nix::sys::resource::{UsageWho, getrusage};
use nix::sys::time::TimeVal;
use std::fmt::Write as _;

/// Consumed CPU times in microseconds
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Times {
    pub self_user: i64,
    pub self_system: i64,
    pub children_user: i64,
    pub children_system: i64,
}

fn micros(time: TimeVal) -> i64 {
    time.tv_sec() as i64 * 1_000_000 + time.tv_usec() as i64
}

impl Times {
    /// Obtains the times of the current process.
    pub fn now() -> nix::Result<Self> {
        let this = getrusage(UsageWho::RUSAGE_SELF)?;
        let children = getrusage(UsageWho::RUSAGE_CHILDREN)?;
        Ok(Times {
            self_user: micros(this.user_time()),
            self_system: micros(this.system_time()),
            children_user: micros(children.user_time()),
            children_system: micros(children.system_time()),
        })
    }
}

fn format_one_time(micros: i64, result: &mut String) {
    let minutes = micros / 60_000_000;
    let seconds = micros % 60_000_000 / 1_000_000;
    let fraction = micros % 1_000_000;
    let _ = write!(result, "{minutes}m{seconds}.{fraction:06}s");
}

/// Formats the times as printed by the built-in.
pub fn format(times: &Times) -> String {
    let mut result = String::with_capacity(64);
    format_one_time(times.self_user, &mut result);
    result.push(' ');
    format_one_time(times.self_system, &mut result);
    result.push('\n');
    format_one_time(times.children_user, &mut result);
    result.push(' ');
    format_one_time(times.children_system, &mut result);
    result.push('\n');
    result
}

/// Entry point for executing the `times` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    if let Some(arg) = args.first() {
        return report_special_error(frame, "times", format_args!("{arg}: no operands expected"));
    }
    match Times::now() {
        Ok(times) => output(frame, "times", &format(&times)),
        Err(errno) => report_failure(frame, "times", format_args!("cannot obtain times: {errno}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, capture_stderr, capture_stdout, frame, read_all};
    use brine_env::semantics::ExitStatus;
    use std::ops::ControlFlow::{Break, Continue};

    #[test]
    fn formatting() {
        let times = Times {
            self_user: 0,
            self_system: 500_000,
            children_user: 61_250_000,
            children_system: 3_600_000_001,
        };
        assert_eq!(
            format(&times),
            "0m0.000000s 0m0.500000s\n1m1.250000s 60m0.000001s\n"
        );
    }

    #[test]
    fn printing_times() {
        let mut frame = frame();
        let stdout = capture_stdout(&mut frame);
        assert_eq!(main(&mut frame, vec![]), (ExitStatus::SUCCESS, Continue(())));
        let output = read_all(&stdout);
        assert_eq!(output.lines().count(), 2, "{output}");
        assert!(output.ends_with("s\n"), "{output}");
    }

    #[test]
    fn operand_is_error() {
        let mut frame = frame();
        let _stderr = capture_stderr(&mut frame);
        assert_eq!(main(&mut frame, args(&["x"])), (ExitStatus::ERROR, Break(())));
    }
}
