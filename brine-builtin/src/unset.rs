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

//! Unset built-in
//!
//! The **`unset`** built-in unsets shell variables or functions.
//!
//! # Synopsis
//!
//! ```sh
//! unset [-f|-v] name...
//! ```
//!
//! # Description
//!
//! The built-in removes the named variables, or the named functions if the
//! `-f` option is given. Names that are not defined are silently ignored.
//!
//! # Options
//!
//! - **`-f`**: unsets functions.
//! - **`-v`**: unsets variables. This is the default.
//!
//! If both are given, the last one wins.
//!
//! # Errors
//!
//! A read-only variable cannot be unset. The error is reported and the
//! remaining operands are still processed.
//!
//! # Exit status
//!
//! Zero unless an error occurs.

use crate::common::getopt;
use crate::common::report_special_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use std::ops::ControlFlow::Continue;

/// Selection of what to unset
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Unsets shell variables.
    #[default]
    Variables,
    /// Unsets shell functions.
    Functions,
}

/// Entry point for executing the `unset` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let (opts, names) = match getopt(args, "fv") {
        Ok(parsed) => parsed,
        Err(error) => return report_special_error(frame, "unset", error),
    };
    let mode = opts.iter().fold(Mode::default(), |_, &(c, _)| match c {
        'f' => Mode::Functions,
        _ => Mode::Variables,
    });

    let mut status = ExitStatus::SUCCESS;
    for name in &names {
        match mode {
            Mode::Variables => {
                if let Err(error) = frame.variables.unset(name) {
                    frame.print_error(&format!("unset: {error}"));
                    status = ExitStatus::FAILURE;
                }
            }
            Mode::Functions => {
                frame.functions.remove(name.as_str());
            }
        }
    }
    (status, Continue(()))
}
