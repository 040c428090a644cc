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

//! Unalias built-in
//!
//! The **`unalias`** built-in removes alias definitions.
//!
//! # Synopsis
//!
//! ```sh
//! unalias name...
//! ```
//!
//! ```sh
//! unalias -a
//! ```
//!
//! # Description
//!
//! The built-in removes the aliases named by the operands. With the `-a`
//! option, all aliases are removed.
//!
//! # Errors
//!
//! It is an error if an operand names an alias that is not defined, or if
//! neither operands nor `-a` are given.
//!
//! # Exit status
//!
//! Zero unless an error occurs.

use crate::common::getopt;
use crate::common::report_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use std::ops::ControlFlow::Continue;

/// Entry point for executing the `unalias` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let (opts, names) = match getopt(args, "a") {
        Ok(parsed) => parsed,
        Err(error) => return report_error(frame, "unalias", error),
    };

    if !opts.is_empty() {
        frame.aliases.clear();
        return (ExitStatus::SUCCESS, Continue(()));
    }
    if names.is_empty() {
        return report_error(frame, "unalias", "the alias name operand is missing");
    }

    let mut status = ExitStatus::SUCCESS;
    for name in &names {
        if !frame.aliases.remove(name.as_str()) {
            frame.print_error(&format!("unalias: {name}: no such alias"));
            status = ExitStatus::FAILURE;
        }
    }
    (status, Continue(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, capture_stderr, frame, read_all};
    use brine_env::alias::define;

    fn frame_with_aliases() -> Frame {
        let mut frame = frame();
        for name in ["a", "b", "c"] {
            define(&mut frame.aliases, name.to_owned(), "true".to_owned()).unwrap();
        }
        frame
    }

    #[test]
    fn removing_some_aliases() {
        let mut frame = frame_with_aliases();
        let result = main(&mut frame, args(&["a", "c"]));
        assert_eq!(result, (ExitStatus::SUCCESS, Continue(())));
        assert_eq!(frame.aliases.len(), 1);
        assert!(frame.aliases.get("b").is_some());
    }

    #[test]
    fn removing_all_aliases() {
        let mut frame = frame_with_aliases();
        main(&mut frame, args(&["-a"]));
        assert!(frame.aliases.is_empty());
    }

    #[test]
    fn undefined_alias() {
        let mut frame = frame_with_aliases();
        let stderr = capture_stderr(&mut frame);
        let result = main(&mut frame, args(&["x", "b"]));
        assert_eq!(result, (ExitStatus::FAILURE, Continue(())));
        assert!(frame.aliases.get("b").is_none());
        assert_eq!(read_all(&stderr), "brine: unalias: x: no such alias\n");
    }

    #[test]
    fn missing_operand() {
        let mut frame = frame();
        let _stderr = capture_stderr(&mut frame);
        assert_eq!(main(&mut frame, vec![]), (ExitStatus::ERROR, Continue(())));
    }
}
