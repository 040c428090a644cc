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

//! Ulimit built-in
//!
//! The **`ulimit`** built-in shows or sets the limit on the size of files
//! written by the shell and its children.
//!
//! # Synopsis
//!
//! ```sh
//! ulimit [-f] [limit]
//! ```
//!
//! # Description
//!
//! Without the *limit* operand, the built-in prints the current soft limit in
//! 512-byte blocks, or `unlimited`. With the operand, it sets the soft limit.
//!
//! # Options
//!
//! The **`-f`** option selects the file size limit, which is the only
//! supported resource.
//!
//! # Operands
//!
//! *limit* is a non-negative decimal integer counting 512-byte blocks, or
//! `unlimited`.
//!
//! # Errors
//!
//! It is an error if the operand is not a valid limit or the limit cannot be
//! changed, for example because it exceeds the hard limit.
//!
//! # Exit status
//!
//! Zero unless an error occurred.

use crate::common::{getopt, output, report_error, report_failure};
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use nix::libc::{RLIM_INFINITY, rlim_t};
use nix::sys::resource::{Resource, getrlimit, setrlimit};
use std::ops::ControlFlow::Continue;

/// Size of the unit used by the built-in
pub const BLOCK_SIZE: rlim_t = 512;

/// Parses a limit operand into a byte count.
///
/// Returns `None` if the operand is invalid or the result overflows.
pub fn parse_limit(operand: &str) -> Option<rlim_t> {
    if operand == "unlimited" {
        return Some(RLIM_INFINITY);
    }
    if operand.is_empty() || !operand.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    operand.parse::<rlim_t>().ok()?.checked_mul(BLOCK_SIZE)
}

/// Formats a limit in bytes for display.
pub fn format_limit(limit: rlim_t) -> String {
    if limit == RLIM_INFINITY {
        "unlimited\n".to_owned()
    } else {
        format!("{}\n", limit / BLOCK_SIZE)
    }
}

/// Entry point for executing the `ulimit` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let operands = match getopt(args, "f") {
        Ok((_, operands)) => operands,
        Err(error) => return report_error(frame, "ulimit", error),
    };
    let (soft, hard) = match getrlimit(Resource::RLIMIT_FSIZE) {
        Ok(limits) => limits,
        Err(errno) => return report_failure(frame, "ulimit", errno.desc()),
    };

    match operands.as_slice() {
        [] => output(frame, "ulimit", &format_limit(soft)),
        [operand] => {
            let Some(limit) = parse_limit(operand) else {
                return report_error(frame, "ulimit", format_args!("`{operand}` is not a valid limit"));
            };
            log::debug!("setting file size limit to {limit} bytes");
            match setrlimit(Resource::RLIMIT_FSIZE, limit, hard) {
                Ok(()) => (ExitStatus::SUCCESS, Continue(())),
                Err(errno) => report_failure(frame, "ulimit", errno.desc()),
            }
        }
        [_, extra, ..] => report_error(frame, "ulimit", format_args!("unexpected operand `{extra}`")),
    }
}
