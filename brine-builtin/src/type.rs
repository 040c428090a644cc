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

//! Type built-in
//!
//! The **`type`** built-in describes how command names are interpreted.
//!
//! # Synopsis
//!
//! ```sh
//! type name...
//! ```
//!
//! # Description
//!
//! The built-in prints a sentence for each name telling whether it is a
//! reserved word, an alias, a built-in, a function or an external utility.
//! This is the same as [`command -V`](crate::command).
//!
//! # Exit status
//!
//! Zero if all the names are found, one otherwise.

use crate::command::print_kinds;
use crate::common::getopt;
use crate::common::report_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_semantics::command_search::SearchOptions;

/// Entry point for executing the `type` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    match getopt(args, "") {
        Ok((_, names)) => print_kinds(frame, "type", &names, true, SearchOptions::default()),
        Err(error) => report_error(frame, "type", error),
    }
}
