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

//! False built-in
//!
//! The **`false`** built-in does nothing, unsuccessfully.
//!
//! # Synopsis
//!
//! ```sh
//! false
//! ```
//!
//! # Exit status
//!
//! One. Any arguments are ignored.

use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use std::ops::ControlFlow::Continue;

/// Entry point for executing the `false` built-in
pub fn main(_frame: &mut Frame, _args: Vec<String>) -> Result {
    (ExitStatus::FAILURE, Continue(()))
}
