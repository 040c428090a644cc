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

//! Readonly built-in
//!
//! The **`readonly`** built-in makes shell variables read-only.
//!
//! # Synopsis
//!
//! ```sh
//! readonly [-p] [name[=value]...]
//! ```
//!
//! # Description
//!
//! The built-in makes each of the specified variables read-only, assigning
//! the *value* first if given. A read-only variable cannot be assigned or
//! unset afterward.
//!
//! With no operands, or with the `-p` option, the built-in prints the
//! read-only variables in a form that can be read back by the shell.
//!
//! # Errors
//!
//! Same as the [`export`](crate::export) built-in.
//!
//! # Exit status
//!
//! Zero unless an error occurs.

use crate::export::Attribute;
use crate::export::declare;
use brine_env::Frame;
use brine_env::builtin::Result;

/// Entry point for executing the `readonly` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    declare(frame, args, Attribute::ReadOnly)
}
