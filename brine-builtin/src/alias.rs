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

//! Alias built-in
//!
//! The **`alias`** built-in defines aliases or prints alias definitions.
//!
//! # Synopsis
//!
//! ```sh
//! alias [name[=value]...]
//! ```
//!
//! # Description
//!
//! An operand of the form `name=value` defines an alias that substitutes
//! *value* for the command name *name*. An operand without `=` prints the
//! definition of the named alias. Without operands, all the aliases are
//! printed in alphabetical order.
//!
//! Alias definitions are printed in the `name=value` form, where *value* is
//! quoted so that the output can be used as operands to the built-in.
//!
//! # Errors
//!
//! It is an error if the name contains a character that cannot appear in a
//! command word, if the value is not a sequence of plain words, or if an
//! alias to be printed is not defined.
//!
//! # Exit status
//!
//! Zero unless an error occurs.
//!
//! # Portability
//!
//! POSIX allows any value for an alias. This implementation only accepts
//! values that consist of words without quotes, expansions or operators.

use crate::common::output;
use brine_env::Frame;
use brine_env::alias::{Alias, define};
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use itertools::Itertools as _;
use yash_quote::quoted;

fn format_alias(alias: &Alias) -> String {
    format!("{}={}\n", alias.name, quoted(&alias.replacement))
}

/// Entry point for executing the `alias` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    if args.is_empty() {
        let text = frame
            .aliases
            .iter()
            .map(|entry| &*entry.0)
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .map(format_alias)
            .collect::<String>();
        return output(frame, "alias", &text);
    }

    let mut status = ExitStatus::SUCCESS;
    let mut text = String::new();
    for operand in args {
        match operand.split_once('=') {
            Some((name, replacement)) => {
                let (name, replacement) = (name.to_owned(), replacement.to_owned());
                if let Err(error) = define(&mut frame.aliases, name, replacement) {
                    frame.print_error(&format!("alias: {error}"));
                    status = ExitStatus::FAILURE;
                }
            }
            None => match frame.aliases.get(operand.as_str()) {
                Some(entry) => text.push_str(&format_alias(&entry.0)),
                None => {
                    frame.print_error(&format!("alias: {operand}: no such alias"));
                    status = ExitStatus::FAILURE;
                }
            },
        }
    }

    let (print_status, result) = output(frame, "alias", &text);
    (status.max(print_status), result)
}
