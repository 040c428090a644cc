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

//! Export built-in
//!
//! The **`export`** built-in exports shell variables to the environment.
//!
//! # Synopsis
//!
//! ```sh
//! export [-p] [name[=value]...]
//! ```
//!
//! # Description
//!
//! The export built-in (without the `-p` option) exports each of the
//! specified shell variables to the environment. If a variable has a
//! *value*, it is assigned before being exported. A variable exported
//! without a value stays unset, but is passed to commands once assigned.
//!
//! With no operands, or with the `-p` option, the built-in prints the
//! exported variables in a form that can be read back by the shell.
//!
//! # Options
//!
//! The **`-p`** (**`--print`**) option makes the built-in print the exported
//! variables.
//!
//! # Operands
//!
//! Operands specify the names and values of the variables to be exported.
//!
//! # Errors
//!
//! It is an error to assign a value to a read-only variable or to name a
//! variable with an invalid name. Both are fatal errors.
//!
//! # Exit status
//!
//! Zero unless an error occurs.
//!
//! # Implementation notes
//!
//! The [`readonly`](crate::readonly) built-in shares the implementation.

use crate::common::getopt;
use crate::common::output;
use crate::common::report_special_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use brine_env::variable::Variable;
use brine_env::variable::VariableSet;
use brine_syntax::parser::is_name;
use std::fmt::Write as _;
use std::ops::ControlFlow::Continue;
use yash_quote::quoted;

/// Attribute that the `export` and `readonly` built-ins set
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Attribute {
    Export,
    ReadOnly,
}

impl Attribute {
    fn builtin_name(self) -> &'static str {
        match self {
            Attribute::Export => "export",
            Attribute::ReadOnly => "readonly",
        }
    }

    fn is_set(self, variable: &Variable) -> bool {
        match self {
            Attribute::Export => variable.is_exported,
            Attribute::ReadOnly => variable.is_read_only,
        }
    }

    fn set(self, variables: &mut VariableSet, name: &str) {
        match self {
            Attribute::Export => variables.export(name, true),
            Attribute::ReadOnly => variables.make_read_only(name),
        }
    }
}

/// Prints the variables that have the attribute.
fn print_variables(frame: &Frame, attribute: Attribute) -> Result {
    let name = attribute.builtin_name();
    let mut text = String::new();
    for (var_name, variable) in frame.variables.iter() {
        if !attribute.is_set(variable) {
            continue;
        }
        let _ = match &variable.value {
            Some(value) => writeln!(text, "{name} {var_name}={}", quoted(value)),
            None => writeln!(text, "{name} {var_name}"),
        };
    }
    output(frame, name, &text)
}

/// Implementation shared by `export` and `readonly`
pub(crate) fn declare(frame: &mut Frame, args: Vec<String>, attribute: Attribute) -> Result {
    let name = attribute.builtin_name();
    // `-p` is the only option, and it only matters without operands.
    let (_opts, operands) = match getopt(args, "p") {
        Ok(parsed) => parsed,
        Err(error) => return report_special_error(frame, name, error),
    };
    if operands.is_empty() {
        return print_variables(frame, attribute);
    }

    for operand in operands {
        let (var_name, value) = match operand.split_once('=') {
            Some((var_name, value)) => (var_name, Some(value)),
            None => (operand.as_str(), None),
        };
        if !is_name(var_name) {
            return report_special_error(
                frame,
                name,
                format_args!("`{var_name}` is not a valid variable name"),
            );
        }
        if let Some(value) = value {
            if let Err(error) = frame.variables.assign(var_name, value) {
                return report_special_error(frame, name, error);
            }
        }
        attribute.set(&mut frame.variables, var_name);
    }
    (ExitStatus::SUCCESS, Continue(()))
}

/// Entry point for executing the `export` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    declare(frame, args, Attribute::Export)
}
