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

//! Set built-in
//!
//! The **`set`** built-in modifies [shell options](brine_env::option) and
//! positional parameters. It also can print a list of current options or
//! variables.
//!
//! # Synopsis
//!
//! ```sh
//! set
//! set -o
//! set +o
//! set [-abCefnuvx] [+abCefnuvx] [-o name] [+o name] [--] [argument...]
//! ```
//!
//! ## Printing variables
//!
//! When executed without any arguments, the built-in prints the variables
//! that have a value. The list is formatted as a sequence of assignments
//! that would restore the variables if executed, ordered alphabetically.
//!
//! ## Printing options
//!
//! `set -o` prints the current option settings in a human-readable format.
//! `set +o` prints commands that would restore the current option settings.
//!
//! ## Modifying shell options
//!
//! Options starting with `-` turn on the corresponding shell options while
//! options starting with `+` turn them off. Options can be specified in the
//! short form like `-e` or the long form like `-o errexit` and `--errexit`.
//! A long name prefixed with `no` selects the opposite state, so `-o noglob`
//! is the same as `-f`.
//!
//! ## Modifying positional parameters
//!
//! If one or more operands are given, they replace the positional
//! parameters. A `--` or `-` separator without operands clears the
//! positional parameters.
//!
//! # Errors
//!
//! An unknown option is a fatal error.
//!
//! # Exit status
//!
//! Zero unless an error occurs.
//!
//! # Portability
//!
//! The output format of `set -o` and `set +o` depends on the shell. Using
//! the `no` prefix with an arbitrary option name is not portable.

use crate::common::output;
use crate::common::report_special_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::option::{self, NoSuchOption, State, parse_long, parse_short};
use brine_env::semantics::ExitStatus;
use std::fmt::Write as _;
use std::ops::ControlFlow::Continue;
use thiserror::Error;
use yash_quote::quoted;

/// Error in parsing the arguments
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("{0}{1}: invalid option")]
    UnknownOption(char, char),
    #[error("the option name is missing after `{0}o`")]
    MissingOptionName(char),
    #[error(transparent)]
    NoSuchOption(#[from] NoSuchOption),
}

/// Interpretation of the arguments
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Print the variables.
    PrintVariables,
    /// Print the options, human-readably for `-o`, as commands for `+o`.
    PrintOptions { as_commands: bool },
    /// Modify the options and positional parameters.
    Modify {
        options: Vec<(option::Option, State)>,
        positional_params: Option<Vec<String>>,
    },
}

/// Parses the arguments.
pub fn parse(args: Vec<String>) -> std::result::Result<Command, Error> {
    match args.as_slice() {
        [] => return Ok(Command::PrintVariables),
        [arg] if arg == "-o" => return Ok(Command::PrintOptions { as_commands: false }),
        [arg] if arg == "+o" => return Ok(Command::PrintOptions { as_commands: true }),
        _ => {}
    }

    let mut options = Vec::new();
    let mut positional_params = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--" || arg == "-" {
            positional_params = Some(args.collect());
            break;
        }

        let sign = match arg.chars().next() {
            Some(sign @ ('-' | '+')) if arg.len() > 1 => sign,
            _ => {
                positional_params = Some(std::iter::once(arg).chain(args).collect());
                break;
            }
        };
        let negate = |state: State| if sign == '+' { !state } else { state };

        if let Some(long) = arg.strip_prefix("--").or_else(|| arg.strip_prefix("++")) {
            let (option, state) = parse_long(long)?;
            options.push((option, negate(state)));
            continue;
        }

        for c in arg[1..].chars() {
            if c == 'o' {
                let name = args.next().ok_or(Error::MissingOptionName(sign))?;
                let (option, state) = parse_long(&name)?;
                options.push((option, negate(state)));
            } else {
                let (option, state) = parse_short(c).ok_or(Error::UnknownOption(sign, c))?;
                options.push((option, negate(state)));
            }
        }
    }

    Ok(Command::Modify {
        options,
        positional_params,
    })
}

fn print_variables(frame: &Frame) -> Result {
    let mut text = String::new();
    for (name, variable) in frame.variables.iter() {
        if let Some(value) = &variable.value {
            let _ = writeln!(text, "{name}={}", quoted(value));
        }
    }
    output(frame, "set", &text)
}

fn print_options(frame: &Frame, as_commands: bool) -> Result {
    let mut text = String::new();
    for option in option::Option::iter() {
        let state = frame.options.get(option);
        let _ = if as_commands {
            let sign = if state == option::On { '-' } else { '+' };
            writeln!(text, "set {sign}o {option}")
        } else {
            writeln!(text, "{:<15} {state}", option.long_name())
        };
    }
    output(frame, "set", &text)
}

/// Entry point for executing the `set` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    match parse(args) {
        Ok(Command::PrintVariables) => print_variables(frame),
        Ok(Command::PrintOptions { as_commands }) => print_options(frame, as_commands),
        Ok(Command::Modify {
            options,
            positional_params,
        }) => {
            for (option, state) in options {
                log::debug!("set -o {option}: {state}");
                frame.options.set(option, state);
            }
            if let Some(params) = positional_params {
                frame.arguments.truncate(1);
                if frame.arguments.is_empty() {
                    frame.arguments.push(frame.shell_name.clone());
                }
                frame.arguments.extend(params);
            }
            (ExitStatus::SUCCESS, Continue(()))
        }
        Err(error) => report_special_error(frame, "set", error),
    }
}
