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

//! Cd built-in
//!
//! The **`cd`** built-in changes the working directory.
//!
//! # Synopsis
//!
//! ```sh
//! cd [-L|-P] [directory]
//! ```
//!
//! # Description
//!
//! The built-in changes the working directory to the specified directory. The
//! new working directory is determined from the option and operand as follows:
//!
//! 1. If the operand is omitted, the value of `$HOME` is used for the operand.
//!    If the operand is a single hyphen (`-`), the value of `$OLDPWD` is used
//!    for the operand. If the variable is not set or empty, it is an error.
//! 2. If the operand does not start with a slash (`/`) and the first pathname
//!    component in the operand is neither dot (`.`) nor dot-dot (`..`), the
//!    built-in searches the directories specified by the `$CDPATH` variable for
//!    a first directory that contains the operand as a subdirectory.
//! 3. If the `-L` option is effective, the operand is made absolute by
//!    prepending `$PWD`, and then the `.` and `..` components are removed
//!    lexically. See [`canonicalize`](canonicalize::canonicalize).
//!
//! If the change is successful, `$OLDPWD` is set to the previous value of
//! `$PWD`, and `$PWD` is set to the new working directory. With `-P`, the
//! new `$PWD` does not contain symbolic links.
//!
//! If the new working directory is taken from a non-empty `$CDPATH` entry or
//! the operand is a single hyphen, the built-in prints the new value of
//! `$PWD`.
//!
//! # Options
//!
//! **`-L`** resolves the operand logically and **`-P`** physically. The last
//! one given applies. The default is `-L`.
//!
//! # Errors
//!
//! The built-in fails if the operand does not resolve to an existing
//! directory, or if the operand is omitted and `$HOME` is not set, or if the
//! operand is `-` and `$OLDPWD` is not set.
//!
//! # Exit status
//!
//! Zero if the working directory was changed, one if it could not be
//! changed, and two on a command line syntax error.
//!
//! # Implementation notes
//!
//! Each [`Frame`] has its own working directory, so changing the directory
//! in a subshell does not affect the parent shell. The process working
//! directory is never changed; external utilities are started in the
//! directory of the frame.

use crate::common::getopt;
use crate::common::output;
use crate::common::report_error;
use crate::common::report_failure;
use crate::pwd::logical_pwd;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use brine_env::variable::{HOME, OLDPWD, PWD};
use std::ops::ControlFlow::Continue;
use std::path::Path;
use std::path::PathBuf;

pub mod canonicalize;
pub mod cdpath;

/// Returns the value of a variable that is set and non-empty.
fn non_empty_value<'a>(frame: &'a Frame, name: &str) -> Option<&'a str> {
    frame.variables.value(name).filter(|value| !value.is_empty())
}

/// Computes the new working directory path.
fn resolve(frame: &Frame, operand: &str, physical: bool) -> std::result::Result<PathBuf, String> {
    let target = frame.resolve_path(Path::new(operand));
    let path = if physical {
        std::fs::canonicalize(&target).map_err(|error| format!("{operand}: {error}"))?
    } else {
        let base = logical_pwd(frame).map_or_else(|| frame.cwd.clone(), PathBuf::from);
        let absolute = base.join(operand);
        canonicalize::canonicalize(&absolute).map_err(|error| error.to_string())?
    };

    match path.metadata() {
        Ok(metadata) if metadata.is_dir() => Ok(path),
        Ok(_) => Err(format!("{operand}: not a directory")),
        Err(error) => Err(format!("{operand}: {error}")),
    }
}

/// Entry point for executing the `cd` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let (opts, operands) = match getopt(args, "LP") {
        Ok(parsed) => parsed,
        Err(error) => return report_error(frame, "cd", error),
    };
    let physical = opts.last().is_some_and(|&(c, _)| c == 'P');

    let (operand, mut print) = match operands.as_slice() {
        [] => match non_empty_value(frame, HOME) {
            Some(home) => (home.to_owned(), false),
            None => return report_failure(frame, "cd", "$HOME is not set"),
        },
        [operand] if operand == "-" => match non_empty_value(frame, OLDPWD) {
            Some(old) => (old.to_owned(), true),
            None => return report_failure(frame, "cd", "$OLDPWD is not set"),
        },
        [operand] if operand.is_empty() => {
            return report_failure(frame, "cd", "the directory operand is empty");
        }
        [operand] => (operand.clone(), false),
        [_, extra, ..] => {
            return report_error(frame, "cd", format_args!("{extra}: too many operands"));
        }
    };

    let operand = match cdpath::search(frame, &operand) {
        Some((found, print_found)) => {
            print |= print_found;
            found.display().to_string()
        }
        None => operand,
    };

    let new_dir = match resolve(frame, &operand, physical) {
        Ok(new_dir) => new_dir,
        Err(message) => return report_failure(frame, "cd", message),
    };

    let old_pwd = logical_pwd(frame)
        .map_or_else(|| frame.cwd.display().to_string(), str::to_owned);
    let new_pwd = new_dir.display().to_string();
    log::debug!("cd: {old_pwd} -> {new_pwd}");
    frame.cwd = new_dir;

    for (name, value) in [(OLDPWD, old_pwd), (PWD, new_pwd.clone())] {
        if let Err(error) = frame.assign_variable(name, value) {
            frame.print_error(&format!("cd: {error}"));
        }
    }

    if print {
        output(frame, "cd", &format!("{new_pwd}\n"))
    } else {
        (ExitStatus::SUCCESS, Continue(()))
    }
}
