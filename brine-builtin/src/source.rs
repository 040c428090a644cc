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

//! Source (`.`) built-in
//!
//! The **`.`** built-in reads and executes commands from a file.
//!
//! # Synopsis
//!
//! ```sh
//! . file [argument...]
//! ```
//!
//! # Description
//!
//! The built-in reads the file and executes its content in the current
//! shell environment. If the file name does not contain a slash, the
//! directories in `$PATH` are searched for a readable file.
//!
//! The `return` built-in in the file ends the execution of the file.
//!
//! # Operands
//!
//! The first operand names the file. If more operands are given, they become
//! the positional parameters while the file is executed. The original
//! parameters are restored afterward.
//!
//! # Errors
//!
//! It is a fatal error if the file is not found or cannot be read.
//!
//! # Exit status
//!
//! The exit status of the last command executed in the file, or zero if the
//! file contains no commands.
//!
//! # Portability
//!
//! POSIX does not allow operands after the file name. Like many shells, this
//! implementation accepts them as positional parameters.

use crate::common::report_special_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use brine_env::variable::PATH;
use brine_semantics::run_code;
use std::ops::ControlFlow::{Break, Continue};
use std::path::Path;
use std::path::PathBuf;

/// Finds the file to be executed.
///
/// If the name does not contain a slash, the file is searched for in the
/// directories of `$PATH`. Otherwise, the name is resolved from the working
/// directory.
pub fn find_file(frame: &Frame, name: &str) -> Option<PathBuf> {
    if name.contains('/') {
        return Some(frame.resolve_path(Path::new(name)));
    }
    let path = frame.variables.value(PATH).unwrap_or_default();
    path.split(':')
        .map(|dir| {
            let dir = if dir.is_empty() { "." } else { dir };
            frame.resolve_path(&Path::new(dir).join(name))
        })
        .find(|candidate| candidate.is_file())
}

fn report_error(frame: &Frame, message: std::fmt::Arguments<'_>, status: ExitStatus) -> Result {
    let (_, result) = report_special_error(frame, ".", message);
    (status, result)
}

/// Entry point for executing the `.` built-in
pub fn main(frame: &mut Frame, mut args: Vec<String>) -> Result {
    if args.is_empty() {
        return report_special_error(frame, ".", "the file operand is missing");
    }
    let params = args.split_off(1);
    let name = &args[0];

    let Some(path) = find_file(frame, name) else {
        return report_error(
            frame,
            format_args!("{name}: file not found"),
            ExitStatus::FILE_TO_SOURCE_NOT_FOUND,
        );
    };
    let code = match std::fs::read_to_string(&path) {
        Ok(code) => code,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return report_error(
                frame,
                format_args!("{name}: {error}"),
                ExitStatus::FILE_TO_SOURCE_NOT_FOUND,
            );
        }
        Err(error) => {
            return report_error(
                frame,
                format_args!("{name}: {error}"),
                ExitStatus::FILE_TO_SOURCE_NOT_READABLE,
            );
        }
    };
    log::debug!("sourcing {}", path.display());

    let saved_params = (!params.is_empty()).then(|| {
        let zero = frame.arguments.first().cloned().unwrap_or_default();
        let new = std::iter::once(zero).chain(params).collect();
        std::mem::replace(&mut frame.arguments, new)
    });

    frame.last_status = ExitStatus::SUCCESS;
    frame.return_depth += 1;
    let _ = run_code(frame, &code, name);
    frame.return_depth -= 1;
    frame.fn_abort = false;

    if let Some(saved_params) = saved_params {
        frame.arguments = saved_params;
    }

    let result = if frame.should_unwind() { Break(()) } else { Continue(()) };
    (frame.last_status, result)
}
