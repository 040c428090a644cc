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

//! Pwd built-in
//!
//! The **`pwd`** built-in prints the working directory path.
//!
//! # Synopsis
//!
//! ```sh
//! pwd [-L|-P]
//! ```
//!
//! # Description
//!
//! The built-in prints the pathname of the working directory followed by a
//! newline.
//!
//! # Options
//!
//! With the **`-L`** option, the value of `$PWD` is printed if it is an
//! absolute path to the working directory without any `.` or `..`
//! components. Otherwise, the physical path is printed as with `-P`.
//!
//! With the **`-P`** option, the printed path does not contain any symbolic
//! links.
//!
//! The two options are mutually exclusive. The last one applies if both are
//! given. The default is `-L`.
//!
//! # Exit status
//!
//! Zero unless an error occurs.

use crate::common::getopt;
use crate::common::output;
use crate::common::report_error;
use crate::common::report_failure;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::variable::PWD;
use std::os::unix::fs::MetadataExt as _;
use std::path::{Component, Path, PathBuf};

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.metadata(), b.metadata()) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

/// Returns the value of `$PWD` if it is a valid logical path to the working
/// directory.
#[must_use]
pub fn logical_pwd(frame: &Frame) -> Option<&str> {
    let pwd = frame.variables.value(PWD)?;
    let path = Path::new(pwd);
    let is_canonical = path.is_absolute()
        && path
            .components()
            .all(|c| !matches!(c, Component::CurDir | Component::ParentDir));
    (is_canonical && same_file(path, &frame.cwd)).then_some(pwd)
}

/// Returns the working directory path without symbolic links.
pub fn physical_pwd(frame: &Frame) -> std::io::Result<PathBuf> {
    std::fs::canonicalize(&frame.cwd)
}

/// Entry point for executing the `pwd` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let (opts, operands) = match getopt(args, "LP") {
        Ok(parsed) => parsed,
        Err(error) => return report_error(frame, "pwd", error),
    };
    if let Some(operand) = operands.first() {
        return report_error(frame, "pwd", format_args!("{operand}: no operands expected"));
    }
    let physical = opts.last().is_some_and(|&(c, _)| c == 'P');

    let logical = if physical { None } else { logical_pwd(frame) };
    let path = match logical {
        Some(pwd) => pwd.to_owned(),
        None => match physical_pwd(frame) {
            Ok(path) => path.display().to_string(),
            Err(error) => {
                let message = format!("cannot find the working directory: {error}");
                return report_failure(frame, "pwd", message);
            }
        },
    };
    output(frame, "pwd", &format!("{path}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, capture_stdout, frame, read_all};
    use brine_env::semantics::ExitStatus;
    use std::ops::ControlFlow::Continue;
    use std::os::unix::fs::symlink;

    #[test]
    fn logical_and_physical_paths() {
        let dir = tempfile::tempdir().unwrap();
        let real = std::fs::canonicalize(dir.path()).unwrap();
        std::fs::create_dir(real.join("target")).unwrap();
        symlink(real.join("target"), real.join("link")).unwrap();

        let mut frame = frame();
        frame.cwd = real.join("link");
        let pwd = real.join("link").display().to_string();
        frame.variables.assign(PWD, pwd.clone()).unwrap();

        let stdout = capture_stdout(&mut frame);
        let result = main(&mut frame, vec![]);
        assert_eq!(result, (ExitStatus::SUCCESS, Continue(())));
        assert_eq!(read_all(&stdout), format!("{pwd}\n"));

        let stdout = capture_stdout(&mut frame);
        main(&mut frame, args(&["-L", "-P"]));
        assert_eq!(read_all(&stdout), format!("{}\n", real.join("target").display()));
    }

    #[test]
    fn invalid_pwd_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let real = std::fs::canonicalize(dir.path()).unwrap();
        let mut frame = frame();
        frame.cwd = real.clone();
        frame.variables.assign(PWD, "/nonexistent/../x").unwrap();
        let stdout = capture_stdout(&mut frame);
        main(&mut frame, vec![]);
        assert_eq!(read_all(&stdout), format!("{}\n", real.display()));
    }
}
