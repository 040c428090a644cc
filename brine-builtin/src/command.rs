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

//! Command built-in
//!
//! The **`command`** built-in executes a utility bypassing shell functions,
//! or describes how a command name is interpreted.
//!
//! # Synopsis
//!
//! ```sh
//! command [-p] name [argument...]
//! ```
//!
//! ```sh
//! command -v|-V [-p] name...
//! ```
//!
//! # Description
//!
//! Without the `-v` or `-V` option, the built-in runs the named utility
//! with the arguments. Functions are not searched for, so `command ls` runs
//! the `ls` utility even if a function named `ls` is defined.
//!
//! With the `-v` option, the built-in prints for each name the string that
//! identifies the command: the path of an external utility, the name of a
//! built-in, function or reserved word, or an `alias` command that would
//! redefine the alias. With the `-V` option, a sentence describing the
//! command is printed instead.
//!
//! # Options
//!
//! - **`-p`**: searches the default `PATH` (`/usr/bin:/bin:/usr/sbin:/sbin`)
//!   instead of the `PATH` variable.
//! - **`-v`**: identifies the commands.
//! - **`-V`**: describes the commands.
//!
//! # Errors
//!
//! With `-v` or `-V`, a name that is not found makes the exit status
//! non-zero. With `-V`, an error message is also printed.
//!
//! # Exit status
//!
//! The exit status of the utility when it is run. Otherwise, zero if all the
//! names are found and one if any is not found.

use crate::common::getopt;
use crate::common::output;
use crate::common::report_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::builtin::Type;
use brine_env::semantics::ExitStatus;
use brine_env::variable::DEFAULT_PATH;
use brine_semantics::command::simple_command::execute_target;
use brine_semantics::command_search::{SearchOptions, Target, is_executable_file, search_with};
use brine_syntax::parser::is_keyword;
use std::ops::ControlFlow::Continue;
use yash_quote::quoted;

/// How a command name is interpreted
#[derive(Clone, Debug)]
pub enum Kind {
    Keyword,
    Alias(String),
    Target(Target),
}

/// Finds how the name would be interpreted as a command name.
#[must_use]
pub fn identify(frame: &Frame, name: &str, options: SearchOptions<'_>) -> Option<Kind> {
    if is_keyword(name) {
        return Some(Kind::Keyword);
    }
    if let Some(alias) = frame.aliases.get(name) {
        return Some(Kind::Alias(alias.0.replacement.clone()));
    }
    match search_with(frame, name, options)? {
        Target::External { path } if !is_executable_file(&path) => None,
        target => Some(Kind::Target(target)),
    }
}

/// Returns the line that `command -v` prints for the command.
#[must_use]
pub fn identification(name: &str, kind: &Kind) -> String {
    match kind {
        Kind::Keyword | Kind::Target(Target::Builtin(_) | Target::Function(_)) => name.to_owned(),
        Kind::Alias(replacement) => format!("alias {name}={}", quoted(replacement)),
        Kind::Target(Target::External { path }) => path.display().to_string(),
    }
}

/// Returns the line that `command -V` prints for the command.
#[must_use]
pub fn description(name: &str, kind: &Kind) -> String {
    match kind {
        Kind::Keyword => format!("{name} is a reserved word"),
        Kind::Alias(replacement) => format!("{name} is an alias for {replacement}"),
        Kind::Target(Target::Builtin(builtin)) => match builtin.r#type {
            Type::Special => format!("{name} is a special built-in"),
            Type::Regular => format!("{name} is a regular built-in"),
        },
        Kind::Target(Target::Function(_)) => format!("{name} is a function"),
        Kind::Target(Target::External { path }) => format!("{name} is {}", path.display()),
    }
}

/// Identifies or describes the commands and prints the results.
pub(crate) fn print_kinds(
    frame: &Frame,
    builtin_name: &str,
    names: &[String],
    verbose: bool,
    options: SearchOptions<'_>,
) -> Result {
    let mut text = String::new();
    let mut status = ExitStatus::SUCCESS;
    for name in names {
        match identify(frame, name, options) {
            Some(kind) if verbose => text.push_str(&description(name, &kind)),
            Some(kind) => text.push_str(&identification(name, &kind)),
            None => {
                if verbose {
                    frame.print_error(&format!("{builtin_name}: {name}: not found"));
                }
                status = ExitStatus::FAILURE;
                continue;
            }
        }
        text.push('\n');
    }

    let (print_status, result) = output(frame, builtin_name, &text);
    (status.max(print_status), result)
}

/// Entry point for executing the `command` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let (opts, operands) = match getopt(args, "pvV") {
        Ok(parsed) => parsed,
        Err(error) => return report_error(frame, "command", error),
    };
    let mut use_default_path = false;
    let mut verbosity = None;
    for (c, _) in opts {
        match c {
            'p' => use_default_path = true,
            'v' => verbosity = Some(false),
            _ => verbosity = Some(true),
        }
    }
    let path = use_default_path.then_some(DEFAULT_PATH);

    if let Some(verbose) = verbosity {
        let options = SearchOptions {
            skip_functions: false,
            path,
        };
        return print_kinds(frame, "command", &operands, verbose, options);
    }

    let Some(name) = operands.first() else {
        return (ExitStatus::SUCCESS, Continue(()));
    };
    let options = SearchOptions {
        skip_functions: true,
        path,
    };
    let target = search_with(frame, name, options);
    let result = execute_target(frame, target, operands);
    (frame.last_status, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, capture_stderr, capture_stdout, frame, read_all};
    use brine_semantics::run_code;
    use std::fs::File;
    use std::os::unix::fs::PermissionsExt as _;

    #[test]
    fn running_builtin_bypassing_function() {
        let mut frame = frame();
        let _ = run_code(&mut frame, "false() { return 0; }", "test");
        let result = main(&mut frame, args(&["false"]));
        assert_eq!(result, (ExitStatus::FAILURE, Continue(())));
    }

    #[test]
    fn no_operands() {
        let mut frame = frame();
        assert_eq!(main(&mut frame, vec![]), (ExitStatus::SUCCESS, Continue(())));
    }

    #[test]
    fn identifying_commands() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool");
        File::create(&path).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut frame = frame();
        let dir_str = dir.path().to_str().unwrap();
        frame.variables.assign("PATH", dir_str).unwrap();
        let _ = run_code(&mut frame, "f() { :; }; alias ll='ls -l'", "test");
        let stdout = capture_stdout(&mut frame);
        let result = main(&mut frame, args(&["-v", "if", "ll", "cd", "f", "tool"]));
        assert_eq!(result, (ExitStatus::SUCCESS, Continue(())));
        assert_eq!(
            read_all(&stdout),
            format!("if\nalias ll='ls -l'\ncd\nf\n{}\n", path.display())
        );
    }

    #[test]
    fn describing_commands() {
        let mut frame = frame();
        let stdout = capture_stdout(&mut frame);
        let stderr = capture_stderr(&mut frame);
        frame.variables.assign("PATH", "").unwrap();
        let result = main(&mut frame, args(&["-V", "export", "pwd", "nonexistent"]));
        assert_eq!(result, (ExitStatus::FAILURE, Continue(())));
        assert_eq!(
            read_all(&stdout),
            "export is a special built-in\npwd is a regular built-in\n"
        );
        assert_eq!(read_all(&stderr), "brine: command: nonexistent: not found\n");
    }

    #[test]
    fn not_found_silently_with_v() {
        let mut frame = frame();
        let stderr = capture_stderr(&mut frame);
        let _stdout = capture_stdout(&mut frame);
        frame.variables.assign("PATH", "").unwrap();
        let result = main(&mut frame, args(&["-v", "nonexistent"]));
        assert_eq!(result, (ExitStatus::FAILURE, Continue(())));
        assert_eq!(read_all(&stderr), "");
    }
}
