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

//! Common items for implementing built-ins.
//!
//! This module provides the [`getopt`] function that parses the options of a
//! built-in and helpers for printing results and reporting errors. Error
//! messages are prefixed with the shell name and the built-in name, as in
//! `brine: cd: /nowhere: No such file or directory`.

use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use nix::sys::signal::Signal;
use std::fmt::Display;
use std::io::ErrorKind;
use std::ops::ControlFlow::{Break, Continue};
use thiserror::Error;

/// Error in parsing command line options
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GetoptError {
    /// An option that is not in the option string
    #[error("-{0}: invalid option")]
    UnknownOption(char),
    /// An option that requires an argument appeared at the end of the
    /// arguments.
    #[error("-{0}: the option requires an argument")]
    MissingArgument(char),
}

/// Option found by [`getopt`]: the option character and its argument
pub type Opt = (char, Option<String>);

/// Parses options in the command line arguments.
///
/// `optstring` lists the accepted option characters. A character followed
/// by `:` takes an argument, which is either the rest of the same argument
/// (`-f100`) or the next argument (`-f 100`).
///
/// Parsing stops at the first argument that does not start with `-`, at a
/// lone `-`, or after `--`, which is removed. Returns the options in the
/// order they appeared and the remaining operands.
///
/// ```
/// # use brine_builtin::common::getopt;
/// let args = vec!["-pv".to_string(), "-f".to_string(), "x".to_string(), "y".to_string()];
/// let (opts, operands) = getopt(args, "f:pv").unwrap();
/// assert_eq!(opts.len(), 3);
/// assert_eq!(opts[0], ('p', None));
/// assert_eq!(opts[2], ('f', Some("x".to_string())));
/// assert_eq!(operands, ["y"]);
/// ```
pub fn getopt(
    args: Vec<String>,
    optstring: &str,
) -> std::result::Result<(Vec<Opt>, Vec<String>), GetoptError> {
    let mut opts = Vec::new();
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next_if(|arg| arg.starts_with('-') && arg != "-") {
        if arg == "--" {
            break;
        }

        let mut chars = arg[1..].char_indices();
        while let Some((index, c)) = chars.next() {
            let Some(spec_index) = optstring.find(c).filter(|_| c != ':') else {
                return Err(GetoptError::UnknownOption(c));
            };
            if !optstring[spec_index + c.len_utf8()..].starts_with(':') {
                opts.push((c, None));
                continue;
            }

            let rest = &arg[1 + index + c.len_utf8()..];
            let argument = if rest.is_empty() {
                args.next().ok_or(GetoptError::MissingArgument(c))?
            } else {
                rest.to_owned()
            };
            opts.push((c, Some(argument)));
            break;
        }
    }

    Ok((opts, args.collect()))
}

/// Prints text to the standard output.
///
/// If printing fails, an error message is printed and the exit status is
/// [`ExitStatus::FAILURE`]. A broken pipe is not reported, and the exit
/// status is that of a process killed by `SIGPIPE`.
pub fn output(frame: &Frame, name: &str, text: &str) -> Result {
    match frame.print(text) {
        Ok(()) => (ExitStatus::SUCCESS, Continue(())),
        Err(error) if error.kind() == ErrorKind::BrokenPipe => {
            (ExitStatus::from(Signal::SIGPIPE), Continue(()))
        }
        Err(error) => report_failure(frame, name, format_args!("cannot print: {error}")),
    }
}

fn print_message(frame: &Frame, name: &str, message: impl Display) {
    frame.print_error(&format!("{name}: {message}"));
}

/// Reports an error that does not abort the shell.
///
/// Returns [`ExitStatus::FAILURE`].
pub fn report_failure(frame: &Frame, name: &str, message: impl Display) -> Result {
    print_message(frame, name, message);
    (ExitStatus::FAILURE, Continue(()))
}

/// Reports an error in the usage of a regular built-in.
///
/// Returns [`ExitStatus::ERROR`].
pub fn report_error(frame: &Frame, name: &str, message: impl Display) -> Result {
    print_message(frame, name, message);
    (ExitStatus::ERROR, Continue(()))
}

/// Reports an error in a special built-in.
///
/// The result has `Break` so that the shell exits with
/// [`ExitStatus::ERROR`].
pub fn report_special_error(frame: &Frame, name: &str, message: impl Display) -> Result {
    print_message(frame, name, message);
    (ExitStatus::ERROR, Break(()))
}

/// Parses an operand that must be a non-negative decimal integer.
pub fn parse_count(operand: &str) -> Option<usize> {
    if operand.is_empty() || !operand.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    operand.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use brine_env::io::STDERR;
    use brine_env::io::STDOUT;
    use std::fs::File;
    use std::sync::Arc;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|&arg| arg.to_owned()).collect()
    }

    fn flag(c: char) -> Opt {
        (c, None)
    }

    fn with_arg(c: char, argument: &str) -> Opt {
        (c, Some(argument.to_owned()))
    }

    #[test]
    fn getopt_without_options() {
        let (opts, operands) = getopt(strings(&["a", "-b"]), "b").unwrap();
        assert!(opts.is_empty(), "{opts:?}");
        assert_eq!(operands, ["a", "-b"]);
    }

    #[test]
    fn getopt_clustered_options() {
        let (opts, operands) = getopt(strings(&["-ab", "-a", "x"]), "ab").unwrap();
        assert_eq!(opts, [flag('a'), flag('b'), flag('a')]);
        assert_eq!(operands, ["x"]);
    }

    #[test]
    fn getopt_option_arguments() {
        let (opts, operands) = getopt(strings(&["-f10", "-f", "20", "30"]), "f:").unwrap();
        assert_eq!(opts, [with_arg('f', "10"), with_arg('f', "20")]);
        assert_eq!(operands, ["30"]);
    }

    #[test]
    fn getopt_separator_and_lone_hyphen() {
        let (opts, operands) = getopt(strings(&["-a", "--", "-a"]), "a").unwrap();
        assert_eq!(opts, [flag('a')]);
        assert_eq!(operands, ["-a"]);

        let (opts, operands) = getopt(strings(&["-", "-a"]), "a").unwrap();
        assert!(opts.is_empty(), "{opts:?}");
        assert_eq!(operands, ["-", "-a"]);
    }

    #[test]
    fn getopt_errors() {
        assert_matches!(
            getopt(strings(&["-ax"]), "a"),
            Err(GetoptError::UnknownOption('x'))
        );
        assert_matches!(
            getopt(strings(&["-f"]), "f:"),
            Err(GetoptError::MissingArgument('f'))
        );
        assert_matches!(
            getopt(strings(&["-:"]), "f:"),
            Err(GetoptError::UnknownOption(':'))
        );
    }

    #[test]
    fn output_failures() {
        let mut frame = Frame::new();
        let stderr = Arc::new(tempfile::tempfile().unwrap());
        frame.fds.set(STDERR, Some(stderr.clone()));
        let (status, flow) = output(&frame, "pwd", "/\n");
        assert_eq!(status, ExitStatus::FAILURE);
        assert_eq!(flow, Continue(()));
        let reported = stderr.metadata().unwrap().len();
        assert!(reported > 0);

        let (reader, writer) = nix::unistd::pipe().unwrap();
        drop(reader);
        frame.fds.set(STDOUT, Some(Arc::new(File::from(writer))));
        let (status, flow) = output(&frame, "pwd", "/\n");
        assert_eq!(status, ExitStatus(141));
        assert_eq!(flow, Continue(()));
        assert_eq!(stderr.metadata().unwrap().len(), reported);
    }

    #[test]
    fn parsing_count() {
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("+1"), None);
        assert_eq!(parse_count("1x"), None);
    }
}
