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

//! Read built-in
//!
//! The **`read`** built-in reads a line from the standard input and assigns
//! it to variables.
//!
//! # Synopsis
//!
//! ```sh
//! read [-r] name...
//! ```
//!
//! # Description
//!
//! The built-in reads a line from the standard input and splits it into
//! fields using the characters in `$IFS` as separators. The fields are
//! assigned to the named variables in order. The last variable receives the
//! rest of the line, excluding trailing IFS whitespace. Variables that have
//! no corresponding field are set to the empty string.
//!
//! Without the `-r` option, a backslash escapes the next character so that
//! it is not treated as a separator, and a backslash followed by a newline
//! continues the line.
//!
//! # Options
//!
//! The **`-r`** option disables the backslash processing.
//!
//! # Errors
//!
//! It is an error if a name is not a valid variable name or if the variable
//! is read-only.
//!
//! # Exit status
//!
//! Zero if a whole line was read. One if the end of input was reached
//! before a newline, in which case the variables are still assigned. Two on
//! an error.

use crate::common::getopt;
use crate::common::report_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::io::STDIN;
use brine_env::semantics::ExitStatus;
use brine_semantics::expansion::split::{Class, Ifs};
use brine_syntax::parser::is_name;
use std::ops::ControlFlow::Continue;

/// Character read from the input and whether it was escaped by a backslash
type Char = (char, bool);

/// Reads a line from the standard input.
///
/// Returns the line without the newline and whether the newline was found.
fn read_line(frame: &Frame, raw: bool) -> std::io::Result<(Vec<u8>, bool)> {
    let mut line = Vec::new();
    loop {
        match frame.fds.read_byte(STDIN)? {
            None => return Ok((line, false)),
            Some(b'\n') => return Ok((line, true)),
            Some(b'\\') if !raw => match frame.fds.read_byte(STDIN)? {
                None => return Ok((line, false)),
                Some(b'\n') => {}
                Some(next) => line.extend([b'\\', next]),
            },
            Some(byte) => line.push(byte),
        }
    }
}

/// Decodes the line and removes backslash escapes.
fn unescape(line: &[u8], raw: bool) -> Vec<Char> {
    let text = String::from_utf8_lossy(line);
    let mut result = Vec::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' && !raw {
            if let Some(next) = chars.next() {
                result.push((next, true));
            }
        } else {
            result.push((c, false));
        }
    }
    result
}

/// Splits the line into at most `count` fields.
///
/// The result always has `count` fields. Missing fields are empty.
fn split_fields(line: &[Char], ifs: Ifs<'_>, count: usize) -> Vec<String> {
    let class = |&(c, escaped): &Char| {
        if escaped {
            Class::NonIfs
        } else {
            ifs.classify(c)
        }
    };
    let is_whitespace = |c: &Char| class(c) == Class::IfsWhitespace;
    let collect = |chars: &[Char]| chars.iter().map(|&(c, _)| c).collect::<String>();

    let mut i = 0;
    while i < line.len() && is_whitespace(&line[i]) {
        i += 1;
    }

    let mut fields = Vec::with_capacity(count);
    while fields.len() + 1 < count && i < line.len() {
        let start = i;
        while i < line.len() && class(&line[i]) == Class::NonIfs {
            i += 1;
        }
        fields.push(collect(&line[start..i]));

        while i < line.len() && is_whitespace(&line[i]) {
            i += 1;
        }
        if i < line.len() && class(&line[i]) == Class::IfsNonWhitespace {
            i += 1;
            while i < line.len() && is_whitespace(&line[i]) {
                i += 1;
            }
        }
    }

    let mut end = line.len();
    while end > i && is_whitespace(&line[end - 1]) {
        end -= 1;
    }
    fields.push(collect(&line[i..end]));
    fields.resize(count, String::new());
    fields
}

/// Entry point for executing the `read` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let (opts, names) = match getopt(args, "r") {
        Ok(parsed) => parsed,
        Err(error) => return report_error(frame, "read", error),
    };
    let raw = !opts.is_empty();
    if names.is_empty() {
        return report_error(frame, "read", "the variable name operand is missing");
    }
    if let Some(name) = names.iter().find(|name| !is_name(name)) {
        return report_error(frame, "read", format_args!("`{name}` is not a valid variable name"));
    }

    let (line, complete) = match read_line(frame, raw) {
        Ok(result) => result,
        Err(error) => return report_error(frame, "read", format_args!("cannot read: {error}")),
    };
    let line = unescape(&line, raw);
    let fields = split_fields(&line, Ifs::new(frame.ifs()), names.len());

    let mut status = if complete {
        ExitStatus::SUCCESS
    } else {
        ExitStatus::FAILURE
    };
    for (name, value) in names.iter().zip(fields) {
        if let Err(error) = frame.assign_variable(name, value) {
            frame.print_error(&format!("read: {error}"));
            status = ExitStatus::ERROR;
        }
    }
    (status, Continue(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, capture_stderr, frame, set_stdin};
    use brine_env::variable::IFS;

    fn chars(s: &str) -> Vec<Char> {
        s.chars().map(|c| (c, false)).collect()
    }

    #[test]
    fn splitting_with_default_ifs() {
        let ifs = Ifs::new(" \t\n");
        assert_eq!(split_fields(&chars("  a  b c  "), ifs, 2), ["a", "b c"]);
        assert_eq!(split_fields(&chars("a"), ifs, 3), ["a", "", ""]);
        assert_eq!(split_fields(&chars(""), ifs, 1), [""]);
    }

    #[test]
    fn splitting_with_non_whitespace_ifs() {
        let ifs = Ifs::new(" :");
        assert_eq!(split_fields(&chars("a : b::c"), ifs, 4), ["a", "b", "", "c"]);
        assert_eq!(split_fields(&chars("a:b:c"), ifs, 2), ["a", "b:c"]);
    }

    #[test]
    fn escaped_separators_are_kept() {
        let line = unescape(br"a\ b c", false);
        assert_eq!(split_fields(&line, Ifs::new(" "), 2), ["a b", "c"]);
    }

    #[test]
    fn reading_line() {
        let mut frame = frame();
        set_stdin(&mut frame, "first second third\nnext\n");
        let result = main(&mut frame, args(&["a", "b"]));
        assert_eq!(result, (ExitStatus::SUCCESS, Continue(())));
        assert_eq!(frame.variables.value("a"), Some("first"));
        assert_eq!(frame.variables.value("b"), Some("second third"));

        main(&mut frame, args(&["a"]));
        assert_eq!(frame.variables.value("a"), Some("next"));
    }

    #[test]
    fn backslash_processing() {
        let mut frame = frame();
        set_stdin(&mut frame, "a\\\nb \\x\n");
        main(&mut frame, args(&["v"]));
        assert_eq!(frame.variables.value("v"), Some("ab x"));

        set_stdin(&mut frame, "a\\\nb \\x\n");
        main(&mut frame, args(&["-r", "v"]));
        assert_eq!(frame.variables.value("v"), Some("a\\"));
    }

    #[test]
    fn end_of_input() {
        let mut frame = frame();
        set_stdin(&mut frame, "partial");
        let result = main(&mut frame, args(&["v", "w"]));
        assert_eq!(result, (ExitStatus::FAILURE, Continue(())));
        assert_eq!(frame.variables.value("v"), Some("partial"));
        assert_eq!(frame.variables.value("w"), Some(""));
    }

    #[test]
    fn custom_ifs() {
        let mut frame = frame();
        frame.variables.assign(IFS, ":").unwrap();
        set_stdin(&mut frame, "x:y\n");
        main(&mut frame, args(&["a", "b"]));
        assert_eq!(frame.variables.value("a"), Some("x"));
        assert_eq!(frame.variables.value("b"), Some("y"));
    }

    #[test]
    fn invalid_name() {
        let mut frame = frame();
        let _stderr = capture_stderr(&mut frame);
        set_stdin(&mut frame, "x\n");
        let (status, _) = main(&mut frame, args(&["a-b"]));
        assert_eq!(status, ExitStatus::ERROR);
    }
}
