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

//! Utility for unit tests

use brine_env::Frame;
use brine_env::builtin::Builtin;
use brine_env::builtin::Type::{Regular, Special};
use brine_env::io::STDOUT;
use brine_env::semantics::ExitStatus;
use brine_env::semantics::LoopAbort;
use brine_syntax::parser;
use brine_syntax::source::Source;
use brine_syntax::syntax::Chunk;
use brine_syntax::syntax::Compound;
use std::io::Read as _;
use std::io::Seek as _;
use std::ops::ControlFlow::{Break, Continue};
use std::fs::File;
use std::sync::Arc;

/// Parses code that is known to be valid.
pub fn parse(code: &str) -> Chunk {
    parser::parse(&Source::new(code)).unwrap()
}

/// Parses a single word.
pub fn parse_word(word: &str) -> Compound {
    let chunk = parse(&format!(": {word}"));
    chunk.and_ors[0].pipelines[0].forms[0].words[1].clone()
}

/// Simple implementation of the `echo` built-in.
///
/// The operands are printed separated by spaces and followed by a newline.
pub fn echo_builtin(frame: &mut Frame, args: Vec<String>) -> brine_env::builtin::Result {
    let line = format!("{}\n", args.join(" "));
    match frame.print(&line) {
        Ok(()) => (ExitStatus::SUCCESS, Continue(())),
        Err(_) => (ExitStatus::FAILURE, Continue(())),
    }
}

/// Simple implementation of the `return` built-in.
///
/// `return n` returns from the function with exit status `n`. With the `-n`
/// option, it only sets the exit status without returning.
pub fn return_builtin(frame: &mut Frame, args: Vec<String>) -> brine_env::builtin::Result {
    let (no_return, operand) = match args.first().map(String::as_str) {
        Some("-n") => (true, args.get(1)),
        _ => (false, args.first()),
    };
    let status = operand
        .and_then(|s| s.parse().ok())
        .map_or(frame.last_status, ExitStatus);
    if no_return {
        (status, Continue(()))
    } else {
        frame.fn_abort = true;
        (status, Break(()))
    }
}

/// Simple implementation of the `break` and `continue` built-ins.
fn loop_abort(frame: &mut Frame, args: &[String], next: bool) -> brine_env::builtin::Result {
    let count: usize = args.first().and_then(|s| s.parse().ok()).unwrap_or(1);
    if frame.loop_depth == 0 || count == 0 {
        return (ExitStatus::ERROR, Continue(()));
    }
    let dest_depth = frame.loop_depth.saturating_sub(count - 1).max(1);
    frame.loop_abort = Some(LoopAbort { dest_depth, next });
    (ExitStatus::SUCCESS, Break(()))
}

/// Simple implementation of the `break` built-in.
pub fn break_builtin(frame: &mut Frame, args: Vec<String>) -> brine_env::builtin::Result {
    loop_abort(frame, &args, false)
}

/// Simple implementation of the `continue` built-in.
pub fn continue_builtin(frame: &mut Frame, args: Vec<String>) -> brine_env::builtin::Result {
    loop_abort(frame, &args, true)
}

/// Simple implementation of the `cat` built-in that copies the standard
/// input to the standard output.
pub fn cat_builtin(frame: &mut Frame, _args: Vec<String>) -> brine_env::builtin::Result {
    let mut content = Vec::new();
    while let Ok(Some(byte)) = frame.fds.read_byte(brine_env::io::STDIN) {
        content.push(byte);
    }
    match frame.fds.write_all(STDOUT, &content) {
        Ok(()) => (ExitStatus::SUCCESS, Continue(())),
        Err(_) => (ExitStatus::FAILURE, Continue(())),
    }
}

/// Returns a frame with the `echo`, `return`, `break`, `continue` and `cat`
/// built-ins.
pub fn frame_with_echo() -> Frame {
    let mut frame = Frame::new();
    frame
        .builtins
        .insert("echo", Builtin::new(Regular, echo_builtin));
    frame
        .builtins
        .insert("return", Builtin::new(Special, return_builtin));
    frame
        .builtins
        .insert("cat", Builtin::new(Regular, cat_builtin));
    frame
        .builtins
        .insert("break", Builtin::new(Special, break_builtin));
    frame
        .builtins
        .insert("continue", Builtin::new(Special, continue_builtin));
    frame
}

/// Replaces the standard output of the frame with a temporary file.
pub fn capture_stdout(frame: &mut Frame) -> Arc<File> {
    let file = Arc::new(tempfile::tempfile().unwrap());
    frame.fds.set(STDOUT, Some(file.clone()));
    file
}

/// Replaces the standard error of the frame with a temporary file.
pub fn capture_stderr(frame: &mut Frame) -> Arc<File> {
    let file = Arc::new(tempfile::tempfile().unwrap());
    frame.fds.set(brine_env::io::STDERR, Some(file.clone()));
    file
}

/// Returns the whole content of a file.
pub fn read_all(file: &File) -> String {
    let mut file = file;
    file.rewind().unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}
