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

//! Simple command semantics for functions

use super::prepare_temporary;
use super::unwind_result;
use crate::Handle;
use crate::Result;
use crate::command::Command;
use crate::redir::RedirGuard;
use brine_env::Frame;
use brine_env::function::Function;
use brine_syntax::syntax::Assign;
use brine_syntax::syntax::Redir;

pub fn execute(
    frame: &mut Frame,
    function: &Function,
    assigns: &[Assign],
    fields: Vec<String>,
    redirs: &[Redir],
) -> Result {
    let guard = &mut RedirGuard::new(frame);
    let saved = match prepare_temporary(guard, assigns, &fields, redirs) {
        Ok(saved) => saved,
        Err(result) => return result,
    };
    let result = execute_function_body(guard, function, fields);
    saved.restore(guard);
    result
}

/// Executes the body of the function.
///
/// The redirections stored in the function are performed first. The
/// positional parameters are replaced with `fields` while the body runs, so
/// `$0` becomes the first field. A `return` in the body ends the function;
/// `break` and `continue` do not reach loops outside the function.
pub fn execute_function_body(frame: &mut Frame, function: &Function, fields: Vec<String>) -> Result {
    let guard = &mut RedirGuard::new(frame);
    if let Err(error) = guard.perform_redirs(&function.redirs) {
        return error.handle(guard);
    }

    log::trace!("calling function {}", function.name);
    let arguments = std::mem::replace(&mut guard.arguments, fields);
    let loop_depth = std::mem::take(&mut guard.loop_depth);
    guard.return_depth += 1;

    let _ = function.body.execute(guard);

    guard.return_depth -= 1;
    guard.loop_depth = loop_depth;
    guard.arguments = arguments;
    guard.fn_abort = false;
    unwind_result(guard)
}

#[cfg(test)]
mod tests {
    use crate::command::Command as _;
    use crate::tests::capture_stdout;
    use crate::tests::frame_with_echo;
    use crate::tests::parse;
    use crate::tests::read_all;
    use brine_env::semantics::ExitStatus;
    use std::ops::ControlFlow::Continue;

    #[test]
    fn function_sees_arguments() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        frame.arguments = vec!["sh".into(), "outer".into()];
        let _ = parse("f() { echo $0 $# $1 $2; }; f a b; echo $0 $1").execute(&mut frame);
        assert_eq!(read_all(&stdout), "f 2 a b\nsh outer\n");
    }

    #[test]
    fn return_ends_function() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let result = parse("f() { echo a; return 3; echo b; }; f; echo $?").execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(read_all(&stdout), "a\n3\n");
        assert!(!frame.fn_abort);
        assert_eq!(frame.return_depth, 0);
    }

    #[test]
    fn function_redirections() {
        let dir = tempfile::tempdir().unwrap();
        let mut frame = frame_with_echo();
        frame.cwd = dir.path().to_owned();
        let stdout = capture_stdout(&mut frame);
        let _ = parse("f() { echo in; } >out; f; f; echo after").execute(&mut frame);
        assert_eq!(std::fs::read_to_string(dir.path().join("out")).unwrap(), "in\n");
        assert_eq!(read_all(&stdout), "after\n");
    }

    #[test]
    fn assignments_for_function_are_temporary() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let _ = parse("f() { echo $v; }; v=tmp f; echo \"[$v]\"").execute(&mut frame);
        assert_eq!(read_all(&stdout), "tmp\n[]\n");
        assert_eq!(frame.variables.get("v"), None);
    }

    #[test]
    fn variables_set_in_function_are_global() {
        let mut frame = frame_with_echo();
        let _ = parse("f() { g=1; }; f").execute(&mut frame);
        assert_eq!(frame.variables.value("g"), Some("1"));
        assert_eq!(frame.last_status, ExitStatus::SUCCESS);
    }
}
