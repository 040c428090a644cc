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

//! Simple command semantics for built-ins

use super::prepare_temporary;
use super::unwind_result;
use crate::Handle;
use crate::Result;
use crate::assign::perform_assignments;
use crate::expansion::Env;
use crate::redir::RedirGuard;
use crate::xtrace::XTrace;
use brine_env::Frame;
use brine_env::builtin::Builtin;
use brine_env::builtin::Type::{Regular, Special};
use brine_syntax::syntax::Assign;
use brine_syntax::syntax::Redir;
use std::ops::ControlFlow::{Break, Continue};

pub fn execute(
    frame: &mut Frame,
    builtin: Builtin,
    assigns: &[Assign],
    mut fields: Vec<String>,
    redirs: &[Redir],
) -> Result {
    let guard = &mut RedirGuard::new(frame);

    let saved = match builtin.r#type {
        Special => {
            if prepare_special(guard, assigns, &fields, redirs).is_err() {
                return abort_special(guard);
            }
            None
        }
        Regular => match prepare_temporary(guard, assigns, &fields, redirs) {
            Ok(saved) => Some(saved),
            Err(result) => return result,
        },
    };

    let args = fields.split_off(1);
    let (exit_status, flow) = (builtin.execute)(guard, args);
    guard.last_status = exit_status;

    if let Some(saved) = saved {
        saved.restore(guard);
    }
    if std::mem::take(&mut guard.retain_redirs) {
        guard.preserve_redirs();
    }

    match flow {
        Continue(()) => unwind_result(guard),
        Break(()) if builtin.r#type == Special => abort_special(guard),
        Break(()) => unwind_result(guard),
    }
}

/// Performs the redirections and persistent assignments for a special
/// built-in.
///
/// Errors are handled before returning `Err`.
fn prepare_special(
    guard: &mut RedirGuard<'_>,
    assigns: &[Assign],
    fields: &[String],
    redirs: &[Redir],
) -> std::result::Result<(), ()> {
    if let Err(error) = guard.perform_redirs(redirs) {
        let _ = error.handle(guard);
        return Err(());
    }

    let mut xtrace = XTrace::from_frame(guard);
    let mut env = Env::new(guard);
    if let Err(error) = perform_assignments(&mut env, assigns, false, xtrace.as_mut()) {
        let _ = error.handle(guard);
        return Err(());
    }

    if let Some(mut xtrace) = xtrace {
        xtrace.push_fields(fields);
        xtrace.finish(guard);
    }
    Ok(())
}

/// Makes the shell exit after a special built-in failed.
///
/// If the built-in requested `break`, `continue`, `return` or `exit`, that
/// request is kept as is.
fn abort_special(frame: &mut Frame) -> Result {
    if !frame.should_unwind() {
        log::debug!("special built-in failed with {:?}", frame.last_status);
        frame.exit = Some(frame.last_status);
    }
    Break(())
}

#[cfg(test)]
mod tests {
    use crate::command::Command as _;
    use crate::tests::capture_stdout;
    use crate::tests::frame_with_echo;
    use crate::tests::parse;
    use crate::tests::read_all;
    use brine_env::Frame;
    use brine_env::builtin::Builtin;
    use brine_env::builtin::Type::{Regular, Special};
    use brine_env::io::STDOUT;
    use brine_env::semantics::ExitStatus;
    use std::ops::ControlFlow::{Break, Continue};
    use std::sync::Arc;

    fn failing_special(_frame: &mut Frame, _args: Vec<String>) -> brine_env::builtin::Result {
        (ExitStatus(37), Break(()))
    }

    fn retaining_builtin(frame: &mut Frame, _args: Vec<String>) -> brine_env::builtin::Result {
        frame.retain_redirs = true;
        (ExitStatus::SUCCESS, Continue(()))
    }

    #[test]
    fn exit_status_from_builtin() {
        let mut frame = frame_with_echo();
        let result = parse("return -n 93").execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(frame.last_status, ExitStatus(93));
    }

    #[test]
    fn return_from_special_builtin_is_kept() {
        let mut frame = frame_with_echo();
        let result = parse("return 7").execute(&mut frame);
        assert_eq!(result, Break(()));
        assert!(frame.fn_abort);
        assert_eq!(frame.exit, None);
    }

    #[test]
    fn failing_special_builtin_makes_shell_exit() {
        let mut frame = frame_with_echo();
        frame
            .builtins
            .insert("fail", Builtin::new(Special, failing_special));
        let result = parse("fail").execute(&mut frame);
        assert_eq!(result, Break(()));
        assert_eq!(frame.exit, Some(ExitStatus(37)));
    }

    #[test]
    fn failing_regular_builtin_does_not_exit() {
        let mut frame = frame_with_echo();
        frame
            .builtins
            .insert("fail", Builtin::new(Regular, failing_special));
        let result = parse("fail").execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(frame.exit, None);
        assert_eq!(frame.last_status, ExitStatus(37));
    }

    #[test]
    fn assignments_for_special_builtin_persist() {
        let mut frame = frame_with_echo();
        let _ = parse("a=1 return -n 0").execute(&mut frame);
        assert_eq!(frame.variables.value("a"), Some("1"));
    }

    #[test]
    fn assignments_for_regular_builtin_are_temporary() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        frame.variables.assign("a", "old").unwrap();
        let _ = parse("a=new echo $a").execute(&mut frame);
        assert_eq!(read_all(&stdout), "old\n");
        assert_eq!(frame.variables.value("a"), Some("old"));
    }

    #[test]
    fn redirections_are_undone_after_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let mut frame = frame_with_echo();
        frame.cwd = dir.path().to_owned();
        let stdout = capture_stdout(&mut frame);
        let _ = parse("echo foo >out; echo bar").execute(&mut frame);
        assert_eq!(std::fs::read_to_string(dir.path().join("out")).unwrap(), "foo\n");
        assert_eq!(read_all(&stdout), "bar\n");
    }

    #[test]
    fn redirections_are_retained_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let mut frame = frame_with_echo();
        frame.cwd = dir.path().to_owned();
        let stdout = capture_stdout(&mut frame);
        frame
            .builtins
            .insert("keep", Builtin::new(Special, retaining_builtin));
        let _ = parse("keep >out; echo bar").execute(&mut frame);
        assert!(!Arc::ptr_eq(frame.fds.get(STDOUT).unwrap(), &stdout));
        assert!(!frame.retain_redirs);
        assert_eq!(std::fs::read_to_string(dir.path().join("out")).unwrap(), "bar\n");
    }
}
