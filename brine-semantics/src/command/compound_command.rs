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

//! Implementation of the compound command semantics.

use super::Command;
use super::apply_errexit;
use super::in_condition;
use crate::Handle;
use crate::Result;
use crate::redir::RedirGuard;
use brine_env::Frame;
use brine_syntax::syntax;
use brine_syntax::syntax::CompoundKind;
use std::ops::ControlFlow::{Break, Continue};

/// Executes the condition of an if/while/until command.
///
/// Returns whether the condition succeeded.
fn evaluate_condition(frame: &mut Frame, condition: &syntax::Chunk) -> std::ops::ControlFlow<(), bool> {
    in_condition(frame, |frame| condition.execute(frame))?;
    Continue(frame.last_status.is_successful())
}

/// What a loop should do after its condition or body has been executed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Iteration {
    /// Go on with the loop.
    Continue,
    /// Leave the loop normally.
    Stop,
    /// Leave the loop and propagate `Break` to the enclosing command.
    Unwind,
}

/// Examines the pending `break`, `continue`, `return` or `exit` after part
/// of a loop has been executed.
///
/// A `break` or `continue` aimed at this loop is consumed.
fn loop_control(frame: &mut Frame) -> Iteration {
    if frame.exit.is_some() || frame.fn_abort {
        return Iteration::Unwind;
    }
    match frame.loop_abort {
        None => Iteration::Continue,
        Some(abort) if abort.dest_depth < frame.loop_depth => Iteration::Unwind,
        Some(abort) => {
            frame.loop_abort = None;
            if abort.next {
                Iteration::Continue
            } else {
                Iteration::Stop
            }
        }
    }
}

/// Executes `f` with `loop_depth` incremented.
fn in_loop<F>(frame: &mut Frame, f: F) -> Result
where
    F: FnOnce(&mut Frame) -> Result,
{
    frame.loop_depth += 1;
    let result = f(frame);
    frame.loop_depth -= 1;
    result
}

mod case;
mod for_loop;
mod r#if;
mod subshell;
mod while_loop;

/// Executes the compound command form.
///
/// The redirections are performed, if any, before executing the command
/// body, and undone after it. Redirection errors are subject to the
/// `errexit` option.
pub(super) fn execute_form(form: &syntax::Form, frame: &mut Frame) -> Result {
    let guard = &mut RedirGuard::new(frame);
    if let Err(error) = guard.perform_redirs(&form.redirs) {
        error.handle(guard)?;
        return apply_errexit(guard);
    }
    match &form.body {
        Some(body) => body.execute(guard),
        None => Continue(()),
    }
}

/// Executes the compound command.
///
/// # Grouping
///
/// A grouping is executed by running the contained chunk.
///
/// # Subshell
///
/// A subshell is executed by running the contained chunk in a
/// [subshell](Frame::subshell).
///
/// # For loop
///
/// The values are expanded, or the positional parameters are used if they
/// are omitted. The body is executed once for each value with the variable
/// assigned the value.
///
/// # While and until loops
///
/// The condition is executed, and if it succeeds (`while`) or fails
/// (`until`), the body is executed. This is repeated until the condition
/// gives the other result.
///
/// # If conditional construct
///
/// The conditions are executed in order until one succeeds, and then the
/// corresponding body is executed. If none succeeds, the `else` clause, if
/// any, is executed.
///
/// # Case conditional construct
///
/// The subject word is expanded and matched against the patterns of each
/// item in order. The body of the first item with a matching pattern is
/// executed.
///
/// # Exit status
///
/// A loop whose body is never executed, an `if` without a matching clause
/// and a `case` without a matching item yield an exit status of zero.
/// Otherwise, the exit status is that of the last command executed.
impl Command for syntax::CompoundCommand {
    fn execute(&self, frame: &mut Frame) -> Result {
        match &self.kind {
            CompoundKind::Grouping(chunk) => chunk.execute(frame),
            CompoundKind::Subshell(chunk) => subshell::execute(frame, chunk),
            CompoundKind::For { name, values, body } => {
                for_loop::execute(frame, name, values.as_deref(), body)
            }
            CompoundKind::While { condition, body } => {
                while_loop::execute_while(frame, condition, body)
            }
            CompoundKind::Until { condition, body } => {
                while_loop::execute_until(frame, condition, body)
            }
            CompoundKind::If { branches, r#else } => r#if::execute(frame, branches, r#else.as_ref()),
            CompoundKind::Case { subject, items } => case::execute(frame, subject, items),
        }
    }
}

/// Converts an [`Iteration::Unwind`] into `Break`.
fn unwind(iteration: Iteration) -> Result {
    match iteration {
        Iteration::Unwind => Break(()),
        Iteration::Continue | Iteration::Stop => Continue(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::capture_stderr;
    use crate::tests::capture_stdout;
    use crate::tests::frame_with_echo;
    use crate::tests::parse;
    use crate::tests::read_all;
    use brine_env::option;
    use brine_env::option::State::On;
    use brine_env::semantics::ExitStatus;
    use brine_env::semantics::LoopAbort;

    #[test]
    fn loop_control_without_abort() {
        let mut frame = Frame::new();
        frame.loop_depth = 1;
        assert_eq!(loop_control(&mut frame), Iteration::Continue);
    }

    #[test]
    fn loop_control_consumes_own_abort() {
        let mut frame = Frame::new();
        frame.loop_depth = 2;
        frame.loop_abort = Some(LoopAbort {
            dest_depth: 2,
            next: false,
        });
        assert_eq!(loop_control(&mut frame), Iteration::Stop);
        assert_eq!(frame.loop_abort, None);

        frame.loop_abort = Some(LoopAbort {
            dest_depth: 2,
            next: true,
        });
        assert_eq!(loop_control(&mut frame), Iteration::Continue);
        assert_eq!(frame.loop_abort, None);
    }

    #[test]
    fn loop_control_propagates_outer_abort() {
        let mut frame = Frame::new();
        frame.loop_depth = 3;
        let abort = LoopAbort {
            dest_depth: 1,
            next: false,
        };
        frame.loop_abort = Some(abort);
        assert_eq!(loop_control(&mut frame), Iteration::Unwind);
        assert_eq!(frame.loop_abort, Some(abort));
    }

    #[test]
    fn loop_control_on_return() {
        let mut frame = Frame::new();
        frame.loop_depth = 1;
        frame.fn_abort = true;
        assert_eq!(loop_control(&mut frame), Iteration::Unwind);
    }

    #[test]
    fn grouping_runs_in_current_frame() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let _ = parse("{ x=1; echo $x; }").execute(&mut frame);
        assert_eq!(frame.variables.value("x"), Some("1"));
        assert_eq!(read_all(&stdout), "1\n");
    }

    #[test]
    fn redirections_apply_to_whole_compound_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut frame = frame_with_echo();
        frame.cwd = dir.path().to_owned();
        let stdout = capture_stdout(&mut frame);
        let _ = parse("{ echo a; echo b; } >out; echo c").execute(&mut frame);
        let content = std::fs::read_to_string(dir.path().join("out")).unwrap();
        assert_eq!(content, "a\nb\n");
        assert_eq!(read_all(&stdout), "c\n");
    }

    #[test]
    fn redirection_error_on_compound_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut frame = frame_with_echo();
        frame.cwd = dir.path().to_owned();
        let stdout = capture_stdout(&mut frame);
        let _stderr = capture_stderr(&mut frame);
        frame.options.set(option::ErrExit, On);
        let result = parse("{ echo a; } <missing").execute(&mut frame);
        assert_eq!(result, Break(()));
        assert_eq!(frame.exit, Some(ExitStatus::REDIRECTION_ERROR));
        assert_eq!(read_all(&stdout), "");
    }
}
