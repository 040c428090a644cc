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

//! Implementation of the simple command semantics.
//!
//! This module exports some utility functions that are used in implementing
//! the simple command semantics and can be used in other modules, notably
//! the `command` and `exec` built-ins. For the execution of simple commands,
//! see [`execute`].

use super::apply_errexit;
use crate::Handle;
use crate::Result;
use crate::alias::substitute;
use crate::assign::SavedVariables;
use crate::assign::perform_assignments;
use crate::command_search::Target;
use crate::command_search::search;
use crate::expansion::Env;
use crate::expansion::expand_words;
use crate::redir::RedirGuard;
use crate::xtrace::XTrace;
use brine_env::Frame;
use brine_syntax::syntax::Assign;
use brine_syntax::syntax::Form;
use brine_syntax::syntax::Redir;
use std::ops::ControlFlow::{Break, Continue};

/// Executes the simple command.
///
/// # Outline
///
/// The execution starts with [alias substitution](crate::alias) and the
/// [expansion](crate::expansion) of the command words. Next, the
/// [command search](crate::command_search) is performed to find an
/// execution [target](Target) named by the first field of the expansion
/// results. The target type defines how the target is executed. After the
/// execution, the `errexit` option is [applied](apply_errexit).
///
/// # Target types and their semantics
///
/// ## Absent target
///
/// If no fields resulted from the expansion, there is no target. The
/// redirections are performed and undone immediately, and the assignments
/// are performed in the current environment. If the words, redirections or
/// assignments contain command substitutions, the exit status of the simple
/// command is taken from that of the last executed command substitution.
/// Otherwise, the exit status will be zero.
///
/// ## Built-in
///
/// The redirections are performed first. For a special built-in, the
/// assignments are performed in the current environment and persist after
/// the command. For a regular built-in, the assignments are exported and
/// undone after the command. Lastly, the built-in is called with the
/// remaining fields passed as arguments.
///
/// ## Function
///
/// The redirections and assignments are performed in the same way as a
/// regular built-in. The fields become the positional parameters of the
/// function, the first field being `$0`, and the function body is executed.
///
/// ## External utility
///
/// The redirections and assignments are performed in the same way as a
/// regular built-in. A child process is started with the exported variables
/// as its environment and the open files of the frame as its file
/// descriptors, and the shell waits for it to finish.
///
/// ## Target not found
///
/// If the command search could not find a valid target, the redirections and
/// assignments are performed, an error message is printed, and the exit
/// status is [`NOT_FOUND`](brine_env::semantics::ExitStatus::NOT_FOUND).
///
/// # Errors
///
/// If there is an error during the expansion, redirections or assignments,
/// the execution aborts with a non-zero exit status after printing an error
/// message to the standard error. If this happens for a special built-in,
/// the shell exits.
pub fn execute(form: &Form, frame: &mut Frame) -> Result {
    let words = substitute(&frame.aliases, &form.words);
    let mut env = Env::new(frame);
    let fields = match expand_words(&mut env, &words) {
        Ok(fields) => fields,
        Err(error) => return error.handle(env.frame),
    };
    let exit_status = env.last_command_subst_status;

    use Target::{Builtin, External, Function};
    match fields.first().map(|name| search(frame, name)) {
        None => absent::execute(
            frame,
            &form.assigns,
            &form.redirs,
            exit_status.unwrap_or_default(),
        ),
        Some(Some(Builtin(builtin))) => {
            builtin::execute(frame, builtin, &form.assigns, fields, &form.redirs)
        }
        Some(Some(Function(function))) => {
            function::execute(frame, &function, &form.assigns, fields, &form.redirs)
        }
        Some(Some(External { path })) => {
            external::execute(frame, Some(&path), &form.assigns, fields, &form.redirs)
        }
        Some(None) => external::execute(frame, None, &form.assigns, fields, &form.redirs),
    }?;

    if frame.stop_on_broken_pipe() {
        return Break(());
    }
    apply_errexit(frame)
}

/// Executes a target found by the command search.
///
/// This function runs the target as a simple command without assignments
/// and redirections. `fields` must not be empty; the first field is the
/// command name. `None` is treated as a target that was not found.
pub fn execute_target(frame: &mut Frame, target: Option<Target>, fields: Vec<String>) -> Result {
    match target {
        Some(Target::Builtin(builtin)) => builtin::execute(frame, builtin, &[], fields, &[]),
        Some(Target::Function(function)) => execute_function_body(frame, &function, fields),
        Some(Target::External { path }) => {
            frame.last_status = run_external_utility(frame, &path, &fields);
            Continue(())
        }
        None => {
            frame.last_status = not_found(frame, &fields);
            Continue(())
        }
    }
}

/// Prepares the environment for a command that is not a special built-in.
///
/// The redirections are performed on the guard, and the assignments are
/// performed and exported after saving the variables they modify. The
/// `xtrace` trace, if any, is printed. On error, the error is handled and
/// the result of handling is returned as `Err`.
fn prepare_temporary(
    guard: &mut RedirGuard<'_>,
    assigns: &[Assign],
    fields: &[String],
    redirs: &[Redir],
) -> std::result::Result<SavedVariables, Result> {
    if let Err(error) = guard.perform_redirs(redirs) {
        return Err(error.handle(guard));
    }

    let mut xtrace = XTrace::from_frame(guard);
    let saved = SavedVariables::save(guard, assigns);
    let mut env = Env::new(guard);
    if let Err(error) = perform_assignments(&mut env, assigns, true, xtrace.as_mut()) {
        let result = error.handle(guard);
        saved.restore(guard);
        return Err(result);
    }

    if let Some(mut xtrace) = xtrace {
        xtrace.push_fields(fields);
        xtrace.finish(guard);
    }
    Ok(saved)
}

/// Converts the state of the frame into a result.
fn unwind_result(frame: &Frame) -> Result {
    if frame.should_unwind() {
        Break(())
    } else {
        Continue(())
    }
}

mod absent;

mod builtin;

mod function;
pub use function::execute_function_body;

mod external;
pub use external::not_found;
pub use external::run_external_utility;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command as _;
    use crate::tests::capture_stderr;
    use crate::tests::capture_stdout;
    use crate::tests::frame_with_echo;
    use crate::tests::parse;
    use crate::tests::read_all;
    use brine_env::alias::define;
    use brine_env::option;
    use brine_env::option::State::On;
    use brine_env::semantics::ExitStatus;

    #[test]
    fn errexit_on_simple_command() {
        let mut frame = frame_with_echo();
        frame.options.set(option::ErrExit, On);
        let result = parse("return -n 93").execute(&mut frame);
        assert_eq!(result, Break(()));
        assert_eq!(frame.exit, Some(ExitStatus(93)));
    }

    #[test]
    fn fields_are_expanded() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        frame.variables.assign("x", "a  b").unwrap();
        let _ = parse("echo $x \"$x\"").execute(&mut frame);
        assert_eq!(read_all(&stdout), "a b a  b\n");
    }

    #[test]
    fn expansion_error_aborts_command() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let stderr = capture_stderr(&mut frame);
        let _ = parse("echo $((1/0))").execute(&mut frame);
        assert_eq!(frame.last_status, ExitStatus::EXPANSION_ERROR);
        assert_eq!(read_all(&stdout), "");
        assert_ne!(read_all(&stderr), "");
    }

    #[test]
    fn alias_is_substituted() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        define(&mut frame.aliases, "greet".into(), "echo hello".into()).unwrap();
        let _ = parse("greet world").execute(&mut frame);
        assert_eq!(read_all(&stdout), "hello world\n");
    }

    #[test]
    fn command_not_found() {
        let mut frame = frame_with_echo();
        let stderr = capture_stderr(&mut frame);
        frame.variables.assign("PATH", "").unwrap();
        let _ = parse("no_such_command_xyz").execute(&mut frame);
        assert_eq!(frame.last_status, ExitStatus::NOT_FOUND);
        assert_eq!(
            read_all(&stderr),
            "brine: no_such_command_xyz: command not found\n"
        );
    }

    #[test]
    fn xtrace_prints_assignments_and_fields() {
        let mut frame = frame_with_echo();
        let _stdout = capture_stdout(&mut frame);
        let stderr = capture_stderr(&mut frame);
        frame.options.set(option::XTrace, On);
        let _ = parse("a=1 echo 'x y'").execute(&mut frame);
        assert_eq!(read_all(&stderr), "+ a=1 echo 'x y'\n");
    }

    #[test]
    fn execute_target_runs_builtin() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let target = search(&frame, "echo");
        let result = execute_target(&mut frame, target, vec!["echo".into(), "hi".into()]);
        assert_eq!(result, Continue(()));
        assert_eq!(read_all(&stdout), "hi\n");
    }
}
