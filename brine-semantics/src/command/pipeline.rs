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

//! Implementation of pipeline semantics.

use super::Command;
use super::apply_errexit;
use super::in_condition;
use crate::Result;
use crate::trap::run_exit_trap;
use brine_env::Frame;
use brine_env::io::STDIN;
use brine_env::io::STDOUT;
use brine_env::semantics::ExitStatus;
use brine_syntax::syntax;
use std::fs::File;
use std::ops::ControlFlow::Continue;
use std::sync::Arc;

/// Executes the pipeline.
///
/// # Executing commands
///
/// If this pipeline contains one command, it is executed in the current shell
/// execution environment.
///
/// If the pipeline has more than one command, all the commands are executed
/// concurrently. The standard output of a command is connected to the
/// standard input of the next command via a pipe. The commands except for
/// the last are executed in subshells, each on its own thread. The last
/// command is executed in the current environment, so the effects it has on
/// the environment remain after the pipeline. The pipeline waits for all the
/// commands to finish. A command other than the last stops once the
/// command reading its output has finished, as if killed by `SIGPIPE`.
///
/// # Exit status
///
/// The exit status of the pipeline is that of the last command. If the
/// pipeline starts with an `!`, the exit status is inverted: zero becomes
/// one, and non-zero becomes zero. The status is not inverted if the
/// pipeline is abandoned as in `! return 42`.
///
/// A negated pipeline is executed as a condition, so the `errexit` option
/// does not apply to it.
impl Command for syntax::Pipeline {
    fn execute(&self, frame: &mut Frame) -> Result {
        if !self.negation {
            return execute_forms(frame, &self.forms);
        }

        in_condition(frame, |frame| execute_forms(frame, &self.forms))?;
        frame.last_status = if frame.last_status.is_successful() {
            ExitStatus::FAILURE
        } else {
            ExitStatus::SUCCESS
        };
        Continue(())
    }
}

fn execute_forms(frame: &mut Frame, forms: &[syntax::Form]) -> Result {
    match forms {
        [] => {
            frame.last_status = ExitStatus::SUCCESS;
            Continue(())
        }
        [form] => form.execute(frame),
        _ => {
            execute_multi_form_pipeline(frame, forms)?;
            apply_errexit(frame)
        }
    }
}

fn execute_multi_form_pipeline(frame: &mut Frame, forms: &[syntax::Form]) -> Result {
    let Some((last, rest)) = forms.split_last() else {
        return Continue(());
    };

    let mut pipes = Vec::with_capacity(rest.len());
    for _ in rest {
        match crate::pipe() {
            Ok(pipe) => pipes.push(pipe),
            Err(error) => {
                frame.print_error(&format!("cannot create a pipe: {error}"));
                frame.last_status = ExitStatus::PIPE_ERROR;
                return Continue(());
            }
        }
    }

    std::thread::scope(|scope| {
        let mut input: Option<File> = None;
        for (form, (reader, writer)) in rest.iter().zip(pipes) {
            let mut sub = frame.subshell();
            sub.pipe_stage = true;
            if let Some(input) = input.take() {
                sub.fds.set(STDIN, Some(Arc::new(input)));
            }
            sub.fds.set(STDOUT, Some(Arc::new(writer)));
            scope.spawn(move || {
                let _ = form.execute(&mut sub);
                run_exit_trap(&mut sub);
                // The pipe ends are closed here as `sub` is dropped.
            });
            input = Some(reader);
        }

        let saved = frame.fds.set(STDIN, input.map(Arc::new));
        let result = last.execute(frame);
        frame.fds.set(STDIN, saved);
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::capture_stdout;
    use crate::tests::frame_with_echo;
    use crate::tests::parse;
    use crate::tests::read_all;
    use brine_env::option;
    use brine_env::option::State::On;
    use std::ops::ControlFlow::Break;

    #[test]
    fn single_form_runs_in_current_frame() {
        let mut frame = frame_with_echo();
        let _ = parse("x=1").execute(&mut frame);
        assert_eq!(frame.variables.value("x"), Some("1"));
    }

    #[test]
    fn two_forms_are_connected() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let result = parse("echo hello | cat").execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(frame.last_status, ExitStatus::SUCCESS);
        assert_eq!(read_all(&stdout), "hello\n");
    }

    #[test]
    fn three_forms_are_connected() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let _ = parse("echo hello | cat | cat").execute(&mut frame);
        assert_eq!(read_all(&stdout), "hello\n");
    }

    #[test]
    fn status_is_that_of_last_form() {
        let mut frame = frame_with_echo();
        let _stdout = capture_stdout(&mut frame);
        let _ = parse("return -n 3 | return -n 5").execute(&mut frame);
        assert_eq!(frame.last_status, ExitStatus(5));
        let _ = parse("return -n 3 | echo").execute(&mut frame);
        assert_eq!(frame.last_status, ExitStatus::SUCCESS);
    }

    #[test]
    fn earlier_forms_run_in_subshells() {
        let mut frame = frame_with_echo();
        let _ = parse("x=1 | y=2").execute(&mut frame);
        assert_eq!(frame.variables.value("x"), None);
        assert_eq!(frame.variables.value("y"), Some("2"));
    }

    #[test]
    fn endless_stage_stops_when_reader_is_gone() {
        let mut frame = frame_with_echo();
        let result = parse("while return -n 0; do echo y; done | return -n 3").execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(frame.last_status, ExitStatus(3));
        assert_eq!(frame.exit, None);
        assert!(!frame.pipe_stage);
    }

    #[test]
    fn stdin_is_restored_after_pipeline() {
        let mut frame = frame_with_echo();
        let _ = parse("echo | cat").execute(&mut frame);
        assert!(frame.fds.get(STDIN).is_none());
    }

    #[test]
    fn negation_inverts_status() {
        let mut frame = frame_with_echo();
        let _stdout = capture_stdout(&mut frame);
        let _ = parse("! echo").execute(&mut frame);
        assert_eq!(frame.last_status, ExitStatus::FAILURE);
        let _ = parse("! return -n 7").execute(&mut frame);
        assert_eq!(frame.last_status, ExitStatus::SUCCESS);
    }

    #[test]
    fn negation_is_not_applied_on_break() {
        let mut frame = frame_with_echo();
        let result = parse("! return 4").execute(&mut frame);
        assert_eq!(result, Break(()));
        assert_eq!(frame.last_status, ExitStatus(4));
    }

    #[test]
    fn negated_pipeline_is_exempt_from_errexit() {
        let mut frame = frame_with_echo();
        let _stdout = capture_stdout(&mut frame);
        frame.options.set(option::ErrExit, On);
        let result = parse("! echo").execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(frame.exit, None);
    }

    #[test]
    fn errexit_applies_to_multi_form_pipeline() {
        let mut frame = frame_with_echo();
        frame.options.set(option::ErrExit, On);
        let result = parse("echo | return -n 6").execute(&mut frame);
        assert_eq!(result, Break(()));
        assert_eq!(frame.exit, Some(ExitStatus(6)));
    }
}
