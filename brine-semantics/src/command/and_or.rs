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

//! Implementation of the and-or list semantics.

use super::Command;
use super::in_condition;
use crate::Result;
use brine_env::Frame;
use brine_syntax::syntax::AndOr;
use std::ops::ControlFlow::Continue;

/// Executes the and-or list.
///
/// The `&&` operator first executes the left-hand-side pipeline, and if and
/// only if the exit status is zero, executes the right-hand-side. The `||`
/// operator works similarly but runs the right-hand-side if and only if the
/// left-hand-side exit status is non-zero. The `&&` and `||` operators are
/// left-associative and have equal precedence.
///
/// The exit status of the and-or list will be that of the last executed
/// pipeline.
///
/// The pipelines except for the last are executed as conditions, so the
/// `errexit` option does not apply to them.
impl Command for AndOr {
    fn execute(&self, frame: &mut Frame) -> Result {
        let Some((last, rest)) = self.pipelines.split_last() else {
            return Continue(());
        };

        for (i, pipeline) in rest.iter().enumerate() {
            if i == 0 || should_run(frame, self.and_op[i - 1]) {
                in_condition(frame, |frame| pipeline.execute(frame))?;
            }
        }

        if rest.is_empty() || should_run(frame, self.and_op[rest.len() - 1]) {
            last.execute(frame)
        } else {
            Continue(())
        }
    }
}

fn should_run(frame: &Frame, and_then: bool) -> bool {
    frame.last_status.is_successful() == and_then
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
    use brine_env::semantics::ExitStatus;

    fn run(code: &str) -> (Frame, String) {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        let _ = parse(code).execute(&mut frame);
        let output = read_all(&stdout);
        (frame, output)
    }

    #[test]
    fn and_then_after_success() {
        let (frame, output) = run("echo a && echo b");
        assert_eq!(output, "a\nb\n");
        assert_eq!(frame.last_status, ExitStatus::SUCCESS);
    }

    #[test]
    fn and_then_after_failure() {
        let (frame, output) = run("return -n 3 && echo b");
        assert_eq!(output, "");
        assert_eq!(frame.last_status, ExitStatus(3));
    }

    #[test]
    fn or_else_after_success() {
        let (_, output) = run("echo a || echo b");
        assert_eq!(output, "a\n");
    }

    #[test]
    fn or_else_after_failure() {
        let (frame, output) = run("return -n 1 || echo b");
        assert_eq!(output, "b\n");
        assert_eq!(frame.last_status, ExitStatus::SUCCESS);
    }

    #[test]
    fn skipped_pipeline_keeps_status_for_next_operator() {
        let (_, output) = run("return -n 1 && echo a || echo b");
        assert_eq!(output, "b\n");
        let (_, output) = run("echo a || echo b && echo c");
        assert_eq!(output, "a\nc\n");
    }

    #[test]
    fn errexit_ignored_for_non_last_pipelines() {
        let mut frame = frame_with_echo();
        let stdout = capture_stdout(&mut frame);
        frame.options.set(option::ErrExit, On);
        let result = parse("return -n 1 && echo a; echo b").execute(&mut frame);
        assert_eq!(result, Continue(()));
        assert_eq!(frame.exit, None);
        assert_eq!(read_all(&stdout), "b\n");
    }
}
