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

//! Trap built-in
//!
//! The **`trap`** built-in sets or prints traps.
//!
//! # Synopsis
//!
//! ```sh
//! trap [action condition...]
//! ```
//!
//! ```sh
//! trap
//! ```
//!
//! # Description
//!
//! With operands, the built-in sets the *action* for each *condition*. The
//! action is one of:
//!
//! - `-`: resets the condition to the default behavior.
//! - An empty string: ignores the condition.
//! - Any other string: runs the string as a command when the condition
//!   occurs.
//!
//! If the first operand is a non-negative decimal integer, all operands are
//! conditions that are reset to the default.
//!
//! A condition is `EXIT` (or `0`), or a signal name with or without the
//! `SIG` prefix, or a signal number. The `EXIT` action runs when the shell
//! exits. Actions for signals are recorded and printed, but the shell does
//! not catch signals.
//!
//! Without operands, the built-in prints the current traps as commands that
//! would restore them.
//!
//! # Errors
//!
//! An unknown condition is reported and the other conditions are still
//! processed. The `KILL` and `STOP` signals cannot be trapped.
//!
//! # Exit status
//!
//! Zero if all conditions were set, one otherwise.

use crate::common::getopt;
use crate::common::output;
use crate::common::report_special_error;
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use brine_env::trap::{Action, Condition, Signal};
use std::fmt::Write as _;
use std::ops::ControlFlow::Continue;
use yash_quote::quoted;

fn print_traps(frame: &Frame) -> Result {
    let mut text = String::new();
    for (condition, action) in frame.traps.iter() {
        let command = match action {
            Action::Default => continue,
            Action::Ignore => "",
            Action::Command(command) => command,
        };
        let _ = writeln!(text, "trap -- {} {condition}", quoted(command));
    }
    output(frame, "trap", &text)
}

/// Parses the action operand.
#[must_use]
pub fn parse_action(operand: &str) -> Action {
    match operand {
        "-" => Action::Default,
        "" => Action::Ignore,
        command => Action::Command(command.to_owned()),
    }
}

/// Entry point for executing the `trap` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let operands = match getopt(args, "") {
        Ok((_, operands)) => operands,
        Err(error) => return report_special_error(frame, "trap", error),
    };
    let Some((first, rest)) = operands.split_first() else {
        return print_traps(frame);
    };

    let (action, conditions) = if !first.is_empty() && first.bytes().all(|b| b.is_ascii_digit()) {
        (Action::Default, operands.as_slice())
    } else {
        (parse_action(first), rest)
    };
    if conditions.is_empty() {
        return report_special_error(frame, "trap", "the condition operand is missing");
    }

    let mut status = ExitStatus::SUCCESS;
    for operand in conditions {
        match operand.parse::<Condition>() {
            Ok(Condition::Signal(signal @ (Signal::SIGKILL | Signal::SIGSTOP))) => {
                frame.print_error(&format!("trap: {signal} cannot be trapped"));
                status = ExitStatus::FAILURE;
            }
            Ok(condition) => frame.traps.set(condition, action.clone()),
            Err(error) => {
                frame.print_error(&format!("trap: {error}"));
                status = ExitStatus::FAILURE;
            }
        }
    }
    (status, Continue(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{args, capture_stderr, capture_stdout, frame, read_all};
    use brine_semantics::Evaler;

    #[test]
    fn setting_and_printing_traps() {
        let mut frame = frame();
        let result = main(&mut frame, args(&["echo bye", "EXIT", "INT"]));
        assert_eq!(result, (ExitStatus::SUCCESS, Continue(())));
        main(&mut frame, args(&["", "SIGTERM"]));
        assert_eq!(
            frame.traps.get(Condition::Exit),
            &Action::Command("echo bye".to_owned())
        );

        let stdout = capture_stdout(&mut frame);
        main(&mut frame, vec![]);
        assert_eq!(
            read_all(&stdout),
            "trap -- 'echo bye' EXIT\ntrap -- 'echo bye' INT\ntrap -- '' TERM\n"
        );
    }

    #[test]
    fn resetting_traps() {
        let mut frame = frame();
        main(&mut frame, args(&["x=1", "EXIT", "HUP"]));
        main(&mut frame, args(&["-", "EXIT"]));
        assert_eq!(frame.traps.get(Condition::Exit), &Action::Default);
        main(&mut frame, args(&["1"]));
        assert_eq!(
            frame.traps.get(Condition::Signal(Signal::SIGHUP)),
            &Action::Default
        );
    }

    #[test]
    fn invalid_condition() {
        let mut frame = frame();
        let stderr = capture_stderr(&mut frame);
        let result = main(&mut frame, args(&["", "FOO", "KILL", "QUIT"]));
        assert_eq!(result, (ExitStatus::FAILURE, Continue(())));
        assert_eq!(
            frame.traps.get(Condition::Signal(Signal::SIGQUIT)),
            &Action::Ignore
        );
        let errors = read_all(&stderr);
        assert!(errors.contains("`FOO` is not a valid trap condition"), "{errors}");
        assert!(errors.contains("SIGKILL cannot be trapped"), "{errors}");
    }

    #[test]
    fn exit_trap_runs_at_exit() {
        let mut evaler = Evaler::new(frame());
        evaler.eval("trap 'x=trapped; exit 3' EXIT; exit 1", "test");
        assert_eq!(evaler.finish(), ExitStatus(3));
        assert_eq!(evaler.frame.variables.value("x"), Some("trapped"));
    }
}
