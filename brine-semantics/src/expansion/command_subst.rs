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

//! Command substitution

use super::Env;
use super::Result;
use crate::command::Command as _;
use crate::trap::run_exit_trap;
use brine_env::io::STDOUT;
use brine_env::semantics::ExitStatus;
use brine_syntax::syntax::Chunk;
use std::io::Read as _;
use std::sync::Arc;

/// Runs the command and returns its standard output.
///
/// The command runs in a subshell whose standard output is a pipe. The
/// output is read in this thread while the subshell runs in another.
/// Trailing newlines are removed from the result. The exit status of the
/// subshell is recorded in the environment.
pub fn run(env: &mut Env<'_>, chunk: &Chunk) -> Result<String> {
    let (mut reader, writer) = crate::pipe()?;
    let mut subshell = env.frame.subshell();
    subshell.fds.set(STDOUT, Some(Arc::new(writer)));

    let (output, status) = std::thread::scope(|scope| {
        let runner = scope.spawn(move || {
            let _ = chunk.execute(&mut subshell);
            run_exit_trap(&mut subshell);
            subshell.exit.unwrap_or(subshell.last_status)
        });
        let mut output = Vec::new();
        let read = reader.read_to_end(&mut output);
        let status = runner.join().unwrap_or(ExitStatus::SHELL_BUG);
        (read.map(|_| output), status)
    });
    env.last_command_subst_status = Some(status);

    let mut output = String::from_utf8(output?)
        .unwrap_or_else(|error| String::from_utf8_lossy(error.as_bytes()).into_owned());
    let len = output.trim_end_matches('\n').len();
    output.truncate(len);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::frame_with_echo;
    use crate::tests::parse;

    #[test]
    fn output_without_trailing_newlines() {
        let mut frame = frame_with_echo();
        let mut env = Env::new(&mut frame);
        let chunk = parse("echo a; echo; echo b; echo; echo");
        assert_eq!(run(&mut env, &chunk).unwrap(), "a\n\nb");
        assert_eq!(env.last_command_subst_status, Some(ExitStatus::SUCCESS));
    }

    #[test]
    fn subshell_does_not_affect_frame() {
        let mut frame = frame_with_echo();
        let mut env = Env::new(&mut frame);
        let chunk = parse("x=1; echo $x");
        assert_eq!(run(&mut env, &chunk).unwrap(), "1");
        assert_eq!(frame.variables.value("x"), None);
    }

    #[test]
    fn exit_status_is_recorded() {
        let mut frame = frame_with_echo();
        let mut env = Env::new(&mut frame);
        let chunk = parse("echo x; return -n 5");
        assert_eq!(run(&mut env, &chunk).unwrap(), "x");
        assert_eq!(env.last_command_subst_status, Some(ExitStatus(5)));
    }
}
