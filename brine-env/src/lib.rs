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

//! This crate defines the shell execution environment.
//!
//! A shell execution environment, [`Frame`], is a collection of data that may
//! affect or be affected by the execution of commands: [variable]s,
//! [function]s, [alias]es, open files, the working directory, [option]s and
//! the state of control flow. A subshell gets a clone of the frame, so
//! nothing it changes is visible to the parent.
//!
//! The frame does not own process-wide state. The working directory is kept
//! in the frame and passed to child processes, and file descriptors are
//! looked up in the frame's [`FdTable`].

pub mod alias;
pub mod builtin;
pub mod function;
pub mod io;
pub mod option;
pub mod semantics;
pub mod trap;
pub mod variable;

use self::alias::AliasSet;
use self::builtin::Builtin;
use self::function::FunctionSet;
use self::io::FdTable;
use self::io::STDERR;
use self::io::STDOUT;
use self::option::OptionSet;
use self::semantics::ExitStatus;
use self::semantics::LoopAbort;
use self::trap::TrapSet;
use self::variable::AssignError;
use self::variable::IFS;
use self::variable::IFS_INITIAL_VALUE;
use self::variable::PWD;
use self::variable::VariableSet;
use nix::sys::signal::Signal;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

/// Whole shell execution environment.
///
/// # Cloning
///
/// `Frame::clone` copies everything. The open files in the [`FdTable`] are
/// shared by reference counting, so a clone writes to the same files. Use
/// [`subshell`](Self::subshell) to create the environment of a subshell.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Name used in error messages
    pub shell_name: String,

    /// Positional parameters, including `$0` at index 0
    pub arguments: Vec<String>,

    /// Variables defined in the environment.
    pub variables: VariableSet,

    /// Functions defined in the environment.
    pub functions: FunctionSet,

    /// Aliases defined in the environment.
    pub aliases: AliasSet,

    /// Built-in utilities available in the environment.
    pub builtins: HashMap<&'static str, Builtin>,

    /// Open files
    pub fds: FdTable,

    /// Working directory
    pub cwd: PathBuf,

    /// Shell options
    pub options: OptionSet,

    /// Exit status of the last executed pipeline, the value of `$?`
    pub last_status: ExitStatus,

    /// Number of loops the command being executed is nested in
    pub loop_depth: usize,

    /// Pending `break` or `continue`
    pub loop_abort: Option<LoopAbort>,

    /// Number of function calls and dot scripts being executed
    pub return_depth: usize,

    /// Whether `return` has been executed and the function or dot script
    /// should stop
    pub fn_abort: bool,

    /// Set when the shell should exit with the status
    pub exit: Option<ExitStatus>,

    /// Number of conditions being evaluated, in which `errexit` is ignored
    pub condition_depth: usize,

    /// Trap actions
    pub traps: TrapSet,

    /// Set by `exec` to keep the redirections of the current command in
    /// effect after the command
    pub retain_redirs: bool,

    /// Process ID of the shell, the value of `$$`
    pub pid: i32,

    /// Whether this frame runs a command of a pipeline other than the last
    ///
    /// Such a frame stops once the reader of its standard output has gone.
    pub pipe_stage: bool,
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            shell_name: "brine".to_owned(),
            arguments: vec!["brine".to_owned()],
            variables: VariableSet::new(),
            functions: FunctionSet::new(),
            aliases: AliasSet::new(),
            builtins: HashMap::new(),
            fds: FdTable::new(),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
            options: OptionSet::default(),
            last_status: ExitStatus::SUCCESS,
            loop_depth: 0,
            loop_abort: None,
            return_depth: 0,
            fn_abort: false,
            exit: None,
            condition_depth: 0,
            traps: TrapSet::default(),
            retain_redirs: false,
            pid: std::process::id() as i32,
            pipe_stage: false,
        }
    }
}

impl Frame {
    /// Creates an environment with no variables and no open files.
    #[must_use]
    pub fn new() -> Frame {
        Frame::default()
    }

    /// Creates an environment initialized from the process.
    ///
    /// The variables are imported from the process environment and
    /// exported, `PWD` is set to the working directory, and the standard
    /// input, output and error are opened in the file descriptor table.
    /// `arguments[0]` becomes the shell name.
    #[must_use]
    pub fn from_process(arguments: Vec<String>) -> Frame {
        let mut frame = Frame::new();
        if let Some(name) = arguments.first() {
            frame.shell_name.clone_from(name);
            frame.arguments = arguments;
        }
        frame.variables.extend_env(std::env::vars_os().map(|(name, value)| {
            (
                name.to_string_lossy().into_owned(),
                value.to_string_lossy().into_owned(),
            )
        }));
        let pwd = frame.cwd.to_string_lossy().into_owned();
        frame.variables.extend_env([(PWD, pwd)]);
        frame.fds = FdTable::from_stdio();
        frame
    }

    /// Creates the environment of a subshell.
    ///
    /// The subshell gets a copy of everything except the traps, which are
    /// reset to their defaults unless ignored.
    #[must_use]
    pub fn subshell(&self) -> Frame {
        let mut frame = self.clone();
        frame.traps.enter_subshell();
        frame
    }

    /// Whether the command being executed should be abandoned because of a
    /// pending `break`, `continue`, `return` or `exit`.
    #[must_use]
    pub fn should_unwind(&self) -> bool {
        self.loop_abort.is_some() || self.fn_abort || self.exit.is_some()
    }

    /// Makes a pipeline stage exit once the reader of its standard output has
    /// gone.
    ///
    /// The shell ignores `SIGPIPE`, so a stage is not killed by writing to a
    /// broken pipe. This function sets [`exit`](Self::exit) to the status of
    /// a process killed by the signal instead. Returns true if it did so.
    pub fn stop_on_broken_pipe(&mut self) -> bool {
        if !self.pipe_stage || self.exit.is_some() || !self.fds.is_broken_pipe(STDOUT) {
            return false;
        }
        log::debug!("standard output of a pipeline stage has no reader");
        self.last_status = ExitStatus::from(Signal::SIGPIPE);
        self.exit = Some(self.last_status);
        true
    }

    /// Returns the value of `IFS`, or the default if unset.
    #[must_use]
    pub fn ifs(&self) -> &str {
        self.variables.value(IFS).unwrap_or(IFS_INITIAL_VALUE)
    }

    /// Assigns a variable, exporting it if the `allexport` option is on.
    pub fn assign_variable(&mut self, name: &str, value: String) -> Result<(), AssignError> {
        self.variables.assign(name, value)?;
        if self.options.is_on(option::AllExport) {
            self.variables.export(name, true);
        }
        Ok(())
    }

    /// Resolves a path relative to the working directory.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }

    /// Writes a string to the standard output.
    pub fn print(&self, text: &str) -> std::io::Result<()> {
        self.fds.write_all(STDOUT, text.as_bytes())
    }

    /// Writes an error message to the standard error.
    ///
    /// The message is prefixed with the shell name and followed by a
    /// newline. Errors in writing are ignored.
    pub fn print_error(&self, message: &str) {
        let line = format!("{}: {message}\n", self.shell_name);
        if let Err(error) = self.fds.write_all(STDERR, line.as_bytes()) {
            log::warn!("cannot print error message: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::io::Seek;
    use std::sync::Arc;

    #[test]
    fn from_process_imports_environment() {
        let frame = Frame::from_process(vec!["sh".into(), "a".into()]);
        assert_eq!(frame.shell_name, "sh");
        assert_eq!(frame.arguments, ["sh", "a"]);
        let pwd = frame.variables.get(PWD).unwrap();
        assert!(pwd.is_exported);
        assert_eq!(pwd.value.as_deref(), frame.cwd.to_str());
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(frame.variables.value("PATH"), Some(path.as_str()));
        }
    }

    #[test]
    fn subshell_resets_traps() {
        let mut frame = Frame::new();
        frame.traps.set(trap::Condition::Exit, trap::Action::Command("x".into()));
        frame.variables.assign("v", "1").unwrap();
        let sub = frame.subshell();
        assert_eq!(sub.traps.iter().count(), 0);
        assert_eq!(sub.variables.value("v"), Some("1"));
    }

    #[test]
    fn ifs_default() {
        let mut frame = Frame::new();
        assert_eq!(frame.ifs(), " \t\n");
        frame.variables.assign(IFS, ":").unwrap();
        assert_eq!(frame.ifs(), ":");
    }

    #[test]
    fn allexport_exports_assigned_variables() {
        let mut frame = Frame::new();
        frame.options.set(option::AllExport, option::On);
        frame.assign_variable("x", "1".into()).unwrap();
        assert!(frame.variables.get("x").unwrap().is_exported);
    }

    #[test]
    fn broken_pipe_stops_only_pipeline_stages() {
        let (reader, writer) = nix::unistd::pipe().unwrap();
        let mut frame = Frame::new();
        frame.fds.set(STDOUT, Some(Arc::new(std::fs::File::from(writer))));
        drop(reader);
        assert!(!frame.stop_on_broken_pipe());
        assert_eq!(frame.exit, None);

        frame.pipe_stage = true;
        assert!(frame.stop_on_broken_pipe());
        assert_eq!(frame.exit, Some(ExitStatus(141)));
        assert_eq!(frame.last_status, ExitStatus(141));
        assert!(!frame.stop_on_broken_pipe());
    }

    #[test]
    fn print_error_goes_to_fd_2() {
        let mut frame = Frame::new();
        let file = Arc::new(tempfile::tempfile().unwrap());
        frame.fds.set(STDERR, Some(file.clone()));
        frame.print_error("oops");
        let mut content = String::new();
        (&*file).rewind().unwrap();
        (&*file).read_to_string(&mut content).unwrap();
        assert_eq!(content, "brine: oops\n");
    }
}
