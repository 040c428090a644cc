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

//! Simple command semantics for external utilities

use super::prepare_temporary;
use super::unwind_result;
use crate::Result;
use crate::redir::RedirGuard;
use brine_env::Frame;
use brine_env::io::Fd;
use brine_env::io::MIN_INTERNAL_FD;
use brine_env::io::STDERR;
use brine_env::io::STDIN;
use brine_env::io::STDOUT;
use brine_env::semantics::ExitStatus;
use brine_syntax::syntax::Assign;
use brine_syntax::syntax::Redir;
use std::fs::File;
use std::io::ErrorKind;
use std::os::fd::AsRawFd as _;
use std::os::raw::c_int;
use std::os::unix::process::CommandExt as _;
use std::path::Path;
use std::process::Command;
use std::process::Stdio;

pub fn execute(
    frame: &mut Frame,
    path: Option<&Path>,
    assigns: &[Assign],
    fields: Vec<String>,
    redirs: &[Redir],
) -> Result {
    let guard = &mut RedirGuard::new(frame);
    let saved = match prepare_temporary(guard, assigns, &fields, redirs) {
        Ok(saved) => saved,
        Err(result) => return result,
    };
    guard.last_status = match path {
        Some(path) => run_external_utility(guard, path, &fields),
        None => not_found(guard, &fields),
    };
    saved.restore(guard);
    unwind_result(guard)
}

/// Prints an error message for a command that was not found.
///
/// Returns [`ExitStatus::NOT_FOUND`].
pub fn not_found(frame: &Frame, fields: &[String]) -> ExitStatus {
    let name = fields.first().map_or("", String::as_str);
    frame.print_error(&format!("{name}: command not found"));
    ExitStatus::NOT_FOUND
}

/// Runs an external utility and waits for it to finish.
///
/// The utility is started with `fields` as its arguments, the exported
/// variables as its environment and the working directory of the frame.
/// Every open file in the frame is passed at the same file descriptor.
///
/// Returns the exit status of the utility. If the utility could not be
/// started, an error message is printed and the result is
/// [`ExitStatus::NOT_FOUND`] if the file does not exist or
/// [`ExitStatus::NOEXEC`] otherwise.
pub fn run_external_utility(frame: &Frame, path: &Path, fields: &[String]) -> ExitStatus {
    let mut command = Command::new(path);
    if let Some((arg0, args)) = fields.split_first() {
        command.arg0(arg0).args(args);
    }
    command
        .env_clear()
        .envs(frame.variables.env_vars())
        .current_dir(&frame.cwd)
        .stdin(stdio(frame, STDIN))
        .stdout(stdio(frame, STDOUT))
        .stderr(stdio(frame, STDERR));

    // The duplicates must stay open until the child has been started.
    let extra_files = extra_files(frame);
    if !extra_files.is_empty() {
        install_extra_files(&mut command, &extra_files);
    }

    log::debug!("spawning {} {:?}", path.display(), fields);
    let status = match command.spawn() {
        Ok(mut child) => match child.wait() {
            Ok(status) => ExitStatus::from(status),
            Err(error) => {
                frame.print_error(&format!("cannot wait for {}: {error}", path.display()));
                ExitStatus::WAIT_ERROR
            }
        },
        Err(error) => {
            let name = fields.first().map_or("", String::as_str);
            frame.print_error(&format!("{name}: {error}"));
            if error.kind() == ErrorKind::NotFound {
                ExitStatus::NOT_FOUND
            } else {
                ExitStatus::NOEXEC
            }
        }
    };
    drop(extra_files);
    status
}

fn stdio(frame: &Frame, fd: Fd) -> Stdio {
    match frame.fds.get(fd).map(|file| file.try_clone()) {
        Some(Ok(file)) => Stdio::from(file),
        Some(Err(error)) => {
            log::warn!("cannot duplicate file descriptor {fd}: {error}");
            Stdio::null()
        }
        None => Stdio::null(),
    }
}

/// Duplicates the open files above the standard ones.
///
/// Returns pairs of the target file descriptor and the duplicate.
fn extra_files(frame: &Frame) -> Vec<(c_int, File)> {
    frame
        .fds
        .iter()
        .filter(|&(fd, _)| fd > STDERR)
        .filter_map(|(fd, file)| match file.try_clone() {
            Ok(file) => Some((fd as c_int, file)),
            Err(error) => {
                log::warn!("cannot duplicate file descriptor {fd}: {error}");
                None
            }
        })
        .collect()
}

/// Makes the child process have the files at their target file descriptors.
///
/// In the child, every duplicate is first moved above all the targets so
/// that no duplicate is overwritten by another. The moved descriptors are
/// closed on exec.
fn install_extra_files(command: &mut Command, files: &[(c_int, File)]) {
    let mut fds: Vec<(c_int, c_int)> = files
        .iter()
        .map(|(target, file)| (*target, file.as_raw_fd()))
        .collect();
    let min_fd = fds
        .iter()
        .map(|&(target, _)| target + 1)
        .max()
        .unwrap_or_default()
        .max(MIN_INTERNAL_FD);

    // SAFETY: The closure only calls async-signal-safe functions and does
    // not allocate.
    unsafe {
        command.pre_exec(move || {
            for (_, source) in fds.iter_mut() {
                let moved = libc::fcntl(*source, libc::F_DUPFD_CLOEXEC, min_fd);
                if moved < 0 {
                    return Err(std::io::Error::last_os_error());
                }
                *source = moved;
            }
            for &(target, source) in &fds {
                if libc::dup2(source, target) < 0 {
                    return Err(std::io::Error::last_os_error());
                }
            }
            Ok(())
        });
    }
}
