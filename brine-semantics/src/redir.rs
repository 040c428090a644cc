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

//! Redirection semantics.
//!
//! # Effect of redirections
//!
//! A [redirection](Redir) modifies its target file descriptor, which is the
//! one written before the operator or the default for the
//! [mode](RedirMode::default_fd). The operand word is
//! [expanded](crate::expansion) first. Then, the mode defines the next
//! behavior:
//!
//! - `Input` (`<`): Opens a file for reading.
//! - `InputOutput` (`<>`): Opens a file for reading and writing, creating it
//!   if it does not exist.
//! - `Output` (`>`): Opens a file for writing and clears the file content.
//!   Creates an empty regular file if the file does not exist. If the
//!   `noclobber` option is set, an existing regular file is not opened.
//! - `Clobber` (`>|`): Like `Output`, but ignores the `noclobber` option.
//! - `Append` (`>>`): Opens a file for appending.
//! - `Heredoc` (`<<`): Opens a pipe from which the content of the
//!   [here-document](here_doc) can be read.
//!
//! If the operator is followed by `&`, the operand is a decimal file
//! descriptor to be copied to the target, or `-` to close the target.
//!
//! # Performing redirections
//!
//! To perform redirections, you need to wrap a [`Frame`] in a
//! [`RedirGuard`] first. Then, you call [`RedirGuard::perform_redir`] to
//! affect the target file descriptor. When you drop the `RedirGuard`, it
//! undoes the effect to the file descriptor. See the documentation for
//! [`RedirGuard`] for details.

pub mod here_doc;

use crate::expansion;
use crate::expansion::Env;
use crate::expansion::expand_word;
use brine_env::Frame;
use brine_env::io::Fd;
use brine_env::io::MAX_FD;
use brine_env::option;
use brine_env::semantics::ExitStatus;
use brine_syntax::syntax::Redir;
use brine_syntax::syntax::RedirMode;
use std::fs::File;
use std::fs::OpenOptions;
use std::ops::Deref;
use std::ops::DerefMut;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Error performing a redirection
#[derive(Debug, Error)]
pub enum Error {
    /// Error expanding the operand
    #[error(transparent)]
    Expansion(#[from] expansion::Error),
    /// Error while opening a file
    #[error("{path}: {error}")]
    OpenFile {
        path: String,
        #[source]
        error: std::io::Error,
    },
    /// `>` to an existing regular file while the `noclobber` option is on
    #[error("{0}: cannot overwrite existing file")]
    Clobber(String),
    /// Operand of `<&` or `>&` that is not a file descriptor
    #[error("{0}: not a valid file descriptor")]
    MalformedFd(String),
    /// Operand of `<&` or `>&` that is not open
    #[error("{0}: bad file descriptor")]
    ClosedFd(Fd),
    /// Error preparing the content of a here-document
    #[error("here-document: {0}")]
    HereDoc(#[source] std::io::Error),
}

/// Frame wrapper for performing redirections.
///
/// This is an RAII-style wrapper of [`Frame`] in which redirections are
/// performed. A `RedirGuard` keeps track of file descriptors affected by
/// redirections so that we can restore the file descriptors to the state
/// before performing the redirections.
///
/// There are two ways to clear file descriptors saved in the `RedirGuard`.
/// One is [`undo_redirs`](Self::undo_redirs), which restores the file
/// descriptors to the original state, and the other is
/// [`preserve_redirs`](Self::preserve_redirs), which forgets the saved file
/// descriptors and thus makes the effect of the redirections permanent.
///
/// When an instance of `RedirGuard` is dropped, `undo_redirs` is implicitly
/// called.
#[derive(Debug)]
pub struct RedirGuard<'e> {
    frame: &'e mut Frame,
    /// Target file descriptors and the files they referred to before the
    /// redirections
    saved_fds: Vec<(Fd, Option<Arc<File>>)>,
}

impl Deref for RedirGuard<'_> {
    type Target = Frame;
    fn deref(&self) -> &Frame {
        self.frame
    }
}

impl DerefMut for RedirGuard<'_> {
    fn deref_mut(&mut self) -> &mut Frame {
        self.frame
    }
}

impl Drop for RedirGuard<'_> {
    fn drop(&mut self) {
        self.undo_redirs()
    }
}

impl<'e> RedirGuard<'e> {
    /// Creates a new `RedirGuard`.
    pub fn new(frame: &'e mut Frame) -> Self {
        RedirGuard {
            frame,
            saved_fds: Vec::new(),
        }
    }

    /// Performs a redirection.
    ///
    /// If successful, this function saves internally the file previously
    /// open at the target file descriptor, and returns the exit status of the
    /// last command substitution performed during the redirection, if any.
    pub fn perform_redir(&mut self, redir: &Redir) -> Result<Option<ExitStatus>, Error> {
        let target = redir.left.map_or(redir.mode.default_fd(), |fd| fd) as Fd;
        let mut env = Env::new(&mut *self.frame);
        let file = open(&mut env, redir)?;
        let exit_status = env.last_command_subst_status;
        let old = self.frame.fds.set(target, file);
        self.saved_fds.push((target, old));
        Ok(exit_status)
    }

    /// Performs redirections.
    ///
    /// If the redirection fails for an item, the remainders are ignored, but
    /// the effects of the preceding items are not canceled.
    pub fn perform_redirs<'a, I>(&mut self, redirs: I) -> Result<Option<ExitStatus>, Error>
    where
        I: IntoIterator<Item = &'a Redir>,
    {
        let mut exit_status = None;
        for redir in redirs {
            let new_exit_status = self.perform_redir(redir)?;
            exit_status = new_exit_status.or(exit_status);
        }
        Ok(exit_status)
    }

    /// Undoes the effect of the redirections.
    pub fn undo_redirs(&mut self) {
        for (fd, file) in self.saved_fds.drain(..).rev() {
            self.frame.fds.set(fd, file);
        }
    }

    /// Makes the redirections permanent.
    pub fn preserve_redirs(&mut self) {
        self.saved_fds.clear();
    }
}

/// Opens the file the redirection makes the target refer to.
///
/// `None` means the target is to be closed.
fn open(env: &mut Env<'_>, redir: &Redir) -> Result<Option<Arc<File>>, Error> {
    if redir.mode == RedirMode::Heredoc {
        let Some(heredoc) = &redir.heredoc else {
            return Ok(None);
        };
        return Ok(Some(Arc::new(here_doc::open(env, heredoc)?)));
    }

    let operand = expand_word(env, &redir.right)?;
    if redir.right_fd {
        return copy_fd(env.frame, &operand);
    }

    let mut options = OpenOptions::new();
    match redir.mode {
        RedirMode::Input => options.read(true),
        RedirMode::InputOutput => options.read(true).write(true).create(true),
        RedirMode::Output if !env.frame.options.is_on(option::Clobber) => {
            let path = env.frame.resolve_path(Path::new(&operand));
            if path.metadata().is_ok_and(|metadata| metadata.is_file()) {
                return Err(Error::Clobber(operand));
            }
            options.write(true).create(true).truncate(true)
        }
        RedirMode::Output | RedirMode::Clobber => options.write(true).create(true).truncate(true),
        RedirMode::Append => options.append(true).create(true),
        RedirMode::Heredoc | RedirMode::Invalid => return Err(Error::MalformedFd(operand)),
    };
    let path = env.frame.resolve_path(Path::new(&operand));
    log::trace!("opening {} for {}", path.display(), redir.mode);
    match options.open(&path) {
        Ok(file) => Ok(Some(Arc::new(file))),
        Err(error) => Err(Error::OpenFile {
            path: operand,
            error,
        }),
    }
}

/// Resolves the operand of `<&` or `>&`.
fn copy_fd(frame: &Frame, operand: &str) -> Result<Option<Arc<File>>, Error> {
    if operand == "-" {
        return Ok(None);
    }
    let fd = operand
        .parse::<Fd>()
        .ok()
        .filter(|fd| *fd <= MAX_FD && operand.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| Error::MalformedFd(operand.to_owned()))?;
    match frame.fds.get(fd) {
        Some(file) => Ok(Some(file.clone())),
        None => Err(Error::ClosedFd(fd)),
    }
}
