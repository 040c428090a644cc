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

//! Type definitions for I/O.
//!
//! The shell does not operate on the process's own file descriptors. Every
//! frame has an [`FdTable`] that maps shell-level file descriptor numbers to
//! open files. Redirections change the table, and external utilities receive
//! the files of the table as their file descriptors.

use nix::poll::PollFd;
use nix::poll::PollFlags;
use nix::poll::PollTimeout;
use nix::poll::poll;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::os::fd::AsFd;
use std::sync::Arc;

/// File descriptor number
pub type Fd = usize;

/// Standard input
pub const STDIN: Fd = 0;
/// Standard output
pub const STDOUT: Fd = 1;
/// Standard error
pub const STDERR: Fd = 2;

/// Minimum process-level file descriptor for files the shell keeps for
/// passing to a child process
///
/// When a child process is started, the files of its table are moved to this
/// number or above before being duplicated to their final numbers, so that
/// they do not collide with each other.
pub const MIN_INTERNAL_FD: std::os::raw::c_int = 10;

/// Largest file descriptor number accepted in a redirection
pub const MAX_FD: Fd = 255;

/// Open files of a frame, indexed by file descriptor
///
/// Cloning a table shares the files. A file is closed when the last table
/// that refers to it is dropped.
#[derive(Clone, Debug, Default)]
pub struct FdTable {
    files: Vec<Option<Arc<File>>>,
}

impl FdTable {
    /// Creates a table with no open files.
    #[must_use]
    pub fn new() -> FdTable {
        FdTable::default()
    }

    /// Creates a table containing duplicates of the standard input, output
    /// and error of the process.
    ///
    /// Standard streams that are not open are left closed in the table.
    #[must_use]
    pub fn from_stdio() -> FdTable {
        let mut table = FdTable::new();
        let stdio = [
            std::io::stdin().as_fd().try_clone_to_owned(),
            std::io::stdout().as_fd().try_clone_to_owned(),
            std::io::stderr().as_fd().try_clone_to_owned(),
        ];
        for (fd, owned) in stdio.into_iter().enumerate() {
            match owned {
                Ok(owned) => {
                    table.set(fd, Some(Arc::new(File::from(owned))));
                }
                Err(error) => log::debug!("standard fd {fd} is not available: {error}"),
            }
        }
        table
    }

    /// Returns the file at the file descriptor, if open.
    #[must_use]
    pub fn get(&self, fd: Fd) -> Option<&Arc<File>> {
        self.files.get(fd)?.as_ref()
    }

    /// Installs or closes a file at the file descriptor.
    ///
    /// Returns the file that was there before.
    pub fn set(&mut self, fd: Fd, file: Option<Arc<File>>) -> Option<Arc<File>> {
        if fd >= self.files.len() {
            if file.is_none() {
                return None;
            }
            self.files.resize(fd + 1, None);
        }
        std::mem::replace(&mut self.files[fd], file)
    }

    /// Returns the open file descriptors and their files.
    pub fn iter(&self) -> impl Iterator<Item = (Fd, &Arc<File>)> {
        self.files
            .iter()
            .enumerate()
            .filter_map(|(fd, file)| Some((fd, file.as_ref()?)))
    }

    /// Writes the whole buffer to the file descriptor.
    pub fn write_all(&self, fd: Fd, bytes: &[u8]) -> std::io::Result<()> {
        let file = self.get(fd).ok_or_else(bad_fd)?;
        (&**file).write_all(bytes)
    }

    /// Tests if the file descriptor is a pipe whose reading end has been
    /// closed.
    ///
    /// Writing to such a pipe fails with `EPIPE`. This function does not
    /// block.
    #[must_use]
    pub fn is_broken_pipe(&self, fd: Fd) -> bool {
        let Some(file) = self.get(fd) else {
            return false;
        };
        let mut fds = [PollFd::new(file.as_fd(), PollFlags::POLLOUT)];
        match poll(&mut fds, PollTimeout::ZERO) {
            Ok(0) | Err(_) => false,
            Ok(_) => fds[0].revents().is_some_and(|revents| {
                revents.intersects(PollFlags::POLLERR | PollFlags::POLLHUP)
            }),
        }
    }

    /// Reads one byte from the file descriptor.
    ///
    /// Returns `None` at end of file. Reading byte by byte leaves the rest
    /// of the input for the next reader.
    pub fn read_byte(&self, fd: Fd) -> std::io::Result<Option<u8>> {
        let file = self.get(fd).ok_or_else(bad_fd)?;
        let mut buffer = [0];
        loop {
            match (&**file).read(&mut buffer) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buffer[0])),
                Err(error) if error.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error),
            }
        }
    }
}

fn bad_fd() -> std::io::Error {
    std::io::Error::from_raw_os_error(nix::libc::EBADF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Seek;

    #[test]
    fn set_grows_and_returns_previous() {
        let mut table = FdTable::new();
        let file = Arc::new(tempfile::tempfile().unwrap());
        assert!(table.set(5, Some(file.clone())).is_none());
        assert!(table.get(4).is_none());
        assert!(Arc::ptr_eq(table.get(5).unwrap(), &file));
        assert!(table.set(5, None).is_some());
        assert!(table.set(100, None).is_none());
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn write_then_read() {
        let mut table = FdTable::new();
        let file = Arc::new(tempfile::tempfile().unwrap());
        table.set(3, Some(file.clone()));
        table.write_all(3, b"ab").unwrap();
        (&*file).rewind().unwrap();
        assert_eq!(table.read_byte(3).unwrap(), Some(b'a'));
        assert_eq!(table.read_byte(3).unwrap(), Some(b'b'));
        assert_eq!(table.read_byte(3).unwrap(), None);
    }

    #[test]
    fn stdio_table_holds_only_standard_fds() {
        let table = FdTable::from_stdio();
        assert!(table.iter().all(|(fd, _)| fd <= STDERR));
        assert!(table.get(3).is_none());
    }

    #[test]
    fn pipe_without_reader_is_broken() {
        let (reader, writer) = nix::unistd::pipe().unwrap();
        let mut table = FdTable::new();
        table.set(STDOUT, Some(Arc::new(File::from(writer))));
        assert!(!table.is_broken_pipe(STDOUT));
        drop(reader);
        assert!(table.is_broken_pipe(STDOUT));

        table.set(STDOUT, Some(Arc::new(tempfile::tempfile().unwrap())));
        assert!(!table.is_broken_pipe(STDOUT));
        assert!(!table.is_broken_pipe(7));
    }

    #[test]
    fn closed_fd_is_bad() {
        let table = FdTable::new();
        let error = table.write_all(1, b"x").unwrap_err();
        assert_eq!(error.raw_os_error(), Some(nix::libc::EBADF));
    }
}
