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

//! Part of the cd built-in that canonicalizes the target directory path

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Error in canonicalization
///
/// A `..` component cannot be removed along with the preceding component if
/// the path up to that component does not name a directory.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{}: no such directory", .0.display())]
pub struct NonExistingDirectory(pub PathBuf);

/// Canonicalizes an absolute path logically.
///
/// The `.` components and redundant slashes are removed. Each `..` component
/// is removed along with the preceding component. Symbolic links are not
/// resolved.
pub fn canonicalize(path: &Path) -> Result<PathBuf, NonExistingDirectory> {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                result.push(component)
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.is_dir() {
                    return Err(NonExistingDirectory(result));
                }
                result.pop();
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_and_slashes_are_removed() {
        assert_eq!(canonicalize(Path::new("/")), Ok(PathBuf::from("/")));
        assert_eq!(canonicalize(Path::new("/./tmp//./")), Ok(PathBuf::from("/tmp")));
    }

    #[test]
    fn dot_dots_remove_preceding_components() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        let path = dir.path().join("a/../b");
        assert_eq!(canonicalize(&path), Ok(dir.path().join("b")));
        assert_eq!(canonicalize(Path::new("/..")), Ok(PathBuf::from("/")));
    }

    #[test]
    fn dot_dot_after_non_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/../b");
        assert_eq!(
            canonicalize(&path),
            Err(NonExistingDirectory(dir.path().join("missing")))
        );
    }
}
