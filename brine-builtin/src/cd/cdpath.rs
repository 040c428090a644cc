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

//! Part of the cd built-in that searches `$CDPATH`

use brine_env::Frame;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Name of the variable that lists directories searched by `cd`
pub const CDPATH: &str = "CDPATH";

/// Searches `$CDPATH` for a directory that contains the operand.
///
/// The search is skipped if the operand is absolute or starts with `.` or
/// `..`. Returns the path to the directory found and whether the path should
/// be printed, which is the case if a non-empty `$CDPATH` entry was used.
pub fn search(frame: &Frame, operand: &str) -> Option<(PathBuf, bool)> {
    let operand = Path::new(operand);
    match operand.components().next()? {
        Component::Normal(_) => {}
        _ => return None,
    }

    let cdpath = frame.variables.value(CDPATH)?;
    cdpath.split(':').find_map(|dir| {
        let candidate = if dir.is_empty() {
            operand.to_owned()
        } else {
            Path::new(dir).join(operand)
        };
        frame
            .resolve_path(&candidate)
            .is_dir()
            .then_some((candidate, !dir.is_empty()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_cdpath() {
        let frame = Frame::new();
        assert_eq!(search(&frame, "dir"), None);
    }

    #[test]
    fn found_in_cdpath() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let mut frame = Frame::new();
        let cdpath = format!("/nonexistent:{}", dir.path().display());
        frame.variables.assign(CDPATH, cdpath).unwrap();
        assert_eq!(search(&frame, "sub"), Some((dir.path().join("sub"), true)));
        assert_eq!(search(&frame, "missing"), None);
    }

    #[test]
    fn empty_entry_means_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let mut frame = Frame::new();
        frame.cwd = dir.path().to_owned();
        frame.variables.assign(CDPATH, ":/nonexistent").unwrap();
        assert_eq!(search(&frame, "sub"), Some((PathBuf::from("sub"), false)));
    }

    #[test]
    fn dot_operands_are_not_searched() {
        let mut frame = Frame::new();
        frame.variables.assign(CDPATH, "/").unwrap();
        assert_eq!(search(&frame, "./tmp"), None);
        assert_eq!(search(&frame, "../tmp"), None);
        assert_eq!(search(&frame, "/tmp"), None);
    }
}
