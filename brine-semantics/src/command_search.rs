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

//! Command search.
//!
//! The [command search](search) is part of the execution of a simple
//! command. It determines a command target that is to be invoked. A
//! [target](Target) can be a built-in utility, function, or external utility.
//!
//! If the command name contains a slash, the target is always an external
//! utility. Otherwise, the shell searches the following candidates for the
//! target (in the order of priority):
//!
//! 1. Special built-ins
//! 1. Functions
//! 1. Regular built-ins
//! 1. External utilities
//!
//! For an external utility to be chosen as a target, a corresponding
//! executable file must be present in a directory specified in the `$PATH`
//! variable.

use brine_env::Frame;
use brine_env::builtin::Builtin;
use brine_env::builtin::Type::Special;
use brine_env::function::Function;
use brine_env::variable::PATH;
use nix::unistd::AccessFlags;
use nix::unistd::access;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// Target of a simple command execution.
///
/// This is the result of the [command search](search).
#[derive(Clone, Debug)]
pub enum Target {
    /// Built-in utility.
    Builtin(Builtin),
    /// Function.
    Function(Arc<Function>),
    /// External utility.
    ///
    /// If the command name contains a slash, the path is the name resolved
    /// from the working directory, regardless of whether the file exists.
    External { path: PathBuf },
}

/// Options that modify the command search
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchOptions<'a> {
    /// Skip functions
    pub skip_functions: bool,
    /// Search this value instead of `$PATH`
    pub path: Option<&'a str>,
}

/// Searches for the target of a command.
#[must_use]
pub fn search(frame: &Frame, name: &str) -> Option<Target> {
    search_with(frame, name, SearchOptions::default())
}

/// Searches for the target of a command with options.
#[must_use]
pub fn search_with(frame: &Frame, name: &str, options: SearchOptions<'_>) -> Option<Target> {
    if name.contains('/') {
        let path = frame.resolve_path(Path::new(name));
        return Some(Target::External { path });
    }

    let builtin = frame.builtins.get(name).copied();
    if let Some(builtin) = builtin {
        if builtin.r#type == Special {
            return Some(Target::Builtin(builtin));
        }
    }

    if !options.skip_functions {
        if let Some(function) = frame.functions.get(name) {
            return Some(Target::Function(function.0.clone()));
        }
    }

    if let Some(builtin) = builtin {
        return Some(Target::Builtin(builtin));
    }

    let path = options
        .path
        .or_else(|| frame.variables.value(PATH))
        .unwrap_or_default();
    search_path(frame, name, path).map(|path| Target::External { path })
}

/// Searches the directories in `path` for an executable file.
///
/// `path` is a colon-separated list of directories. An empty entry means the
/// working directory.
#[must_use]
pub fn search_path(frame: &Frame, name: &str, path: &str) -> Option<PathBuf> {
    path.split(':')
        .map(|dir| {
            let dir = if dir.is_empty() { "." } else { dir };
            frame.resolve_path(&Path::new(dir).join(name))
        })
        .find(|candidate| is_executable_file(candidate))
}

/// Whether the path names an executable regular file.
#[must_use]
pub fn is_executable_file(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::echo_builtin;
    use crate::tests::parse;
    use assert_matches::assert_matches;
    use brine_env::builtin::Type::Regular;
    use brine_env::function::HashEntry;
    use brine_syntax::syntax::CompoundCommand;
    use std::os::unix::fs::PermissionsExt as _;

    fn define_function(frame: &mut Frame, name: &str) {
        let chunk = parse(&format!("{name}() {{ :; }}"));
        let body: Arc<CompoundCommand> = chunk.and_ors[0].pipelines[0].forms[0]
            .body
            .clone()
            .unwrap();
        frame
            .functions
            .insert(HashEntry::new(name.to_owned(), body, vec![]));
    }

    #[test]
    fn special_builtin_comes_before_function() {
        let mut frame = Frame::new();
        frame.builtins.insert("s", Builtin::new(Special, echo_builtin));
        define_function(&mut frame, "s");
        assert_matches!(search(&frame, "s"), Some(Target::Builtin(_)));
    }

    #[test]
    fn function_comes_before_regular_builtin() {
        let mut frame = Frame::new();
        frame.builtins.insert("r", Builtin::new(Regular, echo_builtin));
        define_function(&mut frame, "r");
        assert_matches!(search(&frame, "r"), Some(Target::Function(f)) if f.name == "r");

        let options = SearchOptions {
            skip_functions: true,
            ..SearchOptions::default()
        };
        assert_matches!(search_with(&frame, "r", options), Some(Target::Builtin(_)));
    }

    #[test]
    fn external_in_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("tool");
        std::fs::write(&file, "").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o755)).unwrap();
        std::fs::write(dir.path().join("plain"), "").unwrap();

        let mut frame = Frame::new();
        let path = format!("/nonexistent:{}", dir.path().display());
        frame.variables.assign(PATH, path).unwrap();
        assert_matches!(search(&frame, "tool"), Some(Target::External { path }) if path == file);
        assert_matches!(search(&frame, "plain"), None);
        assert_matches!(search(&frame, "missing"), None);
    }

    #[test]
    fn empty_path_entry_is_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("tool");
        std::fs::write(&file, "").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o700)).unwrap();
        let mut frame = Frame::new();
        frame.cwd = dir.path().to_owned();
        assert_eq!(search_path(&frame, "tool", "/nonexistent:"), Some(dir.path().join("./tool")));
    }

    #[test]
    fn name_with_slash() {
        let mut frame = Frame::new();
        frame.cwd = "/work".into();
        assert_matches!(search(&frame, "bin/x"), Some(Target::External { path })
            if path == Path::new("/work/bin/x"));
    }
}
