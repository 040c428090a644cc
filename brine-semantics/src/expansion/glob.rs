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

//! Pathname expansion
//!
//! A field containing unquoted glob metacharacters is a pattern that is
//! replaced with the sorted list of matching pathnames. The pattern is
//! split at slashes, and each component is matched against the entries of
//! the directory reached by the previous components. A field that matches
//! nothing is left as is.

use super::glob_word::GlobWord;
use crate::pattern::Pattern;
use brine_env::Frame;
use brine_env::option;
use std::path::Path;

/// Component of a pathname pattern
#[derive(Debug)]
enum Component {
    Literal(String),
    Pattern(Pattern),
}

/// Performs pathname expansion on a field.
///
/// Relative paths are resolved from the working directory of the frame.
/// The results are relative if the pattern is. If the `noglob` option is
/// on, the field is returned with quotes removed.
#[must_use]
pub fn glob(frame: &Frame, word: &GlobWord) -> Vec<String> {
    if !frame.options.is_on(option::Glob) || !word.has_meta() {
        return vec![word.to_text()];
    }

    let components = word
        .split_slashes()
        .iter()
        .map(|component| {
            let pattern = Pattern::new(component);
            match pattern.as_literal() {
                Some(text) => Component::Literal(text),
                None => Component::Pattern(pattern),
            }
        })
        .collect::<Vec<_>>();
    if components
        .iter()
        .all(|component| matches!(component, Component::Literal(_)))
    {
        return vec![word.to_text()];
    }

    let mut results = Vec::new();
    walk(&frame.cwd, String::new(), &components, &mut results);
    if results.is_empty() {
        return vec![word.to_text()];
    }
    results.sort();
    results
}

/// Collects the paths that match `components` under `prefix`.
///
/// `prefix` is empty or ends with a slash.
fn walk(cwd: &Path, prefix: String, components: &[Component], results: &mut Vec<String>) {
    let Some((first, rest)) = components.split_first() else {
        return;
    };
    match first {
        Component::Literal(name) => {
            let path = prefix + name;
            if rest.is_empty() {
                if cwd.join(&path).symlink_metadata().is_ok() {
                    results.push(path);
                }
            } else {
                walk(cwd, path + "/", rest, results);
            }
        }

        Component::Pattern(pattern) => {
            let dir = if prefix.is_empty() {
                cwd.to_owned()
            } else {
                cwd.join(&prefix)
            };
            let entries = match dir.read_dir() {
                Ok(entries) => entries,
                Err(error) => {
                    log::trace!("cannot read directory {}: {error}", dir.display());
                    return;
                }
            };
            for entry in entries.flatten() {
                let Ok(name) = entry.file_name().into_string() else {
                    continue;
                };
                if name.starts_with('.') && !pattern.starts_with_period() {
                    continue;
                }
                if !pattern.is_match(&name) {
                    continue;
                }
                let path = format!("{prefix}{name}");
                if rest.is_empty() {
                    results.push(path);
                } else if cwd.join(&path).is_dir() {
                    walk(cwd, path + "/", rest, results);
                }
            }
        }
    }
}
