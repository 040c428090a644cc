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

//! Tilde expansion

use brine_env::Frame;
use brine_env::variable::HOME;
use nix::unistd::User;
use nix::unistd::getuid;

/// Returns the home directory for a tilde prefix.
///
/// `user` is the text between the `~` and the first `/`. An empty user
/// names the current user, whose home directory is `$HOME` or, if unset,
/// the entry in the user database. If the home directory cannot be
/// determined, the tilde prefix is returned unchanged.
#[must_use]
pub fn expand(frame: &Frame, user: &str) -> String {
    let home = if user.is_empty() {
        match frame.variables.value(HOME) {
            Some(home) => Some(home.to_owned()),
            None => User::from_uid(getuid()).ok().flatten().map(home_of),
        }
    } else {
        User::from_name(user).ok().flatten().map(home_of)
    };
    home.unwrap_or_else(|| format!("~{user}"))
}

fn home_of(user: User) -> String {
    user.dir.to_string_lossy().into_owned()
}
