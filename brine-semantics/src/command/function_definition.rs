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

//! Implementation of function definition semantics.

use super::apply_errexit;
use crate::Result;
use brine_env::Frame;
use brine_env::function::HashEntry;
use brine_env::semantics::ExitStatus;
use brine_syntax::parser::is_name;
use brine_syntax::syntax::Form;
use std::ops::ControlFlow::Continue;

/// Executes the function definition command.
///
/// The function name must be a literal word that is a valid name. If it is
/// not, an error is printed and the exit status is
/// [`ExitStatus::INVALID_FUNCTION_NAME`]. Otherwise, the function is defined
/// in the frame, replacing any existing function of the same name, and the
/// exit status is zero. The redirections of the definition are stored with
/// the function and performed each time the function is called.
///
/// The `errexit` option is [applied](apply_errexit) on error.
pub fn execute(form: &Form, frame: &mut Frame) -> Result {
    let name = form
        .words
        .first()
        .and_then(|word| word.as_bareword())
        .filter(|name| is_name(name));
    let (Some(name), Some(body)) = (name, &form.body) else {
        let shown = form.words.first().map(ToString::to_string).unwrap_or_default();
        frame.print_error(&format!("`{shown}` is not a valid function name"));
        frame.last_status = ExitStatus::INVALID_FUNCTION_NAME;
        return apply_errexit(frame);
    };

    log::trace!("defining function {name}");
    let entry = HashEntry::new(name.to_owned(), body.clone(), form.redirs.clone());
    frame.functions.replace(entry);
    frame.last_status = ExitStatus::SUCCESS;
    Continue(())
}
