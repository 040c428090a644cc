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

//! Assignment.

use crate::expansion::Env;
use crate::expansion::Result;
use crate::expansion::expand_word;
use crate::xtrace::XTrace;
use brine_env::Frame;
use brine_env::variable::Variable;
use brine_syntax::syntax::Assign;

/// Performs an assignment.
///
/// This function [expands the value](expand_word) and then assigns it to the
/// variable. If `export` is true, the variable is exported. The exit status
/// of a command substitution performed in the expansion is recorded in the
/// environment.
pub fn perform_assignment(
    env: &mut Env<'_>,
    assign: &Assign,
    export: bool,
    xtrace: Option<&mut XTrace>,
) -> Result<()> {
    let value = expand_word(env, &assign.rhs)?;
    if let Some(xtrace) = xtrace {
        xtrace.push_assign(&assign.lhs, &value);
    }
    env.frame.assign_variable(&assign.lhs, value)?;
    if export {
        env.frame.variables.export(&assign.lhs, true);
    }
    Ok(())
}

/// Performs assignments.
///
/// This function calls [`perform_assignment`] for each [`Assign`] and stops
/// at the first error.
pub fn perform_assignments(
    env: &mut Env<'_>,
    assigns: &[Assign],
    export: bool,
    mut xtrace: Option<&mut XTrace>,
) -> Result<()> {
    for assign in assigns {
        perform_assignment(env, assign, export, xtrace.as_deref_mut())?;
    }
    Ok(())
}

/// Variables saved before temporary assignments
///
/// Call [`restore`](Self::restore) after the command to which the
/// assignments apply.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct SavedVariables(Vec<(String, Option<Variable>)>);

impl SavedVariables {
    /// Saves the variables the assignments are going to modify.
    pub fn save(frame: &Frame, assigns: &[Assign]) -> Self {
        SavedVariables(
            assigns
                .iter()
                .map(|assign| {
                    let variable = frame.variables.get(&assign.lhs).cloned();
                    (assign.lhs.clone(), variable)
                })
                .collect(),
        )
    }

    /// Puts back the saved variables.
    pub fn restore(self, frame: &mut Frame) {
        for (name, variable) in self.0.into_iter().rev() {
            frame.variables.restore(name, variable);
        }
    }
}
