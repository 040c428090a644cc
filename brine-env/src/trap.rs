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

//! Type definitions for trap settings.
//!
//! The shell records the action for each trap condition in a [`TrapSet`].
//! The `EXIT` action is run by the evaluator when the shell exits. Actions
//! for signals are recorded and listed but do not change how the process
//! handles the signals.

#[doc(no_inline)]
pub use nix::sys::signal::Signal;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::os::raw::c_int;
use std::str::FromStr;
use thiserror::Error;

/// Condition under which a trap action is run
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Condition {
    /// When the shell exits
    Exit,
    /// When the signal is caught
    Signal(Signal),
}

impl From<Signal> for Condition {
    fn from(signal: Signal) -> Self {
        Self::Signal(signal)
    }
}

/// Prints the condition name without the `SIG` prefix.
impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Exit => "EXIT".fmt(f),
            Condition::Signal(signal) => {
                let full_name = signal.as_str();
                full_name.strip_prefix("SIG").unwrap_or(full_name).fmt(f)
            }
        }
    }
}

/// Error returned when a string does not name a trap condition
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
#[error("`{0}` is not a valid trap condition")]
pub struct ParseConditionError(pub String);

/// Parses a condition name or number.
///
/// The name is case-insensitive and may have the `SIG` prefix. The number 0
/// and the name `EXIT` mean [`Condition::Exit`].
impl FromStr for Condition {
    type Err = ParseConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseConditionError(s.to_owned());
        if let Ok(number) = s.parse::<c_int>() {
            if number == 0 {
                return Ok(Self::Exit);
            }
            return Signal::try_from(number).map(Self::Signal).map_err(|_| error());
        }

        let upper = s.to_ascii_uppercase();
        if upper == "EXIT" {
            return Ok(Self::Exit);
        }
        let name = if upper.starts_with("SIG") {
            upper
        } else {
            format!("SIG{upper}")
        };
        name.parse().map(Self::Signal).map_err(|_| error())
    }
}

/// Action performed when a condition is met
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Action {
    /// Performs the default action.
    #[default]
    Default,
    /// Does nothing.
    Ignore,
    /// Runs the command string.
    Command(String),
}

/// Collection of trap actions
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrapSet {
    actions: BTreeMap<Condition, Action>,
}

impl TrapSet {
    /// Returns the action for the condition.
    #[must_use]
    pub fn get(&self, condition: Condition) -> &Action {
        static DEFAULT: Action = Action::Default;
        self.actions.get(&condition).unwrap_or(&DEFAULT)
    }

    /// Sets the action for the condition.
    pub fn set(&mut self, condition: Condition, action: Action) {
        log::debug!("trap {condition}: {action:?}");
        if action == Action::Default {
            self.actions.remove(&condition);
        } else {
            self.actions.insert(condition, action);
        }
    }

    /// Returns the conditions that have a non-default action, in order.
    pub fn iter(&self) -> impl Iterator<Item = (Condition, &Action)> {
        self.actions.iter().map(|(&condition, action)| (condition, action))
    }

    /// Resets the actions for a subshell.
    ///
    /// A subshell inherits ignored conditions only.
    pub fn enter_subshell(&mut self) {
        self.actions.retain(|_, action| *action == Action::Ignore);
    }

    /// Removes and returns the command for the `EXIT` condition.
    pub fn take_exit_command(&mut self) -> Option<String> {
        match self.actions.remove(&Condition::Exit)? {
            Action::Command(command) => Some(command),
            other => {
                self.actions.insert(Condition::Exit, other);
                None
            }
        }
    }
}
