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

//! Items for shell variables
//!
//! A [`VariableSet`] maps names to [`Variable`]s. Each variable has an
//! optional value and two attributes: exported and read-only. A variable
//! without a value exists only to carry its attributes, as after
//! `export foo` for an unset `foo`.
//!
//! ```
//! use brine_env::variable::VariableSet;
//! let mut set = VariableSet::new();
//! set.assign("foo", "hello").unwrap();
//! set.make_read_only("foo");
//! assert_eq!(set.value("foo"), Some("hello"));
//! assert!(set.assign("foo", "world").is_err());
//! ```

use itertools::Itertools;
use std::collections::HashMap;
use thiserror::Error;

/// Name of the variable that contains the field separators
pub const IFS: &str = "IFS";

/// Field separators used when `IFS` is unset
pub const IFS_INITIAL_VALUE: &str = " \t\n";

/// Name of the variable that contains the command search path
pub const PATH: &str = "PATH";

/// Search path used by `command -p`
pub const DEFAULT_PATH: &str = "/usr/bin:/bin:/usr/sbin:/sbin";

/// Name of the variable that contains the home directory
pub const HOME: &str = "HOME";

/// Name of the variable that contains the working directory
pub const PWD: &str = "PWD";

/// Name of the variable that contains the previous working directory
pub const OLDPWD: &str = "OLDPWD";

/// Value and attributes of a shell variable
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Variable {
    /// Value of the variable, `None` if unset
    pub value: Option<String>,
    /// Whether the variable is passed to external utilities
    pub is_exported: bool,
    /// Whether the variable is protected from assignment and unsetting
    pub is_read_only: bool,
}

impl Variable {
    /// Creates a variable with the given value and no attributes.
    #[must_use]
    pub fn new<S: Into<String>>(value: S) -> Self {
        Variable {
            value: Some(value.into()),
            ..Variable::default()
        }
    }

    /// Sets the exported attribute.
    #[must_use]
    pub fn export(mut self) -> Self {
        self.is_exported = true;
        self
    }
}

/// Error in assigning to a read-only variable
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("cannot assign to read-only variable `{name}`")]
pub struct AssignError {
    pub name: String,
    /// Value that was being assigned
    pub new_value: String,
}

/// Error in unsetting a read-only variable
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("cannot unset read-only variable `{name}`")]
pub struct UnsetError {
    pub name: String,
}

/// Collection of variables
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VariableSet {
    variables: HashMap<String, Variable>,
}

impl VariableSet {
    /// Creates an empty variable set.
    #[must_use]
    pub fn new() -> VariableSet {
        VariableSet::default()
    }

    /// Gets a reference to the variable with the specified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Returns the value of the variable, or `None` if unset.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name)?.value.as_deref()
    }

    /// Assigns a value to the variable, creating it if needed.
    ///
    /// The attributes of an existing variable are kept.
    pub fn assign<N, V>(&mut self, name: N, value: V) -> Result<(), AssignError>
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let value = value.into();
        if self.get(&name).is_some_and(|variable| variable.is_read_only) {
            return Err(AssignError {
                name,
                new_value: value,
            });
        }
        self.variables.entry(name).or_default().value = Some(value);
        Ok(())
    }

    /// Sets or clears the exported attribute of the variable, creating it
    /// without a value if needed.
    pub fn export(&mut self, name: &str, exported: bool) {
        self.variables.entry(name.to_owned()).or_default().is_exported = exported;
    }

    /// Makes the variable read-only, creating it without a value if needed.
    pub fn make_read_only(&mut self, name: &str) {
        self.variables.entry(name.to_owned()).or_default().is_read_only = true;
    }

    /// Removes the variable.
    ///
    /// Returns the removed variable, if any.
    pub fn unset(&mut self, name: &str) -> Result<Option<Variable>, UnsetError> {
        match self.variables.get(name) {
            Some(variable) if variable.is_read_only => Err(UnsetError {
                name: name.to_owned(),
            }),
            _ => Ok(self.variables.remove(name)),
        }
    }

    /// Replaces the variable regardless of its attributes.
    ///
    /// This is used to restore the state saved before a temporary
    /// assignment. `None` removes the variable.
    pub fn restore(&mut self, name: String, variable: Option<Variable>) {
        match variable {
            Some(variable) => self.variables.insert(name, variable),
            None => self.variables.remove(&name),
        };
    }

    /// Returns the variables sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables
            .iter()
            .map(|(name, variable)| (name.as_str(), variable))
            .sorted_by_key(|&(name, _)| name)
    }

    /// Returns the name-value pairs of exported variables that have a value.
    #[must_use]
    pub fn env_vars(&self) -> Vec<(&str, &str)> {
        self.iter()
            .filter(|(_, variable)| variable.is_exported)
            .filter_map(|(name, variable)| Some((name, variable.value.as_deref()?)))
            .collect()
    }

    /// Imports environment variables.
    ///
    /// Each name-value pair is assigned and exported. Assignments to
    /// read-only variables are ignored.
    pub fn extend_env<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in vars {
            let name = name.into();
            if self.assign(name.clone(), value).is_ok() {
                self.export(&name, true);
            }
        }
    }
}
