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

//! Shell options
//!
//! [`OptionSet`] records whether each [`Option`] is on or off. The set only
//! stores the states; the evaluator consults it to change its behavior.

use enumset::EnumSet;
use enumset::EnumSetType;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Not;
use std::str::FromStr;
use thiserror::Error;

/// State of an option: either enabled or disabled.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum State {
    /// Enabled.
    On,
    /// Disabled.
    Off,
}

pub use State::*;

/// Converts a state to a string (`on` or `off`).
impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            On => "on",
            Off => "off",
        };
        s.fmt(f)
    }
}

impl Not for State {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            On => Off,
            Off => On,
        }
    }
}

impl From<bool> for State {
    fn from(on: bool) -> Self {
        if on { On } else { Off }
    }
}

/// Shell option
#[derive(Clone, Copy, Debug, EnumSetType, Eq, Hash, PartialEq)]
#[enumset(no_super_impls)]
pub enum Option {
    /// Makes all variables exported when they are assigned.
    AllExport,
    /// Allows the `>` redirection to truncate an existing file.
    Clobber,
    /// Makes the shell exit when a command returns a non-zero exit status.
    ErrExit,
    /// Makes the shell actually run commands.
    Exec,
    /// Enables pathname expansion.
    Glob,
    /// Expands unset variables to an empty string rather than erroring out.
    Unset,
    /// Echoes the input before parsing and executing.
    Verbose,
    /// Prints expanded words during command execution.
    XTrace,
}

pub use self::Option::*;

impl Option {
    /// Returns the option name, all in lower case.
    pub fn long_name(self) -> &'static str {
        match self {
            AllExport => "allexport",
            Clobber => "clobber",
            ErrExit => "errexit",
            Exec => "exec",
            Glob => "glob",
            Unset => "unset",
            Verbose => "verbose",
            XTrace => "xtrace",
        }
    }

    /// Returns the single-letter name of the option and the state the letter
    /// turns on.
    ///
    /// This is the inverse of [`parse_short`].
    pub fn short_name(self) -> (char, State) {
        match self {
            AllExport => ('a', On),
            Clobber => ('C', Off),
            ErrExit => ('e', On),
            Exec => ('n', Off),
            Glob => ('f', Off),
            Unset => ('u', Off),
            Verbose => ('v', On),
            XTrace => ('x', On),
        }
    }

    /// Returns an iterator over all options in alphabetical order.
    pub fn iter() -> impl Iterator<Item = Option> {
        EnumSet::<Option>::all().iter()
    }
}

/// Prints the option name, all in lower case.
impl Display for Option {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.long_name().fmt(f)
    }
}

/// Error returned when a string does not name an option
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
#[error("no such option: {0}")]
pub struct NoSuchOption(pub String);

/// Parses a full option name.
impl FromStr for Option {
    type Err = NoSuchOption;
    fn from_str(name: &str) -> Result<Self, NoSuchOption> {
        Option::iter()
            .find(|option| option.long_name() == name)
            .ok_or_else(|| NoSuchOption(name.to_owned()))
    }
}

/// Parses a short option name.
///
/// ```
/// # use brine_env::option::*;
/// assert_eq!(parse_short('a'), Some((AllExport, On)));
/// assert_eq!(parse_short('C'), Some((Clobber, Off)));
/// assert_eq!(parse_short('f'), Some((Glob, Off)));
/// assert_eq!(parse_short('z'), None);
/// ```
#[must_use]
pub fn parse_short(name: char) -> std::option::Option<(self::Option, State)> {
    Option::iter().find_map(|option| {
        let (letter, state) = option.short_name();
        (letter == name).then_some((option, state))
    })
}

/// Parses a long option name, optionally prefixed with `no`.
///
/// ```
/// # use brine_env::option::*;
/// assert_eq!(parse_long("errexit"), Ok((ErrExit, On)));
/// assert_eq!(parse_long("noclobber"), Ok((Clobber, Off)));
/// assert_eq!(parse_long("nounset"), Ok((Unset, Off)));
/// ```
pub fn parse_long(name: &str) -> Result<(Option, State), NoSuchOption> {
    if let Ok(option) = Option::from_str(name) {
        return Ok((option, On));
    }
    name.strip_prefix("no")
        .and_then(|rest| Option::from_str(rest).ok())
        .map(|option| (option, Off))
        .ok_or_else(|| NoSuchOption(name.to_owned()))
}

/// Set of the shell options and their states.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OptionSet {
    enabled_options: EnumSet<Option>,
}

/// Defines the default option set.
///
/// The following options are enabled by default: `Clobber`, `Exec`, `Glob`,
/// `Unset`.
impl Default for OptionSet {
    fn default() -> Self {
        let enabled_options = Clobber | Exec | Glob | Unset;
        OptionSet { enabled_options }
    }
}

impl OptionSet {
    /// Returns the current state of the option.
    pub fn get(&self, option: Option) -> State {
        if self.enabled_options.contains(option) {
            On
        } else {
            Off
        }
    }

    /// Returns true if the option is on.
    pub fn is_on(&self, option: Option) -> bool {
        self.get(option) == On
    }

    /// Changes an option's state.
    pub fn set(&mut self, option: Option, state: State) {
        match state {
            On => self.enabled_options.insert(option),
            Off => self.enabled_options.remove(option),
        };
    }

    /// Returns the value of the `$-` special parameter.
    ///
    /// The result contains the letter of each option whose current state is
    /// the one the letter selects.
    pub fn letters(&self) -> String {
        Option::iter()
            .filter_map(|option| {
                let (letter, state) = option.short_name();
                (self.get(option) == state).then_some(letter)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_parsed_back() {
        for option in Option::iter() {
            let (letter, state) = option.short_name();
            assert_eq!(parse_short(letter), Some((option, state)));
        }
    }

    #[test]
    fn parse_long_negation() {
        assert_eq!(parse_long("glob"), Ok((Glob, On)));
        assert_eq!(parse_long("noglob"), Ok((Glob, Off)));
        assert_eq!(parse_long("noexec"), Ok((Exec, Off)));
        assert_eq!(parse_long("nonsense"), Err(NoSuchOption("nonsense".into())));
        assert_eq!(parse_long("no"), Err(NoSuchOption("no".into())));
    }

    #[test]
    fn state_negation_and_display() {
        assert_eq!(!On, Off);
        assert_eq!(!Off, On);
        assert_eq!(State::from(true), On);
        assert_eq!(format!("{} {}", On, !On), "on off");
    }

    #[test]
    fn default_options() {
        let options = OptionSet::default();
        assert_eq!(options.get(Clobber), On);
        assert_eq!(options.get(ErrExit), Off);
        assert_eq!(options.letters(), "");
    }

    #[test]
    fn letters_follow_states() {
        let mut options = OptionSet::default();
        options.set(ErrExit, On);
        options.set(Glob, Off);
        options.set(XTrace, On);
        assert_eq!(options.letters(), "efx");
        options.set(Clobber, Off);
        assert_eq!(options.letters(), "Cefx");
    }
}
