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

//! Umask built-in
//!
//! The **`umask`** built-in shows or sets the file mode creation mask.
//!
//! # Synopsis
//!
//! ```sh
//! umask [-S] [mode]
//! ```
//!
//! # Description
//!
//! Without *mode*, the built-in prints the current mask as a four-digit
//! octal number. With the **`-S`** option, the mask is printed in symbolic
//! notation like `u=rwx,g=rx,o=rx`, which lists the permissions that are
//! *not* masked.
//!
//! # Operands
//!
//! *mode* is either an octal number or a comma-separated list of symbolic
//! clauses. Each clause is zero or more of `u`, `g`, `o`, `a` followed by
//! one or more actions. An action is `+`, `-` or `=` followed by zero or
//! more of `r`, `w`, `x`. An empty who list means `a`. Symbolic clauses
//! modify the set of permissions that are allowed.
//!
//! # Errors
//!
//! It is an error if *mode* is not a valid mask.
//!
//! # Exit status
//!
//! Zero unless an error occurred.

use crate::common::{getopt, output, report_error};
use brine_env::Frame;
use brine_env::builtin::Result;
use brine_env::semantics::ExitStatus;
use nix::sys::stat::{Mode, umask};
use std::ops::ControlFlow::Continue;
use thiserror::Error;

/// Error in parsing a mode operand
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    #[error("`{0}` is not a valid octal mask")]
    InvalidOctal(String),
    #[error("unexpected character `{0}` in symbolic mode")]
    UnexpectedChar(char),
    #[error("an operator is missing in symbolic mode")]
    MissingOperator,
}

/// Bits of the `u`, `g` and `o` classes
const WHO_BITS: [(char, u32); 3] = [('u', 0o700), ('g', 0o070), ('o', 0o007)];

/// Bits of the `r`, `w` and `x` permissions in all classes
const PERM_BITS: [(char, u32); 3] = [('r', 0o444), ('w', 0o222), ('x', 0o111)];

/// Parses a mode operand and computes the new mask from the current one.
pub fn parse_mode(operand: &str, current: u32) -> std::result::Result<u32, ParseError> {
    if operand.starts_with(|c: char| c.is_ascii_digit()) {
        return u32::from_str_radix(operand, 8)
            .ok()
            .filter(|&mask| mask <= 0o777)
            .ok_or_else(|| ParseError::InvalidOctal(operand.to_owned()));
    }

    let mut allowed = !current & 0o777;
    for clause in operand.split(',') {
        let mut chars = clause.chars().peekable();
        let mut who = 0;
        while let Some(&c) = chars.peek() {
            match c {
                'a' => who |= 0o777,
                _ => match WHO_BITS.iter().find(|&&(symbol, _)| symbol == c) {
                    Some(&(_, bits)) => who |= bits,
                    None => break,
                },
            }
            chars.next();
        }
        if who == 0 {
            who = 0o777;
        }

        if chars.peek().is_none() {
            return Err(ParseError::MissingOperator);
        }
        while let Some(operator) = chars.next() {
            if !matches!(operator, '+' | '-' | '=') {
                return Err(ParseError::UnexpectedChar(operator));
            }
            let mut perm = 0;
            while let Some(&c) = chars.peek() {
                match PERM_BITS.iter().find(|&&(symbol, _)| symbol == c) {
                    Some(&(_, bits)) => perm |= bits,
                    None if matches!(c, '+' | '-' | '=') => break,
                    None => return Err(ParseError::UnexpectedChar(c)),
                }
                chars.next();
            }
            let perm = perm & who;
            match operator {
                '+' => allowed |= perm,
                '-' => allowed &= !perm,
                _ => allowed = (allowed & !who) | perm,
            }
        }
    }
    Ok(!allowed & 0o777)
}

/// Formats a mask in symbolic notation.
///
/// The result lists the permissions that the mask allows.
pub fn format_symbolic(mask: u32) -> String {
    let clauses = WHO_BITS.iter().map(|&(who, who_bits)| {
        let perms = PERM_BITS
            .iter()
            .filter(|&&(_, bits)| mask & bits & who_bits == 0)
            .map(|&(perm, _)| perm)
            .collect::<String>();
        format!("{who}={perms}")
    });
    let mut result = itertools::join(clauses, ",");
    result.push('\n');
    result
}

/// Returns the current mask without changing it.
fn current_mask() -> u32 {
    let mask = umask(Mode::empty());
    umask(mask);
    mask.bits() as u32
}

/// Entry point for executing the `umask` built-in
pub fn main(frame: &mut Frame, args: Vec<String>) -> Result {
    let (opts, operands) = match getopt(args, "S") {
        Ok(parsed) => parsed,
        Err(error) => return report_error(frame, "umask", error),
    };
    let current = current_mask();

    match operands.as_slice() {
        [] if opts.is_empty() => output(frame, "umask", &format!("{current:04o}\n")),
        [] => output(frame, "umask", &format_symbolic(current)),
        [operand] => match parse_mode(operand, current) {
            Ok(mask) => {
                umask(Mode::from_bits_truncate(mask as _));
                (ExitStatus::SUCCESS, Continue(()))
            }
            Err(error) => report_error(frame, "umask", error),
        },
        [_, extra, ..] => report_error(frame, "umask", format_args!("unexpected operand `{extra}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn octal_modes() {
        assert_eq!(parse_mode("022", 0), Ok(0o022));
        assert_eq!(parse_mode("0777", 0), Ok(0o777));
        assert_matches!(parse_mode("8", 0), Err(ParseError::InvalidOctal(_)));
        assert_matches!(parse_mode("1000", 0), Err(ParseError::InvalidOctal(_)));
    }

    #[test]
    fn symbolic_modes() {
        assert_eq!(parse_mode("u=rwx,g=rx,o=rx", 0o077), Ok(0o022));
        assert_eq!(parse_mode("go-w", 0), Ok(0o022));
        assert_eq!(parse_mode("+x", 0o111), Ok(0));
        assert_eq!(parse_mode("a=", 0), Ok(0o777));
        assert_eq!(parse_mode("u=rw-w", 0o077), Ok(0o377));
        assert_eq!(parse_mode("o=r", 0o022), Ok(0o023));
    }

    #[test]
    fn invalid_symbolic_modes() {
        assert_eq!(parse_mode("u", 0), Err(ParseError::MissingOperator));
        assert_eq!(parse_mode("u+q", 0), Err(ParseError::UnexpectedChar('q')));
        assert_eq!(parse_mode("z", 0), Err(ParseError::UnexpectedChar('z')));
    }

    #[test]
    fn symbolic_format() {
        assert_eq!(format_symbolic(0o022), "u=rwx,g=rx,o=rx\n");
        assert_eq!(format_symbolic(0o777), "u=,g=,o=\n");
        assert_eq!(format_symbolic(0o027), "u=rwx,g=rx,o=\n");
    }
}
