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

//! Arithmetic expansion

use super::Error;
use super::Result;
use brine_env::Frame;
use std::collections::HashMap;

/// Evaluates an arithmetic expression.
///
/// Variables referenced in the expression are read from the frame, and
/// variables assigned in the expression are written back.
pub fn eval(frame: &mut Frame, expression: &str) -> Result<String> {
    let before: HashMap<String, String> = frame
        .variables
        .iter()
        .filter_map(|(name, variable)| Some((name.to_owned(), variable.value.clone()?)))
        .collect();
    let mut variables = before.clone();
    let value = yash_arith::eval(expression, &mut variables)
        .map_err(|error| Error::Arith(error.to_string()))?;
    for (name, new_value) in variables {
        if before.get(&name) != Some(&new_value) {
            frame.assign_variable(&name, new_value)?;
        }
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn evaluation_with_variables() {
        let mut frame = Frame::new();
        frame.variables.assign("x", "1").unwrap();
        frame.variables.assign("y", "2").unwrap();
        assert_eq!(eval(&mut frame, "x+y*3").unwrap(), "7");
    }

    #[test]
    fn assignment_is_written_back() {
        let mut frame = Frame::new();
        frame.variables.assign("i", "4").unwrap();
        assert_eq!(eval(&mut frame, "i+=1").unwrap(), "5");
        assert_eq!(frame.variables.value("i"), Some("5"));
    }

    #[test]
    fn errors() {
        let mut frame = Frame::new();
        assert_matches!(eval(&mut frame, "1/0"), Err(Error::Arith(_)));
        frame.variables.assign("r", "1").unwrap();
        frame.variables.make_read_only("r");
        assert_matches!(eval(&mut frame, "r=2"), Err(Error::AssignReadOnly(_)));
    }
}
