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

//! Execution of the case command

use crate::Handle;
use crate::Result;
use crate::command::Command;
use crate::expansion::Env;
use crate::expansion::expand_pattern;
use crate::expansion::expand_word;
use crate::pattern::Pattern;
use brine_env::Frame;
use brine_env::semantics::ExitStatus;
use brine_syntax::syntax::CaseItem;
use brine_syntax::syntax::Compound;
use std::ops::ControlFlow::Continue;

/// Executes the case command.
///
/// The patterns are expanded lazily: a pattern is expanded only if no
/// previous pattern has matched. Quoted characters in a pattern match
/// literally.
pub fn execute(frame: &mut Frame, subject: &Compound, items: &[CaseItem]) -> Result {
    let subject = match expand_word(&mut Env::new(frame), subject) {
        Ok(subject) => subject,
        Err(error) => return error.handle(frame),
    };

    for item in items {
        for pattern in &item.patterns {
            let pattern = match expand_pattern(&mut Env::new(frame), pattern) {
                Ok(pattern) => Pattern::new(&pattern),
                Err(error) => return error.handle(frame),
            };
            if pattern.is_match(&subject) {
                frame.last_status = ExitStatus::SUCCESS;
                return item.body.execute(frame);
            }
        }
    }

    frame.last_status = ExitStatus::SUCCESS;
    Continue(())
}
