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

//! Execution of the for loop

use super::Iteration;
use super::in_loop;
use super::loop_control;
use super::unwind;
use crate::Handle;
use crate::Result;
use crate::command::Command;
use crate::expansion;
use crate::expansion::Env;
use crate::expansion::expand_words;
use crate::xtrace::trace_fields;
use brine_env::Frame;
use brine_env::semantics::ExitStatus;
use brine_syntax::syntax::Chunk;
use brine_syntax::syntax::Compound;
use std::ops::ControlFlow::Continue;

/// Executes the for loop.
pub fn execute(frame: &mut Frame, name: &str, values: Option<&[Compound]>, body: &Chunk) -> Result {
    let values = match values {
        Some(words) => match expand_words(&mut Env::new(frame), words) {
            Ok(fields) => fields,
            Err(error) => return error.handle(frame),
        },
        None => frame.arguments.iter().skip(1).cloned().collect(),
    };

    if frame.options.is_on(brine_env::option::XTrace) {
        let header = ["for".to_owned(), name.to_owned(), "in".to_owned()];
        let fields: Vec<String> = header.into_iter().chain(values.iter().cloned()).collect();
        trace_fields(frame, &fields);
    }

    frame.last_status = ExitStatus::SUCCESS;
    in_loop(frame, |frame| {
        for value in values {
            if let Err(error) = frame.assign_variable(name, value) {
                return expansion::Error::from(error).handle(frame);
            }
            let _ = body.execute(frame);
            match loop_control(frame) {
                Iteration::Continue => {}
                iteration @ (Iteration::Stop | Iteration::Unwind) => return unwind(iteration),
            }
        }
        Continue(())
    })
}
