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

//! Running traps
//!
//! Only the `EXIT` trap is run by the shell. Traps for signals are stored in
//! the frame and reported by the `trap` built-in, but the shell does not
//! catch signals.

use crate::runner::run_code;
use brine_env::Frame;

/// Runs the `EXIT` trap, if any.
///
/// The trap action is removed before running so that it runs only once. The
/// action runs with the exit status and control flow state of the shell put
/// aside, and they are restored afterward. If the action runs `exit`, its
/// status overrides the original exit status.
pub fn run_exit_trap(frame: &mut Frame) {
    let Some(command) = frame.traps.take_exit_command() else {
        return;
    };
    let exit = frame.exit.take();
    let fn_abort = std::mem::take(&mut frame.fn_abort);
    let loop_abort = frame.loop_abort.take();
    let last_status = frame.last_status;

    let _ = run_code(frame, &command, "trap");

    if frame.exit.is_none() {
        frame.exit = exit;
        frame.last_status = last_status;
    }
    frame.fn_abort = fn_abort;
    frame.loop_abort = loop_abort;
}
