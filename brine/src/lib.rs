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

//! This is an internal library crate for the brine shell. The entry point is
//! the [`main`] function, which is used as the `main` function of the binary.
//! It parses the command line, reads the script, runs it in a new frame and
//! exits the process with the resulting exit status.

pub mod startup;

use self::startup::args::Parse;
use brine_env::semantics::ExitStatus;
use brine_semantics::Evaler;

const USAGE: &str = "\
usage: brine [-aCefnuvx] [-o name]... [--dump-ast] [file [arg...]]
       brine [-aCefnuvx] [-o name]... [--dump-ast] -c command [name [arg...]]
       brine [-aCefnuvx] [-o name]... [--dump-ast] -s [arg...]
";

/// Runs the shell with the command line arguments and returns the exit
/// status.
pub fn run<I: IntoIterator<Item = String>>(args: I) -> ExitStatus {
    let args: Vec<String> = args.into_iter().collect();
    let name = args.first().map_or("brine", String::as_str).to_owned();

    let run = match startup::args::parse(args) {
        Ok(Parse::Run(run)) => run,
        Ok(Parse::Help) => {
            print!("{USAGE}");
            return ExitStatus::SUCCESS;
        }
        Ok(Parse::Version) => {
            println!("brine {}", env!("CARGO_PKG_VERSION"));
            return ExitStatus::SUCCESS;
        }
        Err(error) => {
            eprint!("{name}: {error}\n{USAGE}");
            return ExitStatus::ERROR;
        }
    };
    log::debug!("starting with {run:?}");

    let (code, origin) = match startup::read_script(&run.source) {
        Ok(script) => script,
        Err(error) => {
            eprintln!("{name}: {error}");
            return error.exit_status();
        }
    };

    if run.dump_ast {
        return match startup::dump_ast(&code, &origin) {
            Ok(tree) => {
                print!("{tree}");
                ExitStatus::SUCCESS
            }
            Err(message) => {
                eprint!("{message}");
                ExitStatus::SYNTAX_ERROR
            }
        };
    }

    let mut evaler = Evaler::new(startup::configure_frame(&run));
    evaler.eval(&code, &origin);
    evaler.finish()
}

pub fn main() -> ! {
    startup::init_logger();
    let status = run(std::env::args());
    std::process::exit(status.0)
}
