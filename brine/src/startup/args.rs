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

//! Command line argument parser for the shell

use brine_env::option::Option as ShellOption;
use brine_env::option::State;
use brine_env::option::{parse_long, parse_short};
use std::iter::Peekable;
use thiserror::Error;

/// Input to run
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Source {
    /// Read from standard input (the `-s` option or no operand)
    #[default]
    Stdin,
    /// Read from a file (the first operand)
    File { path: String },
    /// Read from a string (the `-c` option)
    String(String),
}

/// Configuration for running the shell
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Run {
    /// Input source
    pub source: Source,
    /// Shell options in the order they were given
    pub options: Vec<(ShellOption, State)>,
    /// Value of `$0`
    pub arg0: String,
    /// Positional parameters
    pub positional_params: Vec<String>,
    /// Whether to print the syntax tree instead of running the code
    pub dump_ast: bool,
}

/// Parse result
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Parse {
    /// Runs the shell
    Run(Run),
    /// Prints help message and exit
    Help,
    /// Prints version information and exit
    Version,
}

/// Error in command line parsing
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Short option that is not defined
    #[error("unknown option `{0}`")]
    UnknownShortOption(char),

    /// Long option that is not defined
    #[error("unknown option `{0}`")]
    UnknownLongOption(String),

    /// Option missing an argument
    #[error("option `{0}` missing an argument")]
    MissingOptionArgument(String),

    /// The `-c` and `-s` options used together
    #[error("cannot specify both `-c` and `-s`")]
    ConflictingSources,

    /// Negated short option that is not a shell option
    #[error("cannot negate option `{0}`")]
    UnnegatableShortOption(char),

    /// The `-c` option without a command string
    #[error("missing command string for `-c`")]
    MissingCommandString,
}

/// Options that select the input source
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct SourceFlags {
    command: bool,
    stdin: bool,
}

/// Parses command line arguments.
///
/// The first argument is the name the shell was invoked with.
pub fn parse<I, S>(args: I) -> Result<Parse, Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into).peekable();
    let mut result = Run::default();
    let mut flags = SourceFlags::default();

    if let Some(arg0) = args.next_if(|_| true) {
        result.arg0 = arg0;
    }

    loop {
        if try_parse_short(&mut args, &mut result.options, &mut flags)? {
            continue;
        }
        let Some(arg) = args.next_if(|arg| arg.starts_with("--") && arg.len() > 2) else {
            break;
        };
        match &arg[2..] {
            "dump-ast" => result.dump_ast = true,
            "help" => return Ok(Parse::Help),
            "version" => return Ok(Parse::Version),
            name => match parse_long(name) {
                Ok(option) => result.options.push(option),
                Err(_) => return Err(Error::UnknownLongOption(arg)),
            },
        }
    }

    args.next_if(|arg| arg == "-" || arg == "--");

    if flags.command {
        if flags.stdin {
            return Err(Error::ConflictingSources);
        }
        let command = args.next_if(|_| true).ok_or(Error::MissingCommandString)?;
        result.source = Source::String(command);
        if let Some(name) = args.next_if(|_| true) {
            result.arg0 = name;
        }
    } else if !flags.stdin {
        if let Some(operand) = args.next_if(|_| true) {
            result.arg0.clone_from(&operand);
            result.source = Source::File { path: operand };
        }
    }
    result.positional_params = args.collect();

    Ok(Parse::Run(result))
}

/// Parses the next argument as short options.
///
/// Returns `Ok(false)` without consuming anything if the next argument is not
/// a short option.
fn try_parse_short<I: Iterator<Item = String>>(
    args: &mut Peekable<I>,
    options: &mut Vec<(ShellOption, State)>,
    flags: &mut SourceFlags,
) -> Result<bool, Error> {
    let Some(arg) = args.next_if(|arg| is_short_option(arg)) else {
        return Ok(false);
    };

    let mut chars = arg.chars();
    let negate = chars.next() == Some('+');

    while let Some(c) = chars.next() {
        match c {
            'c' | 's' if negate => return Err(Error::UnnegatableShortOption(c)),
            'c' => flags.command = true,
            's' => flags.stdin = true,
            'o' => {
                let rest = chars.as_str();
                let name = if rest.is_empty() {
                    args.next()
                        .ok_or_else(|| Error::MissingOptionArgument(arg.clone()))?
                } else {
                    rest.to_owned()
                };
                let (option, state) =
                    parse_long(&name).map_err(|_| Error::UnknownLongOption(name.clone()))?;
                options.push((option, if negate { !state } else { state }));
                break;
            }
            _ => {
                let (option, state) = parse_short(c).ok_or(Error::UnknownShortOption(c))?;
                options.push((option, if negate { !state } else { state }));
            }
        }
    }

    Ok(true)
}

/// Tests if the given string is a short option.
fn is_short_option(arg: &str) -> bool {
    let mut chars = arg.chars();
    let negate = match chars.next() {
        Some('-') => false,
        Some('+') => true,
        _ => return false,
    };
    match chars.next() {
        Some('-') if !negate => false,
        Some('+') if negate => false,
        Some(_) => true,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use brine_env::option::{AllExport, Clobber, ErrExit, Off, On, XTrace};

    fn run(args: &[&str]) -> Run {
        assert_matches!(parse(args.iter().copied()), Ok(Parse::Run(run)) => run)
    }

    #[test]
    fn no_arguments() {
        let result = run(&["brine"]);
        assert_eq!(result.arg0, "brine");
        assert_eq!(result.source, Source::Stdin);
        assert!(result.options.is_empty());
        assert!(result.positional_params.is_empty());
    }

    #[test]
    fn script_file_with_arguments() {
        let result = run(&["brine", "script.sh", "a", "-e"]);
        assert_eq!(result.arg0, "script.sh");
        assert_eq!(
            result.source,
            Source::File {
                path: "script.sh".to_owned()
            }
        );
        assert_eq!(result.positional_params, ["a", "-e"]);
    }

    #[test]
    fn command_string() {
        let result = run(&["brine", "-c", "echo $0 $1", "name", "arg"]);
        assert_eq!(result.source, Source::String("echo $0 $1".to_owned()));
        assert_eq!(result.arg0, "name");
        assert_eq!(result.positional_params, ["arg"]);

        let result = run(&["brine", "-ec", "true"]);
        assert_eq!(result.source, Source::String("true".to_owned()));
        assert_eq!(result.arg0, "brine");
        assert_eq!(result.options, [(ErrExit, On)]);
    }

    #[test]
    fn shell_options() {
        let result = run(&["brine", "-aC", "+x", "-o", "errexit", "+onoclobber", "--"]);
        assert_eq!(
            result.options,
            [
                (AllExport, On),
                (Clobber, Off),
                (XTrace, Off),
                (ErrExit, On),
                (Clobber, On),
            ]
        );
        assert_eq!(result.source, Source::Stdin);
    }

    #[test]
    fn long_options() {
        let result = run(&["brine", "--dump-ast", "--errexit", "-c", ":"]);
        assert!(result.dump_ast);
        assert_eq!(result.options, [(ErrExit, On)]);
        assert_eq!(parse(["brine", "--help"]), Ok(Parse::Help));
        assert_eq!(parse(["brine", "--version"]), Ok(Parse::Version));
    }

    #[test]
    fn stdin_with_positional_parameters() {
        let result = run(&["brine", "-s", "a", "b"]);
        assert_eq!(result.source, Source::Stdin);
        assert_eq!(result.positional_params, ["a", "b"]);
    }

    #[test]
    fn errors() {
        assert_eq!(parse(["brine", "-z"]), Err(Error::UnknownShortOption('z')));
        assert_eq!(
            parse(["brine", "--bogus"]),
            Err(Error::UnknownLongOption("--bogus".to_owned()))
        );
        assert_eq!(
            parse(["brine", "-o"]),
            Err(Error::MissingOptionArgument("-o".to_owned()))
        );
        assert_eq!(parse(["brine", "-c"]), Err(Error::MissingCommandString));
        assert_eq!(parse(["brine", "-cs", "x"]), Err(Error::ConflictingSources));
        assert_eq!(parse(["brine", "+c"]), Err(Error::UnnegatableShortOption('c')));
    }
}
