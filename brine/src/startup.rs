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

//! Shell startup

use self::args::{Run, Source};
use brine_builtin::BUILTINS;
use brine_env::Frame;
use brine_env::semantics::ExitStatus;
use brine_syntax::parser::parse;
use brine_syntax::source::Source as SyntaxSource;
use brine_syntax::syntax::node::Node as _;
use brine_syntax::syntax::pretty::dump;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::io::Read as _;
use thiserror::Error;

pub mod args;

/// Name of the environment variable that enables logging
pub const LOG_VARIABLE: &str = "BRINE_LOG";

/// Parses the value of [`LOG_VARIABLE`].
///
/// Returns `None` if the value is not a log level name.
#[must_use]
pub fn log_level(value: &str) -> Option<LevelFilter> {
    value.parse().ok().filter(|&level| level != LevelFilter::Off)
}

/// Installs a logger writing to the standard error if [`LOG_VARIABLE`] names
/// a log level.
pub fn init_logger() {
    let Some(level) = std::env::var(LOG_VARIABLE).ok().as_deref().and_then(log_level) else {
        return;
    };
    if WriteLogger::init(level, Config::default(), std::io::stderr()).is_ok() {
        log::info!("logging at level {level}");
    }
}

/// Error returned by [`read_script`]
#[derive(Debug, Error)]
#[error("cannot read script file '{path}': {error}")]
pub struct ReadScriptError {
    pub path: String,
    #[source]
    pub error: std::io::Error,
}

impl ReadScriptError {
    /// Returns the exit status the shell should exit with.
    #[must_use]
    pub fn exit_status(&self) -> ExitStatus {
        match self.error.kind() {
            std::io::ErrorKind::NotFound => ExitStatus::NOT_FOUND,
            _ => ExitStatus::NOEXEC,
        }
    }
}

/// Reads the code to run.
///
/// Returns the code and the origin name used in syntax error messages.
/// Invalid UTF-8 sequences are replaced.
pub fn read_script(source: &Source) -> Result<(String, String), ReadScriptError> {
    match source {
        Source::String(code) => Ok((code.clone(), "-c".to_owned())),
        Source::File { path } => match std::fs::read(path) {
            Ok(bytes) => Ok((String::from_utf8_lossy(&bytes).into_owned(), path.clone())),
            Err(error) => Err(ReadScriptError {
                path: path.clone(),
                error,
            }),
        },
        Source::Stdin => {
            let mut bytes = Vec::new();
            match std::io::stdin().lock().read_to_end(&mut bytes) {
                Ok(_) => Ok((String::from_utf8_lossy(&bytes).into_owned(), "stdin".to_owned())),
                Err(error) => Err(ReadScriptError {
                    path: "-".to_owned(),
                    error,
                }),
            }
        }
    }
}

/// Parses the code and formats its syntax tree.
///
/// On a syntax error, returns the rendered error messages.
pub fn dump_ast(code: &str, origin: &str) -> Result<String, String> {
    let source = SyntaxSource::new(code);
    match parse(&source) {
        Ok(chunk) => Ok(dump(chunk.as_node(), &source)),
        Err(errors) => Err(errors.render(&source, origin)),
    }
}

/// Creates the frame in which the shell runs.
///
/// The frame has the process environment, the built-ins, the positional
/// parameters and the options from the command line.
#[must_use]
pub fn configure_frame(run: &Run) -> Frame {
    let mut arguments = Vec::with_capacity(run.positional_params.len() + 1);
    arguments.push(run.arg0.clone());
    arguments.extend(run.positional_params.iter().cloned());
    let mut frame = Frame::from_process(arguments);
    frame.builtins.extend(BUILTINS.iter().copied());
    for &(option, state) in &run.options {
        frame.options.set(option, state);
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use brine_env::option::{ErrExit, On};
    use std::io::Write as _;

    #[test]
    fn log_levels() {
        assert_eq!(log_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(log_level("WARN"), Some(LevelFilter::Warn));
        assert_eq!(log_level("off"), None);
        assert_eq!(log_level("loud"), None);
    }

    #[test]
    fn reading_command_string() {
        let source = Source::String("echo ok".to_owned());
        let (code, origin) = read_script(&source).unwrap();
        assert_eq!(code, "echo ok");
        assert_eq!(origin, "-c");
    }

    #[test]
    fn reading_script_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"x=1\n").unwrap();
        let path = file.path().to_str().unwrap().to_owned();
        let (code, origin) = read_script(&Source::File { path: path.clone() }).unwrap();
        assert_eq!(code, "x=1\n");
        assert_eq!(origin, path);
    }

    #[test]
    fn missing_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").to_str().unwrap().to_owned();
        let error = read_script(&Source::File { path }).unwrap_err();
        assert_eq!(error.exit_status(), ExitStatus::NOT_FOUND);
    }

    #[test]
    fn dumping_syntax_tree() {
        let output = dump_ast("echo hi", "-c").unwrap();
        assert!(output.starts_with("Chunk"), "{output}");
        assert_matches!(dump_ast("echo 'x", "-c"), Err(message) => {
            assert!(message.contains("the single quote is not closed"), "{message}");
        });
    }

    #[test]
    fn frame_configuration() {
        let run = Run {
            arg0: "script".to_owned(),
            positional_params: vec!["a".to_owned(), "b".to_owned()],
            options: vec![(ErrExit, On)],
            ..Run::default()
        };
        let frame = configure_frame(&run);
        assert_eq!(frame.arguments, ["script", "a", "b"]);
        assert!(frame.options.is_on(ErrExit));
        assert!(frame.builtins.contains_key("cd"));
    }
}
