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

//! Here-documents
//!
//! The content of a here-document is fed to the command through a pipe.
//! Unless the delimiter was quoted, parameter expansion, command
//! substitution and arithmetic expansion are performed on the content
//! before it is written. A separate thread writes the content so that a
//! large document does not block the shell when the pipe is full.

use super::Error;
use crate::expansion::Env;
use crate::expansion::expand_text;
use brine_syntax::syntax::Heredoc;
use std::fs::File;
use std::io::Write as _;

/// Returns the content of a here-document, expanded if needed.
pub fn content(env: &mut Env<'_>, heredoc: &Heredoc) -> Result<String, Error> {
    let Some(body) = heredoc.body() else {
        return Ok(String::new());
    };
    if heredoc.quoted {
        Ok(body.value.clone())
    } else {
        Ok(expand_text(env, &body.segments)?)
    }
}

/// Opens a pipe from which the content of the here-document can be read.
pub fn open(env: &mut Env<'_>, heredoc: &Heredoc) -> Result<File, Error> {
    let content = content(env, heredoc)?;
    let (reader, mut writer) = crate::pipe().map_err(Error::HereDoc)?;
    std::thread::spawn(move || {
        if let Err(error) = writer.write_all(content.as_bytes()) {
            log::debug!("here-document content not fully written: {error}");
        }
    });
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::parse;
    use brine_env::Frame;
    use std::io::Read as _;
    use std::sync::Arc;

    fn heredoc(code: &str) -> Arc<Heredoc> {
        let chunk = parse(code);
        chunk.and_ors[0].pipelines[0].forms[0].redirs[0]
            .heredoc
            .clone()
            .unwrap()
    }

    #[test]
    fn expanded_content() {
        let mut frame = Frame::new();
        frame.variables.assign("USER", "alice").unwrap();
        let mut env = Env::new(&mut frame);
        let heredoc = heredoc("cat <<EOF\nhello $USER\nEOF\n");
        assert_eq!(content(&mut env, &heredoc).unwrap(), "hello alice\n");
    }

    #[test]
    fn quoted_delimiter_disables_expansion() {
        let mut frame = Frame::new();
        frame.variables.assign("USER", "alice").unwrap();
        let mut env = Env::new(&mut frame);
        let heredoc = heredoc("cat <<'EOF'\nhello $USER\nEOF\n");
        assert_eq!(content(&mut env, &heredoc).unwrap(), "hello $USER\n");
    }

    #[test]
    fn content_is_read_from_pipe() {
        let mut frame = Frame::new();
        let mut env = Env::new(&mut frame);
        let heredoc = heredoc("cat <<-EOF\n\tindented\n\tEOF\n");
        let mut reader = open(&mut env, &heredoc).unwrap();
        let mut content = String::new();
        reader.read_to_string(&mut content).unwrap();
        assert_eq!(content, "indented\n");
    }
}
