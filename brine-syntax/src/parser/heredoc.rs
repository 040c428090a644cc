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

//! Here-document content parser

use super::core::Parser;
use super::core::PendingHeredoc;
use super::error::SyntaxError;
use crate::syntax::DqSegment;
use crate::syntax::HeredocBody;

/// Finds the line that equals `delim`.
///
/// Lines are searched in `text` starting at `begin`. Returns the end of the
/// content (the start of the delimiter line) and the position just after the
/// delimiter line, or `None` if the delimiter never appears.
fn find_delimiter(text: &str, begin: usize, delim: &str, strip_tabs: bool) -> Option<(usize, usize)> {
    let mut line_start = begin;
    while line_start < text.len() {
        let line_end = text[line_start..]
            .find('\n')
            .map_or(text.len(), |i| line_start + i);
        let mut line = &text[line_start..line_end];
        if strip_tabs {
            line = line.trim_start_matches('\t');
        }
        let next = (line_end + 1).min(text.len());
        if line == delim {
            return Some((line_start, next));
        }
        line_start = next;
    }
    None
}

/// Concatenates the lines of `content`, removing leading tabs if requested.
fn strip_lines(content: &str, strip_tabs: bool) -> String {
    if !strip_tabs {
        return content.to_owned();
    }
    content
        .split_inclusive('\n')
        .map(|line| line.trim_start_matches('\t'))
        .collect()
}

impl Parser<'_> {
    /// Reads the content of a here-document.
    ///
    /// The current position must be at the beginning of a line. The content
    /// of a here-document with a quoted delimiter is taken from the original
    /// code so that backslash-newline pairs are kept. Otherwise, the content
    /// is parsed for expansions.
    pub(super) fn heredoc_content(&mut self, pending: &PendingHeredoc) {
        let heredoc = &pending.heredoc;
        let body = if heredoc.quoted {
            let orig = self.source.orig();
            let begin = if self.pos == 0 {
                0
            } else {
                // The previous character is the newline that ends the line
                // containing the operator or the previous here-document.
                self.source.recover_pos(self.pos - 1) + 1
            };
            let (content_end, next) = match find_delimiter(orig, begin, &heredoc.delim, heredoc.strip_tabs) {
                Some(found) => found,
                None => {
                    self.error_at(
                        SyntaxError::UnclosedHeredocContent(heredoc.delim.clone()),
                        pending.position,
                    );
                    (orig.len(), orig.len())
                }
            };
            let value = strip_lines(&orig[begin.min(content_end)..content_end], heredoc.strip_tabs);
            self.pos = self.source.text_pos(next);
            HeredocBody {
                segments: vec![DqSegment::String(value.clone())],
                value,
            }
        } else {
            let begin = self.pos;
            let (content_end, next) =
                match find_delimiter(self.text, begin, &heredoc.delim, heredoc.strip_tabs) {
                    Some(found) => found,
                    None => {
                        self.error_at(
                            SyntaxError::UnclosedHeredocContent(heredoc.delim.clone()),
                            pending.position,
                        );
                        (self.text.len(), self.text.len())
                    }
                };
            let value = strip_lines(&self.text[begin..content_end], heredoc.strip_tabs);
            let saved = std::mem::replace(&mut self.backquote_depth, 0);
            let segments = self.heredoc_segments(content_end, heredoc.strip_tabs);
            self.backquote_depth = saved;
            self.pos = next.max(self.pos);
            HeredocBody { value, segments }
        };
        if heredoc.fill(body).is_err() {
            log::warn!("here-document `{}` filled twice", heredoc.delim);
        }
    }

    /// Parses the content of an unquoted here-document up to `end`.
    ///
    /// Parameter expansions, command substitutions and arithmetic expansions
    /// are recognized. A backslash quotes `$`, `` ` `` and `\`; other
    /// characters including quotes are literal.
    fn heredoc_segments(&mut self, end: usize, strip_tabs: bool) -> Vec<DqSegment> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut line_start = true;
        while self.pos < end {
            if line_start && strip_tabs {
                while self.pos < end && self.consume("\t") {}
                if self.pos >= end {
                    break;
                }
            }
            line_start = false;
            match self.peek() {
                Some('\\') if matches!(self.peek_second(), Some('$' | '`' | '\\')) => {
                    self.pos += 1;
                    literal.extend(self.next_char());
                }
                Some('$' | '`') => match self.dollar_or_backquote(true) {
                    Some(primary) => {
                        if !literal.is_empty() {
                            segments.push(DqSegment::String(std::mem::take(&mut literal)));
                        }
                        segments.push(DqSegment::Expansion(primary));
                    }
                    None => literal.push('$'),
                },
                Some(c) => {
                    self.pos += c.len_utf8();
                    literal.push(c);
                    line_start = c == '\n';
                }
                None => break,
            }
        }
        if !literal.is_empty() {
            segments.push(DqSegment::String(literal));
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::source::Source;
    use crate::syntax::{ModifierOp, PrimaryKind};
    use assert_matches::assert_matches;

    fn first_heredoc(code: &str) -> HeredocBody {
        let source = Source::new(code);
        let chunk = parse(&source).unwrap();
        let redir = &chunk.and_ors[0].pipelines[0].forms[0].redirs[0];
        redir.heredoc.as_ref().unwrap().body().unwrap().clone()
    }

    #[test]
    fn delimiter_search() {
        assert_eq!(find_delimiter("a\nEOF\nb", 0, "EOF", false), Some((2, 6)));
        assert_eq!(find_delimiter("a\n\tEOF", 0, "EOF", true), Some((2, 6)));
        assert_eq!(find_delimiter("a\n\tEOF", 0, "EOF", false), None);
    }

    #[test]
    fn unquoted_heredoc_with_expansion() {
        let body = first_heredoc("cat <<EOF\nhello $USER\nEOF\n");
        assert_eq!(body.value, "hello $USER\n");
        assert_eq!(body.segments.len(), 3);
        assert_eq!(body.segments[0], DqSegment::String("hello ".to_owned()));
        assert_matches!(&body.segments[1], DqSegment::Expansion(primary) => {
            assert_matches!(&primary.kind, PrimaryKind::Variable(v) if v.name == "USER");
        });
        assert_eq!(body.segments[2], DqSegment::String("\n".to_owned()));
    }

    #[test]
    fn heredoc_with_modifier() {
        let body = first_heredoc("cat <<EOF\n${x:-a b}\nEOF\n");
        assert_eq!(body.segments.len(), 2);
        assert_matches!(&body.segments[0], DqSegment::Expansion(primary) => {
            assert_matches!(&primary.kind, PrimaryKind::Variable(v) => {
                assert_eq!(v.name, "x");
                let modifier = v.modifier.as_ref().unwrap();
                assert_eq!(modifier.operator, ModifierOp::ColonHyphen);
                assert_matches!(&modifier.argument.parts[..], [part] => {
                    assert_eq!(part.kind, PrimaryKind::Bareword("a b".to_owned()));
                });
            });
        });
        assert_eq!(body.segments[1], DqSegment::String("\n".to_owned()));
    }

    #[test]
    fn quoted_heredoc_keeps_everything() {
        let body = first_heredoc("cat <<'EOF'\n$x \\\n`y`\nEOF\n");
        assert_eq!(body.value, "$x \\\n`y`\n");
        assert_eq!(body.segments, [DqSegment::String(body.value.clone())]);
    }

    #[test]
    fn tabs_are_stripped() {
        let body = first_heredoc("cat <<-END\n\t\tone\n\ttwo\n\tEND\n");
        assert_eq!(body.value, "one\ntwo\n");
        assert_eq!(body.segments, [DqSegment::String("one\ntwo\n".to_owned())]);
    }

    #[test]
    fn two_heredocs_on_one_line() {
        let source = Source::new("cat <<A <<B\na\nA\nb\nB\necho done\n");
        let chunk = parse(&source).unwrap();
        let redirs = &chunk.and_ors[0].pipelines[0].forms[0].redirs;
        assert_eq!(redirs[0].heredoc.as_ref().unwrap().value(), Some("a\n"));
        assert_eq!(redirs[1].heredoc.as_ref().unwrap().value(), Some("b\n"));
        assert_eq!(chunk.and_ors.len(), 2);
    }

    #[test]
    fn backslashes_in_heredoc() {
        let body = first_heredoc("cat <<EOF\n\\$x \\\"\nEOF\n");
        assert_eq!(body.segments, [DqSegment::String("$x \\\"\n".to_owned())]);
    }

    #[test]
    fn missing_delimiter_is_error() {
        let source = Source::new("cat <<EOF\nabc\n");
        let errors = parse(&source).unwrap_err();
        assert_eq!(
            errors.errors[0].cause,
            SyntaxError::UnclosedHeredocContent("EOF".to_owned())
        );
        assert_eq!(errors.errors[0].position, 4);
    }

    #[test]
    fn missing_content_is_error() {
        let source = Source::new("cat <<EOF");
        let errors = parse(&source).unwrap_err();
        assert_eq!(
            errors.errors[0].cause,
            SyntaxError::MissingHeredocContent("EOF".to_owned())
        );
    }
}
