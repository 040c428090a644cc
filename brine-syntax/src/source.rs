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

//! Source code that is passed to the parser.
//!
//! The parser does not read the source code as it is given. Before parsing,
//! every line continuation (a backslash immediately followed by a newline) is
//! removed from the code. [`Source`] keeps both the original code and the
//! preprocessed text, together with the offsets at which continuations were
//! removed so that positions in the text can be mapped back to the original.
//!
//! ```
//! # use brine_syntax::source::Source;
//! let source = Source::new("echo a\\\nb");
//! assert_eq!(source.text(), "echo ab");
//! assert_eq!(source.recover_pos(6), 8);
//! ```

use std::ops::Range;

/// Range of a syntax element in the preprocessed text
///
/// Both ends are byte offsets into [`Source::text`]. Use
/// [`Source::recover_range`] to obtain the range in the original code.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Span {
    /// Offset of the first byte
    pub begin: usize,
    /// Offset just past the last byte
    pub end: usize,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(begin: usize, end: usize) -> Self {
        Span { begin, end }
    }

    /// Returns the span as a `Range`.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }
}

/// Source code with line continuations removed
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Source {
    orig: String,
    text: String,
    /// Offsets into `text` where a continuation was removed, in increasing
    /// order
    continuations: Vec<usize>,
}

impl Source {
    /// Preprocesses the given code.
    ///
    /// Every backslash-newline pair is removed. A backslash at the very end of
    /// the code is treated as a continuation, too. A backslash escaped by
    /// another backslash does not start a continuation.
    pub fn new<S: Into<String>>(orig: S) -> Self {
        let orig = orig.into();
        let mut text = String::with_capacity(orig.len());
        let mut continuations = Vec::new();
        let mut chars = orig.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.peek() {
                    Some('\n') => {
                        chars.next();
                        continuations.push(text.len());
                        continue;
                    }
                    Some('\\') => {
                        chars.next();
                        text.push_str("\\\\");
                        continue;
                    }
                    None => {
                        // A trailing backslash counts as a continuation whose
                        // newline is missing.
                        continuations.push(text.len());
                        continue;
                    }
                    Some(_) => {}
                }
            }
            text.push(c);
        }
        Source {
            orig,
            text,
            continuations,
        }
    }

    /// Returns the code as it was given.
    #[must_use]
    pub fn orig(&self) -> &str {
        &self.orig
    }

    /// Returns the code with line continuations removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the offsets into the text where continuations were removed.
    #[must_use]
    pub fn continuations(&self) -> &[usize] {
        &self.continuations
    }

    /// Maps an offset in the text to the corresponding offset in the original
    /// code.
    ///
    /// Each continuation at or before `pos` accounts for two bytes of the
    /// original code.
    #[must_use]
    pub fn recover_pos(&self, pos: usize) -> usize {
        let count = self.continuations.partition_point(|&c| c <= pos);
        (pos + 2 * count).min(self.orig.len())
    }

    /// Maps a span to the corresponding range in the original code.
    #[must_use]
    pub fn recover_range(&self, span: Span) -> Range<usize> {
        let begin = self.recover_pos(span.begin);
        let end = self.recover_pos(span.end).max(begin);
        begin..end
    }

    /// Maps an offset in the original code back to the text.
    ///
    /// This is the inverse of [`recover_pos`](Self::recover_pos) for offsets
    /// that are not inside a removed continuation. Offsets inside a
    /// continuation map to the position just after it.
    #[must_use]
    pub fn text_pos(&self, orig_pos: usize) -> usize {
        // The i-th continuation starts at `c + 2 * i` in the original code.
        let removed = self
            .continuations
            .iter()
            .enumerate()
            .take_while(|&(i, &c)| c + 2 * i < orig_pos)
            .count();
        orig_pos.saturating_sub(2 * removed).min(self.text.len())
    }

    /// Returns the one-based line and column numbers of an offset in the
    /// original code.
    #[must_use]
    pub fn line_column(&self, orig_pos: usize) -> (usize, usize) {
        let orig_pos = orig_pos.min(self.orig.len());
        let before = &self.orig[..floor_char_boundary(&self.orig, orig_pos)];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

/// Rounds `index` down to the nearest character boundary of `s`.
pub(crate) fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
