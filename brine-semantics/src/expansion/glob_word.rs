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

//! Words that remember which characters are glob metacharacters

/// Piece of a [`GlobWord`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Segment {
    /// Unquoted text that contains no metacharacters
    Text(String),
    /// Quoted text
    Quoted(String),
    /// Unquoted `?`, `*`, `[` or `]`
    Meta(char),
}

/// Field produced by the expansion, before pathname expansion
///
/// Adjacent text segments of the same kind are always merged, so two words
/// with the same content compare equal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GlobWord {
    pub segments: Vec<Segment>,
}

/// Returns true if the character is a glob metacharacter when unquoted.
#[must_use]
pub fn is_glob_meta(c: char) -> bool {
    matches!(c, '?' | '*' | '[' | ']')
}

impl GlobWord {
    /// Creates a word consisting of quoted text.
    #[must_use]
    pub fn quoted(text: &str) -> Self {
        let mut word = GlobWord::default();
        word.push_quoted(text);
        word
    }

    /// Creates a word from unquoted text, treating glob metacharacters in it
    /// as such.
    #[must_use]
    pub fn unquoted(text: &str) -> Self {
        let mut word = GlobWord::default();
        for c in text.chars() {
            if is_glob_meta(c) {
                word.segments.push(Segment::Meta(c));
            } else {
                word.push_char(c);
            }
        }
        word
    }

    fn push_char(&mut self, c: char) {
        match self.segments.last_mut() {
            Some(Segment::Text(text)) => text.push(c),
            _ => self.segments.push(Segment::Text(c.to_string())),
        }
    }

    /// Appends unquoted text that should not be treated as metacharacters.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Text(last)) => last.push_str(text),
            _ => self.segments.push(Segment::Text(text.to_owned())),
        }
    }

    /// Appends quoted text.
    pub fn push_quoted(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Quoted(last)) => last.push_str(text),
            _ => self.segments.push(Segment::Quoted(text.to_owned())),
        }
    }

    /// Appends another word.
    pub fn append(&mut self, other: GlobWord) {
        for segment in other.segments {
            match segment {
                Segment::Text(text) => self.push_text(&text),
                Segment::Quoted(text) => self.push_quoted(&text),
                Segment::Meta(c) => self.segments.push(Segment::Meta(c)),
            }
        }
    }

    /// Whether the word contains any metacharacter.
    #[must_use]
    pub fn has_meta(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Meta(_)))
    }

    /// Returns the word with quotes removed.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) | Segment::Quoted(text) => result.push_str(text),
                Segment::Meta(c) => result.push(*c),
            }
        }
        result
    }

    /// Returns the characters of the word, each paired with its kind.
    pub(crate) fn chars(&self) -> Vec<(char, CharKind)> {
        let mut result = Vec::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => result.extend(text.chars().map(|c| (c, CharKind::Text))),
                Segment::Quoted(text) => {
                    result.extend(text.chars().map(|c| (c, CharKind::Quoted)))
                }
                Segment::Meta(c) => result.push((*c, CharKind::Meta)),
            }
        }
        result
    }

    /// Splits the word at every `/`, quoted or not.
    pub(crate) fn split_slashes(&self) -> Vec<GlobWord> {
        let mut components = vec![GlobWord::default()];
        for segment in &self.segments {
            match segment {
                Segment::Meta(c) => components
                    .last_mut()
                    .into_iter()
                    .for_each(|word| word.segments.push(Segment::Meta(*c))),
                Segment::Text(text) | Segment::Quoted(text) => {
                    let quoted = matches!(segment, Segment::Quoted(_));
                    for (i, piece) in text.split('/').enumerate() {
                        if i > 0 {
                            components.push(GlobWord::default());
                        }
                        if let Some(word) = components.last_mut() {
                            if quoted {
                                word.push_quoted(piece);
                            } else {
                                word.push_text(piece);
                            }
                        }
                    }
                }
            }
        }
        components
    }
}

/// Kind of a character in a [`GlobWord`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CharKind {
    Text,
    Quoted,
    Meta,
}
