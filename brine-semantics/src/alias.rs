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

//! Alias substitution
//!
//! Alias substitution replaces the command name of a simple command with the
//! value of the alias of the same name. Only a word that is a plain bareword
//! is subject to substitution. The replacement is split into words at
//! blanks and is itself subject to alias substitution, except that an alias
//! is not substituted again while its own replacement is being processed.
//! If the value of an alias ends with a blank, the word following the alias
//! is also subject to substitution.

use brine_env::alias::Alias;
use brine_env::alias::AliasSet;
use brine_syntax::syntax::Compound;
use brine_syntax::syntax::Primary;
use brine_syntax::syntax::PrimaryKind;
use std::borrow::Cow;
use std::sync::Arc;

/// Performs alias substitution on the words of a simple command.
///
/// Returns the words unchanged if the command name is not an alias.
#[must_use]
pub fn substitute<'a>(aliases: &AliasSet, words: &'a [Compound]) -> Cow<'a, [Compound]> {
    let mut active = Vec::new();
    match words.first() {
        Some(first) if lookup(aliases, first, &active).is_some() => {
            Cow::Owned(substitute_list(aliases, words, &mut active).0)
        }
        _ => Cow::Borrowed(words),
    }
}

fn lookup(aliases: &AliasSet, word: &Compound, active: &[String]) -> Option<Arc<Alias>> {
    let name = word.as_bareword()?;
    if active.iter().any(|active| active == name) {
        return None;
    }
    aliases.get(name).map(|entry| entry.0.clone())
}

/// Substitutes aliases in a list of words whose first word is eligible.
///
/// The second value is true if the word following the list is eligible.
fn substitute_list(
    aliases: &AliasSet,
    words: &[Compound],
    active: &mut Vec<String>,
) -> (Vec<Compound>, bool) {
    let mut result = Vec::new();
    let mut eligible = true;
    for word in words {
        let alias = if eligible {
            lookup(aliases, word, active)
        } else {
            None
        };
        let Some(alias) = alias else {
            result.push(word.clone());
            eligible = false;
            continue;
        };

        log::trace!("substituting alias {:?}", alias.name);
        let replacement = alias
            .words()
            .map(|text| Compound {
                span: word.span,
                tilde_prefix: None,
                parts: vec![Primary {
                    span: word.span,
                    kind: PrimaryKind::Bareword(text.to_owned()),
                }],
            })
            .collect::<Vec<_>>();
        active.push(alias.name.clone());
        let (substituted, next_eligible) = substitute_list(aliases, &replacement, active);
        active.pop();
        result.extend(substituted);
        eligible = next_eligible || alias.ends_with_blank();
    }
    (result, eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::parse;
    use brine_env::alias::define;

    fn words(code: &str) -> Vec<Compound> {
        parse(code).and_ors[0].pipelines[0].forms[0].words.clone()
    }

    fn texts(words: &[Compound]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn no_alias() {
        let aliases = AliasSet::new();
        let words = words("ls -l");
        assert!(matches!(substitute(&aliases, &words), Cow::Borrowed(_)));
    }

    #[test]
    fn simple_substitution() {
        let mut aliases = AliasSet::new();
        define(&mut aliases, "ll".into(), "ls -l".into()).unwrap();
        let words = words("ll ll dir");
        assert_eq!(texts(&substitute(&aliases, &words)), ["ls", "-l", "ll", "dir"]);
    }

    #[test]
    fn nested_and_recursive_aliases() {
        let mut aliases = AliasSet::new();
        define(&mut aliases, "ls".into(), "ls -F".into()).unwrap();
        define(&mut aliases, "l".into(), "ls -a".into()).unwrap();
        let words = words("l x");
        assert_eq!(texts(&substitute(&aliases, &words)), ["ls", "-F", "-a", "x"]);
    }

    #[test]
    fn trailing_blank_makes_next_word_eligible() {
        let mut aliases = AliasSet::new();
        define(&mut aliases, "sudo".into(), "sudo ".into()).unwrap();
        define(&mut aliases, "ll".into(), "ls -l".into()).unwrap();
        let words = words("sudo ll ll");
        assert_eq!(texts(&substitute(&aliases, &words)), ["sudo", "ls", "-l", "ll"]);
    }

    #[test]
    fn quoted_word_is_not_substituted() {
        let mut aliases = AliasSet::new();
        define(&mut aliases, "ll".into(), "ls -l".into()).unwrap();
        let words = words("'ll'");
        assert!(matches!(substitute(&aliases, &words), Cow::Borrowed(_)));
    }
}
