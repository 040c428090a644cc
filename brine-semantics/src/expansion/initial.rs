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

//! Initial expansion
//!
//! Converts the parts of a word into an [`Expander`], performing tilde
//! expansion, parameter expansion, command substitution and arithmetic
//! expansion.

use super::Env;
use super::Result;
use super::arith;
use super::command_subst;
use super::expander::Expander;
use super::param;
use super::tilde;
use brine_syntax::syntax::Compound;
use brine_syntax::syntax::DqSegment;
use brine_syntax::syntax::Primary;
use brine_syntax::syntax::PrimaryKind;
use itertools::Itertools as _;

/// Performs the initial expansion on a word.
pub fn expand_compound(env: &mut Env<'_>, compound: &Compound) -> Result<Expander> {
    expand_parts(env, compound, false)
}

/// Performs the initial expansion on the argument of a parameter expansion
/// modifier.
///
/// Barewords in the argument may contain blanks. The blanks are subject to
/// field splitting like the results of expansions.
pub fn expand_argument(env: &mut Env<'_>, compound: &Compound) -> Result<Expander> {
    expand_parts(env, compound, true)
}

fn expand_parts(env: &mut Env<'_>, compound: &Compound, split_blanks: bool) -> Result<Expander> {
    let mut children = Vec::with_capacity(compound.parts.len() + 1);
    if let Some(user) = &compound.tilde_prefix {
        children.push(Expander::quoted(tilde::expand(env.frame, user)));
    }
    for part in &compound.parts {
        match &part.kind {
            PrimaryKind::Bareword(text) if split_blanks => children.extend(split_blanks_of(text)),
            _ => children.push(expand_primary(env, part)?),
        }
    }
    Ok(Expander::Compound(children))
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

fn split_blanks_of(text: &str) -> Vec<Expander> {
    let chunks = text.chars().chunk_by(|&c| is_blank(c));
    let result = chunks
        .into_iter()
        .map(|(blank, chars)| {
            let text = chars.collect::<String>();
            if blank {
                Expander::Scalar(text)
            } else {
                Expander::literal(text)
            }
        })
        .collect();
    result
}

/// Performs the initial expansion on a single part of a word.
pub fn expand_primary(env: &mut Env<'_>, primary: &Primary) -> Result<Expander> {
    Ok(match &primary.kind {
        PrimaryKind::Bareword(text) => Expander::literal(text.as_str()),
        PrimaryKind::SingleQuoted(text) => Expander::quoted(text.as_str()),
        PrimaryKind::DoubleQuoted(segments) => {
            let children = segments
                .iter()
                .map(|segment| expand_segment(env, segment))
                .collect::<Result<_>>()?;
            Expander::DoubleQuoted(children)
        }
        PrimaryKind::WildcardChar(c) => Expander::GlobMeta(*c),
        PrimaryKind::OutputCapture(chunk) => Expander::Scalar(command_subst::run(env, chunk)?),
        PrimaryKind::Variable(variable) => param::expand(env, variable)?,
        PrimaryKind::Arithmetic(segments) => {
            let expression = expand_text(env, segments)?;
            Expander::Scalar(arith::eval(env.frame, &expression)?)
        }
    })
}

fn expand_segment(env: &mut Env<'_>, segment: &DqSegment) -> Result<Expander> {
    match segment {
        DqSegment::String(text) => Ok(Expander::quoted(text.as_str())),
        DqSegment::Expansion(primary) => expand_primary(env, primary),
    }
}

/// Expands segments into a single string.
pub fn expand_text(env: &mut Env<'_>, segments: &[DqSegment]) -> Result<String> {
    let mut result = String::new();
    for segment in segments {
        result.push_str(&expand_segment(env, segment)?.expand_one_word());
    }
    Ok(result)
}
