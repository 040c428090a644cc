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

//! Parameter expansion

use super::Env;
use super::Error;
use super::Result;
use super::expander::Expander;
use super::initial::expand_argument;
use crate::pattern::Pattern;
use brine_env::Frame;
use brine_env::option;
use brine_syntax::parser::is_name;
use brine_syntax::syntax::Modifier;
use brine_syntax::syntax::ModifierOp;
use brine_syntax::syntax::Variable;

/// Value of a parameter
#[derive(Clone, Debug, Eq, PartialEq)]
enum Value {
    Unset,
    Scalar(String),
    /// Positional parameters, the value of `$@` and `$*`
    Array(Vec<String>),
}

impl Value {
    /// Whether the value is unset, or empty if `test_null` is true.
    fn is_unset_or(&self, test_null: bool) -> bool {
        match self {
            Value::Unset => true,
            Value::Scalar(value) => test_null && value.is_empty(),
            Value::Array(values) => test_null && values.is_empty(),
        }
    }
}

fn lookup(frame: &Frame, name: &str) -> Value {
    match name {
        "@" | "*" => Value::Array(frame.arguments.iter().skip(1).cloned().collect()),
        "#" => Value::Scalar(frame.arguments.len().saturating_sub(1).to_string()),
        "?" => Value::Scalar(frame.last_status.to_string()),
        "-" => Value::Scalar(frame.options.letters()),
        "$" => Value::Scalar(frame.pid.to_string()),
        // Asynchronous lists are not supported, so there is no last
        // background process.
        "!" => Value::Unset,
        _ if name.starts_with(|c: char| c.is_ascii_digit()) => name
            .parse::<usize>()
            .ok()
            .and_then(|index| frame.arguments.get(index))
            .map_or(Value::Unset, |value| Value::Scalar(value.clone())),
        _ => frame
            .variables
            .value(name)
            .map_or(Value::Unset, |value| Value::Scalar(value.to_owned())),
    }
}

/// Fails if the value is unset and the `nounset` option is on.
fn check_set(frame: &Frame, name: &str, value: &Value) -> Result<()> {
    if *value == Value::Unset && !frame.options.is_on(option::Unset) {
        return Err(Error::UnsetParameter(name.to_owned()));
    }
    Ok(())
}

fn to_expander(frame: &Frame, name: &str, value: Value) -> Expander {
    match value {
        Value::Unset => Expander::Scalar(String::new()),
        Value::Scalar(value) => Expander::Scalar(value),
        Value::Array(elems) => Expander::Array {
            elems,
            ifs: frame.ifs().to_owned(),
            is_at: name == "@",
        },
    }
}

/// Performs a parameter expansion.
pub fn expand(env: &mut Env<'_>, variable: &Variable) -> Result<Expander> {
    let name = variable.name.as_str();
    let value = lookup(env.frame, name);

    if variable.length_op {
        check_set(env.frame, name, &value)?;
        let length = match &value {
            Value::Unset => 0,
            Value::Scalar(value) => value.chars().count(),
            Value::Array(values) => values.len(),
        };
        return Ok(Expander::Scalar(length.to_string()));
    }

    let Some(modifier) = &variable.modifier else {
        check_set(env.frame, name, &value)?;
        return Ok(to_expander(env.frame, name, value));
    };
    apply_modifier(env, name, value, modifier)
}

fn apply_modifier(
    env: &mut Env<'_>,
    name: &str,
    value: Value,
    modifier: &Modifier,
) -> Result<Expander> {
    use ModifierOp::*;
    let op = modifier.operator;
    match op {
        ColonHyphen | Hyphen => {
            if value.is_unset_or(op.tests_null()) {
                expand_argument(env, &modifier.argument)
            } else {
                Ok(to_expander(env.frame, name, value))
            }
        }

        ColonPlus | Plus => {
            if value.is_unset_or(op.tests_null()) {
                Ok(Expander::Scalar(String::new()))
            } else {
                expand_argument(env, &modifier.argument)
            }
        }

        ColonEqual | Equal => {
            if !value.is_unset_or(op.tests_null()) {
                return Ok(to_expander(env.frame, name, value));
            }
            if !is_name(name) {
                return Err(Error::NonAssignableParameter(name.to_owned()));
            }
            let new_value = expand_argument(env, &modifier.argument)?.expand_one_word();
            env.frame.assign_variable(name, new_value.clone())?;
            Ok(Expander::Scalar(new_value))
        }

        ColonQuestion | Question => {
            if !value.is_unset_or(op.tests_null()) {
                return Ok(to_expander(env.frame, name, value));
            }
            let mut message = expand_argument(env, &modifier.argument)?.expand_one_word();
            if message.is_empty() {
                message = if op.tests_null() {
                    "parameter null or not set"
                } else {
                    "parameter not set"
                }
                .to_owned();
            }
            Err(Error::EmptyParameter {
                name: name.to_owned(),
                message,
            })
        }

        DoublePercent | Percent | DoubleHash | Hash => {
            check_set(env.frame, name, &value)?;
            let pattern = Pattern::new(&expand_argument(env, &modifier.argument)?.to_glob_word());
            let value = match value {
                Value::Unset => Value::Scalar(String::new()),
                Value::Scalar(value) => Value::Scalar(trim(&value, &pattern, op)),
                Value::Array(values) => Value::Array(
                    values
                        .iter()
                        .map(|value| trim(value, &pattern, op))
                        .collect(),
                ),
            };
            Ok(to_expander(env.frame, name, value))
        }
    }
}

/// Removes the prefix or suffix matching the pattern.
///
/// `#` and `%` remove the shortest match, `##` and `%%` the longest.
fn trim(value: &str, pattern: &Pattern, op: ModifierOp) -> String {
    let mut boundaries = value
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(value.len()));
    let found = match op {
        ModifierOp::Hash => boundaries.find(|&i| pattern.is_match(&value[..i])),
        ModifierOp::DoubleHash => boundaries.rev().find(|&i| pattern.is_match(&value[..i])),
        ModifierOp::Percent => boundaries.rev().find(|&i| pattern.is_match(&value[i..])),
        ModifierOp::DoublePercent => boundaries.find(|&i| pattern.is_match(&value[i..])),
        _ => None,
    };
    match (op, found) {
        (ModifierOp::Hash | ModifierOp::DoubleHash, Some(i)) => value[i..].to_owned(),
        (ModifierOp::Percent | ModifierOp::DoublePercent, Some(i)) => value[..i].to_owned(),
        _ => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::expand_word;
    use crate::tests::parse_word;
    use assert_matches::assert_matches;

    fn expand_str(frame: &mut Frame, word: &str) -> Result<String> {
        expand_word(&mut Env::new(frame), &parse_word(word))
    }

    #[test]
    fn special_parameters() {
        let mut frame = Frame::new();
        frame.arguments = vec!["sh".into(), "a".into(), "b".into()];
        frame.last_status = 3.into();
        assert_eq!(expand_str(&mut frame, "$#").unwrap(), "2");
        assert_eq!(expand_str(&mut frame, "$?").unwrap(), "3");
        assert_eq!(expand_str(&mut frame, "$0").unwrap(), "sh");
        assert_eq!(expand_str(&mut frame, "$2").unwrap(), "b");
        assert_eq!(expand_str(&mut frame, "${3}").unwrap(), "");
        assert_eq!(expand_str(&mut frame, "$$").unwrap(), frame.pid.to_string());
        assert_eq!(expand_str(&mut frame, "${!-none}").unwrap(), "none");
    }

    #[test]
    fn length() {
        let mut frame = Frame::new();
        frame.variables.assign("v", "αβγ").unwrap();
        frame.arguments = vec!["sh".into(), "a".into(), "b".into()];
        assert_eq!(expand_str(&mut frame, "${#v}").unwrap(), "3");
        assert_eq!(expand_str(&mut frame, "${#@}").unwrap(), "2");
        assert_eq!(expand_str(&mut frame, "${#}").unwrap(), "2");
    }

    #[test]
    fn default_and_alternative_values() {
        let mut frame = Frame::new();
        frame.variables.assign("e", "").unwrap();
        frame.variables.assign("v", "x").unwrap();
        assert_eq!(expand_str(&mut frame, "${u-d}").unwrap(), "d");
        assert_eq!(expand_str(&mut frame, "${e-d}").unwrap(), "");
        assert_eq!(expand_str(&mut frame, "${e:-d}").unwrap(), "d");
        assert_eq!(expand_str(&mut frame, "${v:-d}").unwrap(), "x");
        assert_eq!(expand_str(&mut frame, "${u+a}").unwrap(), "");
        assert_eq!(expand_str(&mut frame, "${e+a}").unwrap(), "a");
        assert_eq!(expand_str(&mut frame, "${e:+a}").unwrap(), "");
        assert_eq!(expand_str(&mut frame, "${v:+a}").unwrap(), "a");
    }

    #[test]
    fn assigning_default_value() {
        let mut frame = Frame::new();
        assert_eq!(expand_str(&mut frame, "${x:=now}").unwrap(), "now");
        assert_eq!(frame.variables.value("x"), Some("now"));
        assert_eq!(expand_str(&mut frame, "${x:=later}").unwrap(), "now");

        let error = expand_str(&mut frame, "${1=a}").unwrap_err();
        assert_matches!(error, Error::NonAssignableParameter(name) if name == "1");

        frame.variables.make_read_only("r");
        let error = expand_str(&mut frame, "${r=a}").unwrap_err();
        assert_matches!(error, Error::AssignReadOnly(_));
    }

    #[test]
    fn error_for_unset_parameter() {
        let mut frame = Frame::new();
        let error = expand_str(&mut frame, "${u?oops}").unwrap_err();
        assert_matches!(&error, Error::EmptyParameter { name, message }
            if name == "u" && message == "oops");
        assert!(error.is_fatal());

        frame.variables.assign("e", "").unwrap();
        assert_eq!(expand_str(&mut frame, "${e?}").unwrap(), "");
        let error = expand_str(&mut frame, "${e:?}").unwrap_err();
        assert_eq!(error.to_string(), "e: parameter null or not set");
    }

    #[test]
    fn trimming() {
        let mut frame = Frame::new();
        frame.variables.assign("p", "/usr/local/bin").unwrap();
        assert_eq!(expand_str(&mut frame, "${p#*/}").unwrap(), "usr/local/bin");
        assert_eq!(expand_str(&mut frame, "${p##*/}").unwrap(), "bin");
        assert_eq!(expand_str(&mut frame, "${p%/*}").unwrap(), "/usr/local");
        assert_eq!(expand_str(&mut frame, "${p%%/*}").unwrap(), "");
        assert_eq!(expand_str(&mut frame, "${p#x}").unwrap(), "/usr/local/bin");
    }

    #[test]
    fn trimming_with_quoted_pattern() {
        let mut frame = Frame::new();
        frame.variables.assign("v", "*a*").unwrap();
        assert_eq!(expand_str(&mut frame, "${v#\"*\"}").unwrap(), "a*");
        assert_eq!(expand_str(&mut frame, "${v#*}").unwrap(), "*a*");
        assert_eq!(expand_str(&mut frame, "${v##*}").unwrap(), "");
    }

    #[test]
    fn trimming_positional_parameters() {
        let mut frame = Frame::new();
        frame.arguments = vec!["sh".into(), "a.c".into(), "b.c".into()];
        assert_eq!(expand_str(&mut frame, "${@%.c}").unwrap(), "a b");
    }
}
