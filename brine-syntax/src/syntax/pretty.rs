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

//! Pretty-printer for debugging ASTs
//!
//! [`dump`] prints a tree with one node per line, children indented under
//! their parent. Each line shows the node type, the details that are not
//! visible from the children, and the original source text of the node.
//!
//! ```
//! # use brine_syntax::parser::parse;
//! # use brine_syntax::source::Source;
//! # use brine_syntax::syntax::node::Node;
//! # use brine_syntax::syntax::pretty::dump;
//! let source = Source::new("echo hi");
//! let chunk = parse(&source).unwrap();
//! let output = dump(chunk.as_node(), &source);
//! assert!(output.starts_with("Chunk"));
//! assert!(output.contains("Primary Bareword(\"hi\") \"hi\""));
//! ```

use super::node::NodeRef;
use super::*;
use crate::source::Source;
use std::fmt::Write;

/// Maximum number of characters of source text shown for a node
const MAX_TEXT: usize = 40;

fn details(node: NodeRef<'_>) -> String {
    match node {
        NodeRef::Chunk(_) | NodeRef::CaseItem(_) => String::new(),
        NodeRef::AndOr(and_or) => {
            let ops: Vec<&str> = and_or
                .and_op
                .iter()
                .map(|&and| if and { "&&" } else { "||" })
                .collect();
            format!("{ops:?}")
        }
        NodeRef::Pipeline(pipeline) => {
            if pipeline.negation {
                "!".to_owned()
            } else {
                String::new()
            }
        }
        NodeRef::Form(form) => format!("{:?}", form.r#type),
        NodeRef::CompoundCommand(command) => match &command.kind {
            CompoundKind::Grouping(_) => "Grouping".to_owned(),
            CompoundKind::Subshell(_) => "Subshell".to_owned(),
            CompoundKind::For { name, values, .. } => {
                format!("For {name} in={}", values.is_some())
            }
            CompoundKind::While { .. } => "While".to_owned(),
            CompoundKind::Until { .. } => "Until".to_owned(),
            CompoundKind::If { branches, r#else } => {
                format!("If branches={} else={}", branches.len(), r#else.is_some())
            }
            CompoundKind::Case { items, .. } => format!("Case items={}", items.len()),
        },
        NodeRef::Assign(assign) => assign.lhs.clone(),
        NodeRef::Redir(redir) => {
            let mut result = String::new();
            if let Some(fd) = redir.left {
                let _ = write!(result, "{fd}");
            }
            let _ = write!(result, "{}", redir.mode);
            if redir.right_fd {
                result.push('&');
            }
            if let Some(heredoc) = &redir.heredoc {
                let _ = write!(
                    result,
                    " delim={:?} quoted={} value={:?}",
                    heredoc.delim,
                    heredoc.quoted,
                    heredoc.value().unwrap_or_default()
                );
            }
            result
        }
        NodeRef::Compound(compound) => match &compound.tilde_prefix {
            Some(user) => format!("~{user:?}"),
            None => String::new(),
        },
        NodeRef::Primary(primary) => match &primary.kind {
            PrimaryKind::Bareword(value) => format!("Bareword({value:?})"),
            PrimaryKind::SingleQuoted(value) => format!("SingleQuoted({value:?})"),
            PrimaryKind::DoubleQuoted(segments) => {
                format!("DoubleQuoted segments={}", segments.len())
            }
            PrimaryKind::WildcardChar(c) => format!("WildcardChar({c:?})"),
            PrimaryKind::OutputCapture(_) => "OutputCapture".to_owned(),
            PrimaryKind::Variable(variable) => {
                let mut result = format!("Variable({:?}", variable.name);
                if variable.length_op {
                    result.push_str(" length");
                }
                if let Some(modifier) = &variable.modifier {
                    let _ = write!(result, " {}", modifier.operator);
                }
                result.push(')');
                result
            }
            PrimaryKind::Arithmetic(segments) => format!("Arithmetic segments={}", segments.len()),
        },
    }
}

fn dump_node(output: &mut String, node: NodeRef<'_>, source: &Source, depth: usize) {
    let range = source.recover_range(node.span());
    let text = source.orig().get(range).unwrap_or_default();
    let mut shown: String = text.chars().take(MAX_TEXT).collect();
    if shown.len() < text.len() {
        shown.push('…');
    }

    let _ = write!(output, "{:indent$}{}", "", node.type_name(), indent = depth * 2);
    let details = details(node);
    if !details.is_empty() {
        let _ = write!(output, " {details}");
    }
    let _ = writeln!(output, " {shown:?}");

    for child in node.children() {
        dump_node(output, child, source, depth + 1);
    }
}

/// Formats a tree for debugging.
#[must_use]
pub fn dump(root: NodeRef<'_>, source: &Source) -> String {
    let mut output = String::new();
    dump_node(&mut output, root, source, 0);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::syntax::node::Node;

    #[test]
    fn dump_shows_nesting() {
        let source = Source::new("! a && b | c 2>/dev/null");
        let chunk = parse(&source).unwrap();
        let output = dump(chunk.as_node(), &source);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Chunk \"! a && b | c 2>/dev/null\"");
        assert_eq!(lines[1], "  AndOr [\"&&\"] \"! a && b | c 2>/dev/null\"");
        assert_eq!(lines[2], "    Pipeline ! \"! a\"");
        assert_eq!(lines[3], "      Form Normal \"a\"");
        assert_eq!(lines[4], "        Compound \"a\"");
        assert_eq!(lines[5], "          Primary Bareword(\"a\") \"a\"");
        assert!(lines.contains(&"        Redir 2> \"2>/dev/null\""), "{output}");
    }

    #[test]
    fn dump_shows_heredoc() {
        let source = Source::new("cat <<'E'\nx\nE\n");
        let chunk = parse(&source).unwrap();
        let output = dump(chunk.as_node(), &source);
        assert!(
            output.contains("Redir << delim=\"E\" quoted=true value=\"x\\n\""),
            "{output}"
        );
    }

    #[test]
    fn long_text_is_shortened() {
        let code = format!("echo {}", "x".repeat(60));
        let source = Source::new(code);
        let chunk = parse(&source).unwrap();
        let output = dump(chunk.as_node(), &source);
        assert!(output.lines().next().unwrap().ends_with("…\""), "{output}");
    }
}
