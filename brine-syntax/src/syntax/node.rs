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

//! Uniform view of AST nodes
//!
//! The AST types in the parent module are ordinary structs and enums. This
//! module provides [`NodeRef`], a reference to any node that has a span, so
//! that generic tree walkers like the [pretty-printer](super::pretty) can
//! visit the nodes without knowing their concrete types.

use super::*;

/// Reference to an AST node
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeRef<'a> {
    Chunk(&'a Chunk),
    AndOr(&'a AndOr),
    Pipeline(&'a Pipeline),
    Form(&'a Form),
    CompoundCommand(&'a CompoundCommand),
    CaseItem(&'a CaseItem),
    Assign(&'a Assign),
    Redir(&'a Redir),
    Compound(&'a Compound),
    Primary(&'a Primary),
}

/// AST node
pub trait Node {
    /// Returns a reference to this node.
    fn as_node(&self) -> NodeRef<'_>;

    /// Returns the range of the node in the preprocessed text.
    fn span(&self) -> Span {
        self.as_node().span()
    }
}

macro_rules! impl_node {
    ($($type:ident),*) => {
        $(
            impl Node for $type {
                fn as_node(&self) -> NodeRef<'_> {
                    NodeRef::$type(self)
                }
            }
        )*
    };
}

impl_node!(
    Chunk,
    AndOr,
    Pipeline,
    Form,
    CompoundCommand,
    CaseItem,
    Assign,
    Redir,
    Compound,
    Primary
);

fn push_segments<'a>(children: &mut Vec<NodeRef<'a>>, segments: &'a [DqSegment]) {
    for segment in segments {
        if let DqSegment::Expansion(primary) = segment {
            children.push(NodeRef::Primary(primary));
        }
    }
}

impl<'a> NodeRef<'a> {
    /// Returns the range of the node in the preprocessed text.
    #[must_use]
    pub fn span(self) -> Span {
        match self {
            NodeRef::Chunk(node) => node.span,
            NodeRef::AndOr(node) => node.span,
            NodeRef::Pipeline(node) => node.span,
            NodeRef::Form(node) => node.span,
            NodeRef::CompoundCommand(node) => node.span,
            NodeRef::CaseItem(node) => node.span,
            NodeRef::Assign(node) => node.span,
            NodeRef::Redir(node) => node.span,
            NodeRef::Compound(node) => node.span,
            NodeRef::Primary(node) => node.span,
        }
    }

    /// Returns the name of the node type.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            NodeRef::Chunk(_) => "Chunk",
            NodeRef::AndOr(_) => "AndOr",
            NodeRef::Pipeline(_) => "Pipeline",
            NodeRef::Form(_) => "Form",
            NodeRef::CompoundCommand(_) => "CompoundCommand",
            NodeRef::CaseItem(_) => "CaseItem",
            NodeRef::Assign(_) => "Assign",
            NodeRef::Redir(_) => "Redir",
            NodeRef::Compound(_) => "Compound",
            NodeRef::Primary(_) => "Primary",
        }
    }

    /// Returns the direct children of the node in source order.
    #[must_use]
    pub fn children(self) -> Vec<NodeRef<'a>> {
        let mut children = Vec::new();
        match self {
            NodeRef::Chunk(chunk) => children.extend(chunk.and_ors.iter().map(NodeRef::AndOr)),
            NodeRef::AndOr(and_or) => {
                children.extend(and_or.pipelines.iter().map(NodeRef::Pipeline))
            }
            NodeRef::Pipeline(pipeline) => {
                children.extend(pipeline.forms.iter().map(NodeRef::Form))
            }
            NodeRef::Form(form) => {
                children.extend(form.assigns.iter().map(NodeRef::Assign));
                children.extend(form.words.iter().map(NodeRef::Compound));
                if let Some(body) = &form.body {
                    children.push(NodeRef::CompoundCommand(body));
                }
                children.extend(form.redirs.iter().map(NodeRef::Redir));
                children.sort_by_key(|child| child.span().begin);
            }
            NodeRef::CompoundCommand(command) => match &command.kind {
                CompoundKind::Grouping(chunk) | CompoundKind::Subshell(chunk) => {
                    children.push(NodeRef::Chunk(chunk))
                }
                CompoundKind::For { values, body, .. } => {
                    children.extend(values.iter().flatten().map(NodeRef::Compound));
                    children.push(NodeRef::Chunk(body));
                }
                CompoundKind::While { condition, body } | CompoundKind::Until { condition, body } => {
                    children.push(NodeRef::Chunk(condition));
                    children.push(NodeRef::Chunk(body));
                }
                CompoundKind::If { branches, r#else } => {
                    for branch in branches {
                        children.push(NodeRef::Chunk(&branch.condition));
                        children.push(NodeRef::Chunk(&branch.body));
                    }
                    children.extend(r#else.iter().map(NodeRef::Chunk));
                }
                CompoundKind::Case { subject, items } => {
                    children.push(NodeRef::Compound(subject));
                    children.extend(items.iter().map(NodeRef::CaseItem));
                }
            },
            NodeRef::CaseItem(item) => {
                children.extend(item.patterns.iter().map(NodeRef::Compound));
                children.push(NodeRef::Chunk(&item.body));
            }
            NodeRef::Assign(assign) => children.push(NodeRef::Compound(&assign.rhs)),
            NodeRef::Redir(redir) => children.push(NodeRef::Compound(&redir.right)),
            NodeRef::Compound(compound) => {
                children.extend(compound.parts.iter().map(NodeRef::Primary))
            }
            NodeRef::Primary(primary) => match &primary.kind {
                PrimaryKind::DoubleQuoted(segments) | PrimaryKind::Arithmetic(segments) => {
                    push_segments(&mut children, segments)
                }
                PrimaryKind::OutputCapture(chunk) => children.push(NodeRef::Chunk(chunk)),
                PrimaryKind::Variable(variable) => {
                    if let Some(modifier) = &variable.modifier {
                        children.push(NodeRef::Compound(&modifier.argument));
                    }
                }
                PrimaryKind::Bareword(_)
                | PrimaryKind::SingleQuoted(_)
                | PrimaryKind::WildcardChar(_) => {}
            },
        }
        children
    }
}

/// Visits every node of a tree in depth-first pre-order.
///
/// The visitor receives each node together with its parent, which is `None`
/// for the root.
pub fn walk<'a, F>(root: NodeRef<'a>, visitor: &mut F)
where
    F: FnMut(NodeRef<'a>, Option<NodeRef<'a>>),
{
    fn walk_inner<'a, F>(node: NodeRef<'a>, parent: Option<NodeRef<'a>>, visitor: &mut F)
    where
        F: FnMut(NodeRef<'a>, Option<NodeRef<'a>>),
    {
        visitor(node, parent);
        for child in node.children() {
            walk_inner(child, Some(node), visitor);
        }
    }
    walk_inner(root, None, visitor)
}
