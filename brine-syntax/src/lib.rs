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

//! Shell language syntax and parser for brine.
//!
//! This crate defines data types for constructing abstract syntax trees (AST)
//! of the shell language. See the [`syntax`] module for details.
//!
//! Source code is first preprocessed by the [`source`] module, which removes
//! line continuations and remembers where they were so that every position in
//! the AST can be mapped back to the code the user wrote.
//!
//! To parse source code into an AST, use [`parser::parse`]:
//!
//! ```
//! # use brine_syntax::source::Source;
//! let source = Source::new("echo hello | cat");
//! let chunk = brine_syntax::parser::parse(&source).unwrap();
//! assert_eq!(chunk.and_ors.len(), 1);
//! assert_eq!(chunk.and_ors[0].pipelines[0].forms.len(), 2);
//! ```
//!
//! The parser never stops at the first error. All errors are collected and
//! returned together in [`parser::Errors`], which can be rendered with the
//! offending source lines annotated.

pub mod parser;
pub mod source;
pub mod syntax;
