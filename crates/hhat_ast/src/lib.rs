// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Abstract syntax tree for the H-hat language.
//!
//! * `ast` holds the node types: programs, imports, type and function
//!   definitions, and the expressions making up bodies.
//! * `traversal` gives every node a uniform `children()` accessor, so that
//!   walks over the tree need no variant-specific code.
//! * `visitor` is the contract a grammar uses to build the tree from its
//!   parse results.
//! * `grammar` is the boundary the compiler core uses to obtain a tree for a
//!   source file without knowing which concrete grammar produced it.

pub mod ast;
pub mod grammar;
pub mod traversal;
pub mod visitor;

pub use ast::*;
pub use grammar::{GrammarError, GrammarParser, SyntaxError};
pub use traversal::{Child, NodeRef, Preorder};
pub use visitor::{
    BuildError, BuildResult, DefaultTreeBuilder, ParseResult, RawToken, RawTokenKind, TreeBuilder,
};
