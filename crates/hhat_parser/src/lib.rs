// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Parser for the Heather dialect of H-hat.
//!
//! Text is lexed by `hhat_lexer`, parsed into a concrete `SyntaxNode` tree,
//! and finally turned into the AST of `hhat_ast` by handing every production
//! to a `TreeBuilder`.

mod event;
mod grammar;
mod input;
mod lexed_str;
mod parser;
mod to_ast;
mod token_set;
mod tree;

pub mod syntax_kind;

#[cfg(test)]
mod tests;

use hhat_ast::SyntaxError;

pub use crate::{
    input::Input,
    lexed_str::LexedStr,
    syntax_kind::SyntaxKind,
    to_ast::build_ast,
    tree::{SyntaxElement, SyntaxNode, SyntaxToken},
};

/// The result of parsing one text: the tree, which is always produced, and
/// the lexing and syntax errors in source order.
#[derive(Clone, Debug)]
pub struct Parse {
    tree: SyntaxNode,
    errors: Vec<SyntaxError>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxNode {
        &self.tree
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_parts(self) -> (SyntaxNode, Vec<SyntaxError>) {
        (self.tree, self.errors)
    }
}

/// Parse the whole of `text` as a Heather source file.
pub fn parse_text(text: &str) -> Parse {
    let lexed = LexedStr::new(text);
    let input = Input::from_lexed(&lexed);

    let mut p = parser::Parser::new(&input);
    grammar::entry::source_file(&mut p);
    let events = p.finish();
    let (tree, mut errors) = event::process(text, &input, events);

    let lex_errors = lexed
        .errors()
        .map(|(i, msg)| SyntaxError::new(msg, lexed.text_range(i)));
    errors.extend(lex_errors);
    errors.sort_by_key(|e| e.range().start);
    tracing::debug!(errors = errors.len(), "parsed source text");

    Parse { tree, errors }
}
