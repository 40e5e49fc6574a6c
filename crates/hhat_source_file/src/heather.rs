// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use hhat_ast::{DefaultTreeBuilder, GrammarError, GrammarParser, Node, TreeBuilder};

use crate::api::parse_source_file;

/// The Heather grammar as a `GrammarParser`. Each file is built into an AST
/// by a fresh copy of the configured tree builder, so that a dialect can
/// change how nodes are built without touching the grammar.
#[derive(Clone, Debug, Default)]
pub struct HeatherParser<B = DefaultTreeBuilder> {
    builder: B,
}

impl HeatherParser {
    pub fn new() -> HeatherParser {
        HeatherParser {
            builder: DefaultTreeBuilder,
        }
    }
}

impl<B: TreeBuilder + Clone> HeatherParser<B> {
    pub fn with_builder(builder: B) -> HeatherParser<B> {
        HeatherParser { builder }
    }

    /// Build the AST of `source`. `file_path` is only used in errors.
    pub fn parse_source(&self, source: &str, file_path: &Path) -> Result<Node, GrammarError> {
        let parse = hhat_parser::parse_text(source);
        self.build(parse, file_path)
    }

    fn build(&self, parse: hhat_parser::Parse, file_path: &Path) -> Result<Node, GrammarError> {
        let (tree, errors) = parse.into_parts();
        if !errors.is_empty() {
            tracing::debug!(path = %file_path.display(), errors = errors.len(), "syntax errors");
            return Err(GrammarError::Syntax {
                path: file_path.to_path_buf(),
                errors,
            });
        }
        let mut builder = self.builder.clone();
        hhat_parser::build_ast(&tree, &mut builder).map_err(|source| GrammarError::Build {
            path: file_path.to_path_buf(),
            source,
        })
    }
}

impl<B: TreeBuilder + Clone> GrammarParser for HeatherParser<B> {
    fn parse_file(&self, file_path: &Path) -> Result<Node, GrammarError> {
        let source_file = parse_source_file(file_path)?;
        self.build(source_file.into_parse(), file_path)
    }
}
