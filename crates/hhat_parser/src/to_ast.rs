// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Build the AST from a syntax tree through a `TreeBuilder`.
//!
//! The tree is walked bottom-up. Every node kind maps to one `build_*`
//! method, which receives the already built results of the child nodes and
//! the meaningful tokens (names and literals). Keywords and punctuation are
//! dropped here. `DECLS` is passed on as a `ParseResult::Group`.

use hhat_ast::{BuildError, BuildResult, Node, ParseResult, RawToken, RawTokenKind, TreeBuilder};

use crate::tree::{SyntaxElement, SyntaxNode, SyntaxToken};
use crate::SyntaxKind::{self, *};

/// Build the root of the tree. The caller checks that the parse had no errors.
pub fn build_ast<B: TreeBuilder + ?Sized>(root: &SyntaxNode, builder: &mut B) -> BuildResult<Node> {
    match lower_node(root, builder)? {
        ParseResult::Node(node) => Ok(node),
        other => Err(BuildError::UnexpectedChild {
            production: "source_file",
            expected: "a node",
            position: 0,
            found: format!("{other:?}"),
        }),
    }
}

fn raw_token(token: &SyntaxToken) -> Option<RawToken> {
    let kind = match token.kind() {
        IDENT => RawTokenKind::Ident,
        QUANTUM_IDENT => RawTokenKind::QuantumIdent,
        INT_NUMBER => RawTokenKind::Int,
        FLOAT_NUMBER => RawTokenKind::Float,
        STRING => RawTokenKind::Str,
        TRUE_KW | FALSE_KW => RawTokenKind::Bool,
        _ => return None,
    };
    Some(RawToken::new(kind, token.text()))
}

fn lower_children<B: TreeBuilder + ?Sized>(
    node: &SyntaxNode,
    builder: &mut B,
) -> BuildResult<Vec<ParseResult>> {
    let mut children = Vec::new();
    for child in node.children_with_tokens() {
        match child {
            SyntaxElement::Node(child) => children.push(lower_node(child, builder)?),
            SyntaxElement::Token(token) => {
                if let Some(token) = raw_token(token) {
                    children.push(ParseResult::Token(token));
                }
            }
        }
    }
    Ok(children)
}

fn lower_node<B: TreeBuilder + ?Sized>(
    node: &SyntaxNode,
    builder: &mut B,
) -> BuildResult<ParseResult> {
    let children = lower_children(node, builder)?;
    let kind = node.kind();
    tracing::trace!(?kind, children = children.len(), "building node");
    let built: Node = match kind {
        SOURCE_FILE => builder.build_program(children)?.into(),
        DECLS => return Ok(ParseResult::Group(children)),
        IMPORTS => builder.build_imports(children)?.into(),
        TYPE_IMPORT => builder.build_type_import(children)?.into(),
        TYPE_DEF => builder.build_type_def(children)?.into(),
        SINGLE_TYPE_MEMBER => builder.build_single_type_member(children)?.into(),
        ENUM_TYPE_MEMBER => builder.build_enum_type_member(children)?.into(),
        PATH if children.len() == 1 => builder.build_id(children)?.into(),
        PATH => builder.build_composite_id(children)?.into(),
        FN_DEF => builder.build_fn_def(children)?.into(),
        FN_ARGS => builder.build_fn_args(children)?.into(),
        ARG_TYPE_PAIR => builder.build_arg_type_pair(children)?.into(),
        BODY => builder.build_body(children)?.into(),
        MAIN => builder.build_main(children)?.into(),
        CALL => builder.build_call(children)?.into(),
        ARG_VALUE_PAIR => builder.build_arg_value_pair(children)?.into(),
        LITERAL => builder.build_literal(children)?.into(),
        other => return Err(not_buildable(other)),
    };
    Ok(ParseResult::Node(built))
}

fn not_buildable(kind: SyntaxKind) -> BuildError {
    BuildError::UnexpectedChild {
        production: "syntax tree",
        expected: "a buildable node",
        position: 0,
        found: format!("{kind:?}"),
    }
}
