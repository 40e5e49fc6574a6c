// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

// The concrete syntax tree produced by the parser. Trivia is not kept.

use std::fmt;
use std::ops::Range;

use smol_str::SmolStr;

use crate::SyntaxKind;

#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    kind: SyntaxKind,
    text: SmolStr,
    range: Range<usize>,
}

impl SyntaxToken {
    pub(crate) fn new(kind: SyntaxKind, text: &str, range: Range<usize>) -> SyntaxToken {
        SyntaxToken {
            kind,
            text: SmolStr::new(text),
            range,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn text_range(&self) -> Range<usize> {
        self.range.clone()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(node) => node.kind(),
            SyntaxElement::Token(token) => token.kind(),
        }
    }

    pub fn text_range(&self) -> Range<usize> {
        match self {
            SyntaxElement::Node(node) => node.text_range(),
            SyntaxElement::Token(token) => token.text_range(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    children: Vec<SyntaxElement>,
    range: Range<usize>,
}

impl SyntaxNode {
    /// A node spans its first to its last token. A node without tokens is
    /// empty and located at `start`.
    pub(crate) fn new(kind: SyntaxKind, children: Vec<SyntaxElement>, start: usize) -> SyntaxNode {
        let range = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.text_range().start..last.text_range().end,
            _ => start..start,
        };
        SyntaxNode {
            kind,
            children,
            range,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text_range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn children_with_tokens(&self) -> &[SyntaxElement] {
        &self.children
    }

    /// Child nodes only.
    pub fn children(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(|child| match child {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        })
    }

    fn dump(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(
            f,
            "{:indent$}{:?}@{}..{}",
            "",
            self.kind,
            self.range.start,
            self.range.end,
            indent = depth * 2
        )?;
        for child in &self.children {
            match child {
                SyntaxElement::Node(node) => node.dump(f, depth + 1)?,
                SyntaxElement::Token(token) => writeln!(
                    f,
                    "{:indent$}{:?}",
                    "",
                    token,
                    indent = (depth + 1) * 2
                )?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}@{}..{} {:?}",
            self.kind, self.range.start, self.range.end, self.text
        )
    }
}

/// Indented dump of the tree, one node or token per line.
impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, 0)
    }
}

impl fmt::Debug for SyntaxElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxElement::Node(node) => node.fmt(f),
            SyntaxElement::Token(token) => token.fmt(f),
        }
    }
}
