// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! The parser does not build the tree directly. It records a flat list of
//! `Event`s, which `process` folds into a `SyntaxNode` afterwards. This makes
//! it cheap to wrap an already parsed node into a new parent (see
//! `CompletedMarker::precede`), which is how calls are built around the path
//! naming the callee.

use std::mem;

use hhat_ast::SyntaxError;

use crate::input::Input;
use crate::tree::{SyntaxElement, SyntaxNode, SyntaxToken};
use crate::SyntaxKind::{self, *};

#[derive(Debug)]
pub(crate) enum Event {
    /// Starts a node. `forward_parent` is the relative offset of a later
    /// `Start` event that becomes the parent of this one.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<u32>,
    },

    /// Completes the innermost open node.
    Finish,

    /// Consumes the next input token.
    Token { kind: SyntaxKind },

    Error { msg: String },
}

impl Event {
    pub(crate) fn tombstone() -> Self {
        Event::Start {
            kind: TOMBSTONE,
            forward_parent: None,
        }
    }
}

/// Fold the events into a tree, collecting the errors with the byte range of
/// the token at which each one was raised.
pub(crate) fn process(
    text: &str,
    input: &Input,
    mut events: Vec<Event>,
) -> (SyntaxNode, Vec<SyntaxError>) {
    let mut stack: Vec<(SyntaxKind, Vec<SyntaxElement>, usize)> = Vec::new();
    let mut root = None;
    let mut errors = Vec::new();
    let mut token_pos = 0;
    let mut forward_parents = Vec::new();

    for i in 0..events.len() {
        match mem::replace(&mut events[i], Event::tombstone()) {
            Event::Start {
                kind,
                forward_parent,
            } => {
                // Walk the chain of forward parents, then open them outermost first.
                forward_parents.push(kind);
                let mut idx = i;
                let mut fp = forward_parent;
                while let Some(fwd) = fp {
                    idx += fwd as usize;
                    fp = match mem::replace(&mut events[idx], Event::tombstone()) {
                        Event::Start {
                            kind,
                            forward_parent,
                        } => {
                            forward_parents.push(kind);
                            forward_parent
                        }
                        _ => None,
                    };
                }
                let start = input.range(token_pos).start;
                for kind in forward_parents.drain(..).rev() {
                    if kind != TOMBSTONE {
                        stack.push((kind, Vec::new(), start));
                    }
                }
            }
            Event::Finish => {
                if let Some((kind, children, start)) = stack.pop() {
                    let node = SyntaxNode::new(kind, children, start);
                    match stack.last_mut() {
                        Some((_, parent, _)) => parent.push(SyntaxElement::Node(node)),
                        None => root = Some(node),
                    }
                }
            }
            Event::Token { kind } => {
                let range = input.range(token_pos);
                token_pos += 1;
                let token = SyntaxToken::new(kind, &text[range.clone()], range);
                if let Some((_, parent, _)) = stack.last_mut() {
                    parent.push(SyntaxElement::Token(token));
                }
            }
            Event::Error { msg } => {
                errors.push(SyntaxError::new(msg, input.range(token_pos)));
            }
        }
    }

    let root = root.unwrap_or_else(|| SyntaxNode::new(SOURCE_FILE, Vec::new(), 0));
    (root, errors)
}
