// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! The input to the parser: the non-trivia tokens of a `LexedStr`.

use std::ops::Range;

use crate::{LexedStr, SyntaxKind};

/// Token kinds with their byte ranges, trivia removed. Reading past the end
/// yields `EOF` with an empty range at the end of the text.
pub struct Input {
    kind: Vec<SyntaxKind>,
    range: Vec<Range<usize>>,
    text_len: usize,
}

impl Input {
    pub fn from_lexed(lexed: &LexedStr<'_>) -> Input {
        let mut kind = Vec::with_capacity(lexed.len());
        let mut range = Vec::with_capacity(lexed.len());
        for i in 0..lexed.len() {
            let k = lexed.kind(i);
            if !k.is_trivia() {
                kind.push(k);
                range.push(lexed.text_range(i));
            }
        }
        Input {
            kind,
            range,
            text_len: lexed.as_str().len(),
        }
    }

    pub fn len(&self) -> usize {
        self.kind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    pub fn kind(&self, idx: usize) -> SyntaxKind {
        self.kind.get(idx).copied().unwrap_or(SyntaxKind::EOF)
    }

    pub fn range(&self, idx: usize) -> Range<usize> {
        self.range
            .get(idx)
            .cloned()
            .unwrap_or(self.text_len..self.text_len)
    }
}
