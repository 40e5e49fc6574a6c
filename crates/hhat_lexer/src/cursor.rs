// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use std::str::Chars;

const EOF_CHAR: char = '\0';

/// Character cursor over the input that remembers where the current token
/// began. Peeking past the end yields `'\0'`; use `is_eof` to tell the two apart.
pub struct Cursor<'a> {
    chars: Chars<'a>,
    // Bytes left when the current token started.
    remaining_at_start: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Cursor<'a> {
        Cursor {
            chars: input.chars(),
            remaining_at_start: input.len(),
        }
    }

    /// The input not consumed yet.
    pub fn as_str(&self) -> &'a str {
        self.chars.as_str()
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn peek_second(&self) -> char {
        self.chars.clone().nth(1).unwrap_or(EOF_CHAR)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Consume `c` if it is next.
    pub(crate) fn bump_if(&mut self, c: char) -> bool {
        let hit = self.peek() == c && !self.is_eof();
        if hit {
            self.bump();
        }
        hit
    }

    pub(crate) fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while !self.is_eof() && predicate(self.peek()) {
            self.bump();
        }
    }

    /// Length in bytes of the token read so far.
    pub(crate) fn token_len(&self) -> u32 {
        (self.remaining_at_start - self.chars.as_str().len()) as u32
    }

    pub(crate) fn start_token(&mut self) {
        self.remaining_at_start = self.chars.as_str().len();
    }
}
