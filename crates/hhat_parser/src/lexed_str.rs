// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Lexing `&str` into a sequence of Heather tokens.
//!
//! Unlike the tokens fed to the parser, these tokens still include comments
//! and whitespace. Lexing errors are recorded per token and reported together
//! with the parse errors.

use std::ops;

use crate::{
    SyntaxKind::{self, *},
    T,
};

pub struct LexedStr<'a> {
    text: &'a str,
    kind: Vec<SyntaxKind>,
    start: Vec<u32>,
    error: Vec<LexError>,
}

struct LexError {
    msg: String,
    token: u32,
}

impl<'a> LexedStr<'a> {
    pub fn new(text: &'a str) -> LexedStr<'a> {
        let mut conv = Converter::new(text);

        for token in hhat_lexer::tokenize(text) {
            let token_text = &text[conv.offset..][..token.len as usize];
            conv.extend_token(&token.kind, token_text);
        }

        conv.finalize_with_eof()
    }

    pub fn as_str(&self) -> &str {
        self.text
    }

    /// Number of tokens, not counting the final `EOF`.
    pub fn len(&self) -> usize {
        self.kind.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self, i: usize) -> SyntaxKind {
        self.kind[i]
    }

    pub fn text(&self, i: usize) -> &str {
        &self.text[self.text_range(i)]
    }

    /// Byte range of token `i`. The range of `EOF` is empty.
    pub fn text_range(&self, i: usize) -> ops::Range<usize> {
        let lo = self.start[i] as usize;
        let hi = self
            .start
            .get(i + 1)
            .map_or(self.text.len(), |&hi| hi as usize);
        lo..hi
    }

    pub fn error(&self, i: usize) -> Option<&str> {
        let err = self
            .error
            .binary_search_by_key(&(i as u32), |e| e.token)
            .ok()?;
        Some(self.error[err].msg.as_str())
    }

    pub fn errors(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.error
            .iter()
            .map(|it| (it.token as usize, it.msg.as_str()))
    }

    fn push(&mut self, kind: SyntaxKind, offset: usize) {
        self.kind.push(kind);
        self.start.push(offset as u32);
    }
}

struct Converter<'a> {
    res: LexedStr<'a>,
    offset: usize,
}

impl<'a> Converter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            res: LexedStr {
                text,
                kind: Vec::new(),
                start: Vec::new(),
                error: Vec::new(),
            },
            offset: 0,
        }
    }

    fn finalize_with_eof(mut self) -> LexedStr<'a> {
        self.res.push(EOF, self.offset);
        self.res
    }

    fn push(&mut self, kind: SyntaxKind, len: usize, err: Option<&str>) {
        self.res.push(kind, self.offset);
        self.offset += len;

        if let Some(err) = err {
            let token = (self.res.kind.len() - 1) as u32;
            let msg = err.to_string();
            self.res.error.push(LexError { msg, token });
        }
    }

    fn extend_token(&mut self, kind: &hhat_lexer::TokenKind, token_text: &str) {
        let (err, syntax_kind) = token_kind(kind, token_text);
        let err = if err.is_empty() { None } else { Some(err) };
        self.push(syntax_kind, token_text.len(), err);
    }
}

fn literal_kind(kind: &hhat_lexer::LiteralKind) -> (&'static str, SyntaxKind) {
    match *kind {
        hhat_lexer::LiteralKind::Int { empty_int, .. } => {
            let err = if empty_int {
                "Missing digits after the integer base prefix"
            } else {
                ""
            };
            (err, INT_NUMBER)
        }
        hhat_lexer::LiteralKind::Float { empty_exponent, .. } => {
            let err = if empty_exponent {
                "Missing digits after the exponent symbol"
            } else {
                ""
            };
            (err, FLOAT_NUMBER)
        }
        hhat_lexer::LiteralKind::Str { terminated } => {
            let err = if terminated {
                ""
            } else {
                "Missing trailing `\"` symbol to terminate the string literal"
            };
            (err, STRING)
        }
    }
}

fn token_kind(kind: &hhat_lexer::TokenKind, token_text: &str) -> (&'static str, SyntaxKind) {
    let mut err = "";
    let syntax_kind = match kind {
        hhat_lexer::TokenKind::LineComment => COMMENT,
        hhat_lexer::TokenKind::BlockComment { terminated } => {
            if !terminated {
                err = "Missing trailing `*/` symbols to terminate the block comment";
            }
            COMMENT
        }
        hhat_lexer::TokenKind::Whitespace => WHITESPACE,

        // If it looks like an identifier, look first if it is a keyword.
        hhat_lexer::TokenKind::Ident => SyntaxKind::from_keyword(token_text).unwrap_or(IDENT),
        hhat_lexer::TokenKind::QuantumIdent => QUANTUM_IDENT,
        hhat_lexer::TokenKind::InvalidIdent => {
            err = "Ident contains invalid characters";
            IDENT
        }
        hhat_lexer::TokenKind::Literal { kind } => return literal_kind(kind),

        hhat_lexer::TokenKind::Comma => T![,],
        hhat_lexer::TokenKind::Dot => T![.],
        hhat_lexer::TokenKind::OpenParen => T!['('],
        hhat_lexer::TokenKind::CloseParen => T![')'],
        hhat_lexer::TokenKind::OpenBrace => T!['{'],
        hhat_lexer::TokenKind::CloseBrace => T!['}'],
        hhat_lexer::TokenKind::OpenBracket => T!['['],
        hhat_lexer::TokenKind::CloseBracket => T![']'],
        hhat_lexer::TokenKind::Colon => T![:],
        hhat_lexer::TokenKind::At => T![@],
        hhat_lexer::TokenKind::Unknown => {
            err = "Unknown character";
            ERROR
        }
        hhat_lexer::TokenKind::Eof => EOF,
    };
    (err, syntax_kind)
}
