// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Low-level lexer for the Heather dialect of H-hat.
//!
//! The lexer only splits the input into [`Token`]s, each a [`TokenKind`] and a
//! byte length. It never fails: malformed input becomes a token flagged as
//! such, and the parser reports it. Keywords are lexed as identifiers.
//!
//! The identifier grammar shared by source code and module paths is
//! `[A-Za-z_][A-Za-z0-9_-]*`. Quantum names are identifiers prefixed by `@`.

mod cursor;


pub use crate::cursor::Cursor;

use self::LiteralKind::*;
use self::TokenKind::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub len: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `// ...` up to the end of the line.
    LineComment,
    /// `/* ... */`. These nest, so `/* /* */` is unterminated.
    BlockComment { terminated: bool },
    Whitespace,
    /// `sum`, `rv-continuous`, and keywords such as `fn`.
    Ident,
    /// `@q`, `@redim`: names of quantum data and quantum instructions.
    QuantumIdent,
    /// An identifier holding letters outside the identifier grammar, e.g. `héllo`.
    InvalidIdent,
    Literal { kind: LiteralKind },

    Comma,
    Dot,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    /// `@` not followed by an identifier.
    At,

    Unknown,
    Eof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LiteralKind {
    /// `12`, `0o100`, `0b1001`, `-4`. `empty_int` is set for a bare prefix like `0x`.
    Int { base: Base, empty_int: bool },
    /// `12.34`, `1e3`, `-0.5`. Always decimal.
    Float { base: Base, empty_exponent: bool },
    Str { terminated: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Base {
    Binary = 2,
    Octal = 8,
    Decimal = 10,
    Hexadecimal = 16,
}

impl Base {
    fn from_prefix(c: char) -> Option<Base> {
        match c {
            'b' => Some(Base::Binary),
            'o' => Some(Base::Octal),
            'x' => Some(Base::Hexadecimal),
            _ => None,
        }
    }
}

/// The tokens of `input`, without a final `Eof`.
pub fn tokenize(input: &str) -> impl Iterator<Item = Token> + '_ {
    let mut cursor = Cursor::new(input);
    std::iter::from_fn(move || {
        let token = cursor.advance_token();
        (token.kind != Eof).then_some(token)
    })
}

pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{200E}' | '\u{200F}')
}

pub fn is_id_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

pub fn is_id_continue(c: char) -> bool {
    c == '_' || c == '-' || c.is_ascii_alphanumeric()
}

/// Whether all of `string` matches `[A-Za-z_][A-Za-z0-9_-]*`.
pub fn is_ident(string: &str) -> bool {
    let mut chars = string.chars();
    match chars.next() {
        Some(start) => is_id_start(start) && chars.all(is_id_continue),
        None => false,
    }
}

/// Identifiers the Heather grammar reserves. They cannot name anything.
pub const KEYWORDS: &[&str] = &["use", "type", "fn", "main", "true", "false"];

pub fn is_keyword(string: &str) -> bool {
    KEYWORDS.contains(&string)
}

// Letters a unicode-aware identifier grammar would take, but ours does not.
fn is_foreign_id_char(c: char) -> bool {
    !c.is_ascii() && unicode_xid::UnicodeXID::is_xid_continue(c)
}

fn punct(c: char) -> Option<TokenKind> {
    let kind = match c {
        ',' => Comma,
        '.' => Dot,
        '(' => OpenParen,
        ')' => CloseParen,
        '{' => OpenBrace,
        '}' => CloseBrace,
        '[' => OpenBracket,
        ']' => CloseBracket,
        ':' => Colon,
        _ => return None,
    };
    Some(kind)
}

impl Cursor<'_> {
    pub fn advance_token(&mut self) -> Token {
        self.start_token();
        let Some(c) = self.bump() else {
            return Token { kind: Eof, len: 0 };
        };
        let kind = if let Some(kind) = punct(c) {
            kind
        } else {
            match c {
                '/' if self.bump_if('/') => {
                    self.eat_while(|c| c != '\n');
                    LineComment
                }
                '/' if self.bump_if('*') => self.block_comment(),
                c if is_whitespace(c) => {
                    self.eat_while(is_whitespace);
                    Whitespace
                }
                c if is_id_start(c) => self.ident(),
                c if is_foreign_id_char(c) => self.invalid_ident(),
                '@' if is_id_start(self.peek()) => match self.ident() {
                    Ident => QuantumIdent,
                    other => other,
                },
                '@' => At,
                c @ '0'..='9' => Literal {
                    kind: self.number(c),
                },
                // Heather has no infix arithmetic, so `-` only ever starts a number.
                '-' if self.peek().is_ascii_digit() => match self.bump() {
                    Some(c) => Literal {
                        kind: self.number(c),
                    },
                    None => Unknown,
                },
                '"' => Literal {
                    kind: Str {
                        terminated: self.string_tail(),
                    },
                },
                _ => Unknown,
            }
        };
        Token {
            kind,
            len: self.token_len(),
        }
    }

    fn block_comment(&mut self) -> TokenKind {
        let mut depth = 1usize;
        while depth > 0 {
            match self.bump() {
                Some('/') if self.bump_if('*') => depth += 1,
                Some('*') if self.bump_if('/') => depth -= 1,
                Some(_) => {}
                None => break,
            }
        }
        BlockComment {
            terminated: depth == 0,
        }
    }

    fn ident(&mut self) -> TokenKind {
        self.eat_while(is_id_continue);
        if is_foreign_id_char(self.peek()) {
            return self.invalid_ident();
        }
        Ident
    }

    fn invalid_ident(&mut self) -> TokenKind {
        self.eat_while(|c| is_id_continue(c) || is_foreign_id_char(c));
        InvalidIdent
    }

    fn number(&mut self, first_digit: char) -> LiteralKind {
        if first_digit == '0' {
            if let Some(base) = Base::from_prefix(self.peek()) {
                self.bump();
                let empty_int = !self.eat_digits(base as u32);
                return Int { base, empty_int };
            }
        }
        self.eat_digits(10);
        let base = Base::Decimal;

        // `x.y` is a path; a fraction needs a digit right after the dot.
        if self.peek() == '.' && self.peek_second().is_ascii_digit() {
            self.bump();
            self.eat_digits(10);
        } else if !matches!(self.peek(), 'e' | 'E') {
            return Int {
                base,
                empty_int: false,
            };
        }
        let empty_exponent = if self.bump_if('e') || self.bump_if('E') {
            if !self.bump_if('-') {
                self.bump_if('+');
            }
            !self.eat_digits(10)
        } else {
            false
        };
        Float {
            base,
            empty_exponent,
        }
    }

    /// Digits of `radix` with `_` separators. True if any digit was read.
    fn eat_digits(&mut self, radix: u32) -> bool {
        let mut any = false;
        self.eat_while(|c| {
            let digit = c.is_digit(radix);
            any |= digit;
            digit || c == '_'
        });
        any
    }

    /// The rest of a string after its opening quote. False at end of input.
    fn string_tail(&mut self) -> bool {
        while let Some(c) = self.bump() {
            match c {
                '"' => return true,
                '\\' if matches!(self.peek(), '\\' | '"') => {
                    self.bump();
                }
                _ => {}
            }
        }
        false
    }
}
