// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! The kinds of tokens and nodes in the Heather concrete syntax tree.

/// Token and node kinds. Tokens come first, then keywords, then the composite
/// nodes built by the grammar.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[doc(hidden)]
    TOMBSTONE,
    EOF,
    // Tokens
    COMMA,
    DOT,
    L_PAREN,
    R_PAREN,
    L_CURLY,
    R_CURLY,
    L_BRACK,
    R_BRACK,
    COLON,
    AT,
    // Keywords
    USE_KW,
    TYPE_KW,
    FN_KW,
    MAIN_KW,
    TRUE_KW,
    FALSE_KW,
    // Literals and names
    INT_NUMBER,
    FLOAT_NUMBER,
    STRING,
    IDENT,
    QUANTUM_IDENT,
    ERROR,
    WHITESPACE,
    COMMENT,
    // Nodes
    SOURCE_FILE,
    DECLS,
    IMPORTS,
    TYPE_IMPORT,
    TYPE_DEF,
    SINGLE_TYPE_MEMBER,
    ENUM_TYPE_MEMBER,
    PATH,
    FN_DEF,
    FN_ARGS,
    ARG_TYPE_PAIR,
    BODY,
    MAIN,
    CALL,
    ARG_VALUE_PAIR,
    LITERAL,
    #[doc(hidden)]
    __LAST,
}

use self::SyntaxKind::*;

impl SyntaxKind {
    pub fn is_keyword(self) -> bool {
        matches!(self, USE_KW | TYPE_KW | FN_KW | MAIN_KW | TRUE_KW | FALSE_KW)
    }

    pub fn is_punct(self) -> bool {
        matches!(
            self,
            COMMA | DOT | L_PAREN | R_PAREN | L_CURLY | R_CURLY | L_BRACK | R_BRACK | COLON | AT
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(self, INT_NUMBER | FLOAT_NUMBER | STRING | TRUE_KW | FALSE_KW)
    }

    /// Names of classical or quantum data, types and functions.
    pub fn is_name(self) -> bool {
        matches!(self, IDENT | QUANTUM_IDENT)
    }

    pub fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | COMMENT)
    }

    pub fn from_keyword(ident: &str) -> Option<SyntaxKind> {
        let kw = match ident {
            "use" => USE_KW,
            "type" => TYPE_KW,
            "fn" => FN_KW,
            "main" => MAIN_KW,
            "true" => TRUE_KW,
            "false" => FALSE_KW,
            _ => return None,
        };
        Some(kw)
    }
}

#[macro_export]
macro_rules! T {
    [,] => { $crate::SyntaxKind::COMMA };
    [.] => { $crate::SyntaxKind::DOT };
    ['('] => { $crate::SyntaxKind::L_PAREN };
    [')'] => { $crate::SyntaxKind::R_PAREN };
    ['{'] => { $crate::SyntaxKind::L_CURLY };
    ['}'] => { $crate::SyntaxKind::R_CURLY };
    ['['] => { $crate::SyntaxKind::L_BRACK };
    [']'] => { $crate::SyntaxKind::R_BRACK };
    [:] => { $crate::SyntaxKind::COLON };
    [@] => { $crate::SyntaxKind::AT };
    [use] => { $crate::SyntaxKind::USE_KW };
    [type] => { $crate::SyntaxKind::TYPE_KW };
    [fn] => { $crate::SyntaxKind::FN_KW };
    [main] => { $crate::SyntaxKind::MAIN_KW };
    [true] => { $crate::SyntaxKind::TRUE_KW };
    [false] => { $crate::SyntaxKind::FALSE_KW };
}
