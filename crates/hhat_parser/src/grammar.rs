// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! This is the actual "grammar" of the Heather dialect.
//!
//! Each function in this module and its children corresponds to a
//! production of the formal grammar. `items` holds the top-level
//! declarations, `expressions` what may appear in a body.
//!
//! Coding convention: rules like `type_def` always produce either a node or
//! an error, rules like `opt_ret_type` may produce nothing. Non-opt rules
//! start at their first token; the caller is responsible for branching on it.

mod expressions;
mod items;

use crate::{
    parser::{CompletedMarker, Parser},
    token_set::TokenSet,
    SyntaxKind::{self, *},
    T,
};

pub(crate) const NAME_FIRST: TokenSet = TokenSet::new(&[IDENT, QUANTUM_IDENT]);

pub(crate) const LITERAL_FIRST: TokenSet =
    TokenSet::new(&[INT_NUMBER, FLOAT_NUMBER, STRING, T![true], T![false]]);

pub(crate) const EXPR_FIRST: TokenSet = LITERAL_FIRST.union(NAME_FIRST);

pub(crate) mod entry {
    use super::*;

    // This is the entry point into the parser. Imports come first, then a run
    // of type and function definitions grouped under one DECLS node, then an
    // optional `main`.
    pub(crate) fn source_file(p: &mut Parser<'_>) {
        let m = p.start();
        while p.at(T![use]) {
            items::import(p);
        }
        items::decls(p);
        if p.at(T![main]) {
            items::main(p);
        }
        while !p.at(EOF) {
            p.err_and_bump("unexpected input after `main`");
        }
        m.complete(p, SOURCE_FILE);
    }
}

/// A name possibly qualified with dots, as in `geometry.point`.
fn path(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.at_ts(NAME_FIRST) {
        p.error("expected a name");
        return None;
    }
    let m = p.start();
    p.bump_any();
    while p.at(T![.]) && NAME_FIRST.contains(p.nth(1)) {
        p.bump(T![.]);
        p.bump_any();
    }
    Some(m.complete(p, PATH))
}

/// A bare name token, kept as a token of its parent.
fn name(p: &mut Parser<'_>) -> bool {
    if p.at_ts(NAME_FIRST) {
        p.bump_any();
        true
    } else {
        p.error("expected a name");
        false
    }
}

/// `name:` introduces a pair both in argument lists and in calls.
fn at_pair(p: &Parser<'_>) -> bool {
    p.at_ts(NAME_FIRST) && p.nth_at(1, T![:])
}

fn at_list_end(p: &Parser<'_>, close: SyntaxKind) -> bool {
    p.at(close) || p.at(EOF)
}
