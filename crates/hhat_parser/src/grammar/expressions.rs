// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use super::*;

pub(super) fn body(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T!['{']);
    while !at_list_end(p, T!['}']) {
        expr(p);
    }
    p.expect(T!['}']);
    m.complete(p, BODY);
}

/// Parse one expression. On unexpected input, an error node swallows one token.
pub(super) fn expr(p: &mut Parser<'_>) {
    if p.at_ts(LITERAL_FIRST) {
        literal(p);
        return;
    }
    if !p.at_ts(EXPR_FIRST) {
        p.err_and_bump("expected an expression");
        return;
    }
    let Some(callee) = path(p) else {
        return;
    };
    if p.at(T!['(']) {
        let m = callee.precede(p);
        if p.enter_nesting() {
            call_args(p);
            p.leave_nesting();
        } else {
            skip_nested_args(p);
        }
        m.complete(p, CALL);
    }
}

// Past the nesting limit the arguments are not parsed: everything up to the
// matching `)` goes into one error node.
fn skip_nested_args(p: &mut Parser<'_>) {
    let m = p.start();
    p.error("expression nested too deeply");
    let mut open = 0usize;
    while !p.at(EOF) {
        if p.at(T!['(']) {
            open += 1;
        } else if p.at(T![')']) {
            open -= 1;
        }
        p.bump_any();
        if open == 0 {
            break;
        }
    }
    m.complete(p, ERROR);
}

fn literal(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_any();
    m.complete(p, LITERAL);
}

// f(a b)  f(a:1 b:@q)  f(g(x), 2)
fn call_args(p: &mut Parser<'_>) {
    p.bump(T!['(']);
    while !at_list_end(p, T![')']) && !p.at(T!['}']) {
        if at_pair(p) {
            arg_value_pair(p);
        } else {
            expr(p);
        }
        p.eat(T![,]);
    }
    p.expect(T![')']);
}

fn arg_value_pair(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_any();
    p.bump(T![:]);
    if p.at(T![')']) || p.at(T!['}']) {
        p.error("expected an expression");
    } else {
        expr(p);
    }
    m.complete(p, ARG_VALUE_PAIR);
}
