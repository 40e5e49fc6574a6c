// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use super::*;

// use(type:geometry.point)
// use(type:[geometry.point color])
pub(super) fn import(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T![use]);
    p.expect(T!['(']);
    p.expect(T![type]);
    p.expect(T![:]);
    if p.eat(T!['[']) {
        while !at_list_end(p, T![']']) && !p.at(T![')']) {
            if p.at_ts(NAME_FIRST) {
                type_import(p);
            } else {
                p.err_and_bump("expected a type path");
            }
            p.eat(T![,]);
        }
        p.expect(T![']']);
    } else {
        type_import(p);
    }
    p.expect(T![')']);
    m.complete(p, IMPORTS);
}

fn type_import(p: &mut Parser<'_>) {
    let m = p.start();
    path(p);
    m.complete(p, TYPE_IMPORT);
}

pub(super) fn decls(p: &mut Parser<'_>) {
    let m = p.start();
    let mut any = false;
    loop {
        match p.current() {
            T![type] => type_def(p),
            T![fn] => fn_def(p),
            T![use] => {
                p.error("imports must come before type and function definitions");
                import(p);
            }
            T![main] | EOF => break,
            _ => p.err_and_bump("expected a type definition, a function definition or `main`"),
        }
        any = true;
    }
    if any {
        m.complete(p, DECLS);
    } else {
        m.abandon(p);
    }
}

// type point { x:i64 y:i64 }
// type color { red green blue }
fn type_def(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T![type]);
    name(p);
    if p.expect(T!['{']) {
        while !at_list_end(p, T!['}']) {
            if p.at_ts(NAME_FIRST) {
                type_member(p);
            } else {
                p.err_and_bump("expected a type member");
            }
            p.eat(T![,]);
        }
        p.expect(T!['}']);
    }
    m.complete(p, TYPE_DEF);
}

fn type_member(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_any();
    if p.eat(T![:]) {
        path(p);
        m.complete(p, SINGLE_TYPE_MEMBER);
    } else {
        m.complete(p, ENUM_TYPE_MEMBER);
    }
}

// fn sum (a:u64 b:u64) u64 { add(a b) }
// fn forward (a:u64)
pub(super) fn fn_def(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T![fn]);
    name(p);
    if p.at(T!['(']) {
        fn_args(p);
    } else {
        p.error("expected `(` to start the argument list");
    }
    opt_ret_type(p);
    if p.at(T!['{']) {
        expressions::body(p);
    }
    m.complete(p, FN_DEF);
}

fn fn_args(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T!['(']);
    while !at_list_end(p, T![')']) && !p.at(T!['{']) {
        if at_pair(p) {
            arg_type_pair(p);
        } else {
            p.err_and_bump("expected an argument of the form `name:type`");
        }
        p.eat(T![,]);
    }
    p.expect(T![')']);
    m.complete(p, FN_ARGS);
}

fn arg_type_pair(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_any();
    p.bump(T![:]);
    path(p);
    m.complete(p, ARG_TYPE_PAIR);
}

fn opt_ret_type(p: &mut Parser<'_>) -> bool {
    if p.at_ts(NAME_FIRST) {
        path(p);
        true
    } else {
        false
    }
}

// main { print(sum(a:1 b:2)) }
pub(super) fn main(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(T![main]);
    if p.at(T!['{']) {
        expressions::body(p);
    } else {
        p.error("expected `{` after `main`");
    }
    m.complete(p, MAIN);
}
