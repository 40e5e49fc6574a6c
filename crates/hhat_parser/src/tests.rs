// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use super::*;

use expect_test::{expect, Expect};
use hhat_ast::{DefaultTreeBuilder, Expr, Item, LiteralKind, Node, TypeMember};
use std::fmt::Write;

fn check_tree(src: &str, expect: Expect) {
    let parse = parse_text(src);
    assert!(parse.ok(), "unexpected errors: {:?}", parse.errors());
    expect.assert_eq(&format!("{:?}", parse.tree()))
}

fn check_errors(src: &str, expect: Expect) {
    let actual = parse_text(src)
        .errors()
        .iter()
        .fold(String::new(), |mut output, error| {
            let _ = writeln!(output, "{error}");
            output
        });
    expect.assert_eq(&actual)
}

fn program(src: &str) -> hhat_ast::Program {
    let parse = parse_text(src);
    assert!(parse.ok(), "unexpected errors: {:?}", parse.errors());
    match build_ast(parse.tree(), &mut DefaultTreeBuilder) {
        Ok(Node::Program(program)) => program,
        other => panic!("expected a program, got {other:?}"),
    }
}

#[test]
fn function_definition_tree() {
    check_tree(
        "fn sum (a:u64 b:u64) u64 { add(a b) }",
        expect![[r#"
            SOURCE_FILE@0..37
              DECLS@0..37
                FN_DEF@0..37
                  FN_KW@0..2 "fn"
                  IDENT@3..6 "sum"
                  FN_ARGS@7..20
                    L_PAREN@7..8 "("
                    ARG_TYPE_PAIR@8..13
                      IDENT@8..9 "a"
                      COLON@9..10 ":"
                      PATH@10..13
                        IDENT@10..13 "u64"
                    ARG_TYPE_PAIR@14..19
                      IDENT@14..15 "b"
                      COLON@15..16 ":"
                      PATH@16..19
                        IDENT@16..19 "u64"
                    R_PAREN@19..20 ")"
                  PATH@21..24
                    IDENT@21..24 "u64"
                  BODY@25..37
                    L_CURLY@25..26 "{"
                    CALL@27..35
                      PATH@27..30
                        IDENT@27..30 "add"
                      L_PAREN@30..31 "("
                      PATH@31..32
                        IDENT@31..32 "a"
                      PATH@33..34
                        IDENT@33..34 "b"
                      R_PAREN@34..35 ")"
                    R_CURLY@36..37 "}"
        "#]],
    );
}

#[test]
fn imports_and_main_without_declarations() {
    check_tree(
        "use(type:point)\nmain { @h(@q) }",
        expect![[r#"
            SOURCE_FILE@0..31
              IMPORTS@0..15
                USE_KW@0..3 "use"
                L_PAREN@3..4 "("
                TYPE_KW@4..8 "type"
                COLON@8..9 ":"
                TYPE_IMPORT@9..14
                  PATH@9..14
                    IDENT@9..14 "point"
                R_PAREN@14..15 ")"
              MAIN@16..31
                MAIN_KW@16..20 "main"
                BODY@21..31
                  L_CURLY@21..22 "{"
                  CALL@23..29
                    PATH@23..25
                      QUANTUM_IDENT@23..25 "@h"
                    L_PAREN@25..26 "("
                    PATH@26..28
                      QUANTUM_IDENT@26..28 "@q"
                    R_PAREN@28..29 ")"
                  R_CURLY@30..31 "}"
        "#]],
    );
}

#[test]
fn argument_without_type() {
    check_errors(
        "fn f(a) {}",
        expect![[r#"
            expected an argument of the form `name:type` at 5..6
        "#]],
    );
}

#[test]
fn unterminated_string_in_main() {
    check_errors(
        "main { print(\"hi) }",
        expect![[r#"
            Missing trailing `"` symbol to terminate the string literal at 13..19
            expected `)` at 19..19
            expected `}` at 19..19
        "#]],
    );
}

#[test]
fn comments_are_trivia() {
    let parse = parse_text("// leading\nfn f() /* no body */\n");
    assert!(parse.ok());
    let fn_def = parse
        .tree()
        .children()
        .flat_map(SyntaxNode::children)
        .next()
        .map(SyntaxNode::kind);
    assert_eq!(fn_def, Some(SyntaxKind::FN_DEF));
}

#[test]
fn stray_tokens_become_error_nodes() {
    let parse = parse_text("fn f() {} ) main {}");
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].range(), 10..11);
    let has_error_node = parse
        .tree()
        .children()
        .flat_map(SyntaxNode::children)
        .any(|node| node.kind() == SyntaxKind::ERROR);
    assert!(has_error_node);
}

#[test]
fn nothing_after_main() {
    check_errors(
        "main {} fn f()",
        expect![[r#"
            unexpected input after `main` at 8..10
            unexpected input after `main` at 11..12
            unexpected input after `main` at 12..13
            unexpected input after `main` at 13..14
        "#]],
    );
}

#[test]
fn program_with_all_declarations() {
    let program = program(
        r#"
use(type:[geometry.point color])
type point { x:i64 y:i64 }
type color { red green }
fn sum (a:u64 b:u64) u64 { add(a b) }
fn sum (a:f32) f32
main { print(sum(a:1 b:2.5)) @redim(@q) }
"#,
    );
    assert_eq!(program.items().len(), 6);

    let Item::Imports(imports) = &program.items()[0] else {
        panic!("expected imports first");
    };
    let paths: Vec<String> = imports.types().iter().map(|t| t.path().text()).collect();
    assert_eq!(paths, ["geometry.point", "color"]);

    let Item::TypeDef(point) = &program.items()[1] else {
        panic!("expected a type definition");
    };
    assert_eq!(point.name().name(), "point");
    assert!(matches!(point.members()[0], TypeMember::Single(_)));
    let Item::TypeDef(color) = &program.items()[2] else {
        panic!("expected a type definition");
    };
    assert!(color
        .members()
        .iter()
        .all(|m| matches!(m, TypeMember::Enum(_))));

    let sums: Vec<_> = program.fn_defs().collect();
    assert_eq!(sums.len(), 2);
    assert_eq!(sums[0].args().len(), 2);
    assert_eq!(sums[0].ret_type().map(|t| t.text()).as_deref(), Some("u64"));
    assert_eq!(sums[0].body().map(|b| b.exprs().len()), Some(1));
    assert_eq!(sums[1].args().len(), 1);
    assert!(sums[1].body().is_none());

    let main = program.main().expect("main");
    let exprs = main.body().exprs();
    assert_eq!(exprs.len(), 2);
    let Expr::Call(print) = &exprs[0] else {
        panic!("expected a call");
    };
    assert_eq!(print.caller().text(), "print");
    let Expr::Call(sum) = &print.args()[0] else {
        panic!("expected a nested call");
    };
    let values: Vec<_> = sum
        .args()
        .iter()
        .map(|arg| match arg {
            Expr::ArgValuePair(pair) => match pair.value() {
                Expr::Literal(lit) => (pair.arg().name().to_string(), lit.kind()),
                other => panic!("unexpected value {other:?}"),
            },
            other => panic!("unexpected argument {other:?}"),
        })
        .collect();
    assert_eq!(
        values,
        [
            ("a".to_string(), LiteralKind::Int),
            ("b".to_string(), LiteralKind::Float)
        ]
    );
    let Expr::Call(redim) = &exprs[1] else {
        panic!("expected a call");
    };
    assert_eq!(redim.caller().text(), "@redim");
    assert!(matches!(&redim.args()[0], Expr::Id(id) if id.is_quantum()));
}

#[test]
fn function_without_arguments_or_return_type() {
    let program = program("fn noop () { }");
    let fn_def = program.fn_defs().next().expect("fn_def");
    assert!(fn_def.args().is_empty());
    assert!(fn_def.ret_type().is_none());
    assert_eq!(fn_def.body().map(|b| b.exprs().len()), Some(0));
}

fn nested_calls(depth: usize) -> String {
    format!("main {{ {}{} }}", "f(".repeat(depth), ")".repeat(depth))
}

#[test]
fn nesting_up_to_the_limit_parses() {
    let program = program(&nested_calls(parser::MAX_NESTING));
    assert!(program.main().is_some());
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let depth = 5000;
    let parse = parse_text(&nested_calls(depth));
    let errors = parse.errors();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].message(), "expression nested too deeply");
    // The `(` of the first call past the limit.
    let offset = "main { ".len() + 2 * parser::MAX_NESTING + 1;
    assert_eq!(errors[0].range(), offset..offset + 1);
    assert_eq!(parse.tree().text_range(), 0..7 + 3 * depth + 2);
}
