// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use hhat_ast::{
    ArgTypePair, Body, BuildError, CompositeId, DefaultTreeBuilder, Expr, FnArgs, FnDef, Id,
    Item, Literal, LiteralKind, Main, Name, Node, ParseResult, RawToken, RawTokenKind,
    TreeBuilder,
};

fn id(name: &str) -> ParseResult {
    Node::Id(Id::new(name)).into()
}

fn ident(name: &str) -> ParseResult {
    ParseResult::Token(RawToken::new(RawTokenKind::Ident, name))
}

fn int(text: &str) -> ParseResult {
    ParseResult::Token(RawToken::new(RawTokenKind::Int, text))
}

fn args(pairs: &[(&str, &str)]) -> ParseResult {
    let pairs = pairs
        .iter()
        .map(|(arg, ty)| ArgTypePair::new(Id::new(arg), Name::Id(Id::new(ty))))
        .collect();
    Node::FnArgs(FnArgs::new(pairs)).into()
}

fn body(exprs: Vec<Expr>) -> ParseResult {
    Node::Body(Body::new(exprs)).into()
}

fn fn_def(children: Vec<ParseResult>) -> Result<FnDef, BuildError> {
    DefaultTreeBuilder.build_fn_def(children)
}

#[test]
fn fn_def_with_all_parts() {
    let def = fn_def(vec![
        id("sum"),
        args(&[("a", "u32"), ("b", "u32")]),
        id("u32"),
        body(vec![Expr::Id(Id::new("a"))]),
    ])
    .unwrap();
    assert_eq!(def.name().name(), "sum");
    assert_eq!(def.args().len(), 2);
    assert_eq!(def.ret_type(), Some(&Name::Id(Id::new("u32"))));
    assert_eq!(def.body().map(|b| b.exprs().len()), Some(1));
}

#[test]
fn fn_def_name_only_defaults_to_empty_args() {
    let def = fn_def(vec![id("noop")]).unwrap();
    assert!(def.args().is_empty());
    assert_eq!(def.ret_type(), None);
    assert_eq!(def.body(), None);
}

#[test]
fn fn_def_name_and_body() {
    let def = fn_def(vec![id("run"), body(Vec::new())]).unwrap();
    assert!(def.args().is_empty());
    assert_eq!(def.ret_type(), None);
    assert_eq!(def.body(), Some(&Body::default()));
}

#[test]
fn fn_def_return_type_without_args() {
    let def = fn_def(vec![id("zero"), ident("u32"), body(Vec::new())]).unwrap();
    assert!(def.args().is_empty());
    assert_eq!(def.ret_type().map(Name::text), Some(String::from("u32")));
}

#[test]
fn fn_def_coerces_raw_name_token() {
    let def = fn_def(vec![ident("sum"), args(&[("a", "u32")])]).unwrap();
    assert_eq!(def.name(), &Id::new("sum"));
    assert_eq!(def.args().args()[0].arg(), &Id::new("a"));
}

#[test]
fn fn_def_composite_return_type() {
    let ret: ParseResult =
        Node::CompositeId(CompositeId::new(vec![Id::new("geom"), Id::new("point")])).into();
    let def = fn_def(vec![id("origin"), args(&[]), ret]).unwrap();
    assert_eq!(def.ret_type().map(Name::text), Some(String::from("geom.point")));
}

#[test]
fn fn_def_without_children_is_arity_error() {
    assert_eq!(
        fn_def(Vec::new()),
        Err(BuildError::Arity {
            production: "fn_def",
            expected: "1 to 4",
            found: 0,
        })
    );
}

#[test]
fn fn_def_with_five_children_is_arity_error() {
    let err = fn_def(vec![id("f"), args(&[]), id("u32"), body(Vec::new()), body(Vec::new())])
        .unwrap_err();
    assert!(matches!(err, BuildError::Arity { found: 5, .. }));
}

#[test]
fn fn_def_rejects_parts_out_of_order() {
    let err = fn_def(vec![id("f"), body(Vec::new()), args(&[])]).unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnexpectedChild {
            production: "fn_def",
            position: 2,
            ..
        }
    ));
}

#[test]
fn fn_def_rejects_literal_name() {
    let err = fn_def(vec![int("1")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "`fn_def` expects an identifier at position 0, found token `1`"
    );
}

#[test]
fn program_flattens_groups_in_order() {
    let first = Node::FnDef(fn_def(vec![id("a")]).unwrap());
    let second = Node::FnDef(fn_def(vec![id("b")]).unwrap());
    let main = Node::Main(Main::new(Body::default()));
    let program = DefaultTreeBuilder
        .build_program(vec![
            ParseResult::Group(vec![
                first.into(),
                ParseResult::Group(vec![second.into()]),
            ]),
            main.into(),
        ])
        .unwrap();
    let names: Vec<_> = program.fn_defs().map(|def| def.name().name()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(program.items().len(), 3);
    assert!(matches!(program.items()[2], Item::Main(_)));
}

#[test]
fn empty_program() {
    let program = DefaultTreeBuilder.build_program(Vec::new()).unwrap();
    assert!(program.items().is_empty());
    assert!(program.main().is_none());
}

#[test]
fn program_rejects_bare_expressions() {
    let err = DefaultTreeBuilder.build_program(vec![int("3")]).unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnexpectedChild {
            production: "program",
            position: 0,
            ..
        }
    ));
}

#[test]
fn composite_id_needs_two_parts() {
    let err = DefaultTreeBuilder.build_composite_id(vec![ident("a")]).unwrap_err();
    assert!(matches!(err, BuildError::Arity { found: 1, .. }));
    let cid = DefaultTreeBuilder
        .build_composite_id(vec![ident("a"), id("b")])
        .unwrap();
    assert_eq!(cid.name(), "a.b");
}

#[test]
fn call_converts_tokens_to_expressions() {
    let call = DefaultTreeBuilder
        .build_call(vec![
            ident("@redim"),
            ParseResult::Token(RawToken::new(RawTokenKind::QuantumIdent, "@q")),
            int("2"),
        ])
        .unwrap();
    assert_eq!(call.caller(), &Name::Id(Id::new("@redim")));
    assert_eq!(
        call.args(),
        [
            Expr::Id(Id::new("@q")),
            Expr::Literal(Literal::new(LiteralKind::Int, "2")),
        ]
    );
}

#[test]
fn literal_rejects_names() {
    assert_eq!(
        DefaultTreeBuilder.build_literal(vec![int("7")]),
        Ok(Literal::new(LiteralKind::Int, "7"))
    );
    assert!(DefaultTreeBuilder.build_literal(vec![ident("x")]).is_err());
}

#[test]
fn main_accepts_built_body_or_bare_expressions() {
    let built = DefaultTreeBuilder
        .build_main(vec![body(vec![Expr::Id(Id::new("x"))])])
        .unwrap();
    let bare = DefaultTreeBuilder.build_main(vec![ident("x")]).unwrap();
    assert_eq!(built, bare);
    assert_eq!(
        DefaultTreeBuilder.build_main(Vec::new()).unwrap(),
        Main::new(Body::default())
    );
}

#[test]
fn type_def_members() {
    let single = Node::TypeMember(
        DefaultTreeBuilder
            .build_single_type_member(vec![ident("x"), ident("f64")])
            .unwrap(),
    );
    let typedef = DefaultTreeBuilder
        .build_type_def(vec![ident("point"), single.into(), ident("origin")])
        .unwrap();
    assert_eq!(typedef.name(), &Id::new("point"));
    assert_eq!(typedef.members().len(), 2);
}

// A dialect that keeps only the signatures of functions.
struct SignaturesOnly;

impl TreeBuilder for SignaturesOnly {
    fn build_body(&mut self, _children: Vec<ParseResult>) -> Result<Body, BuildError> {
        Ok(Body::default())
    }
}

#[test]
fn overridden_method_is_used_by_default_methods() {
    let main = SignaturesOnly.build_main(vec![ident("x"), int("1")]).unwrap();
    assert_eq!(main, Main::new(Body::default()));
}
