// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use hhat_ast::{
    ArgTypePair, Body, Call, Child, Expr, FnArgs, FnDef, Id, Imports, Item, Literal, LiteralKind,
    Main, Name, NodeRef, Program, TypeImport,
};

fn kinds<'a>(nodes: impl Iterator<Item = NodeRef<'a>>) -> Vec<&'static str> {
    nodes.map(|node| node.kind_name()).collect()
}

fn sample_program() -> Program {
    let args = FnArgs::new(vec![
        ArgTypePair::new(Id::new("a"), Name::Id(Id::new("u32"))),
        ArgTypePair::new(Id::new("b"), Name::Id(Id::new("u32"))),
    ]);
    let sum = FnDef::new(
        Id::new("sum"),
        args,
        Some(Name::Id(Id::new("u32"))),
        Some(Body::new(vec![Expr::Id(Id::new("a"))])),
    );
    let call = Call::new(
        Name::Id(Id::new("@h")),
        vec![Expr::Literal(Literal::new(LiteralKind::Int, "0"))],
    );
    Program::new(vec![
        Item::Imports(Imports::new(vec![TypeImport::new(Name::Id(Id::new("u32")))])),
        Item::FnDef(sum),
        Item::Main(Main::new(Body::new(vec![Expr::Call(Box::new(call))]))),
    ])
}

#[test]
fn preorder_visits_in_source_order() {
    let program = sample_program();
    assert_eq!(
        kinds(program.preorder()),
        [
            "Program",
            "Imports",
            "TypeImport",
            "Id",
            "FnDef",
            "Id",
            "FnArgs",
            "ArgTypePair",
            "Id",
            "Id",
            "ArgTypePair",
            "Id",
            "Id",
            "Id",
            "Body",
            "Id",
            "Main",
            "Body",
            "Call",
            "Id",
            "Literal",
        ]
    );
}

#[test]
fn preorder_finds_nested_fn_defs() {
    let program = sample_program();
    let names: Vec<_> = program
        .preorder()
        .filter_map(|node| match node {
            NodeRef::FnDef(def) => Some(def.name().name()),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["sum"]);
}

#[test]
fn fn_def_children_skip_absent_parts() {
    let def = FnDef::new(Id::new("noop"), FnArgs::default(), None, None);
    let children = NodeRef::FnDef(&def).children();
    assert_eq!(children.len(), 2);
    assert!(matches!(children[0], Child::Node(NodeRef::Id(_))));
    assert!(matches!(children[1], Child::Node(NodeRef::FnArgs(_))));
}

#[test]
fn lists_are_reported_as_sequences() {
    let args = FnArgs::new(vec![ArgTypePair::new(Id::new("a"), Name::Id(Id::new("u32")))]);
    match NodeRef::FnArgs(&args).children().as_slice() {
        [Child::Seq(pairs)] => assert_eq!(pairs.len(), 1),
        other => panic!("unexpected children {other:?}"),
    }
    let empty = Body::default();
    assert_eq!(NodeRef::Body(&empty).children(), [Child::Seq(Vec::new())]);
}

#[test]
fn leaves_have_no_children() {
    let id = Id::new("x");
    let lit = Literal::new(LiteralKind::Str, "\"hi\"");
    assert!(NodeRef::Id(&id).children().is_empty());
    assert!(NodeRef::Literal(&lit).children().is_empty());
    assert_eq!(kinds(NodeRef::Id(&id).preorder()), ["Id"]);
}
