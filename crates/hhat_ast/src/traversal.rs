// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Uniform, variant-independent access to the children of every AST node.
//!
//! [`NodeRef`] is a borrowed view of any node. Its [`NodeRef::children`] method
//! returns an ordered, possibly nested, sequence of [`Child`]ren: a node that
//! owns a list (the pairs of an `FnArgs`, the members of a `TypeDef`) reports it
//! as a [`Child::Seq`]. [`NodeRef::preorder`] flattens these sequences and walks
//! the whole subtree depth-first in source order.

use crate::ast::*;

/// Borrowed view of one node of any variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    Imports(&'a Imports),
    TypeImport(&'a TypeImport),
    TypeDef(&'a TypeDef),
    SingleTypeMember(&'a SingleTypeMember),
    EnumTypeMember(&'a EnumTypeMember),
    Id(&'a Id),
    CompositeId(&'a CompositeId),
    ArgTypePair(&'a ArgTypePair),
    ArgValuePair(&'a ArgValuePair),
    FnArgs(&'a FnArgs),
    FnDef(&'a FnDef),
    Body(&'a Body),
    Call(&'a Call),
    Literal(&'a Literal),
    Main(&'a Main),
}

/// One entry of a node's child sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Child<'a> {
    Node(NodeRef<'a>),
    Seq(Vec<Child<'a>>),
}

fn seq<'a, T: 'a>(items: &'a [T]) -> Child<'a>
where
    &'a T: Into<NodeRef<'a>>,
{
    Child::Seq(items.iter().map(|item| Child::Node(item.into())).collect())
}

impl<'a> NodeRef<'a> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeRef::Program(_) => "Program",
            NodeRef::Imports(_) => "Imports",
            NodeRef::TypeImport(_) => "TypeImport",
            NodeRef::TypeDef(_) => "TypeDef",
            NodeRef::SingleTypeMember(_) => "SingleTypeMember",
            NodeRef::EnumTypeMember(_) => "EnumTypeMember",
            NodeRef::Id(_) => "Id",
            NodeRef::CompositeId(_) => "CompositeId",
            NodeRef::ArgTypePair(_) => "ArgTypePair",
            NodeRef::ArgValuePair(_) => "ArgValuePair",
            NodeRef::FnArgs(_) => "FnArgs",
            NodeRef::FnDef(_) => "FnDef",
            NodeRef::Body(_) => "Body",
            NodeRef::Call(_) => "Call",
            NodeRef::Literal(_) => "Literal",
            NodeRef::Main(_) => "Main",
        }
    }

    /// The ordered children of this node.
    pub fn children(self) -> Vec<Child<'a>> {
        let node = |n: NodeRef<'a>| Child::Node(n);
        match self {
            NodeRef::Program(program) => program.items().iter().map(|i| node(i.into())).collect(),
            NodeRef::Imports(imports) => vec![seq(imports.types())],
            NodeRef::TypeImport(import) => vec![node(import.path().into())],
            NodeRef::TypeDef(typedef) => {
                vec![node(typedef.name().into()), seq(typedef.members())]
            }
            NodeRef::SingleTypeMember(member) => {
                vec![node(member.name().into()), node(member.ty().into())]
            }
            NodeRef::EnumTypeMember(member) => vec![node(member.name().into())],
            NodeRef::Id(_) | NodeRef::Literal(_) => Vec::new(),
            NodeRef::CompositeId(cid) => vec![seq(cid.parts())],
            NodeRef::ArgTypePair(pair) => vec![node(pair.arg().into()), node(pair.ty().into())],
            NodeRef::ArgValuePair(pair) => {
                vec![node(pair.arg().into()), node(pair.value().into())]
            }
            NodeRef::FnArgs(args) => vec![seq(args.args())],
            NodeRef::FnDef(fn_def) => {
                let mut children = vec![node(fn_def.name().into()), node(fn_def.args().into())];
                if let Some(ret_type) = fn_def.ret_type() {
                    children.push(node(ret_type.into()));
                }
                if let Some(body) = fn_def.body() {
                    children.push(node(body.into()));
                }
                children
            }
            NodeRef::Body(body) => vec![seq(body.exprs())],
            NodeRef::Call(call) => vec![node(call.caller().into()), seq(call.args())],
            NodeRef::Main(main) => vec![node(main.body().into())],
        }
    }

    /// Depth-first, pre-order iterator over this node and all of its
    /// descendants. Sequence children are flattened in place, so the order
    /// of the nodes is the source order.
    pub fn preorder(self) -> Preorder<'a> {
        Preorder { stack: vec![self] }
    }
}

/// Flatten a (possibly nested) child sequence into `out`, preserving order.
pub fn flatten_children<'a>(children: Vec<Child<'a>>, out: &mut Vec<NodeRef<'a>>) {
    for child in children {
        match child {
            Child::Node(node) => out.push(node),
            Child::Seq(nested) => flatten_children(nested, out),
        }
    }
}

pub struct Preorder<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<NodeRef<'a>> {
        let node = self.stack.pop()?;
        let mut children = Vec::new();
        flatten_children(node.children(), &mut children);
        // Pushed in reverse so that the first child is visited next.
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}

impl Node {
    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Program(n) => NodeRef::Program(n),
            Node::Imports(n) => NodeRef::Imports(n),
            Node::TypeImport(n) => NodeRef::TypeImport(n),
            Node::TypeDef(n) => NodeRef::TypeDef(n),
            Node::TypeMember(n) => n.into(),
            Node::Id(n) => NodeRef::Id(n),
            Node::CompositeId(n) => NodeRef::CompositeId(n),
            Node::ArgTypePair(n) => NodeRef::ArgTypePair(n),
            Node::ArgValuePair(n) => NodeRef::ArgValuePair(n),
            Node::FnArgs(n) => NodeRef::FnArgs(n),
            Node::FnDef(n) => NodeRef::FnDef(n),
            Node::Body(n) => NodeRef::Body(n),
            Node::Call(n) => NodeRef::Call(n),
            Node::Literal(n) => NodeRef::Literal(n),
            Node::Main(n) => NodeRef::Main(n),
        }
    }

    pub fn children(&self) -> Vec<Child<'_>> {
        self.as_node_ref().children()
    }
}

impl Program {
    pub fn preorder(&self) -> Preorder<'_> {
        NodeRef::Program(self).preorder()
    }
}

macro_rules! impl_into_node_ref {
    ($($variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $variant> for NodeRef<'a> {
                fn from(node: &'a $variant) -> NodeRef<'a> {
                    NodeRef::$variant(node)
                }
            }
        )*
    };
}

impl_into_node_ref!(
    Program,
    Imports,
    TypeImport,
    TypeDef,
    SingleTypeMember,
    EnumTypeMember,
    Id,
    CompositeId,
    ArgTypePair,
    ArgValuePair,
    FnArgs,
    FnDef,
    Body,
    Call,
    Literal,
    Main,
);

impl<'a> From<&'a Item> for NodeRef<'a> {
    fn from(item: &'a Item) -> NodeRef<'a> {
        match item {
            Item::Imports(n) => NodeRef::Imports(n),
            Item::TypeDef(n) => NodeRef::TypeDef(n),
            Item::FnDef(n) => NodeRef::FnDef(n),
            Item::Main(n) => NodeRef::Main(n),
        }
    }
}

impl<'a> From<&'a TypeMember> for NodeRef<'a> {
    fn from(member: &'a TypeMember) -> NodeRef<'a> {
        match member {
            TypeMember::Single(n) => NodeRef::SingleTypeMember(n),
            TypeMember::Enum(n) => NodeRef::EnumTypeMember(n),
        }
    }
}

impl<'a> From<&'a Name> for NodeRef<'a> {
    fn from(name: &'a Name) -> NodeRef<'a> {
        match name {
            Name::Id(n) => NodeRef::Id(n),
            Name::Composite(n) => NodeRef::CompositeId(n),
        }
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> NodeRef<'a> {
        match expr {
            Expr::Id(n) => NodeRef::Id(n),
            Expr::CompositeId(n) => NodeRef::CompositeId(n),
            Expr::Literal(n) => NodeRef::Literal(n),
            Expr::Call(n) => NodeRef::Call(n),
            Expr::ArgValuePair(n) => NodeRef::ArgValuePair(n),
        }
    }
}
