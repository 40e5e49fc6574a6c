// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

// The node types of the H-hat AST. Construction from parser output is in visitor.rs,
// generic traversal is in traversal.rs.

use smol_str::SmolStr;

/// Root of one compilation unit. Items are kept flat and in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    items: Vec<Item>,
}

impl Program {
    pub fn new(items: Vec<Item>) -> Program {
        Program { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate over the function definitions found directly at the top level.
    pub fn fn_defs(&self) -> impl Iterator<Item = &FnDef> {
        self.items.iter().filter_map(|item| match item {
            Item::FnDef(fn_def) => Some(fn_def),
            _ => None,
        })
    }

    pub fn main(&self) -> Option<&Main> {
        self.items.iter().find_map(|item| match item {
            Item::Main(main) => Some(main),
            _ => None,
        })
    }
}

/// Top-level declarations of a `Program`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Imports(Imports),
    TypeDef(TypeDef),
    FnDef(FnDef),
    Main(Main),
}

/// A simple symbolic name such as `sum` or `@q`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Id {
    name: SmolStr,
}

impl Id {
    pub fn new<T: AsRef<str>>(name: T) -> Id {
        Id {
            name: SmolStr::new(name),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Quantum names carry the `@` prefix.
    pub fn is_quantum(&self) -> bool {
        self.name.starts_with('@')
    }
}

/// A dotted name such as `geometry.point`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompositeId {
    parts: Vec<Id>,
}

impl CompositeId {
    pub fn new(parts: Vec<Id>) -> CompositeId {
        CompositeId { parts }
    }

    pub fn parts(&self) -> &[Id] {
        &self.parts
    }

    /// The dotted text of the name.
    pub fn name(&self) -> String {
        self.parts
            .iter()
            .map(Id::name)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Either kind of symbolic name. Used wherever the grammar accepts a type or
/// callee name that may be qualified.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Name {
    Id(Id),
    Composite(CompositeId),
}

impl Name {
    pub fn text(&self) -> String {
        match self {
            Name::Id(id) => id.name().to_string(),
            Name::Composite(cid) => cid.name(),
        }
    }
}

impl From<Id> for Name {
    fn from(id: Id) -> Name {
        Name::Id(id)
    }
}

impl From<CompositeId> for Name {
    fn from(cid: CompositeId) -> Name {
        Name::Composite(cid)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Imports {
    types: Vec<TypeImport>,
}

impl Imports {
    pub fn new(types: Vec<TypeImport>) -> Imports {
        Imports { types }
    }

    pub fn types(&self) -> &[TypeImport] {
        &self.types
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeImport {
    path: Name,
}

impl TypeImport {
    pub fn new(path: Name) -> TypeImport {
        TypeImport { path }
    }

    pub fn path(&self) -> &Name {
        &self.path
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDef {
    name: Id,
    members: Vec<TypeMember>,
}

impl TypeDef {
    pub fn new(name: Id, members: Vec<TypeMember>) -> TypeDef {
        TypeDef { name, members }
    }

    pub fn name(&self) -> &Id {
        &self.name
    }

    pub fn members(&self) -> &[TypeMember] {
        &self.members
    }
}

/// A member of a type definition. Structs have `Single` members (`x:i64`),
/// enums have `Enum` members (a bare name).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeMember {
    Single(SingleTypeMember),
    Enum(EnumTypeMember),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleTypeMember {
    name: Id,
    ty: Name,
}

impl SingleTypeMember {
    pub fn new(name: Id, ty: Name) -> SingleTypeMember {
        SingleTypeMember { name, ty }
    }

    pub fn name(&self) -> &Id {
        &self.name
    }

    pub fn ty(&self) -> &Name {
        &self.ty
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumTypeMember {
    name: Id,
}

impl EnumTypeMember {
    pub fn new(name: Id) -> EnumTypeMember {
        EnumTypeMember { name }
    }

    pub fn name(&self) -> &Id {
        &self.name
    }
}

/// `a:u64` in a function signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgTypePair {
    arg: Id,
    ty: Name,
}

impl ArgTypePair {
    pub fn new(arg: Id, ty: Name) -> ArgTypePair {
        ArgTypePair { arg, ty }
    }

    pub fn arg(&self) -> &Id {
        &self.arg
    }

    pub fn ty(&self) -> &Name {
        &self.ty
    }
}

/// `a:1` in a call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgValuePair {
    arg: Id,
    value: Expr,
}

impl ArgValuePair {
    pub fn new(arg: Id, value: Expr) -> ArgValuePair {
        ArgValuePair { arg, value }
    }

    pub fn arg(&self) -> &Id {
        &self.arg
    }

    pub fn value(&self) -> &Expr {
        &self.value
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FnArgs {
    args: Vec<ArgTypePair>,
}

impl FnArgs {
    pub fn new(args: Vec<ArgTypePair>) -> FnArgs {
        FnArgs { args }
    }

    pub fn args(&self) -> &[ArgTypePair] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// A function definition. Both the return type and the body may be absent,
/// as in a forward declaration `fn sum(a:u64 b:u64)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FnDef {
    name: Id,
    args: FnArgs,
    ret_type: Option<Name>,
    body: Option<Body>,
}

impl FnDef {
    pub fn new(name: Id, args: FnArgs, ret_type: Option<Name>, body: Option<Body>) -> FnDef {
        FnDef {
            name,
            args,
            ret_type,
            body,
        }
    }

    pub fn name(&self) -> &Id {
        &self.name
    }

    pub fn args(&self) -> &FnArgs {
        &self.args
    }

    pub fn ret_type(&self) -> Option<&Name> {
        self.ret_type.as_ref()
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Body {
    exprs: Vec<Expr>,
}

impl Body {
    pub fn new(exprs: Vec<Expr>) -> Body {
        Body { exprs }
    }

    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Main {
    body: Body,
}

impl Main {
    pub fn new(body: Body) -> Main {
        Main { body }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Id(Id),
    CompositeId(CompositeId),
    Literal(Literal),
    Call(Box<Call>),
    ArgValuePair(Box<ArgValuePair>),
}

/// `add(a b)`, `@redim(@q)`, `math.sum(a:1 b:2)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    caller: Name,
    args: Vec<Expr>,
}

impl Call {
    pub fn new(caller: Name, args: Vec<Expr>) -> Call {
        Call { caller, args }
    }

    pub fn caller(&self) -> &Name {
        &self.caller
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Float,
    Str,
    Bool,
}

/// Literals keep their source text. Interpreting the value is the job of the
/// classical evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    kind: LiteralKind,
    text: SmolStr,
}

impl Literal {
    pub fn new<T: AsRef<str>>(kind: LiteralKind, text: T) -> Literal {
        Literal {
            kind,
            text: SmolStr::new(text),
        }
    }

    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// An owned node of any variant. This is what tree construction passes around
/// before the nodes are stored in their typed parents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Program(Program),
    Imports(Imports),
    TypeImport(TypeImport),
    TypeDef(TypeDef),
    TypeMember(TypeMember),
    Id(Id),
    CompositeId(CompositeId),
    ArgTypePair(ArgTypePair),
    ArgValuePair(ArgValuePair),
    FnArgs(FnArgs),
    FnDef(FnDef),
    Body(Body),
    Call(Call),
    Literal(Literal),
    Main(Main),
}

impl Node {
    /// Name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        self.as_node_ref().kind_name()
    }
}

macro_rules! impl_from_for_node {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Node {
                fn from(node: $variant) -> Node {
                    Node::$variant(node)
                }
            }
        )*
    };
}

impl_from_for_node!(
    Program,
    Imports,
    TypeImport,
    TypeDef,
    TypeMember,
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
