// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! The contract for building the AST from grammar-parse results.
//!
//! A grammar implementation walks its own parse tree bottom-up. For each
//! production it collects the already-built results of the sub-productions as a
//! `Vec<ParseResult>` and hands them to the matching `build_*` method of a
//! [`TreeBuilder`]. The provided methods implement the standard construction and
//! only check the structural shape of the children; they never validate semantics.

use smol_str::SmolStr;

use crate::ast::*;

/// Raw token kinds a grammar may pass through without reifying them first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawTokenKind {
    Ident,
    QuantumIdent,
    Int,
    Float,
    Str,
    Bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawToken {
    kind: RawTokenKind,
    text: SmolStr,
}

impl RawToken {
    pub fn new<T: AsRef<str>>(kind: RawTokenKind, text: T) -> RawToken {
        RawToken {
            kind,
            text: SmolStr::new(text),
        }
    }

    pub fn kind(&self) -> RawTokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    fn is_name(&self) -> bool {
        matches!(self.kind, RawTokenKind::Ident | RawTokenKind::QuantumIdent)
    }
}

/// The result of one parse step as seen by the tree builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// A node that has already been built.
    Node(Node),
    /// A token passed through as-is.
    Token(RawToken),
    /// A grouping of sibling results, emitted when the grammar yields several
    /// declarations from a single step.
    Group(Vec<ParseResult>),
}

impl ParseResult {
    fn describe(&self) -> String {
        match self {
            ParseResult::Node(node) => node.kind_name().to_string(),
            ParseResult::Token(token) => format!("token `{}`", token.text()),
            ParseResult::Group(group) => format!("group of {}", group.len()),
        }
    }
}

impl From<Node> for ParseResult {
    fn from(node: Node) -> ParseResult {
        ParseResult::Node(node)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("`{production}` expects {expected} children, found {found}")]
    Arity {
        production: &'static str,
        expected: &'static str,
        found: usize,
    },
    #[error("`{production}` expects {expected} at position {position}, found {found}")]
    UnexpectedChild {
        production: &'static str,
        expected: &'static str,
        position: usize,
        found: String,
    },
}

pub type BuildResult<T> = Result<T, BuildError>;

/// Recursively splice the contents of every `Group` into one flat list,
/// preserving order.
pub fn flatten(children: Vec<ParseResult>) -> Vec<ParseResult> {
    let mut flat = Vec::with_capacity(children.len());
    flatten_into(children, &mut flat);
    flat
}

fn flatten_into(children: Vec<ParseResult>, out: &mut Vec<ParseResult>) {
    for child in children {
        match child {
            ParseResult::Group(group) => flatten_into(group, out),
            other => out.push(other),
        }
    }
}

fn unexpected(
    production: &'static str,
    expected: &'static str,
    position: usize,
    found: &ParseResult,
) -> BuildError {
    BuildError::UnexpectedChild {
        production,
        expected,
        position,
        found: found.describe(),
    }
}

fn check_arity(
    production: &'static str,
    expected: &'static str,
    children: &[ParseResult],
    ok: impl Fn(usize) -> bool,
) -> BuildResult<()> {
    if ok(children.len()) {
        Ok(())
    } else {
        Err(BuildError::Arity {
            production,
            expected,
            found: children.len(),
        })
    }
}

fn to_id(production: &'static str, position: usize, child: ParseResult) -> BuildResult<Id> {
    match child {
        ParseResult::Node(Node::Id(id)) => Ok(id),
        ParseResult::Token(token) if token.is_name() => Ok(Id::new(token.text())),
        other => Err(unexpected(production, "an identifier", position, &other)),
    }
}

fn to_name(production: &'static str, position: usize, child: ParseResult) -> BuildResult<Name> {
    match child {
        ParseResult::Node(Node::CompositeId(cid)) => Ok(Name::Composite(cid)),
        other => to_id(production, position, other).map(Name::Id),
    }
}

fn to_expr(production: &'static str, position: usize, child: ParseResult) -> BuildResult<Expr> {
    match child {
        ParseResult::Node(Node::Id(id)) => Ok(Expr::Id(id)),
        ParseResult::Node(Node::CompositeId(cid)) => Ok(Expr::CompositeId(cid)),
        ParseResult::Node(Node::Literal(lit)) => Ok(Expr::Literal(lit)),
        ParseResult::Node(Node::Call(call)) => Ok(Expr::Call(Box::new(call))),
        ParseResult::Node(Node::ArgValuePair(pair)) => Ok(Expr::ArgValuePair(Box::new(pair))),
        ParseResult::Token(token) => match token.kind() {
            RawTokenKind::Ident | RawTokenKind::QuantumIdent => Ok(Expr::Id(Id::new(token.text()))),
            RawTokenKind::Int => Ok(Expr::Literal(Literal::new(LiteralKind::Int, token.text()))),
            RawTokenKind::Float => {
                Ok(Expr::Literal(Literal::new(LiteralKind::Float, token.text())))
            }
            RawTokenKind::Str => Ok(Expr::Literal(Literal::new(LiteralKind::Str, token.text()))),
            RawTokenKind::Bool => Ok(Expr::Literal(Literal::new(LiteralKind::Bool, token.text()))),
        },
        other => Err(unexpected(production, "an expression", position, &other)),
    }
}

fn to_exprs(production: &'static str, children: Vec<ParseResult>) -> BuildResult<Vec<Expr>> {
    flatten(children)
        .into_iter()
        .enumerate()
        .map(|(pos, child)| to_expr(production, pos, child))
        .collect()
}

/// Split off the first child, failing with an arity error on an empty list.
fn split_first(
    production: &'static str,
    expected: &'static str,
    children: Vec<ParseResult>,
) -> BuildResult<(ParseResult, std::vec::IntoIter<ParseResult>)> {
    let found = children.len();
    let mut iter = children.into_iter();
    match iter.next() {
        Some(first) => Ok((first, iter)),
        None => Err(BuildError::Arity {
            production,
            expected,
            found,
        }),
    }
}

fn exactly_one(production: &'static str, children: Vec<ParseResult>) -> BuildResult<ParseResult> {
    check_arity(production, "exactly 1", &children, |n| n == 1)?;
    split_first(production, "exactly 1", children).map(|(first, _)| first)
}

fn exactly_two(
    production: &'static str,
    children: Vec<ParseResult>,
) -> BuildResult<(ParseResult, ParseResult)> {
    check_arity(production, "exactly 2", &children, |n| n == 2)?;
    let (first, mut rest) = split_first(production, "exactly 2", children)?;
    match rest.next() {
        Some(second) => Ok((first, second)),
        None => Err(BuildError::Arity {
            production,
            expected: "exactly 2",
            found: 1,
        }),
    }
}

/// One construction operation per reified production. Every method has a
/// standard implementation; a dialect overrides only what it builds differently.
pub trait TreeBuilder {
    /// Build the root. Nested groupings are flattened so that the program
    /// always holds one flat, ordered list of items.
    fn build_program(&mut self, children: Vec<ParseResult>) -> BuildResult<Program> {
        let items = flatten(children)
            .into_iter()
            .enumerate()
            .map(|(pos, child)| match child {
                ParseResult::Node(Node::Imports(n)) => Ok(Item::Imports(n)),
                ParseResult::Node(Node::TypeDef(n)) => Ok(Item::TypeDef(n)),
                ParseResult::Node(Node::FnDef(n)) => Ok(Item::FnDef(n)),
                ParseResult::Node(Node::Main(n)) => Ok(Item::Main(n)),
                other => Err(unexpected(
                    "program",
                    "imports, a type or function definition, or main",
                    pos,
                    &other,
                )),
            })
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(Program::new(items))
    }

    fn build_imports(&mut self, children: Vec<ParseResult>) -> BuildResult<Imports> {
        let types = flatten(children)
            .into_iter()
            .enumerate()
            .map(|(pos, child)| match child {
                ParseResult::Node(Node::TypeImport(import)) => Ok(import),
                other => to_name("imports", pos, other).map(TypeImport::new),
            })
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(Imports::new(types))
    }

    fn build_type_import(&mut self, children: Vec<ParseResult>) -> BuildResult<TypeImport> {
        let path = exactly_one("type_import", children)?;
        Ok(TypeImport::new(to_name("type_import", 0, path)?))
    }

    fn build_type_def(&mut self, children: Vec<ParseResult>) -> BuildResult<TypeDef> {
        let (first, rest) = split_first("type_def", "at least 1", flatten(children))?;
        let name = to_id("type_def", 0, first)?;
        let members = rest
            .enumerate()
            .map(|(pos, child)| match child {
                ParseResult::Node(Node::TypeMember(member)) => Ok(member),
                ParseResult::Token(token) if token.is_name() => {
                    Ok(TypeMember::Enum(EnumTypeMember::new(Id::new(token.text()))))
                }
                other => Err(unexpected("type_def", "a type member", pos + 1, &other)),
            })
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(TypeDef::new(name, members))
    }

    fn build_single_type_member(&mut self, children: Vec<ParseResult>) -> BuildResult<TypeMember> {
        let (name, ty) = exactly_two("single_type_member", children)?;
        Ok(TypeMember::Single(SingleTypeMember::new(
            to_id("single_type_member", 0, name)?,
            to_name("single_type_member", 1, ty)?,
        )))
    }

    fn build_enum_type_member(&mut self, children: Vec<ParseResult>) -> BuildResult<TypeMember> {
        let name = exactly_one("enum_type_member", children)?;
        Ok(TypeMember::Enum(EnumTypeMember::new(to_id(
            "enum_type_member",
            0,
            name,
        )?)))
    }

    fn build_id(&mut self, children: Vec<ParseResult>) -> BuildResult<Id> {
        to_id("id", 0, exactly_one("id", children)?)
    }

    fn build_composite_id(&mut self, children: Vec<ParseResult>) -> BuildResult<CompositeId> {
        check_arity("composite_id", "at least 2", &children, |n| n >= 2)?;
        let parts = flatten(children)
            .into_iter()
            .enumerate()
            .map(|(pos, child)| to_id("composite_id", pos, child))
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(CompositeId::new(parts))
    }

    fn build_arg_type_pair(&mut self, children: Vec<ParseResult>) -> BuildResult<ArgTypePair> {
        let (arg, ty) = exactly_two("arg_type_pair", children)?;
        Ok(ArgTypePair::new(
            to_id("arg_type_pair", 0, arg)?,
            to_name("arg_type_pair", 1, ty)?,
        ))
    }

    fn build_arg_value_pair(&mut self, children: Vec<ParseResult>) -> BuildResult<ArgValuePair> {
        let (arg, value) = exactly_two("arg_value_pair", children)?;
        Ok(ArgValuePair::new(
            to_id("arg_value_pair", 0, arg)?,
            to_expr("arg_value_pair", 1, value)?,
        ))
    }

    fn build_fn_args(&mut self, children: Vec<ParseResult>) -> BuildResult<FnArgs> {
        let args = flatten(children)
            .into_iter()
            .enumerate()
            .map(|(pos, child)| match child {
                ParseResult::Node(Node::ArgTypePair(pair)) => Ok(pair),
                other => Err(unexpected("fn_args", "an argument-type pair", pos, &other)),
            })
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(FnArgs::new(args))
    }

    /// Build a function definition from its name followed by up to three of:
    /// argument list, return type, body, in that order. Absent parts are not
    /// an error: the argument list defaults to empty, return type and body to
    /// `None`. A raw name token in first position is coerced to an `Id`.
    fn build_fn_def(&mut self, children: Vec<ParseResult>) -> BuildResult<FnDef> {
        check_arity("fn_def", "1 to 4", &children, |n| (1..=4).contains(&n))?;
        let (first, iter) = split_first("fn_def", "1 to 4", children)?;
        let name = to_id("fn_def", 0, first)?;

        // 0: expecting args, 1: expecting return type, 2: expecting body, 3: done
        let mut stage = 0;
        let mut args = None;
        let mut ret_type = None;
        let mut body = None;
        for (pos, child) in iter.enumerate().map(|(i, c)| (i + 1, c)) {
            match child {
                ParseResult::Node(Node::FnArgs(fn_args)) if stage == 0 => {
                    args = Some(fn_args);
                    stage = 1;
                }
                ParseResult::Node(Node::Body(fn_body)) if stage <= 2 => {
                    body = Some(fn_body);
                    stage = 3;
                }
                child @ (ParseResult::Node(Node::Id(_))
                | ParseResult::Node(Node::CompositeId(_))
                | ParseResult::Token(_))
                    if stage <= 1 =>
                {
                    ret_type = Some(to_name("fn_def", pos, child)?);
                    stage = 2;
                }
                other => {
                    return Err(unexpected(
                        "fn_def",
                        "arguments, a return type or a body, in that order",
                        pos,
                        &other,
                    ))
                }
            }
        }
        Ok(FnDef::new(name, args.unwrap_or_default(), ret_type, body))
    }

    fn build_body(&mut self, children: Vec<ParseResult>) -> BuildResult<Body> {
        Ok(Body::new(to_exprs("body", children)?))
    }

    fn build_call(&mut self, children: Vec<ParseResult>) -> BuildResult<Call> {
        let (first, rest) = split_first("call", "at least 1", children)?;
        let caller = to_name("call", 0, first)?;
        let args = flatten(rest.collect())
            .into_iter()
            .enumerate()
            .map(|(pos, child)| to_expr("call", pos + 1, child))
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(Call::new(caller, args))
    }

    fn build_literal(&mut self, children: Vec<ParseResult>) -> BuildResult<Literal> {
        match exactly_one("literal", children)? {
            ParseResult::Node(Node::Literal(literal)) => Ok(literal),
            ParseResult::Token(token) if !token.is_name() => match to_expr(
                "literal",
                0,
                ParseResult::Token(token),
            )? {
                Expr::Literal(literal) => Ok(literal),
                other => Err(BuildError::UnexpectedChild {
                    production: "literal",
                    expected: "a literal token",
                    position: 0,
                    found: format!("{other:?}"),
                }),
            },
            other => Err(unexpected("literal", "a literal token", 0, &other)),
        }
    }

    fn build_main(&mut self, children: Vec<ParseResult>) -> BuildResult<Main> {
        match <[ParseResult; 1]>::try_from(children) {
            Ok([ParseResult::Node(Node::Body(body))]) => Ok(Main::new(body)),
            Ok([other]) => Ok(Main::new(self.build_body(vec![other])?)),
            Err(children) => Ok(Main::new(self.build_body(children)?)),
        }
    }
}

/// The standard construction, with no dialect-specific overrides.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTreeBuilder;

impl TreeBuilder for DefaultTreeBuilder {}
