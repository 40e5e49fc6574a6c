// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use crate::event::Event;
use crate::input::Input;
use crate::token_set::TokenSet;
use crate::{
    SyntaxKind::{self, *},
    T,
};

/// `Parser` struct provides the low-level API for navigating through the
/// stream of tokens and constructing the parse tree. The actual parsing
/// happens in the `grammar` module.
///
/// The result of parsing is a stream of events; trivia never reaches the
/// parser.
pub(crate) struct Parser<'t> {
    inp: &'t Input,
    pos: usize,
    events: Vec<Event>,
    depth: usize,
}

/// Deepest nesting of calls the grammar descends into.
pub(crate) const MAX_NESTING: usize = 128;

impl<'t> Parser<'t> {
    pub(super) fn new(inp: &'t Input) -> Parser<'t> {
        Parser {
            inp,
            pos: 0,
            events: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn finish(self) -> Vec<Event> {
        self.events
    }

    /// Returns the kind of the current token.
    /// If parser has already reached the end of input,
    /// the special `EOF` kind is returned.
    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Lookahead operation: returns the kind of the next nth token.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.inp.kind(self.pos + n)
    }

    /// Checks if the current token is `kind`.
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.nth_at(0, kind)
    }

    pub(crate) fn nth_at(&self, n: usize, kind: SyntaxKind) -> bool {
        self.nth(n) == kind
    }

    /// Checks if the current token is in `kinds`.
    pub(crate) fn at_ts(&self, kinds: TokenSet) -> bool {
        kinds.contains(self.current())
    }

    /// Consume the next token if `kind` matches.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.do_bump(kind);
        true
    }

    /// Starts a new node in the syntax tree. All nodes and tokens
    /// consumed between the `start` and the corresponding `Marker::complete`
    /// belong to the same node.
    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.push_event(Event::tombstone());
        Marker::new(pos)
    }

    /// Consume the next token. The current token must be `kind`.
    pub(crate) fn bump(&mut self, kind: SyntaxKind) {
        if !self.eat(kind) {
            self.error(format!("expected {kind:?}, found {:?}", self.current()));
        }
    }

    /// Advances the parser by one token
    pub(crate) fn bump_any(&mut self) {
        let kind = self.nth(0);
        if kind == EOF {
            return;
        }
        self.do_bump(kind);
    }

    /// Emit error with the `message`.
    pub(crate) fn error<T: Into<String>>(&mut self, message: T) {
        let msg = message.into();
        self.push_event(Event::Error { msg });
    }

    /// Consume the next token if it is `kind` or emit an error
    /// otherwise.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(format!("expected {}", describe(kind)));
        false
    }

    /// Go one level deeper into nested expressions. Returns false, and leaves
    /// the depth unchanged, once `MAX_NESTING` is reached.
    pub(crate) fn enter_nesting(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Create an error node and consume the next token.
    pub(crate) fn err_and_bump(&mut self, message: &str) {
        let m = self.start();
        self.error(message);
        self.bump_any();
        m.complete(self, ERROR);
    }

    fn do_bump(&mut self, kind: SyntaxKind) {
        self.pos += 1;
        self.push_event(Event::Token { kind });
    }

    fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }
}

fn describe(kind: SyntaxKind) -> String {
    match kind {
        T![,] => "`,`".to_string(),
        T![.] => "`.`".to_string(),
        T!['('] => "`(`".to_string(),
        T![')'] => "`)`".to_string(),
        T!['{'] => "`{`".to_string(),
        T!['}'] => "`}`".to_string(),
        T!['['] => "`[`".to_string(),
        T![']'] => "`]`".to_string(),
        T![:] => "`:`".to_string(),
        T![type] => "`type`".to_string(),
        IDENT | QUANTUM_IDENT => "a name".to_string(),
        other => format!("{other:?}"),
    }
}

/// See `Parser::start`.
#[must_use]
pub(crate) struct Marker {
    pos: u32,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker { pos }
    }

    /// Finishes the syntax tree node and assigns `kind` to it,
    /// and mark the create a `CompletedMarker` for possible future
    /// operation like `.precede()` to deal with forward_parent.
    pub(crate) fn complete(self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        let idx = self.pos as usize;
        if let Event::Start { kind: slot, .. } = &mut p.events[idx] {
            *slot = kind;
        }
        p.push_event(Event::Finish);
        CompletedMarker::new(self.pos)
    }

    /// Abandons the syntax tree node. All its children
    /// are attached to its parent instead.
    pub(crate) fn abandon(self, p: &mut Parser<'_>) {
        let idx = self.pos as usize;
        if idx == p.events.len() - 1 {
            p.events.pop();
        }
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    fn new(pos: u32) -> Self {
        CompletedMarker { pos }
    }

    /// This method allows to create a new node which starts
    /// *before* the current one. That is, parser could start
    /// node `A`, then complete it, and then after parsing the
    /// whole `A`, decide that it should have started some node
    /// `B` before starting `A`. `precede` allows to do exactly
    /// that. See also docs about
    /// [`Event::Start`](crate::event::Event::Start) forward_parent.
    ///
    /// Given completed events `[START, FINISH]` and its corresponding
    /// `CompletedMarker(pos: 0, _)`.
    /// Append a new `START` events as `[START, FINISH, NEWSTART]`,
    /// then mark `NEWSTART` as `START`'s parent with saving its relative
    /// distance to `NEWSTART` into forward_parent(=2 in this case);
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();
        let idx = self.pos as usize;
        if let Event::Start { forward_parent, .. } = &mut p.events[idx] {
            *forward_parent = Some(new_pos.pos - self.pos);
        }
        new_pos
    }
}
