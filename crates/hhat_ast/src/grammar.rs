// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

// The boundary between the core and a concrete grammar.

use std::fmt;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::ast::Node;
use crate::visitor::BuildError;

/// A syntax error found by a grammar, with the byte range it applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    message: String,
    range: Range<usize>,
}

impl SyntaxError {
    pub fn new<T: ToString>(message: T, range: Range<usize>) -> SyntaxError {
        SyntaxError {
            message: message.to_string(),
            range,
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}", self.message, self.range)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("unable to read source file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{}' has {} syntax error(s), first: {}", path.display(), errors.len(), first_error(errors))]
    Syntax {
        path: PathBuf,
        errors: Vec<SyntaxError>,
    },
    #[error("'{}' could not be built into an AST: {source}", path.display())]
    Build {
        path: PathBuf,
        #[source]
        source: BuildError,
    },
}

fn first_error(errors: &[SyntaxError]) -> String {
    errors
        .first()
        .map_or_else(|| String::from("<none>"), ToString::to_string)
}

/// A concrete grammar. The core calls this and never branches on which grammar
/// is active. The returned root is whatever the grammar produced; callers that
/// need a `Program` check for it.
pub trait GrammarParser {
    fn parse_file(&self, file_path: &Path) -> Result<Node, GrammarError>;
}

impl<P: GrammarParser + ?Sized> GrammarParser for &P {
    fn parse_file(&self, file_path: &Path) -> Result<Node, GrammarError> {
        (**self).parse_file(file_path)
    }
}
