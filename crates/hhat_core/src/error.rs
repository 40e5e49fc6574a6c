// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;

use hhat_ast::GrammarError;

use crate::lowlevel::SessionState;
use crate::memory::IndexError;

/// The comparable taxonomy behind `HhatError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    InvalidIdentifier,
    ReservedPrefix,
    SourceNotFound,
    NotAProgram,
    DefinitionNotFound,
    LoweringStateError,
    UnboundWorkingData,
    Syntax,
    Io,
    IndexExhausted,
    IndexAlreadyBound,
    Evaluation,
    UnknownInstruction,
}

#[derive(Debug, thiserror::Error)]
pub enum HhatError {
    #[error("{what} cannot be empty")]
    EmptyInput { what: &'static str },

    #[error(
        "{role} '{name}' is invalid: it must start with a letter or underscore, \
         and only contain alphanumeric characters, underscores (_) or hyphens (-)"
    )]
    InvalidIdentifier { role: &'static str, name: String },

    #[error("Function name '{name}' is a keyword and cannot name a function")]
    KeywordName { name: String },

    #[error("Directory component '{component}' within 'src/' cannot start with '{prefix}'")]
    ReservedPrefix {
        component: String,
        prefix: &'static str,
    },

    #[error("cannot resolve project root '{}': {source}", path.display())]
    ProjectRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Source file for module '{module}' not found: {}", path.display())]
    SourceNotFound { module: String, path: PathBuf },

    #[error("File {} does not parse to a valid Program AST, found {found}", path.display())]
    NotAProgram { path: PathBuf, found: &'static str },

    #[error("No function definition named '{name}' found in {}", path.display())]
    DefinitionNotFound { name: String, path: PathBuf },

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("cannot {operation} a lowering session in state {state:?}")]
    LoweringState {
        operation: &'static str,
        state: SessionState,
    },

    #[error("'{data}' is not bound to any index and cannot be lowered")]
    UnboundWorkingData { data: String },

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("cannot evaluate `{expr}`: {message}")]
    Evaluation { expr: String, message: String },

    #[error("instruction '{name}' has no translation in {backend}")]
    UnknownInstruction { name: String, backend: &'static str },
}

impl HhatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HhatError::EmptyInput { .. } => ErrorKind::EmptyInput,
            HhatError::InvalidIdentifier { .. } | HhatError::KeywordName { .. } => {
                ErrorKind::InvalidIdentifier
            }
            HhatError::ReservedPrefix { .. } => ErrorKind::ReservedPrefix,
            HhatError::SourceNotFound { .. } => ErrorKind::SourceNotFound,
            HhatError::NotAProgram { .. } => ErrorKind::NotAProgram,
            HhatError::DefinitionNotFound { .. } => ErrorKind::DefinitionNotFound,
            HhatError::Grammar(GrammarError::Io { .. }) | HhatError::ProjectRoot { .. } => {
                ErrorKind::Io
            }
            HhatError::Grammar(_) => ErrorKind::Syntax,
            HhatError::LoweringState { .. } => ErrorKind::LoweringStateError,
            HhatError::UnboundWorkingData { .. } => ErrorKind::UnboundWorkingData,
            HhatError::Index(IndexError::IndexExhausted { .. }) => ErrorKind::IndexExhausted,
            HhatError::Index(IndexError::IndexAlreadyBound { .. }) => ErrorKind::IndexAlreadyBound,
            HhatError::Evaluation { .. } => ErrorKind::Evaluation,
            HhatError::UnknownInstruction { .. } => ErrorKind::UnknownInstruction,
        }
    }
}

pub type Result<T> = std::result::Result<T, HhatError>;
