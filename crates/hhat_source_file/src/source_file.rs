// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

use hhat_ast::SyntaxError;
use hhat_parser::Parse;

use crate::api::{inner_print_compiler_errors, print_compiler_errors};

pub trait ErrorTrait {
    /// Return a message describing the error.
    fn message(&self) -> String;

    /// Return the byte range in the source associated with the error.
    fn range(&self) -> Range<usize>;
}

impl ErrorTrait for SyntaxError {
    fn message(&self) -> String {
        SyntaxError::message(self).to_string()
    }

    fn range(&self) -> Range<usize> {
        SyntaxError::range(self)
    }
}

pub trait SourceTrait {
    /// Return `true` if lexing or parsing the source produced an error.
    fn any_parse_errors(&self) -> bool {
        !self.parse().errors().is_empty()
    }

    fn parse(&self) -> &Parse;
    fn file_path(&self) -> &Path;
    fn print_syntax_errors(&self) -> io::Result<()>;
}

/// A source file read from disk together with its parse.
#[derive(Clone, Debug)]
pub struct SourceFile {
    file_path: PathBuf,
    parse: Parse,
}

impl SourceFile {
    pub fn new<F: AsRef<Path>>(file_path: F, parse: Parse) -> SourceFile {
        SourceFile {
            file_path: file_path.as_ref().to_path_buf(),
            parse,
        }
    }

    pub fn into_parse(self) -> Parse {
        self.parse
    }
}

impl SourceTrait for SourceFile {
    fn parse(&self) -> &Parse {
        &self.parse
    }

    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn print_syntax_errors(&self) -> io::Result<()> {
        print_compiler_errors(self.parse.errors(), &self.file_path)
    }
}

/// Source that did not come from a file. `fake_file_path` is only used in
/// diagnostics.
#[derive(Clone, Debug)]
pub struct SourceString {
    source: String,
    fake_file_path: PathBuf,
    parse: Parse,
}

impl SourceString {
    pub fn new<T: ToString, P: AsRef<Path>>(
        source: T,
        fake_file_path: P,
        parse: Parse,
    ) -> SourceString {
        SourceString {
            source: source.to_string(),
            fake_file_path: fake_file_path.as_ref().to_path_buf(),
            parse,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl SourceTrait for SourceString {
    fn parse(&self) -> &Parse {
        &self.parse
    }

    fn file_path(&self) -> &Path {
        &self.fake_file_path
    }

    fn print_syntax_errors(&self) -> io::Result<()> {
        inner_print_compiler_errors(self.parse.errors(), &self.fake_file_path, &self.source)
    }
}

pub(crate) fn read_source_file(file_path: &Path) -> io::Result<String> {
    fs::read_to_string(file_path)
}
