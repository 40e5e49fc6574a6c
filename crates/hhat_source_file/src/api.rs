// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::ops::Range;
use std::path::Path;

use ariadne::Config;
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use hhat_ast::GrammarError;

use crate::source_file::{read_source_file, ErrorTrait, SourceFile, SourceString};

/// Read source from `file_path` and parse it to a syntax tree. Syntax errors
/// are kept in the returned `SourceFile`; only a failure to read is an error.
pub fn parse_source_file<P: AsRef<Path>>(file_path: P) -> Result<SourceFile, GrammarError> {
    let file_path = file_path.as_ref();
    let source = read_source_file(file_path).map_err(|source| GrammarError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %file_path.display(), bytes = source.len(), "read source file");
    Ok(SourceFile::new(file_path, hhat_parser::parse_text(&source)))
}

/// Parse `source` to a syntax tree.
pub fn parse_source_string<T: ToString>(source: T, fake_file_path: Option<&str>) -> SourceString {
    let source = source.to_string();
    let parse = hhat_parser::parse_text(&source);
    SourceString::new(source, fake_file_path.unwrap_or("no file"), parse)
}

/// Print compiler errors. Diagnostics include text taken from `source`.
/// The file `info_file_path` is only used for printing error messages. In particular,
/// it does not need to correspond to an existing file.
pub fn inner_print_compiler_errors<T: ErrorTrait>(
    errors: &[T],
    info_file_path: &Path,
    source: &str,
) -> io::Result<()> {
    let file_path = info_file_path.to_string_lossy();
    for err in errors.iter() {
        report_error(&err.message(), &err.range(), &file_path, source)?;
        println!();
    }
    Ok(())
}

pub fn print_compiler_errors<T: ErrorTrait>(errors: &[T], file_path: &Path) -> io::Result<()> {
    let source = read_source_file(file_path)?;
    inner_print_compiler_errors(errors, file_path, &source)
}

pub fn report_error(
    message: &str,
    span: &Range<usize>,
    file_path: &str,
    source: &str,
) -> io::Result<()> {
    let mut colors = ColorGenerator::new();
    let a = colors.next();
    // ariadne wants a non-empty span; errors at end of input have an empty one.
    let span = if span.is_empty() {
        span.start..span.start + 1
    } else {
        span.clone()
    };
    Report::build(ReportKind::Error, file_path, span.start)
        .with_message(message)
        .with_config(Config::default().with_compact(true))
        .with_label(
            Label::new((file_path, span))
                .with_message("Near this point")
                .with_color(a),
        )
        .finish()
        .print((file_path, Source::from(source)))
}
