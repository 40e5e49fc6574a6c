// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Reading H-hat source files, parsing them with the Heather grammar, and
//! printing diagnostics.

mod api;
mod heather;
mod source_file;

pub use api::{
    inner_print_compiler_errors, parse_source_file, parse_source_string, print_compiler_errors,
    report_error,
};
pub use heather::HeatherParser;
pub use source_file::{ErrorTrait, SourceFile, SourceString, SourceTrait};
