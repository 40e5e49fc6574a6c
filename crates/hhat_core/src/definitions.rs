// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

// Retrieval of all function definitions with a given name from a source file.
// Overload resolution happens elsewhere; here every candidate is returned.

use std::path::Path;

use hhat_ast::{FnDef, GrammarParser, Node, NodeRef};

use crate::error::{HhatError, Result};
use crate::function_resolver::{locate, ResolvedSource};

/// Parse `file_path` with `parser` and return, in source order, every function
/// definition named `function_name`, wherever it occurs in the tree.
pub fn extract_definitions<G: GrammarParser + ?Sized>(
    parser: &G,
    file_path: &Path,
    function_name: &str,
) -> Result<Vec<FnDef>> {
    let program = match parser.parse_file(file_path)? {
        Node::Program(program) => program,
        other => {
            return Err(HhatError::NotAProgram {
                path: file_path.to_path_buf(),
                found: other.kind_name(),
            })
        }
    };

    let found: Vec<FnDef> = program
        .preorder()
        .filter_map(|node| match node {
            NodeRef::FnDef(fn_def) if fn_def.name().name() == function_name => {
                Some(fn_def.clone())
            }
            _ => None,
        })
        .collect();
    tracing::debug!(
        path = %file_path.display(),
        function_name,
        found = found.len(),
        "extracted definitions"
    );

    if found.is_empty() {
        return Err(HhatError::DefinitionNotFound {
            name: function_name.to_string(),
            path: file_path.to_path_buf(),
        });
    }
    Ok(found)
}

/// `locate` followed by `extract_definitions`.
pub fn find_definitions<G: GrammarParser + ?Sized, P: AsRef<Path>>(
    parser: &G,
    module_path: &str,
    function_name: &str,
    project_root: P,
) -> Result<(ResolvedSource, Vec<FnDef>)> {
    let source = locate(module_path, function_name, project_root)?;
    let defs = extract_definitions(parser, source.file_path(), source.function_name())?;
    Ok((source, defs))
}
