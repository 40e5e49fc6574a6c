// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Map a dotted module path and a function name to the `.hat` file that
//! should define the function.
//!
//! A project has an optional `main.hat` at its root and a `src/` directory
//! mirroring module paths: `maths.linalg` lives in `src/maths/linalg.hat`.
//! Resolution only inspects the filesystem; nothing is read or cached.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{HhatError, Result};
use crate::validate::{validate, validate_function_name, ComponentKind};

pub const SOURCE_DIR: &str = "src";
pub const SOURCE_EXTENSION: &str = "hat";
pub const MAIN_MODULE: &str = "main";

/// Environment variable naming the project root.
pub const PROJECT_ROOT_ENV: &str = "HHAT_PROJECT_ROOT";

/// A located source file and the function to look for in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSource {
    file_path: PathBuf,
    function_name: String,
}

impl ResolvedSource {
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn into_parts(self) -> (PathBuf, String) {
        (self.file_path, self.function_name)
    }
}

/// Read the environment variable `HHAT_PROJECT_ROOT`.
pub fn project_root_from_env() -> Option<PathBuf> {
    env::var_os(PROJECT_ROOT_ENV).map(PathBuf::from)
}

/// Locate the source file of `function_name` in the module `module_path`.
///
/// 1) Both inputs must be non-empty, and `function_name` must be an identifier.
/// 2) The module path `main` names `<root>/main.hat`.
/// 3) Otherwise the last component is the file stem and the others are
///    directories below `<root>/src`. The stem is checked first, then the
///    directories in order; the first invalid component is reported.
/// 4) The candidate must be an existing regular file.
///
/// A relative `project_root` is taken from the current directory, so the
/// resolved path is always absolute.
pub fn locate<P: AsRef<Path>>(
    module_path: &str,
    function_name: &str,
    project_root: P,
) -> Result<ResolvedSource> {
    if module_path.is_empty() {
        return Err(HhatError::EmptyInput {
            what: "Module path",
        });
    }
    if function_name.is_empty() {
        return Err(HhatError::EmptyInput {
            what: "Function name",
        });
    }
    validate_function_name(function_name)?;

    let project_root = project_root.as_ref();
    let project_root =
        std::path::absolute(project_root).map_err(|source| HhatError::ProjectRoot {
            path: project_root.to_path_buf(),
            source,
        })?;
    let target_file = if module_path == MAIN_MODULE {
        project_root.join(format!("{MAIN_MODULE}.{SOURCE_EXTENSION}"))
    } else {
        module_file(module_path, &project_root)?
    };
    tracing::debug!(module_path, function_name, candidate = %target_file.display(), "resolving");

    if !target_file.is_file() {
        return Err(HhatError::SourceNotFound {
            module: module_path.to_string(),
            path: target_file,
        });
    }
    Ok(ResolvedSource {
        file_path: target_file,
        function_name: function_name.to_string(),
    })
}

fn module_file(module_path: &str, project_root: &Path) -> Result<PathBuf> {
    let components: Vec<&str> = module_path.split('.').collect();
    let (file_stem, directories) = match components.split_last() {
        Some(split) => split,
        None => {
            return Err(HhatError::EmptyInput {
                what: "Module path",
            })
        }
    };

    validate(file_stem, ComponentKind::FileStem)?;
    let mut target_file = project_root.join(SOURCE_DIR);
    for directory in directories {
        validate(directory, ComponentKind::Directory)?;
        target_file.push(directory);
    }
    target_file.push(format!("{file_stem}.{SOURCE_EXTENSION}"));
    Ok(target_file)
}
