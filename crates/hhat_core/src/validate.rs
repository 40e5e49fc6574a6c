// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Naming rules for the components of module paths and for function names.
//!
//! A valid component matches `[A-Za-z_][A-Za-z0-9_-]*`, the same grammar the
//! lexer uses for classical identifiers. Directories below `src/` must not
//! start with [`RESERVED_PREFIX`], which is kept for the toolchain.

use crate::error::{HhatError, Result};

pub const RESERVED_PREFIX: &str = "hat_";

/// Where a path component appears. Only directories are subject to the
/// reserved prefix rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    FileStem,
    Directory,
}

/// Check one component of a module path.
pub fn validate(component: &str, kind: ComponentKind) -> Result<()> {
    check_ident("Path component", component)?;
    if kind == ComponentKind::Directory && component.starts_with(RESERVED_PREFIX) {
        return Err(HhatError::ReservedPrefix {
            component: component.to_string(),
            prefix: RESERVED_PREFIX,
        });
    }
    Ok(())
}

/// Check a function name against the naming rule. Keywords are identifiers
/// too, but no definition can carry one.
pub fn validate_function_name(name: &str) -> Result<()> {
    check_ident("Function name", name)?;
    if hhat_lexer::is_keyword(name) {
        return Err(HhatError::KeywordName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_ident(role: &'static str, name: &str) -> Result<()> {
    if hhat_lexer::is_ident(name) {
        Ok(())
    } else {
        Err(HhatError::InvalidIdentifier {
            role,
            name: name.to_string(),
        })
    }
}
