// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! The H-hat compiler core.
//!
//! * `validate` and `function_resolver` map a dotted module path and a
//!   function name to the `.hat` file that defines it.
//! * `definitions` collects every definition of a function from that file,
//!   through any grammar implementing `hhat_ast::GrammarParser`.
//! * `memory`, `execution`, `ir` and `lowlevel` lower quantum working data
//!   to a low-level quantum language, such as OpenQASM 3.

pub mod data;
pub mod definitions;
pub mod error;
pub mod execution;
pub mod function_resolver;
pub mod ir;
pub mod lowlevel;
pub mod memory;
pub mod validate;

pub use data::{DataParadigm, WorkingData};
pub use definitions::{extract_definitions, find_definitions};
pub use error::{ErrorKind, HhatError, Result};
pub use function_resolver::{locate, project_root_from_env, ResolvedSource};
pub use ir::{IrArg, IrBlock, IrInstr};
pub use memory::{DataStack, Index, IndexError, IndexLookup, IndexManager, QStack};
