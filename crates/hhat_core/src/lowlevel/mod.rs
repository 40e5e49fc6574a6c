// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Lowering of quantum working data to a low-level quantum language.

mod abstract_qlang;
mod openqasm;

pub use abstract_qlang::{LoweringSession, Operand, QLangBackend, SessionState};
pub use openqasm::OpenQasm3;
