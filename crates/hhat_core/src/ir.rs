// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! A flat intermediate code for quantum instructions.
//!
//! An `IrBlock` is the ordered list of instructions applied to some working
//! data. Operands name data directly, carry a classical expression, or take
//! the top of the lowering stack.

use hhat_ast::{Body, Expr};
use smol_str::SmolStr;

use crate::data::WorkingData;
use crate::error::{HhatError, Result};
use crate::execution::ClassicalExpr;

#[derive(Clone, Debug, PartialEq)]
pub enum IrArg {
    Data(WorkingData),
    Classical(ClassicalExpr),
    /// Pop the operand from the stack when the instruction is lowered.
    Stacked,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IrInstr {
    name: SmolStr,
    args: Vec<IrArg>,
}

impl IrInstr {
    pub fn new<T: AsRef<str>>(name: T, args: Vec<IrArg>) -> IrInstr {
        IrInstr {
            name: SmolStr::new(name),
            args,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn args(&self) -> &[IrArg] {
        &self.args
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IrBlock {
    instrs: Vec<IrInstr>,
}

impl IrBlock {
    pub fn new(instrs: Vec<IrInstr>) -> IrBlock {
        IrBlock { instrs }
    }

    pub fn push(&mut self, instr: IrInstr) {
        self.instrs.push(instr);
    }

    pub fn instrs(&self) -> &[IrInstr] {
        &self.instrs
    }

    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    /// The data named directly by operands, first occurrence first.
    pub fn referenced_data(&self) -> Vec<&WorkingData> {
        let mut seen: Vec<&WorkingData> = Vec::new();
        for arg in self.instrs.iter().flat_map(|instr| instr.args.iter()) {
            if let IrArg::Data(data) = arg {
                if !seen.contains(&data) {
                    seen.push(data);
                }
            }
        }
        seen
    }

    /// Translate a body made of flat calls, such as `@h(@q) @rx(0.5 @q)`.
    /// Quantum names become data operands; other names and literals become
    /// classical expressions. Nested calls and bare values are rejected.
    pub fn from_body(body: &Body) -> Result<IrBlock> {
        let mut block = IrBlock::default();
        for expr in body.exprs() {
            let Expr::Call(call) = expr else {
                return Err(not_lowerable(expr, "only calls can be lowered"));
            };
            let args = call
                .args()
                .iter()
                .map(arg_from_expr)
                .collect::<Result<Vec<_>>>()?;
            block.push(IrInstr::new(call.caller().text(), args));
        }
        Ok(block)
    }
}

fn arg_from_expr(expr: &Expr) -> Result<IrArg> {
    match expr {
        Expr::Id(id) if id.is_quantum() => Ok(IrArg::Data(WorkingData::from(id))),
        Expr::Id(id) => Ok(IrArg::Classical(ClassicalExpr::name(id.name()))),
        Expr::Literal(literal) => ClassicalExpr::try_from(literal)
            .map(IrArg::Classical)
            .map_err(|message| HhatError::Evaluation {
                expr: literal.text().to_string(),
                message,
            }),
        other => Err(not_lowerable(other, "not a valid instruction operand")),
    }
}

fn not_lowerable(expr: &Expr, message: &str) -> HhatError {
    HhatError::Evaluation {
        expr: format!("{expr:?}"),
        message: message.to_string(),
    }
}
