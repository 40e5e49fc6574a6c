// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use hashbrown::HashMap;

use crate::data::WorkingData;
use crate::error::{HhatError, Result};
use crate::execution::{ClassicalValue, Evaluator};
use crate::ir::{IrArg, IrBlock, IrInstr};
use crate::memory::{Index, IndexLookup, QStack};

/// A resolved instruction operand, as handed to a backend.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// Register positions of the data's indices, `0..num_qubits`.
    Qubits(Vec<usize>),
    Value(ClassicalValue),
}

/// A target low-level quantum language. The backend only formats; operand
/// resolution and sequencing belong to the `LoweringSession`.
pub trait QLangBackend {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    fn init_qlang(&self, num_qubits: usize) -> Vec<String>;

    /// Translate one instruction. `operands` are in the order of the
    /// instruction's arguments.
    fn gen_instr(&self, name: &str, operands: &[Operand]) -> Result<Vec<String>>;

    fn end_qlang(&self, num_qubits: usize) -> Vec<String>;

    fn assemble(&self, fragments: &[String]) -> String {
        let mut program = fragments.join("\n");
        program.push('\n');
        program
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Initialized,
    InstructionsGenerated,
    ProgramAssembled,
    Terminated,
    /// Instruction generation failed; nothing else can be done.
    Failed,
}

/// One lowering of a quantum working data and its code to a backend program.
///
/// The indices of the working data, and of every data named in the code, are
/// read once when the session is created. Later changes in the index manager
/// do not affect the session. The register of the generated program holds
/// those indices, the working data's first.
pub struct LoweringSession<'a, B: QLangBackend> {
    backend: B,
    qdata: WorkingData,
    code: &'a IrBlock,
    evaluator: &'a dyn Evaluator,
    qstack: &'a mut dyn QStack,
    num_idxs: usize,
    snapshot: HashMap<WorkingData, Vec<Index>>,
    positions: HashMap<WorkingData, Vec<usize>>,
    num_qubits: usize,
    instrs: Vec<String>,
    state: SessionState,
}

impl<'a, B: QLangBackend> LoweringSession<'a, B> {
    pub fn new(
        backend: B,
        qdata: WorkingData,
        code: &'a IrBlock,
        idx: &dyn IndexLookup,
        evaluator: &'a dyn Evaluator,
        qstack: &'a mut dyn QStack,
    ) -> LoweringSession<'a, B> {
        let mut snapshot: HashMap<WorkingData, Vec<Index>> = HashMap::new();
        let mut positions: HashMap<WorkingData, Vec<usize>> = HashMap::new();
        let mut num_qubits = 0;
        let data = std::iter::once(&qdata).chain(code.referenced_data());
        for data in data {
            if snapshot.contains_key(data) {
                continue;
            }
            let indices = idx.in_use_by(data);
            let slots = (num_qubits..num_qubits + indices.len()).collect();
            num_qubits += indices.len();
            positions.insert(data.clone(), slots);
            snapshot.insert(data.clone(), indices);
        }
        let num_idxs = snapshot.get(&qdata).map_or(0, Vec::len);
        tracing::debug!(%qdata, num_idxs, num_qubits, backend = backend.name(), "session created");

        LoweringSession {
            backend,
            qdata,
            code,
            evaluator,
            qstack,
            num_idxs,
            snapshot,
            positions,
            num_qubits,
            instrs: Vec::new(),
            state: SessionState::Initialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn qdata(&self) -> &WorkingData {
        &self.qdata
    }

    /// Number of indices bound to the working data when the session was created.
    pub fn num_idxs(&self) -> usize {
        self.num_idxs
    }

    /// The indices of `data` as seen by this session.
    pub fn indices_of(&self, data: &WorkingData) -> &[Index] {
        self.snapshot.get(data).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The backend preamble. Has no effect on the session state.
    pub fn init_qlang(&self) -> Vec<String> {
        self.backend.init_qlang(self.num_qubits)
    }

    /// The backend epilogue. Has no effect on the session state.
    pub fn end_qlang(&self) -> Vec<String> {
        self.backend.end_qlang(self.num_qubits)
    }

    /// Translate the code block, in order. Either every instruction is
    /// translated, or nothing is kept, the data taken from the stack is put
    /// back, and the session is failed.
    pub fn gen_instrs(&mut self) -> Result<&[String]> {
        self.expect_state(SessionState::Initialized, "generate instructions for")?;
        let mut popped = Vec::new();
        match self.translate(&mut popped) {
            Ok(instrs) => {
                self.instrs = instrs;
                self.transition(SessionState::InstructionsGenerated);
                Ok(&self.instrs)
            }
            Err(err) => {
                for data in popped.into_iter().rev() {
                    self.qstack.push(data);
                }
                self.transition(SessionState::Failed);
                Err(err)
            }
        }
    }

    /// Assemble preamble, instructions and epilogue into the program text.
    /// Only valid once, right after `gen_instrs`. Ends the session.
    pub fn gen_program(&mut self) -> Result<String> {
        self.expect_state(SessionState::InstructionsGenerated, "assemble the program of")?;
        let mut fragments = self.init_qlang();
        fragments.extend(self.instrs.iter().cloned());
        fragments.extend(self.end_qlang());
        let program = self.backend.assemble(&fragments);
        self.transition(SessionState::ProgramAssembled);
        self.transition(SessionState::Terminated);
        Ok(program)
    }

    /// Run the whole lowering once: instructions, then the program.
    pub fn call(&mut self) -> Result<String> {
        self.expect_state(SessionState::Initialized, "run")?;
        self.gen_instrs()?;
        self.gen_program()
    }

    fn expect_state(&self, expected: SessionState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(HhatError::LoweringState {
                operation,
                state: self.state,
            })
        }
    }

    fn transition(&mut self, state: SessionState) {
        tracing::debug!(qdata = %self.qdata, from = ?self.state, to = ?state, "session state");
        self.state = state;
    }

    fn check_bound(&self, data: &WorkingData) -> Result<()> {
        if self.indices_of(data).is_empty() {
            return Err(HhatError::UnboundWorkingData {
                data: data.to_string(),
            });
        }
        Ok(())
    }

    fn translate(&mut self, popped: &mut Vec<WorkingData>) -> Result<Vec<String>> {
        self.check_bound(&self.qdata)?;
        for data in self.code.referenced_data() {
            self.check_bound(data)?;
        }

        let code = self.code;
        let mut instrs = Vec::new();
        for instr in code.instrs() {
            let operands = self.resolve_operands(instr, popped)?;
            let fragments = self.backend.gen_instr(instr.name(), &operands)?;
            for fragment in &fragments {
                tracing::trace!(instr = instr.name(), fragment = fragment.as_str(), "emitted");
            }
            instrs.extend(fragments);
        }
        Ok(instrs)
    }

    /// Instructions without a data operand apply to the session's working data.
    /// Data popped from the stack is recorded in `popped`, oldest first.
    fn resolve_operands(
        &mut self,
        instr: &IrInstr,
        popped: &mut Vec<WorkingData>,
    ) -> Result<Vec<Operand>> {
        let mut operands = Vec::with_capacity(instr.args().len() + 1);
        for arg in instr.args() {
            let operand = match arg {
                IrArg::Data(data) => self.qubits(data)?,
                IrArg::Classical(expr) => {
                    let value =
                        self.evaluator
                            .eval(expr)
                            .map_err(|message| HhatError::Evaluation {
                                expr: expr.to_string(),
                                message,
                            })?;
                    Operand::Value(value)
                }
                IrArg::Stacked => {
                    let data = self.qstack.pop().ok_or_else(|| HhatError::Evaluation {
                        expr: instr.name().to_string(),
                        message: "the lowering stack is empty".to_string(),
                    })?;
                    popped.push(data.clone());
                    self.qubits(&data)?
                }
            };
            operands.push(operand);
        }
        if !operands.iter().any(|op| matches!(op, Operand::Qubits(_))) {
            let qdata = self.qdata.clone();
            operands.push(self.qubits(&qdata)?);
        }
        Ok(operands)
    }

    /// Data that was not bound when the session was created has no place in
    /// the register.
    fn qubits(&self, data: &WorkingData) -> Result<Operand> {
        match self.positions.get(data) {
            Some(slots) if !slots.is_empty() => Ok(Operand::Qubits(slots.clone())),
            _ => Err(HhatError::UnboundWorkingData {
                data: data.to_string(),
            }),
        }
    }
}
