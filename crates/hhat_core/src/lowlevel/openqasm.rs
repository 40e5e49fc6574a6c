// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

// OpenQASM 3 as a lowering target. The register is `q`, measured into `c`.

use crate::error::{HhatError, Result};
use crate::execution::ClassicalValue;
use crate::lowlevel::{Operand, QLangBackend};

#[derive(Clone, Copy, Debug, Default)]
pub struct OpenQasm3;

/// H-hat instruction names and the single-qubit gates they map to.
const SINGLE_QUBIT_GATES: &[(&str, &str)] = &[
    ("@x", "x"),
    ("@not", "x"),
    ("@y", "y"),
    ("@z", "z"),
    ("@h", "h"),
    ("@redim", "h"),
    ("@s", "s"),
    ("@t", "t"),
    ("@reset", "reset"),
];

const ROTATIONS: &[(&str, &str)] = &[("@rx", "rx"), ("@ry", "ry"), ("@rz", "rz")];

fn lookup(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find_map(|&(hhat, qasm)| (hhat == name).then_some(qasm))
}

fn qubits(operands: &[Operand]) -> Vec<usize> {
    operands
        .iter()
        .filter_map(|op| match op {
            Operand::Qubits(slots) => Some(slots.iter().copied()),
            Operand::Value(_) => None,
        })
        .flatten()
        .collect()
}

impl OpenQasm3 {
    fn angle(name: &str, operands: &[Operand]) -> Result<f64> {
        let value = operands.iter().find_map(|op| match op {
            Operand::Value(value) => Some(*value),
            Operand::Qubits(_) => None,
        });
        match value.and_then(ClassicalValue::as_f64) {
            Some(angle) => Ok(angle),
            None => Err(HhatError::Evaluation {
                expr: name.to_string(),
                message: "a rotation needs a numeric angle".to_string(),
            }),
        }
    }
}

impl QLangBackend for OpenQasm3 {
    fn name(&self) -> &'static str {
        "OpenQASM 3"
    }

    fn init_qlang(&self, num_qubits: usize) -> Vec<String> {
        vec![
            "OPENQASM 3.0;".to_string(),
            "include \"stdgates.inc\";".to_string(),
            format!("qubit[{num_qubits}] q;"),
            format!("bit[{num_qubits}] c;"),
        ]
    }

    fn gen_instr(&self, name: &str, operands: &[Operand]) -> Result<Vec<String>> {
        let targets = qubits(operands);
        if let Some(gate) = lookup(SINGLE_QUBIT_GATES, name) {
            return Ok(targets.iter().map(|i| format!("{gate} q[{i}];")).collect());
        }
        if let Some(gate) = lookup(ROTATIONS, name) {
            let angle = OpenQasm3::angle(name, operands)?;
            return Ok(targets
                .iter()
                .map(|i| format!("{gate}({angle}) q[{i}];"))
                .collect());
        }
        match name {
            // Entangle the first qubit with each of the others.
            "@sync" | "@cnot" => Ok(match targets.split_first() {
                Some((control, rest)) => rest
                    .iter()
                    .map(|target| format!("cx q[{control}], q[{target}];"))
                    .collect(),
                None => Vec::new(),
            }),
            _ => Err(HhatError::UnknownInstruction {
                name: name.to_string(),
                backend: self.name(),
            }),
        }
    }

    fn end_qlang(&self, num_qubits: usize) -> Vec<String> {
        (0..num_qubits)
            .map(|i| format!("c[{i}] = measure q[{i}];"))
            .collect()
    }
}
