// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use expect_test::expect;
use hhat_ast::Node;
use hhat_core::execution::{ClassicalExpr, ClassicalValue, SimpleEvaluator};
use hhat_core::lowlevel::{LoweringSession, OpenQasm3, SessionState};
use hhat_core::{DataStack, ErrorKind, IndexManager, IrArg, IrBlock, IrInstr, QStack, WorkingData};
use hhat_source_file::HeatherParser;

fn gate(name: &str, data: &WorkingData) -> IrInstr {
    IrInstr::new(name, vec![IrArg::Data(data.clone())])
}

fn rotation(name: &str, angle: f64, data: &WorkingData) -> IrInstr {
    IrInstr::new(
        name,
        vec![
            IrArg::Classical(ClassicalValue::Float(angle).into()),
            IrArg::Data(data.clone()),
        ],
    )
}

#[test]
fn lowering_uses_indices_snapshotted_at_creation() {
    let manager = IndexManager::new(8);
    let q = WorkingData::new("@q");
    manager.request(&q, 2).unwrap();
    let code = IrBlock::new(vec![
        gate("@redim", &q),
        rotation("@rx", 0.5, &q),
        gate("@sync", &q),
    ]);
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    let mut session =
        LoweringSession::new(OpenQasm3, q.clone(), &code, &manager, &evaluator, &mut stack);

    // The manager changes after the snapshot.
    manager.free(&q);
    manager.request(&q, 3).unwrap();

    assert_eq!(session.num_idxs(), 2);
    let program = session.call().unwrap();
    expect![[r#"
        OPENQASM 3.0;
        include "stdgates.inc";
        qubit[2] q;
        bit[2] c;
        h q[0];
        h q[1];
        rx(0.5) q[0];
        rx(0.5) q[1];
        cx q[0], q[1];
        c[0] = measure q[0];
        c[1] = measure q[1];
    "#]]
    .assert_eq(&program);
    assert_eq!(session.state(), SessionState::Terminated);
}

#[test]
fn second_gen_program_is_a_state_error() {
    let manager = IndexManager::new(2);
    let q = WorkingData::new("@q");
    manager.request(&q, 1).unwrap();
    let code = IrBlock::new(vec![gate("@x", &q)]);
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    let mut session = LoweringSession::new(OpenQasm3, q, &code, &manager, &evaluator, &mut stack);

    assert_eq!(session.gen_instrs().unwrap(), ["x q[0];"]);
    let program = session.gen_program().unwrap();
    assert!(program.ends_with("c[0] = measure q[0];\n"));
    assert_eq!(session.state(), SessionState::Terminated);

    let err = session.gen_program().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LoweringStateError);
    let err = session.gen_instrs().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LoweringStateError);
}

#[test]
fn out_of_order_calls_are_state_errors() {
    let manager = IndexManager::new(2);
    let q = WorkingData::new("@q");
    manager.request(&q, 1).unwrap();
    let code = IrBlock::default();
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    let mut session = LoweringSession::new(OpenQasm3, q, &code, &manager, &evaluator, &mut stack);

    assert_eq!(
        session.gen_program().unwrap_err().kind(),
        ErrorKind::LoweringStateError
    );
    // Preamble and epilogue are pure.
    assert_eq!(session.init_qlang(), session.init_qlang());
    assert_eq!(session.end_qlang(), ["c[0] = measure q[0];"]);
    assert_eq!(session.state(), SessionState::Initialized);

    session.gen_instrs().unwrap();
    assert_eq!(session.call().unwrap_err().kind(), ErrorKind::LoweringStateError);
}

#[test]
fn unbound_data_fails_without_partial_emission() {
    let manager = IndexManager::new(4);
    let q = WorkingData::new("@q");
    let r = WorkingData::new("@r");
    manager.request(&q, 2).unwrap();
    let code = IrBlock::new(vec![gate("@h", &q), gate("@x", &r)]);
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    let mut session = LoweringSession::new(OpenQasm3, q, &code, &manager, &evaluator, &mut stack);

    let err = session.gen_instrs().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnboundWorkingData);
    assert!(err.to_string().contains("@r"));
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(
        session.gen_program().unwrap_err().kind(),
        ErrorKind::LoweringStateError
    );
}

#[test]
fn unbound_session_data() {
    let manager = IndexManager::new(4);
    let q = WorkingData::new("@q");
    let code = IrBlock::new(vec![gate("@h", &q)]);
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    let mut session = LoweringSession::new(OpenQasm3, q, &code, &manager, &evaluator, &mut stack);
    assert_eq!(
        session.call().unwrap_err().kind(),
        ErrorKind::UnboundWorkingData
    );
}

#[test]
fn unknown_instruction() {
    let manager = IndexManager::new(1);
    let q = WorkingData::new("@q");
    manager.request(&q, 1).unwrap();
    let code = IrBlock::new(vec![gate("@h", &q), gate("@teleport", &q)]);
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    let mut session = LoweringSession::new(OpenQasm3, q, &code, &manager, &evaluator, &mut stack);
    let err = session.gen_instrs().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownInstruction);
    assert!(err.to_string().contains("@teleport"));
    assert_eq!(session.state(), SessionState::Failed);
}

#[test]
fn classical_operands_go_through_the_evaluator() {
    let manager = IndexManager::new(1);
    let q = WorkingData::new("@q");
    manager.request(&q, 1).unwrap();
    let code = IrBlock::new(vec![
        IrInstr::new("@rz", vec![IrArg::Classical(ClassicalExpr::name("half"))]),
        IrInstr::new("@ry", vec![IrArg::Classical(ClassicalExpr::name("missing"))]),
    ]);
    let evaluator = SimpleEvaluator::new().with_constant("half", ClassicalValue::Float(0.5));
    let mut stack = DataStack::new();
    let mut session = LoweringSession::new(OpenQasm3, q, &code, &manager, &evaluator, &mut stack);
    let err = session.gen_instrs().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
    assert!(err.to_string().contains("missing"));
}

#[test]
fn stacked_operands_are_popped() {
    let manager = IndexManager::new(3);
    let q = WorkingData::new("@q");
    let r = WorkingData::new("@r");
    manager.request(&q, 1).unwrap();
    manager.request(&r, 2).unwrap();
    let code = IrBlock::new(vec![
        gate("@z", &r),
        IrInstr::new("@t", vec![IrArg::Stacked]),
        IrInstr::new("@s", vec![IrArg::Stacked]),
    ]);
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    stack.push(q.clone());
    stack.push(r.clone());
    let mut session = LoweringSession::new(OpenQasm3, q, &code, &manager, &evaluator, &mut stack);
    assert_eq!(session.num_qubits(), 3);
    assert_eq!(
        session.gen_instrs().unwrap(),
        ["z q[1];", "z q[2];", "t q[1];", "t q[2];", "s q[0];"]
    );
    drop(session);
    assert!(stack.is_empty());
}

#[test]
fn empty_stack_is_an_error() {
    let manager = IndexManager::new(1);
    let q = WorkingData::new("@q");
    manager.request(&q, 1).unwrap();
    let code = IrBlock::new(vec![IrInstr::new("@x", vec![IrArg::Stacked])]);
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    let mut session = LoweringSession::new(OpenQasm3, q, &code, &manager, &evaluator, &mut stack);
    assert_eq!(
        session.gen_instrs().unwrap_err().kind(),
        ErrorKind::Evaluation
    );
}

#[test]
fn failed_generation_restores_the_stack() {
    let manager = IndexManager::new(3);
    let q = WorkingData::new("@q");
    let r = WorkingData::new("@r");
    manager.request(&q, 1).unwrap();
    manager.request(&r, 1).unwrap();
    let code = IrBlock::new(vec![
        IrInstr::new("@x", vec![IrArg::Stacked]),
        IrInstr::new("@y", vec![IrArg::Stacked]),
        gate("@teleport", &q),
    ]);
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    stack.push(q.clone());
    stack.push(r.clone());
    stack.push(q.clone());
    let mut session =
        LoweringSession::new(OpenQasm3, q.clone(), &code, &manager, &evaluator, &mut stack);
    assert_eq!(
        session.gen_instrs().unwrap_err().kind(),
        ErrorKind::UnknownInstruction
    );
    assert_eq!(session.state(), SessionState::Failed);
    drop(session);

    assert_eq!(stack.len(), 3);
    assert_eq!(stack.pop(), Some(q.clone()));
    assert_eq!(stack.pop(), Some(r));
    assert_eq!(stack.pop(), Some(q));
}

#[test]
fn unbound_stacked_data_restores_the_stack() {
    let manager = IndexManager::new(2);
    let q = WorkingData::new("@q");
    manager.request(&q, 1).unwrap();
    let code = IrBlock::new(vec![IrInstr::new("@h", vec![IrArg::Stacked])]);
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    stack.push(WorkingData::new("@ghost"));
    let mut session = LoweringSession::new(OpenQasm3, q, &code, &manager, &evaluator, &mut stack);
    assert_eq!(
        session.gen_instrs().unwrap_err().kind(),
        ErrorKind::UnboundWorkingData
    );
    drop(session);
    assert_eq!(stack.pop(), Some(WorkingData::new("@ghost")));
}

#[test]
fn lower_main_body_of_a_source() {
    let source = "main { @redim(@q) @rx(pi @q) @cnot(@q @r) @reset(@r) }";
    let node = HeatherParser::new()
        .parse_source(source, Path::new("bell.hat"))
        .unwrap();
    let Node::Program(program) = node else {
        panic!("expected a program");
    };
    let code = IrBlock::from_body(program.main().unwrap().body()).unwrap();
    assert_eq!(code.len(), 4);

    let manager = IndexManager::new(4);
    let q = WorkingData::new("@q");
    let r = WorkingData::new("@r");
    manager.request(&q, 1).unwrap();
    manager.request(&r, 1).unwrap();
    let evaluator = SimpleEvaluator::new();
    let mut stack = DataStack::new();
    let mut session = LoweringSession::new(OpenQasm3, q, &code, &manager, &evaluator, &mut stack);
    let program = session.call().unwrap();
    expect![[r#"
        OPENQASM 3.0;
        include "stdgates.inc";
        qubit[2] q;
        bit[2] c;
        h q[0];
        rx(3.141592653589793) q[0];
        cx q[0], q[1];
        reset q[1];
        c[0] = measure q[0];
        c[1] = measure q[1];
    "#]]
    .assert_eq(&program);
}
