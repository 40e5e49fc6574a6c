// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

// Evaluation of the classical sub-expressions found in quantum instructions,
// such as rotation angles.

use std::fmt;

use hashbrown::HashMap;
use hhat_ast::{Literal, LiteralKind};
use smol_str::SmolStr;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClassicalValue {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ClassicalValue {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            ClassicalValue::Int(value) => Some(value as f64),
            ClassicalValue::Float(value) => Some(value),
            ClassicalValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for ClassicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassicalValue::Int(value) => write!(f, "{value}"),
            ClassicalValue::Float(value) => write!(f, "{value}"),
            ClassicalValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassicalExpr {
    Value(ClassicalValue),
    /// A named constant, resolved by the evaluator.
    Name(SmolStr),
    Neg(Box<ClassicalExpr>),
}

impl ClassicalExpr {
    pub fn name<T: AsRef<str>>(name: T) -> ClassicalExpr {
        ClassicalExpr::Name(SmolStr::new(name))
    }
}

impl From<ClassicalValue> for ClassicalExpr {
    fn from(value: ClassicalValue) -> ClassicalExpr {
        ClassicalExpr::Value(value)
    }
}

impl TryFrom<&Literal> for ClassicalExpr {
    type Error = String;

    /// Numbers and booleans. Integer prefixes `0b`, `0o` and `0x` are honored.
    fn try_from(literal: &Literal) -> Result<ClassicalExpr, String> {
        let text = literal.text();
        let value = match literal.kind() {
            LiteralKind::Int => ClassicalValue::Int(parse_int(text)?),
            LiteralKind::Float => ClassicalValue::Float(
                text.replace('_', "")
                    .parse::<f64>()
                    .map_err(|err| format!("invalid float literal `{text}`: {err}"))?,
            ),
            LiteralKind::Bool => ClassicalValue::Bool(text == "true"),
            LiteralKind::Str => return Err(format!("string literal {text} is not a number")),
        };
        Ok(ClassicalExpr::Value(value))
    }
}

fn parse_int(text: &str) -> Result<i64, String> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits = digits.replace('_', "");
    let (radix, digits) = match digits.get(..2) {
        Some("0b") => (2, &digits[2..]),
        Some("0o") => (8, &digits[2..]),
        Some("0x") => (16, &digits[2..]),
        _ => (10, digits.as_str()),
    };
    let value = i64::from_str_radix(digits, radix)
        .map_err(|err| format!("invalid integer literal `{text}`: {err}"))?;
    Ok(if negative { -value } else { value })
}

impl fmt::Display for ClassicalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassicalExpr::Value(value) => write!(f, "{value}"),
            ClassicalExpr::Name(name) => f.write_str(name),
            ClassicalExpr::Neg(expr) => write!(f, "-{expr}"),
        }
    }
}

/// Evaluates classical sub-expressions for the lowering session.
pub trait Evaluator {
    fn eval(&self, expr: &ClassicalExpr) -> Result<ClassicalValue, String>;
}

/// Resolves values, negation and a table of named constants. `pi` and `tau`
/// are predefined.
#[derive(Clone, Debug)]
pub struct SimpleEvaluator {
    constants: HashMap<SmolStr, ClassicalValue>,
}

impl Default for SimpleEvaluator {
    fn default() -> Self {
        SimpleEvaluator::new()
    }
}

impl SimpleEvaluator {
    pub fn new() -> SimpleEvaluator {
        let mut constants = HashMap::new();
        constants.insert(
            SmolStr::new("pi"),
            ClassicalValue::Float(std::f64::consts::PI),
        );
        constants.insert(
            SmolStr::new("tau"),
            ClassicalValue::Float(std::f64::consts::TAU),
        );
        SimpleEvaluator { constants }
    }

    pub fn with_constant<T: AsRef<str>>(mut self, name: T, value: ClassicalValue) -> Self {
        self.constants.insert(SmolStr::new(name), value);
        self
    }
}

impl Evaluator for SimpleEvaluator {
    fn eval(&self, expr: &ClassicalExpr) -> Result<ClassicalValue, String> {
        match expr {
            ClassicalExpr::Value(value) => Ok(*value),
            ClassicalExpr::Name(name) => self
                .constants
                .get(name)
                .copied()
                .ok_or_else(|| format!("unknown constant `{name}`")),
            ClassicalExpr::Neg(inner) => match self.eval(inner)? {
                ClassicalValue::Int(value) => Ok(ClassicalValue::Int(-value)),
                ClassicalValue::Float(value) => Ok(ClassicalValue::Float(-value)),
                ClassicalValue::Bool(_) => Err(format!("cannot negate boolean `{inner}`")),
            },
        }
    }
}
