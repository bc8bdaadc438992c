use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::math;
use crate::operator::Operator;

/// Single memory register. Empty until something is saved
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    value: Option<String>,
}

impl Memory {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn save(&mut self, value: &str) {
        self.value = Some(value.to_owned());
    }

    pub fn recall(&self) -> CalcResult {
        self.value.clone().ok_or(CalcError::MemoryEmpty)
    }

    pub fn clear(&mut self) -> CalcErrorResult {
        match self.value.take() {
            Some(_) => Ok(()),
            None => Err(CalcError::MemoryEmpty),
        }
    }

    /// Value the register would hold after `memory <op> operand`. The
    /// register itself is not changed
    pub fn combine(&self, op: Operator, operand: &str) -> CalcResult {
        let value = self.recall()?;
        match op {
            Operator::Add => math::add(&value, operand),
            Operator::Sub => math::sub(&value, operand),
            Operator::Mul => math::mul(&value, operand),
            Operator::Div => math::div(&value, operand),
            _ => Err(CalcError::InvalidOperator(op.to_string())),
        }
    }
}
