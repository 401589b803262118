//! In-memory trace retention.
//!
//! Holds the entire trace, so it is only meant for small traces or
//! interactive inspection.

use super::Analysis;
use crate::parser::schema::{Instruction, MicroOp};

#[derive(Debug, Clone, Default)]
pub struct TraceBuilder {
    instructions: Vec<Instruction>,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

impl Analysis for TraceBuilder {
    type Results = Vec<Instruction>;

    fn on_instruction(&mut self, instr: &Instruction) {
        let mut owned = instr.clone();
        owned.micro_ops.clear();
        self.instructions.push(owned);
    }

    fn on_micro_op(&mut self, _instr: &Instruction, op: &MicroOp) {
        if let Some(last) = self.instructions.last_mut() {
            last.add_micro_op(op.clone());
        }
    }

    fn results(&self) -> &Vec<Instruction> {
        &self.instructions
    }
}
