mod cpu_instruction;
pub mod microcode;

pub use self::cpu_instruction::{
    CPUInstruction, InstructionFamily, LogLine, Opcode, Operands, Outcome, INSTRUCTION_MAX_LEN,
    RM_MASK,
};
