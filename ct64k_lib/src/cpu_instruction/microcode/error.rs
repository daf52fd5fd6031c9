use crate::memory::{MemoryError, Word};
use std::error;
use std::fmt;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum MicrocodeError {
    InvalidOpcode(u8),
    // ↓ a jump microcode was handed an instruction without label
    OperandMismatch(Word),
    Memory(MemoryError),
}

pub type Result<T> = std::result::Result<T, MicrocodeError>;

impl fmt::Display for MicrocodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MicrocodeError::InvalidOpcode(opcode) => write!(f, "invalid opcode 0x{:x}", opcode),
            MicrocodeError::OperandMismatch(addr) => {
                write!(f, "operands do not match the opcode at #0x{:04X}", addr)
            }
            MicrocodeError::Memory(e) => write!(f, "{}", e),
        }
    }
}

impl error::Error for MicrocodeError {}

impl std::convert::From<MemoryError> for MicrocodeError {
    fn from(err: MemoryError) -> MicrocodeError {
        MicrocodeError::Memory(err)
    }
}
