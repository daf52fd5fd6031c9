extern crate log;

pub mod console;
mod cpu_instruction;
mod machine;
pub mod memory;
mod processing_unit;

pub use console::{BufferConsole, Console, StdConsole};
pub use cpu_instruction::microcode::{MicrocodeError, Result as MicrocodeResult};
pub use cpu_instruction::{
    CPUInstruction, InstructionFamily, LogLine, Opcode, Operands, Outcome, INSTRUCTION_MAX_LEN,
};
pub use machine::Machine;
pub use memory::{AddressableIO, MemoryError, MemoryStack as Memory, Word};
pub use processing_unit::*;
