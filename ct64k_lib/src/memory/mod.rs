mod error;
mod interrupts;
mod memory_stack;
mod ram;

pub use error::MemoryError;
pub use interrupts::{Interrupt, InterruptTable};
pub use memory_stack::{Bus, MemoryStack};
pub use ram::RAM;

/// The machine's only data unit. Addresses are words too.
pub type Word = u16;

pub const MEMMAX: usize = 0xFFFF;

pub const INSTR_PTR_LOC: Word = 0x0000;
pub const STACK_PTR_LOC: Word = 0x0001;
pub const BASE_PTR_LOC: Word = 0x0002;
pub const GENERAL_REGISTERS_ADDR: Word = 0x0010;
pub const SCRATCH_REGISTERS_ADDR: Word = 0x0040;
pub const SCRATCH_REGISTERS_END: Word = 0x0100;
pub const OUTPUT_PORT_ADDR: Word = 0x0200;
pub const INPUT_PORT_ADDR: Word = 0x0201;
pub const CODE_BASE_ADDR: Word = 0x1000;
pub const STACK_INIT_ADDR: Word = 0x0300;

/*
 * little_endian_words
 * reinterpret raw bytes as consecutive little endian words, a trailing odd
 * byte becomes the low byte of a last word.
 */
pub fn little_endian_words(bytes: &[u8]) -> Vec<Word> {
    bytes
        .chunks(2)
        .map(|chunk| {
            chunk
                .iter()
                .rev()
                .fold(0, |word: Word, byte| word << 8 | *byte as Word)
        })
        .collect()
}

/*
 * AddressableIO
 * this trait defines the interface for all word memory systems
 */
pub trait AddressableIO {
    fn read(&mut self, addr: Word) -> Result<Word, MemoryError>;
    fn write(&mut self, addr: Word, word: Word) -> Result<(), MemoryError>;
}
