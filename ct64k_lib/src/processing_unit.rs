use super::console::Console;
use super::cpu_instruction::microcode::Result;
use super::cpu_instruction::{CPUInstruction, LogLine, INSTRUCTION_MAX_LEN};
use super::memory::{AddressableIO, MemoryStack, Word, INSTR_PTR_LOC};

/// Decode the instruction at `address` from raw memory, ports are not
/// triggered. Operand words wrap around the end of memory.
pub fn decode_at(memory: &MemoryStack, address: Word) -> Result<CPUInstruction> {
    let mut words = [0; INSTRUCTION_MAX_LEN];
    for (offset, word) in words.iter_mut().enumerate() {
        *word = memory.peek(address.wrapping_add(offset as Word));
    }

    CPUInstruction::decode(address, words)
}

/*
 * execute_step
 * decode the instruction pointed by IP, advance IP past it then run its
 * microcode. A failing instruction leaves IP pointing at itself.
 */
pub fn execute_step(memory: &mut MemoryStack, console: &mut dyn Console) -> Result<LogLine> {
    let address = memory.peek(INSTR_PTR_LOC);
    let cpu_instruction = decode_at(memory, address)?;
    let result = {
        let mut bus = memory.bus(console);
        bus.write(INSTR_PTR_LOC, cpu_instruction.next_address())
            .map_err(From::from)
            .and_then(|_| cpu_instruction.execute(&mut bus))
    };

    match result {
        Ok(outcome) => Ok(LogLine::new(cpu_instruction, outcome)),
        Err(e) => {
            memory.poke(INSTR_PTR_LOC, address);
            Err(e)
        }
    }
}

/// Decode `count` consecutive instructions starting at `start`.
pub fn disassemble(start: Word, count: usize, memory: &MemoryStack) -> Result<Vec<CPUInstruction>> {
    let mut output: Vec<CPUInstruction> = Vec::with_capacity(count);
    let mut address = start;
    for _ in 0..count {
        let cpu_instruction = decode_at(memory, address)?;
        address = cpu_instruction.next_address();
        output.push(cpu_instruction);
    }

    Ok(output)
}
