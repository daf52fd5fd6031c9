use super::*;

/// # MD - Move with double indirection
///
/// `M[rm] = M[M[mem]]`
pub fn md(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    let pointer = memory.read(cpu_instruction.get_source())?;
    let value = memory.read(pointer)?;

    store(memory, cpu_instruction.get_rm(), value)
}
