use super::*;

/// # MV - Move
///
/// `M[rm] = M[mem]`
pub fn mv(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    let value = memory.read(cpu_instruction.get_source())?;

    store(memory, cpu_instruction.get_rm(), value)
}
