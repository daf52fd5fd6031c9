use super::*;

/// # LD - Store through the address held in rm
///
/// `M[M[rm]] = M[mem]`
pub fn ld(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    let value = memory.read(cpu_instruction.get_source())?;
    let target = memory.read(cpu_instruction.get_rm())?;

    store(memory, target, value)
}
