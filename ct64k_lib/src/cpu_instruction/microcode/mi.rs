use super::*;

/// # MI - Move immediate
///
/// `M[rm] = imm`
pub fn mi(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    store(memory, cpu_instruction.get_rm(), cpu_instruction.get_source())
}
