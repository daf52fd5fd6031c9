use super::*;

/// # ND - Bitwise and
///
/// `M[rm] = M[rm] & M[mem]`
pub fn nd(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    combine(memory, cpu_instruction, |a, b| a & b)
}
