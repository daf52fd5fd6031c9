use super::*;

/// # SR - Logical shift right
///
/// `M[rm] = M[rm] >> M[mem]`
pub fn sr(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    combine(memory, cpu_instruction, |a, b| a.checked_shr(b as u32).unwrap_or(0))
}
