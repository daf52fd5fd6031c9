use super::*;

/// # SB - Subtract
///
/// `M[rm] = M[rm] - M[mem]`
pub fn sb(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    combine(memory, cpu_instruction, Word::wrapping_sub)
}
