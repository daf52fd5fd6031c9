use super::*;

/// # AD - Add
///
/// `M[rm] = M[rm] + M[mem]`
pub fn ad(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    combine(memory, cpu_instruction, Word::wrapping_add)
}
