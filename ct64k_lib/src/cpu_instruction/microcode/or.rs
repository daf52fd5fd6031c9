use super::*;

/// # OR - Bitwise or
///
/// `M[rm] = M[rm] | M[mem]`
pub fn or(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    combine(memory, cpu_instruction, |a, b| a | b)
}
