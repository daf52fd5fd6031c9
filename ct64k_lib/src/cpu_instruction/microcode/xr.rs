use super::*;

/// # XR - Bitwise exclusive or
///
/// `M[rm] = M[rm] ^ M[mem]`
pub fn xr(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    combine(memory, cpu_instruction, |a, b| a ^ b)
}
