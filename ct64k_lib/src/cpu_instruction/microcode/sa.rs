use super::*;

/// # SA - Arithmetic shift right
///
/// `M[rm] = M[rm] >> M[mem]` with the sign bit of `M[rm]` shifted in.
pub fn sa(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    combine(memory, cpu_instruction, |a, b| {
        let signed = a as i16;
        // the sign fills the word past 15 bits
        let shifted = signed.checked_shr(b as u32).unwrap_or(signed >> 15);

        shifted as Word
    })
}
