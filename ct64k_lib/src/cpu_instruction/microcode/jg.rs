use super::*;

/// # JG - Jump if greater
///
/// `if M[rm] > M[mem] then IP = label`
pub fn jg(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    branch(memory, cpu_instruction, |a, b| a > b)
}
