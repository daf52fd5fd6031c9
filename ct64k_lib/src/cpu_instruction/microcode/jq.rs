use super::*;

/// # JQ - Jump if equal
///
/// `if M[rm] == M[mem] then IP = label`
///
/// `JQ 0, 0, <own address>` is the halt-and-catch-fire instruction, it stops
/// the machine instead of looping forever and reads nothing.
pub fn jq(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    if cpu_instruction.is_halt() {
        return Ok(Outcome::Halt);
    }

    branch(memory, cpu_instruction, |a, b| a == b)
}
