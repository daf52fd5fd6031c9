use super::*;

/// # JL - Jump if lower
///
/// `if M[rm] < M[mem] then IP = label`
pub fn jl(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    branch(memory, cpu_instruction, |a, b| a < b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;
    use crate::cpu_instruction::Opcode;

    fn run_jl(left: Word, right: Word) -> (Outcome, Word) {
        let cpu_instruction = CPUInstruction::new(0x1000, Opcode::Jl, 0x10, 0x11, 0x2000);
        let (mut memory, mut console) = get_stuff(&cpu_instruction.encode());
        memory.poke(0x0000, 0x1003);
        memory.poke(0x0010, left);
        memory.poke(0x0011, right);
        let outcome = cpu_instruction
            .execute(&mut memory.bus(&mut console))
            .unwrap();

        (outcome, memory.peek(0x0000))
    }

    #[test]
    fn test_jl_branch() {
        assert_eq!((Outcome::Jump(0x2000), 0x2000), run_jl(0x0001, 0xffff));
    }

    #[test]
    fn test_jl_no_branch() {
        assert_eq!((Outcome::NoJump, 0x1003), run_jl(0x0002, 0x0002));
        assert_eq!((Outcome::NoJump, 0x1003), run_jl(0x0003, 0x0002));
    }
}
