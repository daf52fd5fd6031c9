use super::*;

/// # SL - Shift left
///
/// `M[rm] = M[rm] << M[mem]`
pub fn sl(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    combine(memory, cpu_instruction, |a, b| a.checked_shl(b as u32).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;
    use crate::cpu_instruction::Opcode;

    fn run_sl(left: Word, right: Word) -> Word {
        let cpu_instruction = CPUInstruction::new(0x1000, Opcode::Sl, 0x10, 0x11, 0);
        let (mut memory, mut console) = get_stuff(&cpu_instruction.encode());
        memory.poke(0x0010, left);
        memory.poke(0x0011, right);
        cpu_instruction
            .execute(&mut memory.bus(&mut console))
            .unwrap();
        assert_eq!(right, memory.peek(0x0011));

        memory.peek(0x0010)
    }

    #[test]
    fn test_sl() {
        assert_eq!(0x0002, run_sl(0x0001, 0x0001));
        assert_eq!(0x8000, run_sl(0x0001, 0x000f));
        assert_eq!(0xf000, run_sl(0xff00, 0x0004));
    }

    #[test]
    fn test_sl_too_far() {
        assert_eq!(0x0000, run_sl(0x0001, 0x0010));
    }
}
