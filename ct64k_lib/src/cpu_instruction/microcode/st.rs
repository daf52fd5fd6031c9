use super::*;

/// # ST - Store through the address held in mem
///
/// `M[M[mem]] = M[rm]`
pub fn st(memory: &mut dyn AddressableIO, cpu_instruction: &CPUInstruction) -> Result<Outcome> {
    let value = memory.read(cpu_instruction.get_rm())?;
    let target = memory.read(cpu_instruction.get_source())?;

    store(memory, target, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;
    use crate::cpu_instruction::Opcode;

    #[test]
    fn test_st() {
        let cpu_instruction = CPUInstruction::new(0x1000, Opcode::St, 0x10, 0x11, 0);
        let (mut memory, mut console) = get_stuff(&[0x4010, 0x0011]);
        memory.poke(0x0010, 0x0042);
        memory.poke(0x0011, 0x0200);
        cpu_instruction
            .execute(&mut memory.bus(&mut console))
            .unwrap();
        assert_eq!("B", console.output_as_string());
        assert_eq!(0x0000, memory.peek(0x0200));
    }
}
