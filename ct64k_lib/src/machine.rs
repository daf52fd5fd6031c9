use super::console::Console;
use super::cpu_instruction::microcode::Result;
use super::cpu_instruction::{CPUInstruction, LogLine, Outcome};
use super::memory::{
    AddressableIO, MemoryError, MemoryStack, Word, CODE_BASE_ADDR, INSTR_PTR_LOC, STACK_INIT_ADDR,
    STACK_PTR_LOC,
};
use super::processing_unit;
use log::{debug, trace};

/*
 * Machine
 * the whole state of one ct64k computer: its memory and the halt flag.
 * Cloning a machine gives a fully independent copy.
 */
#[derive(Debug, Clone, Default)]
pub struct Machine {
    memory: MemoryStack,
    halted: bool,
}

impl Machine {
    pub fn new(memory: MemoryStack) -> Self {
        Self {
            memory,
            halted: false,
        }
    }

    /// A fresh machine with `program` loaded at the code base.
    pub fn from_program(program: &[Word]) -> std::result::Result<Self, MemoryError> {
        let mut memory = MemoryStack::new_with_ram();
        memory.load(CODE_BASE_ADDR, program)?;
        memory.poke(STACK_PTR_LOC, STACK_INIT_ADDR);
        memory.poke(INSTR_PTR_LOC, CODE_BASE_ADDR);

        Ok(Self::new(memory))
    }

    pub fn instruction_pointer(&self) -> Word {
        self.memory.peek(INSTR_PTR_LOC)
    }

    pub fn stack_pointer(&self) -> Word {
        self.memory.peek(STACK_PTR_LOC)
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn memory(&self) -> &MemoryStack {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryStack {
        &mut self.memory
    }

    /// Read a word the way a program would, ports included.
    pub fn read(
        &mut self,
        addr: Word,
        console: &mut dyn Console,
    ) -> std::result::Result<Word, MemoryError> {
        self.memory.bus(console).read(addr)
    }

    pub fn decode_at(&self, addr: Word) -> Result<CPUInstruction> {
        processing_unit::decode_at(&self.memory, addr)
    }

    pub fn step(&mut self, console: &mut dyn Console) -> Result<LogLine> {
        let logline = processing_unit::execute_step(&mut self.memory, console)?;
        trace!("{}", logline);
        if logline.outcome == Outcome::Halt {
            debug!("machine halted at #0x{:04X}", logline.address);
            self.halted = true;
        }

        Ok(logline)
    }

    /// Step until the machine halts, returns the number of executed
    /// instructions.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<usize> {
        let mut count = 0;
        while !self.halted {
            self.step(console)?;
            count += 1;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::BufferConsole;

    #[test]
    fn test_from_program() {
        let machine = Machine::from_program(&[0x0010, 0x0005]).unwrap();
        assert_eq!(0x1000, machine.instruction_pointer());
        assert_eq!(0x0300, machine.stack_pointer());
        assert_eq!(0x0010, machine.memory().peek(0x1000));
        assert!(!machine.is_halted());
    }

    #[test]
    fn test_program_too_large() {
        let program = vec![0; 0xf001];
        assert!(matches!(
            Machine::from_program(&program),
            Err(MemoryError::WriteOverflow(_, 0x1000))
        ));
    }

    #[test]
    fn test_run_until_halt() {
        let mut machine =
            Machine::from_program(&[0x0010, 0x0005, 0xf000, 0x0000, 0x1002]).unwrap();
        let mut console = BufferConsole::default();
        assert_eq!(2, machine.run(&mut console).unwrap());
        assert!(machine.is_halted());
        assert_eq!(0x0005, machine.memory().peek(0x0010));
    }

    #[test]
    fn test_clone_is_independent() {
        let machine = Machine::from_program(&[0x0010, 0x0005, 0xf000, 0x0000, 0x1002]).unwrap();
        let mut live = machine.clone();
        let mut console = BufferConsole::default();
        live.run(&mut console).unwrap();
        assert!(!machine.is_halted());
        assert_eq!(0x0000, machine.memory().peek(0x0010));
        assert_eq!(0x1000, machine.instruction_pointer());
    }

    #[test]
    fn test_read_goes_through_ports() {
        let mut machine = Machine::default();
        let mut console = BufferConsole::new(b"k");
        assert_eq!(Ok(0x006b), machine.read(0x0201, &mut console));
        assert_eq!(
            Err(MemoryError::InvalidAccess(0x0200)),
            machine.read(0x0200, &mut console)
        );
    }
}
