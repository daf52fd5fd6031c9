use super::*;
use crate::console::Console;

/*
 * MemoryStack
 * RAM with the interrupt table stacked on top of it. The stack owns plain
 * data only, the console is lent for the duration of an access through a
 * Bus so that cloning a stack never shares any I/O state.
 */
#[derive(Debug, Clone)]
pub struct MemoryStack {
    ram: RAM,
    interrupts: InterruptTable,
}

impl MemoryStack {
    pub fn new_with_ram() -> Self {
        Self {
            ram: RAM::default(),
            interrupts: InterruptTable::ct64k(),
        }
    }

    pub fn with_interrupts(interrupts: InterruptTable) -> Self {
        Self {
            ram: RAM::default(),
            interrupts,
        }
    }

    /// Raw RAM access, interrupts are not triggered.
    pub fn peek(&self, addr: Word) -> Word {
        self.ram.peek(addr)
    }

    pub fn poke(&mut self, addr: Word, word: Word) {
        self.ram.poke(addr, word)
    }

    pub fn load(&mut self, location: Word, data: &[Word]) -> Result<(), MemoryError> {
        self.ram.load(location, data)
    }

    pub fn get_interrupts(&self) -> &InterruptTable {
        &self.interrupts
    }

    pub fn bus<'a>(&'a mut self, console: &'a mut dyn Console) -> Bus<'a> {
        Bus {
            memory: self,
            console,
        }
    }
}

impl Default for MemoryStack {
    fn default() -> Self {
        Self::new_with_ram()
    }
}

/// Interrupt aware view of a MemoryStack wired to a console.
pub struct Bus<'a> {
    memory: &'a mut MemoryStack,
    console: &'a mut dyn Console,
}

impl AddressableIO for Bus<'_> {
    fn read(&mut self, addr: Word) -> Result<Word, MemoryError> {
        match self.memory.interrupts.on_read(addr) {
            Some(interrupt) => interrupt.trigger_read(addr, self.console),
            None => Ok(self.memory.peek(addr)),
        }
    }

    fn write(&mut self, addr: Word, word: Word) -> Result<(), MemoryError> {
        match self.memory.interrupts.on_write(addr) {
            Some(interrupt) => interrupt.trigger_write(addr, word, self.console),
            None => {
                self.memory.poke(addr, word);
                Ok(())
            }
        }
    }
}
