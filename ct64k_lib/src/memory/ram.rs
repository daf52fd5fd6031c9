use super::*;
use std::fmt;

/// Backing word array. Every instance owns its own buffer, cloning it
/// copies the whole address space.
#[derive(Clone, PartialEq, Eq)]
pub struct RAM {
    ram: Box<[Word]>,
}

impl Default for RAM {
    fn default() -> Self {
        Self {
            ram: vec![0x0000; MEMMAX + 1].into_boxed_slice(),
        }
    }
}

impl RAM {
    pub fn peek(&self, addr: Word) -> Word {
        self.ram[addr as usize]
    }

    pub fn poke(&mut self, addr: Word, word: Word) {
        self.ram[addr as usize] = word;
    }

    pub fn load(&mut self, location: Word, data: &[Word]) -> Result<(), MemoryError> {
        let start = location as usize;
        if start + data.len() > self.ram.len() {
            return Err(MemoryError::WriteOverflow(data.len(), location));
        }
        self.ram[start..start + data.len()].copy_from_slice(data);

        Ok(())
    }

    pub fn get_size(&self) -> usize {
        self.ram.len()
    }
}

impl AddressableIO for RAM {
    fn read(&mut self, addr: Word) -> Result<Word, MemoryError> {
        Ok(self.peek(addr))
    }

    fn write(&mut self, addr: Word, word: Word) -> Result<(), MemoryError> {
        self.poke(addr, word);

        Ok(())
    }
}

impl fmt::Debug for RAM {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let used = self.ram.iter().filter(|w| **w != 0).count();
        write!(f, "RAM {{ size: {} words, non zero: {} }}", self.ram.len(), used)
    }
}
