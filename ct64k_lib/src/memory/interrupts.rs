use super::*;
use crate::console::Console;
use std::collections::BTreeMap;

/// What happens when a memory access hits a port.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Interrupt {
    Putchar,
    Getchar,
    InvalidAccess,
    Unimplemented(&'static str),
}

impl Interrupt {
    pub fn trigger_read(self, addr: Word, console: &mut dyn Console) -> Result<Word, MemoryError> {
        match self {
            Interrupt::Getchar => console
                .getchar()
                .map_err(|e| MemoryError::Io(addr, e.kind()))?
                .map(Word::from)
                .ok_or(MemoryError::EndOfInput(addr)),
            Interrupt::Unimplemented(name) => Err(MemoryError::UnimplementedInterrupt(addr, name)),
            Interrupt::Putchar | Interrupt::InvalidAccess => Err(MemoryError::InvalidAccess(addr)),
        }
    }

    pub fn trigger_write(
        self,
        addr: Word,
        word: Word,
        console: &mut dyn Console,
    ) -> Result<(), MemoryError> {
        match self {
            Interrupt::Putchar => console
                .putchar((word & 0xff) as u8)
                .map_err(|e| MemoryError::Io(addr, e.kind())),
            Interrupt::Unimplemented(name) => Err(MemoryError::UnimplementedInterrupt(addr, name)),
            Interrupt::Getchar | Interrupt::InvalidAccess => Err(MemoryError::InvalidAccess(addr)),
        }
    }
}

/*
 * InterruptTable
 * address → interrupt, one map per access direction. Addresses absent from
 * a map fall through to the RAM.
 */
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InterruptTable {
    read: BTreeMap<Word, Interrupt>,
    write: BTreeMap<Word, Interrupt>,
}

impl InterruptTable {
    /// The ports of the ct64k machine.
    pub fn ct64k() -> Self {
        use Interrupt::*;

        let mut table = Self::default();
        let ports: [(Word, Interrupt, Interrupt); 11] = [
            (OUTPUT_PORT_ADDR, InvalidAccess, Putchar),
            (INPUT_PORT_ADDR, Getchar, InvalidAccess),
            (0x0202, InvalidAccess, Unimplemented("gen key write")),
            (0x0203, Unimplemented("gen key read"), InvalidAccess),
            (0x0204, InvalidAccess, Unimplemented("load key write")),
            (0x0205, Unimplemented("load key read"), InvalidAccess),
            (0x0206, InvalidAccess, Unimplemented("mul write")),
            (0x0207, Unimplemented("mul read"), InvalidAccess),
            (0x0208, Unimplemented("rng"), InvalidAccess),
            (0x0209, InvalidAccess, Unimplemented("set timeout")),
            (0x020A, Unimplemented("timeout addr"), Unimplemented("timeout addr")),
        ];
        for (addr, on_read, on_write) in ports {
            table.register_read(addr, on_read);
            table.register_write(addr, on_write);
        }

        table
    }

    pub fn register_read(&mut self, addr: Word, interrupt: Interrupt) {
        self.read.insert(addr, interrupt);
    }

    pub fn register_write(&mut self, addr: Word, interrupt: Interrupt) {
        self.write.insert(addr, interrupt);
    }

    pub fn on_read(&self, addr: Word) -> Option<Interrupt> {
        self.read.get(&addr).copied()
    }

    pub fn on_write(&self, addr: Word) -> Option<Interrupt> {
        self.write.get(&addr).copied()
    }
}
