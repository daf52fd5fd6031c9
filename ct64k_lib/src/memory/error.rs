use super::Word;
use std::error;
use std::fmt;
use std::io;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum MemoryError {
    InvalidAccess(Word),
    UnimplementedInterrupt(Word, &'static str), // address, port name
    EndOfInput(Word),
    Io(Word, io::ErrorKind),
    WriteOverflow(usize, Word), // write len, address
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MemoryError::InvalidAccess(addr) => {
                write!(f, "Cannot read/write memory at addr {:x}", addr)
            }
            MemoryError::UnimplementedInterrupt(addr, name) => write!(
                f,
                "interrupt '{}' at address 0x{:04X} is not implemented",
                name, addr
            ),
            MemoryError::EndOfInput(addr) => write!(
                f,
                "no more input available for the read at address 0x{:04X}",
                addr
            ),
            MemoryError::Io(addr, kind) => {
                write!(f, "I/O error on port 0x{:04X}: {}", addr, kind)
            }
            MemoryError::WriteOverflow(len, addr) => write!(
                f,
                "Could not WRITE {} words at address 0x{:04X}, address max is 0xFFFF.",
                len, addr
            ),
        }
    }
}

impl error::Error for MemoryError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
