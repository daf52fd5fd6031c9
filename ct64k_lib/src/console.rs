use std::collections::VecDeque;
use std::io::{self, Read, Write};

/*
 * Console
 * character device behind the input and output ports.
 */
pub trait Console {
    /// Block until one character is available. `None` means end of stream.
    fn getchar(&mut self) -> io::Result<Option<u8>>;
    fn putchar(&mut self, byte: u8) -> io::Result<()>;
}

/// Process standard input and output, output is flushed after each character.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn getchar(&mut self) -> io::Result<Option<u8>> {
        let mut buffer = [0u8; 1];
        loop {
            match io::stdin().lock().read(&mut buffer) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buffer[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn putchar(&mut self, byte: u8) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&[byte])?;
        stdout.flush()
    }
}

/// In memory console keeping a transcript of everything read and written.
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    input: VecDeque<u8>,
    consumed: Vec<u8>,
    output: Vec<u8>,
}

impl BufferConsole {
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn feed(&mut self, input: &[u8]) {
        self.input.extend(input);
    }

    pub fn get_output(&self) -> &[u8] {
        &self.output
    }

    pub fn get_consumed_input(&self) -> &[u8] {
        &self.consumed
    }

    pub fn output_as_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Console for BufferConsole {
    fn getchar(&mut self) -> io::Result<Option<u8>> {
        let byte = self.input.pop_front();
        if let Some(b) = byte {
            self.consumed.push(b);
        }

        Ok(byte)
    }

    fn putchar(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);

        Ok(())
    }
}
