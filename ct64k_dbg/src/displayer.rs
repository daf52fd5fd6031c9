use std::io::Write;

use ansi_term::Colour;
use ct64k_lib::Console;

use crate::{AppResult, OutputToken, Session, SymbolTable};

pub trait Displayer {
    fn display(&mut self, tokens: &[OutputToken]) -> AppResult<()>;
    fn display_error(&mut self, error: &anyhow::Error) -> AppResult<()>;
}

#[derive(Debug, Default)]
pub struct CliDisplayer<T>
where
    T: Write,
{
    output: T,
    color: bool,
}

impl<T> CliDisplayer<T>
where
    T: Write,
{
    pub fn new(output: T, color: bool) -> Self {
        Self { output, color }
    }

    pub fn get_output(&self) -> &T {
        &self.output
    }

    fn paint(&self, colour: Colour, text: &str) -> String {
        if self.color {
            colour.paint(text).to_string()
        } else {
            text.to_owned()
        }
    }

    /*
     * banner
     * watched addresses with their value, read from raw memory so that
     * watching a port never triggers it.
     */
    pub fn banner<C: Console>(
        &mut self,
        session: &Session<C>,
        symbols: &SymbolTable,
    ) -> AppResult<()> {
        let mut lines = vec![self.paint(Colour::Fixed(240), "<===================")];

        match session.get_live() {
            Some(machine) => {
                for addr in session.get_watch_addrs() {
                    lines.push(format!(
                        "{} = {:x}",
                        symbols.format_address(*addr),
                        machine.memory().peek(*addr)
                    ));
                }
                if machine.is_halted() {
                    lines.push(self.paint(Colour::Yellow, "CPU HALTED"));
                }
                lines.push("\n====================\n".to_owned());
            }
            None => lines.push("Not running!".to_owned()),
        }
        lines.push(self.paint(Colour::Fixed(240), "===================>"));

        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        self.output.flush()?;

        Ok(())
    }
}

impl<T> Displayer for CliDisplayer<T>
where
    T: Write,
{
    fn display(&mut self, tokens: &[OutputToken]) -> AppResult<()> {
        for token in tokens {
            let line = match token {
                OutputToken::Out(text) => format!("{} {}", self.paint(Colour::Green, "out>"), text),
                OutputToken::Notice(text) => {
                    format!("{} {}", self.paint(Colour::Red, "err>"), text)
                }
            };
            writeln!(self.output, "{}", line)?;
        }
        self.output.flush()?;

        Ok(())
    }

    fn display_error(&mut self, error: &anyhow::Error) -> AppResult<()> {
        let prefix = self.paint(Colour::Red, "err>");
        writeln!(self.output, "{} {:#}", prefix, error)?;
        self.output.flush()?;

        Ok(())
    }
}
