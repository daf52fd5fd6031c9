use ct64k_lib::Console;
use log::debug;

use crate::{AppResult, CliCommand, CliCommandParser, Command, OutputToken, Session, SessionError, SymbolTable};

/*
 * Executor
 * turns input lines into commands run against the session and remembers
 * the last successful one for `again`.
 */
pub struct Executor<C: Console> {
    session: Session<C>,
    symbols: SymbolTable,
    last_command: Option<String>,
}

impl<C: Console> Executor<C> {
    pub fn new(session: Session<C>, symbols: SymbolTable) -> Self {
        Self {
            session,
            symbols,
            last_command: None,
        }
    }

    pub fn get_session(&self) -> &Session<C> {
        &self.session
    }

    pub fn get_session_mut(&mut self) -> &mut Session<C> {
        &mut self.session
    }

    pub fn get_symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn get_last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    pub fn run_line(&mut self, line: &str) -> AppResult<Vec<OutputToken>> {
        let command = CliCommandParser::from(line)?;

        if let CliCommand::Again = command {
            let previous = self
                .last_command
                .clone()
                .ok_or(SessionError::NoPreviousCommand)?;
            debug!("repeating '{}'", previous);
            return CliCommandParser::from(&previous)?.execute(&mut self.session, &mut self.symbols);
        }

        let output = command.execute(&mut self.session, &mut self.symbols)?;
        self.last_command = Some(line.trim().to_owned());

        Ok(output)
    }
}
