mod commands;
mod config;
mod controller;
mod displayer;
mod executor;
mod expression;
mod pest_parser;
mod rom;
mod symbols;

pub use commands::*;
pub use config::{CommandLineArguments, DebuggerConfiguration};
pub use controller::{RunReport, Session, SessionError, StepReport};
pub use displayer::{CliDisplayer, Displayer};
pub use executor::Executor;
pub use expression::{Address, Expression};
pub use pest_parser::CliCommandParser;
pub use rom::load_rom;
pub use symbols::SymbolTable;

pub type AppResult<T> = anyhow::Result<T>;
