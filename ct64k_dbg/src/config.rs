use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

pub const DEFAULT_SYMBOLS_FILE: &str = "symbols";
pub const DEFAULT_HISTORY_FILE: &str = ".ct64k_history";

/// ct64k interactive debugger
/// Load a ROM image at 0x1000 then step, run and inspect it.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct CommandLineArguments {
    /// ROM image, little endian 16 bits words
    rom: PathBuf,

    /// Symbol file loaded at start ("address:name" per line)
    #[arg(short, long, default_value = DEFAULT_SYMBOLS_FILE)]
    symbols: PathBuf,

    /// Readline history file
    #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
    history: PathBuf,

    /// Do not colour the output
    #[arg(long)]
    no_color: bool,

    /// Log verbosity, repeat for more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebuggerConfiguration {
    pub rom: PathBuf,
    pub symbols: PathBuf,
    // ↓ a missing default symbol file is not an error
    pub symbols_required: bool,
    pub history: PathBuf,
    pub color: bool,
    pub log_level: LevelFilter,
}

impl From<CommandLineArguments> for DebuggerConfiguration {
    fn from(arguments: CommandLineArguments) -> Self {
        let log_level = match arguments.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        Self {
            symbols_required: arguments.symbols != PathBuf::from(DEFAULT_SYMBOLS_FILE),
            rom: arguments.rom,
            symbols: arguments.symbols,
            history: arguments.history,
            color: !arguments.no_color,
            log_level,
        }
    }
}
