/*
 * This is the interactive frontend of the ct64k debugger.
 */
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ansi_term::Colour;
use anyhow::anyhow;
use clap::Parser;
use log::{info, warn};
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use ct64k_dbg::{
    load_rom, AppResult, CliDisplayer, CommandLineArguments, DebuggerConfiguration, Displayer,
    Executor, Session, SymbolTable,
};
use ct64k_lib::StdConsole;

fn main() -> AppResult<()> {
    // 1 configuration & logging
    let configuration = DebuggerConfiguration::from(CommandLineArguments::parse());
    env_logger::Builder::new()
        .filter_level(configuration.log_level)
        .parse_default_env()
        .init();

    // 2 machine, symbols & session
    let machine = load_rom(&configuration.rom)?;
    let interrupted = Arc::new(AtomicBool::new(false));
    let session = Session::new(machine, StdConsole, Arc::clone(&interrupted));
    let mut symbols = SymbolTable::default();
    let mut displayer = CliDisplayer::new(io::stdout(), configuration.color);

    if configuration.symbols_required || configuration.symbols.exists() {
        match symbols.load_labels(&configuration.symbols) {
            Ok(count) => println!("Loaded {} symbols", count),
            Err(e) if configuration.symbols_required => return Err(e),
            Err(e) => warn!("{:#}", e),
        }
    } else {
        warn!(
            "no symbol file '{}', only the machine names are known",
            configuration.symbols.display()
        );
    }
    let mut executor = Executor::new(session, symbols);

    // 3 CTRL-C handler
    let remote = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        remote.store(true, Ordering::SeqCst);
    })
    .map_err(|e| anyhow!("could not set the CTRL-C handler: {}", e))?;

    // 4 readline configuration
    let prompt = if configuration.color {
        format!("{}", Colour::Fixed(148).bold().paint("ctdbg> "))
    } else {
        "ctdbg> ".to_owned()
    };
    let mut rl: Editor<CommandLineCompleter, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CommandLineCompleter));
    if rl.load_history(&configuration.history).is_err() {
        info!("no previous history.");
    }

    // 5 main CLI loop
    loop {
        displayer.banner(executor.get_session(), executor.get_symbols())?;
        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = rl.add_history_entry(line.as_str()) {
                        warn!("could not add a history entry: {}", e);
                    }
                }
                match executor.run_line(&line) {
                    Ok(tokens) => displayer.display(&tokens)?,
                    Err(e) => displayer.display_error(&e)?,
                }
                interrupted.store(false, Ordering::SeqCst);
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL+C caught, press CTRL+D to exit.");
            }
            Err(ReadlineError::Eof) => {
                println!("Quit!");
                break;
            }
            Err(err) => {
                displayer.display_error(&anyhow!("{}", err))?;
                break;
            }
        }
    }
    if let Err(e) = rl.save_history(&configuration.history) {
        warn!("could not write history: {}", e);
    }

    Ok(())
}

struct CommandLineCompleter;

impl Completer for CommandLineCompleter {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let keywords = vec![
            "again",
            "r",
            "s ",
            "ni ",
            "c",
            "b ",
            "d ",
            "watch ",
            "p ",
            "p/",
            "x/",
            "print ",
            "load-labels ",
            "help",
        ];
        let candidates: Vec<String> = keywords
            .into_iter()
            .filter(|word| !line.is_empty() && word.starts_with(line))
            .map(|word| word.to_owned())
            .collect();

        if candidates.is_empty() {
            Ok((pos, vec![]))
        } else {
            Ok((0, candidates))
        }
    }
}

impl Hinter for CommandLineCompleter {
    type Hint = String;
}

impl Highlighter for CommandLineCompleter {}

impl Validator for CommandLineCompleter {}

impl Helper for CommandLineCompleter {}
