use std::path::PathBuf;

use anyhow::anyhow;
use ct64k_lib::{Console, Word};

use crate::{AppResult, Expression, RunReport, Session, SessionError, StepReport, SymbolTable};

/// What a command has to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputToken {
    Out(String),
    // ↓ user facing refusal that is not an error
    Notice(String),
}

pub trait Command {
    fn execute<C: Console>(
        &self,
        session: &mut Session<C>,
        symbols: &mut SymbolTable,
    ) -> AppResult<Vec<OutputToken>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintFormat {
    Word,
    Hex,
    Char,
    Instruction,
}

impl PrintFormat {
    pub fn from_specifier(specifier: &str) -> AppResult<Self> {
        match specifier {
            "w" => Ok(Self::Word),
            "x" => Ok(Self::Hex),
            "c" => Ok(Self::Char),
            "i" => Ok(Self::Instruction),
            v => Err(anyhow!("unknown print format '{}'", v)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Again,
    Restart,
    Step(Option<Expression>),
    Continue,
    Break(Expression),
    Delete(usize),
    Watch(Expression),
    Print {
        count: usize,
        format: PrintFormat,
        location: Expression,
    },
    LoadLabels(PathBuf),
    Help,
}

impl Command for CliCommand {
    fn execute<C: Console>(
        &self,
        session: &mut Session<C>,
        symbols: &mut SymbolTable,
    ) -> AppResult<Vec<OutputToken>> {
        let output = match self {
            // repeating is the interpreter's job, there is nothing to repeat here
            Self::Again => return Err(SessionError::NoPreviousCommand.into()),
            Self::Restart => {
                session.restart();
                run_report(session.run()?)
            }
            Self::Step(count) => {
                let count = match count {
                    Some(expression) => expression.resolve(symbols, session)? as usize,
                    None => 1,
                };
                match session.step_n(count)? {
                    StepReport::AlreadyHalted => vec![OutputToken::Notice(
                        "STATE HALTED, USE r TO RESTART".to_owned(),
                    )],
                    StepReport::Halted(_) => vec![OutputToken::Out(RunReport::Halted.to_string())],
                    StepReport::Stepped(_) => Vec::new(),
                }
            }
            Self::Continue => run_report(session.run()?),
            Self::Break(expression) => {
                let addr = expression.resolve(symbols, session)?;
                vec![OutputToken::Out(session.add_breakpoint(addr).to_string())]
            }
            Self::Delete(id) => {
                session.delete_breakpoint(*id)?;
                Vec::new()
            }
            Self::Watch(expression) => {
                let addr = expression.resolve(symbols, session)?;
                vec![OutputToken::Out(session.add_watch(addr))]
            }
            Self::Print {
                count,
                format,
                location,
            } => {
                let start = location.resolve(symbols, session)?;
                vec![OutputToken::Out(print_memory(
                    session, symbols, start, *count, *format,
                )?)]
            }
            Self::LoadLabels(path) => {
                let count = symbols.load_labels(path)?;
                vec![OutputToken::Out(format!("Loaded {} symbols", count))]
            }
            Self::Help => help()
                .iter()
                .map(|line| OutputToken::Out(line.to_string()))
                .collect(),
        };

        Ok(output)
    }
}

/// One full pass over the memory.
pub const PRINT_MAX_COUNT: usize = 0x10000;

fn run_report(report: RunReport) -> Vec<OutputToken> {
    vec![OutputToken::Out(report.to_string())]
}

/*
 * print_memory
 * `count` items from `start`: words are space separated, characters are
 * rendered as an escaped byte string and instructions get one line each.
 */
fn print_memory<C: Console>(
    session: &mut Session<C>,
    symbols: &SymbolTable,
    start: Word,
    count: usize,
    format: PrintFormat,
) -> AppResult<String> {
    if count > PRINT_MAX_COUNT {
        return Err(anyhow!(
            "cannot print {} items, the memory holds {:#x} words",
            count,
            PRINT_MAX_COUNT
        ));
    }
    let output = match format {
        PrintFormat::Word | PrintFormat::Hex => {
            let mut words: Vec<String> = Vec::new();
            for offset in 0..count {
                let word = session.read(start.wrapping_add(offset as Word))?;
                words.push(format!("{:#x}", word));
            }
            words.join(" ")
        }
        PrintFormat::Char => {
            let mut bytes: Vec<u8> = Vec::new();
            for offset in 0..count {
                let word = session.read(start.wrapping_add(offset as Word))?;
                let byte = u8::try_from(word)
                    .map_err(|_| anyhow!("Error formatting: {:#x} is not a character", word))?;
                bytes.push(byte);
            }
            format!("b'{}'", bytes.escape_ascii())
        }
        PrintFormat::Instruction => {
            let mut addr = start;
            let mut output = String::new();
            for _ in 0..count {
                let cpu_instruction = session.decode_at(addr)?;
                output.push_str(&format!(
                    "\n{:#x}: {}",
                    addr,
                    cpu_instruction.format_with(|w| symbols.format_address(w))
                ));
                addr = cpu_instruction.next_address();
            }
            output
        }
    };

    Ok(output)
}

fn help() -> Vec<&'static str> {
    vec![
        "again, <empty line>    repeat the last command",
        "r                      restart the program and run it",
        "s|n|ni [COUNT]         step COUNT instructions (default 1)",
        "c                      continue until a breakpoint or halt",
        "b EXPR                 add a breakpoint, its id is returned",
        "d ID                   delete the breakpoint ID",
        "watch EXPR             display this address before each prompt",
        "p[/NF] EXPR            print N items at EXPR, F is one of",
        "                         w, x: word  c: character  i: instruction",
        "load-labels PATH       load 'address:name' symbols from PATH",
        "help                   this help",
        "",
        "EXPR is a hexadecimal address, $name stands for a symbol address",
        "and a leading * reads the memory once: p/4i *$ip",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ct64k_lib::{BufferConsole, Machine};
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn get_stuff(program: &[Word]) -> (Session<BufferConsole>, SymbolTable) {
        let session = Session::new(
            Machine::from_program(program).unwrap(),
            BufferConsole::default(),
            Arc::new(AtomicBool::new(false)),
        );

        (session, SymbolTable::default())
    }

    fn print(location: &str, count: usize, format: PrintFormat) -> CliCommand {
        CliCommand::Print {
            count,
            format,
            location: Expression::new(location),
        }
    }

    #[test]
    fn test_print_words() {
        let (mut session, mut symbols) = get_stuff(&[0x0010, 0x0005]);
        let output = print("0x1000", 2, PrintFormat::Word)
            .execute(&mut session, &mut symbols)
            .unwrap();
        assert_eq!(vec![OutputToken::Out("0x10 0x5".to_owned())], output);
    }

    #[test]
    fn test_print_deref() {
        let (mut session, mut symbols) = get_stuff(&[0x0010, 0x0005]);
        let output = print("*$ip", 1, PrintFormat::Hex)
            .execute(&mut session, &mut symbols)
            .unwrap();
        assert_eq!(vec![OutputToken::Out("0x10".to_owned())], output);
    }

    #[test]
    fn test_print_chars() {
        let (mut session, mut symbols) = get_stuff(&[0x0048, 0x0069, 0x000a]);
        let output = print("1000", 3, PrintFormat::Char)
            .execute(&mut session, &mut symbols)
            .unwrap();
        assert_eq!(vec![OutputToken::Out("b'Hi\\n'".to_owned())], output);

        let (mut session, mut symbols) = get_stuff(&[0x1234]);
        print("1000", 1, PrintFormat::Char)
            .execute(&mut session, &mut symbols)
            .expect_err("0x1234 is not a character");
    }

    #[test]
    fn test_print_count_is_bounded() {
        let (mut session, mut symbols) = get_stuff(&[]);
        let output = print("1000", 0x100, PrintFormat::Word)
            .execute(&mut session, &mut symbols)
            .unwrap();
        assert!(matches!(&output[..], [OutputToken::Out(text)] if text.split(' ').count() == 0x100));

        for format in [PrintFormat::Word, PrintFormat::Char, PrintFormat::Instruction] {
            print("1000", PRINT_MAX_COUNT + 1, format)
                .execute(&mut session, &mut symbols)
                .expect_err("more items than words in memory");
        }
        print("1000", usize::MAX, PrintFormat::Hex)
            .execute(&mut session, &mut symbols)
            .expect_err("more items than words in memory");
    }

    #[test]
    fn test_print_instructions() {
        let (mut session, mut symbols) =
            get_stuff(&[0x0010, 0x0005, 0xd010, 0x0011, 0x1000, 0xf000, 0x0000, 0x1005]);
        symbols.add_symbol(0x1000, "main");
        let output = print("1000", 3, PrintFormat::Instruction)
            .execute(&mut session, &mut symbols)
            .unwrap();
        assert_eq!(
            vec![OutputToken::Out(
                "\n0x1000: MI r00 (0x10), 0x5\n0x1002: JG r00 (0x10), r01 (0x11), main (0x1000)\n0x1005: HF"
                    .to_owned()
            )],
            output
        );
    }

    #[test]
    fn test_step_on_halted_machine() {
        let (mut session, mut symbols) = get_stuff(&[0xf000, 0x0000, 0x1000]);
        let output = CliCommand::Step(None)
            .execute(&mut session, &mut symbols)
            .unwrap();
        assert_eq!(vec![OutputToken::Out("program halted".to_owned())], output);
        let output = CliCommand::Step(Some(Expression::new("10")))
            .execute(&mut session, &mut symbols)
            .unwrap();
        assert!(matches!(&output[0], OutputToken::Notice(n) if n.contains("HALTED")));
    }

    #[test]
    fn test_step_count_is_hexadecimal() {
        let program: Vec<Word> = (0..0x20).flat_map(|_| vec![0x0010, 0x0001]).collect();
        let (mut session, mut symbols) = get_stuff(&program);
        CliCommand::Step(Some(Expression::new("10")))
            .execute(&mut session, &mut symbols)
            .unwrap();
        assert_eq!(0x1020, session.get_live().unwrap().instruction_pointer());
    }

    #[test]
    fn test_breakpoints() {
        let (mut session, mut symbols) = get_stuff(&[]);
        let output = CliCommand::Break(Expression::new("$r00"))
            .execute(&mut session, &mut symbols)
            .unwrap();
        assert_eq!(vec![OutputToken::Out("1".to_owned())], output);
        CliCommand::Delete(1)
            .execute(&mut session, &mut symbols)
            .unwrap();
        let error = CliCommand::Delete(1)
            .execute(&mut session, &mut symbols)
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SessionError>(),
            Some(SessionError::BreakpointNotFound(1))
        ));
    }

    #[test]
    fn test_watch() {
        let (mut session, mut symbols) = get_stuff(&[]);
        let output = CliCommand::Watch(Expression::new("$s00"))
            .execute(&mut session, &mut symbols)
            .unwrap();
        assert_eq!(
            vec![OutputToken::Out("Added a watchpoint for 40".to_owned())],
            output
        );
    }

    #[test]
    fn test_again_alone() {
        let (mut session, mut symbols) = get_stuff(&[]);
        let error = CliCommand::Again
            .execute(&mut session, &mut symbols)
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SessionError>(),
            Some(SessionError::NoPreviousCommand)
        ));
    }
}
