use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context};
use ct64k_lib::memory::{
    Word, BASE_PTR_LOC, GENERAL_REGISTERS_ADDR, INPUT_PORT_ADDR, INSTR_PTR_LOC, OUTPUT_PORT_ADDR,
    SCRATCH_REGISTERS_ADDR, SCRATCH_REGISTERS_END, STACK_PTR_LOC,
};
use log::info;

use crate::AppResult;

/// address → display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: BTreeMap<Word, String>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        let mut table = Self::new();
        table.add_symbol(INSTR_PTR_LOC, "IP");
        table.add_symbol(STACK_PTR_LOC, "SP");
        table.add_symbol(BASE_PTR_LOC, "BP");
        table.add_symbol(0x0003, "SC0");
        table.add_symbol(0x0004, "SC1");
        table.add_symbol(OUTPUT_PORT_ADDR, "OUTPUT");
        table.add_symbol(INPUT_PORT_ADDR, "INPUT");

        for (i, addr) in (GENERAL_REGISTERS_ADDR..SCRATCH_REGISTERS_ADDR).enumerate() {
            table.add_symbol(addr, &format!("r{:02x}", i));
        }
        for (i, addr) in (SCRATCH_REGISTERS_ADDR..SCRATCH_REGISTERS_END).enumerate() {
            table.add_symbol(addr, &format!("s{:02x}", i));
        }

        table
    }
}

impl SymbolTable {
    /// An empty table, use `default()` to get the machine names.
    pub fn new() -> Self {
        Self {
            symbols: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn add_symbol(&mut self, addr: Word, name: &str) {
        self.symbols.insert(addr, name.to_owned());
    }

    pub fn get_name(&self, addr: Word) -> Option<&str> {
        self.symbols.get(&addr).map(|s| s.as_str())
    }

    /// Names are case insensitive.
    pub fn get_address(&self, name: &str) -> Option<Word> {
        self.symbols
            .iter()
            .find(|(_, symbol)| symbol.eq_ignore_ascii_case(name))
            .map(|(addr, _)| *addr)
    }

    /// Lower cased names with their address, longest names first so a
    /// textual substitution never replaces the prefix of a longer name.
    pub fn substitution_order(&self) -> Vec<(String, Word)> {
        let mut names: Vec<(String, Word)> = self
            .symbols
            .iter()
            .map(|(addr, name)| (name.to_lowercase(), *addr))
            .collect();
        names.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        names
    }

    /// `name (0x10)` when the address is known, `0x10` otherwise.
    pub fn format_address(&self, addr: Word) -> String {
        match self.get_name(addr) {
            Some(name) => format!("{} ({:#x})", name, addr),
            None => format!("{:#x}", addr),
        }
    }

    /*
     * load_labels
     * one `address:name` definition per line. The whole file is parsed
     * before anything gets merged so a faulty file leaves the table as is.
     */
    pub fn load_labels<P: AsRef<Path>>(&mut self, path: P) -> AppResult<usize> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("could not open symbol file '{}'", path.display()))?;
        let mut new_symbols: Vec<(Word, String)> = Vec::new();

        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if let Some(symbol) = parse_label_line(&line)
                .with_context(|| format!("{}:{}", path.display(), lineno + 1))?
            {
                new_symbols.push(symbol);
            }
        }
        let count = new_symbols.len();
        for (addr, name) in new_symbols {
            self.symbols.insert(addr, name);
        }
        info!("loaded {} symbols from '{}'", count, path.display());

        Ok(count)
    }
}

fn parse_label_line(line: &str) -> AppResult<Option<(Word, String)>> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() != 2 {
        return Err(anyhow!("expected 'address:name', got '{}'", line));
    }
    let addr = parse_address_literal(parts[0].trim())?;
    let name = parts[1].trim();
    if name.is_empty() {
        return Err(anyhow!("empty symbol name for address {:#x}", addr));
    }

    Ok(Some((addr, name.to_owned())))
}

fn parse_address_literal(literal: &str) -> AppResult<Word> {
    let lowered = literal.to_lowercase();
    let (digits, radix) = if let Some(hex) = lowered.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(octal) = lowered.strip_prefix("0o") {
        (octal, 8)
    } else if let Some(binary) = lowered.strip_prefix("0b") {
        (binary, 2)
    } else {
        (lowered.as_str(), 10)
    };

    Word::from_str_radix(digits, radix)
        .map_err(|e| anyhow!("invalid address '{}': {}", literal, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtins() {
        let table = SymbolTable::default();
        assert_eq!(Some("IP"), table.get_name(0x0000));
        assert_eq!(Some("SP"), table.get_name(0x0001));
        assert_eq!(Some("r00"), table.get_name(0x0010));
        assert_eq!(Some("r2f"), table.get_name(0x003f));
        assert_eq!(Some("s00"), table.get_name(0x0040));
        assert_eq!(Some("sbf"), table.get_name(0x00ff));
        assert_eq!(Some("OUTPUT"), table.get_name(0x0200));
        assert_eq!(Some(0x0201), table.get_address("input"));
        assert_eq!(None, table.get_name(0x0100));
    }

    #[test]
    fn test_parse_label_line() {
        assert_eq!(
            Some((0x1000, "main".to_string())),
            parse_label_line("0x1000:main").unwrap()
        );
        assert_eq!(
            Some((0x0020, "counter".to_string())),
            parse_label_line(" 32 :  counter  ").unwrap()
        );
        assert_eq!(
            Some((0x0008, "eight".to_string())),
            parse_label_line("0o10:eight").unwrap()
        );
        assert_eq!(None, parse_label_line("   ").unwrap());
        parse_label_line("0x1000").expect_err("a name is required");
        parse_label_line("0x1000:a:b").expect_err("only one colon is allowed");
        parse_label_line("0x10000:big").expect_err("addresses are words");
        parse_label_line("zz:bad").expect_err("not a number");
    }

    #[test]
    fn test_load_labels() -> AppResult<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "0x1000:main")?;
        writeln!(file)?;
        writeln!(file, "0x1010:loop")?;
        writeln!(file, "0x10:counter")?;
        file.flush()?;

        let mut table = SymbolTable::default();
        let count = table.load_labels(file.path())?;

        assert_eq!(3, count);
        assert_eq!(Some(0x1000), table.get_address("main"));
        assert_eq!(Some(0x1010), table.get_address("LOOP"));
        // explicit redefinition wins over the register name
        assert_eq!(Some("counter"), table.get_name(0x0010));
        assert_eq!(None, table.get_address("r00"));

        Ok(())
    }

    #[test]
    fn test_load_faulty_labels_changes_nothing() -> AppResult<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "0x1000:main")?;
        writeln!(file, "garbage")?;
        file.flush()?;

        let mut table = SymbolTable::default();
        let before = table.clone();
        let error = table.load_labels(file.path()).unwrap_err();

        assert!(format!("{:#}", error).contains(":2"));
        assert_eq!(before, table);

        Ok(())
    }

    #[test]
    fn test_format_address() {
        let table = SymbolTable::default();
        assert_eq!("r00 (0x10)", table.format_address(0x0010));
        assert_eq!("0x1234", table.format_address(0x1234));
    }

    #[test]
    fn test_substitution_order() {
        let mut table = SymbolTable::new();
        table.add_symbol(0x1000, "loop");
        table.add_symbol(0x2000, "Loop2");
        let order = table.substitution_order();
        assert_eq!(("loop2".to_string(), 0x2000), order[0]);
        assert_eq!(("loop".to_string(), 0x1000), order[1]);
    }
}
