use std::fs;
use std::path::Path;

use anyhow::Context;
use ct64k_lib::memory::little_endian_words;
use ct64k_lib::Machine;
use log::info;

use crate::AppResult;

/// Build the initial machine from a ROM file of little endian words.
pub fn load_rom<P: AsRef<Path>>(path: P) -> AppResult<Machine> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("could not read ROM '{}'", path.display()))?;
    let words = little_endian_words(&bytes);
    let machine = Machine::from_program(&words)
        .with_context(|| format!("ROM '{}' does not fit in memory", path.display()))?;
    info!("loaded {} words from '{}'", words.len(), path.display());

    Ok(machine)
}
