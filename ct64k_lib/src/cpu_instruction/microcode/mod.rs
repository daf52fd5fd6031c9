mod error;

mod ad;
mod jg;
mod jl;
mod jq;
mod ld;
mod md;
mod mi;
mod mv;
mod nd;
mod or;
mod sa;
mod sb;
mod sl;
mod sr;
mod st;
mod xr;

pub use self::error::{MicrocodeError, Result};

pub use self::ad::ad;
pub use self::jg::jg;
pub use self::jl::jl;
pub use self::jq::jq;
pub use self::ld::ld;
pub use self::md::md;
pub use self::mi::mi;
pub use self::mv::mv;
pub use self::nd::nd;
pub use self::or::or;
pub use self::sa::sa;
pub use self::sb::sb;
pub use self::sl::sl;
pub use self::sr::sr;
pub use self::st::st;
pub use self::xr::xr;

use super::cpu_instruction::{CPUInstruction, Outcome};
use crate::memory::{AddressableIO, Word, INSTR_PTR_LOC};

fn store(memory: &mut dyn AddressableIO, address: Word, value: Word) -> Result<Outcome> {
    memory.write(address, value)?;

    Ok(Outcome::Write { address, value })
}

/// `M[rm] = op(M[rm], M[mem])`
fn combine(
    memory: &mut dyn AddressableIO,
    cpu_instruction: &CPUInstruction,
    op: fn(Word, Word) -> Word,
) -> Result<Outcome> {
    let rm = cpu_instruction.get_rm();
    let left = memory.read(rm)?;
    let right = memory.read(cpu_instruction.get_source())?;

    store(memory, rm, op(left, right))
}

/// `IP = label` when `test(M[rm], M[mem])` holds.
fn branch(
    memory: &mut dyn AddressableIO,
    cpu_instruction: &CPUInstruction,
    test: fn(Word, Word) -> bool,
) -> Result<Outcome> {
    let label = cpu_instruction
        .get_label()
        .ok_or(MicrocodeError::OperandMismatch(cpu_instruction.get_address()))?;
    let left = memory.read(cpu_instruction.get_rm())?;
    let right = memory.read(cpu_instruction.get_source())?;

    if test(left, right) {
        memory.write(INSTR_PTR_LOC, label)?;
        Ok(Outcome::Jump(label))
    } else {
        Ok(Outcome::NoJump)
    }
}
