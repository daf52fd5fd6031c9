use super::microcode::{self, MicrocodeError, Result};
use crate::memory::{AddressableIO, Word};
use std::convert::TryFrom;
use std::fmt;

/// Jump instructions span three words.
pub const INSTRUCTION_MAX_LEN: usize = 3;
/// `rm` lives in the 12 low bits of the first word.
pub const RM_MASK: Word = 0x0FFF;

pub type Microcode = fn(&mut dyn AddressableIO, &CPUInstruction) -> Result<Outcome>;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum InstructionFamily {
    Immediate,
    Addressed,
    Jump,
}

impl InstructionFamily {
    pub fn word_count(self) -> Word {
        match self {
            InstructionFamily::Immediate | InstructionFamily::Addressed => 2,
            InstructionFamily::Jump => 3,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Opcode {
    Mi = 0x0,
    Mv = 0x1,
    Md = 0x2,
    Ld = 0x3,
    St = 0x4,
    Ad = 0x5,
    Sb = 0x6,
    Nd = 0x7,
    Or = 0x8,
    Xr = 0x9,
    Sr = 0xa,
    Sl = 0xb,
    Sa = 0xc,
    Jg = 0xd,
    Jl = 0xe,
    Jq = 0xf,
}

impl TryFrom<u8> for Opcode {
    type Error = MicrocodeError;

    fn try_from(value: u8) -> Result<Self> {
        let opcode = match value {
            0x0 => Opcode::Mi,
            0x1 => Opcode::Mv,
            0x2 => Opcode::Md,
            0x3 => Opcode::Ld,
            0x4 => Opcode::St,
            0x5 => Opcode::Ad,
            0x6 => Opcode::Sb,
            0x7 => Opcode::Nd,
            0x8 => Opcode::Or,
            0x9 => Opcode::Xr,
            0xa => Opcode::Sr,
            0xb => Opcode::Sl,
            0xc => Opcode::Sa,
            0xd => Opcode::Jg,
            0xe => Opcode::Jl,
            0xf => Opcode::Jq,
            v => return Err(MicrocodeError::InvalidOpcode(v)),
        };

        Ok(opcode)
    }
}

impl Opcode {
    pub const ALL: [Opcode; 16] = [
        Opcode::Mi,
        Opcode::Mv,
        Opcode::Md,
        Opcode::Ld,
        Opcode::St,
        Opcode::Ad,
        Opcode::Sb,
        Opcode::Nd,
        Opcode::Or,
        Opcode::Xr,
        Opcode::Sr,
        Opcode::Sl,
        Opcode::Sa,
        Opcode::Jg,
        Opcode::Jl,
        Opcode::Jq,
    ];

    pub fn family(self) -> InstructionFamily {
        match self {
            Opcode::Mi => InstructionFamily::Immediate,
            Opcode::Jg | Opcode::Jl | Opcode::Jq => InstructionFamily::Jump,
            _ => InstructionFamily::Addressed,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Mi => "MI",
            Opcode::Mv => "MV",
            Opcode::Md => "MD",
            Opcode::Ld => "LD",
            Opcode::St => "ST",
            Opcode::Ad => "AD",
            Opcode::Sb => "SB",
            Opcode::Nd => "ND",
            Opcode::Or => "OR",
            Opcode::Xr => "XR",
            Opcode::Sr => "SR",
            Opcode::Sl => "SL",
            Opcode::Sa => "SA",
            Opcode::Jg => "JG",
            Opcode::Jl => "JL",
            Opcode::Jq => "JQ",
        }
    }

    pub fn microcode(self) -> Microcode {
        match self {
            Opcode::Mi => microcode::mi,
            Opcode::Mv => microcode::mv,
            Opcode::Md => microcode::md,
            Opcode::Ld => microcode::ld,
            Opcode::St => microcode::st,
            Opcode::Ad => microcode::ad,
            Opcode::Sb => microcode::sb,
            Opcode::Nd => microcode::nd,
            Opcode::Or => microcode::or,
            Opcode::Xr => microcode::xr,
            Opcode::Sr => microcode::sr,
            Opcode::Sl => microcode::sl,
            Opcode::Sa => microcode::sa,
            Opcode::Jg => microcode::jg,
            Opcode::Jl => microcode::jl,
            Opcode::Jq => microcode::jq,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Operands {
    Immediate { rm: Word, imm: Word },
    Addressed { rm: Word, mem: Word },
    Jump { rm: Word, mem: Word, label: Word },
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub struct CPUInstruction {
    address: Word,
    opcode: Opcode,
    operands: Operands,
}

impl CPUInstruction {
    /// `source` is the immediate value or the source address depending on
    /// the family, `label` is only kept for jumps.
    pub fn new(address: Word, opcode: Opcode, rm: Word, source: Word, label: Word) -> Self {
        let rm = rm & RM_MASK;
        let operands = match opcode.family() {
            InstructionFamily::Immediate => Operands::Immediate { rm, imm: source },
            InstructionFamily::Addressed => Operands::Addressed { rm, mem: source },
            InstructionFamily::Jump => Operands::Jump {
                rm,
                mem: source,
                label,
            },
        };

        CPUInstruction {
            address,
            opcode,
            operands,
        }
    }

    pub fn decode(address: Word, words: [Word; INSTRUCTION_MAX_LEN]) -> Result<Self> {
        let opcode = Opcode::try_from((words[0] >> 12) as u8)?;

        Ok(Self::new(address, opcode, words[0] & RM_MASK, words[1], words[2]))
    }

    pub fn encode(&self) -> Vec<Word> {
        let first = (self.opcode as Word) << 12 | self.get_rm();
        match self.operands {
            Operands::Immediate { imm, .. } => vec![first, imm],
            Operands::Addressed { mem, .. } => vec![first, mem],
            Operands::Jump { mem, label, .. } => vec![first, mem, label],
        }
    }

    pub fn get_address(&self) -> Word {
        self.address
    }

    pub fn get_opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn get_operands(&self) -> Operands {
        self.operands
    }

    pub fn get_family(&self) -> InstructionFamily {
        self.opcode.family()
    }

    pub fn word_count(&self) -> Word {
        self.get_family().word_count()
    }

    pub fn next_address(&self) -> Word {
        self.address.wrapping_add(self.word_count())
    }

    pub fn get_rm(&self) -> Word {
        match self.operands {
            Operands::Immediate { rm, .. }
            | Operands::Addressed { rm, .. }
            | Operands::Jump { rm, .. } => rm,
        }
    }

    /// Second word: immediate value or source address.
    pub fn get_source(&self) -> Word {
        match self.operands {
            Operands::Immediate { imm, .. } => imm,
            Operands::Addressed { mem, .. } | Operands::Jump { mem, .. } => mem,
        }
    }

    pub fn get_label(&self) -> Option<Word> {
        match self.operands {
            Operands::Jump { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Halt and catch fire: `JQ 0, 0, <own address>`.
    pub fn is_halt(&self) -> bool {
        matches!(
            self.operands,
            Operands::Jump { rm: 0, mem: 0, label } if self.opcode == Opcode::Jq && label == self.address
        )
    }

    pub fn mnemonic(&self) -> &'static str {
        if self.is_halt() {
            "HF"
        } else {
            self.opcode.mnemonic()
        }
    }

    pub fn operand_words(&self) -> Vec<Word> {
        match self.operands {
            Operands::Immediate { rm, imm } => vec![rm, imm],
            Operands::Addressed { rm, mem } => vec![rm, mem],
            Operands::Jump { rm, mem, label } => vec![rm, mem, label],
        }
    }

    /// Render the instruction, each operand going through `format_operand`.
    pub fn format_with<F>(&self, format_operand: F) -> String
    where
        F: Fn(Word) -> String,
    {
        if self.is_halt() {
            return self.mnemonic().to_owned();
        }
        let operands = self
            .operand_words()
            .into_iter()
            .map(format_operand)
            .collect::<Vec<String>>()
            .join(", ");

        format!("{} {}", self.mnemonic(), operands)
    }

    pub fn execute(&self, memory: &mut dyn AddressableIO) -> Result<Outcome> {
        (self.opcode.microcode())(memory, self)
    }
}

impl fmt::Display for CPUInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(|w| format!("{:#x}", w)))
    }
}

/// Visible effect of one executed instruction.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Outcome {
    Write { address: Word, value: Word },
    Jump(Word),
    NoJump,
    Halt,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Write { address, value } => write!(f, "[0x{:04X}=0x{:04X}]", address, value),
            Outcome::Jump(label) => write!(f, "[IP=0x{:04X}]", label),
            Outcome::NoJump => write!(f, ""),
            Outcome::Halt => write!(f, "[HALT]"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogLine {
    pub address: Word,
    pub words: Vec<Word>,
    pub instruction: CPUInstruction,
    pub outcome: Outcome,
}

impl LogLine {
    pub fn new(cpu_instruction: CPUInstruction, outcome: Outcome) -> LogLine {
        LogLine {
            address: cpu_instruction.get_address(),
            words: cpu_instruction.encode(),
            instruction: cpu_instruction,
            outcome,
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word_sequence = format!(
            "({})",
            self.words
                .iter()
                .fold(String::new(), |acc, s| format!("{} {:04x}", acc, s))
                .trim()
        );

        write!(
            f,
            "#0x{:04X}: {: <17}{: <28} {}",
            self.address,
            word_sequence,
            self.instruction.to_string(),
            self.outcome
        )
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::console::BufferConsole;
    use crate::memory::{MemoryStack, CODE_BASE_ADDR};

    pub fn get_stuff(program: &[Word]) -> (MemoryStack, BufferConsole) {
        let mut memory = MemoryStack::new_with_ram();
        memory.load(CODE_BASE_ADDR, program).unwrap();

        (memory, BufferConsole::default())
    }

    #[test]
    fn test_decode_immediate() {
        let instruction = CPUInstruction::decode(0x1000, [0x0010, 0x0005, 0xdead]).unwrap();
        assert_eq!(Opcode::Mi, instruction.get_opcode());
        assert_eq!(
            Operands::Immediate {
                rm: 0x10,
                imm: 0x05
            },
            instruction.get_operands()
        );
        assert_eq!(2, instruction.word_count());
        assert_eq!(None, instruction.get_label());
        assert_eq!("MI 0x10, 0x5", instruction.to_string());
    }

    #[test]
    fn test_decode_jump() {
        let instruction = CPUInstruction::decode(0x1004, [0xd011, 0x0012, 0x1000]).unwrap();
        assert_eq!(Opcode::Jg, instruction.get_opcode());
        assert_eq!(InstructionFamily::Jump, instruction.get_family());
        assert_eq!(Some(0x1000), instruction.get_label());
        assert_eq!(0x1007, instruction.next_address());
        assert_eq!("JG 0x11, 0x12, 0x1000", instruction.to_string());
    }

    #[test]
    fn test_invalid_opcode() {
        assert!(matches!(
            Opcode::try_from(0x10),
            Err(MicrocodeError::InvalidOpcode(0x10))
        ));
    }

    #[test]
    fn test_round_trip_every_opcode() {
        for opcode in Opcode::ALL.iter() {
            let instruction = CPUInstruction::new(0x2000, *opcode, 0x0abc, 0x1234, 0x5678);
            let encoded = instruction.encode();
            assert_eq!(instruction.word_count() as usize, encoded.len());
            let mut words = [0; INSTRUCTION_MAX_LEN];
            words[..encoded.len()].copy_from_slice(&encoded);
            assert_eq!(instruction, CPUInstruction::decode(0x2000, words).unwrap());
        }
    }

    #[test]
    fn test_halt_mnemonic() {
        let halt = CPUInstruction::new(0x1002, Opcode::Jq, 0, 0, 0x1002);
        assert!(halt.is_halt());
        assert_eq!("HF", halt.mnemonic());
        assert_eq!("HF", halt.to_string());

        let jump = CPUInstruction::new(0x1002, Opcode::Jq, 0, 0, 0x1000);
        assert!(!jump.is_halt());
        assert_eq!("JQ", jump.mnemonic());

        let greater = CPUInstruction::new(0x1002, Opcode::Jg, 0, 0, 0x1002);
        assert!(!greater.is_halt());
    }

    #[test]
    fn test_rm_is_twelve_bits() {
        let instruction = CPUInstruction::new(0x1000, Opcode::Mv, 0xf010, 0x0020, 0);
        assert_eq!(0x0010, instruction.get_rm());
        assert_eq!(vec![0x1010, 0x0020], instruction.encode());
    }

    #[test]
    fn test_format_with_symbols() {
        let instruction = CPUInstruction::new(0x1000, Opcode::Ad, 0x10, 0x300, 0);
        let output = instruction.format_with(|w| match w {
            0x10 => "r00 (0x10)".to_owned(),
            v => format!("{:#x}", v),
        });
        assert_eq!("AD r00 (0x10), 0x300", output);
    }

    #[test]
    fn test_logline_display() {
        let instruction = CPUInstruction::new(0x1000, Opcode::Mi, 0x10, 0x05, 0);
        let logline = LogLine::new(
            instruction,
            Outcome::Write {
                address: 0x10,
                value: 0x05,
            },
        );
        let output = logline.to_string();
        assert!(output.starts_with("#0x1000: (0010 0005)"));
        assert!(output.contains("MI 0x10, 0x5"));
        assert!(output.ends_with("[0x0010=0x0005]"));
    }
}
