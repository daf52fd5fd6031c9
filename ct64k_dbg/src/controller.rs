use std::collections::BTreeMap;
use std::error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ct64k_lib::memory::{INSTR_PTR_LOC, STACK_PTR_LOC};
use ct64k_lib::{CPUInstruction, Console, Machine, Word};
use log::debug;

use crate::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    BreakpointNotFound(usize),
    NoPreviousCommand,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SessionError::BreakpointNotFound(id) => write!(f, "no breakpoint with id {}", id),
            SessionError::NoPreviousCommand => write!(f, "no previous command to repeat"),
        }
    }
}

impl error::Error for SessionError {}

/// Why `run` gave the hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunReport {
    BreakpointHit(Word),
    Halted,
    Paused,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RunReport::BreakpointHit(_) => write!(f, "breakpoint hit"),
            RunReport::Halted => write!(f, "program halted"),
            RunReport::Paused => write!(f, "paused"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepReport {
    Stepped(usize),
    // ↓ the machine halted before the count was reached
    Halted(usize),
    AlreadyHalted,
}

/*
 * Session
 * a debugging session over one program. The initial machine is never
 * touched, the live machine is a fresh copy of it after each restart.
 */
pub struct Session<C: Console> {
    initial: Machine,
    live: Option<Machine>,
    running: bool,
    breakpoints: BTreeMap<usize, Word>,
    highest_breakpoint: usize,
    watch_addrs: Vec<Word>,
    console: C,
    interrupted: Arc<AtomicBool>,
}

impl<C: Console> Session<C> {
    pub fn new(initial: Machine, console: C, interrupted: Arc<AtomicBool>) -> Self {
        Self {
            initial,
            live: None,
            running: false,
            breakpoints: BTreeMap::new(),
            highest_breakpoint: 0,
            watch_addrs: vec![INSTR_PTR_LOC, STACK_PTR_LOC],
            console,
            interrupted,
        }
    }

    pub fn restart(&mut self) {
        debug!("restarting the session");
        self.live = Some(self.initial.clone());
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn get_initial(&self) -> &Machine {
        &self.initial
    }

    pub fn get_live(&self) -> Option<&Machine> {
        self.live.as_ref()
    }

    pub fn get_console(&self) -> &C {
        &self.console
    }

    pub fn get_console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn get_breakpoints(&self) -> &BTreeMap<usize, Word> {
        &self.breakpoints
    }

    pub fn get_watch_addrs(&self) -> &[Word] {
        &self.watch_addrs
    }

    // live machine and console, a session is started when there is none
    fn parts(&mut self) -> (&mut Machine, &mut C) {
        if self.live.is_none() {
            self.restart();
        }
        let machine = self.live.get_or_insert_with(|| self.initial.clone());

        (machine, &mut self.console)
    }

    pub fn step_n(&mut self, count: usize) -> AppResult<StepReport> {
        if !self.running {
            self.restart();
        }
        let (machine, console) = self.parts();
        if machine.is_halted() {
            return Ok(StepReport::AlreadyHalted);
        }
        for done in 1..=count {
            machine.step(&mut *console)?;
            if machine.is_halted() {
                return Ok(StepReport::Halted(done));
            }
        }

        Ok(StepReport::Stepped(count))
    }

    /*
     * run
     * step until a breakpoint address is reached, the machine halts or the
     * user asks for a pause. The pause request is only honored between two
     * instructions.
     */
    pub fn run(&mut self) -> AppResult<RunReport> {
        if !self.running {
            self.restart();
        }
        let breakpoints: Vec<Word> = self.breakpoints.values().copied().collect();
        let interrupted = Arc::clone(&self.interrupted);
        let (machine, console) = self.parts();

        while !machine.is_halted() {
            if interrupted.swap(false, Ordering::SeqCst) {
                debug!("paused at #0x{:04X}", machine.instruction_pointer());
                return Ok(RunReport::Paused);
            }
            machine.step(&mut *console)?;
            let ip = machine.instruction_pointer();
            if !machine.is_halted() && breakpoints.contains(&ip) {
                debug!("breakpoint hit at #0x{:04X}", ip);
                return Ok(RunReport::BreakpointHit(ip));
            }
        }
        self.running = false;

        Ok(RunReport::Halted)
    }

    pub fn add_breakpoint(&mut self, addr: Word) -> usize {
        self.highest_breakpoint += 1;
        self.breakpoints.insert(self.highest_breakpoint, addr);
        debug!(
            "breakpoint {} set at #0x{:04X}",
            self.highest_breakpoint, addr
        );

        self.highest_breakpoint
    }

    pub fn delete_breakpoint(&mut self, id: usize) -> Result<Word, SessionError> {
        let addr = self
            .breakpoints
            .remove(&id)
            .ok_or(SessionError::BreakpointNotFound(id))?;
        debug!("breakpoint {} at #0x{:04X} deleted", id, addr);

        Ok(addr)
    }

    pub fn add_watch(&mut self, addr: Word) -> String {
        self.watch_addrs.push(addr);

        format!("Added a watchpoint for {:x}", addr)
    }

    /// Read memory the way the program would, ports included.
    pub fn read(&mut self, addr: Word) -> AppResult<Word> {
        let (machine, console) = self.parts();

        Ok(machine.read(addr, &mut *console)?)
    }

    pub fn decode_at(&mut self, addr: Word) -> AppResult<CPUInstruction> {
        let (machine, _) = self.parts();

        Ok(machine.decode_at(addr)?)
    }
}
