//! # 6502 CPU Implementation
//!
//! Register file, run state and the fetch/dispatch loop. Operand
//! resolution lives in `addressing`, stack traffic in `stack`, the
//! per-instruction effects in `instructions`, and the byte-to-handler
//! mapping in `opcodes`.

pub mod addressing;
mod instructions;
pub mod opcodes;
mod stack;
pub mod status;

use crate::bus::Bus;
use crate::cartridge::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
use crate::error::{CoreError, Result};

pub use addressing::Mode;
pub use opcodes::{Opcode, OPCODES};
pub use status::Status;

pub const STACK_PAGE: u16 = 0x0100;
pub const RESET_SP: u8 = 0xFD;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Entered on an opcode with no table entry; only `reset` leaves it.
    Halted { opcode: u8, address: u16 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Interrupt {
    Nmi,
    Irq,
    Break,
}

pub struct Cpu {
    pub bus: Bus,
    pc: u16,
    sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: Status,
    state: RunState,
    instructions: u64,
}

impl Cpu {
    pub fn new(bus: Bus) -> Self {
        Cpu {
            bus,
            pc: 0,
            sp: RESET_SP,
            a: 0,
            x: 0,
            y: 0,
            p: Status::power_on(),
            state: RunState::Running,
            instructions: 0,
        }
    }

    /// Power-on/reset: registers cleared, RAM zeroed, PC from 0xFFFC.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = RESET_SP;
        self.p = Status::power_on();
        self.bus.clear_ram();
        self.pc = self.bus.read_word(RESET_VECTOR);
        self.state = RunState::Running;
        self.instructions = 0;
        log::debug!("CPU reset, PC=${:04X}", self.pc);
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn set_sp(&mut self, sp: u8) {
        self.sp = sp;
    }

    pub fn status(&self) -> u8 {
        self.p.to_byte()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.state, RunState::Halted { .. })
    }

    /// Instructions executed since the last reset.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    pub(crate) fn restore_state(&mut self, state: RunState, instructions: u64) {
        self.state = state;
        self.instructions = instructions;
    }

    /// Executes exactly one instruction.
    ///
    /// An opcode without a table entry leaves every register where it was
    /// before the fetch and moves the CPU to `RunState::Halted`.
    pub fn step(&mut self) -> Result<()> {
        if let RunState::Halted { opcode, address } = self.state {
            return Err(CoreError::Halted { opcode, address });
        }

        let address = self.pc;
        let opcode = self.next_byte();

        let Some(instruction) = OPCODES[opcode as usize] else {
            self.pc = address;
            self.state = RunState::Halted { opcode, address };
            log::warn!(
                "Unimplemented instruction: 0x{:02X} at PC: 0x{:04X}",
                opcode,
                address
            );
            return Err(CoreError::UnimplementedOpcode { opcode, address });
        };

        log::trace!(
            "{:04X}  {:02X}  {:<4} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            address,
            opcode,
            instruction.mnemonic,
            self.a,
            self.x,
            self.y,
            self.p.to_byte(),
            self.sp
        );

        (instruction.execute)(self, instruction.mode);
        self.instructions += 1;
        Ok(())
    }

    /// Pushes PC and status, sets I and jumps through the matching vector.
    ///
    /// Returns false when the interrupt was not taken: an IRQ while I is
    /// set, or anything while halted.
    pub fn interrupt(&mut self, kind: Interrupt) -> bool {
        if self.is_halted() {
            return false;
        }
        if kind == Interrupt::Irq && self.p.interrupt_disable {
            return false;
        }

        self.push_word(self.pc);
        self.push_byte(self.p.to_byte());
        self.p.interrupt_disable = true;

        let vector = match kind {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq | Interrupt::Break => IRQ_VECTOR,
        };
        self.pc = self.bus.read_word(vector);
        log::debug!("{:?} -> ${:04X}", kind, self.pc);
        true
    }

    pub fn nmi(&mut self) -> bool {
        self.interrupt(Interrupt::Nmi)
    }

    pub fn irq(&mut self) -> bool {
        self.interrupt(Interrupt::Irq)
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(Bus::default())
    }
}

#[cfg(test)]
pub(crate) fn test_cpu(program: &[u8]) -> Cpu {
    use crate::cartridge::Cartridge;

    let mut cartridge = Cartridge::ram();
    cartridge.load(0x8000, program).unwrap();
    cartridge.set_vector(RESET_VECTOR, 0x8000).unwrap();
    let mut cpu = Cpu::new(Bus::new(cartridge));
    cpu.reset();
    cpu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_state() {
        let cpu = test_cpu(&[0xEA]);
        assert_eq!(cpu.a, 0);
        assert_eq!(cpu.x, 0);
        assert_eq!(cpu.y, 0);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.pc(), 0x8000);
        assert!(cpu.p.interrupt_disable);
        assert!(!cpu.p.carry && !cpu.p.zero && !cpu.p.decimal);
        assert!(!cpu.p.overflow && !cpu.p.negative);
        assert_eq!(cpu.state(), RunState::Running);
        assert!(cpu.bus.ram().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_reset_clears_ram() {
        let mut cpu = test_cpu(&[0xEA]);
        cpu.bus.write(0x0123, 0x45);
        cpu.reset();
        assert_eq!(cpu.bus.read(0x0123), 0);
    }

    #[test]
    fn test_lda_sta_lda() {
        let mut cpu = test_cpu(&[0xA9, 0x05, 0x85, 0x10, 0xA5, 0x10]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.a, 0x05);
        assert_eq!(cpu.bus.read(0x0010), 0x05);
        assert_eq!(cpu.pc(), 0x8006);
        assert_eq!(cpu.instructions(), 3);
    }

    #[test]
    fn test_unimplemented_opcode_halts() {
        let mut cpu = test_cpu(&[0xA9, 0x80, 0xFF]);
        cpu.step().unwrap();
        let before = (cpu.a, cpu.x, cpu.y, cpu.sp(), cpu.pc(), cpu.status());

        assert_eq!(
            cpu.step(),
            Err(CoreError::UnimplementedOpcode {
                opcode: 0xFF,
                address: 0x8002
            })
        );
        assert_eq!(before, (cpu.a, cpu.x, cpu.y, cpu.sp(), cpu.pc(), cpu.status()));
        assert!(cpu.is_halted());

        assert_eq!(
            cpu.step(),
            Err(CoreError::Halted {
                opcode: 0xFF,
                address: 0x8002
            })
        );
        assert_eq!(cpu.pc(), 0x8002);
        assert_eq!(cpu.instructions(), 1);
    }

    #[test]
    fn test_reset_leaves_halted_state() {
        let mut cpu = test_cpu(&[0x02]);
        assert!(cpu.step().is_err());
        cpu.reset();
        assert_eq!(cpu.state(), RunState::Running);
        assert!(cpu.step().is_err());
    }

    #[test]
    fn test_nmi() {
        let mut cpu = test_cpu(&[0xEA]);
        cpu.bus.cartridge.set_vector(NMI_VECTOR, 0x9000).unwrap();
        cpu.p.carry = true;
        let status = cpu.status();

        assert!(cpu.nmi());
        assert_eq!(cpu.pc(), 0x9000);
        assert_eq!(cpu.sp(), 0xFA);
        assert!(cpu.p.interrupt_disable);
        assert_eq!(cpu.bus.read(0x01FD), 0x80);
        assert_eq!(cpu.bus.read(0x01FC), 0x00);
        assert_eq!(cpu.bus.read(0x01FB), status);
    }

    #[test]
    fn test_irq_masked_by_interrupt_disable() {
        let mut cpu = test_cpu(&[0xEA]);
        cpu.bus.cartridge.set_vector(IRQ_VECTOR, 0x9000).unwrap();
        assert!(!cpu.irq());
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);

        cpu.p.interrupt_disable = false;
        assert!(cpu.irq());
        assert_eq!(cpu.pc(), 0x9000);
        assert!(cpu.p.interrupt_disable);
    }

    #[test]
    fn test_interrupts_ignored_while_halted() {
        let mut cpu = test_cpu(&[0xFF]);
        assert!(cpu.step().is_err());
        assert!(!cpu.nmi());
        assert_eq!(cpu.pc(), 0x8000);
    }
}
