//! # Snapshot
//! Register and RAM image, serializable verbatim for save states and
//! state dumps.

use crate::bus::RAM_SIZE;
use crate::cpu::{Cpu, RunState, Status};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub pc: u16,
    pub sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub status: u8,
    /// `(opcode, address)` of the instruction that halted the CPU.
    pub halted: Option<(u8, u16)>,
    pub instructions: u64,
    pub ram: Vec<u8>,
}

impl Cpu {
    pub fn snapshot(&self) -> CpuSnapshot {
        let halted = match self.state() {
            RunState::Running => None,
            RunState::Halted { opcode, address } => Some((opcode, address)),
        };
        CpuSnapshot {
            pc: self.pc(),
            sp: self.sp(),
            a: self.a,
            x: self.x,
            y: self.y,
            status: self.status(),
            halted,
            instructions: self.instructions(),
            ram: self.bus.ram().to_vec(),
        }
    }

    /// Loads registers and RAM from `snapshot`. PPU, APU and cartridge
    /// state are not part of the image.
    pub fn restore(&mut self, snapshot: &CpuSnapshot) -> Result<()> {
        let ram: [u8; RAM_SIZE] = snapshot
            .ram
            .as_slice()
            .try_into()
            .map_err(|_| CoreError::InvalidSnapshot(snapshot.ram.len()))?;

        self.set_pc(snapshot.pc);
        self.set_sp(snapshot.sp);
        self.a = snapshot.a;
        self.x = snapshot.x;
        self.y = snapshot.y;
        self.p = Status::from_byte(snapshot.status);
        self.bus.load_ram(&ram);

        let state = match snapshot.halted {
            None => RunState::Running,
            Some((opcode, address)) => RunState::Halted { opcode, address },
        };
        self.restore_state(state, snapshot.instructions);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::test_cpu;

    #[test]
    fn test_snapshot_restore() {
        // LDA #$42; STA $0300; LDX #$07
        let mut cpu = test_cpu(&[0xA9, 0x42, 0x8D, 0x00, 0x03, 0xA2, 0x07]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        let snapshot = cpu.snapshot();
        assert_eq!(snapshot.ram.len(), RAM_SIZE);
        assert_eq!(snapshot.ram[0x0300], 0x42);

        let mut other = test_cpu(&[]);
        other.restore(&snapshot).unwrap();
        assert_eq!(other.snapshot(), snapshot);
        assert_eq!(other.bus.read(0x0B00), 0x42);
        assert_eq!(other.x, 0x07);
    }

    #[test]
    fn test_restore_rejects_short_ram() {
        let mut cpu = test_cpu(&[]);
        let mut snapshot = cpu.snapshot();
        snapshot.ram.truncate(16);
        assert_eq!(cpu.restore(&snapshot), Err(CoreError::InvalidSnapshot(16)));
    }

    #[test]
    fn test_halted_state_survives_round_trip() {
        let mut cpu = test_cpu(&[0xFF]);
        assert!(cpu.step().is_err());
        let snapshot = cpu.snapshot();
        assert_eq!(snapshot.halted, Some((0xFF, 0x8000)));

        let mut other = test_cpu(&[0xEA]);
        other.restore(&snapshot).unwrap();
        assert!(other.is_halted());
    }
}
