//! # Video port
//! The CPU sees the PPU only through its eight memory-mapped registers.

/// Register interface of the video subsystem.
///
/// `offset` is already reduced to the register index (0-7); the bus
/// handles the mirroring across 0x2000-0x3FFF.
pub trait VideoPort {
    fn read(&mut self, offset: u8) -> u8;
    fn write(&mut self, offset: u8, value: u8);
}

pub const PPU_REGISTER_COUNT: usize = 8;

/// Plain register latch standing in for a PPU.
#[derive(Debug, Clone, Default)]
pub struct PpuRegisters {
    registers: [u8; PPU_REGISTER_COUNT],
    pub reads: u64,
    pub writes: u64,
}

impl PpuRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, offset: u8) -> u8 {
        self.registers[offset as usize % PPU_REGISTER_COUNT]
    }
}

impl VideoPort for PpuRegisters {
    fn read(&mut self, offset: u8) -> u8 {
        self.reads += 1;
        self.register(offset)
    }

    fn write(&mut self, offset: u8, value: u8) {
        self.writes += 1;
        self.registers[offset as usize % PPU_REGISTER_COUNT] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_latch() {
        let mut ppu = PpuRegisters::new();
        ppu.write(3, 0x42);
        assert_eq!(ppu.read(3), 0x42);
        assert_eq!(ppu.read(4), 0x00);
        assert_eq!(ppu.reads, 2);
        assert_eq!(ppu.writes, 1);
    }
}
