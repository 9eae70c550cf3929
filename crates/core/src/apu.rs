//! # Audio / IO port
//! Registers 0x4000-0x4017: the APU channels, OAM DMA, and the two
//! controller ports all live in this window.

/// Register interface of the audio subsystem.
///
/// `offset` is `address - 0x4000`, in 0x00..=0x17.
pub trait AudioPort {
    fn read(&mut self, offset: u8) -> u8;
    fn write(&mut self, offset: u8, value: u8);
}

pub const APU_REGISTER_COUNT: usize = 0x18;

/// Plain register latch standing in for the APU and controller ports.
#[derive(Debug, Clone, Default)]
pub struct ApuRegisters {
    registers: [u8; APU_REGISTER_COUNT],
    pub reads: u64,
    pub writes: u64,
}

impl ApuRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, offset: u8) -> u8 {
        self.registers
            .get(offset as usize)
            .copied()
            .unwrap_or_default()
    }
}

impl AudioPort for ApuRegisters {
    fn read(&mut self, offset: u8) -> u8 {
        self.reads += 1;
        self.register(offset)
    }

    fn write(&mut self, offset: u8, value: u8) {
        self.writes += 1;
        if let Some(slot) = self.registers.get_mut(offset as usize) {
            *slot = value;
        }
    }
}
