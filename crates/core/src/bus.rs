//! # Memory Bus
//! Routes CPU addresses to RAM, the PPU and APU register windows, the
//! unmapped test-mode window, or the cartridge.

use crate::apu::{ApuRegisters, AudioPort};
use crate::cartridge::Cartridge;
use crate::ppu::{PpuRegisters, VideoPort};
use std::cell::RefCell;
use std::rc::Rc;

pub const RAM_SIZE: usize = 0x0800;

/// Value read back from the 0x4018-0x401F test-mode window.
pub const TEST_MODE_SENTINEL: u8 = 0xFF;

pub struct Bus {
    ram: [u8; RAM_SIZE],
    pub video: Rc<RefCell<dyn VideoPort>>,
    pub audio: Rc<RefCell<dyn AudioPort>>,
    pub cartridge: Cartridge,
}

impl Bus {
    /// Bus with register-latch stand-ins for the PPU and APU.
    pub fn new(cartridge: Cartridge) -> Self {
        Bus::with_ports(
            Rc::new(RefCell::new(PpuRegisters::new())),
            Rc::new(RefCell::new(ApuRegisters::new())),
            cartridge,
        )
    }

    pub fn with_ports(
        video: Rc<RefCell<dyn VideoPort>>,
        audio: Rc<RefCell<dyn AudioPort>>,
        cartridge: Cartridge,
    ) -> Self {
        Bus {
            ram: [0; RAM_SIZE],
            video,
            audio,
            cartridge,
        }
    }

    pub fn ram(&self) -> &[u8; RAM_SIZE] {
        &self.ram
    }

    pub fn clear_ram(&mut self) {
        self.ram = [0; RAM_SIZE];
    }

    pub fn load_ram(&mut self, image: &[u8; RAM_SIZE]) {
        self.ram = *image;
    }

    pub fn read(&mut self, address: u16) -> u8 {
        match address {
            0x0000..=0x1FFF => self.ram[ram_index(address)],
            0x2000..=0x3FFF => self.video.borrow_mut().read(video_offset(address)),
            0x4000..=0x4017 => self.audio.borrow_mut().read(audio_offset(address)),
            0x4018..=0x401F => TEST_MODE_SENTINEL,
            _ => self.cartridge.read_prg_byte(address),
        }
    }

    pub fn write(&mut self, address: u16, value: u8) {
        match address {
            0x0000..=0x1FFF => self.ram[ram_index(address)] = value,
            0x2000..=0x3FFF => self
                .video
                .borrow_mut()
                .write(video_offset(address), value),
            0x4000..=0x4017 => self
                .audio
                .borrow_mut()
                .write(audio_offset(address), value),
            0x4018..=0x401F => {} // test mode, not implemented
            _ => self.cartridge.write_prg_byte(address, value),
        }
    }

    /// Read without touching the PPU/APU; their registers have read side
    /// effects, so the I/O windows report 0 here.
    pub fn peek(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x1FFF => self.ram[ram_index(address)],
            0x2000..=0x4017 => 0,
            0x4018..=0x401F => TEST_MODE_SENTINEL,
            _ => self.cartridge.read_prg_byte(address),
        }
    }

    pub fn read_noncontinuous_word(&mut self, lo: u16, hi: u16) -> u16 {
        let lo = self.read(lo) as u16;
        let hi = self.read(hi) as u16;
        (hi << 8) | lo
    }

    pub fn read_word(&mut self, address: u16) -> u16 {
        self.read_noncontinuous_word(address, address.wrapping_add(1))
    }

    /// Pointer fetch that stays inside page zero.
    pub fn read_zero_page_word(&mut self, pointer: u8) -> u16 {
        self.read_noncontinuous_word(pointer as u16, pointer.wrapping_add(1) as u16)
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new(Cartridge::default())
    }
}

fn ram_index(address: u16) -> usize {
    (address & 0x07FF) as usize
}

fn video_offset(address: u16) -> u8 {
    (address & 0x0007) as u8
}

fn audio_offset(address: u16) -> u8 {
    (address - 0x4000) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_access() {
        let mut bus = Bus::default();
        bus.write(0x0000, 0x42);
        assert_eq!(bus.read(0x0000), 0x42);
    }

    #[test]
    fn test_ram_mirroring() {
        let mut bus = Bus::default();
        bus.write(0x0000, 0x42);
        assert_eq!(bus.read(0x0800), 0x42);
        assert_eq!(bus.read(0x1000), 0x42);
        assert_eq!(bus.read(0x1800), 0x42);

        bus.write(0x1FFF, 0x24);
        assert_eq!(bus.read(0x07FF), 0x24);
    }

    #[test]
    fn test_mirror_alias_for_every_ram_address() {
        let mut bus = Bus::default();
        for address in 0x0000..=0x1FFFu16 {
            let value = (address as u8) ^ 0x5A;
            bus.write(address, value);
            assert_eq!(bus.read(address ^ 0x0800), value, "alias of {:#06x}", address);
        }
    }

    #[test]
    fn test_cartridge_write_leaves_ram_alone() {
        let mut bus = Bus::new(Cartridge::ram());
        bus.write(0x6000, 0x99);
        assert_eq!(bus.read(0x6000), 0x99);
        assert!(bus.ram().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_test_mode_window() {
        let mut bus = Bus::new(Cartridge::ram());
        for address in 0x4018..=0x401Fu16 {
            bus.write(address, 0x00);
            assert_eq!(bus.read(address), TEST_MODE_SENTINEL);
        }
        assert!(bus.ram().iter().all(|&b| b == 0));
        assert_eq!(bus.read(0x4020), 0);
    }

    #[test]
    fn test_video_window_forwarding() {
        let ppu = Rc::new(RefCell::new(PpuRegisters::new()));
        let apu = Rc::new(RefCell::new(ApuRegisters::new()));
        let mut bus = Bus::with_ports(ppu.clone(), apu.clone(), Cartridge::rom());

        bus.write(0x2006, 0x3F);
        assert_eq!(ppu.borrow().register(6), 0x3F);
        // 0x3FFE mirrors 0x2006
        assert_eq!(bus.read(0x3FFE), 0x3F);
        bus.write(0x2008, 0x80);
        assert_eq!(ppu.borrow().register(0), 0x80);
        assert_eq!(apu.borrow().writes, 0);
    }

    #[test]
    fn test_audio_window_forwarding() {
        let ppu = Rc::new(RefCell::new(PpuRegisters::new()));
        let apu = Rc::new(RefCell::new(ApuRegisters::new()));
        let mut bus = Bus::with_ports(ppu.clone(), apu.clone(), Cartridge::rom());

        bus.write(0x4015, 0x1F);
        bus.write(0x4017, 0x40);
        assert_eq!(apu.borrow().register(0x15), 0x1F);
        assert_eq!(apu.borrow().register(0x17), 0x40);
        assert_eq!(bus.read(0x4015), 0x1F);
        assert_eq!(ppu.borrow().writes, 0);
    }

    #[test]
    fn test_peek_has_no_side_effects() {
        let ppu = Rc::new(RefCell::new(PpuRegisters::new()));
        let apu = Rc::new(RefCell::new(ApuRegisters::new()));
        let mut bus = Bus::with_ports(ppu.clone(), apu.clone(), Cartridge::ram());
        bus.write(0x0010, 0x77);
        bus.write(0x8000, 0x88);

        assert_eq!(bus.peek(0x0810), 0x77);
        assert_eq!(bus.peek(0x8000), 0x88);
        assert_eq!(bus.peek(0x2002), 0);
        assert_eq!(bus.peek(0x4016), 0);
        assert_eq!(bus.peek(0x401A), TEST_MODE_SENTINEL);
        assert_eq!(ppu.borrow().reads, 0);
        assert_eq!(apu.borrow().reads, 0);
    }

    #[test]
    fn test_zero_page_word_wraps() {
        let mut bus = Bus::default();
        bus.write(0x00FF, 0x34);
        bus.write(0x0000, 0x12);
        bus.write(0x0100, 0xEE);
        assert_eq!(bus.read_zero_page_word(0xFF), 0x1234);
        assert_eq!(bus.read_word(0x00FF), 0xEE34);
    }
}
