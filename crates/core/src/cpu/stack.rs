//! Stack page traffic. S wraps inside page one in both directions; the
//! chip has no overflow detection and neither do we.

use super::{Cpu, STACK_PAGE};

impl Cpu {
    pub fn push_byte(&mut self, value: u8) {
        let address = STACK_PAGE | self.sp as u16;
        self.bus.write(address, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub fn pop_byte(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let address = STACK_PAGE | self.sp as u16;
        self.bus.read(address)
    }

    /// High byte first, so the word sits little-endian in memory.
    pub fn push_word(&mut self, value: u16) {
        self.push_byte((value >> 8) as u8);
        self.push_byte(value as u8);
    }

    pub fn pop_word(&mut self) -> u16 {
        let lo = self.pop_byte() as u16;
        let hi = self.pop_byte() as u16;
        (hi << 8) | lo
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::test_cpu;

    #[test]
    fn test_push_pop_byte() {
        let mut cpu = test_cpu(&[]);
        cpu.push_byte(0xAB);
        assert_eq!(cpu.sp(), 0xFC);
        assert_eq!(cpu.bus.read(0x01FD), 0xAB);
        assert_eq!(cpu.pop_byte(), 0xAB);
        assert_eq!(cpu.sp(), 0xFD);
    }

    #[test]
    fn test_word_round_trip() {
        let mut cpu = test_cpu(&[]);
        for word in [0x0000u16, 0x00FF, 0x1234, 0x8000, 0xFFFF] {
            let sp = cpu.sp();
            cpu.push_word(word);
            assert_eq!(cpu.pop_word(), word);
            assert_eq!(cpu.sp(), sp);
        }
    }

    #[test]
    fn test_word_layout() {
        let mut cpu = test_cpu(&[]);
        cpu.push_word(0x1234);
        assert_eq!(cpu.bus.read(0x01FD), 0x12);
        assert_eq!(cpu.bus.read(0x01FC), 0x34);
    }

    #[test]
    fn test_wraps_within_page() {
        let mut cpu = test_cpu(&[]);
        cpu.set_sp(0x00);
        cpu.push_byte(0x11);
        cpu.push_byte(0x22);
        assert_eq!(cpu.sp(), 0xFE);
        assert_eq!(cpu.bus.read(0x0100), 0x11);
        assert_eq!(cpu.bus.read(0x01FF), 0x22);

        assert_eq!(cpu.pop_byte(), 0x22);
        assert_eq!(cpu.pop_byte(), 0x11);
        assert_eq!(cpu.sp(), 0x00);

        cpu.set_sp(0xFF);
        cpu.push_word(0xBEEF);
        assert_eq!(cpu.pop_word(), 0xBEEF);
        assert_eq!(cpu.sp(), 0xFF);
    }
}
