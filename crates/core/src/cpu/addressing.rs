//! # Addressing modes
//!
//! Each mode consumes the operand bytes after the opcode, low byte first,
//! advancing PC once per byte.

use super::Cpu;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// JMP only.
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl Mode {
    /// Operand bytes following the opcode.
    pub fn operand_len(self) -> u16 {
        match self {
            Mode::Implied | Mode::Accumulator => 0,
            Mode::Immediate
            | Mode::ZeroPage
            | Mode::ZeroPageX
            | Mode::ZeroPageY
            | Mode::IndirectX
            | Mode::IndirectY
            | Mode::Relative => 1,
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
        }
    }
}

impl Cpu {
    pub(super) fn next_byte(&mut self) -> u8 {
        let value = self.bus.read(self.pc);
        self.increment_pc();
        value
    }

    pub(super) fn next_word(&mut self) -> u16 {
        let lo = self.next_byte() as u16;
        let hi = self.next_byte() as u16;
        (hi << 8) | lo
    }

    pub(super) fn increment_pc(&mut self) {
        self.pc = self.pc.wrapping_add(1);
    }

    /// Effective address for `mode`. Immediate yields the operand's own
    /// address; Relative yields the branch target.
    pub(super) fn operand_address(&mut self, mode: Mode) -> u16 {
        match mode {
            Mode::Immediate => {
                let original_pc = self.pc;
                self.increment_pc();
                original_pc
            }
            Mode::ZeroPage => self.next_byte() as u16,
            Mode::ZeroPageX => {
                let base = self.next_byte();
                base.wrapping_add(self.x) as u16
            }
            Mode::ZeroPageY => {
                let base = self.next_byte();
                base.wrapping_add(self.y) as u16
            }
            Mode::Absolute => self.next_word(),
            Mode::AbsoluteX => {
                let base = self.next_word();
                base.wrapping_add(self.x as u16)
            }
            Mode::AbsoluteY => {
                let base = self.next_word();
                base.wrapping_add(self.y as u16)
            }
            Mode::Indirect => {
                // NMOS parts never carry into the pointer's high byte.
                let pointer = self.next_word();
                let hi = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
                self.bus.read_noncontinuous_word(pointer, hi)
            }
            Mode::IndirectX => {
                let pointer = self.next_byte().wrapping_add(self.x);
                self.bus.read_zero_page_word(pointer)
            }
            Mode::IndirectY => {
                let pointer = self.next_byte();
                let base = self.bus.read_zero_page_word(pointer);
                base.wrapping_add(self.y as u16)
            }
            Mode::Relative => {
                let offset = self.next_byte() as i8;
                self.pc.wrapping_add_signed(offset as i16)
            }
            Mode::Implied | Mode::Accumulator => {
                unreachable!("{:?} has no operand address", mode)
            }
        }
    }

    pub(super) fn read_operand(&mut self, mode: Mode) -> u8 {
        let address = self.operand_address(mode);
        self.bus.read(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::test_cpu;

    fn resolve(operands: &[u8], mode: Mode) -> (u16, u16) {
        let mut cpu = test_cpu(operands);
        cpu.x = 0x10;
        cpu.y = 0x20;
        let address = cpu.operand_address(mode);
        (address, cpu.pc() - 0x8000)
    }

    #[test]
    fn test_immediate() {
        assert_eq!(resolve(&[0x42], Mode::Immediate), (0x8000, 1));
    }

    #[test]
    fn test_zero_page_modes() {
        assert_eq!(resolve(&[0x80], Mode::ZeroPage), (0x0080, 1));
        assert_eq!(resolve(&[0x80], Mode::ZeroPageX), (0x0090, 1));
        assert_eq!(resolve(&[0x80], Mode::ZeroPageY), (0x00A0, 1));
        // wraps inside page zero
        assert_eq!(resolve(&[0xF8], Mode::ZeroPageX), (0x0008, 1));
        assert_eq!(resolve(&[0xF0], Mode::ZeroPageY), (0x0010, 1));
    }

    #[test]
    fn test_absolute_modes() {
        assert_eq!(resolve(&[0x34, 0x12], Mode::Absolute), (0x1234, 2));
        assert_eq!(resolve(&[0x34, 0x12], Mode::AbsoluteX), (0x1244, 2));
        assert_eq!(resolve(&[0x34, 0x12], Mode::AbsoluteY), (0x1254, 2));
        assert_eq!(resolve(&[0xF8, 0xFF], Mode::AbsoluteX), (0x0008, 2));
    }

    #[test]
    fn test_indirect_y() {
        let mut cpu = test_cpu(&[0x40]);
        cpu.bus.write(0x0040, 0xF0);
        cpu.bus.write(0x0041, 0x02);
        cpu.y = 0x20;
        assert_eq!(cpu.operand_address(Mode::IndirectY), 0x0310);
        assert_eq!(cpu.pc(), 0x8001);
    }

    #[test]
    fn test_indirect_y_pointer_wraps_in_page_zero() {
        let mut cpu = test_cpu(&[0xFF]);
        cpu.bus.write(0x00FF, 0x00);
        cpu.bus.write(0x0000, 0x03);
        cpu.bus.write(0x0100, 0x07);
        assert_eq!(cpu.operand_address(Mode::IndirectY), 0x0300);
    }

    #[test]
    fn test_indirect_x() {
        let mut cpu = test_cpu(&[0x3F]);
        cpu.x = 0x01;
        cpu.bus.write(0x0040, 0x00);
        cpu.bus.write(0x0041, 0x06);
        assert_eq!(cpu.operand_address(Mode::IndirectX), 0x0600);

        let mut cpu = test_cpu(&[0xFF]);
        cpu.x = 0x01;
        cpu.bus.write(0x0000, 0x21);
        cpu.bus.write(0x0001, 0x43);
        assert_eq!(cpu.operand_address(Mode::IndirectX), 0x4321);
    }

    #[test]
    fn test_indirect_page_wrap() {
        let mut cpu = test_cpu(&[0xFF, 0x02]);
        cpu.bus.write(0x02FF, 0x34);
        cpu.bus.write(0x0200, 0x12);
        cpu.bus.write(0x0300, 0x99);
        assert_eq!(cpu.operand_address(Mode::Indirect), 0x1234);
        assert_eq!(cpu.pc(), 0x8002);
    }

    #[test]
    fn test_relative() {
        assert_eq!(resolve(&[0x05], Mode::Relative), (0x8006, 1));
        assert_eq!(resolve(&[0xFE], Mode::Relative), (0x7FFF, 1));
    }

    #[test]
    fn test_operand_len() {
        assert_eq!(Mode::Implied.operand_len(), 0);
        assert_eq!(Mode::Accumulator.operand_len(), 0);
        assert_eq!(Mode::IndirectY.operand_len(), 1);
        assert_eq!(Mode::Relative.operand_len(), 1);
        assert_eq!(Mode::Indirect.operand_len(), 2);
    }
}
