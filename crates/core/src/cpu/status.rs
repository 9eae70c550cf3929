//! # Status Register
//!
//! Six condition flags packed into one byte for PHP/PLP/BRK/RTI.
//! Bits 0..=5 carry the flags; bits 6 and 7 are reserved and are kept
//! verbatim so a pushed byte pops back unchanged.

pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const OVERFLOW: u8 = 0b0001_0000;
pub const NEGATIVE: u8 = 0b0010_0000;
pub const RESERVED: u8 = 0b1100_0000;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub carry: bool,
    pub zero: bool,
    pub interrupt_disable: bool,
    /// Stored and pushed, never consulted by ADC/SBC.
    pub decimal: bool,
    pub overflow: bool,
    pub negative: bool,
    reserved: u8,
}

impl Status {
    /// Flags as they are after power-on or reset.
    pub fn power_on() -> Self {
        Status {
            interrupt_disable: true,
            ..Status::default()
        }
    }

    pub fn to_byte(self) -> u8 {
        let mut byte = self.reserved & RESERVED;
        if self.carry {
            byte |= CARRY;
        }
        if self.zero {
            byte |= ZERO;
        }
        if self.interrupt_disable {
            byte |= IRQ_DISABLE;
        }
        if self.decimal {
            byte |= DECIMAL;
        }
        if self.overflow {
            byte |= OVERFLOW;
        }
        if self.negative {
            byte |= NEGATIVE;
        }
        byte
    }

    pub fn from_byte(byte: u8) -> Self {
        Status {
            carry: byte & CARRY != 0,
            zero: byte & ZERO != 0,
            interrupt_disable: byte & IRQ_DISABLE != 0,
            decimal: byte & DECIMAL != 0,
            overflow: byte & OVERFLOW != 0,
            negative: byte & NEGATIVE != 0,
            reserved: byte & RESERVED,
        }
    }

    pub fn set_zero_negative(&mut self, value: u8) {
        self.zero = value == 0;
        self.negative = value & 0b1000_0000 != 0;
    }
}
