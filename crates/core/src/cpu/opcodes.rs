//! # Opcode table
//!
//! 256 entries indexed by opcode byte. The 151 documented NMOS
//! instructions have an entry; every other byte is `None` and halts the
//! CPU when fetched.

use super::{Cpu, Mode};
use std::fmt;

pub type Handler = fn(&mut Cpu, Mode);

#[derive(Copy, Clone)]
pub struct Opcode {
    pub mnemonic: &'static str,
    pub mode: Mode,
    pub execute: Handler,
}

impl Opcode {
    /// Opcode byte plus operands.
    pub fn size(&self) -> u16 {
        1 + self.mode.operand_len()
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opcode")
            .field("mnemonic", &self.mnemonic)
            .field("mode", &self.mode)
            .finish()
    }
}

pub static OPCODES: [Option<Opcode>; 256] = build_table();

pub fn lookup(opcode: u8) -> Option<&'static Opcode> {
    OPCODES[opcode as usize].as_ref()
}

const fn op(mnemonic: &'static str, mode: Mode, execute: Handler) -> Option<Opcode> {
    Some(Opcode {
        mnemonic,
        mode,
        execute,
    })
}

const fn build_table() -> [Option<Opcode>; 256] {
    use Mode::*;

    let mut t: [Option<Opcode>; 256] = [None; 256];

    // Loads
    t[0xa9] = op("LDA", Immediate, Cpu::lda);
    t[0xa5] = op("LDA", ZeroPage, Cpu::lda);
    t[0xb5] = op("LDA", ZeroPageX, Cpu::lda);
    t[0xad] = op("LDA", Absolute, Cpu::lda);
    t[0xbd] = op("LDA", AbsoluteX, Cpu::lda);
    t[0xb9] = op("LDA", AbsoluteY, Cpu::lda);
    t[0xa1] = op("LDA", IndirectX, Cpu::lda);
    t[0xb1] = op("LDA", IndirectY, Cpu::lda);

    t[0xa2] = op("LDX", Immediate, Cpu::ldx);
    t[0xa6] = op("LDX", ZeroPage, Cpu::ldx);
    t[0xb6] = op("LDX", ZeroPageY, Cpu::ldx);
    t[0xae] = op("LDX", Absolute, Cpu::ldx);
    t[0xbe] = op("LDX", AbsoluteY, Cpu::ldx);

    t[0xa0] = op("LDY", Immediate, Cpu::ldy);
    t[0xa4] = op("LDY", ZeroPage, Cpu::ldy);
    t[0xb4] = op("LDY", ZeroPageX, Cpu::ldy);
    t[0xac] = op("LDY", Absolute, Cpu::ldy);
    t[0xbc] = op("LDY", AbsoluteX, Cpu::ldy);

    // Stores
    t[0x85] = op("STA", ZeroPage, Cpu::sta);
    t[0x95] = op("STA", ZeroPageX, Cpu::sta);
    t[0x8d] = op("STA", Absolute, Cpu::sta);
    t[0x9d] = op("STA", AbsoluteX, Cpu::sta);
    t[0x99] = op("STA", AbsoluteY, Cpu::sta);
    t[0x81] = op("STA", IndirectX, Cpu::sta);
    t[0x91] = op("STA", IndirectY, Cpu::sta);

    t[0x86] = op("STX", ZeroPage, Cpu::stx);
    t[0x96] = op("STX", ZeroPageY, Cpu::stx);
    t[0x8e] = op("STX", Absolute, Cpu::stx);

    t[0x84] = op("STY", ZeroPage, Cpu::sty);
    t[0x94] = op("STY", ZeroPageX, Cpu::sty);
    t[0x8c] = op("STY", Absolute, Cpu::sty);

    // Arithmetic
    t[0x69] = op("ADC", Immediate, Cpu::adc);
    t[0x65] = op("ADC", ZeroPage, Cpu::adc);
    t[0x75] = op("ADC", ZeroPageX, Cpu::adc);
    t[0x6d] = op("ADC", Absolute, Cpu::adc);
    t[0x7d] = op("ADC", AbsoluteX, Cpu::adc);
    t[0x79] = op("ADC", AbsoluteY, Cpu::adc);
    t[0x61] = op("ADC", IndirectX, Cpu::adc);
    t[0x71] = op("ADC", IndirectY, Cpu::adc);

    t[0xe9] = op("SBC", Immediate, Cpu::sbc);
    t[0xe5] = op("SBC", ZeroPage, Cpu::sbc);
    t[0xf5] = op("SBC", ZeroPageX, Cpu::sbc);
    t[0xed] = op("SBC", Absolute, Cpu::sbc);
    t[0xfd] = op("SBC", AbsoluteX, Cpu::sbc);
    t[0xf9] = op("SBC", AbsoluteY, Cpu::sbc);
    t[0xe1] = op("SBC", IndirectX, Cpu::sbc);
    t[0xf1] = op("SBC", IndirectY, Cpu::sbc);

    // Comparisons
    t[0xc9] = op("CMP", Immediate, Cpu::cmp);
    t[0xc5] = op("CMP", ZeroPage, Cpu::cmp);
    t[0xd5] = op("CMP", ZeroPageX, Cpu::cmp);
    t[0xcd] = op("CMP", Absolute, Cpu::cmp);
    t[0xdd] = op("CMP", AbsoluteX, Cpu::cmp);
    t[0xd9] = op("CMP", AbsoluteY, Cpu::cmp);
    t[0xc1] = op("CMP", IndirectX, Cpu::cmp);
    t[0xd1] = op("CMP", IndirectY, Cpu::cmp);

    t[0xe0] = op("CPX", Immediate, Cpu::cpx);
    t[0xe4] = op("CPX", ZeroPage, Cpu::cpx);
    t[0xec] = op("CPX", Absolute, Cpu::cpx);

    t[0xc0] = op("CPY", Immediate, Cpu::cpy);
    t[0xc4] = op("CPY", ZeroPage, Cpu::cpy);
    t[0xcc] = op("CPY", Absolute, Cpu::cpy);

    // Bitwise operations
    t[0x29] = op("AND", Immediate, Cpu::and);
    t[0x25] = op("AND", ZeroPage, Cpu::and);
    t[0x35] = op("AND", ZeroPageX, Cpu::and);
    t[0x2d] = op("AND", Absolute, Cpu::and);
    t[0x3d] = op("AND", AbsoluteX, Cpu::and);
    t[0x39] = op("AND", AbsoluteY, Cpu::and);
    t[0x21] = op("AND", IndirectX, Cpu::and);
    t[0x31] = op("AND", IndirectY, Cpu::and);

    t[0x09] = op("ORA", Immediate, Cpu::ora);
    t[0x05] = op("ORA", ZeroPage, Cpu::ora);
    t[0x15] = op("ORA", ZeroPageX, Cpu::ora);
    t[0x0d] = op("ORA", Absolute, Cpu::ora);
    t[0x1d] = op("ORA", AbsoluteX, Cpu::ora);
    t[0x19] = op("ORA", AbsoluteY, Cpu::ora);
    t[0x01] = op("ORA", IndirectX, Cpu::ora);
    t[0x11] = op("ORA", IndirectY, Cpu::ora);

    t[0x49] = op("EOR", Immediate, Cpu::eor);
    t[0x45] = op("EOR", ZeroPage, Cpu::eor);
    t[0x55] = op("EOR", ZeroPageX, Cpu::eor);
    t[0x4d] = op("EOR", Absolute, Cpu::eor);
    t[0x5d] = op("EOR", AbsoluteX, Cpu::eor);
    t[0x59] = op("EOR", AbsoluteY, Cpu::eor);
    t[0x41] = op("EOR", IndirectX, Cpu::eor);
    t[0x51] = op("EOR", IndirectY, Cpu::eor);

    t[0x24] = op("BIT", ZeroPage, Cpu::bit);
    t[0x2c] = op("BIT", Absolute, Cpu::bit);

    // Shifts and rotates
    t[0x0a] = op("ASL", Accumulator, Cpu::asl);
    t[0x06] = op("ASL", ZeroPage, Cpu::asl);
    t[0x16] = op("ASL", ZeroPageX, Cpu::asl);
    t[0x0e] = op("ASL", Absolute, Cpu::asl);
    t[0x1e] = op("ASL", AbsoluteX, Cpu::asl);

    t[0x4a] = op("LSR", Accumulator, Cpu::lsr);
    t[0x46] = op("LSR", ZeroPage, Cpu::lsr);
    t[0x56] = op("LSR", ZeroPageX, Cpu::lsr);
    t[0x4e] = op("LSR", Absolute, Cpu::lsr);
    t[0x5e] = op("LSR", AbsoluteX, Cpu::lsr);

    t[0x2a] = op("ROL", Accumulator, Cpu::rol);
    t[0x26] = op("ROL", ZeroPage, Cpu::rol);
    t[0x36] = op("ROL", ZeroPageX, Cpu::rol);
    t[0x2e] = op("ROL", Absolute, Cpu::rol);
    t[0x3e] = op("ROL", AbsoluteX, Cpu::rol);

    t[0x6a] = op("ROR", Accumulator, Cpu::ror);
    t[0x66] = op("ROR", ZeroPage, Cpu::ror);
    t[0x76] = op("ROR", ZeroPageX, Cpu::ror);
    t[0x6e] = op("ROR", Absolute, Cpu::ror);
    t[0x7e] = op("ROR", AbsoluteX, Cpu::ror);

    // Increments and decrements
    t[0xe6] = op("INC", ZeroPage, Cpu::inc);
    t[0xf6] = op("INC", ZeroPageX, Cpu::inc);
    t[0xee] = op("INC", Absolute, Cpu::inc);
    t[0xfe] = op("INC", AbsoluteX, Cpu::inc);

    t[0xc6] = op("DEC", ZeroPage, Cpu::dec);
    t[0xd6] = op("DEC", ZeroPageX, Cpu::dec);
    t[0xce] = op("DEC", Absolute, Cpu::dec);
    t[0xde] = op("DEC", AbsoluteX, Cpu::dec);

    t[0xe8] = op("INX", Implied, Cpu::inx);
    t[0xca] = op("DEX", Implied, Cpu::dex);
    t[0xc8] = op("INY", Implied, Cpu::iny);
    t[0x88] = op("DEY", Implied, Cpu::dey);

    // Register moves
    t[0xaa] = op("TAX", Implied, Cpu::tax);
    t[0xa8] = op("TAY", Implied, Cpu::tay);
    t[0x8a] = op("TXA", Implied, Cpu::txa);
    t[0x98] = op("TYA", Implied, Cpu::tya);
    t[0x9a] = op("TXS", Implied, Cpu::txs);
    t[0xba] = op("TSX", Implied, Cpu::tsx);

    // Flag operations
    t[0x18] = op("CLC", Implied, Cpu::clc);
    t[0x38] = op("SEC", Implied, Cpu::sec);
    t[0x58] = op("CLI", Implied, Cpu::cli);
    t[0x78] = op("SEI", Implied, Cpu::sei);
    t[0xb8] = op("CLV", Implied, Cpu::clv);
    t[0xd8] = op("CLD", Implied, Cpu::cld);
    t[0xf8] = op("SED", Implied, Cpu::sed);

    // Branches
    t[0x10] = op("BPL", Relative, Cpu::bpl);
    t[0x30] = op("BMI", Relative, Cpu::bmi);
    t[0x50] = op("BVC", Relative, Cpu::bvc);
    t[0x70] = op("BVS", Relative, Cpu::bvs);
    t[0x90] = op("BCC", Relative, Cpu::bcc);
    t[0xb0] = op("BCS", Relative, Cpu::bcs);
    t[0xd0] = op("BNE", Relative, Cpu::bne);
    t[0xf0] = op("BEQ", Relative, Cpu::beq);

    // Jumps
    t[0x4c] = op("JMP", Absolute, Cpu::jmp);
    t[0x6c] = op("JMP", Indirect, Cpu::jmp);

    // Procedure calls
    t[0x20] = op("JSR", Absolute, Cpu::jsr);
    t[0x60] = op("RTS", Implied, Cpu::rts);
    t[0x00] = op("BRK", Implied, Cpu::brk);
    t[0x40] = op("RTI", Implied, Cpu::rti);

    // Stack operations
    t[0x48] = op("PHA", Implied, Cpu::pha);
    t[0x68] = op("PLA", Implied, Cpu::pla);
    t[0x08] = op("PHP", Implied, Cpu::php);
    t[0x28] = op("PLP", Implied, Cpu::plp);

    // No operation
    t[0xea] = op("NOP", Implied, Cpu::nop);

    t
}
