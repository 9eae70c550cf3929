//! # Disassembler
//! メモリダンプと逆アセンブル。命令の解釈はCPUと同じオペコード表を使う。

use crate::cpu::opcodes::lookup;
use crate::cpu::Mode;

/// 1命令を逆アセンブルし、(テキスト, バイト数) を返す
///
/// `read` はアドレスからバイトを返す関数。副作用のない読み出しを渡すこと。
pub fn disassemble_one(read: impl Fn(u16) -> u8, address: u16) -> (String, u16) {
    let opcode = read(address);
    let Some(op) = lookup(opcode) else {
        return (format!(".byte ${:02X}", opcode), 1);
    };

    let byte = read(address.wrapping_add(1));
    let word = u16::from_le_bytes([byte, read(address.wrapping_add(2))]);

    let operand = match op.mode {
        Mode::Implied => String::new(),
        Mode::Accumulator => " A".to_string(),
        Mode::Immediate => format!(" #${:02X}", byte),
        Mode::ZeroPage => format!(" ${:02X}", byte),
        Mode::ZeroPageX => format!(" ${:02X},X", byte),
        Mode::ZeroPageY => format!(" ${:02X},Y", byte),
        Mode::Absolute => format!(" ${:04X}", word),
        Mode::AbsoluteX => format!(" ${:04X},X", word),
        Mode::AbsoluteY => format!(" ${:04X},Y", word),
        Mode::Indirect => format!(" (${:04X})", word),
        Mode::IndirectX => format!(" (${:02X},X)", byte),
        Mode::IndirectY => format!(" (${:02X}),Y", byte),
        Mode::Relative => {
            let target = address
                .wrapping_add(2)
                .wrapping_add_signed(byte as i8 as i16);
            format!(" ${:04X}", target)
        }
    };

    (format!("{}{}", op.mnemonic, operand), op.size())
}

/// 逆アセンブル（`start` から `count` 命令）
pub fn disassemble(read: impl Fn(u16) -> u8, start: u16, count: usize) -> Vec<(u16, String)> {
    let mut result = Vec::with_capacity(count);
    let mut pc = start;

    for _ in 0..count {
        let (text, size) = disassemble_one(&read, pc);
        result.push((pc, text));
        pc = pc.wrapping_add(size);
    }

    result
}

/// 16進ダンプ。各行の先頭は `base` からのアドレス
pub fn hex_dump(memory: &[u8], base: u16) -> String {
    let mut result = String::new();

    for (row, chunk) in memory.chunks(16).enumerate() {
        let address = base as usize + row * 16;
        result.push_str(&format!("{:04X}: ", address));

        for i in 0..16 {
            match chunk.get(i) {
                Some(b) => result.push_str(&format!("{:02X} ", b)),
                None => result.push_str("   "),
            }
            if i == 7 {
                result.push(' ');
            }
        }

        // ASCII表示
        result.push_str(" |");
        for &b in chunk {
            if b.is_ascii_graphic() || b == b' ' {
                result.push(b as char);
            } else {
                result.push('.');
            }
        }
        result.push_str("|\n");
    }

    result
}
