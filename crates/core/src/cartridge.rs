//! # Cartridge
//! Flat storage behind the 0x4020-0xFFFF window. No bank switching:
//! every CPU address in the window maps to one fixed byte.

use crate::error::{CoreError, Result};

pub const CARTRIDGE_START: u16 = 0x4020;
pub const CARTRIDGE_SIZE: usize = 0x1_0000 - CARTRIDGE_START as usize;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

#[derive(Debug, Clone)]
pub struct Cartridge {
    prg: Vec<u8>,
    writable: bool,
}

impl Cartridge {
    /// Read-only cartridge, zero filled.
    pub fn rom() -> Self {
        Cartridge {
            prg: vec![0; CARTRIDGE_SIZE],
            writable: false,
        }
    }

    /// Cartridge that accepts CPU writes anywhere in the window.
    pub fn ram() -> Self {
        Cartridge {
            prg: vec![0; CARTRIDGE_SIZE],
            writable: true,
        }
    }

    pub fn read_prg_byte(&self, addr: u16) -> u8 {
        match index(addr) {
            Some(i) => self.prg[i],
            None => 0,
        }
    }

    /// CPU-side write. Dropped when the cartridge is ROM.
    pub fn write_prg_byte(&mut self, addr: u16, value: u8) {
        if !self.writable {
            log::trace!("Ignored write to ROM: ${:04X} = ${:02X}", addr, value);
            return;
        }
        if let Some(i) = index(addr) {
            self.prg[i] = value;
        }
    }

    /// Places `data` at `addr`, bypassing write protection.
    pub fn load(&mut self, addr: u16, data: &[u8]) -> Result<()> {
        let start = index(addr).ok_or(CoreError::ProgramOutOfRange { address: addr })?;
        let end = start
            .checked_add(data.len())
            .filter(|&end| end <= CARTRIDGE_SIZE)
            .ok_or(CoreError::ProgramTooLarge {
                address: addr,
                len: data.len(),
            })?;
        self.prg[start..end].copy_from_slice(data);
        Ok(())
    }

    /// Writes a little-endian vector (NMI, reset or IRQ/BRK).
    pub fn set_vector(&mut self, vector: u16, target: u16) -> Result<()> {
        self.load(vector, &target.to_le_bytes())
    }

    pub fn vector(&self, vector: u16) -> u16 {
        let lo = self.read_prg_byte(vector) as u16;
        let hi = self.read_prg_byte(vector.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

impl Default for Cartridge {
    fn default() -> Self {
        Self::rom()
    }
}

fn index(addr: u16) -> Option<usize> {
    addr.checked_sub(CARTRIDGE_START).map(usize::from)
}
