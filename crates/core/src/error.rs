//! エラー型の定義

use thiserror::Error;

/// CPUコアのエラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unimplemented opcode {opcode:#04x} at {address:#06x}")]
    UnimplementedOpcode { opcode: u8, address: u16 },

    #[error("CPU halted on opcode {opcode:#04x} at {address:#06x}; reset required")]
    Halted { opcode: u8, address: u16 },

    #[error("Program of {len} bytes does not fit at {address:#06x}")]
    ProgramTooLarge { address: u16, len: usize },

    #[error("Address {address:#06x} is outside the cartridge window")]
    ProgramOutOfRange { address: u16 },

    #[error("Snapshot RAM image is {0} bytes, expected 2048")]
    InvalidSnapshot(usize),
}

/// Result型のエイリアス
pub type Result<T> = std::result::Result<T, CoreError>;
