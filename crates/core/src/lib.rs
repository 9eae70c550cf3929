//! # NES CPU Core
//! 6502 (2A03) instruction interpreter and the CPU memory bus.
//! The PPU and APU are reached only through `VideoPort` / `AudioPort`.

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod disasm;
pub mod error;
pub mod ppu;
pub mod snapshot;

pub use apu::{ApuRegisters, AudioPort};
pub use bus::Bus;
pub use cartridge::Cartridge;
pub use cpu::{Cpu, RunState, Status};
pub use error::{CoreError, Result};
pub use ppu::{PpuRegisters, VideoPort};
pub use snapshot::CpuSnapshot;

use cartridge::RESET_VECTOR;

/// `Machine::run` が止まった理由
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// ステップ数の上限に達した
    StepLimit,
    /// 外部の停止条件が成立した
    Stopped,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub steps: u64,
    pub reason: StopReason,
}

/// CPUとバスをまとめた実行単位
pub struct Machine {
    cpu: Cpu,
}

impl Machine {
    /// 新しいインスタンスを作成（リセット済み）
    pub fn new(cartridge: Cartridge) -> Self {
        Self::from_bus(Bus::new(cartridge))
    }

    pub fn from_bus(bus: Bus) -> Self {
        let mut cpu = Cpu::new(bus);
        cpu.reset();
        Self { cpu }
    }

    /// プログラムを `origin` に配置してリセット
    ///
    /// `entry` を指定するとリセットベクタを上書きする。指定がなく、
    /// イメージがベクタを含まない場合は `origin` から実行する。
    pub fn load_program(&mut self, origin: u16, program: &[u8], entry: Option<u16>) -> Result<()> {
        let cartridge = &mut self.cpu.bus.cartridge;
        cartridge.load(origin, program)?;

        match entry {
            Some(entry) => cartridge.set_vector(RESET_VECTOR, entry)?,
            None if cartridge.vector(RESET_VECTOR) == 0 => {
                cartridge.set_vector(RESET_VECTOR, origin)?
            }
            None => {}
        }

        log::info!(
            "Loaded {} bytes at ${:04X}, reset vector ${:04X}",
            program.len(),
            origin,
            cartridge.vector(RESET_VECTOR)
        );
        self.cpu.reset();
        Ok(())
    }

    /// システムをリセット
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// 1命令実行
    pub fn step(&mut self) -> Result<()> {
        self.cpu.step()
    }

    /// 停止条件が成立するか `max_steps` に達するまで実行
    ///
    /// `should_stop` は各命令の後に評価される。未実装オペコードは
    /// エラーとして呼び出し側に返す。
    pub fn run<F>(&mut self, max_steps: Option<u64>, mut should_stop: F) -> Result<RunReport>
    where
        F: FnMut(&Cpu) -> bool,
    {
        let mut steps = 0;
        loop {
            if max_steps.is_some_and(|max| steps >= max) {
                return Ok(RunReport {
                    steps,
                    reason: StopReason::StepLimit,
                });
            }

            self.cpu.step()?;
            steps += 1;

            if should_stop(&self.cpu) {
                return Ok(RunReport {
                    steps,
                    reason: StopReason::Stopped,
                });
            }
        }
    }

    /// CPU状態の取得（デバッグ用）
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// CPU RAMを読み取り (0x0000-0x07FF, 2KB)
    pub fn read_ram(&self) -> &[u8; bus::RAM_SIZE] {
        self.cpu.bus.ram()
    }

    /// 任意のCPUメモリアドレスを読み取り（PPU/APUレジスタは0）
    pub fn peek_memory(&self, address: u16) -> u8 {
        self.cpu.bus.peek(address)
    }

    /// メモリ範囲を読み取り
    pub fn read_memory_range(&self, start: u16, length: usize) -> Vec<u8> {
        (0..length)
            .map(|i| self.peek_memory(start.wrapping_add(i as u16)))
            .collect()
    }

    /// メモリダンプを16進数文字列で取得
    pub fn hex_dump(&self, start: u16, length: usize) -> String {
        disasm::hex_dump(&self.read_memory_range(start, length), start)
    }

    /// 逆アセンブル
    pub fn disassemble(&self, start: u16, count: usize) -> Vec<(u16, String)> {
        disasm::disassemble(|address| self.peek_memory(address), start, count)
    }

    /// 現在のPCから逆アセンブル
    pub fn disassemble_at_pc(&self, count: usize) -> Vec<(u16, String)> {
        self.disassemble(self.cpu.pc(), count)
    }

    pub fn snapshot(&self) -> CpuSnapshot {
        self.cpu.snapshot()
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(Cartridge::default())
    }
}
