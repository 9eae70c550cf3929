//! # NES CPU CLI
//!
//! 機械語プログラムをカートリッジ領域に配置して実行するフロントエンド

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;
use nes_cpu::{Cartridge, Machine, StopReason};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 6502 interpreter CLI
#[derive(Parser, Debug)]
#[command(name = "nes_cpu_cli")]
#[command(about = "Runs a raw 6502 program against the NES CPU memory map", long_about = None)]
struct Args {
    /// プログラムイメージのパス（生バイナリ）
    #[arg(value_name = "PROGRAM")]
    program: PathBuf,

    /// 配置先アドレス（16進）
    #[arg(short, long, default_value = "8000", value_parser = parse_hex)]
    origin: u16,

    /// リセットベクタを上書きする開始アドレス（16進）
    #[arg(short, long, value_parser = parse_hex)]
    entry: Option<u16>,

    /// 実行する最大命令数
    #[arg(short, long)]
    max_steps: Option<u64>,

    /// 命令ごとのトレースを出力
    #[arg(short, long)]
    trace: bool,

    /// カートリッジ領域への書き込みを許可
    #[arg(short, long)]
    writable_cartridge: bool,

    /// PCが変化しない命令（自己ジャンプ）で停止
    #[arg(long)]
    stop_on_loop: bool,

    /// 終了時のCPU状態をJSONで書き出す（`-` で標準出力）
    #[arg(long, value_name = "FILE")]
    dump_state: Option<PathBuf>,

    /// 終了時にメモリをダンプ（START:LEN、16進）
    #[arg(long, value_name = "START:LEN", value_parser = parse_range)]
    dump_ram: Option<(u16, usize)>,

    /// 未実装オペコードでの停止をエラーにしない
    #[arg(long)]
    allow_halt: bool,
}

fn parse_hex(s: &str) -> Result<u16> {
    let digits = s
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .trim_start_matches('$');
    u16::from_str_radix(digits, 16).with_context(|| format!("invalid hex address: {s}"))
}

fn parse_range(s: &str) -> Result<(u16, usize)> {
    let Some((start, len)) = s.split_once(':') else {
        bail!("expected START:LEN, got {s}");
    };
    let len = usize::from_str_radix(len.trim_start_matches("0x"), 16)
        .with_context(|| format!("invalid hex length: {len}"))?;
    Ok((parse_hex(start)?, len))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.trace {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    // プログラムの読み込み
    let program = std::fs::read(&args.program)
        .with_context(|| format!("failed to read {}", args.program.display()))?;
    log::info!("Loaded program: {:?}", args.program);

    let cartridge = if args.writable_cartridge {
        Cartridge::ram()
    } else {
        Cartridge::rom()
    };
    let mut machine = Machine::new(cartridge);
    machine
        .load_program(args.origin, &program, args.entry)
        .context("failed to place program")?;

    log::info!("Starting at ${:04X}", machine.cpu().pc());

    let mut last_pc = machine.cpu().pc();
    let stop_on_loop = args.stop_on_loop;
    let outcome = machine.run(args.max_steps, |cpu| {
        let stuck = stop_on_loop && cpu.pc() == last_pc;
        last_pc = cpu.pc();
        stuck
    });

    match &outcome {
        Ok(report) => match report.reason {
            StopReason::StepLimit => log::info!("Step limit reached after {} steps", report.steps),
            StopReason::Stopped => log::info!(
                "Loop detected at ${:04X} after {} steps",
                machine.cpu().pc(),
                report.steps
            ),
        },
        Err(e) if args.allow_halt => log::warn!("{}", e),
        Err(e) => log::error!("{}", e),
    }

    let cpu = machine.cpu();
    log::info!(
        "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} PC:{:04X}",
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.status(),
        cpu.sp(),
        cpu.pc()
    );

    if let Some(path) = &args.dump_state {
        write_state(&machine, path)?;
    }

    if let Some((start, len)) = args.dump_ram {
        print!("{}", machine.hex_dump(start, len));
    }

    match outcome {
        Err(e) if !args.allow_halt => Err(anyhow::Error::new(e).context("emulation stopped")),
        _ => Ok(()),
    }
}

fn write_state(machine: &Machine, path: &Path) -> Result<()> {
    let snapshot = machine.snapshot();
    if path.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &snapshot)?;
        writeln!(out)?;
    } else {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &snapshot)?;
        log::info!("State written to {:?}", path);
    }
    Ok(())
}
