use anyhow::{Context, Result};
use clap::Parser;
use emu6502::debugger;
use emu6502::programs::hello_world_rom;
use emu6502::system::SystemBus;
use emu6502::terminal::{self, TERMINAL_MAILBOX};
use mos6502::{Bus, Cpu};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "emu6502", about = "An emulator for the MOS 6502 with a terminal device.")]
struct CliOptions {
    /// A raw binary image to load into ROM at $8000
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Start the interactive single-step debugger
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    println!("*** 6502 EMULATOR ***");
    let options = CliOptions::parse();

    let mut bus = SystemBus::new();
    match &options.file {
        Some(path) => {
            println!("Reading binary from file '{}'...", path.display());
            let image = fs::read(path)
                .with_context(|| format!("could not read '{}'", path.display()))?;
            bus.load_rom(&image)?;
        }
        None => {
            println!("No input binary: Loading Hello World...");
            bus.load_rom(&hello_world_rom())?;
        }
    }

    // Make sure the terminal starts with an empty mailbox.
    bus.write(TERMINAL_MAILBOX, 0);

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);

    if options.debug {
        debugger::run(&mut cpu, &mut bus)?;
    } else {
        terminal::run_until_halt(&mut cpu, &mut bus, &mut io::stdout())?;
        println!("Emulator received halt command...");
    }
    Ok(())
}
