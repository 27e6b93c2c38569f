//! The interactive single-step debugger.
//!
//! Commands:
//!   n | next          execute one instruction
//!   read HHHH         dump one byte
//!   read HHHH:HHHH    dump a range, eight bytes per row
//!   stop              leave the debugger

use crate::system::SystemBus;
use crate::terminal::{self, TerminalEvent};
use anyhow::Result;
use colored::Colorize;
use mos6502::{disassemble, Bus, Cpu, CpuError};
use std::io::{self, BufRead};

pub fn run(cpu: &mut Cpu, bus: &mut SystemBus) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print_state(cpu, bus);
        let Some(line) = lines.next() else { break };
        let line = line?;
        let command = line.trim();

        if command == "n" || command == "next" {
            match cpu.step(bus) {
                Ok(_) => {}
                Err(CpuError::IllegalOpcode { opcode, pc }) => {
                    println!(
                        "{} illegal opcode {:02x} at {:04x}",
                        "error:".red().bold(),
                        opcode,
                        pc
                    );
                    continue;
                }
            }
            if terminal::poll(bus, &mut out)? == TerminalEvent::Halt {
                println!("Emulator received halt command...");
                break;
            }
        } else if command == "stop" {
            break;
        } else if let Some(arguments) = command.strip_prefix("read ") {
            read_command(bus, arguments.trim());
        } else if !command.is_empty() {
            println!("Unknown command: '{}'", command);
        }
    }
    Ok(())
}

/// Show the registers and the disassembled instruction the CPU is parked
/// on, the way the prompt looks before every command.
fn print_state(cpu: &Cpu, bus: &SystemBus) {
    let (text, _) = disassemble(bus, cpu.pc);
    println!(
        "\n{} {:04x} {} {:02x} {} {:02x} {} {:02x} {} {:02x} {} {:02x}",
        "PC:".bold(),
        cpu.pc,
        "A:".bold(),
        cpu.a,
        "X:".bold(),
        cpu.x,
        "Y:".bold(),
        cpu.y,
        "P:".bold(),
        cpu.p,
        "S:".bold(),
        cpu.s,
    );
    println!("Current Instruction: '{}'", text.cyan());
}

fn read_command(bus: &SystemBus, arguments: &str) {
    match arguments.split_once(':') {
        Some((start, stop)) => {
            match (parse_address(start), parse_address(stop)) {
                (Some(start), Some(stop)) if start < stop => print_range(bus, start, stop),
                (Some(start), Some(stop)) => println!("Bad Read: ({:04x}:{:04x})", start, stop),
                _ => println!("Bad Read: '{}'", arguments),
            };
        }
        None => match parse_address(arguments) {
            Some(address) => println!("({:04x}): {:02x}", address, bus.read(address)),
            None => println!("Bad Read: '{}'", arguments),
        },
    }
}

fn print_range(bus: &SystemBus, start: u16, stop: u16) {
    for row_start in (start..=stop).step_by(8) {
        print!("({:04x}): ", row_start);
        for address in row_start..=stop.min(row_start.saturating_add(7)) {
            print!("{:02x} ", bus.read(address));
        }
        println!();
    }
}

fn parse_address(text: &str) -> Option<u16> {
    u16::from_str_radix(text.trim(), 16).ok()
}
