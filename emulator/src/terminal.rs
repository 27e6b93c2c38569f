//! The only I/O device of the reference machine: a write-only terminal
//! driven through a mailbox byte.
//!
//! A program stages a NUL-terminated string at $4000, then writes a
//! command to the mailbox at $40FF. The host polls the mailbox between
//! instructions, so from the program's point of view the device reacts
//! after the store completes.

use crate::system::SystemBus;
use anyhow::{Context, Result};
use mos6502::{Bus, Cpu};
use std::io::Write;

/// The start of the string buffer the print command emits.
pub const TERMINAL_BUFFER: u16 = 0x4000;
/// The mailbox the CPU writes commands to.
pub const TERMINAL_MAILBOX: u16 = 0x40FF;

/// Emit the staged buffer.
pub const COMMAND_PRINT: u8 = 0xAA;
/// Terminate the emulation.
pub const COMMAND_HALT: u8 = 0xBB;

#[derive(Debug, PartialEq, Eq)]
pub enum TerminalEvent {
    Idle,
    Printed,
    Halt,
}

/// Check the mailbox once, acknowledging whatever command is present by
/// clearing it.
pub fn poll(bus: &mut SystemBus, out: &mut dyn Write) -> Result<TerminalEvent> {
    let command = bus.read(TERMINAL_MAILBOX);
    bus.write(TERMINAL_MAILBOX, 0);
    match command {
        COMMAND_PRINT => {
            let mut text = Vec::new();
            let mut address = TERMINAL_BUFFER;
            while address < TERMINAL_MAILBOX {
                let byte = bus.read(address);
                if byte == 0 {
                    break;
                }
                text.push(byte);
                address += 1;
            }
            writeln!(out, "{}", String::from_utf8_lossy(&text))
                .context("failed to write terminal output")?;
            Ok(TerminalEvent::Printed)
        }
        COMMAND_HALT => Ok(TerminalEvent::Halt),
        _ => Ok(TerminalEvent::Idle),
    }
}

/// Free-run the machine: step the CPU and service the terminal until the
/// program asks to halt. Program output goes to `out`.
pub fn run_until_halt(cpu: &mut Cpu, bus: &mut SystemBus, out: &mut dyn Write) -> Result<()> {
    loop {
        cpu.step(bus).context("emulation stopped")?;
        if poll(bus, out)? == TerminalEvent::Halt {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn print_command_emits_the_buffer_and_clears_the_mailbox() {
        let mut bus = SystemBus::new();
        for (index, byte) in b"hi\0".iter().enumerate() {
            bus.write(TERMINAL_BUFFER + index as u16, *byte);
        }
        bus.write(TERMINAL_MAILBOX, COMMAND_PRINT);

        let mut out = Vec::new();
        assert_eq!(poll(&mut bus, &mut out).unwrap(), TerminalEvent::Printed);
        assert_eq!(out, b"hi\n");
        assert_eq!(bus.read(TERMINAL_MAILBOX), 0);
    }

    #[test]
    fn an_empty_mailbox_is_idle() {
        let mut bus = SystemBus::new();
        let mut out = Vec::new();
        assert_eq!(poll(&mut bus, &mut out).unwrap(), TerminalEvent::Idle);
        assert!(out.is_empty());
    }

    #[test]
    fn halt_command_is_reported() {
        let mut bus = SystemBus::new();
        bus.write(TERMINAL_MAILBOX, COMMAND_HALT);
        let mut out = Vec::new();
        assert_eq!(poll(&mut bus, &mut out).unwrap(), TerminalEvent::Halt);
    }
}
