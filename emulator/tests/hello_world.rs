//! End-to-end test of the reference machine: the built-in Hello World
//! image runs from reset to the halt command, printing through the
//! terminal mailbox exactly once.

use emu6502::programs::{hello_world_rom, HELLO_WORLD_ENTRY};
use emu6502::system::SystemBus;
use emu6502::terminal::{self, TERMINAL_MAILBOX};
use mos6502::{Bus, Cpu};

fn fresh_machine() -> (Cpu, SystemBus) {
    let mut bus = SystemBus::new();
    bus.load_rom(&hello_world_rom()).unwrap();
    bus.write(TERMINAL_MAILBOX, 0);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    (cpu, bus)
}

#[test]
fn reset_jumps_to_the_program_entry() {
    let (cpu, _) = fresh_machine();
    assert_eq!(cpu.pc, HELLO_WORLD_ENTRY);
}

#[test]
fn hello_world_prints_once_and_halts() {
    let (mut cpu, mut bus) = fresh_machine();
    let mut out = Vec::new();
    terminal::run_until_halt(&mut cpu, &mut bus, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Hello World!\n");
}

#[test]
fn the_string_lands_in_the_terminal_buffer() {
    let (mut cpu, mut bus) = fresh_machine();
    let mut out = Vec::new();
    terminal::run_until_halt(&mut cpu, &mut bus, &mut out).unwrap();
    let copied: Vec<u8> = (0..12).map(|i| bus.read(0x4000 + i)).collect();
    assert_eq!(copied, b"Hello World!");
}
