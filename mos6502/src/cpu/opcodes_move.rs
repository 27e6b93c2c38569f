use crate::bus::Bus;
use crate::cpu::{Cpu, StatusFlag};
use crate::opcodes::Mode;

/// The three loads move the resolved operand into their register and let
/// Z and N track it; no other flag is involved.
pub fn lda(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    cpu.a = operand;
    cpu.update_zero_and_negative_flag(cpu.a);
}

pub fn ldx(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    cpu.x = operand;
    cpu.update_zero_and_negative_flag(cpu.x);
}

pub fn ldy(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    cpu.y = operand;
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// Stores only resolve the target address, never the value behind it,
/// and leave the status register completely alone. Their cycle counts
/// are fixed, so no page penalty is passed down.
pub fn sta(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, _page_cycles: u8) {
    let address = cpu.operand_address(bus, mode, 0);
    bus.write(address, cpu.a);
}

pub fn stx(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, _page_cycles: u8) {
    let address = cpu.operand_address(bus, mode, 0);
    bus.write(address, cpu.x);
}

pub fn sty(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, _page_cycles: u8) {
    let address = cpu.operand_address(bus, mode, 0);
    bus.write(address, cpu.y);
}

// Register-to-register copies. Each costs two cycles and updates Z and N
// from the copied value, with TXS as the one exception below.

pub fn tax(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.x = cpu.a;
    cpu.update_zero_and_negative_flag(cpu.x);
}

pub fn txa(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.a = cpu.x;
    cpu.update_zero_and_negative_flag(cpu.a);
}

pub fn tay(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.y = cpu.a;
    cpu.update_zero_and_negative_flag(cpu.y);
}

pub fn tya(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.a = cpu.y;
    cpu.update_zero_and_negative_flag(cpu.a);
}

pub fn tsx(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.x = cpu.s;
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// TXS is the odd one out among the transfers: the stack pointer is not
/// an ALU destination, so no flags change.
pub fn txs(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.s = cpu.x;
}

/// PLA treats the pulled byte as an ALU result: Z and N update, which is
/// what makes PHA/PLA usable to restore A mid-routine.
pub fn pla(cpu: &mut Cpu, bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.a = cpu.pull_stack_u8(bus);
    cpu.update_zero_and_negative_flag(cpu.a);
}

pub fn pha(cpu: &mut Cpu, bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.push_stack_u8(bus, cpu.a);
}

/// Pull the status register from the stack. Bits 4 and 5 do not exist in
/// the live register: B reads back clear and the unused bit stays set.
pub fn plp(cpu: &mut Cpu, bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    let value = cpu.pull_stack_u8(bus);
    cpu.p = (value | StatusFlag::Unused as u8) & !(StatusFlag::Break as u8);
}

/// Push the status register to the stack, with B and the unused bit set
/// in the stacked copy as the hardware does.
pub fn php(cpu: &mut Cpu, bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.push_stack_u8(
        bus,
        cpu.p | StatusFlag::Break as u8 | StatusFlag::Unused as u8,
    );
}
