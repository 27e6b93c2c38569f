use crate::bus::Bus;
use crate::cpu::{Cpu, StatusFlag};
use crate::opcodes::Mode;

/// ORA: accumulator |= operand, with Z and N tracking the result.
pub fn ora(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    cpu.a |= operand;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// AND: accumulator &= operand.
pub fn and(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    cpu.a &= operand;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// EOR: accumulator ^= operand.
pub fn eor(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    cpu.a ^= operand;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Shared 9-bit addition for ADC and SBC. Working in u16 space keeps the
/// carry-out visible in bit 8.
///
/// With the decimal flag set the real NMOS chip would re-interpret both
/// operands as packed BCD; that path is not implemented and the addition
/// stays binary.
fn add_impl(cpu: &mut Cpu, operand: u8) {
    let result_u16 = cpu.get_carry() as u16 + cpu.a as u16 + operand as u16;
    let result_u8 = result_u16 as u8;

    cpu.update_zero_and_negative_flag(result_u8);
    cpu.update_carry_flag(result_u16);
    cpu.update_overflow_flag(operand, result_u8);
    cpu.a = result_u8;
}

/// ADC folds the incoming carry into the sum, so multi-byte additions
/// chain one ADC per byte after an initial CLC.
pub fn adc(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    add_impl(cpu, operand);
}

/// SBC is the same adder fed the inverted operand: the carry flag stands
/// in for the +1 of the two's complement, which is why a subtraction
/// sequence starts with SEC and a clear carry means "borrow".
pub fn sbc(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    add_impl(cpu, !operand);
}

/// CMP/CPX/CPY are a subtraction with the result thrown away: C means
/// the register is >= the operand (unsigned), Z means equal, and N is
/// bit 7 of the difference. The register itself is untouched.
fn compare(cpu: &mut Cpu, register: u8, operand: u8) {
    cpu.update_zero_and_negative_flag(register.wrapping_sub(operand));
    cpu.set_status_flag(StatusFlag::Carry, register >= operand);
}

pub fn cmp(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    let register = cpu.a;
    compare(cpu, register, operand);
}

pub fn cpx(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    let register = cpu.x;
    compare(cpu, register, operand);
}

pub fn cpy(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    let register = cpu.y;
    compare(cpu, register, operand);
}

/// DEC: step a memory cell down by one, wrapping at zero.
pub fn dec(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (address, operand) = cpu.operand(bus, mode, page_cycles);
    let result = operand.wrapping_sub(1);
    cpu.update_zero_and_negative_flag(result);
    cpu.write_back(bus, address, result);
}

pub fn dex(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zero_and_negative_flag(cpu.x);
}

pub fn dey(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// INC: step a memory cell up by one, wrapping at $FF.
pub fn inc(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (address, operand) = cpu.operand(bus, mode, page_cycles);
    let result = operand.wrapping_add(1);
    cpu.update_zero_and_negative_flag(result);
    cpu.write_back(bus, address, result);
}

pub fn inx(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zero_and_negative_flag(cpu.x);
}

pub fn iny(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// ASL shifts toward bit 7; the bit that falls off the top lands in the
/// carry. Operates in place, on memory or on A depending on the mode.
pub fn asl(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (address, operand) = cpu.operand(bus, mode, page_cycles);
    cpu.set_status_flag(StatusFlag::Carry, operand & 0b1000_0000 != 0);
    let result = operand << 1;
    cpu.update_zero_and_negative_flag(result);
    cpu.write_back(bus, address, result);
}

/// ROL is ASL with the old carry fed into bit 0, making a 9-bit rotation
/// through the carry flag.
pub fn rol(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (address, operand) = cpu.operand(bus, mode, page_cycles);
    let carry_in = cpu.get_carry();
    cpu.set_status_flag(StatusFlag::Carry, operand & 0b1000_0000 != 0);
    let result = (operand << 1) | carry_in;
    cpu.update_zero_and_negative_flag(result);
    cpu.write_back(bus, address, result);
}

/// LSR shifts toward bit 0. Bit 7 is always zero afterwards, so N can
/// never end up set.
pub fn lsr(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (address, operand) = cpu.operand(bus, mode, page_cycles);
    cpu.set_status_flag(StatusFlag::Carry, operand & 0b0000_0001 != 0);
    let result = operand >> 1;
    cpu.update_zero_and_negative_flag(result);
    cpu.write_back(bus, address, result);
}

/// ROR is LSR with the old carry re-entering at bit 7, so N afterwards
/// mirrors the carry that went in.
pub fn ror(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (address, operand) = cpu.operand(bus, mode, page_cycles);
    let carry_in = cpu.get_carry();
    cpu.set_status_flag(StatusFlag::Carry, operand & 0b0000_0001 != 0);
    let result = (operand >> 1) | (carry_in << 7);
    cpu.update_zero_and_negative_flag(result);
    cpu.write_back(bus, address, result);
}
