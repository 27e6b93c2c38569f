use crate::bus::Bus;
use crate::constants::InterruptVectors;
use crate::cpu::{Cpu, StatusFlag};
use crate::opcodes::Mode;

/// Branches cost 2 cycles untaken, 3 taken, and 4 when the taken branch
/// lands on a different page than the instruction that follows it.
fn branch(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8, taken: bool) {
    if taken {
        let address = cpu.operand_address(bus, mode, page_cycles);
        cpu.add_branch_cycle();
        cpu.pc = address;
    } else {
        // Move the pc past the operand without charging any penalty.
        cpu.operand_address(bus, mode, 0);
    }
}

/// BPL: taken while the last result was positive (N clear).
pub fn bpl(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let taken = !cpu.is_status_flag_set(StatusFlag::Negative);
    branch(cpu, bus, mode, page_cycles, taken);
}

/// BMI: taken while the last result was negative (N set).
pub fn bmi(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let taken = cpu.is_status_flag_set(StatusFlag::Negative);
    branch(cpu, bus, mode, page_cycles, taken);
}

/// BVC: taken with the overflow flag clear.
pub fn bvc(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let taken = !cpu.is_status_flag_set(StatusFlag::Overflow);
    branch(cpu, bus, mode, page_cycles, taken);
}

/// BVS: taken with the overflow flag set.
pub fn bvs(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let taken = cpu.is_status_flag_set(StatusFlag::Overflow);
    branch(cpu, bus, mode, page_cycles, taken);
}

/// BCC: taken with the carry clear.
pub fn bcc(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let taken = !cpu.is_status_flag_set(StatusFlag::Carry);
    branch(cpu, bus, mode, page_cycles, taken);
}

/// BCS: taken with the carry set.
pub fn bcs(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let taken = cpu.is_status_flag_set(StatusFlag::Carry);
    branch(cpu, bus, mode, page_cycles, taken);
}

/// BNE: taken while the zero flag is clear.
pub fn bne(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let taken = !cpu.is_status_flag_set(StatusFlag::Zero);
    branch(cpu, bus, mode, page_cycles, taken);
}

/// BEQ: taken while the zero flag is set.
pub fn beq(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let taken = cpu.is_status_flag_set(StatusFlag::Zero);
    branch(cpu, bus, mode, page_cycles, taken);
}

/// Software interrupt. The byte after the opcode is padding, so the
/// stacked return address is BRK+2; the stacked status copy carries B set
/// to distinguish it from a hardware interrupt.
pub fn brk(cpu: &mut Cpu, bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    let return_address = cpu.pc.wrapping_add(1);
    cpu.push_stack_u16(bus, return_address);
    cpu.push_stack_u8(
        bus,
        cpu.p | StatusFlag::Break as u8 | StatusFlag::Unused as u8,
    );
    cpu.set_status_flag(StatusFlag::InterruptDisable, true);
    cpu.pc = bus.read_word(InterruptVectors::IrqBrkVector as u16);
}

/// Return from interrupt: restore the status register, then the program
/// counter. Unlike RTS there is no +1 on the restored address.
pub fn rti(cpu: &mut Cpu, bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    let value = cpu.pull_stack_u8(bus);
    cpu.p = (value | StatusFlag::Unused as u8) & !(StatusFlag::Break as u8);
    cpu.pc = cpu.pull_stack_u16(bus);
}

/// Jump to subroutine. The stacked address is the last byte of the JSR
/// instruction itself; RTS compensates with its +1.
pub fn jsr(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, _page_cycles: u8) {
    let address = cpu.operand_address(bus, mode, 0);
    cpu.push_stack_u16(bus, cpu.pc.wrapping_sub(1));
    cpu.pc = address;
}

/// Return from subroutine.
pub fn rts(cpu: &mut Cpu, bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.pc = cpu.pull_stack_u16(bus).wrapping_add(1);
}

/// Jump, either to a literal address or through a pointer.
pub fn jmp(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, _page_cycles: u8) {
    cpu.pc = cpu.operand_address(bus, mode, 0);
}

/// Bit test: the operand's top bits land in N and V, the zero flag
/// reflects the mask against A. A itself is untouched.
pub fn bit(cpu: &mut Cpu, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) {
    let (_, operand) = cpu.operand(bus, mode, page_cycles);
    cpu.set_status_flag(StatusFlag::Negative, operand & 0b1000_0000 != 0);
    cpu.set_status_flag(StatusFlag::Overflow, operand & 0b0100_0000 != 0);
    cpu.set_status_flag(StatusFlag::Zero, cpu.a & operand == 0);
}

/// CLC drops the carry ahead of an addition chain.
pub fn clc(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.set_status_flag(StatusFlag::Carry, false);
}

/// SEC raises the carry, the conventional prelude to SBC.
pub fn sec(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.set_status_flag(StatusFlag::Carry, true);
}

/// CLD leaves ADC/SBC in binary mode.
pub fn cld(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.set_status_flag(StatusFlag::Decimal, false);
}

/// SED requests BCD arithmetic (not implemented here; see add_impl).
pub fn sed(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.set_status_flag(StatusFlag::Decimal, true);
}

/// CLI lets pending IRQs through again.
pub fn cli(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.set_status_flag(StatusFlag::InterruptDisable, false);
}

/// SEI masks IRQs; NMIs are unaffected.
pub fn sei(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.set_status_flag(StatusFlag::InterruptDisable, true);
}

/// CLV is the only direct way to clear V; no SEV exists.
pub fn clv(cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {
    cpu.set_status_flag(StatusFlag::Overflow, false);
}

/// No operation.
pub fn nop(_cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {}
