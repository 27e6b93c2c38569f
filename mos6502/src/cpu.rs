use crate::bus::Bus;
use crate::constants::{InterruptVectors, STACK_PAGE};
use crate::opcodes::{
    Mode, ADDRESSING_MODE_TABLE, CYCLES_TABLE, OPERATION_FN_TABLE, PAGE_CYCLES_TABLE,
};
use thiserror::Error;

pub mod opcodes_jump;
pub mod opcodes_logical;
pub mod opcodes_move;

#[cfg(test)]
pub(crate) mod test_helpers;


/// Status register value after a reset: only the hardwired bit 5 and the
/// interrupt-disable flag are set. The decimal flag is explicitly clear.
pub const RESET_STATUS_FLAG: u8 = 0b0010_0100;

/// Stack pointer value after a reset. The real chip performs three
/// phantom pushes during its reset sequence, leaving S at $FD.
pub const RESET_STACK_POINTER: u8 = 0xFD;

#[rustfmt::skip]
#[derive(Clone, Copy)]
pub enum StatusFlag {
    Carry            = 0b00000001,
    Zero             = 0b00000010,
    InterruptDisable = 0b00000100,
    Decimal          = 0b00001000,
    Break            = 0b00010000,
    Unused           = 0b00100000,
    Overflow         = 0b01000000,
    Negative         = 0b10000000,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// Decode found no documented instruction for the fetched byte. The
    /// program counter is left pointing at the offending opcode.
    #[error("illegal opcode {opcode:#04x} at {pc:#06x}")]
    IllegalOpcode { opcode: u8, pc: u16 },
}

/// This struct implements the MOS Technology 6502 central processing unit.
///
/// http://www.6502.org/
/// https://en.wikipedia.org/wiki/MOS_Technology_6502
///
/// The CPU owns nothing but its registers; every memory access goes
/// through the [`Bus`] handle passed into each call, so multiple
/// independent CPUs can coexist and hosts decide what the address space
/// contains.
pub struct Cpu {
    /// "A" register - The accumulator. Typical results of operations are
    /// stored here.
    pub a: u8,
    /// "X" index register.
    pub x: u8,
    /// "Y" index register.
    pub y: u8,
    /// "PC" - Program counter. 16 bits of directly addressable memory.
    pub pc: u16,
    /// "S" - Stack pointer. The stack is a 256-byte array hardcoded to
    /// page 1 ($0100-$01FF) and grows downwards. S points at the next
    /// free slot.
    pub s: u8,
    /// "P" - Status register.
    ///
    ///   7  bit  0
    /// ---- ----
    /// NVss DIZC
    /// |||| ||||
    /// |||| |||+- Carry
    /// |||| ||+-- Zero
    /// |||| |+--- Interrupt Disable
    /// |||| +---- Decimal
    /// ||++------ No CPU effect, see: the B flag
    /// |+-------- Overflow
    /// +--------- Negative
    pub p: u8,
    /// Cycles consumed by the instruction currently being executed.
    /// Page-cross and branch penalties accumulate here on top of the
    /// base count from the cycle table.
    cycles: u32,
    pending_irq: bool,
    pending_nmi: bool,
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            s: RESET_STACK_POINTER,
            p: RESET_STATUS_FLAG,
            cycles: 0,
            pending_irq: false,
            pending_nmi: false,
        }
    }

    /// Put the CPU into its power-on state and jump through the reset
    /// vector at $FFFC. A, X and Y are left untouched; programs and tests
    /// that care about them initialize them explicitly.
    pub fn reset(&mut self, bus: &mut dyn Bus) {
        self.s = RESET_STACK_POINTER;
        self.set_status_flag(StatusFlag::InterruptDisable, true);
        self.set_status_flag(StatusFlag::Decimal, false);
        self.set_status_flag(StatusFlag::Unused, true);
        self.pending_irq = false;
        self.pending_nmi = false;
        self.pc = bus.read_word(InterruptVectors::ResetVector as u16);
    }

    /// Request a maskable interrupt. The request stays pending until a
    /// `step` boundary finds the interrupt-disable flag clear.
    pub fn irq(&mut self) {
        self.pending_irq = true;
    }

    /// Request a non-maskable interrupt, honored at the next `step`
    /// boundary regardless of the interrupt-disable flag.
    pub fn nmi(&mut self) {
        self.pending_nmi = true;
    }

    /// Fetch, decode and execute a single instruction, returning the
    /// number of clock cycles it would have consumed on real hardware.
    ///
    /// Interrupts are sampled here, between instructions: a step that
    /// services one performs the 7-cycle interrupt entry and nothing
    /// else.
    pub fn step(&mut self, bus: &mut dyn Bus) -> Result<u32, CpuError> {
        if self.pending_nmi {
            self.pending_nmi = false;
            return Ok(self.interrupt(bus, InterruptVectors::NonMaskableInterrupt as u16));
        }
        if self.pending_irq && !self.is_status_flag_set(StatusFlag::InterruptDisable) {
            self.pending_irq = false;
            return Ok(self.interrupt(bus, InterruptVectors::IrqBrkVector as u16));
        }

        let start_pc = self.pc;
        let opcode = self.next_u8(bus);
        let opcode_index = opcode as usize;

        let base_cycles = CYCLES_TABLE[opcode_index];
        if base_cycles == 0 {
            // Leave the program counter on the offending byte so the
            // caller can report or inspect it.
            self.pc = start_pc;
            return Err(CpuError::IllegalOpcode {
                opcode,
                pc: start_pc,
            });
        }

        self.cycles = base_cycles as u32;
        let mode = ADDRESSING_MODE_TABLE[opcode_index];
        let page_cycles = PAGE_CYCLES_TABLE[opcode_index];
        OPERATION_FN_TABLE[opcode_index](self, bus, mode, page_cycles);

        Ok(self.cycles)
    }

    /// Stacked-state entry shared by IRQ and NMI: the return address and
    /// the status register (with B clear) go onto the stack, further IRQs
    /// are masked, and execution continues through the vector.
    fn interrupt(&mut self, bus: &mut dyn Bus, vector: u16) -> u32 {
        self.push_stack_u16(bus, self.pc);
        self.push_stack_u8(
            bus,
            (self.p | StatusFlag::Unused as u8) & !(StatusFlag::Break as u8),
        );
        self.set_status_flag(StatusFlag::InterruptDisable, true);
        self.pc = bus.read_word(vector);
        7
    }

    /// Increment the program counter and read the next u8 value following
    /// the current pc.
    pub(crate) fn next_u8(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Increment the program counter and read the next u16 value following
    /// the current pc.
    pub(crate) fn next_u16(&mut self, bus: &mut dyn Bus) -> u16 {
        let value = bus.read_word(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    /// Resolve an addressing mode to the effective address the
    /// instruction operates on, consuming the operand bytes at the
    /// program counter. `page_cycles` is charged when indexing carries
    /// into the address high byte.
    pub(crate) fn operand_address(&mut self, bus: &mut dyn Bus, mode: Mode, page_cycles: u8) -> u16 {
        match mode {
            Mode::Absolute => self.next_u16(bus),
            Mode::AbsoluteX => {
                let base = self.next_u16(bus);
                let address = base.wrapping_add(self.x as u16);
                self.incur_extra_cycle_on_page_boundary(base, address, page_cycles);
                address
            }
            Mode::AbsoluteY => {
                let base = self.next_u16(bus);
                let address = base.wrapping_add(self.y as u16);
                self.incur_extra_cycle_on_page_boundary(base, address, page_cycles);
                address
            }
            Mode::Immediate => {
                let address = self.pc;
                self.pc = self.pc.wrapping_add(1);
                address
            }
            // JMP (abs) reproduces the hardware quirk: the pointer high
            // byte is fetched without carrying into the pointer's page,
            // so ($10FF) reads its high byte from $1000.
            Mode::Indirect => {
                let pointer = self.next_u16(bus);
                let low = bus.read(pointer);
                let high = bus.read((pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF));
                u16::from_le_bytes([low, high])
            }
            // The pointer and its neighbor both live in page zero; the
            // index wraps before the dereference.
            Mode::IndirectX => {
                let pointer = self.next_u8(bus).wrapping_add(self.x);
                let low = bus.read(pointer as u16);
                let high = bus.read(pointer.wrapping_add(1) as u16);
                u16::from_le_bytes([low, high])
            }
            Mode::IndirectY => {
                let pointer = self.next_u8(bus);
                let low = bus.read(pointer as u16);
                let high = bus.read(pointer.wrapping_add(1) as u16);
                let base = u16::from_le_bytes([low, high]);
                let address = base.wrapping_add(self.y as u16);
                self.incur_extra_cycle_on_page_boundary(base, address, page_cycles);
                address
            }
            // The offset is signed and taken from the program counter
            // after the operand fetch; that is also the page the branch
            // penalty compares against.
            Mode::Relative => {
                let offset = self.next_u8(bus) as i8;
                let base = self.pc;
                let address = base.wrapping_add(offset as u16);
                self.incur_extra_cycle_on_page_boundary(base, address, page_cycles);
                address
            }
            Mode::ZeroPage => self.next_u8(bus) as u16,
            Mode::ZeroPageX => self.next_u8(bus).wrapping_add(self.x) as u16,
            Mode::ZeroPageY => self.next_u8(bus).wrapping_add(self.y) as u16,
            Mode::Implied | Mode::RegisterA | Mode::None => {
                unreachable!("mode {:?} has no operand address", mode)
            }
        }
    }

    /// Resolve the operand an instruction reads, along with the address
    /// it came from. Accumulator-mode instructions get `None` for the
    /// address and the value of A.
    pub(crate) fn operand(
        &mut self,
        bus: &mut dyn Bus,
        mode: Mode,
        page_cycles: u8,
    ) -> (Option<u16>, u8) {
        if mode == Mode::RegisterA {
            return (None, self.a);
        }
        let address = self.operand_address(bus, mode, page_cycles);
        let value = bus.read(address);
        (Some(address), value)
    }

    /// Store the result of a read-modify-write instruction back where its
    /// operand came from.
    pub(crate) fn write_back(&mut self, bus: &mut dyn Bus, address: Option<u16>, value: u8) {
        match address {
            Some(address) => bus.write(address, value),
            None => self.a = value,
        }
    }

    pub(crate) fn incur_extra_cycle_on_page_boundary(
        &mut self,
        base_address: u16,
        offset_address: u16,
        extra_cycles: u8,
    ) {
        if base_address & 0xFF00 != offset_address & 0xFF00 {
            self.cycles += extra_cycles as u32;
        }
    }

    pub(crate) fn add_branch_cycle(&mut self) {
        self.cycles += 1;
    }

    /// These flags are commonly set together.
    pub(crate) fn update_zero_and_negative_flag(&mut self, value: u8) {
        self.set_status_flag(StatusFlag::Zero, value == 0);
        self.set_status_flag(StatusFlag::Negative, value & 0b1000_0000 != 0);
    }

    /// ADC and SBC operate on 9 bits: register A plus the carry flag.
    /// Store the 9th bit of the result back into the carry.
    pub(crate) fn update_carry_flag(&mut self, result: u16) {
        self.set_status_flag(StatusFlag::Carry, result > 0xFF);
    }

    /// Signed overflow for ADC and SBC: the operands agreed on a sign and
    /// the result disagrees with them.
    /// e.g. 0b0111_1111 + 0b0000_0001 = 0b1000_0000
    ///        |             |             |
    ///        positive      positive      negative result
    pub(crate) fn update_overflow_flag(&mut self, operand: u8, result: u8) {
        let overflow = (!(self.a ^ operand) & (self.a ^ result)) & 0b1000_0000 != 0;
        self.set_status_flag(StatusFlag::Overflow, overflow);
    }

    pub(crate) fn set_status_flag(&mut self, status_flag: StatusFlag, value: bool) {
        if value {
            self.p |= status_flag as u8;
        } else {
            self.p &= !(status_flag as u8);
        }
    }

    pub fn is_status_flag_set(&self, status_flag: StatusFlag) -> bool {
        self.p & status_flag as u8 != 0
    }

    /// The carry flag as 0 or 1, ready for 9-bit arithmetic.
    pub(crate) fn get_carry(&self) -> u8 {
        self.p & StatusFlag::Carry as u8
    }

    /// Push one byte at `$0100 | S`, then grow the stack downwards. The
    /// pointer wraps silently inside page 1, as the hardware does.
    pub(crate) fn push_stack_u8(&mut self, bus: &mut dyn Bus, value: u8) {
        let address = u16::from_le_bytes([self.s, STACK_PAGE]);
        bus.write(address, value);
        self.s = self.s.wrapping_sub(1);
    }

    /// The stack pointer points at free space; step back over it first,
    /// then read the byte being pulled.
    pub(crate) fn pull_stack_u8(&mut self, bus: &mut dyn Bus) -> u8 {
        self.s = self.s.wrapping_add(1);
        let address = u16::from_le_bytes([self.s, STACK_PAGE]);
        bus.read(address)
    }

    /// Words are pushed high byte first so they read back little-endian.
    pub(crate) fn push_stack_u16(&mut self, bus: &mut dyn Bus, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push_stack_u8(bus, high);
        self.push_stack_u8(bus, low);
    }

    pub(crate) fn pull_stack_u16(&mut self, bus: &mut dyn Bus) -> u16 {
        let low = self.pull_stack_u8(bus);
        let high = self.pull_stack_u8(bus);
        u16::from_le_bytes([low, high])
    }
}
