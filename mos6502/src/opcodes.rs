use crate::cpu::opcodes_jump::*;
use crate::cpu::opcodes_logical::*;
use crate::cpu::opcodes_move::*;
use crate::cpu::Cpu;
use crate::bus::Bus;

/// The thirteen documented addressing modes, plus `None` for the table
/// slots that belong to undocumented opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Absolute,  // $c000
    AbsoluteX, // $c000, X
    AbsoluteY, // $c000, Y
    Immediate, // #$0a
    Implied,
    Indirect,  // ($c000) - JMP only
    IndirectX, // ($20, X)
    IndirectY, // ($20), Y
    Relative,  // branch offsets
    RegisterA, // ASL/LSR/ROL/ROR on the accumulator
    ZeroPage,  // $10
    ZeroPageX, // $10, X
    ZeroPageY, // $10, Y - LDX/STX only
    None,
}

/// How many operand bytes follow the opcode byte for a mode. Instruction
/// length is one more than this.
pub fn mode_operand_count(mode: Mode) -> u16 {
    match mode {
        Mode::Implied | Mode::RegisterA | Mode::None => 0,
        Mode::Immediate
        | Mode::IndirectX
        | Mode::IndirectY
        | Mode::Relative
        | Mode::ZeroPage
        | Mode::ZeroPageX
        | Mode::ZeroPageY => 1,
        Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
    }
}

/// Find the opcode byte that encodes a mnemonic with a given addressing
/// mode, if the 6502 documents one. A linear scan of the decode tables is
/// plenty fast for assembly-time use and keeps a single source of truth.
pub fn opcode_for(mnemonic: &str, mode: Mode) -> Option<u8> {
    (0u8..=0xff).find(|&opcode| {
        MNEMONIC_TABLE[opcode as usize] == mnemonic
            && ADDRESSING_MODE_TABLE[opcode as usize] == mode
    })
}

pub type OperationFn = fn(&mut Cpu, &mut dyn Bus, Mode, u8);

/// Filler for undocumented opcode slots. Never invoked: `Cpu::step`
/// refuses an opcode whose base cycle count is zero before dispatching.
fn illegal(_cpu: &mut Cpu, _bus: &mut dyn Bus, _mode: Mode, _page_cycles: u8) {}

/// Base cycle counts per opcode. A zero marks an undocumented opcode;
/// every documented instruction costs at least two cycles.
pub const CYCLES_TABLE: [u8; 256] = [
    7, 6, 0, 0, 0, 3, 5, 0, 3, 2, 2, 0, 0, 4, 6, 0,
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
    6, 6, 0, 0, 3, 3, 5, 0, 4, 2, 2, 0, 4, 4, 6, 0,
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
    6, 6, 0, 0, 0, 3, 5, 0, 3, 2, 2, 0, 3, 4, 6, 0,
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
    6, 6, 0, 0, 0, 3, 5, 0, 4, 2, 2, 0, 5, 4, 6, 0,
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
    0, 6, 0, 0, 3, 3, 3, 0, 2, 0, 2, 0, 4, 4, 4, 0,
    2, 6, 0, 0, 4, 4, 4, 0, 2, 5, 2, 0, 0, 5, 0, 0,
    2, 6, 2, 0, 3, 3, 3, 0, 2, 2, 2, 0, 4, 4, 4, 0,
    2, 5, 0, 0, 4, 4, 4, 0, 2, 4, 2, 0, 4, 4, 4, 0,
    2, 6, 0, 0, 3, 3, 5, 0, 2, 2, 2, 0, 4, 4, 6, 0,
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
    2, 6, 0, 0, 3, 3, 5, 0, 2, 2, 2, 0, 4, 4, 6, 0,
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0,
];

/// One extra cycle is charged when these instructions index across a
/// 256-byte page boundary (`abs,X` / `abs,Y` / `(zp),Y` reads, and taken
/// branches via the relative mode).
pub const PAGE_CYCLES_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 1, 1, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0,
];

pub const ADDRESSING_MODE_TABLE: [Mode; 256] = [
    Mode::Implied, Mode::IndirectX, Mode::None, Mode::None,
    Mode::None, Mode::ZeroPage, Mode::ZeroPage, Mode::None,
    Mode::Implied, Mode::Immediate, Mode::RegisterA, Mode::None,
    Mode::None, Mode::Absolute, Mode::Absolute, Mode::None,
    Mode::Relative, Mode::IndirectY, Mode::None, Mode::None,
    Mode::None, Mode::ZeroPageX, Mode::ZeroPageX, Mode::None,
    Mode::Implied, Mode::AbsoluteY, Mode::None, Mode::None,
    Mode::None, Mode::AbsoluteX, Mode::AbsoluteX, Mode::None,
    Mode::Absolute, Mode::IndirectX, Mode::None, Mode::None,
    Mode::ZeroPage, Mode::ZeroPage, Mode::ZeroPage, Mode::None,
    Mode::Implied, Mode::Immediate, Mode::RegisterA, Mode::None,
    Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::None,
    Mode::Relative, Mode::IndirectY, Mode::None, Mode::None,
    Mode::None, Mode::ZeroPageX, Mode::ZeroPageX, Mode::None,
    Mode::Implied, Mode::AbsoluteY, Mode::None, Mode::None,
    Mode::None, Mode::AbsoluteX, Mode::AbsoluteX, Mode::None,
    Mode::Implied, Mode::IndirectX, Mode::None, Mode::None,
    Mode::None, Mode::ZeroPage, Mode::ZeroPage, Mode::None,
    Mode::Implied, Mode::Immediate, Mode::RegisterA, Mode::None,
    Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::None,
    Mode::Relative, Mode::IndirectY, Mode::None, Mode::None,
    Mode::None, Mode::ZeroPageX, Mode::ZeroPageX, Mode::None,
    Mode::Implied, Mode::AbsoluteY, Mode::None, Mode::None,
    Mode::None, Mode::AbsoluteX, Mode::AbsoluteX, Mode::None,
    Mode::Implied, Mode::IndirectX, Mode::None, Mode::None,
    Mode::None, Mode::ZeroPage, Mode::ZeroPage, Mode::None,
    Mode::Implied, Mode::Immediate, Mode::RegisterA, Mode::None,
    Mode::Indirect, Mode::Absolute, Mode::Absolute, Mode::None,
    Mode::Relative, Mode::IndirectY, Mode::None, Mode::None,
    Mode::None, Mode::ZeroPageX, Mode::ZeroPageX, Mode::None,
    Mode::Implied, Mode::AbsoluteY, Mode::None, Mode::None,
    Mode::None, Mode::AbsoluteX, Mode::AbsoluteX, Mode::None,
    Mode::None, Mode::IndirectX, Mode::None, Mode::None,
    Mode::ZeroPage, Mode::ZeroPage, Mode::ZeroPage, Mode::None,
    Mode::Implied, Mode::None, Mode::Implied, Mode::None,
    Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::None,
    Mode::Relative, Mode::IndirectY, Mode::None, Mode::None,
    Mode::ZeroPageX, Mode::ZeroPageX, Mode::ZeroPageY, Mode::None,
    Mode::Implied, Mode::AbsoluteY, Mode::Implied, Mode::None,
    Mode::None, Mode::AbsoluteX, Mode::None, Mode::None,
    Mode::Immediate, Mode::IndirectX, Mode::Immediate, Mode::None,
    Mode::ZeroPage, Mode::ZeroPage, Mode::ZeroPage, Mode::None,
    Mode::Implied, Mode::Immediate, Mode::Implied, Mode::None,
    Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::None,
    Mode::Relative, Mode::IndirectY, Mode::None, Mode::None,
    Mode::ZeroPageX, Mode::ZeroPageX, Mode::ZeroPageY, Mode::None,
    Mode::Implied, Mode::AbsoluteY, Mode::Implied, Mode::None,
    Mode::AbsoluteX, Mode::AbsoluteX, Mode::AbsoluteY, Mode::None,
    Mode::Immediate, Mode::IndirectX, Mode::None, Mode::None,
    Mode::ZeroPage, Mode::ZeroPage, Mode::ZeroPage, Mode::None,
    Mode::Implied, Mode::Immediate, Mode::Implied, Mode::None,
    Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::None,
    Mode::Relative, Mode::IndirectY, Mode::None, Mode::None,
    Mode::None, Mode::ZeroPageX, Mode::ZeroPageX, Mode::None,
    Mode::Implied, Mode::AbsoluteY, Mode::None, Mode::None,
    Mode::None, Mode::AbsoluteX, Mode::AbsoluteX, Mode::None,
    Mode::Immediate, Mode::IndirectX, Mode::None, Mode::None,
    Mode::ZeroPage, Mode::ZeroPage, Mode::ZeroPage, Mode::None,
    Mode::Implied, Mode::Immediate, Mode::Implied, Mode::None,
    Mode::Absolute, Mode::Absolute, Mode::Absolute, Mode::None,
    Mode::Relative, Mode::IndirectY, Mode::None, Mode::None,
    Mode::None, Mode::ZeroPageX, Mode::ZeroPageX, Mode::None,
    Mode::Implied, Mode::AbsoluteY, Mode::None, Mode::None,
    Mode::None, Mode::AbsoluteX, Mode::AbsoluteX, Mode::None,
];

/// Upper-case mnemonics for the disassembler. Empty strings mark
/// undocumented opcodes.
pub const MNEMONIC_TABLE: [&str; 256] = [
    "BRK", "ORA", "", "", "", "ORA", "ASL", "",
    "PHP", "ORA", "ASL", "", "", "ORA", "ASL", "",
    "BPL", "ORA", "", "", "", "ORA", "ASL", "",
    "CLC", "ORA", "", "", "", "ORA", "ASL", "",
    "JSR", "AND", "", "", "BIT", "AND", "ROL", "",
    "PLP", "AND", "ROL", "", "BIT", "AND", "ROL", "",
    "BMI", "AND", "", "", "", "AND", "ROL", "",
    "SEC", "AND", "", "", "", "AND", "ROL", "",
    "RTI", "EOR", "", "", "", "EOR", "LSR", "",
    "PHA", "EOR", "LSR", "", "JMP", "EOR", "LSR", "",
    "BVC", "EOR", "", "", "", "EOR", "LSR", "",
    "CLI", "EOR", "", "", "", "EOR", "LSR", "",
    "RTS", "ADC", "", "", "", "ADC", "ROR", "",
    "PLA", "ADC", "ROR", "", "JMP", "ADC", "ROR", "",
    "BVS", "ADC", "", "", "", "ADC", "ROR", "",
    "SEI", "ADC", "", "", "", "ADC", "ROR", "",
    "", "STA", "", "", "STY", "STA", "STX", "",
    "DEY", "", "TXA", "", "STY", "STA", "STX", "",
    "BCC", "STA", "", "", "STY", "STA", "STX", "",
    "TYA", "STA", "TXS", "", "", "STA", "", "",
    "LDY", "LDA", "LDX", "", "LDY", "LDA", "LDX", "",
    "TAY", "LDA", "TAX", "", "LDY", "LDA", "LDX", "",
    "BCS", "LDA", "", "", "LDY", "LDA", "LDX", "",
    "CLV", "LDA", "TSX", "", "LDY", "LDA", "LDX", "",
    "CPY", "CMP", "", "", "CPY", "CMP", "DEC", "",
    "INY", "CMP", "DEX", "", "CPY", "CMP", "DEC", "",
    "BNE", "CMP", "", "", "", "CMP", "DEC", "",
    "CLD", "CMP", "", "", "", "CMP", "DEC", "",
    "CPX", "SBC", "", "", "CPX", "SBC", "INC", "",
    "INX", "SBC", "NOP", "", "CPX", "SBC", "INC", "",
    "BEQ", "SBC", "", "", "", "SBC", "INC", "",
    "SED", "SBC", "", "", "", "SBC", "INC", "",
];

pub const OPERATION_FN_TABLE: [OperationFn; 256] = [
    brk, ora, illegal, illegal, illegal, ora, asl, illegal,
    php, ora, asl, illegal, illegal, ora, asl, illegal,
    bpl, ora, illegal, illegal, illegal, ora, asl, illegal,
    clc, ora, illegal, illegal, illegal, ora, asl, illegal,
    jsr, and, illegal, illegal, bit, and, rol, illegal,
    plp, and, rol, illegal, bit, and, rol, illegal,
    bmi, and, illegal, illegal, illegal, and, rol, illegal,
    sec, and, illegal, illegal, illegal, and, rol, illegal,
    rti, eor, illegal, illegal, illegal, eor, lsr, illegal,
    pha, eor, lsr, illegal, jmp, eor, lsr, illegal,
    bvc, eor, illegal, illegal, illegal, eor, lsr, illegal,
    cli, eor, illegal, illegal, illegal, eor, lsr, illegal,
    rts, adc, illegal, illegal, illegal, adc, ror, illegal,
    pla, adc, ror, illegal, jmp, adc, ror, illegal,
    bvs, adc, illegal, illegal, illegal, adc, ror, illegal,
    sei, adc, illegal, illegal, illegal, adc, ror, illegal,
    illegal, sta, illegal, illegal, sty, sta, stx, illegal,
    dey, illegal, txa, illegal, sty, sta, stx, illegal,
    bcc, sta, illegal, illegal, sty, sta, stx, illegal,
    tya, sta, txs, illegal, illegal, sta, illegal, illegal,
    ldy, lda, ldx, illegal, ldy, lda, ldx, illegal,
    tay, lda, tax, illegal, ldy, lda, ldx, illegal,
    bcs, lda, illegal, illegal, ldy, lda, ldx, illegal,
    clv, lda, tsx, illegal, ldy, lda, ldx, illegal,
    cpy, cmp, illegal, illegal, cpy, cmp, dec, illegal,
    iny, cmp, dex, illegal, cpy, cmp, dec, illegal,
    bne, cmp, illegal, illegal, illegal, cmp, dec, illegal,
    cld, cmp, illegal, illegal, illegal, cmp, dec, illegal,
    cpx, sbc, illegal, illegal, cpx, sbc, inc, illegal,
    inx, sbc, nop, illegal, cpx, sbc, inc, illegal,
    beq, sbc, illegal, illegal, illegal, sbc, inc, illegal,
    sed, sbc, illegal, illegal, illegal, sbc, inc, illegal,
];
