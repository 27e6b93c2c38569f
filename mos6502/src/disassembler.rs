use crate::bus::Bus;
use crate::opcodes::{mode_operand_count, Mode, ADDRESSING_MODE_TABLE, MNEMONIC_TABLE};

/// Render the instruction at `address` as text, returning it together
/// with the instruction length in bytes (1 to 3).
///
/// This consumes the same decode tables as the executor, so the two can
/// never drift apart. Taking the bus by shared reference guarantees that
/// disassembly cannot perturb observable state.
///
/// Undocumented opcodes render as `<nn>` with a length of one, letting a
/// debugger walk straight through data.
pub fn disassemble(bus: &dyn Bus, address: u16) -> (String, u16) {
    let opcode = bus.read(address);
    let mnemonic = MNEMONIC_TABLE[opcode as usize];
    if mnemonic.is_empty() {
        return (format!("<{:02x}>", opcode), 1);
    }

    let mode = ADDRESSING_MODE_TABLE[opcode as usize];
    let length = 1 + mode_operand_count(mode);

    let operand = match length {
        2 => bus.read(address.wrapping_add(1)) as u16,
        3 => bus.read_word(address.wrapping_add(1)),
        _ => 0,
    };

    let operand_text = match mode {
        Mode::Implied => String::new(),
        Mode::RegisterA => "A".to_string(),
        Mode::Immediate => format!("#{:02x}", operand),
        Mode::ZeroPage => format!("${:02x}", operand),
        Mode::ZeroPageX => format!("${:02x}, X", operand),
        Mode::ZeroPageY => format!("${:02x}, Y", operand),
        Mode::Absolute => format!("${:04x}", operand),
        Mode::AbsoluteX => format!("${:04x}, X", operand),
        Mode::AbsoluteY => format!("${:04x}, Y", operand),
        Mode::Indirect => format!("(${:04x})", operand),
        Mode::IndirectX => format!("(${:02x}, X)", operand),
        Mode::IndirectY => format!("(${:02x}), Y", operand),
        // The raw offset, then the address it resolves to relative to
        // the instruction that follows.
        Mode::Relative => {
            let target = address.wrapping_add(2).wrapping_add(operand as u8 as i8 as u16);
            format!("${:02x} ; ${:04x}", operand, target)
        }
        // Unreachable: Mode::None slots have empty mnemonics.
        Mode::None => return (format!("<{:02x}>", opcode), 1),
    };

    let text = if operand_text.is_empty() {
        mnemonic.to_string()
    } else {
        format!("{} {}", mnemonic, operand_text)
    };
    (text, length)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cpu::test_helpers::FlatBus;

    fn text_of(bytes: &[u8]) -> (String, u16) {
        disassemble(&FlatBus::load(bytes), 0x8000)
    }

    #[test]
    fn renders_every_operand_template() {
        assert_eq!(text_of(&[0xa9, 0x0a]), ("LDA #0a".to_string(), 2));
        assert_eq!(text_of(&[0xa5, 0x10]), ("LDA $10".to_string(), 2));
        assert_eq!(text_of(&[0xb5, 0x10]), ("LDA $10, X".to_string(), 2));
        assert_eq!(text_of(&[0xb6, 0x10]), ("LDX $10, Y".to_string(), 2));
        assert_eq!(text_of(&[0xad, 0x00, 0xc0]), ("LDA $c000".to_string(), 3));
        assert_eq!(text_of(&[0xbd, 0x00, 0xc0]), ("LDA $c000, X".to_string(), 3));
        assert_eq!(text_of(&[0xb9, 0x00, 0xc0]), ("LDA $c000, Y".to_string(), 3));
        assert_eq!(text_of(&[0x6c, 0x00, 0xc0]), ("JMP ($c000)".to_string(), 3));
        assert_eq!(text_of(&[0xa1, 0x20]), ("LDA ($20, X)".to_string(), 2));
        assert_eq!(text_of(&[0xb1, 0x20]), ("LDA ($20), Y".to_string(), 2));
        assert_eq!(text_of(&[0x0a]), ("ASL A".to_string(), 1));
        assert_eq!(text_of(&[0xea]), ("NOP".to_string(), 1));
    }

    #[test]
    fn relative_operands_show_raw_offset_and_target() {
        // Forward from $8000: target = $8002 + $10.
        assert_eq!(text_of(&[0xd0, 0x10]), ("BNE $10 ; $8012".to_string(), 2));
        // Backward: $80 is -128 from $8002.
        assert_eq!(text_of(&[0xd0, 0x80]), ("BNE $80 ; $7f82".to_string(), 2));
    }

    #[test]
    fn undocumented_opcodes_render_as_raw_bytes() {
        assert_eq!(text_of(&[0x02]), ("<02>".to_string(), 1));
        assert_eq!(text_of(&[0xff]), ("<ff>".to_string(), 1));
    }

    #[test]
    fn does_not_perturb_the_bus() {
        let mut bus = FlatBus::load(&[0xbd, 0x34, 0x12]);
        // Scribble a recognizable pattern everywhere else.
        for address in 0..0x8000u16 {
            bus.write(address, address as u8);
        }
        let before = bus.memory;
        for address in 0x7ff0..0x8010u16 {
            disassemble(&bus, address);
        }
        assert!(bus.memory.iter().eq(before.iter()));
    }
}
