//! A small two-pass assembler for the documented 6502 instruction set.
//!
//! This exists to keep tests and host tooling readable: programs are
//! written as assembly text instead of hand-maintained byte arrays. It
//! understands one instruction per line, `label:` definitions, label
//! operands (relative for branches, absolute otherwise) and `;` comments.

use crate::opcodes::{opcode_for, Mode, MNEMONIC_TABLE};
use colored::Colorize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: unknown mnemonic '{mnemonic}'")]
    UnknownMnemonic { line: usize, mnemonic: String },
    #[error("line {line}: malformed operand '{operand}'")]
    MalformedOperand { line: usize, operand: String },
    #[error("line {line}: '{mnemonic}' does not support that addressing mode")]
    NoSuchEncoding { line: usize, mnemonic: String },
    #[error("line {line}: unknown label '{label}'")]
    UnknownLabel { line: usize, label: String },
    #[error("line {line}: duplicate label '{label}'")]
    DuplicateLabel { line: usize, label: String },
    #[error("line {line}: branch target out of range")]
    BranchOutOfRange { line: usize },
}

impl AsmError {
    fn line(&self) -> usize {
        match self {
            AsmError::UnknownMnemonic { line, .. }
            | AsmError::MalformedOperand { line, .. }
            | AsmError::NoSuchEncoding { line, .. }
            | AsmError::UnknownLabel { line, .. }
            | AsmError::DuplicateLabel { line, .. }
            | AsmError::BranchOutOfRange { line } => *line,
        }
    }
}

/// Render an assembly error with the offending source line, for terminal
/// display.
pub fn report(source: &str, error: &AsmError) -> String {
    let line_number = error.line();
    let text = source.lines().nth(line_number - 1).unwrap_or("").trim_end();
    format!(
        "{} {}\n{:>4} {} {}",
        "error:".red().bold(),
        error,
        line_number,
        "|".dimmed(),
        text
    )
}

/// A parsed numeric literal. Hex values keep their written width so that
/// `$0010` can force an absolute encoding where `$10` means zero page.
#[derive(Clone, Copy)]
struct Number {
    value: u16,
    byte_sized: bool,
}

/// The operand of one statement after parsing, before label resolution.
enum Operand {
    None,
    U8(u8),
    U16(u16),
    RelativeLabel(String),
    AbsoluteLabel(String),
}

struct Statement {
    line: usize,
    opcode: u8,
    operand: Operand,
}

/// Assemble a program to machine code. `origin` is the address the first
/// byte will be loaded at; it only matters for label resolution.
pub fn assemble(source: &str, origin: u16) -> Result<Vec<u8>, AsmError> {
    let mut labels: HashMap<String, u16> = HashMap::new();
    let mut statements: Vec<(u16, Statement)> = Vec::new();
    let mut offset: u16 = 0;

    // First pass: encode every statement, remember label addresses, and
    // leave label operands as holes.
    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        let mut text = raw_line.split(';').next().unwrap_or("").trim();

        while let Some(colon) = text.find(':') {
            let label = text[..colon].trim();
            if !is_label(label) {
                break;
            }
            if labels
                .insert(label.to_string(), origin.wrapping_add(offset))
                .is_some()
            {
                return Err(AsmError::DuplicateLabel {
                    line: line_number,
                    label: label.to_string(),
                });
            }
            text = text[colon + 1..].trim();
        }

        if text.is_empty() {
            continue;
        }

        let statement = parse_statement(text, line_number)?;
        let size = 1 + match statement.operand {
            Operand::None => 0,
            Operand::U8(_) | Operand::RelativeLabel(_) => 1,
            Operand::U16(_) | Operand::AbsoluteLabel(_) => 2,
        };
        statements.push((offset, statement));
        offset += size;
    }

    // Second pass: emit bytes, patching label references now that every
    // label has an address.
    let mut bytes = Vec::with_capacity(offset as usize);
    for (statement_offset, statement) in statements {
        bytes.push(statement.opcode);
        match statement.operand {
            Operand::None => {}
            Operand::U8(value) => bytes.push(value),
            Operand::U16(value) => bytes.extend_from_slice(&value.to_le_bytes()),
            Operand::AbsoluteLabel(label) => {
                let address = resolve(&labels, &label, statement.line)?;
                bytes.extend_from_slice(&address.to_le_bytes());
            }
            Operand::RelativeLabel(label) => {
                let address = resolve(&labels, &label, statement.line)?;
                let next = origin.wrapping_add(statement_offset).wrapping_add(2);
                let delta = address.wrapping_sub(next) as i16;
                if !(-128..=127).contains(&delta) {
                    return Err(AsmError::BranchOutOfRange {
                        line: statement.line,
                    });
                }
                bytes.push(delta as u8);
            }
        }
    }
    Ok(bytes)
}

fn resolve(labels: &HashMap<String, u16>, label: &str, line: usize) -> Result<u16, AsmError> {
    labels.get(label).copied().ok_or_else(|| AsmError::UnknownLabel {
        line,
        label: label.to_string(),
    })
}

fn parse_statement(text: &str, line: usize) -> Result<Statement, AsmError> {
    let (name, rest) = match text.find(char::is_whitespace) {
        Some(space) => (&text[..space], text[space..].trim()),
        None => (text, ""),
    };
    let mnemonic = name.to_uppercase();
    if !MNEMONIC_TABLE.contains(&mnemonic.as_str()) {
        return Err(AsmError::UnknownMnemonic {
            line,
            mnemonic: name.to_string(),
        });
    }

    let encode = |mode: Mode, operand: Operand| -> Result<Statement, AsmError> {
        match opcode_for(&mnemonic, mode) {
            Some(opcode) => Ok(Statement {
                line,
                opcode,
                operand,
            }),
            None => Err(AsmError::NoSuchEncoding {
                line,
                mnemonic: mnemonic.clone(),
            }),
        }
    };
    let malformed = || AsmError::MalformedOperand {
        line,
        operand: rest.to_string(),
    };

    if rest.is_empty() {
        return encode(Mode::Implied, Operand::None);
    }
    if rest.eq_ignore_ascii_case("a") {
        return encode(Mode::RegisterA, Operand::None);
    }

    // Immediate: #$0a, #%00001010 or #10.
    if let Some(immediate) = rest.strip_prefix('#') {
        let number = parse_number(immediate).ok_or_else(malformed)?;
        if number.value > 0xFF {
            return Err(malformed());
        }
        return encode(Mode::Immediate, Operand::U8(number.value as u8));
    }

    // The indirect family: ($c000), ($20, X) and ($20), Y. These
    // operands are purely numeric, so normalizing the case is safe.
    if rest.starts_with('(') {
        let upper = rest.to_uppercase().replace(' ', "");
        let inner = upper.strip_prefix('(').ok_or_else(malformed)?;
        if let Some(pointer) = inner.strip_suffix("),Y") {
            let number = parse_number(pointer).ok_or_else(malformed)?;
            if number.value > 0xFF {
                return Err(malformed());
            }
            return encode(Mode::IndirectY, Operand::U8(number.value as u8));
        }
        if let Some(pointer) = inner.strip_suffix(",X)") {
            let number = parse_number(pointer).ok_or_else(malformed)?;
            if number.value > 0xFF {
                return Err(malformed());
            }
            return encode(Mode::IndirectX, Operand::U8(number.value as u8));
        }
        let pointer = inner.strip_suffix(')').ok_or_else(malformed)?;
        let number = parse_number(pointer).ok_or_else(malformed)?;
        return encode(Mode::Indirect, Operand::U16(number.value));
    }

    // Anything else is a value or label, optionally indexed: $10, $10,X,
    // $c000,Y, start, loop.
    let (value_text, index) = match rest.rsplit_once(',') {
        Some((value, register)) => match register.trim() {
            "X" | "x" => (value.trim(), Some(Index::X)),
            "Y" | "y" => (value.trim(), Some(Index::Y)),
            _ => return Err(malformed()),
        },
        None => (rest, None),
    };

    let relative = opcode_for(&mnemonic, Mode::Relative).is_some();

    if let Some(number) = parse_number(value_text) {
        if relative {
            if number.value > 0xFF || index.is_some() {
                return Err(malformed());
            }
            return encode(Mode::Relative, Operand::U8(number.value as u8));
        }
        if number.byte_sized {
            // Prefer the zero-page encoding and fall back to absolute
            // for instructions that only have the wide form.
            let zero_page = match index {
                None => Mode::ZeroPage,
                Some(Index::X) => Mode::ZeroPageX,
                Some(Index::Y) => Mode::ZeroPageY,
            };
            if opcode_for(&mnemonic, zero_page).is_some() {
                return encode(zero_page, Operand::U8(number.value as u8));
            }
        }
        let absolute = match index {
            None => Mode::Absolute,
            Some(Index::X) => Mode::AbsoluteX,
            Some(Index::Y) => Mode::AbsoluteY,
        };
        return encode(absolute, Operand::U16(number.value));
    }

    if !is_label(value_text) || index.is_some() {
        return Err(malformed());
    }
    if relative {
        encode(Mode::Relative, Operand::RelativeLabel(value_text.to_string()))
    } else {
        encode(Mode::Absolute, Operand::AbsoluteLabel(value_text.to_string()))
    }
}

enum Index {
    X,
    Y,
}

fn is_label(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse `$` hex, `%` binary or plain decimal. Hex literals written with
/// more than two digits are absolute even when their value fits a byte.
fn parse_number(text: &str) -> Option<Number> {
    if let Some(hex) = text.strip_prefix('$') {
        let value = u16::from_str_radix(hex, 16).ok()?;
        return Some(Number {
            value,
            byte_sized: hex.len() <= 2,
        });
    }
    if let Some(binary) = text.strip_prefix('%') {
        let value = u16::from_str_radix(binary, 2).ok()?;
        return Some(Number {
            value,
            byte_sized: binary.len() <= 8,
        });
    }
    let value = text.parse::<u16>().ok()?;
    Some(Number {
        value,
        byte_sized: value <= 0xFF,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn bytes(source: &str) -> Vec<u8> {
        match assemble(source, 0x8000) {
            Ok(bytes) => bytes,
            Err(error) => panic!("{}", report(source, &error)),
        }
    }

    #[test]
    fn encodes_each_operand_form() {
        assert_eq!(bytes("lda #$22"), vec![0xa9, 0x22]);
        assert_eq!(bytes("lda #%00001111"), vec![0xa9, 0x0f]);
        assert_eq!(bytes("lda #16"), vec![0xa9, 0x10]);
        assert_eq!(bytes("lda $10"), vec![0xa5, 0x10]);
        assert_eq!(bytes("lda $10,X"), vec![0xb5, 0x10]);
        assert_eq!(bytes("ldx $10,Y"), vec![0xb6, 0x10]);
        assert_eq!(bytes("lda $c000"), vec![0xad, 0x00, 0xc0]);
        assert_eq!(bytes("lda $c000,X"), vec![0xbd, 0x00, 0xc0]);
        assert_eq!(bytes("lda $c000,Y"), vec![0xb9, 0x00, 0xc0]);
        assert_eq!(bytes("jmp ($c000)"), vec![0x6c, 0x00, 0xc0]);
        assert_eq!(bytes("lda ($20,X)"), vec![0xa1, 0x20]);
        assert_eq!(bytes("lda ($20),Y"), vec![0xb1, 0x20]);
        assert_eq!(bytes("asl a"), vec![0x0a]);
        assert_eq!(bytes("nop"), vec![0xea]);
    }

    #[test]
    fn four_digit_hex_forces_the_absolute_encoding() {
        assert_eq!(bytes("lda $0010"), vec![0xad, 0x10, 0x00]);
    }

    #[test]
    fn promotes_when_no_zero_page_encoding_exists() {
        // LDA has no zero-page-Y form, so this becomes absolute-Y.
        assert_eq!(bytes("lda $10,Y"), vec![0xb9, 0x10, 0x00]);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        assert_eq!(
            bytes("; setup\n\n  lda #$01 ; load\n  nop\n"),
            vec![0xa9, 0x01, 0xea]
        );
    }

    #[test]
    fn branch_labels_become_relative_offsets() {
        let program = bytes(
            "
            loop: dex
            bne loop
            ",
        );
        // DEX at $8000, BNE operand relative to $8003.
        assert_eq!(program, vec![0xca, 0xd0, 0xfd]);
    }

    #[test]
    fn forward_branches_resolve() {
        let program = bytes(
            "
            bne done
            lda #$01
            done: nop
            ",
        );
        assert_eq!(program, vec![0xd0, 0x02, 0xa9, 0x01, 0xea]);
    }

    #[test]
    fn jump_labels_become_absolute_addresses() {
        let program = bytes(
            "
            nop
            entry: jmp entry
            jsr entry
            ",
        );
        assert_eq!(
            program,
            vec![0xea, 0x4c, 0x01, 0x80, 0x20, 0x01, 0x80]
        );
    }

    #[test]
    fn unknown_mnemonics_are_rejected() {
        assert_eq!(
            assemble("xyz #$01", 0x8000),
            Err(AsmError::UnknownMnemonic {
                line: 1,
                mnemonic: "xyz".to_string()
            })
        );
    }

    #[test]
    fn impossible_modes_are_rejected() {
        assert_eq!(
            assemble("sta #$01", 0x8000),
            Err(AsmError::NoSuchEncoding {
                line: 1,
                mnemonic: "STA".to_string()
            })
        );
    }

    #[test]
    fn branches_out_of_range_are_rejected() {
        let mut source = String::from("start: nop\n");
        for _ in 0..100 {
            source.push_str("lda #$00\n");
        }
        source.push_str("bne start\n");
        assert_eq!(
            assemble(&source, 0x8000),
            Err(AsmError::BranchOutOfRange { line: 102 })
        );
    }
}
