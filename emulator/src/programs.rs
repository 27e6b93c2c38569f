use crate::system::ROM_SIZE;

/// Machine code for the built-in "Hello World!" program: the string
/// itself, then a copy loop that moves it into the terminal buffer one
/// byte at a time, a print command, and a halt command.
///
///   800d  LDX #$ff
///   800f  TXS
///   8010  INX           ; loop entry
///   8011  LDA $8000,X
///   8014  STA $4000,X
///   8017  BNE $8010     ; until the NUL is copied
///   8019  LDA #$aa
///   801b  STA $40ff     ; print
///   801e  LDA #$bb
///   8020  STA $40ff     ; halt
#[rustfmt::skip]
pub const HELLO_WORLD: [u8; 35] = [
    b'H', b'e', b'l', b'l', b'o', b' ',
    b'W', b'o', b'r', b'l', b'd', b'!', 0,
    0xa2, 0xff,             // LDX #$ff
    0x9a,                   // TXS
    0xe8,                   // INX
    0xbd, 0x00, 0x80,       // LDA $8000,X
    0x9d, 0x00, 0x40,       // STA $4000,X
    0xd0, 0xf7,             // BNE back to the INX
    0xa9, 0xaa,             // LDA #$aa
    0x8d, 0xff, 0x40,       // STA $40ff
    0xa9, 0xbb,             // LDA #$bb
    0x8d, 0xff, 0x40,       // STA $40ff
];

/// The code entry point: the first byte past the string data.
pub const HELLO_WORLD_ENTRY: u16 = 0x800D;

/// A full ROM image of the Hello World program, reset vector included.
pub fn hello_world_rom() -> Vec<u8> {
    let mut rom = vec![0; ROM_SIZE];
    rom[..HELLO_WORLD.len()].copy_from_slice(&HELLO_WORLD);
    rom[ROM_SIZE - 4..ROM_SIZE - 2].copy_from_slice(&HELLO_WORLD_ENTRY.to_le_bytes());
    rom
}
