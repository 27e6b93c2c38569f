/// The address bus as the CPU sees it: a byte-addressed 64KiB space.
///
/// The CPU does not interpret addresses; hosts decide what lives where
/// (RAM, ROM, memory-mapped devices) by implementing this trait. Reads
/// take `&self` so that inspection tools such as the disassembler cannot
/// perturb observable state.
pub trait Bus {
    fn read(&self, address: u16) -> u8;

    fn write(&mut self, address: u16, value: u8);

    /// Read a little-endian word. The second byte wraps around the top of
    /// the address space rather than overflowing.
    fn read_word(&self, address: u16) -> u16 {
        let low = self.read(address);
        let high = self.read(address.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }
}
