/// Numbering of the bits inside a byte buffer.
/// Bit `n` always lives in byte `n / 8`; the order decides which bit of that byte it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Bit 0 is the most significant bit of byte 0 (network order, also the CRC's own order)
    MsbFirst,
    /// Bit 0 is the least significant bit of byte 0 (UART / radio serializer order)
    LsbFirst,
}

impl BitOrder {
    /// Mask selecting bit `bit` within its byte
    #[inline]
    pub const fn mask(self, bit: usize) -> u8 {
        match self {
            BitOrder::MsbFirst => 0x80 >> (bit % 8),
            BitOrder::LsbFirst => 1 << (bit % 8),
        }
    }
}

#[inline]
pub fn get_nth_bit(input: &[u8], bit: usize, order: BitOrder) -> u8 {
    let byte = bit / 8;
    (input[byte] & order.mask(bit) != 0) as u8
}

#[inline]
pub fn flip_nth_bit(buf: &mut [u8], bit: usize, order: BitOrder) {
    buf[bit / 8] ^= order.mask(bit);
}

/// Flips `run_len` consecutive bits starting at `offset`.
/// Caller guarantees `offset + run_len <= 8 * buf.len()`.
pub fn flip_run(buf: &mut [u8], offset: usize, run_len: usize, order: BitOrder) {
    for bit in offset..offset + run_len {
        flip_nth_bit(buf, bit, order);
    }
}
