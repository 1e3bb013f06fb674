use crate::gf2;

/// Two 256-entry tables reducing a 16-bit partial remainder modulo the generator.
///
/// `lo[b]` is `b * x^16 mod poly` (the low byte sitting 8 bits below the register top,
/// shifted out through 8 rounds), `hi[b]` is `b * x^24 mod poly` (the high byte, 16 rounds).
/// Together `reduce(r) == r * x^16 mod poly`, replacing a 16-round bit loop by two lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReductionTable {
    lo: [u16; 256],
    hi: [u16; 256],
}

impl ReductionTable {
    /// Builds both tables for `poly` (17-bit, leading coefficient included).
    /// Usable in const context, so the compiled-in profiles carry their tables as data.
    pub const fn new(poly: u32) -> Self {
        let mut lo = [0u16; 256];
        let mut hi = [0u16; 256];
        let mut b = 0;
        while b < 256 {
            lo[b] = gf2::mul_xn(poly, (b as u16) << 8, 8);
            hi[b] = gf2::mul_xn(poly, (b as u16) << 8, 16);
            b += 1;
        }
        Self { lo, hi }
    }

    pub const fn from_parts(lo: [u16; 256], hi: [u16; 256]) -> Self {
        Self { lo, hi }
    }

    pub const fn lo(&self) -> &[u16; 256] {
        &self.lo
    }

    pub const fn hi(&self) -> &[u16; 256] {
        &self.hi
    }

    #[inline]
    pub const fn reduce(&self, r: u16) -> u16 {
        self.lo[(r & 0xff) as usize] ^ self.hi[(r >> 8) as usize]
    }

    /// Returns the first entry that differs from the table derived from `poly`,
    /// as (table, index) where table 0 is `lo` and 1 is `hi`.
    pub fn first_mismatch(&self, poly: u32) -> Option<(usize, usize)> {
        let reference = Self::new(poly);
        for (t, (ours, theirs)) in [(&self.lo, &reference.lo), (&self.hi, &reference.hi)].into_iter().enumerate() {
            if let Some(idx) = ours.iter().zip(theirs.iter()).position(|(a, b)| a != b) {
                return Some((t, idx));
            }
        }
        None
    }
}
