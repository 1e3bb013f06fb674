//! Arithmetic on 16-bit remainders modulo a degree-16 generator polynomial over GF(2).
//!
//! Polynomials are written out in full as 17-bit values: bit 16 is the implicit leading
//! coefficient, e.g. 0x140cd = x^16 + x^14 + x^7 + x^6 + x^3 + x^2 + 1.
//! All functions require bit 16 and bit 0 of `poly` to be set.

/// Multiplies `r` by x modulo `poly`: one forward LFSR step.
#[inline]
pub const fn mul_x(poly: u32, r: u16) -> u16 {
    let t = (r as u32) << 1;
    if t & 0x1_0000 != 0 { (t ^ poly) as u16 } else { t as u16 }
}

/// Multiplies `r` by x^n modulo `poly`.
pub const fn mul_xn(poly: u32, mut r: u16, n: usize) -> u16 {
    let mut i = 0;
    while i < n {
        r = mul_x(poly, r);
        i += 1;
    }
    r
}

/// Multiplies `r` by x^-1 modulo `poly`: runs the CRC register backwards by one bit.
#[inline]
pub const fn div_x(poly: u32, r: u16) -> u16 {
    if r & 1 != 0 { (r >> 1) ^ (poly >> 1) as u16 } else { r >> 1 }
}
