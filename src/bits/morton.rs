//! Morton (Z-order) bit interleaving.
//!
//! Axis 0 occupies the least significant bit of every `D`-bit group, so the
//! id of a cell at `level` is the base-`2^D` number whose digits are the
//! child ids along the path from the root.

/// Interleaves the low `level` bits of each coordinate into one id.
#[inline]
pub fn encode<const D: usize>(coords: [u32; D], level: u8) -> u64 {
    let mut id = 0u64;
    for bit in 0..u32::from(level) {
        for (axis, &c) in coords.iter().enumerate() {
            id |= u64::from((c >> bit) & 1) << (D as u32 * bit + axis as u32);
        }
    }
    id
}

/// Inverse of [`encode`].
#[inline]
pub fn decode<const D: usize>(id: u64, level: u8) -> [u32; D] {
    let mut coords = [0u32; D];
    for bit in 0..u32::from(level) {
        for (axis, c) in coords.iter_mut().enumerate() {
            *c |= (((id >> (D as u32 * bit + axis as u32)) & 1) as u32) << bit;
        }
    }
    coords
}
