//! Constant-time comparison.

use std::hint::black_box;

/// Returns `true` if `a == b`, in time independent of where they differ.
///
/// All bytes are XORed and accumulated before the single final comparison,
/// so there is no early exit on the first mismatch. Lengths are not secret:
/// slices of different length compare unequal immediately.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let diff = a
        .iter()
        .zip(b)
        .fold(0u8, |acc, (x, y)| acc | black_box(x ^ y));
    black_box(diff) == 0
}
